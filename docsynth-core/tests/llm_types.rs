use docsynth_core::{LlmRequest, Message, Role};
use serde_json::json;

#[test]
fn chat_request_orders_system_before_user() {
    let request = LlmRequest::chat("be precise", "write it").with_temperature(0.4);

    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0], Message::system("be precise"));
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.temperature, Some(0.4));
}

#[test]
fn request_serializes_lowercase_roles_and_skips_missing_temperature() {
    let request = LlmRequest::chat("sys", "usr");
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        value,
        json!({
            "model": "",
            "messages": [
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "usr"}
            ]
        })
    );
}
