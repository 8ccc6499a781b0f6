use std::time::Duration;

use docsynth_core::DocsynthError;
use docsynth_graph::{WorkflowConfig, WorkflowOptions};

#[test]
fn defaults_match_documented_values() {
    let config = WorkflowConfig::default();
    assert_eq!(config.max_iterations, 2);
    assert_eq!(config.base_temperature, 0.3);
    assert_eq!(config.temperature_step, 0.1);
    assert_eq!(config.sample_count, 2);
    assert_eq!(config.max_refine_attempts, None);
    assert_eq!(config.refine_attempt_limit(), 5);
    assert_eq!(config.backend_timeout, None);
    assert_eq!(config.retry_attempts, 1);
    assert_eq!(config.retrieval_question, "What is the purpose of the assessment?");
    assert!(config.validate().is_ok());
}

#[test]
fn merge_prefers_overrides_and_keeps_the_rest() {
    let defaults = WorkflowConfig::default();
    let overrides = WorkflowOptions {
        max_iterations: Some(4),
        base_temperature: Some(0.7),
        backend_timeout: Some(Duration::from_secs(30)),
        augmentation_query: Some("Company background?".to_string()),
        ..WorkflowOptions::default()
    };

    let merged = defaults.merge(&overrides);
    assert_eq!(merged.max_iterations, 4);
    assert_eq!(merged.base_temperature, 0.7);
    assert_eq!(merged.backend_timeout, Some(Duration::from_secs(30)));
    assert_eq!(merged.augmentation_query, "Company background?");
    assert_eq!(merged.sample_count, defaults.sample_count);
    assert_eq!(merged.retrieval_question, defaults.retrieval_question);
    assert_eq!(merged.refine_attempt_limit(), 9);

    assert_eq!(defaults.merge(&WorkflowOptions::default()), defaults);
}

#[test]
fn explicit_refine_attempt_cap_wins() {
    let config = WorkflowConfig {
        max_refine_attempts: Some(3),
        ..WorkflowConfig::default()
    };
    assert_eq!(config.refine_attempt_limit(), 3);
}

#[test]
fn validation_rejects_unusable_settings() {
    let cases = [
        WorkflowConfig {
            sample_count: 0,
            ..WorkflowConfig::default()
        },
        WorkflowConfig {
            max_iterations: 0,
            ..WorkflowConfig::default()
        },
        WorkflowConfig {
            base_temperature: -0.1,
            ..WorkflowConfig::default()
        },
        WorkflowConfig {
            temperature_step: f32::NAN,
            ..WorkflowConfig::default()
        },
        WorkflowConfig {
            max_refine_attempts: Some(0),
            ..WorkflowConfig::default()
        },
        WorkflowConfig {
            retry_attempts: 0,
            ..WorkflowConfig::default()
        },
        WorkflowConfig {
            backend_timeout: Some(Duration::ZERO),
            ..WorkflowConfig::default()
        },
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(DocsynthError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
    }
}
