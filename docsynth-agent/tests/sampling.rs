use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use docsynth_agent::SamplingGenerator;
use docsynth_core::{DocsynthError, LlmRequest, LlmResponse, Role, Runnable};
use docsynth_prompt::brd::GENERATION_SYSTEM_MESSAGE;
use tokio::sync::Barrier;

type Script = Box<dyn Fn(f32) -> Result<String, DocsynthError> + Send + Sync>;

struct ScriptedLlm {
    calls: AtomicUsize,
    seen: Mutex<Vec<LlmRequest>>,
    script: Script,
}

impl ScriptedLlm {
    fn new(script: impl Fn(f32) -> Result<String, DocsynthError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            script: Box::new(script),
        })
    }
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for ScriptedLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, DocsynthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let temperature = input.temperature.unwrap_or_default();
        self.seen.lock().unwrap().push(input);
        (self.script)(temperature).map(|content| LlmResponse { content })
    }
}

struct SlowLlm;

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for SlowLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, DocsynthError> {
        if input.temperature == Some(0.3) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok(LlmResponse {
            content: "fast draft".to_string(),
        })
    }
}

struct GatedLlm {
    gate: Barrier,
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for GatedLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, DocsynthError> {
        // releases only once every sample is in flight
        self.gate.wait().await;
        Ok(LlmResponse {
            content: format!("draft at {}", input.temperature.unwrap_or_default()),
        })
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn temperatures_step_from_base() {
    let generator = SamplingGenerator::new(ScriptedLlm::new(|_| Ok(String::new())));
    assert_eq!(generator.temperatures(0.3, 3), vec![0.3, 0.4, 0.5]);

    let generator = generator.with_temperature_step(0.25);
    assert_eq!(generator.temperatures(0.0, 3), vec![0.0, 0.25, 0.5]);
}

#[tokio::test]
async fn every_sample_is_dispatched_with_generation_instruction() {
    let llm = ScriptedLlm::new(|t| Ok(format!("draft at {t}")));
    let generator = SamplingGenerator::new(llm.clone());

    let report = generator.sample("Write the BRD", 0.3, 3).await.unwrap();

    assert_eq!(llm.calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.all_candidates.len(), 3);
    let seen = llm.seen.lock().unwrap();
    for request in seen.iter() {
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, GENERATION_SYSTEM_MESSAGE);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Write the BRD");
    }
}

#[tokio::test]
async fn survivors_are_kept_in_temperature_order() {
    let llm = ScriptedLlm::new(|t| {
        if close(t, 0.4) {
            Err(DocsynthError::LlmProvider("rate limited".to_string()))
        } else {
            Ok(format!("draft {t}"))
        }
    });
    let generator = SamplingGenerator::new(llm);

    let report = generator.sample("prompt", 0.3, 3).await.unwrap();

    assert_eq!(
        report.all_candidates.as_slice(),
        &["draft 0.3".to_string(), "draft 0.5".to_string()]
    );
}

#[tokio::test]
async fn single_survivor_yields_trivial_report() {
    let llm = ScriptedLlm::new(|t| {
        if close(t, 0.4) {
            Ok("the one that worked".to_string())
        } else {
            Err(DocsynthError::LlmProvider("boom".to_string()))
        }
    });
    let generator = SamplingGenerator::new(llm.clone());

    let report = generator.sample("prompt", 0.3, 3).await.unwrap();

    assert_eq!(llm.calls.load(Ordering::SeqCst), 3);
    assert_eq!(report.selected, "the one that worked");
    assert_eq!(report.all_candidates.len(), 1);
    assert_eq!(report.mean_pairwise_similarity, 0.0);
    assert_eq!(report.similarity_stddev, 0.0);
}

#[tokio::test]
async fn all_failures_exhaust_generation() {
    let llm = ScriptedLlm::new(|t| Err(DocsynthError::InvalidTemperature(t)));
    let generator = SamplingGenerator::new(llm.clone());

    let err = generator.sample("prompt", 1.4, 2).await.unwrap_err();

    assert!(matches!(err, DocsynthError::GenerationExhausted { attempted: 2 }));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn blank_responses_do_not_count_as_candidates() {
    let llm = ScriptedLlm::new(|t| {
        if close(t, 0.3) {
            Ok("  \n".to_string())
        } else {
            Ok("real draft".to_string())
        }
    });
    let generator = SamplingGenerator::new(llm);

    let report = generator.sample("prompt", 0.3, 2).await.unwrap();

    assert_eq!(report.all_candidates.as_slice(), &["real draft".to_string()]);
}

#[tokio::test]
async fn zero_samples_is_a_config_error() {
    let llm = ScriptedLlm::new(|_| Ok("x".to_string()));
    let generator = SamplingGenerator::new(llm.clone());

    let err = generator.sample("prompt", 0.3, 0).await.unwrap_err();

    assert!(matches!(err, DocsynthError::InvalidConfig(_)));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_sample_is_dropped_after_deadline() {
    let generator =
        SamplingGenerator::new(Arc::new(SlowLlm)).with_deadline(Some(Duration::from_secs(5)));

    let report = generator.sample("prompt", 0.3, 2).await.unwrap();

    assert_eq!(report.all_candidates.as_slice(), &["fast draft".to_string()]);
}

#[tokio::test]
async fn samples_are_in_flight_together() {
    let llm = Arc::new(GatedLlm {
        gate: Barrier::new(3),
    });
    let generator = SamplingGenerator::new(llm);

    let report = tokio::time::timeout(
        Duration::from_secs(5),
        generator.sample("Write the BRD", 0.3, 3),
    )
    .await
    .expect("samples should run concurrently")
    .unwrap();

    assert_eq!(report.all_candidates.len(), 3);
}
