//! The reasoning engine proper: one prompt in, one parsed decision out.

use std::sync::Arc;

use jobscout_core::error::EngineError;
use jobscout_core::model::{CompletionModel, CompletionRequest};
use jobscout_core::step::{ReasonedStep, Scratchpad};
use tracing::{debug, trace};

use crate::decision;
use crate::prompt::PromptBuilder;

/// Wraps a language model and a fixed capability list.
///
/// Stateless across calls: each `decide` formats the full prompt from its
/// arguments, obtains exactly one completion, and parses it. Recovery
/// from malformed completions is the dispatch loop's concern.
pub struct ReasoningEngine {
    model: Arc<dyn CompletionModel>,
    model_name: String,
    temperature: f32,
    max_tokens: Option<u32>,
    prompt: PromptBuilder,
}

impl ReasoningEngine {
    /// Create a new engine over the given model and capability
    /// descriptions (registration order, as returned by
    /// `CapabilityRegistry::describe_all`).
    pub fn new(
        model: Arc<dyn CompletionModel>,
        model_name: impl Into<String>,
        capabilities: Vec<(String, String)>,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            // Deterministic decoding by default so identical contexts tend
            // to produce identical decisions.
            temperature: 0.0,
            max_tokens: None,
            prompt: PromptBuilder::new(capabilities),
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per completion.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Produce the next step for the given request context.
    pub async fn decide(
        &self,
        user_request: &str,
        memory_context: &str,
        scratchpad: &Scratchpad,
    ) -> Result<ReasonedStep, EngineError> {
        let prompt = self.prompt.build(user_request, memory_context, scratchpad);
        trace!(prompt_len = prompt.len(), "Assembled reasoning prompt");

        let request = CompletionRequest {
            model: self.model_name.clone(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            // The model must never fabricate its own observations.
            stop: vec!["\nObservation:".to_string()],
        };

        let response = self.model.complete(request).await?;
        debug!(
            backend = %self.model.name(),
            model = %response.model,
            completion_len = response.text.len(),
            "Received completion"
        );

        decision::parse(&response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jobscout_core::error::ModelError;
    use jobscout_core::model::CompletionResponse;
    use jobscout_core::step::Decision;
    use std::sync::Mutex;

    /// A model that returns canned completions and records its prompts.
    struct ScriptedModel {
        completions: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(completions: Vec<&str>) -> Self {
            Self {
                completions: Mutex::new(completions.iter().rev().map(|s| s.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, ModelError> {
            self.prompts.lock().unwrap().push(request.prompt);
            let text = self
                .completions
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| "Thought: done\nFinal Answer: ok".into());
            Ok(CompletionResponse {
                text,
                model: request.model,
                usage: None,
            })
        }
    }

    fn engine_with(model: Arc<ScriptedModel>) -> ReasoningEngine {
        ReasoningEngine::new(
            model,
            "test-model",
            vec![("get_job_postings".into(), "Search for jobs.".into())],
        )
    }

    #[tokio::test]
    async fn decide_parses_action() {
        let model = Arc::new(ScriptedModel::new(vec![
            "Thought: search\nAction: get_job_postings\nAction Input: rust jobs",
        ]));
        let engine = engine_with(model.clone());

        let step = engine
            .decide("find rust jobs", "", &Scratchpad::new(5))
            .await
            .unwrap();
        assert!(matches!(step.decision, Decision::Invoke { .. }));

        // Prompt carried the framing, the capability list, and the question.
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("get_job_postings: Search for jobs."));
        assert!(prompts[0].contains("Question: find rust jobs"));
    }

    #[tokio::test]
    async fn decide_surfaces_malformed_completion() {
        let model = Arc::new(ScriptedModel::new(vec!["I refuse to follow formats"]));
        let engine = engine_with(model);

        let err = engine
            .decide("anything", "", &Scratchpad::new(5))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::MalformedDecision { .. }));
    }

    #[tokio::test]
    async fn decide_requests_observation_stop_sequence() {
        struct CapturingModel(Mutex<Option<CompletionRequest>>);

        #[async_trait]
        impl CompletionModel for CapturingModel {
            fn name(&self) -> &str {
                "capturing"
            }
            async fn complete(
                &self,
                request: CompletionRequest,
            ) -> Result<CompletionResponse, ModelError> {
                let text = "Thought: done\nFinal Answer: ok".to_string();
                *self.0.lock().unwrap() = Some(request.clone());
                Ok(CompletionResponse {
                    text,
                    model: request.model,
                    usage: None,
                })
            }
        }

        let model = Arc::new(CapturingModel(Mutex::new(None)));
        let engine = ReasoningEngine::new(model.clone(), "m", vec![]);
        engine.decide("q", "", &Scratchpad::new(3)).await.unwrap();

        let captured = model.0.lock().unwrap().take().unwrap();
        assert_eq!(captured.stop, vec!["\nObservation:".to_string()]);
        assert!((captured.temperature - 0.0).abs() < f32::EPSILON);
    }
}
