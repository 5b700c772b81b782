//! Session — one conversation, one dispatch loop.
//!
//! # State machine
//!
//! `REASONING → (ACTING → OBSERVING → REASONING)* → DONE`
//!
//! Each request starts in `REASONING` with an empty scratchpad and ends
//! in `DONE` when the engine produces a final answer, or fails when the
//! iteration bound is hit or the model stays off-grammar after one
//! corrective re-prompt. Conversation memory is only touched on the
//! `DONE` path: the user request and the final answer are appended as a
//! pair, so failed requests leave no partial turns behind.
//!
//! # Malformed-decision policy
//!
//! Correct-once: the first off-grammar completion is answered with a
//! correction step in the scratchpad (its observation restates the
//! expected format) and one re-prompt; a second off-grammar completion
//! aborts the request. This is deterministic — there is never more than
//! one retry per request.

use std::sync::Arc;

use jobscout_core::capability::CapabilityRegistry;
use jobscout_core::error::{DispatchError, EngineError};
use jobscout_core::memory::{ConversationMemory, ConversationTurn};
use jobscout_core::step::{AgentStep, Decision, Scratchpad};
use jobscout_engine::decision::unquote;
use jobscout_engine::ReasoningEngine;
use tracing::{debug, info, warn};

const CORRECTION_NOTICE: &str = "Your previous response did not follow the required format. \
     Respond with a 'Thought:' line followed by either 'Action:' and 'Action Input:' lines, \
     or a 'Final Answer:' line.";

/// A single-user conversation session.
pub struct Session {
    engine: ReasoningEngine,
    registry: Arc<CapabilityRegistry>,
    memory: ConversationMemory,
    max_iterations: usize,
}

impl Session {
    /// Create a session.
    ///
    /// `max_iterations` bounds the scratchpad length per request and must
    /// be at least 1 (validated by configuration before construction).
    pub fn new(
        engine: ReasoningEngine,
        registry: Arc<CapabilityRegistry>,
        max_iterations: usize,
    ) -> Self {
        Self {
            engine,
            registry,
            memory: ConversationMemory::new(),
            max_iterations,
        }
    }

    /// The conversation memory accumulated so far.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Process one user request start-to-finish and return the final answer.
    ///
    /// On any failure the session stays usable and memory is unchanged.
    pub async fn handle_request(&mut self, user_request: &str) -> Result<String, DispatchError> {
        let memory_context = self.memory.as_prompt_context();
        let mut scratchpad = Scratchpad::new(self.max_iterations);
        let mut corrected = false;

        info!(max_iterations = self.max_iterations, "Dispatch loop starting");

        loop {
            let step = match self
                .engine
                .decide(user_request, &memory_context, &scratchpad)
                .await
            {
                Ok(step) => step,
                Err(EngineError::MalformedDecision { reason, raw }) => {
                    if corrected || !scratchpad.has_budget() {
                        warn!(%reason, "Aborting request: completion off-grammar");
                        return Err(DispatchError::MalformedDecision { reason, raw });
                    }
                    warn!(%reason, "Off-grammar completion, re-prompting once");
                    corrected = true;
                    scratchpad.push(AgentStep::correction(
                        "(response was not in the expected format)",
                        CORRECTION_NOTICE,
                    ));
                    continue;
                }
                Err(EngineError::Model(e)) => return Err(e.into()),
            };

            match step.decision {
                Decision::Finish { answer } => {
                    info!(
                        steps = scratchpad.len(),
                        invocations = scratchpad.invocation_count(),
                        "Dispatch loop completed"
                    );
                    self.memory.append(ConversationTurn::user(user_request));
                    self.memory.append(ConversationTurn::agent(&answer));
                    return Ok(answer);
                }
                Decision::Invoke { capability, input } => {
                    let input = unquote(&input).to_string();
                    debug!(capability = %capability, "Invoking capability");

                    let observation = match self.registry.invoke(&capability, &input).await {
                        Ok(result) => result,
                        // Not fatal: feed the error back so the model can
                        // self-correct, still bounded by the iteration limit.
                        Err(_) => {
                            warn!(capability = %capability, "Unknown capability requested");
                            format!(
                                "Unknown capability '{}'. Available capabilities: {}.",
                                capability,
                                self.registry.names().join(", ")
                            )
                        }
                    };

                    scratchpad.push(AgentStep::acted(
                        step.thought,
                        capability,
                        input,
                        observation,
                    ));

                    if !scratchpad.has_budget() {
                        warn!(limit = self.max_iterations, "Iteration limit exceeded");
                        return Err(DispatchError::IterationLimitExceeded {
                            limit: self.max_iterations,
                        });
                    }
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
