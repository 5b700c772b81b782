//! Reasoning engine — wraps a language model behind a fixed decision grammar.
//!
//! Given a user request, the rendered conversation memory, and the
//! scratchpad-so-far, the engine formats a single textual prompt, obtains
//! one completion, and parses it into a [`ReasonedStep`]: either an
//! action request or a final answer. Parsing is strict; anything outside
//! the grammar is a [`jobscout_core::EngineError::MalformedDecision`].
//!
//! The engine is stateless across calls and never retries — recovery
//! policy belongs to the dispatch loop.

pub mod decision;
pub mod engine;
pub mod prompt;

pub use engine::ReasoningEngine;
pub use prompt::PromptBuilder;
