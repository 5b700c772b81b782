//! # jobscout Core
//!
//! Domain types, traits, and error definitions for the jobscout agent.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod capability;
pub mod error;
pub mod memory;
pub mod model;
pub mod step;

// Re-export key types at crate root for ergonomics
pub use capability::{Capability, CapabilityRegistry};
pub use error::{DispatchError, EngineError, Error, ModelError, RegistryError, Result};
pub use memory::{ConversationMemory, ConversationTurn, TurnRole};
pub use model::{CompletionModel, CompletionRequest, CompletionResponse, Usage};
pub use step::{AgentStep, Decision, ReasonedStep, Scratchpad};
