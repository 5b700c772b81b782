//! Error types for the jobscout domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type; the top-level `Error`
//! aggregates them for callers that don't care which context failed.

use thiserror::Error;

/// The top-level error type for all jobscout operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Registry errors ---
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // --- Reasoning engine errors ---
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    // --- Dispatch errors ---
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    // --- Model errors ---
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures at the capability registry boundary.
///
/// Adapter-level failures never appear here: a capability converts its
/// own errors into a human-readable result string, so the only things
/// that can go wrong at this boundary are name collisions and lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Capability already registered: {0}")]
    DuplicateCapability(String),

    #[error("Unknown capability: {0}")]
    UnknownCapability(String),
}

/// Failures from the reasoning engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The completion did not match the decision grammar
    /// (`Thought:` then `Action:` + `Action Input:` or `Final Answer:`).
    #[error("Malformed decision: {reason}")]
    MalformedDecision { reason: String, raw: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Request-level failures surfaced by `Session::handle_request`.
///
/// None of these terminate the process; the session remains usable
/// for the next request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The scratchpad reached the configured maximum iteration count
    /// without a terminal step. Conversation memory is left unmodified.
    #[error("Iteration limit exceeded after {limit} steps")]
    IterationLimitExceeded { limit: usize },

    /// The model produced a completion outside the decision grammar
    /// twice in a row (once plus one corrective re-prompt).
    #[error("Model produced a malformed decision: {reason}")]
    MalformedDecision { reason: String, raw: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Failures from the language-model backend.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by model backend, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model backend not configured: {0}")]
    NotConfigured(String),
}
