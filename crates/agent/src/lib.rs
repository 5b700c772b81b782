//! Dispatch loop — the state machine at the heart of jobscout.
//!
//! A [`Session`] owns one conversation: it drives the
//! REASONING → (ACTING → OBSERVING → REASONING)* → DONE cycle for each
//! user request, enforces the iteration bound, feeds unknown-capability
//! errors back to the model as observations, and commits exactly one
//! user/agent turn pair to conversation memory per completed request.

pub mod session;

pub use session::Session;
