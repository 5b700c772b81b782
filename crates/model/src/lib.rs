//! Language-model backend implementations for jobscout.
//!
//! The reasoning engine only knows the `CompletionModel` trait from core;
//! this crate provides the HTTP-backed implementation.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatModel;
