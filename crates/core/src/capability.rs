//! Capability trait — the abstraction over what the agent can do.
//!
//! Capabilities are what give the agent the ability to act in the world:
//! search for job postings, send an email summary. Each one is registered
//! exactly once at startup; the registry is immutable for the rest of the
//! process lifetime and may be shared read-only across sessions.

use async_trait::async_trait;
use crate::error::RegistryError;

/// The core Capability trait.
///
/// A capability is a named, side-effecting operation the reasoning engine
/// may select. Invocation is infallible by contract: any internal failure
/// (missing credentials, upstream outage, bad input) must be converted to
/// a descriptive result string, never propagated as an error. The dispatch
/// loop treats whatever comes back as the observation for that step.
#[async_trait]
pub trait Capability: Send + Sync {
    /// The unique name of this capability (e.g., "get_job_postings").
    fn name(&self) -> &str;

    /// A natural-language usage hint shown to the reasoning engine.
    fn description(&self) -> &str;

    /// Invoke the capability with a free-text input.
    async fn invoke(&self, input: &str) -> String;
}

/// A registry of available capabilities.
///
/// The dispatch loop uses this to:
/// 1. Get the ordered (name, description) pairs for the reasoning prompt
/// 2. Look up and invoke capabilities when the engine requests them
///
/// Registration order is preserved so that prompts are reproducible:
/// `describe_all()` returns the same ordering on every call.
pub struct CapabilityRegistry {
    capabilities: Vec<Box<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            capabilities: Vec::new(),
        }
    }

    /// Register a capability. Fails if the name is already taken.
    pub fn register(&mut self, capability: Box<dyn Capability>) -> Result<(), RegistryError> {
        let name = capability.name();
        if self.capabilities.iter().any(|c| c.name() == name) {
            return Err(RegistryError::DuplicateCapability(name.to_string()));
        }
        self.capabilities.push(capability);
        Ok(())
    }

    /// Get a capability by name.
    pub fn get(&self, name: &str) -> Option<&dyn Capability> {
        self.capabilities
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// The ordered (name, description) pairs used to build the reasoning
    /// prompt. Order is registration order, stable across calls.
    pub fn describe_all(&self) -> Vec<(&str, &str)> {
        self.capabilities
            .iter()
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// Invoke a capability by name.
    ///
    /// The result string is returned verbatim — the registry does not
    /// interpret or retry on adapter-level failures.
    pub async fn invoke(&self, name: &str, input: &str) -> Result<String, RegistryError> {
        let capability = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownCapability(name.to_string()))?;
        Ok(capability.invoke(input).await)
    }

    /// List all registered capability names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
