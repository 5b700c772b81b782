//! Capability adapters — the outward-facing integrations the dispatch
//! loop can invoke.
//!
//! Adapters never return errors to the loop: every failure (missing
//! credentials, network trouble, bad input) is converted into a plain
//! result string and handed back as an observation, so the model can
//! read it and decide what to do next. Credentials stay inside the
//! adapters; the core never sees them.

pub mod email;
pub mod job_search;

pub use email::EmailCapability;
pub use job_search::JobSearchCapability;

use jobscout_config::AppConfig;
use jobscout_core::{CapabilityRegistry, RegistryError};

/// Build the standard registry: job search first, email delivery second.
/// Registration order fixes the order capabilities appear in prompts.
pub fn default_registry(config: &AppConfig) -> Result<CapabilityRegistry, RegistryError> {
    let mut registry = CapabilityRegistry::new();
    registry.register(Box::new(JobSearchCapability::new(&config.job_search)))?;
    registry.register(Box::new(EmailCapability::new(&config.email)))?;
    Ok(registry)
}
