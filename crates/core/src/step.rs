//! Agent steps and the scratchpad — transient state for one request.
//!
//! The scratchpad records each Thought → Action → Observation cycle
//! produced while serving a single user request. It exists only for the
//! duration of that request: once a final answer is produced (or the
//! request fails) the scratchpad is discarded. Only the user request and
//! the final answer are persisted into conversation memory.

use serde::{Deserialize, Serialize};

/// What the reasoning engine decided to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Invoke a named capability with a free-text input.
    Invoke { capability: String, input: String },
    /// Stop and return the final answer.
    Finish { answer: String },
}

/// One parsed reasoning-engine output: a thought plus the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonedStep {
    pub thought: String,
    pub decision: Decision,
}

/// A completed (observed) step recorded in the scratchpad.
///
/// `action`/`action_input` are absent for correction steps, where the
/// observation carries feedback about a grammar violation rather than a
/// capability result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    pub thought: String,
    pub action: Option<String>,
    pub action_input: Option<String>,
    pub observation: Option<String>,
}

impl AgentStep {
    /// A step that invoked a capability (or tried to) and observed a result.
    pub fn acted(
        thought: impl Into<String>,
        action: impl Into<String>,
        action_input: impl Into<String>,
        observation: impl Into<String>,
    ) -> Self {
        Self {
            thought: thought.into(),
            action: Some(action.into()),
            action_input: Some(action_input.into()),
            observation: Some(observation.into()),
        }
    }

    /// A correction step: no action, the observation explains the problem.
    pub fn correction(thought: impl Into<String>, observation: impl Into<String>) -> Self {
        Self {
            thought: thought.into(),
            action: None,
            action_input: None,
            observation: Some(observation.into()),
        }
    }
}

/// The ordered step history for one in-progress request.
///
/// Length is bounded by the configured maximum iteration count; the
/// dispatch loop checks `has_budget()` after each recorded step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scratchpad {
    steps: Vec<AgentStep>,
    max_steps: usize,
}

impl Scratchpad {
    pub fn new(max_steps: usize) -> Self {
        Self {
            steps: Vec::new(),
            max_steps,
        }
    }

    /// Record a completed step.
    pub fn push(&mut self, step: AgentStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[AgentStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Whether another step may still be recorded.
    pub fn has_budget(&self) -> bool {
        self.steps.len() < self.max_steps
    }

    /// How many capability invocations were recorded.
    pub fn invocation_count(&self) -> usize {
        self.steps.iter().filter(|s| s.action.is_some()).count()
    }

    /// Render the scratchpad as the text block fed back to the reasoning
    /// engine. Deterministic for identical contents.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            out.push_str("Thought: ");
            out.push_str(&step.thought);
            out.push('\n');
            if let Some(action) = &step.action {
                out.push_str("Action: ");
                out.push_str(action);
                out.push('\n');
            }
            if let Some(input) = &step.action_input {
                out.push_str("Action Input: ");
                out.push_str(input);
                out.push('\n');
            }
            if let Some(observation) = &step.observation {
                out.push_str("Observation: ");
                out.push_str(observation);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_tracks_step_count() {
        let mut pad = Scratchpad::new(2);
        assert!(pad.has_budget());
        pad.push(AgentStep::acted("t1", "a", "i", "o"));
        assert!(pad.has_budget());
        pad.push(AgentStep::acted("t2", "a", "i", "o"));
        assert!(!pad.has_budget());
        assert_eq!(pad.len(), 2);
    }

    #[test]
    fn render_includes_all_labels() {
        let mut pad = Scratchpad::new(5);
        pad.push(AgentStep::acted(
            "I should search for jobs",
            "get_job_postings",
            "AI engineer jobs in Austin",
            "Title: ML Engineer | Company: Acme",
        ));

        let rendered = pad.render();
        assert!(rendered.contains("Thought: I should search for jobs"));
        assert!(rendered.contains("Action: get_job_postings"));
        assert!(rendered.contains("Action Input: AI engineer jobs in Austin"));
        assert!(rendered.contains("Observation: Title: ML Engineer | Company: Acme"));
    }

    #[test]
    fn correction_step_renders_without_action_lines() {
        let mut pad = Scratchpad::new(5);
        pad.push(AgentStep::correction(
            "(unparseable output)",
            "Your previous response did not follow the required format.",
        ));

        let rendered = pad.render();
        assert!(rendered.contains("Observation: Your previous response"));
        assert!(!rendered.contains("Action:"));
        assert!(!rendered.contains("Action Input:"));
    }

    #[test]
    fn invocation_count_ignores_corrections() {
        let mut pad = Scratchpad::new(5);
        pad.push(AgentStep::acted("t", "a", "i", "o"));
        pad.push(AgentStep::correction("t", "o"));
        assert_eq!(pad.invocation_count(), 1);
    }

    #[test]
    fn render_is_deterministic() {
        let mut pad = Scratchpad::new(3);
        pad.push(AgentStep::acted("t", "a", "i", "o"));
        assert_eq!(pad.render(), pad.render());
    }
}
