//! Prompt assembly for the reasoning engine.
//!
//! The prompt is a single text block: task framing, the ordered
//! capability descriptions, the rendered conversation memory, the user
//! request, and the rendered scratchpad. Assembly is deterministic —
//! identical inputs produce byte-identical prompts — so that repeated
//! identical contexts tend to produce identical decisions under
//! zero-temperature decoding.

use jobscout_core::step::Scratchpad;

/// Builds reasoning prompts from a fixed capability list.
///
/// The capability (name, description) pairs are captured once at
/// construction, in registration order, and never change afterwards.
pub struct PromptBuilder {
    capabilities: Vec<(String, String)>,
}

impl PromptBuilder {
    pub fn new(capabilities: Vec<(String, String)>) -> Self {
        Self { capabilities }
    }

    /// Render the full prompt for one reasoning call.
    pub fn build(
        &self,
        user_request: &str,
        memory_context: &str,
        scratchpad: &Scratchpad,
    ) -> String {
        let names: Vec<&str> = self.capabilities.iter().map(|(n, _)| n.as_str()).collect();

        let mut out = String::new();
        out.push_str(
            "You are an assistant that helps the user find job postings and deliver them by email. \
             Answer the user's request as best you can.\n\n",
        );

        out.push_str("You have access to the following capabilities:\n\n");
        for (name, description) in &self.capabilities {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(description);
            out.push('\n');
        }

        out.push_str("\nUse the following format:\n\n");
        out.push_str("Thought: reason about what to do next\n");
        out.push_str(&format!(
            "Action: the capability to use, one of [{}]\n",
            names.join(", ")
        ));
        out.push_str("Action Input: the input to the capability\n");
        out.push_str("Observation: the result of the capability\n");
        out.push_str("... (Thought/Action/Action Input/Observation can repeat)\n");
        out.push_str("Thought: I now know the final answer\n");
        out.push_str("Final Answer: the answer to the user's request\n");

        if !memory_context.is_empty() {
            out.push_str("\nPrevious conversation:\n");
            out.push_str(memory_context);
        }

        out.push_str("\nBegin!\n\n");
        out.push_str("Question: ");
        out.push_str(user_request);
        out.push('\n');

        let pad = scratchpad.render();
        if !pad.is_empty() {
            out.push_str(&pad);
        }

        out
    }
}
