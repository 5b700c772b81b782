//! Conversation memory — the durable log of completed exchanges.
//!
//! Memory is an ordered, append-only sequence of turns, oldest first.
//! Order is the logical timestamp: turns are never reordered or
//! deduplicated. The dispatch loop appends exactly two turns (user +
//! agent) when a request completes, and nothing on failure paths, so
//! memory never contains partial exchanges.

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The end user's request
    User,
    /// The agent's final answer
    Agent,
}

/// A single completed turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Agent,
            text: text.into(),
        }
    }
}

/// The ordered, append-only conversation log for one session.
///
/// No eviction or size limit is imposed here; a bound, if desired, is a
/// concern of the surrounding system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. O(1), always succeeds, preserves order.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// The turns in append order, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the ordered turns into the exact text block the reasoning
    /// engine will see. Byte-identical for identical memory contents.
    pub fn as_prompt_context(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            let label = match turn.role {
                TurnRole::User => "User",
                TurnRole::Agent => "Agent",
            };
            out.push_str(label);
            out.push_str(": ");
            out.push_str(&turn.text);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut memory = ConversationMemory::new();
        memory.append(ConversationTurn::user("first"));
        memory.append(ConversationTurn::agent("second"));
        memory.append(ConversationTurn::user("third"));

        let texts: Vec<&str> = memory.turns().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn render_is_deterministic() {
        let mut memory = ConversationMemory::new();
        memory.append(ConversationTurn::user("Find AI engineer jobs in Austin"));
        memory.append(ConversationTurn::agent("I found 3 postings."));

        let first = memory.as_prompt_context();
        let second = memory.as_prompt_context();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "User: Find AI engineer jobs in Austin\nAgent: I found 3 postings.\n"
        );
    }

    #[test]
    fn empty_memory_renders_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.as_prompt_context(), "");
    }

    #[test]
    fn turn_serialization() {
        let turn = ConversationTurn::user("hello");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"user\""));
        assert!(json.contains("hello"));
    }
}
