//! Decision grammar parser.
//!
//! The wire format between the core and the language model is a plain
//! text block with labeled lines:
//!
//! ```text
//! Thought: <reasoning>
//! Action: <capability-name>
//! Action Input: <string>
//! ```
//!
//! or
//!
//! ```text
//! Thought: <reasoning>
//! Final Answer: <string>
//! ```
//!
//! Parsing is strict line scanning, not best-effort string scraping:
//! the first non-empty line must carry the `Thought:` label, and the
//! first label encountered afterwards (`Action:` or `Final Answer:`)
//! selects the branch. Anything non-conforming is a
//! [`EngineError::MalformedDecision`] carrying the raw completion so
//! failures are inspectable and testable.

use jobscout_core::error::EngineError;
use jobscout_core::step::{Decision, ReasonedStep};

const THOUGHT: &str = "Thought:";
const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";
const FINAL_ANSWER: &str = "Final Answer:";
const OBSERVATION: &str = "Observation:";

/// Parse one completion into a reasoned step.
pub fn parse(completion: &str) -> Result<ReasonedStep, EngineError> {
    let malformed = |reason: &str| EngineError::MalformedDecision {
        reason: reason.to_string(),
        raw: completion.to_string(),
    };

    let mut lines = completion.lines().peekable();

    // Skip leading blank lines, then require the Thought: label.
    while matches!(lines.peek(), Some(l) if l.trim().is_empty()) {
        lines.next();
    }
    let first = lines.next().ok_or_else(|| malformed("empty completion"))?;
    let first = first.trim_start();
    if !first.starts_with(THOUGHT) {
        return Err(malformed("missing Thought: line"));
    }

    // Thought text runs until the next label line.
    let mut thought_lines = vec![first[THOUGHT.len()..].trim().to_string()];
    let mut branch_line: Option<String> = None;
    for line in lines.by_ref() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(ACTION_INPUT) {
            return Err(malformed("Action Input: before Action:"));
        }
        if trimmed.starts_with(ACTION) || trimmed.starts_with(FINAL_ANSWER) {
            branch_line = Some(trimmed.to_string());
            break;
        }
        thought_lines.push(trimmed.to_string());
    }
    let thought = thought_lines.join("\n").trim().to_string();

    let branch = branch_line
        .ok_or_else(|| malformed("missing both Action: and Final Answer: after Thought:"))?;

    if let Some(rest) = branch.strip_prefix(FINAL_ANSWER) {
        // Everything after the label, including later lines, is the answer.
        let mut answer = rest.trim().to_string();
        for line in lines {
            answer.push('\n');
            answer.push_str(line.trim_end());
        }
        let answer = answer.trim().to_string();
        if answer.is_empty() {
            return Err(malformed("empty final answer"));
        }
        return Ok(ReasonedStep {
            thought,
            decision: Decision::Finish { answer },
        });
    }

    // Action branch.
    let capability = branch
        .strip_prefix(ACTION)
        .unwrap_or_default()
        .trim()
        .to_string();
    if capability.is_empty() {
        return Err(malformed("empty action name"));
    }

    // Skip blank lines, then require the Action Input: label.
    let mut input_line: Option<String> = None;
    for line in lines.by_ref() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(ACTION_INPUT) {
            input_line = Some(trimmed[ACTION_INPUT.len()..].trim().to_string());
        }
        break;
    }
    let mut input = match input_line {
        Some(i) => i,
        None => return Err(malformed("Action: without Action Input:")),
    };

    // Input may span lines; it ends at an Observation: line (normally cut
    // off by the stop sequence) or the end of the completion. A stray
    // Final Answer: here means the model tried to do both at once.
    for line in lines {
        let trimmed = line.trim_start();
        if trimmed.starts_with(OBSERVATION) {
            break;
        }
        if trimmed.starts_with(FINAL_ANSWER) {
            return Err(malformed("ambiguous decision: both Action: and Final Answer:"));
        }
        input.push('\n');
        input.push_str(line.trim_end());
    }
    let input = input.trim().to_string();

    Ok(ReasonedStep {
        thought,
        decision: Decision::Invoke { capability, input },
    })
}

/// Strip surrounding double quotes, which some models add around inputs.
pub fn unquote(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
