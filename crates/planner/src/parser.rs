//! Parse a model reply into the next planned action.

use flightdesk_core::{PlannedAction, PlannerError};
use regex_lite::Regex;
use std::sync::LazyLock;

use crate::prompt::FINAL_ANSWER_MARKER;

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .expect("valid action pattern")
});

/// Turn the raw completion text into a `PlannedAction`.
///
/// A `Final Answer:` finishes only when no parseable action precedes it.
/// An action followed by a final answer is malformed.
pub fn parse_reply(text: &str) -> Result<PlannedAction, PlannerError> {
    let action = ACTION_RE.captures(text);

    if let Some(idx) = text.find(FINAL_ANSWER_MARKER) {
        let action_first = action
            .as_ref()
            .and_then(|c| c.get(0))
            .is_some_and(|m| m.start() < idx);
        if action_first {
            return Err(PlannerError::MalformedOutput(text.trim().to_string()));
        }
        return Ok(PlannedAction::Finish {
            thought: thought_before(&text[..idx]),
            answer: text[idx + FINAL_ANSWER_MARKER.len()..].trim().to_string(),
        });
    }

    let Some(caps) = action else {
        return Err(PlannerError::MalformedOutput(text.trim().to_string()));
    };
    let whole = caps.get(0).map_or(0, |m| m.start());
    let operation = caps.get(1).map_or("", |m| m.as_str()).trim();
    let mut argument = caps.get(2).map_or("", |m| m.as_str());

    // The model sometimes keeps going past the stop sequence.
    if let Some(cut) = argument.find("\nObservation") {
        argument = &argument[..cut];
    }
    let argument = argument.trim().trim_matches('"').trim();

    if operation.is_empty() {
        return Err(PlannerError::MalformedOutput(text.trim().to_string()));
    }

    Ok(PlannedAction::Invoke {
        thought: thought_before(&text[..whole]),
        operation: operation.to_string(),
        argument: argument.to_string(),
    })
}

fn thought_before(prefix: &str) -> String {
    let prefix = prefix.trim();
    prefix
        .strip_prefix("Thought:")
        .unwrap_or(prefix)
        .trim()
        .to_string()
}
