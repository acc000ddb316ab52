//! Zero-shot ReAct prompt rendering.
//!
//! The prompt lists every operation as `Name: description`, states the
//! Thought / Action / Action Input / Observation format, and replays the
//! steps taken so far as a scratchpad ending in `Thought:`.

use flightdesk_core::{OperationDescriptor, PlannerStep};
use std::fmt::Write;

/// Stop sequence sent with every request so the model halts before
/// inventing an observation.
pub const OBSERVATION_STOP: &str = "\nObservation:";

pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";

const PREFIX: &str =
    "Answer the following questions as best you can. You have access to the following tools:";

/// Render the full prompt for one planning step.
pub fn render_prompt(
    goal: &str,
    operations: &[OperationDescriptor],
    transcript: &[PlannerStep],
) -> String {
    let mut out = String::new();
    out.push_str(PREFIX);
    out.push_str("\n\n");

    for op in operations {
        let _ = writeln!(out, "{}: {}", op.name, op.description);
    }

    let names: Vec<&str> = operations.iter().map(|o| o.name.as_str()).collect();
    let _ = write!(
        out,
        "\nUse the following format:\n\n\
         Question: the input question you must answer\n\
         Thought: you should always think about what to do\n\
         Action: the action to take, should be one of [{}]\n\
         Action Input: the input to the action\n\
         Observation: the result of the action\n\
         ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
         Thought: I now know the final answer\n\
         {FINAL_ANSWER_MARKER} the final answer to the original input question\n\n\
         Begin!\n\n\
         Question: {}\n\
         Thought:",
        names.join(", "),
        goal
    );

    out.push_str(&render_scratchpad(transcript));
    out
}

/// Replay prior steps in the format the model is asked to produce.
pub fn render_scratchpad(transcript: &[PlannerStep]) -> String {
    let mut out = String::new();
    for step in transcript.iter().filter(|s| !s.is_final) {
        let (Some(operation), Some(argument)) = (&step.operation, &step.argument) else {
            continue;
        };
        if !step.thought.is_empty() {
            let _ = write!(out, " {}", step.thought);
        }
        let _ = write!(
            out,
            "\nAction: {operation}\nAction Input: {argument}\nObservation: {}\nThought:",
            step.observation.as_deref().unwrap_or_default()
        );
    }
    out
}
