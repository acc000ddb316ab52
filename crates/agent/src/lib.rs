//! The planner loop, the heart of FlightDesk.
//!
//! One user message drives a **Thought → Action → Observation** cycle:
//!
//! 1. **Ask** the planner for the next action, given the goal, the
//!    operation descriptors and the transcript so far
//! 2. **Invoke** the chosen operation with the caller's session
//! 3. **Record** its text as the observation and loop back to step 1
//!
//! The loop ends when the planner finishes or the step bound is reached.

pub mod planner_loop;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use planner_loop::{ITERATION_LIMIT_ANSWER, PlannerLoop, PlannerOutcome};
