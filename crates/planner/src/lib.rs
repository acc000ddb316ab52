//! Planning oracles for FlightDesk.
//!
//! All planners implement the `flightdesk_core::Planner` trait. The
//! bundled one drives an OpenAI-compatible chat model with a zero-shot
//! ReAct text prompt and parses its reply into the next action.

pub mod openai_compat;
pub mod parser;
pub mod prompt;

pub use openai_compat::ChatReactPlanner;
pub use parser::parse_reply;
pub use prompt::{FINAL_ANSWER_MARKER, OBSERVATION_STOP, render_prompt};
