//! Planner trait: the abstraction over the reasoning oracle.
//!
//! A planner looks at the user's goal, the operations on offer and the
//! transcript so far, and decides what happens next: run one operation
//! with a free-text argument, or finish with an answer.
//!
//! Implementations: an OpenAI-compatible ReAct planner, and scripted
//! planners in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::operation::OperationDescriptor;

/// The planner's decision for the next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannedAction {
    /// Run `operation` with `argument`.
    Invoke {
        thought: String,
        operation: String,
        argument: String,
    },
    /// Stop and answer the user.
    Finish { thought: String, answer: String },
}

/// One entry of the reasoning transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerStep {
    /// The planner's reasoning for this step (may be empty).
    #[serde(default)]
    pub thought: String,

    /// Operation the planner chose, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// Raw argument text handed to the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,

    /// Text the operation returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    /// Whether this step ended the loop.
    #[serde(default)]
    pub is_final: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl PlannerStep {
    /// An action step with its observation.
    pub fn action(
        thought: impl Into<String>,
        operation: impl Into<String>,
        argument: impl Into<String>,
        observation: impl Into<String>,
    ) -> Self {
        Self {
            thought: thought.into(),
            operation: Some(operation.into()),
            argument: Some(argument.into()),
            observation: Some(observation.into()),
            is_final: false,
            final_answer: None,
            timestamp: Utc::now(),
        }
    }

    /// The terminal step.
    pub fn finish(thought: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            thought: thought.into(),
            operation: None,
            argument: None,
            observation: None,
            is_final: true,
            final_answer: Some(answer.into()),
            timestamp: Utc::now(),
        }
    }
}

/// The core Planner trait.
#[async_trait]
pub trait Planner: Send + Sync {
    /// Planner name for logs (e.g. "openai", "scripted").
    fn name(&self) -> &str;

    /// Decide the next action.
    ///
    /// `transcript` holds every completed action step of this request, in
    /// order. Errors are fatal to the request.
    async fn plan_next(
        &self,
        goal: &str,
        operations: &[OperationDescriptor],
        transcript: &[PlannerStep],
    ) -> Result<PlannedAction, PlannerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_step_fields() {
        let step = PlannerStep::action("need flights", "QueryFlight", "a, b", "[]");
        assert_eq!(step.operation.as_deref(), Some("QueryFlight"));
        assert_eq!(step.observation.as_deref(), Some("[]"));
        assert!(!step.is_final);
        assert!(step.final_answer.is_none());
    }

    #[test]
    fn finish_step_fields() {
        let step = PlannerStep::finish("done", "Booked.");
        assert!(step.is_final);
        assert_eq!(step.final_answer.as_deref(), Some("Booked."));
        assert!(step.operation.is_none());
    }

    #[test]
    fn planned_action_serializes_tagged() {
        let action = PlannedAction::Finish {
            thought: String::new(),
            answer: "ok".into(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "finish");
        assert_eq!(json["answer"], "ok");
    }
}
