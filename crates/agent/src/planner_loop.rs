//! The bounded Thought → Action → Observation loop.
//!
//! Each iteration asks the planner for one action. An `Invoke` runs the
//! named operation against the caller's session and records its text as
//! the observation; a `Finish` ends the loop with the planner's answer.
//! An unknown operation name is not an error: the loop tells the planner
//! which names exist and carries on.

use flightdesk_core::{
    Error, OperationError, OperationRegistry, PlannedAction, Planner, PlannerStep, Session,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answer returned when the step bound is reached before a final answer.
pub const ITERATION_LIMIT_ANSWER: &str = "Agent stopped due to iteration limit or time limit.";

const DEFAULT_MAX_STEPS: u32 = 15;

pub struct PlannerLoop {
    planner: Arc<dyn Planner>,
    registry: Arc<OperationRegistry>,
    max_steps: u32,
}

/// The result of one request.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerOutcome {
    /// The final answer text.
    pub answer: String,
    /// Every step in order, including the final one when there is one.
    pub steps: Vec<PlannerStep>,
    /// Planner calls made.
    pub iterations: u32,
    /// Action steps taken, unknown names included.
    pub operations_invoked: usize,
    pub stopped_at_limit: bool,
}

impl PlannerLoop {
    pub fn new(planner: Arc<dyn Planner>, registry: Arc<OperationRegistry>) -> Self {
        Self {
            planner,
            registry,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Set the step bound. Values below 1 are raised to 1.
    pub fn with_max_steps(mut self, max: u32) -> Self {
        self.max_steps = max.max(1);
        self
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Run the loop for one user message.
    ///
    /// Operations see `session` and nothing else; a Login inside the loop
    /// is visible to every later operation of this and future requests
    /// sharing the same session. Only planner faults are returned as errors.
    pub async fn run(&self, message: &str, session: &Session) -> Result<PlannerOutcome, Error> {
        let descriptors = self.registry.descriptors();
        let mut steps: Vec<PlannerStep> = Vec::new();
        let mut iterations = 0u32;

        info!(
            planner = self.planner.name(),
            max_steps = self.max_steps,
            "Planner loop starting"
        );

        while iterations < self.max_steps {
            iterations += 1;
            debug!(iteration = iterations, "Planner iteration");

            let action = self
                .planner
                .plan_next(message, &descriptors, &steps)
                .await
                .inspect_err(|e| warn!(iteration = iterations, error = %e, "Planner failed"))?;

            match action {
                PlannedAction::Finish { thought, answer } => {
                    steps.push(PlannerStep::finish(thought, answer.clone()));
                    let operations_invoked = steps.len() - 1;
                    info!(iterations, operations_invoked, "Planner loop completed");
                    return Ok(PlannerOutcome {
                        answer,
                        steps,
                        iterations,
                        operations_invoked,
                        stopped_at_limit: false,
                    });
                }
                PlannedAction::Invoke {
                    thought,
                    operation,
                    argument,
                } => {
                    let observation = self.observe(&operation, &argument, session).await;
                    steps.push(PlannerStep::action(thought, operation, argument, observation));
                }
            }
        }

        warn!(max_steps = self.max_steps, "Planner loop hit the step bound");
        let operations_invoked = steps.len();
        Ok(PlannerOutcome {
            answer: ITERATION_LIMIT_ANSWER.to_string(),
            steps,
            iterations,
            operations_invoked,
            stopped_at_limit: true,
        })
    }

    async fn observe(&self, operation: &str, argument: &str, session: &Session) -> String {
        match self.registry.invoke(operation, session, argument).await {
            Ok(result) => {
                debug!(operation, observation = %result.text, "Observation");
                result.text
            }
            Err(OperationError::NotFound(name)) => {
                warn!(operation = %name, "Planner chose an unknown operation");
                format!(
                    "{name} is not a valid tool, try one of [{}].",
                    self.registry.names().join(", ")
                )
            }
        }
    }
}
