//! Shared test helpers for planner loop tests.

use async_trait::async_trait;
use flightdesk_core::{
    FieldSpec, Operation, OperationDescriptor, OperationRegistry, OperationResult, PlannedAction,
    Planner, PlannerError, PlannerStep, Session,
};
use std::sync::Mutex;

/// A planner that replays a fixed script of actions.
///
/// Panics if called more often than the script allows, unless built with
/// [`ScriptedPlanner::repeating`].
pub struct ScriptedPlanner {
    script: Vec<Result<PlannedAction, PlannerError>>,
    repeat: bool,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedPlanner {
    pub fn new(actions: Vec<PlannedAction>) -> Self {
        Self::with_results(actions.into_iter().map(Ok).collect())
    }

    pub fn with_results(script: Vec<Result<PlannedAction, PlannerError>>) -> Self {
        Self {
            script,
            repeat: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the same action forever.
    pub fn repeating(action: PlannedAction) -> Self {
        Self {
            script: vec![Ok(action)],
            repeat: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn seen_goals(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(g, _)| g.clone()).collect()
    }

    pub fn seen_transcript_lengths(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(|(_, n)| *n).collect()
    }
}

#[async_trait]
impl Planner for ScriptedPlanner {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn plan_next(
        &self,
        goal: &str,
        _operations: &[OperationDescriptor],
        transcript: &[PlannerStep],
    ) -> Result<PlannedAction, PlannerError> {
        let mut calls = self.calls.lock().unwrap();
        let idx = if self.repeat { 0 } else { calls.len() };
        calls.push((goal.to_string(), transcript.len()));

        match self.script.get(idx) {
            Some(step) => step.clone(),
            None => panic!(
                "ScriptedPlanner: no more actions (call #{}, have {})",
                idx,
                self.script.len()
            ),
        }
    }
}

pub fn invoke(operation: &str, argument: &str) -> PlannedAction {
    PlannedAction::Invoke {
        thought: format!("use {operation}"),
        operation: operation.into(),
        argument: argument.into(),
    }
}

pub fn finish(answer: &str) -> PlannedAction {
    PlannedAction::Finish {
        thought: "I now know the final answer".into(),
        answer: answer.into(),
    }
}

/// `Echo` answers with its argument; `Remember` stores it as the token.
pub fn echo_registry() -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    registry.register(Box::new(EchoOperation));
    registry.register(Box::new(RememberOperation));
    registry
}

const FIELDS: &[FieldSpec] = &[FieldSpec::text("text")];

struct EchoOperation;

#[async_trait]
impl Operation for EchoOperation {
    fn name(&self) -> &str {
        "Echo"
    }
    fn description(&self) -> &str {
        "Echoes its input."
    }
    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }
    async fn invoke(&self, _session: &Session, argument: &str) -> OperationResult {
        format!("echo: {argument}").into()
    }
}

struct RememberOperation;

#[async_trait]
impl Operation for RememberOperation {
    fn name(&self) -> &str {
        "Remember"
    }
    fn description(&self) -> &str {
        "Stores its input as the session token."
    }
    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }
    async fn invoke(&self, session: &Session, argument: &str) -> OperationResult {
        session.set_token(argument);
        "stored".into()
    }
}
