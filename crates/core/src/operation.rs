//! Operation trait: the abstraction over typed backend actions.
//!
//! Operations are what the planner can dispatch: log in, add a flight,
//! query flights, buy a ticket, check in, list passengers. Each takes a
//! single free-text argument and always answers with text.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::OperationError;
use crate::session::Session;

/// Type of a single argument field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text, passed through trimmed.
    Text,
    /// Signed integer.
    Integer,
    /// Boolean, `true` iff the text is `"true"` in any case.
    Flag,
}

/// One named, typed field of an operation's argument schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }

    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Flag,
        }
    }
}

/// The text result of one invocation.
///
/// Carries either the backend's raw body or a human-readable error. The
/// planner loop cannot tell which, and must not try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub text: String,
}

impl OperationResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<String> for OperationResult {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for OperationResult {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for OperationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// What the planner sees of an operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldSpec>,
}

/// The core Operation trait.
///
/// Implementations must never fail past their own boundary: argument,
/// backend and transport problems all come back as [`OperationResult`]
/// text so the loop can treat every operation the same way.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Unique name the planner refers to (e.g. "Login", "BuyTicket").
    fn name(&self) -> &str;

    /// Natural-language description used by the planner to pick it.
    fn description(&self) -> &str;

    /// Ordered argument fields.
    fn fields(&self) -> &[FieldSpec];

    /// Run the operation against the given session.
    async fn invoke(&self, session: &Session, argument: &str) -> OperationResult;

    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            fields: self.fields().to_vec(),
        }
    }
}

/// A registry of available operations.
///
/// Registration order is kept, so the planner always sees operations in
/// the same order.
pub struct OperationRegistry {
    operations: Vec<Box<dyn Operation>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Register an operation. Replaces any existing one with the same name
    /// in place.
    pub fn register(&mut self, operation: Box<dyn Operation>) {
        match self
            .operations
            .iter()
            .position(|o| o.name() == operation.name())
        {
            Some(idx) => self.operations[idx] = operation,
            None => self.operations.push(operation),
        }
    }

    /// Get an operation by name.
    pub fn get(&self, name: &str) -> Option<&dyn Operation> {
        self.operations
            .iter()
            .find(|o| o.name() == name)
            .map(|o| o.as_ref())
    }

    /// Descriptors for the planner.
    pub fn descriptors(&self) -> Vec<OperationDescriptor> {
        self.operations.iter().map(|o| o.descriptor()).collect()
    }

    /// Invoke an operation by name.
    pub async fn invoke(
        &self,
        name: &str,
        session: &Session,
        argument: &str,
    ) -> std::result::Result<OperationResult, OperationError> {
        let operation = self
            .get(name)
            .ok_or_else(|| OperationError::NotFound(name.to_string()))?;
        Ok(operation.invoke(session, argument).await)
    }

    /// All registered operation names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.operations.iter().map(|o| o.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
