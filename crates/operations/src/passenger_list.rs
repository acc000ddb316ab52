//! PassengerList: first page of passengers on a flight.
//!
//! Input: `flightNumber, date`.

use async_trait::async_trait;
use flightdesk_backend::{BackendClient, PassengerListQuery};
use flightdesk_core::{FieldSpec, Operation, OperationResult, Session};
use std::sync::Arc;

use crate::args::{ArgumentError, ArgumentSchema};
use crate::passthrough;

const ERROR_PREFIX: &str = "Passenger list query error";
const FIELDS: &[FieldSpec] = &[FieldSpec::text("flightNumber"), FieldSpec::text("date")];
const SCHEMA: ArgumentSchema =
    ArgumentSchema::new(FIELDS, "Invalid input. Format: flightNumber, date");

fn parse_query(argument: &str) -> Result<PassengerListQuery, ArgumentError> {
    let args = SCHEMA.parse(argument)?;
    Ok(PassengerListQuery::first_page(
        args.text("flightNumber")?,
        args.text("date")?,
    ))
}

pub struct PassengerListOperation {
    backend: Arc<BackendClient>,
}

impl PassengerListOperation {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Operation for PassengerListOperation {
    fn name(&self) -> &str {
        "PassengerList"
    }

    fn description(&self) -> &str {
        "Use this to get the passenger list for a flight. Input format: flightNumber, date \
         (e.g., N5, 2025-05-20T10:00:00Z)"
    }

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    async fn invoke(&self, session: &Session, argument: &str) -> OperationResult {
        let query = match parse_query(argument) {
            Ok(q) => q,
            Err(e) => return e.render(ERROR_PREFIX).into(),
        };

        passthrough(
            self.name(),
            ERROR_PREFIX,
            self.backend.list_passengers(&query, &session.token()).await,
        )
    }
}
