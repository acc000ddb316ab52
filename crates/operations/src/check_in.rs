//! CheckIn: checks a passenger in to a flight.
//!
//! Input: `flightNumber, date, passengerName`.

use async_trait::async_trait;
use flightdesk_backend::{BackendClient, CheckInRequest};
use flightdesk_core::{FieldSpec, Operation, OperationResult, Session};
use std::sync::Arc;

use crate::args::{ArgumentError, ArgumentSchema};
use crate::passthrough;

const ERROR_PREFIX: &str = "Check-in error";
const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("flightNumber"),
    FieldSpec::text("date"),
    FieldSpec::text("passengerName"),
];
const SCHEMA: ArgumentSchema = ArgumentSchema::new(
    FIELDS,
    "Invalid input. Format: flightNumber, date, passengerName",
);

fn parse_request(argument: &str) -> Result<CheckInRequest, ArgumentError> {
    let args = SCHEMA.parse(argument)?;
    Ok(CheckInRequest {
        flight_number: args.text("flightNumber")?,
        date: args.text("date")?,
        passenger_name: args.text("passengerName")?,
    })
}

pub struct CheckInOperation {
    backend: Arc<BackendClient>,
}

impl CheckInOperation {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Operation for CheckInOperation {
    fn name(&self) -> &str {
        "CheckIn"
    }

    fn description(&self) -> &str {
        "Use this to check in to a flight. Input format: flightNumber, date, passengerName \
         (e.g., N5, 2025-05-20T10:00:00Z, Serkan Acar)"
    }

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    async fn invoke(&self, session: &Session, argument: &str) -> OperationResult {
        let request = match parse_request(argument) {
            Ok(r) => r,
            Err(e) => return e.render(ERROR_PREFIX).into(),
        };

        passthrough(
            self.name(),
            ERROR_PREFIX,
            self.backend.check_in(&request, &session.token()).await,
        )
    }
}
