//! AddFlight: registers a new flight.
//!
//! Input: `flightNumber, airportFrom, airportTo, dateFrom, dateTo, duration, capacity`.

use async_trait::async_trait;
use flightdesk_backend::{BackendClient, FlightAddRequest};
use flightdesk_core::{FieldSpec, Operation, OperationResult, Session};
use std::sync::Arc;

use crate::args::{ArgumentError, ArgumentSchema};
use crate::passthrough;

const ERROR_PREFIX: &str = "Add flight error";
const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("flightNumber"),
    FieldSpec::text("airportFrom"),
    FieldSpec::text("airportTo"),
    FieldSpec::text("dateFrom"),
    FieldSpec::text("dateTo"),
    FieldSpec::integer("duration"),
    FieldSpec::integer("capacity"),
];
const SCHEMA: ArgumentSchema = ArgumentSchema::new(
    FIELDS,
    "Invalid input format. Expected: flightNumber, airportFrom, airportTo, dateFrom, dateTo, duration, capacity",
);

fn parse_request(argument: &str) -> Result<FlightAddRequest, ArgumentError> {
    let args = SCHEMA.parse(argument)?;
    Ok(FlightAddRequest {
        flight_number: args.text("flightNumber")?,
        airport_from: args.text("airportFrom")?,
        airport_to: args.text("airportTo")?,
        date_from: args.text("dateFrom")?,
        date_to: args.text("dateTo")?,
        duration: args.integer("duration")?,
        capacity: args.integer("capacity")?,
    })
}

pub struct AddFlightOperation {
    backend: Arc<BackendClient>,
}

impl AddFlightOperation {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Operation for AddFlightOperation {
    fn name(&self) -> &str {
        "AddFlight"
    }

    fn description(&self) -> &str {
        "Use this to add a flight. Input format: flightNumber, airportFrom, airportTo, dateFrom, \
         dateTo, duration, capacity (e.g., N1, Istanbul, Izmir, 2025-05-18T17:00:00Z, \
         2025-05-18T19:00:00Z, 60, 100)"
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
            self.backend.add_flight(&request, &session.token()).await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubBackend, unreachable_client};

    const VALID: &str =
        "N1, Istanbul, Izmir, 2025-05-18T17:00:00Z, 2025-05-18T19:00:00Z, 60, 100";

    #[test]
    fn parses_all_seven_fields() {
        let req = parse_request(VALID).unwrap();
        assert_eq!(req.flight_number, "N1");
        assert_eq!(req.airport_to, "Izmir");
        assert_eq!(req.duration, 60);
        assert_eq!(req.capacity, 100);
    }

    #[tokio::test]
    async fn forwards_payload_and_returns_raw_body() {
        let stub = StubBackend::start().await;
        let op = AddFlightOperation::new(stub.client());
        let session = Session::with_token("jwt-1");

        let result = op.invoke(&session, VALID).await;

        assert_eq!(result.text, r#"{"message":"Flight added successfully"}"#);
        let req = stub.last();
        assert_eq!(req.path, "/flights/add");
        assert_eq!(req.authorization.as_deref(), Some("Bearer jwt-1"));
        assert_eq!(req.content_type.as_deref(), Some("application/json"));
        assert_eq!(req.json()["duration"], 60);
        assert_eq!(req.json()["flightNumber"], "N1");
    }

    #[tokio::test]
    async fn large_capacity_is_sent_unchanged() {
        let stub = StubBackend::start().await;
        let op = AddFlightOperation::new(stub.client());

        op.invoke(
            &Session::with_token("jwt-1"),
            "N1, Istanbul, Izmir, 2025-05-18T17:00:00Z, 2025-05-18T19:00:00Z, 60, 3000000000",
        )
        .await;

        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.last().json()["capacity"], 3_000_000_000_i64);
    }

    #[tokio::test]
    async fn six_fields_is_usage_and_no_call() {
        let stub = StubBackend::start().await;
        let op = AddFlightOperation::new(stub.client());

        let result = op
            .invoke(&Session::new(), "N1, Istanbul, Izmir, 2025-05-18, 2025-05-18, 60")
            .await;

        assert_eq!(result.text, SCHEMA.usage);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn non_numeric_duration_is_error_and_no_call() {
        let stub = StubBackend::start().await;
        let op = AddFlightOperation::new(stub.client());

        let result = op
            .invoke(
                &Session::new(),
                "N1, Istanbul, Izmir, 2025-05-18, 2025-05-18, an hour, 100",
            )
            .await;

        assert!(result.text.starts_with("Add flight error: "));
        assert!(result.text.contains("duration"));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn transport_fault_is_rendered() {
        let op = AddFlightOperation::new(unreachable_client());
        let result = op.invoke(&Session::new(), VALID).await;
        assert!(result.text.starts_with("Add flight error: "));
    }
}
