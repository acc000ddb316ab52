//! BuyTicket: buys a ticket for one passenger.
//!
//! Input: `flightNumber, date, passengerName`. The backend takes a list of
//! names; this operation always sends exactly one.

use async_trait::async_trait;
use flightdesk_backend::{BackendClient, TicketPurchaseRequest};
use flightdesk_core::{FieldSpec, Operation, OperationResult, Session};
use std::sync::Arc;

use crate::args::{ArgumentError, ArgumentSchema};
use crate::passthrough;

const ERROR_PREFIX: &str = "Ticket buying error";
const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("flightNumber"),
    FieldSpec::text("date"),
    FieldSpec::text("passengerName"),
];
const SCHEMA: ArgumentSchema = ArgumentSchema::new(
    FIELDS,
    "Invalid input. Format: flightNumber, date, passengerName",
);

fn parse_request(argument: &str) -> Result<TicketPurchaseRequest, ArgumentError> {
    let args = SCHEMA.parse(argument)?;
    Ok(TicketPurchaseRequest {
        flight_number: args.text("flightNumber")?,
        date: args.text("date")?,
        passenger_names: vec![args.text("passengerName")?],
    })
}

pub struct BuyTicketOperation {
    backend: Arc<BackendClient>,
}

impl BuyTicketOperation {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Operation for BuyTicketOperation {
    fn name(&self) -> &str {
        "BuyTicket"
    }

    fn description(&self) -> &str {
        "Use this to buy a ticket. Input format: flightNumber, date, passengerName \
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
            self.backend.buy_ticket(&request, &session.token()).await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubBackend, unreachable_client};

    #[tokio::test]
    async fn wraps_single_passenger_in_list() {
        let stub = StubBackend::start().await;
        let op = BuyTicketOperation::new(stub.client());

        let result = op
            .invoke(
                &Session::with_token("jwt"),
                "N5, 2025-05-20T10:00:00Z, Serkan Acar",
            )
            .await;

        assert_eq!(result.text, r#"{"status":"SUCCESS","ticketNumbers":["TCK-1"]}"#);
        let req = stub.last();
        assert_eq!(req.path, "/tickets/buy");
        assert_eq!(
            req.json(),
            serde_json::json!({
                "flightNumber": "N5",
                "date": "2025-05-20T10:00:00Z",
                "passengerNames": ["Serkan Acar"]
            })
        );
    }

    #[tokio::test]
    async fn before_login_sends_empty_bearer() {
        let stub = StubBackend::start().await;
        let op = BuyTicketOperation::new(stub.client());

        op.invoke(&Session::new(), "N5, 2025-05-20, Serkan Acar").await;

        // HTTP parsers strip trailing whitespace, so `Bearer ` arrives as `Bearer`.
        let auth = stub.last().authorization.unwrap_or_default();
        assert_eq!(auth.trim_end(), "Bearer");
    }

    #[tokio::test]
    async fn two_fields_is_usage() {
        let stub = StubBackend::start().await;
        let op = BuyTicketOperation::new(stub.client());

        let result = op.invoke(&Session::new(), "N5, 2025-05-20").await;

        assert_eq!(result.text, "Invalid input. Format: flightNumber, date, passengerName");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn transport_fault_is_rendered() {
        let op = BuyTicketOperation::new(unreachable_client());
        let result = op.invoke(&Session::new(), "N5, 2025-05-20, Serkan Acar").await;
        assert!(result.text.starts_with("Ticket buying error: "));
    }
}
