//! The flight-desk operations.
//!
//! Six operations give the planner its reach into the backend: Login,
//! AddFlight, QueryFlight, BuyTicket, CheckIn and PassengerList. Each one
//! parses its free-text argument, calls the backend with the session's
//! token and answers with text, whatever happened.

pub mod add_flight;
pub mod args;
pub mod buy_ticket;
pub mod check_in;
pub mod login;
pub mod passenger_list;
pub mod query_flight;

#[cfg(test)]
pub(crate) mod test_support;

use flightdesk_backend::{BackendClient, BackendError, BackendResponse};
use flightdesk_core::{OperationRegistry, OperationResult};
use std::sync::Arc;
use tracing::{debug, warn};

pub use add_flight::AddFlightOperation;
pub use args::{ArgumentError, ArgumentSchema, ParsedArgs};
pub use buy_ticket::BuyTicketOperation;
pub use check_in::CheckInOperation;
pub use login::LoginOperation;
pub use passenger_list::PassengerListOperation;
pub use query_flight::QueryFlightOperation;

/// Create the registry with all six operations sharing one backend client.
pub fn default_registry(backend: Arc<BackendClient>) -> OperationRegistry {
    let mut registry = OperationRegistry::new();
    registry.register(Box::new(LoginOperation::new(backend.clone())));
    registry.register(Box::new(AddFlightOperation::new(backend.clone())));
    registry.register(Box::new(QueryFlightOperation::new(backend.clone())));
    registry.register(Box::new(BuyTicketOperation::new(backend.clone())));
    registry.register(Box::new(CheckInOperation::new(backend.clone())));
    registry.register(Box::new(PassengerListOperation::new(backend)));
    registry
}

/// Status-blind rendering: the body is the answer, whatever the status.
pub(crate) fn passthrough(
    operation: &str,
    error_prefix: &str,
    result: Result<BackendResponse, BackendError>,
) -> OperationResult {
    match result {
        Ok(response) => {
            debug!(operation, status = response.status, "Operation completed");
            response.body.into()
        }
        Err(e) => {
            warn!(operation, error = %e, "Backend call failed");
            format!("{error_prefix}: {e}").into()
        }
    }
}
