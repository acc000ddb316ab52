//! Client for the flight-operations REST backend.
//!
//! One method per backend resource (auth, flights, tickets). Responses
//! come back as raw status + body; non-2xx statuses are not errors here.
//! Only transport faults surface as [`BackendError`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{BackendClient, BackendResponse, LoginOutcome, Page};
pub use error::BackendError;
pub use types::{
    CheckInRequest, FlightAddRequest, FlightQueryRequest, LoginRequest, LoginResponse,
    PassengerListQuery, TicketPurchaseRequest,
};
