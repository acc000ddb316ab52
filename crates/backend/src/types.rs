//! Wire payloads for the backend. All bodies are camelCase JSON.

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightAddRequest {
    pub flight_number: String,
    pub airport_from: String,
    pub airport_to: String,
    pub date_from: String,
    pub date_to: String,
    pub duration: i64,
    pub capacity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQueryRequest {
    pub airport_from: String,
    pub airport_to: String,
    pub date_from: String,
    pub date_to: String,
    pub number_of_people: i64,
    pub one_way: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPurchaseRequest {
    pub flight_number: String,
    pub date: String,
    pub passenger_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub flight_number: String,
    pub date: String,
    pub passenger_name: String,
}

/// Sent as query string, not as a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerListQuery {
    pub flight_number: String,
    pub date: String,
    pub page: u32,
    pub size: u32,
}

impl PassengerListQuery {
    /// First page of ten.
    pub fn first_page(flight_number: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            flight_number: flight_number.into(),
            date: date.into(),
            page: 0,
            size: 10,
        }
    }
}
