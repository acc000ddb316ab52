//! The backend HTTP client.
//!
//! Every call except login sends `Authorization: Bearer <token>`, even
//! when the token is still empty. Bodies and statuses come back unchanged;
//! there are no retries.

use flightdesk_config::BackendConfig;
use reqwest::RequestBuilder;
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::types::{
    CheckInRequest, FlightAddRequest, FlightQueryRequest, LoginRequest, LoginResponse,
    PassengerListQuery, TicketPurchaseRequest,
};

/// Raw backend answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of `POST /auth/login`.
#[derive(Clone)]
pub struct LoginOutcome {
    pub status: u16,
    /// Present only on HTTP 200.
    pub token: Option<String>,
    pub body: String,
}

impl std::fmt::Debug for LoginOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginOutcome")
            .field("status", &self.status)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Pagination for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

/// Client for the flight-operations REST API.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a client with the transport's default timeout policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Self::build(base_url.into(), None)
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::build(
            config.base_url.clone(),
            config.timeout_secs.map(std::time::Duration::from_secs),
        )
    }

    fn build(
        base_url: String,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /auth/login`. A 200 must carry `{"token": ...}`.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, BackendError> {
        let response = self
            .send(
                "auth/login",
                self.client.post(self.url("/auth/login")).json(request),
            )
            .await?;

        if response.status != 200 {
            return Ok(LoginOutcome {
                status: response.status,
                token: None,
                body: response.body,
            });
        }

        let parsed: LoginResponse = serde_json::from_str(&response.body)
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(LoginOutcome {
            status: response.status,
            token: Some(parsed.token),
            body: response.body,
        })
    }

    /// `POST /flights/add`.
    pub async fn add_flight(
        &self,
        payload: &FlightAddRequest,
        token: &str,
    ) -> Result<BackendResponse, BackendError> {
        self.send(
            "flights/add",
            self.client
                .post(self.url("/flights/add"))
                .bearer_auth(token)
                .json(payload),
        )
        .await
    }

    /// `POST /flights/query?page=&size=`.
    pub async fn query_flights(
        &self,
        payload: &FlightQueryRequest,
        token: &str,
        page: Page,
    ) -> Result<BackendResponse, BackendError> {
        self.send(
            "flights/query",
            self.client
                .post(self.url("/flights/query"))
                .query(&[("page", page.page), ("size", page.size)])
                .bearer_auth(token)
                .json(payload),
        )
        .await
    }

    /// `POST /tickets/buy`.
    pub async fn buy_ticket(
        &self,
        payload: &TicketPurchaseRequest,
        token: &str,
    ) -> Result<BackendResponse, BackendError> {
        self.send(
            "tickets/buy",
            self.client
                .post(self.url("/tickets/buy"))
                .bearer_auth(token)
                .json(payload),
        )
        .await
    }

    /// `POST /tickets/check-in`.
    pub async fn check_in(
        &self,
        payload: &CheckInRequest,
        token: &str,
    ) -> Result<BackendResponse, BackendError> {
        self.send(
            "tickets/check-in",
            self.client
                .post(self.url("/tickets/check-in"))
                .bearer_auth(token)
                .json(payload),
        )
        .await
    }

    /// `GET /tickets/passenger-list?flightNumber=&date=&page=&size=`.
    pub async fn list_passengers(
        &self,
        query: &PassengerListQuery,
        token: &str,
    ) -> Result<BackendResponse, BackendError> {
        self.send(
            "tickets/passenger-list",
            self.client
                .get(self.url("/tickets/passenger-list"))
                .query(query)
                .bearer_auth(token),
        )
        .await
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<BackendResponse, BackendError> {
        debug!(endpoint, "Sending backend request");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response = BackendResponse {
            status,
            body: response.text().await?,
        };

        if response.is_success() {
            debug!(endpoint, status, body_len = response.body.len(), "Backend responded");
        } else {
            warn!(endpoint, status, body_len = response.body.len(), "Backend returned non-success status");
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/auth/login"), "http://localhost:5000/auth/login");
    }

    #[test]
    fn from_config_uses_base_url() {
        let config = BackendConfig {
            base_url: "http://gateway.test".into(),
            timeout_secs: Some(5),
        };
        let client = BackendClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://gateway.test");
    }

    #[test]
    fn default_page_is_first_ten() {
        assert_eq!(Page::default(), Page { page: 0, size: 10 });
    }

    #[test]
    fn success_range() {
        let ok = BackendResponse {
            status: 201,
            body: String::new(),
        };
        let bad = BackendResponse {
            status: 409,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Port 1 on loopback is reserved and closed in test environments.
        let client = BackendClient::new("http://127.0.0.1:1").unwrap();
        let err = client
            .buy_ticket(
                &TicketPurchaseRequest {
                    flight_number: "N5".into(),
                    date: "2025-05-20".into(),
                    passenger_names: vec!["Serkan Acar".into()],
                },
                "",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[test]
    fn login_outcome_debug_hides_token() {
        let outcome = LoginOutcome {
            status: 200,
            token: Some("jwt-abc".into()),
            body: r#"{"token":"jwt-abc"}"#.into(),
        };
        let printed = format!("{outcome:?}");
        assert!(!printed.contains("jwt-abc"));
    }
}
