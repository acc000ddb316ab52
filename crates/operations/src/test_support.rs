//! In-process stand-in for the flight-operations backend.
//!
//! Binds an axum server on `127.0.0.1:0`, records every request and
//! answers with canned bodies keyed by path.

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use std::sync::{Arc, Mutex};

use flightdesk_backend::BackendClient;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

pub struct StubBackend {
    pub base_url: String,
    requests: Recorded,
}

impl StubBackend {
    pub async fn start() -> Self {
        let requests: Recorded = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .fallback(record_and_answer)
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn client(&self) -> Arc<BackendClient> {
        Arc::new(BackendClient::new(&self.base_url).unwrap())
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

/// A client pointed at a closed port.
pub fn unreachable_client() -> Arc<BackendClient> {
    Arc::new(BackendClient::new("http://127.0.0.1:1").unwrap())
}

async fn record_and_answer(
    State(requests): State<Recorded>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };

    requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(|q| q.to_string()),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: body.clone(),
    });

    match uri.path() {
        "/auth/login" => login_answer(&body),
        "/flights/add" => (
            StatusCode::OK,
            r#"{"message":"Flight added successfully"}"#.into(),
        ),
        "/flights/query" => (
            StatusCode::OK,
            r#"{"content":[{"flightNumber":"N5","airportFrom":"Istanbul","airportTo":"Ankara"}],"page":0,"size":10}"#.into(),
        ),
        "/tickets/buy" => (
            StatusCode::OK,
            r#"{"status":"SUCCESS","ticketNumbers":["TCK-1"]}"#.into(),
        ),
        "/tickets/check-in" => (
            StatusCode::BAD_REQUEST,
            r#"{"error":"Passenger has no ticket"}"#.into(),
        ),
        "/tickets/passenger-list" => (
            StatusCode::OK,
            r#"{"content":[{"passengerName":"Serkan Acar","seatNumber":1}]}"#.into(),
        ),
        _ => (StatusCode::NOT_FOUND, "not found".into()),
    }
}

fn login_answer(body: &str) -> (StatusCode, String) {
    let value: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let username = value["username"].as_str().unwrap_or_default();
    let password = value["password"].as_str().unwrap_or_default();

    if username == "garbled" {
        return (StatusCode::OK, "<html>oops</html>".into());
    }
    if password == "secret" {
        (
            StatusCode::OK,
            serde_json::json!({ "token": format!("token-for-{username}") }).to_string(),
        )
    } else {
        (StatusCode::UNAUTHORIZED, "Invalid credentials".into())
    }
}
