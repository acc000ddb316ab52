//! Login: exchanges username and password for a bearer token.
//!
//! The argument is free text such as
//! `Login with username: bob password: secret`. Both markers are matched
//! case-insensitively, each followed by one word. Word characters are
//! Unicode-aware, so `Ayşe` is one word.

use async_trait::async_trait;
use flightdesk_backend::{BackendClient, LoginRequest};
use flightdesk_core::{FieldSpec, Operation, OperationResult, Session};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};

use crate::args::ArgumentError;

const USAGE: &str =
    "Please provide login like: 'Login with username: <username> password: <password>'";
const ERROR_PREFIX: &str = "Error during login";
const FIELDS: &[FieldSpec] = &[FieldSpec::text("username"), FieldSpec::text("password")];

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)username[: ]+(\w+)").expect("valid username pattern"));
static PASSWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)password[: ]+(\w+)").expect("valid password pattern"));

/// Pull `username` and `password` out of free text.
pub fn extract_credentials(text: &str) -> Result<LoginRequest, ArgumentError> {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    match (capture(&USERNAME), capture(&PASSWORD)) {
        (Some(username), Some(password)) => Ok(LoginRequest { username, password }),
        _ => Err(ArgumentError::Usage { usage: USAGE }),
    }
}

pub struct LoginOperation {
    backend: Arc<BackendClient>,
}

impl LoginOperation {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Operation for LoginOperation {
    fn name(&self) -> &str {
        "Login"
    }

    fn description(&self) -> &str {
        "Use this to log in when the user wants to login with his/her username and password. \
         When the user input includes a username and password use this tool. \
         Input format: Login with username: <username> password: <password>"
    }

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    async fn invoke(&self, session: &Session, argument: &str) -> OperationResult {
        let request = match extract_credentials(argument) {
            Ok(r) => r,
            Err(e) => return e.render(ERROR_PREFIX).into(),
        };

        match self.backend.login(&request).await {
            Ok(outcome) => match outcome.token {
                Some(token) => {
                    session.set_token(token.clone());
                    info!(username = %request.username, "Login succeeded, session token updated");
                    format!("Login successful. Token: {token}").into()
                }
                None => {
                    warn!(username = %request.username, status = outcome.status, "Login rejected");
                    format!("Login failed: {} - {}", outcome.status, outcome.body).into()
                }
            },
            Err(e) => {
                warn!(error = %e, "Login request failed");
                format!("{ERROR_PREFIX}: {e}").into()
            }
        }
    }
}
