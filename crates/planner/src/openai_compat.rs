//! ReAct planner over an OpenAI-compatible chat endpoint.
//!
//! Works with OpenAI, OpenRouter, Ollama, vLLM and anything else that
//! exposes `/chat/completions`. Each planning step is one non-streaming
//! completion whose text is parsed by [`crate::parser::parse_reply`].

use async_trait::async_trait;
use flightdesk_config::PlannerConfig;
use flightdesk_core::{OperationDescriptor, PlannedAction, Planner, PlannerError, PlannerStep};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::parser::parse_reply;
use crate::prompt::{OBSERVATION_STOP, render_prompt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ChatReactPlanner {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl ChatReactPlanner {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, PlannerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PlannerError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: "openai".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.0,
            max_tokens: None,
            client,
        })
    }

    /// Build from the `[planner]` config section. Fails without an API key.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(PlannerError::NotConfigured(
                "no API key; set planner.api_key or FLIGHTDESK_API_KEY".into(),
            ));
        };

        let mut planner = Self::new(&config.api_url, api_key, &config.model)?
            .with_temperature(config.temperature);
        planner.name = config.name.clone();
        planner.max_tokens = config.max_tokens;
        Ok(planner)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: String) -> Result<String, PlannerError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ApiRequest {
            model: &self.model,
            messages: vec![ApiMessage {
                role: "user".into(),
                content: Some(prompt),
            }],
            temperature: self.temperature,
            stop: vec![OBSERVATION_STOP],
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!(planner = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlannerError::Timeout(e.to_string())
                } else {
                    PlannerError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(PlannerError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(PlannerError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Planner endpoint returned error");
            return Err(PlannerError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| PlannerError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        if let Some(usage) = &api_response.usage {
            trace!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| PlannerError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })
    }
}

#[async_trait]
impl Planner for ChatReactPlanner {
    fn name(&self) -> &str {
        &self.name
    }

    async fn plan_next(
        &self,
        goal: &str,
        operations: &[OperationDescriptor],
        transcript: &[PlannerStep],
    ) -> Result<PlannedAction, PlannerError> {
        let prompt = render_prompt(goal, operations, transcript);
        let reply = self.complete(prompt).await?;
        trace!(reply = %reply, "Planner reply");
        parse_reply(&reply)
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    temperature: f32,
    stop: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
