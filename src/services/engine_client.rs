use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    core::backend::{AgentBackend, SessionInfo},
    error::{PlannerError, Result},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Coordinates of a deployed agent on the hosted agent engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentEngineTarget {
    pub project_id: String,
    pub location: String,
    pub agent_id: String,
}

impl AgentEngineTarget {
    fn resource_path(&self) -> String {
        format!(
            "v1/projects/{}/locations/{}/reasoningEngines/{}",
            self.project_id, self.location, self.agent_id
        )
    }

    /// Regional API host for this target.
    pub fn default_base_url(&self) -> String {
        format!("https://{}-aiplatform.googleapis.com", self.location)
    }
}

/// REST client for the hosted agent engine. Each call is a single attempt.
#[derive(Clone, Debug)]
pub struct AgentEngineClient {
    http: reqwest::Client,
    target: AgentEngineTarget,
    base_url: String,
    access_token: Option<String>,
}

impl AgentEngineClient {
    pub fn new(target: AgentEngineTarget) -> Result<Self> {
        Self::with_timeout(target, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(target: AgentEngineTarget, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: target.default_base_url(),
            target,
            access_token: None,
        })
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn target(&self) -> &AgentEngineTarget {
        &self.target
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/{}:{}",
            self.base_url.trim_end_matches('/'),
            self.target.resource_path(),
            method
        )
    }

    async fn post(&self, url: &str, body: &Value) -> Result<(StatusCode, String)> {
        let mut request = self.http.post(url).json(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| PlannerError::Upstream(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| PlannerError::Upstream(format!("failed to read response: {err}")))?;

        debug!(%url, %status, body_len = text.len(), "agent engine response");
        Ok((status, text))
    }

    /// Invoke a non-streaming class method and return the raw status and body.
    async fn call(&self, class_method: &str, input: Value) -> Result<(StatusCode, String)> {
        let body = json!({ "classMethod": class_method, "input": input });
        self.post(&self.method_url("query"), &body).await
    }

    /// Invoke a non-streaming class method and return its `output`.
    async fn query(&self, class_method: &str, input: Value) -> Result<Value> {
        let (status, text) = self.call(class_method, input).await?;
        read_output(class_method, status, &text)
    }
}

#[async_trait]
impl AgentBackend for AgentEngineClient {
    async fn create_session(&self, user_id: &str) -> Result<SessionInfo> {
        let output = self
            .query("create_session", json!({ "user_id": user_id }))
            .await?;
        decode_session(output)
    }

    async fn get_session(&self, user_id: &str, session_id: &str) -> Result<SessionInfo> {
        let (status, text) = self
            .call(
                "get_session",
                json!({ "user_id": user_id, "session_id": session_id }),
            )
            .await?;
        if status == StatusCode::NOT_FOUND {
            return Err(PlannerError::SessionNotFound(session_id.to_string()));
        }

        let output = read_output("get_session", status, &text)?;
        if output.is_null() {
            return Err(PlannerError::SessionNotFound(session_id.to_string()));
        }
        decode_session(output)
    }

    async fn delete_session(&self, user_id: &str, session_id: &str) -> Result<()> {
        self.query(
            "delete_session",
            json!({ "user_id": user_id, "session_id": session_id }),
        )
        .await?;
        Ok(())
    }

    async fn stream_query(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<String>> {
        let body = json!({
            "classMethod": "stream_query",
            "input": {
                "user_id": user_id,
                "session_id": session_id,
                "message": message,
            }
        });
        let url = format!("{}?alt=sse", self.method_url("streamQuery"));
        let (status, text) = self.post(&url, &body).await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        parse_stream_events(&text)
    }
}

fn read_output(class_method: &str, status: StatusCode, text: &str) -> Result<Value> {
    if !status.is_success() {
        return Err(status_error(status, text));
    }

    let response: Value = serde_json::from_str(text).map_err(|err| {
        PlannerError::Upstream(format!("{class_method} returned invalid JSON: {err}"))
    })?;

    Ok(response.get("output").cloned().unwrap_or(Value::Null))
}

fn decode_session(output: Value) -> Result<SessionInfo> {
    serde_json::from_value(output)
        .map_err(|err| PlannerError::Upstream(format!("unexpected session payload: {err}")))
}

fn status_error(status: StatusCode, body: &str) -> PlannerError {
    let api_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string());

    PlannerError::Upstream(format!("HTTP {} error: {}", status.as_u16(), api_message))
}

/// Text chunks from a newline-delimited event stream, in order.
///
/// Lines may carry an SSE `data:` prefix. Events without text parts (tool
/// calls, state deltas) are skipped; an event carrying `error` aborts.
pub(crate) fn parse_stream_events(body: &str) -> Result<Vec<String>> {
    let mut chunks = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        let payload = line.strip_prefix("data:").map(str::trim).unwrap_or(line);
        if payload.is_empty() || payload == "[DONE]" {
            continue;
        }

        let event: Value = serde_json::from_str(payload).map_err(|err| {
            PlannerError::Upstream(format!("malformed stream event: {err}"))
        })?;

        if let Some(error) = event.get("error") {
            let message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::Upstream(format!("stream error: {message}")));
        }

        let parts = event
            .pointer("/content/parts")
            .and_then(|parts| parts.as_array())
            .into_iter()
            .flatten();
        chunks.extend(
            parts
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .map(|text| text.to_string()),
        );
    }

    Ok(chunks)
}
