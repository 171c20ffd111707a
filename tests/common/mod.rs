#![allow(dead_code)]

use async_trait::async_trait;
use itinerary_agent::{AgentBackend, PlannerError, Result, SessionInfo};
use serde_json::json;
use std::sync::Mutex;

pub const TOKYO_JSON: &str = r#"{"trip":{"name":"Tokyo Getaway"},"activities":[{"type":0,"location":"Senso-ji","transportType":null,"startTimeUtc":1700000000000,"durationInSeconds":3600}]}"#;

/// Recorded call against the scripted backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(String),
    Get(String, String),
    Delete(String, String),
    Stream(String, String, String),
}

/// In-memory agent double that replays a fixed reply.
#[derive(Debug)]
pub struct ScriptedAgent {
    chunks: Vec<String>,
    fail_stream: bool,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedAgent {
    pub fn replying(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail_stream: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_stream: true,
            ..Self::replying(&[])
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn session(user_id: &str, session_id: &str) -> SessionInfo {
    SessionInfo {
        id: session_id.to_string(),
        user_id: user_id.to_string(),
        app_name: Some("trip_planner".to_string()),
        state: json!({}),
        last_update_time: Some(1_700_000_000.0),
    }
}

#[async_trait]
impl AgentBackend for ScriptedAgent {
    async fn create_session(&self, user_id: &str) -> Result<SessionInfo> {
        self.record(Call::Create(user_id.to_string()));
        Ok(session(user_id, "session-1"))
    }

    async fn get_session(&self, user_id: &str, session_id: &str) -> Result<SessionInfo> {
        self.record(Call::Get(user_id.to_string(), session_id.to_string()));
        if session_id == "missing" {
            return Err(PlannerError::SessionNotFound(session_id.to_string()));
        }
        Ok(session(user_id, session_id))
    }

    async fn delete_session(&self, user_id: &str, session_id: &str) -> Result<()> {
        self.record(Call::Delete(user_id.to_string(), session_id.to_string()));
        Ok(())
    }

    async fn stream_query(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<String>> {
        self.record(Call::Stream(
            user_id.to_string(),
            session_id.to_string(),
            message.to_string(),
        ));
        if self.fail_stream {
            return Err(PlannerError::Upstream("HTTP 503 error: unavailable".to_string()));
        }
        Ok(self.chunks.clone())
    }
}
