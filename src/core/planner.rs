use crate::{
    core::{
        backend::{AgentBackend, SessionInfo},
        prompt::{build_trip_prompt, reply_format_instructions, TripRequest},
    },
    error::{PlannerError, Result},
    parsing::parse_agent_reply,
    schemas::ValidationMode,
    types::result::PlanOutcome,
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, warn};

const DEFAULT_USER_ID: &str = "trip-planner";

/// Drives one planning round trip against the agent backend.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    backend: Arc<dyn AgentBackend>,
    default_user_id: String,
    validation_mode: ValidationMode,
    format_instructions: bool,
    ephemeral_sessions: bool,
}

impl TripPlanner {
    pub fn new(backend: Arc<dyn AgentBackend>) -> Self {
        Self {
            backend,
            default_user_id: DEFAULT_USER_ID.to_string(),
            validation_mode: ValidationMode::Typed,
            format_instructions: true,
            ephemeral_sessions: false,
        }
    }

    pub fn with_default_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.default_user_id = user_id.into();
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Append the sentinel/schema contract to every prompt (on by default).
    pub fn with_format_instructions(mut self, enabled: bool) -> Self {
        self.format_instructions = enabled;
        self
    }

    /// Delete sessions the planner opened itself once the reply is in.
    pub fn with_ephemeral_sessions(mut self, enabled: bool) -> Self {
        self.ephemeral_sessions = enabled;
        self
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode
    }

    pub fn backend(&self) -> &Arc<dyn AgentBackend> {
        &self.backend
    }

    fn resolve_user<'a>(&'a self, user_id: Option<&'a str>) -> &'a str {
        user_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(self.default_user_id.as_str())
    }

    /// Full prompt for a request, including the reply contract when enabled.
    pub fn prompt_for(&self, request: &TripRequest) -> String {
        let prompt = build_trip_prompt(request);
        if self.format_instructions {
            format!("{}\n\n{}", prompt, reply_format_instructions())
        } else {
            prompt
        }
    }

    pub async fn plan(&self, request: &TripRequest) -> Result<PlanOutcome> {
        validate_request(request)?;

        let started = Instant::now();
        let user_id = self.resolve_user(request.user_id.as_deref());

        let (session_id, owned_session) = match request.session_id.as_deref() {
            Some(existing) => (existing.to_string(), false),
            None => (self.backend.create_session(user_id).await?.id, true),
        };

        info!(
            user_id,
            session_id = %session_id,
            days = request.days,
            locations = ?request.locations,
            "planning trip"
        );

        let prompt = self.prompt_for(request);
        let streamed = self
            .backend
            .stream_query(user_id, &session_id, &prompt)
            .await;

        if owned_session && self.ephemeral_sessions {
            if let Err(err) = self.backend.delete_session(user_id, &session_id).await {
                warn!(session_id = %session_id, error = %err, "failed to delete planner session");
            }
        }

        let chunks = streamed?;
        let raw_reply = chunks.concat();
        debug!(
            chunk_count = chunks.len(),
            reply_len = raw_reply.len(),
            "agent reply received"
        );

        let parsed = parse_agent_reply(&raw_reply, self.validation_mode)?;

        info!(
            session_id = %session_id,
            title = %parsed.itinerary.title,
            activities = parsed.itinerary.activities.len(),
            "itinerary ready"
        );

        Ok(PlanOutcome {
            itinerary: parsed.itinerary,
            commentary: parsed.commentary,
            session_id,
            raw_reply,
            chunk_count: chunks.len(),
            elapsed: started.elapsed(),
        })
    }

    pub async fn create_session(&self, user_id: Option<&str>) -> Result<SessionInfo> {
        let user_id = self.resolve_user(user_id);
        let session = self.backend.create_session(user_id).await?;
        info!(user_id, session_id = %session.id, "session created");
        Ok(session)
    }

    pub async fn get_session(&self, user_id: &str, session_id: &str) -> Result<SessionInfo> {
        self.backend.get_session(user_id, session_id).await
    }

    pub async fn delete_session(&self, user_id: &str, session_id: &str) -> Result<()> {
        self.backend.delete_session(user_id, session_id).await?;
        info!(user_id, session_id, "session deleted");
        Ok(())
    }
}

fn validate_request(request: &TripRequest) -> Result<()> {
    if request.days == 0 {
        return Err(PlannerError::InvalidRequest(
            "`days` must be at least 1".to_string(),
        ));
    }
    if request.locations.iter().all(|l| l.trim().is_empty()) {
        return Err(PlannerError::InvalidRequest(
            "`locations` must name at least one place".to_string(),
        ));
    }
    Ok(())
}
