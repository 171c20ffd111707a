use thiserror::Error;

/// Fixed message returned to callers when an agent reply cannot be used.
pub const REPLY_ERROR_MESSAGE: &str = "Failed to parse or validate agent response";

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("Agent engine error: {0}")]
    Upstream(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Agent reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(
        "Validation error: {}`{field}` code {code} is outside the {table_len}-entry table",
        activity_prefix(.activity)
    )]
    CodeOutOfRange {
        /// Index of the offending activity, once known.
        activity: Option<usize>,
        field: &'static str,
        code: u32,
        table_len: usize,
    },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

fn activity_prefix(activity: &Option<usize>) -> String {
    activity
        .map(|idx| format!("activities[{idx}]: "))
        .unwrap_or_default()
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// True when the agent answered but its reply could not be turned into an itinerary.
    pub fn is_reply_error(&self) -> bool {
        matches!(
            self,
            PlannerError::Parse(_)
                | PlannerError::Validation(_)
                | PlannerError::CodeOutOfRange { .. }
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidRequest(_) => "INVALID_REQUEST",
            PlannerError::Upstream(_) => "UPSTREAM_ERROR",
            PlannerError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            PlannerError::Parse(_) => "PARSE_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::CodeOutOfRange { .. } => "VALIDATION_ERROR",
            PlannerError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Short caller-facing message; reply failures all share one.
    pub fn public_message(&self) -> &'static str {
        match self {
            _ if self.is_reply_error() => REPLY_ERROR_MESSAGE,
            PlannerError::Config(_) => "Service is misconfigured",
            PlannerError::InvalidRequest(_) => "Invalid trip request",
            PlannerError::Upstream(_) => "Agent engine request failed",
            PlannerError::SessionNotFound(_) => "Session not found",
            _ => "Unexpected error",
        }
    }

    /// Convert to the `{error, details}` body sent to callers
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.public_message(),
            "details": self.to_string(),
            "code": self.error_code(),
        })
    }
}
