use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Conversation session held by the remote agent platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub app_name: Option<String>,
    /// Opaque state the agent keeps for the session
    #[serde(default)]
    pub state: Value,
    /// Seconds since the epoch, as reported by the platform
    #[serde(default)]
    pub last_update_time: Option<f64>,
}

/// Remote planning agent. All session state lives on the far side.
#[async_trait]
pub trait AgentBackend: Send + Sync + std::fmt::Debug {
    async fn create_session(&self, user_id: &str) -> Result<SessionInfo>;

    async fn get_session(&self, user_id: &str, session_id: &str) -> Result<SessionInfo>;

    async fn delete_session(&self, user_id: &str, session_id: &str) -> Result<()>;

    /// Send `message` and collect the streamed text chunks in arrival order.
    async fn stream_query(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<String>>;
}
