//! Environment-driven settings for the service and CLI.

use crate::{
    core::TripPlanner,
    error::{PlannerError, Result},
    schemas::ValidationMode,
    services::{AgentEngineClient, AgentEngineTarget},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub target: AgentEngineTarget,
    pub base_url: Option<String>,
    pub access_token: Option<String>,
    pub default_user_id: Option<String>,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub validation_mode: ValidationMode,
    pub ephemeral_sessions: bool,
}

impl PlannerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                PlannerError::Config(format!("{key} environment variable must be set"))
            })
        };

        let target = AgentEngineTarget {
            project_id: require("PROJECT_ID")?,
            location: require("LOCATION")?,
            agent_id: require("AGENT_ID")?,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                PlannerError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {raw}"))
            })?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| PlannerError::Config(format!("BIND_ADDR is not a socket address: {bind_raw}")))?;

        let validation_mode = if parse_flag(get("STRICT_SCHEMA").as_deref())? {
            ValidationMode::Strict
        } else {
            ValidationMode::Typed
        };

        Ok(Self {
            target,
            base_url: get("AGENT_ENGINE_BASE_URL"),
            access_token: get("AGENT_ACCESS_TOKEN"),
            default_user_id: get("DEFAULT_USER_ID"),
            request_timeout,
            bind_addr,
            validation_mode,
            ephemeral_sessions: parse_flag(get("EPHEMERAL_SESSIONS").as_deref())?,
        })
    }

    pub fn build_client(&self) -> Result<AgentEngineClient> {
        let mut client = AgentEngineClient::with_timeout(self.target.clone(), self.request_timeout)?;
        if let Some(base_url) = &self.base_url {
            client.set_base_url(base_url.clone());
        }
        if let Some(token) = &self.access_token {
            client.set_access_token(token.clone());
        }
        Ok(client)
    }

    pub fn build_planner(&self) -> Result<TripPlanner> {
        let mut planner = TripPlanner::new(Arc::new(self.build_client()?))
            .with_validation_mode(self.validation_mode)
            .with_ephemeral_sessions(self.ephemeral_sessions);
        if let Some(user_id) = &self.default_user_id {
            planner = planner.with_default_user_id(user_id.clone());
        }
        Ok(planner)
    }
}

fn parse_flag(raw: Option<&str>) -> Result<bool> {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(PlannerError::Config(format!(
            "expected a boolean flag, got `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("PROJECT_ID", "demo"),
        ("LOCATION", "us-central1"),
        ("AGENT_ID", "123"),
    ];

    #[test]
    fn defaults_apply_when_optional_values_missing() {
        let config = PlannerConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.target.agent_id, "123");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.validation_mode, ValidationMode::Typed);
        assert!(!config.ephemeral_sessions);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn missing_required_value_is_config_error() {
        let err = PlannerConfig::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
        assert!(err.to_string().contains("AGENT_ID"));
    }

    #[test]
    fn optional_values_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("REQUEST_TIMEOUT_SECS", "30"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("STRICT_SCHEMA", "true"),
            ("EPHEMERAL_SESSIONS", "1"),
            ("AGENT_ENGINE_BASE_URL", "http://localhost:9000"),
        ]);

        let config = PlannerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert!(config.ephemeral_sessions);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("STRICT_SCHEMA", "maybe"));
        assert!(PlannerConfig::from_lookup(lookup(&pairs)).is_err());

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("REQUEST_TIMEOUT_SECS", "soon"));
        assert!(PlannerConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
