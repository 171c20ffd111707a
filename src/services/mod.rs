pub mod engine_client;

pub use engine_client::{AgentEngineClient, AgentEngineTarget};
