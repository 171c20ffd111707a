//! itinerary-agent: trip planning through a hosted conversational agent
//!
//! The agent is asked for a compact, integer-coded trip plan wrapped in
//! `STARTJSON`/`ENDJSON` markers. This crate recovers that JSON from the chat
//! reply, validates it, and translates it into a typed [`Itinerary`].
//!
//! # Quick Start
//!
//! ```rust
//! use itinerary_agent::{parse_agent_reply, ValidationMode};
//!
//! let reply = r#"Enjoy! STARTJSON{"trip":{"name":"Tokyo Getaway"},"activities":[
//!     {"type":0,"location":"Senso-ji","startTimeUtc":1700000000000,"durationInSeconds":3600}
//! ]}ENDJSON"#;
//!
//! let parsed = parse_agent_reply(reply, ValidationMode::Typed).unwrap();
//! assert_eq!(parsed.itinerary.title, "Tokyo Getaway");
//! assert_eq!(parsed.itinerary.activities[0].duration, 60);
//! ```

extern crate self as itinerary_agent;

pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use crate::core::{AgentBackend, SessionInfo, TripPlanner, TripRequest};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result, REPLY_ERROR_MESSAGE};
pub use itinerary_macros::reply_schema;
pub use parsing::{extract_json, parse_agent_reply, translate, ExtractedReply, ParsedReply};
pub use schemas::{ReplySchema, SchemaHandle, ValidationMode};
pub use services::{AgentEngineClient, AgentEngineTarget};
pub use types::{
    Activity, ActivityType, ChildActivity, CodedTrip, Itinerary, LatLng, PlanOutcome,
    TransportType,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
