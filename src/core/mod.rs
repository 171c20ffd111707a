pub mod backend;
pub mod planner;
pub mod prompt;

pub use backend::{AgentBackend, SessionInfo};
pub use planner::TripPlanner;
pub use prompt::{build_trip_prompt, reply_format_instructions, TripRequest};
