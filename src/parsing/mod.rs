//! Turning agent chat replies into itineraries.

pub mod extractor;
pub mod reply;
pub mod translator;

pub use extractor::{extract_json, ExtractedReply, END_SENTINEL, START_SENTINEL};
pub use reply::{parse_agent_reply, ParsedReply};
pub use translator::{minutes_from_seconds, translate};
