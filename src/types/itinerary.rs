use crate::types::codes::{ActivityType, TransportType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized trip plan returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub title: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub location: String,
    pub start_time_utc: DateTime<Utc>,
    pub end_time_utc: DateTime<Utc>,
    /// Minutes, truncated from the source seconds
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_type: Option<TransportType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub child_activities: Vec<ChildActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_lng: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildActivity {
    pub name: String,
    /// Minutes
    pub duration: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl Itinerary {
    /// Sum of activity durations in minutes.
    pub fn total_minutes(&self) -> u64 {
        self.activities.iter().map(|a| a.duration).sum()
    }
}

impl Activity {
    /// Exact span in seconds between start and end.
    pub fn span_seconds(&self) -> i64 {
        (self.end_time_utc - self.start_time_utc).num_seconds()
    }
}
