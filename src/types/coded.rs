use crate::reply_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Compact trip plan emitted by the planning agent. Categories are integer
/// codes and times are epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[reply_schema]
pub struct CodedTrip {
    /// Trip header
    pub trip: TripHeader,
    /// Scheduled events in chronological order
    pub activities: Vec<CodedActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TripHeader {
    /// Human-readable trip name, used as the itinerary title
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodedActivity {
    /// Activity type code (index into the activity type table)
    #[serde(rename = "type")]
    pub activity_type: u32,
    /// Place name or address
    pub location: String,
    /// Start time in milliseconds since the Unix epoch, UTC
    pub start_time_utc: i64,
    /// Length of the activity in seconds
    pub duration_in_seconds: u64,
    /// IANA time zone of the location, e.g. "Asia/Tokyo"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Transport type code (index into the transport type table), null when not a transport leg
    #[serde(default)]
    pub transport_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Map link or place identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_uri: Option<String>,
    /// Stops within this activity
    #[serde(default)]
    pub child_activities: Vec<CodedChildActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodedChildActivity {
    pub name: String,
    /// Length of the stop in seconds
    pub duration_in_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ReplySchema;
    use serde_json::json;

    #[test]
    fn decodes_minimal_activity() {
        let trip: CodedTrip = serde_json::from_value(json!({
            "trip": { "name": "Tokyo Getaway" },
            "activities": [{
                "type": 0,
                "location": "Senso-ji",
                "startTimeUtc": 1700000000000i64,
                "durationInSeconds": 3600,
                "transportType": null
            }]
        }))
        .unwrap();

        let activity = &trip.activities[0];
        assert_eq!(activity.activity_type, 0);
        assert_eq!(activity.transport_type, None);
        assert!(activity.child_activities.is_empty());
        assert!(activity.latitude.is_none());
    }

    #[test]
    fn schema_uses_wire_property_names() {
        let schema = CodedTrip::schema();
        assert_eq!(schema.schema_name(), "CodedTrip");

        let text = schema.schema_json().to_string();
        assert!(text.contains("\"durationInSeconds\""));
        assert!(text.contains("\"startTimeUtc\""));
        assert!(text.contains("\"type\""));
        assert!(!text.contains("activity_type"));
    }

    #[test]
    fn schema_carries_struct_docs() {
        let schema = CodedTrip::schema().schema_json();
        assert_eq!(schema["title"], "CodedTrip");
        assert!(schema["description"]
            .as_str()
            .unwrap()
            .contains("Compact trip plan"));
    }
}
