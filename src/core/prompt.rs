use crate::{
    parsing::{END_SENTINEL, START_SENTINEL},
    schemas::ReplySchema,
    types::{codes::describe_code_tables, coded::CodedTrip},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "English".to_string()
}

/// Trip request as received from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub locations: Vec<String>,
    pub start_date: NaiveDate,
    pub days: u32,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Continue an existing agent session instead of opening a new one
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Natural-language planning request sent to the agent.
pub fn build_trip_prompt(request: &TripRequest) -> String {
    format!(
        "Please plan a {}-days trip starting from {} in {}. Use {} for all value data.",
        request.days,
        request.start_date.format("%Y-%m-%d"),
        request.locations.join(", "),
        request.language
    )
}

/// Output contract appended to the prompt: sentinels, code tables and schema.
pub fn reply_format_instructions() -> String {
    let schema = CodedTrip::schema();
    format!(
        "Reply format requirement: after any commentary, write {start} followed immediately by a single JSON object that conforms to the `{name}` schema below, then {end}. Use integer codes for `type` and `transportType`, epoch milliseconds (UTC) for `startTimeUtc`, and seconds for every duration.\n{tables}\n\nSchema:\n{schema}",
        start = START_SENTINEL,
        end = END_SENTINEL,
        name = schema.schema_name(),
        tables = describe_code_tables(),
        schema = schema.to_pretty_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TripRequest {
        TripRequest {
            locations: vec!["Tokyo".to_string(), "Kyoto".to_string()],
            start_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            days: 2,
            language: "Chinese Traditional".to_string(),
            user_id: None,
            session_id: None,
        }
    }

    #[test]
    fn prompt_matches_agent_wording() {
        assert_eq!(
            build_trip_prompt(&request()),
            "Please plan a 2-days trip starting from 2025-09-10 in Tokyo, Kyoto. Use Chinese Traditional for all value data."
        );
    }

    #[test]
    fn format_instructions_name_sentinels_and_schema() {
        let text = reply_format_instructions();
        assert!(text.contains("STARTJSON"));
        assert!(text.contains("ENDJSON"));
        assert!(text.contains("CodedTrip"));
        assert!(text.contains("durationInSeconds"));
        assert!(text.contains("0 = sightseeing"));
    }

    #[test]
    fn request_defaults_language() {
        let request: TripRequest = serde_json::from_value(serde_json::json!({
            "locations": ["Tokyo"],
            "startDate": "2025-09-10",
            "days": 2
        }))
        .unwrap();
        assert_eq!(request.language, "English");
        assert!(request.session_id.is_none());
    }
}
