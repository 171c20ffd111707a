use crate::{
    error::Result,
    parsing::{extractor::extract_json, translator::translate},
    schemas::ValidationMode,
    types::{coded::CodedTrip, itinerary::Itinerary},
};
use serde_json::Value;
use tracing::debug;

/// Itinerary recovered from an agent reply, with the agent's surrounding prose.
#[derive(Debug, Clone)]
pub struct ParsedReply {
    pub itinerary: Itinerary,
    pub commentary: String,
}

/// Extract, parse, validate and translate a raw agent reply.
///
/// Any failure along the way is returned as-is; no partial itinerary is produced.
pub fn parse_agent_reply(text: &str, mode: ValidationMode) -> Result<ParsedReply> {
    let extracted = extract_json(text);
    debug!(
        target: "itinerary::reply",
        reply_len = text.len(),
        json_len = extracted.json.len(),
        commentary_len = extracted.commentary.len(),
        "extracted reply payload"
    );

    let value: Value = serde_json::from_str(&extracted.json).map_err(|err| {
        debug!(target: "itinerary::reply", error = %err, payload = %extracted.json, "reply is not JSON");
        err
    })?;

    let coded: CodedTrip = mode.decode(value).map_err(|err| {
        debug!(target: "itinerary::reply", error = %err, "reply failed validation");
        err
    })?;

    let itinerary = translate(coded)?;

    Ok(ParsedReply {
        itinerary,
        commentary: extracted.commentary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::types::codes::ActivityType;

    const TOKYO: &str = r#"{"trip":{"name":"Tokyo Getaway"},"activities":[{"type":0,"location":"Senso-ji","transportType":null,"startTimeUtc":1700000000000,"durationInSeconds":3600}]}"#;

    #[test]
    fn parses_sentinel_wrapped_reply() {
        let text = format!("Here you go! STARTJSON{}ENDJSON Have fun.", TOKYO);
        let parsed = parse_agent_reply(&text, ValidationMode::Typed).unwrap();

        assert_eq!(parsed.itinerary.title, "Tokyo Getaway");
        assert_eq!(
            parsed.itinerary.activities[0].activity_type,
            ActivityType::Sightseeing
        );
        assert_eq!(parsed.commentary, "Here you go!  Have fun.");
    }

    #[test]
    fn parses_fenced_reply_in_strict_mode() {
        let text = format!("```json\n{}\n```", TOKYO);
        let parsed = parse_agent_reply(&text, ValidationMode::Strict).unwrap();
        assert_eq!(parsed.itinerary.activities.len(), 1);
        assert_eq!(parsed.commentary, "");
    }

    #[test]
    fn prose_only_reply_is_parse_failure() {
        let err = parse_agent_reply("Sorry, I can't help with that.", ValidationMode::Typed)
            .unwrap_err();
        assert!(matches!(err, PlannerError::Parse(_)));
        assert!(err.is_reply_error());
    }

    #[test]
    fn wrong_shape_is_validation_failure() {
        let err = parse_agent_reply(r#"STARTJSON{"activities":[]}ENDJSON"#, ValidationMode::Typed)
            .unwrap_err();
        assert!(matches!(err, PlannerError::Validation(_)));
        assert!(err.to_string().contains("trip"));
    }

    #[test]
    fn bad_code_is_validation_failure() {
        let text = TOKYO.replace(r#""type":0"#, r#""type":7"#);
        let err = parse_agent_reply(&text, ValidationMode::Strict).unwrap_err();
        assert!(matches!(err, PlannerError::CodeOutOfRange { code: 7, .. }));
    }
}
