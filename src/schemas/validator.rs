use crate::{
    error::{PlannerError, Result},
    schemas::{validate_against_schema, ReplySchema},
};
use serde_json::Value;

/// How strictly a parsed reply is checked before it is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Decode straight into the typed model with serde
    #[default]
    Typed,
    /// Check the reply against its JSON Schema first, then decode
    Strict,
}

impl ValidationMode {
    /// Validate and decode a reply value into `T`.
    pub fn decode<T: ReplySchema>(&self, value: Value) -> Result<T> {
        if *self == ValidationMode::Strict {
            validate_against_schema(T::schema(), &value)?;
        }
        decode_typed(T::schema().schema_name(), value)
    }
}

fn decode_typed<T: ReplySchema>(schema_name: &str, value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Validation(format!(
            "failed to decode `{}` at {}: {}",
            schema_name,
            location,
            err.inner()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::coded::CodedTrip;
    use serde_json::json;

    #[test]
    fn typed_decode_names_failing_path() {
        let value = json!({
            "trip": { "name": "Oslo" },
            "activities": [{ "type": 0, "location": "Fjord", "startTimeUtc": 0 }]
        });

        let err = ValidationMode::Typed.decode::<CodedTrip>(value).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("activities[0]"), "{message}");
        assert!(message.contains("durationInSeconds"), "{message}");
    }

    #[test]
    fn strict_mode_rejects_before_decoding() {
        let value = json!({ "trip": { "name": "Oslo" } });

        let err = ValidationMode::Strict.decode::<CodedTrip>(value).unwrap_err();
        assert!(err.to_string().contains("schema"));
    }

    #[test]
    fn both_modes_accept_valid_reply() {
        let value = json!({
            "trip": { "name": "Oslo" },
            "activities": []
        });

        for mode in [ValidationMode::Typed, ValidationMode::Strict] {
            let trip = mode.decode::<CodedTrip>(value.clone()).unwrap();
            assert_eq!(trip.trip.name, "Oslo");
        }
    }
}
