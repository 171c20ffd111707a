use crate::{
    error::{PlannerError, Result},
    schemas::SchemaHandle,
};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a decoded reply against a cached schema, reporting at most a
/// handful of violations with their instance paths.
pub fn validate_against_schema(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            PlannerError::Validation(format!(
                "failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx == MAX_SCHEMA_ERRORS {
                truncated = true;
                break;
            }
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{}: {}", path, error));
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(PlannerError::Validation(format!(
            "reply does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}
