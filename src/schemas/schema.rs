use schemars::schema::{ObjectValidation, RootSchema, Schema, SchemaObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Cached JSON Schema for a type the agent is asked to emit.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema(schema_name: &'static str, root: RootSchema) -> Self {
        let schema_json = serde_json::to_value(root).unwrap_or_else(|err| {
            panic!("failed to serialize schema for {}: {}", schema_name, err)
        });

        Self {
            schema_name,
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// Pretty-printed schema for embedding in a prompt.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(self.schema_json.as_ref())
            .unwrap_or_else(|_| self.schema_json.to_string())
    }
}

/// Implemented by `#[reply_schema]` for payloads decoded out of agent replies.
pub trait ReplySchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Apply doc comments captured by the procedural macro to the generated schema metadata.
pub fn apply_doc_comments(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
    field_docs: &[(&'static str, &'static str)],
) {
    let schema_object = &mut root.schema;
    apply_struct_metadata(schema_object, title, description);

    if let Some(object_validation) = schema_object.object.as_mut() {
        apply_field_metadata(object_validation.as_mut(), field_docs);
    }
}

fn apply_struct_metadata(
    schema_object: &mut SchemaObject,
    title: &'static str,
    description: Option<&'static str>,
) {
    // Title is always the schema name the agent is told to emit.
    let metadata = schema_object.metadata();
    metadata.title = Some(title.to_string());

    if let Some(description) = description {
        metadata.description = Some(description.to_string());
    }
}

fn apply_field_metadata(
    object_validation: &mut ObjectValidation,
    field_docs: &[(&'static str, &'static str)],
) {
    for (property, doc) in field_docs {
        if let Some(Schema::Object(field_object)) = object_validation.properties.get_mut(*property)
        {
            let metadata = field_object.metadata();
            if metadata.description.is_none() {
                metadata.description = Some((*doc).to_string());
            }
        }
    }
}
