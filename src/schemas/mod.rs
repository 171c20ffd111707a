pub mod schema;
pub mod validation;
pub mod validator;

pub use schema::{apply_doc_comments, ReplySchema, SchemaHandle};
pub use validation::validate_against_schema;
pub use validator::ValidationMode;
