// Profile extraction: uploaded resume document → structured Profile.
// All model calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod schema;
