// Job discovery: profile + filters → web-grounded search → ranked job postings.
// All model calls go through llm_client.

pub mod engine;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod schema;
