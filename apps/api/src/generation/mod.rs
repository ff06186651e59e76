// Advisory text generation: cover-letter openings and follow-up emails.
// Plain-text answers; all model calls go through llm_client.

pub mod cover_letter;
pub mod follow_up;
pub mod handlers;
pub mod prompts;
