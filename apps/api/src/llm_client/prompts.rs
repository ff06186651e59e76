// Shared prompt fragments.
// Each component that calls the model keeps its own prompts.rs alongside it;
// this file holds the cross-cutting pieces.

/// Appended to prompts whose answer is parsed as JSON in free-text mode.
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT: Respond with ONLY a valid JSON array \
    that conforms to the following schema. Do not include any other text, markdown, or \
    explanations before or after the JSON.";

/// Renders a labelled, pretty-printed JSON block for embedding in a prompt.
pub fn json_block<T: serde::Serialize>(label: &str, value: &T) -> serde_json::Result<String> {
    Ok(format!("{label}:\n{}", serde_json::to_string_pretty(value)?))
}
