// Profile extraction prompt. Sent alongside the document in structured-output mode.

pub const PROFILE_EXTRACTION_PROMPT: &str = "Parse the provided resume document and extract \
    the information into a structured JSON format. Act as an expert HR professional. \
    Ensure all fields in the schema are populated accurately.";
