//! Profile Extractor: sends an uploaded resume to the model in structured-output mode
//! and validates the result before handing back a `Profile`.

use base64::Engine as _;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::schema::schema_violations;
use crate::llm_client::{strip_json_fences, GenerativeModel, LlmError, ModelRequest};
use crate::models::profile::Profile;
use crate::profile::prompts::PROFILE_EXTRACTION_PROMPT;
use crate::profile::schema::profile_schema;

/// A resume file read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub media_type: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Only images and PDFs are accepted, and the file must not be empty.
    pub fn validate(&self) -> Result<(), AppError> {
        let media_type = self.media_type.to_ascii_lowercase();
        if !(media_type.starts_with("image/") || media_type == "application/pdf") {
            return Err(AppError::Validation(format!(
                "Unsupported file type '{}'. Upload an image or a PDF.",
                self.media_type
            )));
        }
        if self.bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        Ok(())
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Extracts a profile from the document. One model call, no retry.
pub async fn extract_profile(
    llm: &dyn GenerativeModel,
    model: &str,
    document: &UploadedDocument,
) -> Result<Profile, AppError> {
    document.validate()?;

    let request = ModelRequest::new(model)
        .text(PROFILE_EXTRACTION_PROMPT)
        .inline_data(&document.media_type, document.to_base64())
        .structured(profile_schema());

    info!(
        "Extracting profile from {} upload ({} bytes)",
        document.media_type,
        document.bytes.len()
    );
    let response = llm.generate(&request).await.map_err(|e| match e {
        LlmError::EmptyContent => AppError::Parse("empty model response".to_string()),
        other => AppError::Transport(other),
    })?;

    decode_profile(&response.text)
}

/// Decodes model output into a `Profile`, rejecting anything that does not match
/// the extraction schema.
pub fn decode_profile(text: &str) -> Result<Profile, AppError> {
    let value: serde_json::Value = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| AppError::Parse(format!("response is not valid JSON: {e}")))?;

    let violations = schema_violations(&profile_schema(), &value);
    if !violations.is_empty() {
        return Err(AppError::Parse(format!(
            "response does not match the profile schema ({})",
            violations.join("; ")
        )));
    }

    serde_json::from_value(value).map_err(|e| AppError::Parse(e.to_string()))
}
