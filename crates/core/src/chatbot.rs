//! Chatbot suggestion and knowledge-document input validation.
//!
//! All validation is local and fails fast: an invalid form never reaches
//! the network.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Form fields for creating or updating a chatbot suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionInput {
    /// Emoji displayed next to the suggestion.
    pub icon: String,
    /// The suggestion text shown to users.
    pub text: String,
    /// Display order within the suggestion list.
    pub order: i32,
    pub is_active: bool,
}

/// Both `icon` and `text` are required.
pub fn validate_suggestion_input(input: &SuggestionInput) -> Result<(), CoreError> {
    if input.icon.trim().is_empty() || input.text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Suggestion icon and text are both required".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Form fields for uploading a chatbot knowledge document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// File name as picked by the user, e.g. `"faq.pdf"`.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Display title; defaults to the file name without its extension.
    pub title: String,
}

/// A document upload needs a non-empty title and a non-empty file.
pub fn validate_document_upload(upload: &DocumentUpload) -> Result<(), CoreError> {
    if upload.title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Document title is required".to_string(),
        ));
    }
    if upload.bytes.is_empty() {
        return Err(CoreError::Validation(
            "Document file is required".to_string(),
        ));
    }
    Ok(())
}

/// Default document title: the file name minus its final extension, or
/// the whole name when there is none.
pub fn default_title_from_filename(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(0) | None => file_name.to_string(),
        Some(dot) => file_name[..dot].to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
