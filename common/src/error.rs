use thiserror::Error;

/// Reasons a card generation request is not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    #[error("Please upload data first")]
    MissingData,

    #[error("Please add at least one field mapping")]
    NoFieldMappings,

    #[error(
        "The following mapped fields are not found in the uploaded data: {}. Update mappings or upload matching data.",
        .0.join(", ")
    )]
    UnmatchedFields(Vec<String>),
}

/// A selected file that the upload form refuses before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRuleError {
    #[error("{0}")]
    UnsupportedType(&'static str),

    #[error("File size must be less than {limit_label}")]
    TooLarge { limit_label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    MissingPrefix,

    #[error("data URL is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A form field that failed validation, with the message shown beside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: &'static str,
}
