use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecircleError {
    #[error("config error: {0}")]
    Config(String),

    #[error("API key is not set. Run `recircle config --set-api-key YOUR_KEY` or export GEMINI_API_KEY")]
    MissingApiKey,

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("image load error: {0}")]
    ImageLoad(String),

    #[error("inference call failed: {0}")]
    ApiCall(String),

    #[error("failed to parse model response: {0}")]
    ApiParse(String),

    #[error("detection failed, nothing analyzed: {0}")]
    Detection(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("unknown user: {0}. Run `recircle register {0}` first")]
    UnknownUser(String),

    #[error(transparent)]
    Common(#[from] recircle_common::Error),
}

pub type Result<T> = std::result::Result<T, RecircleError>;
