//! Error handling for the resume ATS analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeAtsError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeAtsError {
    fn from(err: anyhow::Error) -> Self {
        ResumeAtsError::AnalysisFailed(err.to_string())
    }
}
