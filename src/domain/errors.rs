// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of the external natural-language translation call.
///
/// Every variant is terminal for the current build attempt; nothing is retried.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response contained no choices")]
    EmptyChoices,

    #[error("Completion response message was empty")]
    EmptyContent,

    #[error("Failed to parse response as strategy IR: {0}")]
    Parse(String),

    #[error("Completion request timed out after {0}s")]
    Timeout(u64),
}

#[derive(Error, Debug, PartialEq)]
pub enum CompileError {
    /// Raised only when unvalidated input reaches the compiler.
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type TranslationResult<T> = Result<T, TranslationError>;
pub type CompileResult<T> = Result<T, CompileError>;
