//! Error types for Guardian Core

use crate::category::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    #[error("Invalid pattern for category '{category}': {source}")]
    InvalidPattern {
        category: Category,
        #[source]
        source: regex::Error,
    },

    #[error("Keyword table error: {0}")]
    KeywordTable(String),

    #[error("Cipher error: {0}")]
    Cipher(String),
}

pub type Result<T> = std::result::Result<T, Error>;
