//! # Error Types
//!
//! This module defines the error type used throughout the senryu library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for senryu operations
#[derive(Debug, Error)]
pub enum SenryuError {
    /// A required poem field was absent or empty
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Font file missing, unreadable, or not a supported font format
    #[error("Failed to load font '{}': {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// Invalid drawing geometry
    #[error("Draw error: {0}")]
    Draw(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Server bind or serve failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
