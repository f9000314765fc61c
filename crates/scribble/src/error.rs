//! Error types for Scribble operations.
//!
//! This module provides the main error type [`ScribbleError`] which wraps
//! the error conditions that can occur while building or saving a document.

use std::io;

use thiserror::Error;

use scribble_core::identifier::ElementId;

use crate::document::ElementHandle;

/// The main error type for Scribble operations.
#[derive(Debug, Error)]
pub enum ScribbleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate element id `{0}`")]
    DuplicateId(ElementId),

    #[error("unknown element handle {0}")]
    UnknownElement(ElementHandle),

    #[error("an arrow needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}
