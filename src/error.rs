//! Error types shared across the crate
//!
//! Descriptor and version errors never leave the analyzers: they are folded
//! into a negative classification. Only marker persistence failures reach
//! callers of the classifier.

use std::path::PathBuf;
use thiserror::Error;

/// A version token that cannot be ordered against another version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Version string is empty")]
    Empty,

    #[error("Invalid character {character:?} in version {version:?}")]
    InvalidCharacter { version: String, character: char },
}

/// Failures while fetching or parsing a build descriptor
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Descriptor file missing or not readable
    #[error("Failed to read descriptor {path:?}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// Descriptor content is not well-formed
    #[error("Malformed descriptor: {0}")]
    Malformed(String),
}

impl From<roxmltree::Error> for DescriptorError {
    fn from(err: roxmltree::Error) -> Self {
        DescriptorError::Malformed(err.to_string())
    }
}

/// Failures reading or writing the project's nature list
#[derive(Debug, Error)]
pub enum NatureError {
    #[error("Failed to read project metadata {path:?}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Project metadata {path:?} is malformed: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Project metadata {path:?} rejected the write: {message}")]
    WriteRejected { path: PathBuf, message: String },
}

/// Errors surfaced by the classifier
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The nature marker could not be read or reconciled on the project
    #[error("Failed to persist Liberty marker for project '{project}': {source}")]
    MarkerPersistence {
        project: String,
        #[source]
        source: NatureError,
    },
}
