use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a controller profile.
///
/// Unknown input/output identifiers are never errors; they just yield absent names.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile file does not exist. Callers usually treat this as "no custom mapping".
    #[error("profile not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not well-formed XML. No partial model is produced.
    #[error("parse profile XML: {0}")]
    Parse(#[from] roxmltree::Error),

    /// Well-formed XML that lacks the containers a profile must have.
    #[error("malformed profile: {0}")]
    MalformedSchema(String),
}

impl ProfileError {
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::NotFound(_))
    }
}
