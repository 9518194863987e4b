use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the audit core and its resolvers.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A `regex:` entry of the denylist does not compile
    #[error("invalid forbidden license pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// License metadata for an artifact could not be produced
    #[error("cannot resolve licenses of {coordinate}: {reason}")]
    Resolution { coordinate: String, reason: String },

    /// The dependency graph file is missing or malformed
    #[error("invalid dependency graph {}: {reason}", path.display())]
    Graph { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, AuditError>;
