use thiserror::Error;

/// Unified error type for gitversion operations
#[derive(Error, Debug)]
pub enum GitVersionError {
    #[error("Could not open git repository in folder {path}")]
    RepositoryNotFound {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("No git history found")]
    NoHistory,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitversion
pub type Result<T> = std::result::Result<T, GitVersionError>;

impl GitVersionError {
    /// Create a pattern error with context
    pub fn pattern(msg: impl Into<String>) -> Self {
        GitVersionError::Pattern(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersionError::Config(msg.into())
    }

    /// Process exit status for this error
    ///
    /// A missing repository exits with `1`, an empty history with `2`; every
    /// other failure exits with `3`.
    pub fn exit_code(&self) -> u8 {
        match self {
            GitVersionError::RepositoryNotFound { .. } => 1,
            GitVersionError::NoHistory => 2,
            _ => 3,
        }
    }
}
