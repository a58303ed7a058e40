use thiserror::Error;

/// Unified error type for semtagger operations
#[derive(Error, Debug)]
pub enum SemtaggerError {
    #[error("Invalid semantic version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("No remote named '{0}' found")]
    NoRemote(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semtagger
pub type Result<T> = std::result::Result<T, SemtaggerError>;

impl SemtaggerError {
    /// Create an invalid-version error for the given input
    pub fn invalid_version(input: impl Into<String>) -> Self {
        SemtaggerError::InvalidVersionFormat(input.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemtaggerError::Config(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        SemtaggerError::Branch(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        SemtaggerError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        SemtaggerError::Remote(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// Refusing to tag outside a release branch exits with 2; everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            SemtaggerError::Branch(_) => 2,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for SemtaggerError {
    fn from(err: toml::de::Error) -> Self {
        SemtaggerError::Config(err.to_string())
    }
}
