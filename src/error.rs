use std::fmt;

use thiserror::Error;

/// Identity field managed in git config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
}

impl Field {
    /// Git config key backing this field
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "user.name",
            Field::Email => "user.email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Email => f.write_str("email"),
        }
    }
}

/// Git config scope an identity field is read from or written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Local,
    Global,
}

impl Scope {
    pub fn from_global(global: bool) -> Self {
        if global { Scope::Global } else { Scope::Local }
    }

    /// Command line flag selecting this scope
    pub fn flag(self) -> &'static str {
        match self {
            Scope::Local => "--local",
            Scope::Global => "--global",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => f.write_str("local"),
            Scope::Global => f.write_str("global"),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Git could not be launched or exited with an unexpected status
    #[error("`{command}` failed: {message}")]
    ExternalTool { command: String, message: String },
    /// Error when current directory is not a Git repository
    #[error("not a git repository")]
    NotInGitRepository,
    /// Repository has no `remote.origin.url`
    #[error("repository has no origin remote")]
    OriginNotConfigured,
    /// Identity field has no value at the given scope
    #[error("no {scope} {field} set")]
    NotSet { field: Field, scope: Scope },
    /// Unset requested for a field that has no value
    #[error("no {scope} {field} to unset")]
    NothingToUnset { field: Field, scope: Scope },
    #[error("profile '{0}' already exists")]
    DuplicateProfile(String),
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
    /// Error during input validation.
    #[error("validation error: {0}")]
    Validation(String),
}
