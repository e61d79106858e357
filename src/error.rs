//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ExecutionError: an external command failed to run or exited abnormally
//! - ParseError: the module listing text violated the expected line structure
//! - VersionParseError: a captured version substring is not valid semver
//! - ChangelogError: changelog resolution failures, with "not found" kept
//!   distinct from transport failures
//! - TransportError: the search request itself failed

use std::fmt;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// External command execution errors
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Module listing parse errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Changelog resolution errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Interactive prompt errors
    #[error("selection prompt failed: {message}")]
    Prompt { message: String },
}

/// An external command failed to spawn or exited abnormally
#[derive(Error, Debug)]
#[error("executing command '{command}': {message}")]
pub struct ExecutionError {
    /// The full command line that was attempted
    pub command: String,
    /// Spawn error or captured stderr
    pub message: String,
}

impl ExecutionError {
    /// Creates a new execution error for the given command line
    pub fn new(command: impl Into<String>, message: impl Into<String>) -> Self {
        ExecutionError {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// The listing text violated the expected line structure.
///
/// Parsing is fail-fast: the first bad line aborts the whole batch and no
/// partial module list is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The configured module pattern is unusable
    #[error("invalid module pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A non-skippable line did not match the module pattern
    #[error("line {line_number} does not match the module pattern: {line:?}")]
    UnmatchedLine { line_number: usize, line: String },

    /// A matched line carried an invalid version capture
    #[error(transparent)]
    Version(#[from] VersionParseError),
}

impl ParseError {
    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ParseError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnmatchedLine error
    pub fn unmatched_line(line_number: usize, line: impl Into<String>) -> Self {
        ParseError::UnmatchedLine {
            line_number,
            line: line.into(),
        }
    }
}

/// Which version capture of a listing line failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSide {
    /// The currently-required version
    From,
    /// The available upgrade version
    To,
}

impl fmt::Display for VersionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSide::From => write!(f, "from"),
            VersionSide::To => write!(f, "to"),
        }
    }
}

/// A captured version substring is not valid semantic version text
#[derive(Error, Debug)]
#[error("line {line_number}: invalid {side} version {text:?}: {source}")]
pub struct VersionParseError {
    /// 1-based line number within the listing
    pub line_number: usize,
    /// Which side of the upgrade failed to parse
    pub side: VersionSide,
    /// The offending capture text
    pub text: String,
    /// Underlying semver parse error
    #[source]
    pub source: semver::Error,
}

/// The search request itself failed (connectivity, HTTP status, decode)
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the failure
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
        }
    }
}

/// Changelog resolution failed for one module.
///
/// Transport failures are kept distinct from "not found" so callers can tell
/// "we don't know" apart from "we know there is none".
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// The module name carries no recognizable repository path
    #[error("module name {module:?} does not contain a github.com repository path")]
    UnresolvableIdentity { module: String },

    /// The search exchange failed before any result could be judged
    #[error("changelog search for {module:?} failed: {source}")]
    Transport {
        module: String,
        #[source]
        source: TransportError,
    },

    /// The search succeeded but no root-level changelog exists
    #[error("no root-level changelog found for {module:?}")]
    NotFound { module: String },
}

impl ChangelogError {
    /// Creates a new UnresolvableIdentity error
    pub fn unresolvable_identity(module: impl Into<String>) -> Self {
        ChangelogError::UnresolvableIdentity {
            module: module.into(),
        }
    }

    /// Creates a new Transport error
    pub fn transport(module: impl Into<String>, source: TransportError) -> Self {
        ChangelogError::Transport {
            module: module.into(),
            source,
        }
    }

    /// Creates a new NotFound error
    pub fn not_found(module: impl Into<String>) -> Self {
        ChangelogError::NotFound {
            module: module.into(),
        }
    }

    /// Returns true if the search succeeded but found no authoritative result
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChangelogError::NotFound { .. })
    }
}
