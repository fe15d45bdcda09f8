use std::fmt;

/// Failure categories surfaced to the orchestrator. `InvalidArgument` is
/// swallowed into a no-op at the point of detection; every other kind exits
/// the block non-zero with a one-line diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Io,
    ExternalCommandFailed,
    NotFound,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid-argument",
            ErrorKind::Io => "io",
            ErrorKind::ExternalCommandFailed => "external-command-failed",
            ErrorKind::NotFound => "not-found",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
}

impl Error {
    pub fn new<M: Into<String>>(kind: ErrorKind, msg: M) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    /// Generic operational failure (reads, writes, hashing).
    pub fn msg<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::Io, msg)
    }

    pub fn invalid_argument<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::InvalidArgument, msg)
    }

    pub fn command<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::ExternalCommandFailed, msg)
    }

    pub fn not_found<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.msg)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::msg(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
