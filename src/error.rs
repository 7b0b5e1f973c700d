use std::backtrace::Backtrace;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub backtrace: Backtrace,
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(e: E) -> Self {
        Self {
            kind: e.into(),
            backtrace: Backtrace::capture(),
        }
    }
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    InputUnavailable(#[from] InputUnavailable),
    #[error("{0}")]
    InvalidParameter(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode {destination}: {reason}")]
    Encode { destination: String, reason: String },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Why no input bytes could be obtained.
#[derive(Debug, thiserror::Error)]
pub enum InputUnavailable {
    #[error("No data read from stdin.")]
    EmptyStream,
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {descriptor}: {cause}")]
    Unreadable {
        descriptor: String,
        cause: std::io::Error,
    },
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        ErrorKind::Usage(message.into()).into()
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        ErrorKind::InvalidParameter(message.into()).into()
    }

    pub fn decode(message: impl std::fmt::Display) -> Self {
        ErrorKind::Decode(message.to_string()).into()
    }

    pub fn encode(destination: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        ErrorKind::Encode {
            destination: destination.to_string(),
            reason: reason.to_string(),
        }
        .into()
    }

    /// Process exit status for this failure. Scripts branch on these, so
    /// the values are fixed.
    pub fn exit_code(&self) -> u8 {
        match &self.kind {
            ErrorKind::Usage(_) => 1,
            ErrorKind::InputUnavailable(InputUnavailable::EmptyStream) => 2,
            ErrorKind::InputUnavailable(InputUnavailable::NotFound(_)) => 3,
            ErrorKind::InputUnavailable(InputUnavailable::Unreadable { .. }) => 4,
            ErrorKind::Decode(_) => 5,
            ErrorKind::Encode { .. } | ErrorKind::Io(_) => 6,
            ErrorKind::InvalidParameter(_) => 7,
        }
    }
}
