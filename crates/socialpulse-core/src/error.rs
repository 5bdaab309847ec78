//! Error types for SocialPulse

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Data load error: {0}")]
    DataLoad(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No posts found for post type '{0}'")]
    EmptyCategory(String),

    #[error("Please enter a message")]
    EmptyPrompt,

    #[error("Request error: {0}")]
    Transport(#[from] TransportError),

    #[error("Parsing error: Unable to retrieve the message - {0}")]
    ResponseShape(#[from] ResponseShapeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the caller can keep going after this error.
    ///
    /// Only data loading and configuration problems stop the process; every
    /// insight failure is shown to the user as a chat message instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::EmptyCategory(_)
                | Error::EmptyPrompt
                | Error::Transport(_)
                | Error::ResponseShape(_)
        )
    }
}

/// Network or HTTP failure talking to the insight endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Request(String),
}

/// One accessor step on the path to the reply text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    Key(&'static str),
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => write!(f, "{key}"),
            PathStep::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// What went wrong at the failing step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeFault {
    /// Body was not JSON at all
    InvalidJson(String),
    MissingKey,
    IndexOutOfRange { len: usize },
    WrongType { expected: &'static str, found: &'static str },
}

/// The response did not have the documented
/// `outputs[0].outputs[0].results.message.text` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.describe())]
pub struct ResponseShapeError {
    /// Path successfully walked before the failure (empty at the root)
    pub walked: String,
    /// The step that failed, `None` when the body itself was not JSON
    pub step: Option<PathStep>,
    pub fault: ShapeFault,
}

impl ResponseShapeError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self {
            walked: String::new(),
            step: None,
            fault: ShapeFault::InvalidJson(message.into()),
        }
    }

    /// Name of the key that was missing, if that is what failed
    pub fn missing_key(&self) -> Option<&'static str> {
        match (&self.fault, self.step) {
            (ShapeFault::MissingKey, Some(PathStep::Key(key))) => Some(key),
            _ => None,
        }
    }

    fn location(&self) -> String {
        if self.walked.is_empty() {
            "response root".to_string()
        } else {
            self.walked.clone()
        }
    }

    fn describe(&self) -> String {
        match (&self.fault, self.step) {
            (ShapeFault::InvalidJson(msg), _) => format!("response is not valid JSON: {msg}"),
            (ShapeFault::MissingKey, Some(step)) => {
                format!("missing key '{}' at {}", step, self.location())
            }
            (ShapeFault::IndexOutOfRange { len }, Some(step)) => format!(
                "index {} out of range (length {}) at {}",
                step,
                len,
                self.location()
            ),
            (ShapeFault::WrongType { expected, found }, Some(step)) => format!(
                "expected {} for '{}' at {}, found {}",
                expected,
                step,
                self.location(),
                found
            ),
            (fault, None) => format!("{:?} at {}", fault, self.location()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
