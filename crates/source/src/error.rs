use core::fmt::{self, Display};
use http::{uri::InvalidUri, StatusCode};
use serde_json::error::Category;

#[derive(Debug)]
pub enum Error {
    /// The question service could not be reached.
    Transport,
    /// The question service did not answer in time.
    Timeout,
    /// The question service answered with a non-success status.
    Service(StatusCode),
    /// The configured base URL does not form a valid request.
    InvalidUri,
    /// Response declared a content type other than JSON.
    UnknownContent,
    /// JSON syntax error detected.
    Syntax,
    /// Unexpected JSON data types encountered.
    Data,
}

impl From<hyper_util::client::legacy::Error> for Error {
    fn from(_: hyper_util::client::legacy::Error) -> Self {
        Self::Transport
    }
}

impl From<hyper::Error> for Error {
    fn from(_: hyper::Error) -> Self {
        Self::Transport
    }
}

impl From<InvalidUri> for Error {
    fn from(_: InvalidUri) -> Self {
        Self::InvalidUri
    }
}

impl From<http::Error> for Error {
    fn from(_: http::Error) -> Self {
        Self::InvalidUri
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Data,
            Category::Syntax | Category::Eof => Self::Syntax,
            _ => Self::Transport,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("Could not reach the question service. Please check your connection."),
            Self::Timeout => f.write_str("The question service took too long to respond."),
            Self::Service(status) => write!(f, "The question service responded with status {status}."),
            Self::InvalidUri => f.write_str("The question service address is invalid."),
            Self::UnknownContent => f.write_str("The question service did not respond with JSON."),
            Self::Syntax => f.write_str("Syntax error in JSON detected."),
            Self::Data => f.write_str("Unexpected JSON data types detected."),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
