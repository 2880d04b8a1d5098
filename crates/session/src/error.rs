use core::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// The operation does not apply to the session's current phase.
    InvalidState,
    /// Selected option is not one of the question's options.
    OutOfRange,
    /// There is no previous topic to retake.
    NoTopic,
    /// The question service returned no questions for the topic.
    EmptyResult,
    /// Questions could not be loaded.
    Source(source::error::Error),
}

impl From<source::error::Error> for Error {
    fn from(err: source::error::Error) -> Self {
        Self::Source(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState => f.write_str("That action is not available right now."),
            Self::OutOfRange => f.write_str("There is no such option."),
            Self::NoTopic => f.write_str("No quiz has been started yet."),
            Self::EmptyResult => f.write_str("No questions available for this topic. Please try another quiz."),
            Self::Source(err) => write!(f, "Failed to load quiz questions. {err}"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
