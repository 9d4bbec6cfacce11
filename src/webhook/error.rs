use reqwest::StatusCode;
use std::fmt::{Display, Formatter};

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Validation(ValidationError),
    Send(SendError),
}

/// Inbound update rejected before any outbound call was made.
#[derive(Debug)]
pub enum ValidationError {
    Malformed(serde_json::Error),
    MissingChatId,
}

/// Outbound Bot API call failed.
#[derive(Debug)]
pub enum SendError {
    Request(reqwest::Error),
    Api {
        status: StatusCode,
        description: String,
    },
}

// region:    ---From
impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<SendError> for Error {
    fn from(err: SendError) -> Self {
        Error::Send(err)
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Malformed(err)
    }
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        SendError::Request(err)
    }
}
// endregion: ---From

// region:    --- Error boilerplate
impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "invalid update: {e}"),
            Error::Send(e) => write!(f, "sendMessage failed: {e}"),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Malformed(e) => write!(f, "malformed body: {e}"),
            ValidationError::MissingChatId => write!(f, "message.chat.id is missing"),
        }
    }
}

impl Display for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Request(e) => write!(f, "request error: {e}"),
            SendError::Api {
                status,
                description,
            } => write!(f, "api answered {status}: {description}"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for ValidationError {}
impl std::error::Error for SendError {}
// endregion: --- Error boilerplate
