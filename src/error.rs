use crate::webhook::error::SendError;
use std::fmt::{Display, Formatter};

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    // -- Config
    ConfigMissingEnv(&'static str),
    ConfigWrongFormat(&'static str),
    // -- Bot API client
    Client(SendError),
    // -- Server
    Bind(String, std::io::Error),
    Serve(std::io::Error),
}

// region:    --- Error boilerplate
impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConfigMissingEnv(name) => write!(f, "missing environment variable {name}"),
            Error::ConfigWrongFormat(name) => write!(f, "environment variable {name} has wrong format"),
            Error::Client(e) => write!(f, "failed to build Bot API client: {e}"),
            Error::Bind(addr, e) => write!(f, "failed to bind {addr}: {e}"),
            Error::Serve(e) => write!(f, "server exited: {e}"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error boilerplate
