use crate::webhook::data_types::{Ack, ReplyMode};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const START_COMMAND: &str = "/start";

const WELCOME: &str = "✅ Bot is now working on Vercel!";
const GREETING: &str = "👋 Hello! Send /start to begin.";
const ECHO_PREFIX: &str = "You said: ";

const RUNNING_COMMAND: &str = "Bot is running ✅";
const RUNNING_ECHO: &str = "Bot is running";
const OK_TEXT: &str = "OK";

impl ReplyMode {
    /// Reply text for an inbound message, `None` when the bot stays silent.
    pub fn reply_for(&self, text: Option<&str>) -> Option<String> {
        match self {
            ReplyMode::Command => match text {
                Some(START_COMMAND) => Some(WELCOME.to_owned()),
                _ => Some(GREETING.to_owned()),
            },
            ReplyMode::Echo => match text {
                Some(t) if !t.is_empty() => Some(format!("{ECHO_PREFIX}{t}")),
                _ => None,
            },
        }
    }

    pub fn running_banner(&self) -> &'static str {
        match self {
            ReplyMode::Command => RUNNING_COMMAND,
            ReplyMode::Echo => RUNNING_ECHO,
        }
    }

    pub fn ack(&self) -> Ack {
        match self {
            ReplyMode::Command => Ack::Json,
            ReplyMode::Echo => Ack::Text(OK_TEXT),
        }
    }
}

impl FromStr for ReplyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "command" | "start" => Ok(ReplyMode::Command),
            "echo" => Ok(ReplyMode::Echo),
            other => Err(format!("unknown reply mode: {other}")),
        }
    }
}

impl Display for ReplyMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyMode::Command => write!(f, "command"),
            ReplyMode::Echo => write!(f, "echo"),
        }
    }
}
