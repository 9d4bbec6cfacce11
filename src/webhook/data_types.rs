use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub chat_id: i64,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Message(ReceivedMessage),
    NoMessage,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
}

/// How the bot picks its reply and how it acknowledges a webhook post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyMode {
    /// `/start` gets a welcome, everything else a fixed greeting. Ack is `{"ok":true}`.
    #[default]
    Command,
    /// Echoes the text back. Ack is plain `OK`.
    Echo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    Json,
    Text(&'static str),
}
