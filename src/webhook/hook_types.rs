use serde::Deserialize;

// Only the fields the bot reads. Telegram sends many more; serde ignores them.

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Option<Chat>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: Option<i64>,
    pub message: Option<Message>,
}

impl Update {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Update> {
        serde_json::from_slice(body)
    }
}
