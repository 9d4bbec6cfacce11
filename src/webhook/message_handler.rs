use crate::webhook::data_types::{Ack, Inbound, ReceivedMessage, ReplyMode};
use crate::webhook::error::{Result, ValidationError};
use crate::webhook::hook_types::Update;
use crate::webhook::transport::Transport;
use log::{debug, info};
use std::sync::Arc;

/// Turns one webhook post into at most one `sendMessage` call.
///
/// Holds no per-chat state: every decision depends only on the body at hand.
#[derive(Clone)]
pub struct Handler {
    reply_mode: ReplyMode,
    transport: Arc<dyn Transport>,
}

impl Handler {
    pub fn new(reply_mode: ReplyMode, transport: Arc<dyn Transport>) -> Self {
        Self {
            reply_mode,
            transport,
        }
    }

    pub fn reply_mode(&self) -> ReplyMode {
        self.reply_mode
    }

    pub fn decode(&self, body: &[u8]) -> std::result::Result<Inbound, ValidationError> {
        let update = Update::from_slice(body)?;
        let Some(message) = update.message else {
            debug!("update {:?} carries no message", update.update_id);
            return Ok(Inbound::NoMessage);
        };
        let chat_id = message
            .chat
            .and_then(|c| c.id)
            .ok_or(ValidationError::MissingChatId)?;
        Ok(Inbound::Message(ReceivedMessage {
            chat_id,
            text: message.text,
        }))
    }

    pub async fn handle_post(&self, body: &[u8]) -> Result<Ack> {
        let message = match self.decode(body)? {
            Inbound::Message(m) => m,
            Inbound::NoMessage => return Ok(self.reply_mode.ack()),
        };

        let Some(reply) = self.reply_mode.reply_for(message.text.as_deref()) else {
            debug!("chat {} sent no text, staying silent", message.chat_id);
            return Ok(self.reply_mode.ack());
        };

        info!("replying to chat {}", message.chat_id);
        self.transport.send_message(message.chat_id, reply).await?;
        Ok(self.reply_mode.ack())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::webhook::data_types::OutboundMessage;
    use crate::webhook::error::{Error, SendError};
    use crate::webhook::transport::MockTransport;

    fn handler(mode: ReplyMode) -> (Handler, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        (Handler::new(mode, transport.clone()), transport)
    }

    fn sent(chat_id: i64, text: &str) -> OutboundMessage {
        OutboundMessage {
            chat_id,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn start_command_gets_welcome() {
        let (handler, transport) = handler(ReplyMode::Command);
        let ack = handler
            .handle_post(br#"{"message":{"chat":{"id":42},"text":"/start"}}"#)
            .await
            .unwrap();

        assert_eq!(ack, Ack::Json);
        assert_eq!(
            transport.sent(),
            vec![sent(42, "✅ Bot is now working on Vercel!")]
        );
    }

    #[tokio::test]
    async fn other_text_gets_greeting() {
        let (handler, transport) = handler(ReplyMode::Command);
        handler
            .handle_post(br#"{"message":{"chat":{"id":-1001},"text":"hello"}}"#)
            .await
            .unwrap();

        assert_eq!(
            transport.sent(),
            vec![sent(-1001, "👋 Hello! Send /start to begin.")]
        );
    }

    #[tokio::test]
    async fn echo_mode_repeats_text() {
        let (handler, transport) = handler(ReplyMode::Echo);
        let ack = handler
            .handle_post(br#"{"message":{"chat":{"id":7},"text":"hi"}}"#)
            .await
            .unwrap();

        assert_eq!(ack, Ack::Text("OK"));
        assert_eq!(transport.sent(), vec![sent(7, "You said: hi")]);
    }

    #[tokio::test]
    async fn no_message_means_no_call() {
        for mode in [ReplyMode::Command, ReplyMode::Echo] {
            let (handler, transport) = handler(mode);
            let ack = handler
                .handle_post(br#"{"update_id":1,"callback_query":{"id":"x"}}"#)
                .await
                .unwrap();

            assert_eq!(ack, mode.ack());
            assert!(transport.sent().is_empty());
        }
    }

    #[tokio::test]
    async fn echo_mode_ignores_messages_without_text() {
        let (handler, transport) = handler(ReplyMode::Echo);
        for body in [
            br#"{"message":{"chat":{"id":7}}}"#.as_slice(),
            br#"{"message":{"chat":{"id":7},"text":""}}"#.as_slice(),
        ] {
            assert_eq!(handler.handle_post(body).await.unwrap(), Ack::Text("OK"));
        }
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn command_mode_greets_message_without_text() {
        let (handler, transport) = handler(ReplyMode::Command);
        let ack = handler
            .handle_post(br#"{"update_id":1,"message":{"chat":{"id":9},"sticker":{}}}"#)
            .await
            .unwrap();

        assert_eq!(ack, Ack::Json);
        assert_eq!(
            transport.sent(),
            vec![sent(9, "👋 Hello! Send /start to begin.")]
        );
    }

    #[tokio::test]
    async fn missing_chat_id_is_rejected() {
        let (handler, transport) = handler(ReplyMode::Echo);
        for body in [
            br#"{"message":{"text":"hi"}}"#.as_slice(),
            br#"{"message":{"chat":{},"text":"hi"}}"#.as_slice(),
        ] {
            let err = handler.handle_post(body).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::MissingChatId)
            ));
        }
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (handler, transport) = handler(ReplyMode::Command);
        for body in [
            b"".as_slice(),
            b"chat=42".as_slice(),
            br#"{"message":{"chat":{"id":"42"},"text":"/start"}}"#.as_slice(),
        ] {
            let err = handler.handle_post(body).await.unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::Malformed(_))
            ));
        }
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn send_failure_is_returned() {
        let transport = Arc::new(MockTransport::failing());
        let handler = Handler::new(ReplyMode::Command, transport.clone());
        let err = handler
            .handle_post(br#"{"message":{"chat":{"id":1},"text":"/start"}}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Send(SendError::Api { .. })));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn same_update_twice_sends_twice() {
        let (handler, transport) = handler(ReplyMode::Echo);
        let body = br#"{"message":{"chat":{"id":3},"text":"again"}}"#;
        handler.handle_post(body).await.unwrap();
        handler.handle_post(body).await.unwrap();

        assert_eq!(
            transport.sent(),
            vec![sent(3, "You said: again"), sent(3, "You said: again")]
        );
    }
}
