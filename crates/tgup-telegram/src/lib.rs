//! Telegram adapter (teloxide).
//!
//! This crate implements the `tgup-core` UploadTransport over the Telegram Bot API.

use std::{path::Path, time::Duration};

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InputFile, Recipient},
};

use tokio::time::sleep;

use tgup_core::{
    config::Config,
    domain::{Destination, MessageId},
    errors::Error,
    transport::port::UploadTransport,
    Result,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = concat!("tgup/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Bot API. `timeout` bounds a whole request, upload included.
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .tcp_nodelay(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::External(format!("failed to build http client: {e}")))
}

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Build a bot from `cfg` and log in. Returns the transport and the bot's username.
    ///
    /// Uploads can take minutes, so the HTTP timeout comes from `cfg.request_timeout`
    /// instead of teloxide's default.
    pub async fn connect(cfg: &Config) -> Result<(Self, String)> {
        let client = http_client(cfg.request_timeout)?;
        let bot = Bot::with_client(cfg.bot_token.clone(), client);

        let me = bot
            .get_me()
            .await
            .map_err(|e| Error::External(format!("bot login failed: {e}")))?;

        Ok((Self::new(bot), me.username().to_string()))
    }

    fn tg_recipient(destination: &Destination) -> Recipient {
        match destination {
            Destination::Id(id) => Recipient::Id(teloxide::types::ChatId(*id)),
            Destination::Username(name) => Recipient::ChannelUsername(name.clone()),
        }
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(secs) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        let wait = secs;
                        tracing::warn!("rate limited by telegram; retrying in {wait:?}");
                        sleep(wait).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl UploadTransport for TelegramTransport {
    async fn send_file(
        &self,
        destination: &Destination,
        path: &Path,
        caption: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId> {
        let msg = self
            .with_retry(|| {
                let mut req = self
                    .bot
                    .send_document(
                        Self::tg_recipient(destination),
                        InputFile::file(path.to_path_buf()),
                    )
                    .caption(caption.to_string());
                if let Some(id) = reply_to {
                    req = req.reply_to_message_id(Self::tg_msg_id(id));
                }
                req
            })
            .await?;

        Ok(MessageId(msg.id.0))
    }

    async fn send_text(
        &self,
        destination: &Destination,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId> {
        let msg = self
            .with_retry(|| {
                let mut req = self
                    .bot
                    .send_message(Self::tg_recipient(destination), text.to_string());
                if let Some(id) = reply_to {
                    req = req.reply_to_message_id(Self::tg_msg_id(id));
                }
                req
            })
            .await?;

        Ok(MessageId(msg.id.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_destinations_to_recipients() {
        assert_eq!(
            TelegramTransport::tg_recipient(&Destination::Id(-1001)),
            Recipient::Id(teloxide::types::ChatId(-1001))
        );
        assert_eq!(
            TelegramTransport::tg_recipient(&Destination::Username("@chan".to_string())),
            Recipient::ChannelUsername("@chan".to_string())
        );
    }

    #[test]
    fn maps_message_ids() {
        assert_eq!(
            TelegramTransport::tg_msg_id(MessageId(42)),
            teloxide::types::MessageId(42)
        );
    }

    #[test]
    fn http_client_builds_with_upload_timeout() {
        assert!(http_client(Duration::from_secs(600)).is_ok());
        assert!(http_client(Duration::from_millis(1)).is_ok());
    }

    #[test]
    fn bot_accepts_the_custom_client() {
        let client = http_client(Duration::from_secs(30)).unwrap();
        let bot = Bot::with_client("123:abc", client);
        assert_eq!(bot.token(), "123:abc");
    }
}
