//! 텔레그램 전송.
//!
//! Telegram Bot API `sendMessage`로 채널 하나에 다이제스트를 보냅니다.
//! 긴 메시지 분할, 재시도, 전달 확인은 하지 않습니다.

use crate::types::{MessageSender, NotificationError, NotificationResult};
use async_trait::async_trait;
use digest_core::ComposedMessage;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};

/// 429 응답에 `retry_after`가 없을 때 보고할 대기 시간 (초).
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// 텔레그램 전송 설정.
#[derive(Debug)]
pub struct TelegramConfig {
    /// Bot API 루트 URL
    pub api_url: String,
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: SecretString,
    /// 메시지를 보낼 채팅/채널 ID
    pub chat_id: String,
    /// 파싱 모드 (MarkdownV2, Markdown, HTML)
    pub parse_mode: String,
    /// 링크 미리보기 끄기
    pub disable_web_page_preview: bool,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: SecretString, chat_id: impl Into<String>) -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            bot_token,
            chat_id: chat_id.into(),
            parse_mode: "MarkdownV2".to_string(),
            disable_web_page_preview: false,
        }
    }
}

/// 텔레그램 메시지 전송기.
pub struct TelegramSender<'a> {
    config: &'a TelegramConfig,
    client: Client,
}

impl<'a> TelegramSender<'a> {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: &'a TelegramConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token.expose_secret()
        );

        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
            "disable_web_page_preview": self.config.disable_web_page_preview,
        });

        debug!(
            chat_id = %self.config.chat_id,
            chars = text.chars().count(),
            "Sending Telegram message"
        );

        let response = self.client.post(&url).json(&params).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            info!("Telegram message sent");
            return Ok(());
        }

        if status.as_u16() == 429 {
            let retry_after = retry_after_secs(&body);
            warn!(retry_after, "Telegram rate limited");
            return Err(NotificationError::RateLimited(retry_after));
        }

        error!("Failed to send Telegram message: {} - {}", status, body);
        Err(NotificationError::SendFailed(format!(
            "HTTP {}: {}",
            status, body
        )))
    }
}

/// 429 응답 본문의 `parameters.retry_after`.
fn retry_after_secs(body: &str) -> u64 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/parameters/retry_after")?.as_u64())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[async_trait]
impl MessageSender for TelegramSender<'_> {
    async fn send(&self, message: &ComposedMessage) -> NotificationResult<()> {
        if !self.is_enabled() {
            return Err(NotificationError::InvalidConfig(
                "bot token and chat_id must not be empty".to_string(),
            ));
        }

        self.send_message(&message.text).await
    }

    fn is_enabled(&self) -> bool {
        !self.config.bot_token.expose_secret().is_empty()
            && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
