//! # Digest Notification
//!
//! 다이제스트 메시지 조립과 전송.
//!
//! - `MessageComposer`: 지표/뉴스/게시물/이미지를 고정 템플릿의 Markdown 텍스트로 조립
//! - `TelegramSender`: Telegram Bot API로 채널 하나에 메시지 전송

pub mod composer;
pub mod telegram;
pub mod types;

pub use composer::*;
pub use telegram::*;
pub use types::*;
