//! 전송 trait 및 에러 정의.

use async_trait::async_trait;
use digest_core::ComposedMessage;

/// 전송 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 전송 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("메시지 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도 가능")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[source] reqwest::Error),
}

/// 요청 URL에 봇 토큰이 들어가므로 URL을 제거한 뒤 감쌉니다.
impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkError(err.without_url())
    }
}

/// 메시지 전송기 trait.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// 메시지를 전송합니다. 실패해도 재시도하지 않습니다.
    async fn send(&self, message: &ComposedMessage) -> NotificationResult<()>;

    /// 전송에 필요한 설정이 모두 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}
