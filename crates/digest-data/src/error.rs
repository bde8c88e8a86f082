//! 데이터 수집 오류 타입.

use thiserror::Error;

/// 데이터 수집 오류.
///
/// 모든 변형은 실패한 제공자(provider) 이름을 포함합니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 전송 오류
    #[error("HTTP request failed ({provider}): {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx가 아닌 응답
    #[error("Unexpected status from {provider}: HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// JSON 디코딩 오류
    #[error("Decode error ({provider}): {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    /// 필드 누락 또는 잘못된 값
    #[error("Missing or invalid field ({provider}): {field}")]
    MissingField {
        provider: &'static str,
        field: String,
    },

    /// 미러 HTML에서 셀렉터를 찾지 못함
    #[error("Scrape error ({account}): selector `{selector}` not found")]
    Scrape { account: String, selector: String },

    /// RSS 피드 파싱 오류
    #[error("Feed parse error ({url}): {message}")]
    Feed { url: String, message: String },
}

impl DataError {
    pub(crate) fn missing(provider: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            provider,
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
