//! 공통 HTTP 헬퍼.

use crate::error::{DataError, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

/// 오류 메시지에 담을 응답 본문 최대 길이.
const MAX_ERROR_BODY: usize = 300;

/// 요청을 보내고 본문을 문자열로 받습니다. 2xx가 아니면 오류.
pub(crate) async fn fetch_text(provider: &'static str, request: RequestBuilder) -> Result<String> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(provider, e))?;

    if !status.is_success() {
        return Err(DataError::Status {
            provider,
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        });
    }

    debug!(provider, status = status.as_u16(), bytes = body.len(), "응답 수신");
    Ok(body)
}

/// 쿼리 문자열에 API 키가 실리므로 URL은 오류에 남기지 않습니다.
fn transport_error(provider: &'static str, err: reqwest::Error) -> DataError {
    DataError::Http {
        provider,
        source: err.without_url(),
    }
}

/// 요청을 보내고 JSON 본문을 `T`로 디코딩합니다.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let body = fetch_text(provider, request).await?;
    serde_json::from_str(&body).map_err(|e| DataError::Decode {
        provider,
        message: e.to_string(),
    })
}
