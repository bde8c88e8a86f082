//! 테마 이미지 URL.
//!
//! Unsplash 접근 키가 있으면 랜덤 사진 API를 호출하고,
//! 없으면 네트워크 호출 없이 고정 템플릿 URL을 사용합니다.

use crate::error::Result;
use crate::http::fetch_json;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info};

const PROVIDER: &str = "unsplash";

/// 키가 없을 때 사용하는 고정 이미지 URL.
pub const STATIC_IMAGE_URL: &str = "https://source.unsplash.com/1200x400/?finance,abstract";

#[derive(Debug, Deserialize)]
struct RandomPhoto {
    #[serde(default)]
    urls: PhotoUrls,
}

#[derive(Debug, Default, Deserialize)]
struct PhotoUrls {
    #[serde(default)]
    regular: String,
}

/// 이미지 설정.
#[derive(Debug)]
pub struct ImageConfig {
    /// Unsplash 랜덤 사진 URL
    pub api_url: String,
    /// Unsplash 접근 키
    pub access_key: Option<SecretString>,
    /// 검색어
    pub query: String,
    /// 키가 없을 때 쓸 URL
    pub static_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.unsplash.com/photos/random".to_string(),
            access_key: None,
            query: "finance abstract".to_string(),
            static_url: STATIC_IMAGE_URL.to_string(),
        }
    }
}

/// 이미지 URL 조회기.
pub struct ImageFetcher<'a> {
    client: &'a Client,
    config: &'a ImageConfig,
}

impl<'a> ImageFetcher<'a> {
    pub fn new(client: &'a Client, config: &'a ImageConfig) -> Self {
        Self { client, config }
    }

    /// 이미지 URL. API 응답에 `urls.regular`가 없으면 빈 문자열.
    pub async fn fetch(&self) -> Result<String> {
        let Some(key) = &self.config.access_key else {
            debug!("Unsplash 키 없음, 고정 URL 사용");
            return Ok(self.config.static_url.clone());
        };

        let request = self
            .client
            .get(&self.config.api_url)
            .header("Authorization", format!("Client-ID {}", key.expose_secret()))
            .query(&[
                ("query", self.config.query.as_str()),
                ("orientation", "landscape"),
            ]);

        let photo: RandomPhoto = fetch_json(PROVIDER, request).await?;
        info!(empty = photo.urls.regular.is_empty(), "이미지 URL 조회 완료");
        Ok(photo.urls.regular)
    }
}
