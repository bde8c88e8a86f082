//! NewsAPI `top-headlines` 소스.

use super::{HeadlineSource, NewsConfig};
use crate::error::{DataError, Result};
use crate::http::fetch_json;
use async_trait::async_trait;
use digest_core::{NewsItem, MAX_NEWS_ITEMS};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::warn;

const PROVIDER: &str = "newsapi";

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
    url: String,
}

/// NewsAPI 헤드라인 검색.
pub struct NewsApiSource<'a> {
    client: &'a Client,
    url: &'a str,
    api_key: &'a SecretString,
    language: &'a str,
    keywords: &'a [String],
    page_size: usize,
}

impl<'a> NewsApiSource<'a> {
    pub fn new(client: &'a Client, config: &'a NewsConfig, api_key: &'a SecretString) -> Self {
        Self {
            client,
            url: &config.newsapi_url,
            api_key,
            language: &config.language,
            keywords: &config.keywords,
            page_size: config.limit.min(MAX_NEWS_ITEMS),
        }
    }

    fn query(&self) -> String {
        self.keywords.join(" OR ")
    }
}

#[async_trait]
impl HeadlineSource for NewsApiSource<'_> {
    /// API가 오류 상태(잘못된 키, 한도 초과 등)를 반환하면 빈 목록으로 취급해
    /// RSS 대체 경로로 넘어갑니다. 전송 오류는 그대로 반환합니다.
    async fn fetch_headlines(&self) -> Result<Vec<NewsItem>> {
        let request = self.client.get(self.url).query(&[
            ("apiKey", self.api_key.expose_secret().to_string()),
            ("language", self.language.to_string()),
            ("q", self.query()),
            ("pageSize", self.page_size.to_string()),
        ]);

        let response: HeadlinesResponse = match fetch_json(PROVIDER, request).await {
            Ok(response) => response,
            Err(DataError::Status { status, body, .. }) => {
                warn!(status, %body, "NewsAPI 오류 응답, 빈 결과로 처리");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        Ok(response
            .articles
            .into_iter()
            .map(|a| NewsItem::new(a.title, a.url))
            .collect())
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
