//! 뉴스 헤드라인 수집.
//!
//! 1차: 헤드라인 검색 API (NewsAPI). 키가 없거나 결과가 비면
//! 2차: RSS 피드에서 키워드가 제목에 포함된 항목만 고릅니다.
//!
//! 이전 실행에서 보낸 헤드라인은 기억하지 않으므로 같은 기사가 반복될 수 있습니다.

mod newsapi;
mod rss;

pub use newsapi::NewsApiSource;
pub use rss::FeedSource;

use crate::error::Result;
use async_trait::async_trait;
use digest_core::{NewsItem, MAX_NEWS_ITEMS};
use reqwest::Client;
use secrecy::SecretString;
use tracing::{debug, info};

/// 헤드라인 소스 trait.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// 헤드라인을 소스 순서대로 반환합니다.
    async fn fetch_headlines(&self) -> Result<Vec<NewsItem>>;

    /// 로그용 소스 이름.
    fn name(&self) -> &str;
}

/// 뉴스 수집 설정.
#[derive(Debug)]
pub struct NewsConfig {
    /// NewsAPI `top-headlines` URL
    pub newsapi_url: String,
    /// NewsAPI 키 (없으면 1차 소스를 건너뜀)
    pub newsapi_key: Option<SecretString>,
    /// 1차 소스 언어 필터
    pub language: String,
    /// 1차 소스 검색 키워드 (OR 결합)
    pub keywords: Vec<String>,
    /// 2차 소스 RSS 피드 URL 목록
    pub feeds: Vec<String>,
    /// 2차 소스 제목 필터 (소문자 부분 일치)
    pub feed_keywords: Vec<String>,
    /// 최대 헤드라인 수
    pub limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            newsapi_url: "https://newsapi.org/v2/top-headlines".to_string(),
            newsapi_key: None,
            language: "ru".to_string(),
            keywords: ["экономика", "политика", "крипто", "биржа"]
                .map(String::from)
                .to_vec(),
            feeds: [
                "http://feeds.reuters.com/reuters/businessNews",
                "https://www.ft.com/?edition=international&format=rss",
                "http://feeds.bbci.co.uk/news/world/rss.xml",
            ]
            .map(String::from)
            .to_vec(),
            feed_keywords: ["econom", "polit", "crypto", "market"]
                .map(String::from)
                .to_vec(),
            limit: MAX_NEWS_ITEMS,
        }
    }
}

/// 뉴스 수집기.
pub struct NewsFetcher<'a> {
    primary: Option<Box<dyn HeadlineSource + 'a>>,
    fallback: Box<dyn HeadlineSource + 'a>,
    limit: usize,
}

impl<'a> NewsFetcher<'a> {
    /// 설정으로부터 NewsAPI + RSS 수집기를 만듭니다.
    pub fn new(client: &'a Client, config: &'a NewsConfig) -> Self {
        let primary = config.newsapi_key.as_ref().map(|key| {
            Box::new(NewsApiSource::new(client, config, key)) as Box<dyn HeadlineSource + 'a>
        });
        let fallback = Box::new(FeedSource::new(
            client,
            &config.feeds,
            &config.feed_keywords,
        ));

        Self::with_sources(primary, fallback, config.limit)
    }

    /// 임의의 소스 조합으로 수집기를 만듭니다.
    ///
    /// 헤드라인 수는 항상 `MAX_NEWS_ITEMS` 이하로 제한됩니다.
    pub fn with_sources(
        primary: Option<Box<dyn HeadlineSource + 'a>>,
        fallback: Box<dyn HeadlineSource + 'a>,
        limit: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            limit: limit.min(MAX_NEWS_ITEMS),
        }
    }

    /// 헤드라인을 최대 `limit`개 반환합니다.
    ///
    /// 2차 소스는 1차 소스가 빈 목록을 반환했을 때만 호출됩니다.
    pub async fn fetch(&self) -> Result<Vec<NewsItem>> {
        match &self.primary {
            Some(primary) => {
                let mut items = primary.fetch_headlines().await?;
                if !items.is_empty() {
                    items.truncate(self.limit);
                    info!(source = primary.name(), count = items.len(), "뉴스 수집 완료");
                    return Ok(items);
                }
                info!(
                    source = primary.name(),
                    fallback = self.fallback.name(),
                    "헤드라인 결과 없음, 대체 소스 사용"
                );
            }
            None => debug!("헤드라인 API 미설정, 대체 소스 사용"),
        }

        let mut items = self.fallback.fetch_headlines().await?;
        items.truncate(self.limit);
        info!(source = self.fallback.name(), count = items.len(), "뉴스 수집 완료");
        Ok(items)
    }
}
