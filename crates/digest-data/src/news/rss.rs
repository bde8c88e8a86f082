//! RSS 피드 대체 소스.

use super::HeadlineSource;
use crate::error::{DataError, Result};
use crate::http::fetch_text;
use async_trait::async_trait;
use digest_core::NewsItem;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const PROVIDER: &str = "rss";

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

/// RSS 2.0 문서에서 제목과 링크가 모두 있는 항목을 추출합니다.
pub(crate) fn parse_feed(url: &str, xml: &str) -> Result<Vec<NewsItem>> {
    let document: RssDocument = quick_xml::de::from_str(xml).map_err(|e| DataError::Feed {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(document
        .channel
        .items
        .into_iter()
        .filter_map(|item| match (item.title, item.link) {
            (Some(title), Some(link)) => Some(NewsItem::new(title.trim(), link.trim())),
            _ => None,
        })
        .collect())
}

/// 제목(소문자)에 키워드 중 하나라도 포함되는지.
pub(crate) fn title_matches(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords
        .iter()
        .any(|keyword| title.contains(&keyword.to_lowercase()))
}

/// 고정 RSS 피드 목록에서 키워드로 걸러낸 헤드라인.
pub struct FeedSource<'a> {
    client: &'a Client,
    feeds: &'a [String],
    keywords: &'a [String],
}

impl<'a> FeedSource<'a> {
    pub fn new(client: &'a Client, feeds: &'a [String], keywords: &'a [String]) -> Self {
        Self {
            client,
            feeds,
            keywords,
        }
    }
}

#[async_trait]
impl HeadlineSource for FeedSource<'_> {
    /// 피드 순서대로 모두 읽습니다. 피드 간 중복 제거는 하지 않습니다.
    ///
    /// 개별 피드를 읽지 못하면 해당 피드만 건너뜁니다.
    async fn fetch_headlines(&self) -> Result<Vec<NewsItem>> {
        let mut out = Vec::new();

        for url in self.feeds {
            let entries = match fetch_text(PROVIDER, self.client.get(url)).await {
                Ok(body) => parse_feed(url, &body),
                Err(e) => Err(e),
            };

            match entries {
                Ok(entries) => {
                    let before = out.len();
                    out.extend(
                        entries
                            .into_iter()
                            .filter(|entry| title_matches(&entry.title, self.keywords)),
                    );
                    debug!(feed = %url, matched = out.len() - before, "RSS 피드 처리");
                }
                Err(e) => warn!(feed = %url, error = %e, "RSS 피드 건너뜀"),
            }
        }

        Ok(out)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
