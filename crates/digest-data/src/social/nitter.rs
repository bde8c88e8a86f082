//! Nitter 미러 타임라인 크롤링.
//!
//! 공식 API 없이 미러 사이트의 렌더링된 HTML에서 게시물을 추출합니다.
//! 타임라인 항목 안에서 셀렉터 하나라도 빠지면 해당 계정 전체가 실패합니다.

use super::PostSource;
use crate::error::{DataError, Result};
use crate::http::fetch_text;
use async_trait::async_trait;
use digest_core::SocialPost;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

const PROVIDER: &str = "nitter";
const ORIGIN: &str = "https://twitter.com";

const ITEM: &str = ".timeline-item";
const CONTENT: &str = ".tweet-content";
const DATETIME: &str = "a.datetime";
const DATETIME_FALLBACK: &str = ".tweet-date a";
const LINK: &str = "a.tweet-link";

/// 미러 HTML 소스.
pub struct MirrorSource<'a> {
    client: &'a Client,
    base_url: &'a str,
}

impl<'a> MirrorSource<'a> {
    pub fn new(client: &'a Client, base_url: &'a str) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl PostSource for MirrorSource<'_> {
    async fn fetch_posts(&self, account: &str, limit: usize) -> Result<Vec<SocialPost>> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), account);
        let html = fetch_text(PROVIDER, self.client.get(url)).await?;
        parse_timeline(account, &html, limit)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// 타임라인 HTML에서 앞쪽 `limit`개 게시물을 추출합니다.
pub(crate) fn parse_timeline(account: &str, html: &str, limit: usize) -> Result<Vec<SocialPost>> {
    let document = Html::parse_document(html);

    let item_selector = selector(account, ITEM)?;
    let content_selector = selector(account, CONTENT)?;
    let datetime_selector = selector(account, DATETIME)?;
    let datetime_fallback = selector(account, DATETIME_FALLBACK)?;
    let link_selector = selector(account, LINK)?;

    document
        .select(&item_selector)
        .take(limit)
        .map(|item| {
            let text = first(account, item, &content_selector, CONTENT).map(collapsed_text)?;

            let timestamp = item
                .select(&datetime_selector)
                .next()
                .or_else(|| item.select(&datetime_fallback).next())
                .map(collapsed_text)
                .ok_or_else(|| scrape_error(account, DATETIME))?;

            let href = first(account, item, &link_selector, LINK)?
                .value()
                .attr("href")
                .ok_or_else(|| scrape_error(account, "a.tweet-link[href]"))?;

            Ok(SocialPost {
                account: account.to_string(),
                text,
                timestamp,
                url: format!("{ORIGIN}{href}"),
            })
        })
        .collect()
}

fn selector(account: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| scrape_error(account, css))
}

fn first<'a>(
    account: &str,
    item: ElementRef<'a>,
    selector: &Selector,
    name: &str,
) -> Result<ElementRef<'a>> {
    item.select(selector)
        .next()
        .ok_or_else(|| scrape_error(account, name))
}

/// 텍스트 노드를 그대로 이어 붙인 뒤 연속 공백을 하나로 줄입니다.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn scrape_error(account: &str, selector: &str) -> DataError {
    DataError::Scrape {
        account: account.to_string(),
        selector: selector.to_string(),
    }
}
