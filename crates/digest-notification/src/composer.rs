//! 다이제스트 메시지 조립.
//!
//! 순수 포맷팅만 합니다. 섹션 순서는 항상 고정입니다:
//! 지표 헤더 → 뉴스 → 1차 계정 게시물 → 2차 계정 게시물 → 이미지.
//! 항목이 없는 섹션도 제목은 남습니다.
//!
//! 항목 텍스트는 MarkdownV2 예약 문자를 이스케이프하지 않고 그대로 넣습니다.

use chrono::NaiveDate;
use digest_core::{ComposedMessage, DigestContent, MetricSet, NewsItem, SocialPost};
use std::fmt::Write;

/// 섹션 제목 등 고정 문구.
#[derive(Debug, Clone)]
pub struct DigestLabels {
    pub title: String,
    pub metrics: String,
    pub news: String,
    pub primary_posts: String,
    pub secondary_posts: String,
    pub image_alt: String,
}

impl Default for DigestLabels {
    fn default() -> Self {
        Self {
            title: "Ежедневный дайджест".to_string(),
            metrics: "Метрики".to_string(),
            news: "Новости".to_string(),
            primary_posts: "Твиты Трампа".to_string(),
            secondary_posts: "Крипто-лидеры".to_string(),
            image_alt: "img".to_string(),
        }
    }
}

/// 다이제스트 메시지 조립기.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    labels: DigestLabels,
}

impl MessageComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: DigestLabels) -> Self {
        Self { labels }
    }

    /// 전체 메시지를 조립합니다.
    pub fn compose(&self, content: &DigestContent, date: NaiveDate) -> ComposedMessage {
        let mut text = self.format_header(&content.metrics, date);

        text.push_str(&self.format_news(&content.news));
        text.push_str(&format_section(
            &self.labels.primary_posts,
            &content.primary_posts,
            format_primary_post,
        ));
        text.push_str(&format_section(
            &self.labels.secondary_posts,
            &content.secondary_posts,
            format_secondary_post,
        ));

        let _ = write!(text, "\n![{}]({})", self.labels.image_alt, content.image_url);

        ComposedMessage {
            text,
            image_url: content.image_url.clone(),
        }
    }

    /// 날짜 제목과 지표 한 줄.
    pub fn format_header(&self, metrics: &MetricSet, date: NaiveDate) -> String {
        format!(
            "🗓️ *{title} — {date}*\n\n🔔 *{label}:* {line}\n\n—\n",
            title = self.labels.title,
            date = date.format("%d.%m.%Y"),
            label = self.labels.metrics,
            line = format_metrics_line(metrics),
        )
    }

    fn format_news(&self, news: &[NewsItem]) -> String {
        let mut out = format!("### {}\n", self.labels.news);
        for (i, item) in news.iter().enumerate() {
            let _ = writeln!(out, "{}. [{}]({})", i + 1, item.title, item.url);
        }
        out
    }
}

/// 지표 값마다 고정된 기호와 자릿수를 씁니다. 변동률은 부호를 항상 표시합니다.
pub fn format_metrics_line(m: &MetricSet) -> String {
    format!(
        "🇺🇸10Y {:+.2}% | 💵DXY {:+.2}% | 😱FGI {} | 🔀ALT {}% | 💸M2 {:+.2}% | 🌐Cap ${:.0}",
        m.bond_yield,
        m.fx_delta_pct,
        m.sentiment,
        m.altcoin_index,
        m.money_supply,
        m.market_cap_usd
    )
}

fn format_section(title: &str, posts: &[SocialPost], line: fn(&SocialPost) -> String) -> String {
    let mut out = format!("\n### {title}\n");
    for post in posts {
        out.push_str(&line(post));
        out.push('\n');
    }
    out
}

fn format_primary_post(post: &SocialPost) -> String {
    format!("• [{}]({}): {}", post.timestamp, post.url, post.text)
}

fn format_secondary_post(post: &SocialPost) -> String {
    format!(
        "• [{} · {}]({}): {}",
        post.account, post.timestamp, post.url, post.text
    )
}
