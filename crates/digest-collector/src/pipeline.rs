//! 다이제스트 한 번 실행.
//!
//! 단계는 항상 같은 순서로 하나씩 실행합니다:
//! 지표 → 뉴스 → 1차 계정 → 2차 계정 → 이미지 → 조립 → 전송.

use crate::config::DigestConfig;
use crate::error::Result;
use crate::stats::RunStats;
use chrono::Utc;
use digest_core::{ComposedMessage, DigestContent};
use digest_data::{DataError, ImageFetcher, MetricsFetcher, NewsFetcher, SocialFetcher};
use digest_notification::{MessageComposer, MessageSender};
use reqwest::Client;
use std::time::Instant;

/// 조립이 끝난 다이제스트
#[derive(Debug, Clone)]
pub struct Digest {
    pub message: ComposedMessage,
    pub stats: RunStats,
}

/// 데이터를 모아 메시지를 조립합니다. 전송은 하지 않습니다.
///
/// 지표 실패는 항상 중단입니다. `allow_partial`이면 뉴스/소셜/이미지 실패는
/// 빈 섹션으로 대체하고 `RunStats::degraded`에 기록합니다.
pub async fn build_digest(config: &DigestConfig, client: &Client) -> Result<Digest> {
    let start = Instant::now();
    let mut stats = RunStats::new();

    tracing::info!("Step 1/5: 지표 수집");
    let metrics = MetricsFetcher::new(client, &config.metrics).fetch().await?;

    tracing::info!("Step 2/5: 뉴스 수집");
    let news = NewsFetcher::new(client, &config.news).fetch().await;
    let news = degrade("news", news, config.allow_partial, &mut stats)?;

    let social = SocialFetcher::new(client, &config.social);
    tracing::info!(source = social.source_name(), "Step 3/5: 소셜 게시물 수집");
    let primary_posts = social.fetch(&config.social.primary_accounts).await;
    let primary_posts = degrade("primary_posts", primary_posts, config.allow_partial, &mut stats)?;
    let secondary_posts = social.fetch(&config.social.secondary_accounts).await;
    let secondary_posts =
        degrade("secondary_posts", secondary_posts, config.allow_partial, &mut stats)?;

    tracing::info!("Step 4/5: 이미지 조회");
    let image_url = ImageFetcher::new(client, &config.image).fetch().await;
    let image_url = degrade("image", image_url, config.allow_partial, &mut stats)?;

    tracing::info!("Step 5/5: 메시지 조립");
    let content = DigestContent {
        metrics,
        news,
        primary_posts,
        secondary_posts,
        image_url,
    };
    let message = MessageComposer::new().compose(&content, Utc::now().date_naive());

    stats.news = content.news.len();
    stats.primary_posts = content.primary_posts.len();
    stats.secondary_posts = content.secondary_posts.len();
    stats.has_image = !content.image_url.is_empty();
    stats.message_chars = message.char_len();
    stats.elapsed = start.elapsed();

    Ok(Digest { message, stats })
}

/// 수집, 조립, 전송을 한 번 수행합니다. 어느 단계든 실패하면 전송하지 않습니다.
pub async fn run_once(
    config: &DigestConfig,
    client: &Client,
    sender: &dyn MessageSender,
) -> Result<RunStats> {
    let start = Instant::now();
    let Digest { message, mut stats } = build_digest(config, client).await?;

    tracing::info!(sender = sender.name(), chars = stats.message_chars, "메시지 전송");
    sender.send(&message).await?;

    stats.sent = true;
    stats.elapsed = start.elapsed();
    Ok(stats)
}

/// 부분 실행이 허용되면 실패한 단계를 기본값(빈 목록, 빈 URL)으로 대체합니다.
fn degrade<T: Default>(
    stage: &str,
    result: std::result::Result<T, DataError>,
    allow_partial: bool,
    stats: &mut RunStats,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if allow_partial => {
            tracing::warn!(stage, error = %e, "단계 실패, 빈 섹션으로 대체");
            stats.degraded.push(stage.to_string());
            Ok(T::default())
        }
        Err(e) => {
            tracing::error!(stage, error = %e, "단계 실패, 실행 중단");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> std::result::Result<Vec<String>, DataError> {
        Err(DataError::MissingField {
            provider: "newsapi",
            field: "articles".to_string(),
        })
    }

    #[test]
    fn test_degrade_records_stage() {
        let mut stats = RunStats::new();
        let value = degrade("news", failure(), true, &mut stats).unwrap();

        assert!(value.is_empty());
        assert_eq!(stats.degraded, vec!["news"]);
    }

    #[test]
    fn test_degrade_propagates_without_partial() {
        let mut stats = RunStats::new();
        assert!(degrade("news", failure(), false, &mut stats).is_err());
        assert!(!stats.is_partial());
    }

    #[test]
    fn test_degrade_passes_success() {
        let mut stats = RunStats::new();
        let value = degrade("image", Ok("https://img.test".to_string()), false, &mut stats);
        assert_eq!(value.unwrap(), "https://img.test");
    }
}
