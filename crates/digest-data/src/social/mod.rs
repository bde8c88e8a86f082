//! 소셜 게시물 수집.
//!
//! 고정된 계정 목록에 대해 계정마다 최근 게시물을 최대 3개씩 가져옵니다.
//! 검색 API 토큰이 있으면 Twitter v2 검색을, 없으면 Nitter 미러 크롤링을 사용합니다.

mod nitter;
mod twitter;

pub use nitter::MirrorSource;
pub use twitter::SearchApiSource;

use crate::error::Result;
use async_trait::async_trait;
use digest_core::{SocialPost, MAX_POSTS_PER_ACCOUNT};
use reqwest::Client;
use secrecy::SecretString;
use tracing::info;

/// 게시물 소스 trait.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// `account`의 최근 게시물을 최신순으로 최대 `limit`개 반환합니다.
    async fn fetch_posts(&self, account: &str, limit: usize) -> Result<Vec<SocialPost>>;

    /// 로그용 소스 이름.
    fn name(&self) -> &str;
}

/// 소셜 수집 설정.
#[derive(Debug)]
pub struct SocialConfig {
    /// Twitter v2 최근 검색 URL
    pub search_url: String,
    /// 검색 API Bearer 토큰 (없으면 미러 크롤링)
    pub bearer_token: Option<SecretString>,
    /// Nitter 미러 루트 URL
    pub mirror_url: String,
    /// 1차 계정 그룹
    pub primary_accounts: Vec<String>,
    /// 2차 계정 그룹
    pub secondary_accounts: Vec<String>,
    /// 계정당 게시물 수 (최대 3)
    pub posts_per_account: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            search_url: "https://api.twitter.com/2/tweets/search/recent".to_string(),
            bearer_token: None,
            mirror_url: "https://nitter.net".to_string(),
            primary_accounts: vec!["realDonaldTrump".to_string()],
            secondary_accounts: vec!["elonmusk".to_string(), "cz_binance".to_string()],
            posts_per_account: MAX_POSTS_PER_ACCOUNT,
        }
    }
}

/// 소셜 게시물 수집기.
pub struct SocialFetcher<'a> {
    source: Box<dyn PostSource + 'a>,
    per_account: usize,
}

impl<'a> SocialFetcher<'a> {
    /// 토큰 유무에 따라 검색 API 또는 미러 소스를 고릅니다.
    pub fn new(client: &'a Client, config: &'a SocialConfig) -> Self {
        let source: Box<dyn PostSource + 'a> = match &config.bearer_token {
            Some(token) => Box::new(SearchApiSource::new(client, &config.search_url, token)),
            None => Box::new(MirrorSource::new(client, &config.mirror_url)),
        };

        Self::with_source(source, config.posts_per_account)
    }

    /// 계정당 게시물 수는 항상 `MAX_POSTS_PER_ACCOUNT` 이하로 제한됩니다.
    pub fn with_source(source: Box<dyn PostSource + 'a>, per_account: usize) -> Self {
        Self {
            source,
            per_account: per_account.min(MAX_POSTS_PER_ACCOUNT),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// 계정 순서대로 게시물을 모읍니다. 한 계정이라도 실패하면 전체가 실패합니다.
    pub async fn fetch(&self, accounts: &[String]) -> Result<Vec<SocialPost>> {
        let mut out = Vec::new();

        for account in accounts {
            let mut posts = self.source.fetch_posts(account, self.per_account).await?;
            posts.truncate(self.per_account);
            info!(
                source = self.source.name(),
                account = %account,
                count = posts.len(),
                "게시물 수집"
            );
            out.extend(posts);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `limit`을 무시하고 항상 10개를 돌려주는 소스.
    struct GreedySource;

    #[async_trait]
    impl PostSource for GreedySource {
        async fn fetch_posts(&self, account: &str, _limit: usize) -> Result<Vec<SocialPost>> {
            Ok((0..10)
                .map(|i| SocialPost {
                    account: account.to_string(),
                    text: format!("post {i}"),
                    timestamp: format!("{i}h"),
                    url: format!("https://twitter.com/{account}/status/{i}"),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "greedy"
        }
    }

    #[tokio::test]
    async fn test_never_more_than_three_per_account() {
        let fetcher = SocialFetcher::with_source(Box::new(GreedySource), 10);
        let accounts = vec!["elonmusk".to_string(), "cz_binance".to_string()];

        let posts = fetcher.fetch(&accounts).await.unwrap();
        assert_eq!(posts.len(), 6);
        assert_eq!(posts.iter().filter(|p| p.account == "elonmusk").count(), 3);
        assert_eq!(posts.iter().filter(|p| p.account == "cz_binance").count(), 3);
        // 계정 순서 유지
        assert_eq!(posts[0].account, "elonmusk");
        assert_eq!(posts[3].account, "cz_binance");
    }

    #[tokio::test]
    async fn test_smaller_configured_limit() {
        let fetcher = SocialFetcher::with_source(Box::new(GreedySource), 1);
        let posts = fetcher.fetch(&["realDonaldTrump".to_string()]).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_source_selection() {
        let client = Client::new();

        let config = SocialConfig::default();
        assert_eq!(SocialFetcher::new(&client, &config).source_name(), "nitter");

        let config = SocialConfig {
            bearer_token: Some(SecretString::from("token".to_string())),
            ..Default::default()
        };
        assert_eq!(SocialFetcher::new(&client, &config).source_name(), "twitter");
    }
}
