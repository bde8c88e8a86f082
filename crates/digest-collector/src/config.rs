//! 환경변수 기반 설정 모듈.
//!
//! 실행 시작 시 한 번만 읽고, 이후에는 각 단계에 참조로 넘깁니다.

use crate::error::{CollectorError, Result};
use digest_core::{MAX_NEWS_ITEMS, MAX_POSTS_PER_ACCOUNT};
use digest_data::{ImageConfig, MetricsConfig, NewsConfig, SocialConfig};
use digest_notification::TelegramConfig;
use reqwest::Client;
use secrecy::SecretString;
use std::time::Duration;

/// 미러 크롤링에 쓰는 브라우저 User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 다이제스트 전체 설정
#[derive(Debug, Default)]
pub struct DigestConfig {
    /// 텔레그램 전송 설정 (dry-run에서는 없어도 됨)
    pub telegram: Option<TelegramConfig>,
    /// 지표 수집 설정
    pub metrics: MetricsConfig,
    /// 뉴스 수집 설정
    pub news: NewsConfig,
    /// 소셜 수집 설정
    pub social: SocialConfig,
    /// 이미지 설정
    pub image: ImageConfig,
    /// 뉴스/소셜/이미지 실패 시 빈 섹션으로 대체 (지표 실패는 항상 중단)
    pub allow_partial: bool,
    /// HTTP 요청 타임아웃 (초)
    pub http_timeout_secs: u64,
}

impl DigestConfig {
    /// 환경변수(및 `.env`)에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let telegram = match (
            vars.first(&["TELEGRAM_BOT_TOKEN", "TELEGRAM_TOKEN"]),
            vars.first(&["TELEGRAM_CHAT_ID", "CHANNEL_ID"]),
        ) {
            (Some(token), Some(chat_id)) => {
                let mut telegram = TelegramConfig::new(SecretString::from(token), chat_id);
                if let Some(parse_mode) = vars.get("TELEGRAM_PARSE_MODE") {
                    telegram.parse_mode = parse_mode;
                }
                telegram.disable_web_page_preview = vars.bool("TELEGRAM_DISABLE_PREVIEW", false);
                Some(telegram)
            }
            (None, None) => None,
            (Some(_), None) => {
                return Err(CollectorError::Config(
                    "TELEGRAM_CHAT_ID 환경변수가 설정되지 않았습니다".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(CollectorError::Config(
                    "TELEGRAM_BOT_TOKEN 환경변수가 설정되지 않았습니다".to_string(),
                ))
            }
        };

        let metrics = MetricsConfig {
            fred_key: vars.secret("FRED_KEY"),
            exchange_rate_key: vars.secret("EXCHANGERATE_KEY"),
            ..Default::default()
        };

        let news_defaults = NewsConfig::default();
        let news = NewsConfig {
            newsapi_key: vars.secret("NEWSAPI_KEY"),
            language: vars.get("NEWS_LANGUAGE").unwrap_or(news_defaults.language),
            keywords: vars.list("NEWS_KEYWORDS").unwrap_or(news_defaults.keywords),
            feeds: vars.list("NEWS_FEEDS").unwrap_or(news_defaults.feeds),
            feed_keywords: vars
                .list("NEWS_FEED_KEYWORDS")
                .unwrap_or(news_defaults.feed_keywords),
            limit: vars.parse("NEWS_LIMIT", MAX_NEWS_ITEMS).min(MAX_NEWS_ITEMS),
            newsapi_url: news_defaults.newsapi_url,
        };

        let social_defaults = SocialConfig::default();
        let social = SocialConfig {
            bearer_token: vars.secret("TW_BEARER"),
            mirror_url: vars
                .get("SOCIAL_MIRROR_URL")
                .unwrap_or(social_defaults.mirror_url),
            primary_accounts: vars
                .list("SOCIAL_PRIMARY_ACCOUNTS")
                .unwrap_or(social_defaults.primary_accounts),
            secondary_accounts: vars
                .list("SOCIAL_SECONDARY_ACCOUNTS")
                .unwrap_or(social_defaults.secondary_accounts),
            posts_per_account: vars
                .parse("SOCIAL_POSTS_PER_ACCOUNT", MAX_POSTS_PER_ACCOUNT)
                .min(MAX_POSTS_PER_ACCOUNT),
            search_url: social_defaults.search_url,
        };

        let image_defaults = ImageConfig::default();
        let image = ImageConfig {
            access_key: vars.secret("UNSPLASH_ACCESS_KEY"),
            query: vars.get("IMAGE_QUERY").unwrap_or(image_defaults.query),
            ..image_defaults
        };

        Ok(Self {
            telegram,
            metrics,
            news,
            social,
            image,
            allow_partial: vars.bool("DIGEST_ALLOW_PARTIAL", false),
            http_timeout_secs: vars.parse("HTTP_TIMEOUT_SECS", 30),
        })
    }

    /// HTTP 요청 타임아웃을 Duration으로 반환
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// 모든 단계가 공유하는 HTTP 클라이언트
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if self.http_timeout_secs > 0 {
            builder = builder.timeout(self.http_timeout());
        }
        Ok(builder.build()?)
    }
}

/// 환경변수 조회 래퍼
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// 값 조회 (빈 문자열은 미설정으로 취급)
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 여러 이름 중 처음 설정된 값
    fn first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    fn secret(&self, key: &str) -> Option<SecretString> {
        self.get(key).map(SecretString::from)
    }

    /// 쉼표로 구분된 목록
    fn list(&self, key: &str) -> Option<Vec<String>> {
        let items: Vec<String> = self
            .get(key)?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        (!items.is_empty()).then_some(items)
    }

    /// 값을 파싱 (실패 시 기본값 사용)
    fn parse<T: std::str::FromStr>(&self, key: &str, default: T) -> T {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    /// bool 값 파싱
    fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(default)
    }
}
