//! 다이제스트 데이터 레코드.
//!
//! 모든 레코드는 실행마다 새로 만들어지며 저장되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 계정당 최대 게시물 수.
pub const MAX_POSTS_PER_ACCOUNT: usize = 3;

/// 최대 뉴스 헤드라인 수.
pub const MAX_NEWS_ITEMS: usize = 5;

/// 매크로/크립토 지표 묶음.
///
/// 원격 API가 반환한 값을 그대로 담습니다. 필드 간 정합성 검증은 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// 미국 10년물 국채 수익률 (%)
    pub bond_yield: f64,
    /// USD/EUR 1일 변동률 (%)
    pub fx_delta_pct: f64,
    /// Fear & Greed 지수 (0-100)
    pub sentiment: u32,
    /// 알트코인 시즌 지수
    pub altcoin_index: f64,
    /// 크립토 전체 시가총액 (USD)
    pub market_cap_usd: f64,
    /// M2 통화량 최근 관측치 (십억 달러)
    pub money_supply: f64,
    /// 수집 시각
    pub fetched_at: DateTime<Utc>,
}

/// 뉴스 헤드라인.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// 소셜 게시물.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    /// 계정 핸들 (`@` 제외)
    pub account: String,
    /// 본문
    pub text: String,
    /// 소스가 준 시각 문자열 (형식 변환 없음)
    pub timestamp: String,
    /// 원문 링크
    pub url: String,
}

/// 메시지 조립에 필요한 전체 입력.
#[derive(Debug, Clone)]
pub struct DigestContent {
    pub metrics: MetricSet,
    pub news: Vec<NewsItem>,
    /// 1차 계정 그룹 게시물
    pub primary_posts: Vec<SocialPost>,
    /// 2차 계정 그룹 게시물
    pub secondary_posts: Vec<SocialPost>,
    /// 이미지 URL (없으면 빈 문자열)
    pub image_url: String,
}

/// 전송할 최종 메시지.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedMessage {
    pub text: String,
    pub image_url: String,
}

impl ComposedMessage {
    /// 메시지 길이 (문자 수).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
