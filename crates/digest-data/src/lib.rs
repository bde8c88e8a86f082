//! # Digest Data
//!
//! 다이제스트에 들어갈 데이터를 외부 공개 API에서 수집합니다.
//!
//! ## 지표 (`metrics`)
//! - FRED: 미국 10년물 국채 수익률 (DGS10), M2 통화량 (M2SL)
//! - exchangerate.host: USD/EUR 1일 변동률
//! - alternative.me: 크립토 Fear & Greed 지수
//! - altseason: 알트코인 시즌 지수
//! - CoinGecko: 크립토 전체 시가총액
//!
//! ## 뉴스 (`news`)
//! - NewsAPI 헤드라인 검색, 결과가 비면 RSS 피드 키워드 필터로 대체
//!
//! ## 소셜 (`social`)
//! - Twitter v2 검색 API 또는 Nitter 미러 HTML 크롤링
//!
//! ## 이미지 (`image`)
//! - Unsplash 랜덤 이미지 API 또는 고정 템플릿 URL
//!
//! 모든 요청은 순차적으로 실행되며 재시도하지 않습니다.

pub mod error;
mod http;
pub mod image;
pub mod metrics;
pub mod news;
pub mod social;

pub use error::{DataError, Result};
pub use image::{ImageConfig, ImageFetcher};
pub use metrics::{MetricsConfig, MetricsEndpoints, MetricsFetcher};
pub use news::{HeadlineSource, NewsConfig, NewsFetcher};
pub use social::{PostSource, SocialConfig, SocialFetcher};
