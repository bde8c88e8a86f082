//! One-shot market digest runner.
//!
//! 실행 한 번에 다음을 순서대로 수행합니다:
//! - 매크로/크립토 지표 수집
//! - 뉴스 헤드라인 수집 (API → RSS 대체)
//! - 소셜 게시물 수집 (1차/2차 계정 그룹)
//! - 테마 이미지 URL 조회
//! - 메시지 조립 후 텔레그램 채널로 전송
//!
//! 주기 실행은 외부 스케줄러(cron 등)에 맡깁니다.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod stats;

pub use config::DigestConfig;
pub use error::{CollectorError, Result};
pub use pipeline::{build_digest, run_once, Digest};
pub use stats::RunStats;
