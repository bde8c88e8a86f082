//! # Digest Core
//!
//! 마켓 다이제스트 파이프라인 전반에서 공유하는 기본 타입을 제공합니다:
//! - 지표 묶음 (`MetricSet`)
//! - 뉴스 헤드라인 / 소셜 게시물 레코드
//! - 조립된 메시지 (`ComposedMessage`)
//! - 로깅 인프라

pub mod logging;
pub mod types;

pub use logging::*;
pub use types::*;
