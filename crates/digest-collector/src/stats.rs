//! 실행 통계 구조체.

use std::time::Duration;

/// 다이제스트 실행 통계
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// 뉴스 헤드라인 수
    pub news: usize,
    /// 1차 계정 게시물 수
    pub primary_posts: usize,
    /// 2차 계정 게시물 수
    pub secondary_posts: usize,
    /// 이미지 URL 존재 여부
    pub has_image: bool,
    /// 메시지 길이 (문자 수)
    pub message_chars: usize,
    /// 빈 섹션으로 대체된 단계
    pub degraded: Vec<String>,
    /// 전송 여부
    pub sent: bool,
    /// 소요 시간
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 일부 단계가 빈 섹션으로 대체되었는지
    pub fn is_partial(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            news = self.news,
            primary_posts = self.primary_posts,
            secondary_posts = self.secondary_posts,
            has_image = self.has_image,
            message_chars = self.message_chars,
            degraded = ?self.degraded,
            sent = self.sent,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "다이제스트 완료"
        );
    }
}
