//! Market digest CLI.

use clap::Parser;
use digest_collector::{build_digest, run_once, CollectorError, DigestConfig};
use digest_core::{init_logging, LogConfig};
use digest_notification::TelegramSender;

/// 로그 필터를 적용할 크레이트
const LOG_TARGETS: [&str; 5] = [
    "market_digest",
    "digest_collector",
    "digest_data",
    "digest_notification",
    "digest_core",
];

#[derive(Parser)]
#[command(name = "market-digest")]
#[command(about = "Daily market digest to a Telegram channel", long_about = None)]
#[command(version)]
struct Cli {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 전송하지 않고 조립된 메시지를 표준 출력으로 내보냄
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // `.env`의 LOG_FORMAT/RUST_LOG도 반영되도록 설정을 먼저 로드
    let config = DigestConfig::from_env()?;

    let filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, cli.log_level))
        .collect::<Vec<_>>()
        .join(",");
    init_logging(LogConfig::new(filter).with_env_format())?;

    tracing::info!("Market Digest 시작");
    tracing::debug!(
        allow_partial = config.allow_partial,
        timeout_secs = config.http_timeout_secs,
        "설정 로드 완료"
    );

    if let Err(e) = run(&config, cli.dry_run).await {
        tracing::error!("다이제스트 실패: {}", e);
        return Err(e.into());
    }

    tracing::info!("Market Digest 종료");
    Ok(())
}

async fn run(config: &DigestConfig, dry_run: bool) -> digest_collector::Result<()> {
    let client = config.http_client()?;

    if dry_run {
        let digest = build_digest(config, &client).await?;
        println!("{}", digest.message.text);
        digest.stats.log_summary("dry-run");
        return Ok(());
    }

    let telegram = config.telegram.as_ref().ok_or_else(|| {
        CollectorError::Config(
            "TELEGRAM_BOT_TOKEN/TELEGRAM_CHAT_ID 환경변수가 설정되지 않았습니다".to_string(),
        )
    })?;
    let sender = TelegramSender::new(telegram, client.clone());

    let stats = run_once(config, &client, &sender).await?;
    stats.log_summary("다이제스트 전송");

    Ok(())
}
