//! 매크로/크립토 지표 수집.
//!
//! 제공자마다 독립된 요청 하나를 보내고, 각 응답을 스칼라 하나로 줄입니다.
//! 하나라도 실패하면 지표 단계 전체가 실패합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let config = MetricsConfig::default();
//! let metrics = MetricsFetcher::new(&client, &config).fetch().await?;
//! println!("10Y {:+.2}%", metrics.bond_yield);
//! ```

mod crypto;
mod exchange_rate;
mod fred;

use crate::error::{DataError, Result};
use chrono::{Duration, Utc};
use digest_core::MetricSet;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;

/// 미국 10년물 국채 수익률 시리즈.
const BOND_SERIES: &str = "DGS10";
/// M2 통화량 시리즈 (월간).
const MONEY_SUPPLY_SERIES: &str = "M2SL";
/// DGS10 조회 기간 (주말/휴일 결측 대비).
const BOND_WINDOW_DAYS: i64 = 7;
/// M2SL 조회 기간 (월간 시리즈).
const MONEY_SUPPLY_WINDOW_DAYS: i64 = 120;

/// 지표 제공자 엔드포인트.
#[derive(Debug, Clone)]
pub struct MetricsEndpoints {
    /// FRED API 루트 (`/series/observations` 앞부분)
    pub fred: String,
    /// exchangerate.host 루트 (`/timeseries` 앞부분)
    pub exchange_rate: String,
    /// Fear & Greed 지수 URL
    pub fear_greed: String,
    /// 알트코인 시즌 지수 URL
    pub altseason: String,
    /// CoinGecko API 루트 (`/global` 앞부분)
    pub coingecko: String,
}

impl Default for MetricsEndpoints {
    fn default() -> Self {
        Self {
            fred: "https://api.stlouisfed.org/fred".to_string(),
            exchange_rate: "https://api.exchangerate.host".to_string(),
            fear_greed: "https://api.alternative.me/fng/".to_string(),
            altseason: "https://api.altseason.com/".to_string(),
            coingecko: "https://api.coingecko.com/api/v3".to_string(),
        }
    }
}

/// 지표 수집 설정.
#[derive(Debug, Default)]
pub struct MetricsConfig {
    pub endpoints: MetricsEndpoints,
    /// FRED API 키 (`api_key`)
    pub fred_key: Option<SecretString>,
    /// exchangerate.host 키 (`access_key`)
    pub exchange_rate_key: Option<SecretString>,
}

/// 지표 수집기.
pub struct MetricsFetcher<'a> {
    client: &'a Client,
    config: &'a MetricsConfig,
}

impl<'a> MetricsFetcher<'a> {
    pub fn new(client: &'a Client, config: &'a MetricsConfig) -> Self {
        Self { client, config }
    }

    /// 모든 지표를 순서대로 조회합니다.
    pub async fn fetch(&self) -> Result<MetricSet> {
        info!("지표 수집 시작");

        let today = Utc::now().date_naive();
        let endpoints = &self.config.endpoints;
        let fred = fred::FredClient::new(
            self.client,
            &endpoints.fred,
            self.config.fred_key.as_ref(),
        );

        let bond_yield = fred
            .latest_value(BOND_SERIES, today - Duration::days(BOND_WINDOW_DAYS))
            .await?;

        let fx_delta_pct = exchange_rate::fetch_fx_delta(
            self.client,
            &endpoints.exchange_rate,
            self.config.exchange_rate_key.as_ref(),
            today,
        )
        .await?;

        let sentiment = crypto::fetch_fear_greed(self.client, &endpoints.fear_greed).await?;
        let altcoin_index = crypto::fetch_altseason(self.client, &endpoints.altseason).await?;
        let market_cap_usd = crypto::fetch_market_cap(self.client, &endpoints.coingecko).await?;

        let money_supply = fred
            .latest_value(
                MONEY_SUPPLY_SERIES,
                today - Duration::days(MONEY_SUPPLY_WINDOW_DAYS),
            )
            .await?;

        let metrics = MetricSet {
            bond_yield,
            fx_delta_pct,
            sentiment,
            altcoin_index,
            market_cap_usd,
            money_supply,
            fetched_at: Utc::now(),
        };

        info!(
            "지표 수집 완료: 10Y {:.2}%, DXY {:+.2}%, FGI {}, ALT {}, M2 {:.1}",
            metrics.bond_yield,
            metrics.fx_delta_pct,
            metrics.sentiment,
            metrics.altcoin_index,
            metrics.money_supply
        );

        Ok(metrics)
    }
}

/// 변동률 계산 (%). 이전 값이 0이면 0.
pub(crate) fn calculate_change_pct(current: Decimal, previous: Decimal) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }

    let change = current - previous;
    let pct = (change / previous) * Decimal::from(100);

    pct.to_f64().unwrap_or(0.0)
}

/// f64 관측치를 Decimal로 변환합니다. NaN/무한대는 필드 오류.
pub(crate) fn to_decimal(provider: &'static str, field: &str, value: f64) -> Result<Decimal> {
    Decimal::from_f64_retain(value).ok_or_else(|| DataError::missing(provider, field))
}
