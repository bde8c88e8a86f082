//! 크립토 시장 지표: Fear & Greed, 알트코인 시즌, 전체 시가총액.

use crate::error::{DataError, Result};
use crate::http::fetch_json;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

const FEAR_GREED: &str = "alternative.me";
const ALTSEASON: &str = "altseason";
const COINGECKO: &str = "coingecko";

#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    #[serde(default)]
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
struct FearGreedEntry {
    /// 숫자가 문자열로 옵니다 ("55").
    value: String,
}

#[derive(Debug, Deserialize)]
struct AltseasonResponse {
    #[serde(default)]
    index: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GlobalResponse {
    #[serde(default)]
    data: Option<GlobalData>,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    #[serde(default)]
    total_market_cap: HashMap<String, f64>,
}

/// 최신 Fear & Greed 지수 (0-100).
pub(super) async fn fetch_fear_greed(client: &Client, url: &str) -> Result<u32> {
    let response: FearGreedResponse = fetch_json(FEAR_GREED, client.get(url)).await?;

    let entry = response
        .data
        .first()
        .ok_or_else(|| DataError::missing(FEAR_GREED, "data[0]"))?;

    let value = entry
        .value
        .trim()
        .parse::<u32>()
        .map_err(|_| DataError::missing(FEAR_GREED, format!("data[0].value = {:?}", entry.value)))?;

    debug!(value, "Fear & Greed 지수");
    Ok(value)
}

/// 알트코인 시즌 지수. `index` 필드가 없으면 0.
pub(super) async fn fetch_altseason(client: &Client, url: &str) -> Result<f64> {
    let response: AltseasonResponse = fetch_json(ALTSEASON, client.get(url)).await?;

    if response.index.is_none() {
        debug!("altseason 응답에 index 없음, 0 사용");
    }
    Ok(response.index.unwrap_or(0.0))
}

/// 크립토 전체 시가총액 (USD).
pub(super) async fn fetch_market_cap(client: &Client, base_url: &str) -> Result<f64> {
    let url = format!("{}/global", base_url.trim_end_matches('/'));
    let response: GlobalResponse = fetch_json(COINGECKO, client.get(url)).await?;

    let data = response
        .data
        .ok_or_else(|| DataError::missing(COINGECKO, "data"))?;

    data.total_market_cap
        .get("usd")
        .copied()
        .ok_or_else(|| DataError::missing(COINGECKO, "data.total_market_cap.usd"))
}
