//! exchangerate.host 시계열 기반 USD/EUR 변동률.
//!
//! DXY 자체가 아니라 USD 대비 EUR 환율의 하루 변동률을 프록시로 사용합니다.

use super::{calculate_change_pct, to_decimal};
use crate::error::{DataError, Result};
use crate::http::fetch_json;
use chrono::{Duration, NaiveDate};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const PROVIDER: &str = "exchangerate";
const BASE_CURRENCY: &str = "USD";
const QUOTE_CURRENCY: &str = "EUR";

/// 날짜(YYYY-MM-DD) -> 통화 -> 환율.
type DailyRates = BTreeMap<String, HashMap<String, f64>>;

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    #[serde(default)]
    rates: Option<DailyRates>,
}

pub(super) async fn fetch_fx_delta(
    client: &Client,
    base_url: &str,
    access_key: Option<&SecretString>,
    today: NaiveDate,
) -> Result<f64> {
    let url = format!("{}/timeseries", base_url.trim_end_matches('/'));
    let start = today - Duration::days(1);

    let mut query = vec![
        ("start_date", start.format("%Y-%m-%d").to_string()),
        ("end_date", today.format("%Y-%m-%d").to_string()),
        ("base", BASE_CURRENCY.to_string()),
        ("symbols", QUOTE_CURRENCY.to_string()),
    ];
    if let Some(key) = access_key {
        query.push(("access_key", key.expose_secret().to_string()));
    }

    let response: TimeseriesResponse = fetch_json(PROVIDER, client.get(url).query(&query)).await?;
    let rates = response
        .rates
        .ok_or_else(|| DataError::missing(PROVIDER, "rates"))?;

    fx_delta_from_rates(&rates)
}

/// 가장 이른 날짜와 가장 늦은 날짜 사이의 변동률 (%).
fn fx_delta_from_rates(rates: &DailyRates) -> Result<f64> {
    let quote = |entry: Option<(&String, &HashMap<String, f64>)>, position: &str| {
        entry
            .and_then(|(_, by_currency)| by_currency.get(QUOTE_CURRENCY).copied())
            .ok_or_else(|| DataError::missing(PROVIDER, format!("rates[{position}].{QUOTE_CURRENCY}")))
    };

    let first = quote(rates.iter().next(), "first")?;
    let last = quote(rates.iter().next_back(), "last")?;
    debug!(first, last, days = rates.len(), "USD/EUR 환율");

    Ok(calculate_change_pct(
        to_decimal(PROVIDER, "rates.last", last)?,
        to_decimal(PROVIDER, "rates.first", first)?,
    ))
}
