//! FRED (St. Louis Fed) 시계열 관측치 조회.

use crate::error::{DataError, Result};
use crate::http::fetch_json;
use chrono::NaiveDate;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

const PROVIDER: &str = "fred";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Option<Vec<Observation>>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    /// 결측치는 "."으로 옵니다.
    value: String,
}

pub(super) struct FredClient<'a> {
    client: &'a Client,
    base_url: &'a str,
    api_key: Option<&'a SecretString>,
}

impl<'a> FredClient<'a> {
    pub(super) fn new(
        client: &'a Client,
        base_url: &'a str,
        api_key: Option<&'a SecretString>,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// `start` 이후의 숫자 관측치를 날짜 오름차순으로 반환합니다.
    async fn observations(&self, series_id: &str, start: NaiveDate) -> Result<Vec<(String, f64)>> {
        let url = format!("{}/series/observations", self.base_url.trim_end_matches('/'));

        let mut query = vec![
            ("series_id", series_id.to_string()),
            ("file_type", "json".to_string()),
            ("observation_start", start.format("%Y-%m-%d").to_string()),
        ];
        if let Some(key) = self.api_key {
            query.push(("api_key", key.expose_secret().to_string()));
        }

        let response: ObservationsResponse =
            fetch_json(PROVIDER, self.client.get(url).query(&query)).await?;

        let observations = response
            .observations
            .ok_or_else(|| DataError::missing(PROVIDER, format!("{series_id}.observations")))?;

        let values = numeric_values(&observations);
        debug!(
            series_id,
            total = observations.len(),
            numeric = values.len(),
            "FRED 관측치 수신"
        );
        Ok(values)
    }

    /// 가장 최근 숫자 관측치.
    pub(super) async fn latest_value(&self, series_id: &str, start: NaiveDate) -> Result<f64> {
        let values = self.observations(series_id, start).await?;
        values
            .last()
            .map(|(_, value)| *value)
            .ok_or_else(|| DataError::missing(PROVIDER, format!("{series_id}.observations[-1]")))
    }
}

fn numeric_values(observations: &[Observation]) -> Vec<(String, f64)> {
    observations
        .iter()
        .filter_map(|o| o.value.trim().parse::<f64>().ok().map(|v| (o.date.clone(), v)))
        .collect()
}
