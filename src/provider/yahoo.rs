//! Yahoo Finance fundamentals-timeseries provider.
//!
//! Requests the eleven annual series in a single call and aligns them by
//! fiscal year-end date: the newest date becomes `t`, the next `t-1`, the
//! next `t-2`. A series with no value on one of those dates leaves a gap in
//! the snapshot, which the calculator reports as missing data.

use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::{ensure_scorable, normalize_ticker, FinancialDataProvider};
use crate::config;
use crate::error::{BeneishError, Result};
use crate::models::{FinancialSnapshot, Metric, Period};

/// Start of the requested window (1985-08-22), early enough to cover every
/// annual report the endpoint serves.
const WINDOW_START: u64 = 493_590_046;

/// Fetches annual statement data from the Yahoo Finance timeseries API.
pub struct YahooProvider {
    base_url: String,
    client: Client,
}

impl YahooProvider {
    /// Create a provider against `base_url` (see [`config::provider_base`]).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, ticker: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, ticker);
        let types = config::TIMESERIES_SERIES
            .iter()
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(",");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(WINDOW_START);

        debug!(url = %url, ticker, "requesting annual statement timeseries");

        let unavailable = |e: reqwest::Error| {
            BeneishError::ProviderUnavailable(format!("fetch for {ticker} failed: {e}"))
        };

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("symbol", ticker.to_string()),
                ("type", types),
                ("period1", WINDOW_START.to_string()),
                ("period2", now.to_string()),
            ])
            .send()
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;

        resp.json::<Value>().map_err(unavailable)
    }
}

impl FinancialDataProvider for YahooProvider {
    fn fetch(&self, ticker: &str) -> Result<FinancialSnapshot> {
        let ticker = normalize_ticker(ticker)?;
        let body = self.request(&ticker)?;
        let snapshot = parse_timeseries(&ticker, &body)?;
        ensure_scorable(&ticker, &snapshot)?;
        Ok(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parse a timeseries response body into a snapshot for `ticker`.
///
/// The body looks like:
///
/// ```json
/// {"timeseries": {"result": [
///     {"meta": {"type": ["annualTotalRevenue"]},
///      "annualTotalRevenue": [
///         {"asOfDate": "2023-12-31", "reportedValue": {"raw": 1.0e9}},
///         null
///      ]}
/// ], "error": null}}
/// ```
pub fn parse_timeseries(ticker: &str, body: &Value) -> Result<FinancialSnapshot> {
    let timeseries = body.get("timeseries").ok_or_else(|| {
        BeneishError::ProviderUnavailable(format!("no timeseries in response for {ticker}"))
    })?;

    if let Some(err) = timeseries.get("error").filter(|e| !e.is_null()) {
        let description = err
            .get("description")
            .and_then(|d| d.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| err.to_string());
        return Err(BeneishError::ProviderUnavailable(format!(
            "provider error for {ticker}: {description}"
        )));
    }

    let results = timeseries
        .get("result")
        .and_then(|r| r.as_array())
        .map(|r| r.as_slice())
        .unwrap_or_default();

    // metric -> (asOfDate -> value)
    let mut series: BTreeMap<Metric, BTreeMap<String, f64>> = BTreeMap::new();
    for entry in results {
        let Some(name) = entry
            .get("meta")
            .and_then(|m| m.get("type"))
            .and_then(|t| t.get(0))
            .and_then(|t| t.as_str())
        else {
            continue;
        };
        let Some(metric) = metric_for_series(name) else {
            continue;
        };
        let points = entry
            .get(name)
            .and_then(|p| p.as_array())
            .map(|p| p.as_slice())
            .unwrap_or_default();

        for point in points {
            let date = point.get("asOfDate").and_then(|d| d.as_str());
            let value = point
                .get("reportedValue")
                .and_then(|v| v.get("raw"))
                .and_then(|v| v.as_f64());
            if let (Some(date), Some(value)) = (date, value) {
                series
                    .entry(metric)
                    .or_default()
                    .insert(date.to_string(), value);
            }
        }
    }

    if series.is_empty() {
        return Err(BeneishError::ProviderUnavailable(format!(
            "no annual statement data for {ticker}"
        )));
    }

    // Newest three fiscal year-end dates across all series.
    let dates: BTreeSet<&String> = series.values().flat_map(|s| s.keys()).collect();
    let periods: Vec<(Period, &String)> = dates
        .into_iter()
        .rev()
        .enumerate()
        .filter_map(|(i, date)| Period::from_years_back(i).map(|p| (p, date)))
        .collect();

    let mut builder = FinancialSnapshot::builder().ticker(ticker);
    for (metric, values) in &series {
        for (period, date) in &periods {
            if let Some(value) = values.get(*date) {
                builder = builder.value(*metric, *period, *value);
            }
        }
    }

    debug!(
        ticker,
        metrics = series.len(),
        periods = periods.len(),
        "parsed annual statement timeseries"
    );

    Ok(builder.build())
}

fn metric_for_series(name: &str) -> Option<Metric> {
    config::TIMESERIES_SERIES
        .iter()
        .find(|(_, series)| *series == name)
        .map(|(metric, _)| *metric)
}
