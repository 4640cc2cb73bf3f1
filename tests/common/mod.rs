//! Shared test fixtures for the Beneish SDK integration tests.
//!
//! Provides snapshot builders around one baseline fiscal year, plus a sample
//! Yahoo timeseries response body for provider parsing tests.

#![allow(dead_code)]

use beneish_sdk::{FinancialSnapshot, Metric, Period};
use serde_json::{json, Value};

/// A fiscal year with every metric nonzero.
pub fn baseline_year() -> Vec<(Metric, f64)> {
    vec![
        (Metric::TotalRevenue, 100.0),
        (Metric::CostOfRevenue, 55.0),
        (Metric::SellingGeneralAdministrative, 20.0),
        (Metric::NetIncome, 10.0),
        (Metric::AccountsReceivable, 15.0),
        (Metric::CurrentAssets, 80.0),
        (Metric::NetPpe, 60.0),
        (Metric::TotalAssets, 200.0),
        (Metric::TotalLiabilities, 100.0),
        (Metric::DepreciationAmortization, 10.0),
        (Metric::OperatingCashFlow, 12.0),
    ]
}

/// `baseline_year()` with some metrics replaced.
pub fn year_with(overrides: &[(Metric, f64)]) -> Vec<(Metric, f64)> {
    baseline_year()
        .into_iter()
        .map(|(metric, value)| {
            overrides
                .iter()
                .find(|(m, _)| *m == metric)
                .map(|(m, v)| (*m, *v))
                .unwrap_or((metric, value))
        })
        .collect()
}

/// Rev 120/100, COGS 60/55, AR 20/15, everything else held constant.
pub fn worked_example() -> FinancialSnapshot {
    FinancialSnapshot::builder()
        .ticker("ACME")
        .period(
            Period::Current,
            &year_with(&[
                (Metric::TotalRevenue, 120.0),
                (Metric::CostOfRevenue, 60.0),
                (Metric::AccountsReceivable, 20.0),
            ]),
        )
        .period(Period::Prior, &baseline_year())
        .build()
}

/// The same year reported for `t` and `t-1`.
pub fn identical_periods(year: &[(Metric, f64)]) -> FinancialSnapshot {
    FinancialSnapshot::builder()
        .ticker("FLAT")
        .period(Period::Current, year)
        .period(Period::Prior, year)
        .build()
}

/// Three complete fiscal years for `ticker`.
pub fn three_years(ticker: &str) -> FinancialSnapshot {
    FinancialSnapshot::builder()
        .ticker(ticker)
        .period(
            Period::Current,
            &year_with(&[
                (Metric::TotalRevenue, 120.0),
                (Metric::CostOfRevenue, 60.0),
                (Metric::AccountsReceivable, 20.0),
            ]),
        )
        .period(Period::Prior, &baseline_year())
        .period(
            Period::TwoPrior,
            &year_with(&[
                (Metric::TotalRevenue, 90.0),
                (Metric::AccountsReceivable, 12.0),
            ]),
        )
        .build()
}

/// Expected M-Score for `ratios` in `[DSRI, GMI, AQI, SGI, DEPI, SGAI, TATA, LVGI]` order.
pub fn expected_score(ratios: [f64; 8]) -> f64 {
    let weights = [0.920, 0.528, 0.404, 0.892, 0.115, -0.172, 4.679, -0.327];
    -4.840
        + ratios
            .iter()
            .zip(weights.iter())
            .map(|(r, w)| r * w)
            .sum::<f64>()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// One timeseries result entry with points `(asOfDate, value)`; `None`
/// points are emitted as `null` like the live API does.
fn series(name: &str, points: &[Option<(&str, f64)>]) -> Value {
    let values: Vec<Value> = points
        .iter()
        .map(|p| match p {
            Some((date, raw)) => json!({
                "asOfDate": date,
                "periodType": "12M",
                "currencyCode": "USD",
                "reportedValue": { "raw": raw, "fmt": raw.to_string() }
            }),
            None => Value::Null,
        })
        .collect();
    let mut entry = json!({
        "meta": { "symbol": ["ACME"], "type": [name] },
        "timestamp": [1, 2, 3]
    });
    entry[name] = Value::Array(values);
    entry
}

/// A response covering fiscal years 2021-2023, oldest first as the API
/// returns them. Every series carries the same value in each year except
/// revenue, receivables and cost of revenue.
pub fn timeseries_body() -> Value {
    let dates = ["2021-12-31", "2022-12-31", "2023-12-31"];
    let year = |values: [f64; 3]| -> Vec<Option<(&'static str, f64)>> {
        dates.iter().zip(values).map(|(d, v)| Some((*d, v))).collect()
    };

    json!({
        "timeseries": {
            "result": [
                series("annualTotalRevenue", &year([90.0, 100.0, 120.0])),
                series("annualCostOfRevenue", &year([55.0, 55.0, 60.0])),
                series("annualSellingGeneralAndAdministration", &year([20.0, 20.0, 20.0])),
                series("annualNetIncome", &year([10.0, 10.0, 10.0])),
                series("annualAccountsReceivable", &year([12.0, 15.0, 20.0])),
                series("annualCurrentAssets", &year([80.0, 80.0, 80.0])),
                series("annualNetPPE", &year([60.0, 60.0, 60.0])),
                series("annualTotalAssets", &year([200.0, 200.0, 200.0])),
                series("annualTotalLiabilitiesNetMinorityInterest", &year([100.0, 100.0, 100.0])),
                series("annualDepreciationAndAmortization", &year([10.0, 10.0, 10.0])),
                series("annualOperatingCashFlow", &year([12.0, 12.0, 12.0])),
            ],
            "error": null
        }
    })
}

/// `timeseries_body()` with the given series' points replaced.
pub fn timeseries_body_with(name: &str, points: &[Option<(&str, f64)>]) -> Value {
    let mut body = timeseries_body();
    if let Some(results) = body["timeseries"]["result"].as_array_mut() {
        for entry in results.iter_mut() {
            if entry["meta"]["type"][0] == name {
                *entry = series(name, points);
            }
        }
    }
    body
}
