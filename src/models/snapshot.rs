use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::metric::{Metric, Period};
use crate::error::{BeneishError, Result};

// ---------------------------------------------------------------------------
// FinancialSnapshot — statement facts for up to three fiscal periods
// ---------------------------------------------------------------------------

/// Immutable mapping of `(Metric, Period)` to a reported value.
///
/// Serialized as:
///
/// ```json
/// {
///   "ticker": "ACME",
///   "periods": {
///     "t":   { "totalRevenue": 120.0, "costOfRevenue": 60.0, ... },
///     "t-1": { "totalRevenue": 100.0, ... }
///   }
/// }
/// ```
///
/// A snapshot may be partial; completeness is checked when a period pair is
/// scored, not when the snapshot is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ticker: Option<String>,
    #[serde(default)]
    periods: BTreeMap<Period, BTreeMap<Metric, f64>>,
}

impl FinancialSnapshot {
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }

    /// Return the same snapshot labelled with `ticker`.
    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    pub fn get(&self, metric: Metric, period: Period) -> Option<f64> {
        self.periods
            .get(&period)
            .and_then(|values| values.get(&metric))
            .copied()
    }

    /// Like [`get`](Self::get), but an absent value is a
    /// [`BeneishError::MissingData`] error.
    pub fn require(&self, metric: Metric, period: Period) -> Result<f64> {
        self.get(metric, period)
            .ok_or(BeneishError::MissingData { metric, period })
    }

    /// Metrics with no value for `period`, in [`Metric::ALL`] order.
    pub fn missing(&self, period: Period) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.get(*m, period).is_none())
            .collect()
    }

    /// True if all eleven metrics are present for `period`.
    pub fn is_complete(&self, period: Period) -> bool {
        self.missing(period).is_empty()
    }

    /// Periods for which all eleven metrics are present, most recent first.
    pub fn complete_periods(&self) -> Vec<Period> {
        Period::ALL
            .iter()
            .copied()
            .filter(|p| self.is_complete(*p))
            .collect()
    }

    /// Total number of stored values (at most 33).
    pub fn len(&self) -> usize {
        self.periods.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// SnapshotBuilder
// ---------------------------------------------------------------------------

/// Builder for [`FinancialSnapshot`]. Later values overwrite earlier ones.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    ticker: Option<String>,
    periods: BTreeMap<Period, BTreeMap<Metric, f64>>,
}

impl SnapshotBuilder {
    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    pub fn value(mut self, metric: Metric, period: Period, value: f64) -> Self {
        self.periods.entry(period).or_default().insert(metric, value);
        self
    }

    /// Set several metrics of one period at once.
    pub fn period(mut self, period: Period, values: &[(Metric, f64)]) -> Self {
        let entry = self.periods.entry(period).or_default();
        for (metric, value) in values {
            entry.insert(*metric, *value);
        }
        self
    }

    pub fn build(self) -> FinancialSnapshot {
        FinancialSnapshot {
            ticker: self.ticker,
            periods: self.periods,
        }
    }
}
