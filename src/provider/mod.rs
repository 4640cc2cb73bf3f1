//! Financial data providers.
//!
//! A provider turns a ticker into a [`FinancialSnapshot`]. Fetch failures and
//! statements too incomplete to score are reported as
//! [`BeneishError::ProviderUnavailable`], which callers should present as
//! "insufficient data" rather than as a calculation fault.

pub mod file;
pub mod yahoo;

pub use file::SnapshotFileProvider;
pub use yahoo::YahooProvider;

use crate::error::{BeneishError, Result};
use crate::models::{FinancialSnapshot, Metric, Period};

/// Source of statement data for a ticker.
pub trait FinancialDataProvider: Send + Sync {
    /// Fetch up to three fiscal periods of statement data for `ticker`.
    fn fetch(&self, ticker: &str) -> Result<FinancialSnapshot>;
}

/// Trim and upper-case a ticker symbol; empty symbols are rejected.
pub fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(BeneishError::InvalidArgument(
            "ticker symbol must not be empty".into(),
        ));
    }
    Ok(ticker)
}

/// Require every metric for `t` and `t-1`, the minimum for one M-Score.
///
/// `t-2` stays optional; without it only the current period can be scored.
pub fn ensure_scorable(ticker: &str, snapshot: &FinancialSnapshot) -> Result<()> {
    let gaps: Vec<String> = [Period::Current, Period::Prior]
        .iter()
        .flat_map(|period| {
            snapshot
                .missing(*period)
                .into_iter()
                .map(move |metric: Metric| format!("{metric} ({period})"))
        })
        .collect();

    if gaps.is_empty() {
        return Ok(());
    }

    Err(BeneishError::ProviderUnavailable(format!(
        "insufficient data for {ticker}: missing {}. This is common for banks and \
         other financial-sector companies with non-standard statements",
        gaps.join(", ")
    )))
}
