//! Beneish M-Score SDK for Rust.
//!
//! Fetches three fiscal years of income-statement, balance-sheet and
//! cash-flow data for a ticker, computes the eight Beneish ratios for a pair
//! of periods, combines them with the published coefficients and classifies
//! the result against the -1.78 threshold.
//!
//! # Quick start
//!
//! ```no_run
//! use beneish_sdk::BeneishSdk;
//!
//! let sdk = BeneishSdk::builder().build().unwrap();
//!
//! // Current (t vs t-1) and prior (t-1 vs t-2) scores
//! let analysis = sdk.analyze("NVDA").unwrap();
//! println!("{:.2} {}", analysis.current.mscore.score, analysis.current.verdict);
//! ```
//!
//! The calculator can also be used on its own with any
//! [`FinancialSnapshot`]:
//!
//! ```
//! use beneish_sdk::{FinancialSnapshot, Metric, Period, ScoreCalculator};
//!
//! let mut builder = FinancialSnapshot::builder();
//! for period in [Period::Current, Period::Prior] {
//!     for metric in Metric::ALL {
//!         builder = builder.value(metric, period, 100.0);
//!     }
//! }
//! let result = ScoreCalculator::default()
//!     .score(&builder.build(), Period::Current, Period::Prior)
//!     .unwrap();
//! assert_eq!(result.ratios.sgi, 1.0);
//! ```

pub mod analysis;
#[cfg(feature = "async")]
pub mod async_client;
pub mod calculator;
pub mod config;
pub mod error;
pub mod interpret;
pub mod models;
pub mod provider;
pub mod report;

pub use analysis::{Analysis, ChangeDirection, ScoreChange};
#[cfg(feature = "async")]
pub use async_client::AsyncBeneishSdk;
pub use calculator::{safe_divide, FallbackPolicy, ScoreCalculator};
pub use error::{BeneishError, Result};
pub use interpret::interpret;
pub use models::{
    Classification, FinancialSnapshot, MScore, Metric, Period, Ratio, RatioFlag, RatioSet,
    ScoreOutcome, ScoredPeriod, Verdict, WeightedRatioSet,
};
pub use provider::{FinancialDataProvider, SnapshotFileProvider, YahooProvider};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// BeneishSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BeneishSdk`] instance.
///
/// Use [`BeneishSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](BeneishSdkBuilder::build) to create the SDK.
pub struct BeneishSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    policy: FallbackPolicy,
    offline_snapshot: Option<PathBuf>,
}

impl Default for BeneishSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            policy: FallbackPolicy::default(),
            offline_snapshot: None,
        }
    }
}

impl BeneishSdkBuilder {
    /// Set the timeseries endpoint base URL.
    ///
    /// If not set, `BENEISH_PROVIDER_URL` is used when present, otherwise the
    /// public Yahoo Finance endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose what happens when a period pair cannot be scored.
    ///
    /// Defaults to [`FallbackPolicy::Strict`].
    pub fn fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read snapshots from a local file or directory instead of the network.
    ///
    /// See [`SnapshotFileProvider`] for the accepted layouts.
    pub fn offline_snapshot<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.offline_snapshot = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK. No request is made until the first fetch.
    pub fn build(self) -> Result<BeneishSdk> {
        let offline = self.offline_snapshot.is_some();
        let provider: Box<dyn FinancialDataProvider> = match self.offline_snapshot {
            Some(path) => Box::new(SnapshotFileProvider::new(path)),
            None => {
                let base = self.base_url.unwrap_or_else(config::provider_base);
                Box::new(YahooProvider::new(base, self.timeout)?)
            }
        };
        let mut sdk = BeneishSdk::with_provider(provider, self.policy);
        sdk.offline = offline;
        Ok(sdk)
    }
}

// ---------------------------------------------------------------------------
// BeneishSdk
// ---------------------------------------------------------------------------

/// The main entry point: a data provider paired with a [`ScoreCalculator`].
///
/// Created via [`BeneishSdk::builder()`], or [`BeneishSdk::with_provider()`]
/// for a custom [`FinancialDataProvider`].
pub struct BeneishSdk {
    provider: Box<dyn FinancialDataProvider>,
    calculator: ScoreCalculator,
    offline: bool,
}

impl BeneishSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> BeneishSdkBuilder {
        BeneishSdkBuilder::default()
    }

    /// Pair an arbitrary provider with a calculator using `policy`.
    pub fn with_provider(provider: Box<dyn FinancialDataProvider>, policy: FallbackPolicy) -> Self {
        Self {
            provider,
            calculator: ScoreCalculator::new(policy),
            offline: false,
        }
    }

    /// Fetch the raw snapshot for `ticker`.
    pub fn fetch(&self, ticker: &str) -> Result<FinancialSnapshot> {
        self.provider.fetch(ticker)
    }

    /// Fetch `ticker` and score `current` against `prior`.
    pub fn score(&self, ticker: &str, current: Period, prior: Period) -> Result<ScoredPeriod> {
        let snapshot = self.fetch(ticker)?;
        self.calculator.evaluate(&snapshot, current, prior)
    }

    /// Fetch `ticker` once and score both adjacent period pairs.
    ///
    /// Snapshots returned without a ticker are labelled with the normalized
    /// symbol that was requested.
    pub fn analyze(&self, ticker: &str) -> Result<Analysis> {
        let ticker = provider::normalize_ticker(ticker)?;
        let snapshot = self.fetch(&ticker)?;
        let snapshot = if snapshot.ticker().is_none() {
            snapshot.with_ticker(ticker)
        } else {
            snapshot
        };
        analysis::analyze(&self.calculator, snapshot)
    }

    /// Score an already fetched snapshot.
    pub fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        current: Period,
        prior: Period,
    ) -> Result<ScoredPeriod> {
        self.calculator.evaluate(snapshot, current, prior)
    }

    /// True if snapshots come from local files rather than the network.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Return the calculator used by this SDK.
    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for BeneishSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BeneishSdk(policy={:?}, offline={})",
            self.calculator.policy(),
            self.offline
        )
    }
}
