//! Async wrapper around [`BeneishSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs each SDK call on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the provider.
//!
//! # Example
//!
//! ```no_run
//! use beneish_sdk::AsyncBeneishSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncBeneishSdk::builder().build().await.unwrap();
//!     let analysis = sdk.analyze("NVDA").await.unwrap();
//!     println!("{:.2}", analysis.current.mscore.score);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::calculator::FallbackPolicy;
use crate::error::{BeneishError, Result};
use crate::models::{FinancialSnapshot, Period, ScoredPeriod};
use crate::{config, Analysis, BeneishSdk};

// ---------------------------------------------------------------------------
// AsyncBeneishSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncBeneishSdk`] instance.
pub struct AsyncBeneishSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    policy: FallbackPolicy,
    offline_snapshot: Option<PathBuf>,
}

impl Default for AsyncBeneishSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            policy: FallbackPolicy::default(),
            offline_snapshot: None,
        }
    }
}

impl AsyncBeneishSdkBuilder {
    /// Set the timeseries endpoint base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose what happens when a period pair cannot be scored.
    pub fn fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read snapshots from a local file or directory instead of the network.
    pub fn offline_snapshot<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.offline_snapshot = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the async SDK.
    ///
    /// The blocking HTTP client is constructed on the blocking thread pool,
    /// since it may not be created from within an async context.
    pub async fn build(self) -> Result<AsyncBeneishSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = BeneishSdk::builder()
                .timeout(self.timeout)
                .fallback_policy(self.policy);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(path) = self.offline_snapshot {
                builder = builder.offline_snapshot(path);
            }
            let sdk = builder.build()?;
            Ok(AsyncBeneishSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| BeneishError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncBeneishSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`BeneishSdk`].
///
/// The SDK holds no mutable state, so it is shared behind an [`Arc`] and
/// every call is dispatched to [`tokio::task::spawn_blocking`].
#[derive(Clone)]
pub struct AsyncBeneishSdk {
    inner: Arc<BeneishSdk>,
}

impl AsyncBeneishSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncBeneishSdkBuilder {
        AsyncBeneishSdkBuilder::default()
    }

    /// Wrap an already built [`BeneishSdk`].
    pub fn from_sdk(sdk: BeneishSdk) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&BeneishSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| BeneishError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch the raw snapshot for `ticker`.
    pub async fn fetch(&self, ticker: &str) -> Result<FinancialSnapshot> {
        let ticker = ticker.to_string();
        self.run(move |s| s.fetch(&ticker)).await
    }

    /// Fetch `ticker` and score `current` against `prior`.
    pub async fn score(&self, ticker: &str, current: Period, prior: Period) -> Result<ScoredPeriod> {
        let ticker = ticker.to_string();
        self.run(move |s| s.score(&ticker, current, prior)).await
    }

    /// Fetch `ticker` once and score both adjacent period pairs.
    pub async fn analyze(&self, ticker: &str) -> Result<Analysis> {
        let ticker = ticker.to_string();
        self.run(move |s| s.analyze(&ticker)).await
    }

    /// Close the SDK, releasing the HTTP client on the blocking thread pool.
    ///
    /// Other clones keep the SDK alive until they are closed or dropped.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| BeneishError::InvalidArgument(format!("Task join error: {e}")))
    }
}
