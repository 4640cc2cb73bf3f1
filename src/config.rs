use std::time::Duration;

use crate::models::{Metric, Ratio};

pub const PROVIDER_BASE: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Environment variable that overrides [`PROVIDER_BASE`] when the builder
/// does not set a base URL explicitly.
pub const PROVIDER_URL_ENV: &str = "BENEISH_PROVIDER_URL";

pub const USER_AGENT: &str = concat!("beneish-sdk/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_TICKER: &str = "NVDA";

/// Scores strictly above this value are classified as likely manipulated.
pub const MANIPULATION_THRESHOLD: f64 = -1.78;

/// Yahoo Finance annual timeseries name for each metric.
pub const TIMESERIES_SERIES: [(Metric, &str); 11] = [
    // Income statement
    (Metric::TotalRevenue, "annualTotalRevenue"),
    (Metric::CostOfRevenue, "annualCostOfRevenue"),
    (
        Metric::SellingGeneralAdministrative,
        "annualSellingGeneralAndAdministration",
    ),
    (Metric::NetIncome, "annualNetIncome"),
    // Balance sheet
    (Metric::AccountsReceivable, "annualAccountsReceivable"),
    (Metric::CurrentAssets, "annualCurrentAssets"),
    (Metric::NetPpe, "annualNetPPE"),
    (Metric::TotalAssets, "annualTotalAssets"),
    (
        Metric::TotalLiabilities,
        "annualTotalLiabilitiesNetMinorityInterest",
    ),
    // Cash flow statement
    (
        Metric::DepreciationAmortization,
        "annualDepreciationAndAmortization",
    ),
    (Metric::OperatingCashFlow, "annualOperatingCashFlow"),
];

// ---------------------------------------------------------------------------
// Coefficients — published Beneish weights
// ---------------------------------------------------------------------------

/// Weight applied to each ratio plus the intercept of the M-Score formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub dsri: f64,
    pub gmi: f64,
    pub aqi: f64,
    pub sgi: f64,
    pub depi: f64,
    pub sgai: f64,
    pub tata: f64,
    pub lvgi: f64,
    pub constant: f64,
}

impl Coefficients {
    pub fn weight(&self, ratio: Ratio) -> f64 {
        match ratio {
            Ratio::Dsri => self.dsri,
            Ratio::Gmi => self.gmi,
            Ratio::Aqi => self.aqi,
            Ratio::Sgi => self.sgi,
            Ratio::Depi => self.depi,
            Ratio::Sgai => self.sgai,
            Ratio::Tata => self.tata,
            Ratio::Lvgi => self.lvgi,
        }
    }

    /// Sum of all eight ratio weights (excluding the constant).
    pub fn weight_sum(&self) -> f64 {
        Ratio::ALL.iter().map(|r| self.weight(*r)).sum()
    }
}

pub const COEFFICIENTS: Coefficients = Coefficients {
    dsri: 0.920,
    gmi: 0.528,
    aqi: 0.404,
    sgi: 0.892,
    depi: 0.115,
    sgai: -0.172,
    tata: 4.679,
    lvgi: -0.327,
    constant: -4.840,
};

// ---------------------------------------------------------------------------
// CriticalValues — per-ratio flag thresholds
// ---------------------------------------------------------------------------

/// Per-ratio value above which a ratio is flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub dsri: f64,
    pub gmi: f64,
    pub aqi: f64,
    pub sgi: f64,
    pub depi: f64,
    pub sgai: f64,
    pub tata: f64,
    pub lvgi: f64,
}

impl CriticalValues {
    pub fn threshold(&self, ratio: Ratio) -> f64 {
        match ratio {
            Ratio::Dsri => self.dsri,
            Ratio::Gmi => self.gmi,
            Ratio::Aqi => self.aqi,
            Ratio::Sgi => self.sgi,
            Ratio::Depi => self.depi,
            Ratio::Sgai => self.sgai,
            Ratio::Tata => self.tata,
            Ratio::Lvgi => self.lvgi,
        }
    }
}

pub const CRITICAL_VALUES: CriticalValues = CriticalValues {
    dsri: 1.031,
    gmi: 1.193,
    aqi: 1.254,
    sgi: 1.607,
    depi: 1.077,
    sgai: 1.041,
    tata: 0.018,
    lvgi: 1.111,
};

/// Provider base URL: the environment override if set, else [`PROVIDER_BASE`].
pub fn provider_base() -> String {
    std::env::var(PROVIDER_URL_ENV)
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| PROVIDER_BASE.to_string())
}
