use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BeneishError;

// ---------------------------------------------------------------------------
// Metric — one financial statement line item
// ---------------------------------------------------------------------------

/// The eleven statement line items the M-Score needs for every period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    TotalRevenue,
    CostOfRevenue,
    SellingGeneralAdministrative,
    NetIncome,
    AccountsReceivable,
    CurrentAssets,
    NetPpe,
    TotalAssets,
    TotalLiabilities,
    DepreciationAmortization,
    OperatingCashFlow,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::TotalRevenue,
        Metric::CostOfRevenue,
        Metric::SellingGeneralAdministrative,
        Metric::NetIncome,
        Metric::AccountsReceivable,
        Metric::CurrentAssets,
        Metric::NetPpe,
        Metric::TotalAssets,
        Metric::TotalLiabilities,
        Metric::DepreciationAmortization,
        Metric::OperatingCashFlow,
    ];

    /// Statement line item label, e.g. `"Total Revenue"`.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalRevenue => "Total Revenue",
            Metric::CostOfRevenue => "Cost Of Revenue",
            Metric::SellingGeneralAdministrative => "Selling General And Administration",
            Metric::NetIncome => "Net Income",
            Metric::AccountsReceivable => "Accounts Receivable",
            Metric::CurrentAssets => "Current Assets",
            Metric::NetPpe => "Net PPE",
            Metric::TotalAssets => "Total Assets",
            Metric::TotalLiabilities => "Total Liabilities Net Minority Interest",
            Metric::DepreciationAmortization => "Depreciation And Amortization",
            Metric::OperatingCashFlow => "Operating Cash Flow",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Period — relative fiscal-year marker
// ---------------------------------------------------------------------------

/// Relative fiscal period: `t` is the most recent year, `t-2` the oldest.
///
/// Ordering follows recency, so `Current < Prior < TwoPrior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "t")]
    Current,
    #[serde(rename = "t-1")]
    Prior,
    #[serde(rename = "t-2")]
    TwoPrior,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Current, Period::Prior, Period::TwoPrior];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Current => "t",
            Period::Prior => "t-1",
            Period::TwoPrior => "t-2",
        }
    }

    /// Number of fiscal years back from the most recent report.
    pub fn years_back(&self) -> usize {
        match self {
            Period::Current => 0,
            Period::Prior => 1,
            Period::TwoPrior => 2,
        }
    }

    pub fn from_years_back(years: usize) -> Option<Period> {
        Period::ALL.get(years).copied()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = BeneishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "t" => Ok(Period::Current),
            "t-1" => Ok(Period::Prior),
            "t-2" => Ok(Period::TwoPrior),
            other => Err(BeneishError::InvalidArgument(format!(
                "Unknown period label: {other:?} (expected t, t-1 or t-2)"
            ))),
        }
    }
}
