use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Coefficients;

// ---------------------------------------------------------------------------
// Ratio — the eight Beneish indices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ratio {
    Dsri,
    Gmi,
    Aqi,
    Sgi,
    Depi,
    Sgai,
    Tata,
    Lvgi,
}

impl Ratio {
    pub const ALL: [Ratio; 8] = [
        Ratio::Dsri,
        Ratio::Gmi,
        Ratio::Aqi,
        Ratio::Sgi,
        Ratio::Depi,
        Ratio::Sgai,
        Ratio::Tata,
        Ratio::Lvgi,
    ];

    /// Short name, e.g. `"DSRI"`.
    pub fn name(&self) -> &'static str {
        match self {
            Ratio::Dsri => "DSRI",
            Ratio::Gmi => "GMI",
            Ratio::Aqi => "AQI",
            Ratio::Sgi => "SGI",
            Ratio::Depi => "DEPI",
            Ratio::Sgai => "SGAI",
            Ratio::Tata => "TATA",
            Ratio::Lvgi => "LVGI",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Ratio::Dsri => "Days Sales in Receivables Index",
            Ratio::Gmi => "Gross Margin Index",
            Ratio::Aqi => "Asset Quality Index",
            Ratio::Sgi => "Sales Growth Index",
            Ratio::Depi => "Depreciation Index",
            Ratio::Sgai => "Selling, General and Administrative Expenses Index",
            Ratio::Tata => "Total Accruals to Total Assets",
            Ratio::Lvgi => "Leverage Index",
        }
    }

    /// What a value above the critical value suggests.
    pub fn flag_description(&self) -> &'static str {
        match self {
            Ratio::Dsri => "Possible inflated revenues",
            Ratio::Gmi => "Deteriorating margins, negative signal",
            Ratio::Aqi => "Possible capitalization of expenses",
            Ratio::Sgi => "Unusual sales growth, pressure to manipulate",
            Ratio::Depi => "Possible slowing of depreciation rates",
            Ratio::Sgai => "Loss of cost control",
            Ratio::Tata => "Possible earnings manipulation through accruals",
            Ratio::Lvgi => "Increased leverage, potential manipulation to meet debt covenants",
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// RatioSet — one value per ratio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct RatioSet {
    pub dsri: f64,
    pub gmi: f64,
    pub aqi: f64,
    pub sgi: f64,
    pub depi: f64,
    pub sgai: f64,
    pub tata: f64,
    pub lvgi: f64,
}

impl RatioSet {
    /// Every ratio set to the neutral value 1.0.
    pub fn neutral() -> Self {
        Self::splat(1.0)
    }

    fn splat(value: f64) -> Self {
        Self {
            dsri: value,
            gmi: value,
            aqi: value,
            sgi: value,
            depi: value,
            sgai: value,
            tata: value,
            lvgi: value,
        }
    }

    pub fn get(&self, ratio: Ratio) -> f64 {
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

    pub fn set(&mut self, ratio: Ratio, value: f64) {
        let slot = match ratio {
            Ratio::Dsri => &mut self.dsri,
            Ratio::Gmi => &mut self.gmi,
            Ratio::Aqi => &mut self.aqi,
            Ratio::Sgi => &mut self.sgi,
            Ratio::Depi => &mut self.depi,
            Ratio::Sgai => &mut self.sgai,
            Ratio::Tata => &mut self.tata,
            Ratio::Lvgi => &mut self.lvgi,
        };
        *slot = value;
    }

    /// `(ratio, value)` pairs in [`Ratio::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Ratio, f64)> + '_ {
        Ratio::ALL.iter().map(move |r| (*r, self.get(*r)))
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, v)| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// WeightedRatioSet — ratio × coefficient
// ---------------------------------------------------------------------------

/// Each ratio multiplied by its published coefficient. Same keys as
/// [`RatioSet`]; the sum plus the constant is the M-Score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedRatioSet(RatioSet);

impl WeightedRatioSet {
    pub fn from_ratios(ratios: &RatioSet, coefficients: &Coefficients) -> Self {
        let mut weighted = *ratios;
        for (ratio, value) in ratios.iter() {
            weighted.set(ratio, value * coefficients.weight(ratio));
        }
        Self(weighted)
    }

    pub fn get(&self, ratio: Ratio) -> f64 {
        self.0.get(ratio)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ratio, f64)> + '_ {
        self.0.iter()
    }

    /// Sum of the eight weighted components.
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }
}
