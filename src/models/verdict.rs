use serde::{Deserialize, Serialize};
use std::fmt;

use super::ratio::Ratio;

// ---------------------------------------------------------------------------
// Classification — overall M-Score verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    LikelyManipulated,
    LowRisk,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::LikelyManipulated => {
                f.write_str("High probability of earnings manipulation.")
            }
            Classification::LowRisk => f.write_str("Low probability of earnings manipulation."),
        }
    }
}

// ---------------------------------------------------------------------------
// RatioVerdict — one ratio against its critical value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioFlag {
    Flagged,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioVerdict {
    pub ratio: Ratio,
    pub value: f64,
    pub critical_value: f64,
    pub flag: RatioFlag,
}

impl RatioVerdict {
    pub fn is_flagged(&self) -> bool {
        self.flag == RatioFlag::Flagged
    }
}

impl fmt::Display for RatioVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flag {
            RatioFlag::Flagged => write!(f, "High - {}", self.ratio.flag_description()),
            RatioFlag::Normal => f.write_str("Normal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub score: f64,
    pub threshold: f64,
    pub classification: Classification,
    /// One entry per ratio, in [`Ratio::ALL`] order.
    pub ratios: Vec<RatioVerdict>,
}

impl Verdict {
    pub fn is_likely_manipulated(&self) -> bool {
        self.classification == Classification::LikelyManipulated
    }

    pub fn ratio(&self, ratio: Ratio) -> Option<&RatioVerdict> {
        self.ratios.iter().find(|v| v.ratio == ratio)
    }

    pub fn flagged(&self) -> impl Iterator<Item = &RatioVerdict> + '_ {
        self.ratios.iter().filter(|v| v.is_flagged())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classification)
    }
}
