use serde::{Deserialize, Serialize};

use super::metric::Period;
use super::ratio::{Ratio, RatioSet, WeightedRatioSet};
use super::verdict::Verdict;

// ---------------------------------------------------------------------------
// ScoreOutcome — how a score was produced
// ---------------------------------------------------------------------------

/// Tags every [`MScore`] so a fallback value is never mistaken for a real one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// All eight ratios were computed from the snapshot.
    Computed,
    /// The calculation failed and the caller's policy allowed the neutral
    /// all-ones ratio set in its place.
    NeutralFallback { reason: String },
}

// ---------------------------------------------------------------------------
// MScore — result of scoring one period pair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MScore {
    pub current: Period,
    pub prior: Period,
    pub score: f64,
    pub ratios: RatioSet,
    pub weighted: WeightedRatioSet,
    /// Ratios that came out NaN or infinite and were replaced with 1.0.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substituted: Vec<Ratio>,
    pub outcome: ScoreOutcome,
}

impl MScore {
    pub fn is_computed(&self) -> bool {
        self.outcome == ScoreOutcome::Computed
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, ScoreOutcome::NeutralFallback { .. })
    }
}

// ---------------------------------------------------------------------------
// ScoredPeriod — score plus its interpretation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPeriod {
    pub mscore: MScore,
    pub verdict: Verdict,
}
