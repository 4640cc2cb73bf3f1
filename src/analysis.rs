//! Year-over-year analysis: the current period (t vs t-1) alongside the
//! prior period (t-1 vs t-2) and the change between their scores.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::ScoreCalculator;
use crate::error::Result;
use crate::models::{FinancialSnapshot, Period, ScoredPeriod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Increased,
    Decreased,
}

/// Movement of the M-Score from the prior period to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreChange {
    /// Absolute size of the change.
    pub magnitude: f64,
    pub direction: ChangeDirection,
}

impl ScoreChange {
    /// An unchanged score counts as a decrease of zero.
    pub fn between(current: f64, prior: f64) -> Self {
        if current > prior {
            Self {
                magnitude: current - prior,
                direction: ChangeDirection::Increased,
            }
        } else {
            Self {
                magnitude: prior - current,
                direction: ChangeDirection::Decreased,
            }
        }
    }

    /// Signed change, positive when the score rose.
    pub fn delta(&self) -> f64 {
        match self.direction {
            ChangeDirection::Increased => self.magnitude,
            ChangeDirection::Decreased => -self.magnitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub ticker: String,
    pub snapshot: FinancialSnapshot,
    /// `t` scored against `t-1`.
    pub current: ScoredPeriod,
    /// `t-1` scored against `t-2`, when the snapshot holds a complete `t-2`.
    pub prior: Option<ScoredPeriod>,
    pub change: Option<ScoreChange>,
}

/// Score both adjacent period pairs of `snapshot`.
///
/// The current pair follows the calculator's fallback policy. The prior pair
/// is only scored when every `t-2` metric is present, so a short history
/// never turns into an error or a fallback score for the older year.
pub fn analyze(calculator: &ScoreCalculator, snapshot: FinancialSnapshot) -> Result<Analysis> {
    let ticker = snapshot.ticker().unwrap_or_default().to_string();
    let current = calculator.evaluate(&snapshot, Period::Current, Period::Prior)?;

    let prior = if snapshot.is_complete(Period::TwoPrior) {
        Some(calculator.evaluate(&snapshot, Period::Prior, Period::TwoPrior)?)
    } else {
        debug!(
            ticker = %ticker,
            missing = snapshot.missing(Period::TwoPrior).len(),
            "skipping prior-period score: t-2 is incomplete"
        );
        None
    };

    let change = prior
        .as_ref()
        .map(|p| ScoreChange::between(current.mscore.score, p.mscore.score));

    Ok(Analysis {
        ticker,
        snapshot,
        current,
        prior,
        change,
    })
}
