//! M-Score calculation: ratio formulas, aggregation and the fallback policy.
//!
//! Every division in the ratio formulas goes through [`safe_divide`], so a
//! zero denominator yields the neutral value instead of a fault. Any ratio
//! that still comes out NaN or infinite (e.g. `0 / 0` after subtraction,
//! or a NaN in the input) is replaced with 1.0 and reported in
//! [`MScore::substituted`].

use tracing::warn;

use crate::config::{Coefficients, COEFFICIENTS};
use crate::error::{BeneishError, Result};
use crate::interpret::interpret;
use crate::models::{
    FinancialSnapshot, MScore, Metric, Period, Ratio, RatioSet, ScoreOutcome, ScoredPeriod,
    WeightedRatioSet,
};

/// Value substituted for zero denominators and non-finite ratios.
pub const NEUTRAL: f64 = 1.0;

/// Divide, returning `default` when `denominator` is exactly zero.
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 {
        return default;
    }
    numerator / denominator
}

fn div(numerator: f64, denominator: f64) -> f64 {
    safe_divide(numerator, denominator, NEUTRAL)
}

// ---------------------------------------------------------------------------
// Ratio computation
// ---------------------------------------------------------------------------

/// Ratios for one period pair, after non-finite values were neutralized.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedRatios {
    pub ratios: RatioSet,
    /// Ratios replaced with 1.0, in [`Ratio::ALL`] order.
    pub substituted: Vec<Ratio>,
}

/// The eleven metrics of one period, read out of a snapshot.
struct PeriodFacts {
    revenue: f64,
    cogs: f64,
    sga: f64,
    net_income: f64,
    receivables: f64,
    current_assets: f64,
    net_ppe: f64,
    total_assets: f64,
    total_liabilities: f64,
    depreciation: f64,
    operating_cash_flow: f64,
}

impl PeriodFacts {
    fn read(snapshot: &FinancialSnapshot, period: Period) -> Result<Self> {
        Ok(Self {
            revenue: snapshot.require(Metric::TotalRevenue, period)?,
            cogs: snapshot.require(Metric::CostOfRevenue, period)?,
            sga: snapshot.require(Metric::SellingGeneralAdministrative, period)?,
            net_income: snapshot.require(Metric::NetIncome, period)?,
            receivables: snapshot.require(Metric::AccountsReceivable, period)?,
            current_assets: snapshot.require(Metric::CurrentAssets, period)?,
            net_ppe: snapshot.require(Metric::NetPpe, period)?,
            total_assets: snapshot.require(Metric::TotalAssets, period)?,
            total_liabilities: snapshot.require(Metric::TotalLiabilities, period)?,
            depreciation: snapshot.require(Metric::DepreciationAmortization, period)?,
            operating_cash_flow: snapshot.require(Metric::OperatingCashFlow, period)?,
        })
    }

    fn receivables_to_sales(&self) -> f64 {
        div(self.receivables, self.revenue)
    }

    fn gross_margin(&self) -> f64 {
        div(self.revenue - self.cogs, self.revenue)
    }

    fn asset_quality(&self) -> f64 {
        1.0 - div(self.current_assets + self.net_ppe, self.total_assets)
    }

    fn depreciation_rate(&self) -> f64 {
        div(self.depreciation, self.net_ppe + self.depreciation)
    }

    fn sga_rate(&self) -> f64 {
        div(self.sga, self.revenue)
    }

    fn leverage(&self) -> f64 {
        div(self.total_liabilities, self.total_assets)
    }
}

/// Compute the eight ratios comparing `current` against `prior`.
///
/// Fails with [`BeneishError::MissingData`] if any of the eleven metrics is
/// absent for either period, and with [`BeneishError::InvalidArgument`] if
/// `current` is older than `prior`.
pub fn compute_ratios(
    snapshot: &FinancialSnapshot,
    current: Period,
    prior: Period,
) -> Result<ComputedRatios> {
    check_order(current, prior)?;

    let cur = PeriodFacts::read(snapshot, current)?;
    let pri = PeriodFacts::read(snapshot, prior)?;

    let raw = RatioSet {
        dsri: div(cur.receivables_to_sales(), pri.receivables_to_sales()),
        gmi: div(pri.gross_margin(), cur.gross_margin()),
        aqi: div(cur.asset_quality(), pri.asset_quality()),
        sgi: div(cur.revenue, pri.revenue),
        depi: div(pri.depreciation_rate(), cur.depreciation_rate()),
        sgai: div(cur.sga_rate(), pri.sga_rate()),
        tata: div(cur.net_income - cur.operating_cash_flow, cur.total_assets),
        lvgi: div(cur.leverage(), pri.leverage()),
    };

    Ok(neutralize(raw))
}

/// Replace every NaN or infinite ratio with [`NEUTRAL`], logging each one.
pub fn neutralize(mut ratios: RatioSet) -> ComputedRatios {
    let mut substituted = Vec::new();
    for ratio in Ratio::ALL {
        let value = ratios.get(ratio);
        if !value.is_finite() {
            warn!(
                ratio = %ratio,
                value,
                "ratio calculation resulted in an invalid value; using 1.0 instead"
            );
            ratios.set(ratio, NEUTRAL);
            substituted.push(ratio);
        }
    }
    ComputedRatios { ratios, substituted }
}

fn check_order(current: Period, prior: Period) -> Result<()> {
    if current > prior {
        return Err(BeneishError::InvalidArgument(format!(
            "current period {current} is older than prior period {prior}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// `constant + Σ coefficient × ratio`, with the weighted components.
pub fn aggregate(ratios: &RatioSet, coefficients: &Coefficients) -> (f64, WeightedRatioSet) {
    let weighted = WeightedRatioSet::from_ratios(ratios, coefficients);
    (coefficients.constant + weighted.sum(), weighted)
}

// ---------------------------------------------------------------------------
// FallbackPolicy
// ---------------------------------------------------------------------------

/// What to do when a period pair cannot be scored from the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the error to the caller.
    #[default]
    Strict,
    /// Return the neutral all-ones score, tagged
    /// [`ScoreOutcome::NeutralFallback`].
    NeutralDefault,
}

// ---------------------------------------------------------------------------
// ScoreCalculator
// ---------------------------------------------------------------------------

/// Stateless M-Score calculator.
///
/// Holds only the coefficient table and the fallback policy, both fixed at
/// construction, so one calculator can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCalculator {
    coefficients: Coefficients,
    policy: FallbackPolicy,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(FallbackPolicy::default())
    }
}

impl ScoreCalculator {
    /// Calculator using the published Beneish coefficients.
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            coefficients: COEFFICIENTS,
            policy,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Score `current` against `prior`.
    ///
    /// Under [`FallbackPolicy::Strict`] a missing metric is returned as
    /// [`BeneishError::MissingData`]. Under
    /// [`FallbackPolicy::NeutralDefault`] it yields the neutral score instead,
    /// tagged so it cannot pass as a computed one. Period order errors and
    /// [`BeneishError::NonFiniteScore`] are always returned.
    pub fn score(
        &self,
        snapshot: &FinancialSnapshot,
        current: Period,
        prior: Period,
    ) -> Result<MScore> {
        check_order(current, prior)?;

        let (computed, outcome) = match compute_ratios(snapshot, current, prior) {
            Ok(computed) => (computed, ScoreOutcome::Computed),
            Err(e @ BeneishError::MissingData { .. })
                if self.policy == FallbackPolicy::NeutralDefault =>
            {
                warn!(
                    ticker = snapshot.ticker().unwrap_or("unknown"),
                    current = %current,
                    prior = %prior,
                    error = %e,
                    "M-Score calculation failed; returning neutral default"
                );
                let fallback = ComputedRatios {
                    ratios: RatioSet::neutral(),
                    substituted: Vec::new(),
                };
                (
                    fallback,
                    ScoreOutcome::NeutralFallback {
                        reason: e.to_string(),
                    },
                )
            }
            Err(e) => return Err(e),
        };

        let (score, weighted) = aggregate(&computed.ratios, &self.coefficients);
        if !score.is_finite() {
            warn!(
                ticker = snapshot.ticker().unwrap_or("unknown"),
                current = %current,
                prior = %prior,
                score,
                "weighted ratios overflowed to a non-finite M-Score"
            );
            return Err(BeneishError::NonFiniteScore { current, prior });
        }

        Ok(MScore {
            current,
            prior,
            score,
            ratios: computed.ratios,
            weighted,
            substituted: computed.substituted,
            outcome,
        })
    }

    /// Score a period pair and interpret the result.
    pub fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        current: Period,
        prior: Period,
    ) -> Result<ScoredPeriod> {
        let mscore = self.score(snapshot, current, prior)?;
        let verdict = interpret(mscore.score, &mscore.ratios);
        Ok(ScoredPeriod { mscore, verdict })
    }
}
