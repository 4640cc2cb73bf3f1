//! Plain-text rendering of scores and year-over-year comparisons.
//!
//! ```no_run
//! use beneish_sdk::{report, BeneishSdk};
//!
//! let sdk = BeneishSdk::builder().build().unwrap();
//! let analysis = sdk.analyze("NVDA").unwrap();
//! println!("{}", report::Comparison::new(&analysis));
//! println!("{}", report::Report::new(&analysis.ticker, "Current Period", &analysis.current));
//! ```

use std::fmt;

use crate::analysis::{Analysis, ChangeDirection};
use crate::config::COEFFICIENTS;
use crate::models::{ScoreOutcome, ScoredPeriod};

const RULE_WIDTH: usize = 60;

fn heavy_rule(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", "=".repeat(RULE_WIDTH))
}

fn light_rule(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

// ---------------------------------------------------------------------------
// Report — one scored period
// ---------------------------------------------------------------------------

/// Detailed breakdown of one scored period.
pub struct Report<'a> {
    ticker: &'a str,
    label: &'a str,
    scored: &'a ScoredPeriod,
}

impl<'a> Report<'a> {
    pub fn new(ticker: &'a str, label: &'a str, scored: &'a ScoredPeriod) -> Self {
        Self {
            ticker,
            label,
            scored,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mscore = &self.scored.mscore;
        let verdict = &self.scored.verdict;

        writeln!(f)?;
        heavy_rule(f)?;
        writeln!(
            f,
            "BENEISH M-SCORE ANALYSIS FOR {} - {} ({} vs {})",
            self.ticker, self.label, mscore.current, mscore.prior
        )?;
        heavy_rule(f)?;

        if let ScoreOutcome::NeutralFallback { reason } = &mscore.outcome {
            writeln!(f, "\nWARNING: neutral default score, not computed from data.")?;
            writeln!(f, "Reason: {reason}")?;
        }

        writeln!(f, "\nINDIVIDUAL RATIO VALUES:")?;
        light_rule(f)?;
        for (ratio, value) in mscore.ratios.iter() {
            if mscore.substituted.contains(&ratio) {
                writeln!(f, "{ratio}: {value:.4} (invalid value replaced)")?;
            } else {
                writeln!(f, "{ratio}: {value:.4}")?;
            }
        }

        writeln!(f, "\nWEIGHTED COMPONENTS:")?;
        light_rule(f)?;
        for (ratio, weighted) in mscore.weighted.iter() {
            writeln!(
                f,
                "{ratio} ({:+.3} \u{d7} {:.4}): {weighted:.4}",
                COEFFICIENTS.weight(ratio),
                mscore.ratios.get(ratio)
            )?;
        }

        let component_sum = mscore.weighted.sum();
        writeln!(f, "\nFINAL CALCULATION:")?;
        light_rule(f)?;
        writeln!(f, "Constant: {:.2}", COEFFICIENTS.constant)?;
        writeln!(f, "Sum of weighted components: {component_sum:.4}")?;
        writeln!(
            f,
            "M-Score = {:.2} + {component_sum:.4} = {:.4}",
            COEFFICIENTS.constant, mscore.score
        )?;

        writeln!(f, "\nINTERPRETATION:")?;
        light_rule(f)?;
        writeln!(f, "M-Score: {:.4}", mscore.score)?;
        writeln!(f, "Threshold: {:.2}", verdict.threshold)?;
        writeln!(f, "Result: {verdict}")?;

        writeln!(f, "\nCOMPONENT ANALYSIS:")?;
        light_rule(f)?;
        for ratio_verdict in &verdict.ratios {
            writeln!(f, "{}: {ratio_verdict}", ratio_verdict.ratio)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Comparison — year-over-year summary
// ---------------------------------------------------------------------------

/// Summary of the current and prior period scores with the disclaimer.
pub struct Comparison<'a> {
    analysis: &'a Analysis,
}

impl<'a> Comparison<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = &self.analysis.current;

        light_rule(f)?;
        writeln!(f, "\nNOTE:")?;
        writeln!(
            f,
            "The Beneish M-Score is a probabilistic model that identifies the likelihood of"
        )?;
        writeln!(
            f,
            "earnings manipulation. A score greater than -1.78 suggests a high probability of"
        )?;
        writeln!(
            f,
            "earnings manipulation. This is for informational purposes only and should not be"
        )?;
        writeln!(f, "considered financial advice. Further investigation is recommended.")?;
        light_rule(f)?;

        writeln!(f)?;
        heavy_rule(f)?;
        writeln!(f, "RESULTS / SUMMARY - {}", self.analysis.ticker)?;
        heavy_rule(f)?;

        writeln!(f, "\nCurrent Period M-Score: {:.4}", current.mscore.score)?;
        match &self.analysis.prior {
            Some(prior) => writeln!(f, "Prior Period M-Score: {:.4}", prior.mscore.score)?,
            None => writeln!(f, "Prior Period M-Score: unavailable (incomplete t-2 data)")?,
        }
        writeln!(f, "Threshold: {:.2}", current.verdict.threshold)?;

        if let Some(change) = &self.analysis.change {
            let (verb, likelihood) = match change.direction {
                ChangeDirection::Increased => ("increased", "higher"),
                ChangeDirection::Decreased => ("decreased", "lower"),
            };
            writeln!(f, "Change: {verb} by {:.4}", change.magnitude)?;
            writeln!(
                f,
                "The M-Score has {verb} by {:.4}, indicating a {likelihood} likelihood of \
                 earnings manipulation in the current period.",
                change.magnitude
            )?;
        }
        Ok(())
    }
}
