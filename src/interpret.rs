//! Threshold-based interpretation of an M-Score and its ratios.

use crate::config::{CRITICAL_VALUES, MANIPULATION_THRESHOLD};
use crate::models::{Classification, RatioFlag, RatioSet, RatioVerdict, Verdict};

/// Overall classification: likely manipulated iff `score > -1.78`.
pub fn classify(score: f64) -> Classification {
    if score > MANIPULATION_THRESHOLD {
        Classification::LikelyManipulated
    } else {
        Classification::LowRisk
    }
}

/// Classify the score and flag each ratio above its critical value.
pub fn interpret(score: f64, ratios: &RatioSet) -> Verdict {
    let ratios = ratios
        .iter()
        .map(|(ratio, value)| {
            let critical_value = CRITICAL_VALUES.threshold(ratio);
            let flag = if value > critical_value {
                RatioFlag::Flagged
            } else {
                RatioFlag::Normal
            };
            RatioVerdict {
                ratio,
                value,
                critical_value,
                flag,
            }
        })
        .collect();

    Verdict {
        score,
        threshold: MANIPULATION_THRESHOLD,
        classification: classify(score),
        ratios,
    }
}
