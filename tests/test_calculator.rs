//! Calculator tests: safe division, ratio formulas, aggregation and the
//! fallback policy.

mod common;

use beneish_sdk::calculator::{aggregate, compute_ratios, neutralize, NEUTRAL};
use beneish_sdk::config::COEFFICIENTS;
use beneish_sdk::{
    safe_divide, BeneishError, FallbackPolicy, FinancialSnapshot, Metric, Period, Ratio, RatioSet,
    ScoreCalculator, ScoreOutcome,
};
use common::{assert_close, baseline_year, expected_score, identical_periods, worked_example, year_with};

// ---------------------------------------------------------------------------
// safe_divide
// ---------------------------------------------------------------------------

#[test]
fn safe_divide_returns_default_for_zero_denominator() {
    for numerator in [0.0, 1.0, -3.5, 1e300, f64::NAN] {
        assert_eq!(safe_divide(numerator, 0.0, 1.0), 1.0);
        assert_eq!(safe_divide(numerator, 0.0, 7.25), 7.25);
        assert_eq!(safe_divide(numerator, -0.0, 2.0), 2.0);
    }
}

#[test]
fn safe_divide_divides_for_nonzero_denominator() {
    let cases = [(1.0, 4.0), (-9.0, 3.0), (0.0, 5.0), (2.5, -0.5), (1e-12, 1e-6)];
    for (n, d) in cases {
        assert_eq!(safe_divide(n, d, 1.0), n / d);
    }
}

// ---------------------------------------------------------------------------
// Ratio formulas
// ---------------------------------------------------------------------------

#[test]
fn worked_example_ratios() {
    let computed = compute_ratios(&worked_example(), Period::Current, Period::Prior).unwrap();
    let r = computed.ratios;

    assert_close(r.dsri, (20.0 / 120.0) / (15.0 / 100.0), 1e-12);
    assert_close(r.dsri, 1.111, 1e-3);
    assert_close(r.gmi, 0.45 / 0.5, 1e-12);
    assert_eq!(r.aqi, 1.0);
    assert_close(r.sgi, 1.2, 1e-12);
    assert_eq!(r.depi, 1.0);
    assert_close(r.sgai, (20.0 / 120.0) / (20.0 / 100.0), 1e-12);
    assert_close(r.tata, (10.0 - 12.0) / 200.0, 1e-12);
    assert_eq!(r.lvgi, 1.0);
    assert!(computed.substituted.is_empty());
}

#[test]
fn worked_example_score_sums_against_coefficients() {
    let result = ScoreCalculator::default()
        .score(&worked_example(), Period::Current, Period::Prior)
        .unwrap();

    let r = result.ratios;
    let expected = expected_score([r.dsri, r.gmi, r.aqi, r.sgi, r.depi, r.sgai, r.tata, r.lvgi]);
    assert_close(result.score, expected, 1e-12);
    assert_close(result.score, -2.2703, 1e-4);
    assert_eq!(result.outcome, ScoreOutcome::Computed);

    for (ratio, weighted) in result.weighted.iter() {
        assert_close(weighted, r.get(ratio) * COEFFICIENTS.weight(ratio), 1e-15);
    }
    assert_close(result.score, COEFFICIENTS.constant + result.weighted.sum(), 1e-12);
}

#[test]
fn identical_periods_give_unit_indices() {
    let snapshot = identical_periods(&baseline_year());
    let result = ScoreCalculator::default()
        .score(&snapshot, Period::Current, Period::Prior)
        .unwrap();

    for ratio in Ratio::ALL.iter().filter(|r| **r != Ratio::Tata) {
        assert_eq!(result.ratios.get(*ratio), 1.0, "{ratio} should be exactly 1.0");
    }
    // TATA is a single-period level, not an index.
    assert_close(result.ratios.tata, -0.01, 1e-15);
}

#[test]
fn identical_periods_with_unit_accruals_score_constant_plus_weights() {
    // (212 - 12) / 200 = 1.0
    let year = year_with(&[(Metric::NetIncome, 212.0)]);
    let result = ScoreCalculator::default()
        .score(&identical_periods(&year), Period::Current, Period::Prior)
        .unwrap();

    assert_eq!(result.ratios, RatioSet::neutral());
    assert_close(
        result.score,
        COEFFICIENTS.constant + COEFFICIENTS.weight_sum(),
        1e-12,
    );
}

#[test]
fn same_period_on_both_sides_is_allowed() {
    let result = ScoreCalculator::default()
        .score(&worked_example(), Period::Current, Period::Current)
        .unwrap();
    assert_eq!(result.ratios.dsri, 1.0);
    assert_eq!(result.ratios.sgi, 1.0);
}

#[test]
fn non_adjacent_pair_compares_t_with_t_minus_2() {
    let snapshot = common::three_years("ACME");
    let result = ScoreCalculator::default()
        .score(&snapshot, Period::Current, Period::TwoPrior)
        .unwrap();

    assert_eq!(result.current, Period::Current);
    assert_eq!(result.prior, Period::TwoPrior);
    assert_close(result.ratios.sgi, 120.0 / 90.0, 1e-12);
    assert_close(result.ratios.dsri, (20.0 / 120.0) / (12.0 / 90.0), 1e-12);
}

#[test]
fn reversed_period_order_is_rejected() {
    let err = ScoreCalculator::default()
        .score(&worked_example(), Period::Prior, Period::Current)
        .unwrap_err();
    assert!(matches!(err, BeneishError::InvalidArgument(_)));

    // Not a data problem, so the fallback policy does not apply either.
    let err = ScoreCalculator::new(FallbackPolicy::NeutralDefault)
        .score(&worked_example(), Period::Prior, Period::Current)
        .unwrap_err();
    assert!(matches!(err, BeneishError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// Zero denominators and non-finite values
// ---------------------------------------------------------------------------

#[test]
fn zero_prior_revenue_falls_back_to_neutral_division() {
    let snapshot = FinancialSnapshot::builder()
        .period(Period::Current, &year_with(&[(Metric::TotalRevenue, 120.0)]))
        .period(Period::Prior, &year_with(&[(Metric::TotalRevenue, 0.0)]))
        .build();

    let r = compute_ratios(&snapshot, Period::Current, Period::Prior)
        .unwrap()
        .ratios;
    assert_eq!(r.sgi, 1.0);
    assert!(r.is_finite());
}

#[test]
fn zero_total_assets_everywhere_stays_finite() {
    let year = year_with(&[(Metric::TotalAssets, 0.0)]);
    let result = ScoreCalculator::default()
        .score(&identical_periods(&year), Period::Current, Period::Prior)
        .unwrap();

    assert!(result.ratios.is_finite());
    assert!(result.score.is_finite());
    assert_eq!(result.ratios.tata, 1.0);
    assert!(result.substituted.is_empty());
}

#[test]
fn nan_input_ratios_are_replaced_and_reported() {
    let snapshot = FinancialSnapshot::builder()
        .period(Period::Current, &year_with(&[(Metric::TotalRevenue, f64::NAN)]))
        .period(Period::Prior, &baseline_year())
        .build();

    let result = ScoreCalculator::default()
        .score(&snapshot, Period::Current, Period::Prior)
        .unwrap();

    assert_eq!(
        result.substituted,
        vec![Ratio::Dsri, Ratio::Gmi, Ratio::Sgi, Ratio::Sgai]
    );
    for ratio in &result.substituted {
        assert_eq!(result.ratios.get(*ratio), NEUTRAL);
    }
    assert!(result.ratios.is_finite());
    assert!(result.score.is_finite());
    assert!(result.is_computed());
}

#[test]
fn overflowing_ratio_is_replaced() {
    let snapshot = FinancialSnapshot::builder()
        .period(
            Period::Current,
            &year_with(&[
                (Metric::AccountsReceivable, f64::MAX),
                (Metric::TotalRevenue, 0.5),
            ]),
        )
        .period(Period::Prior, &baseline_year())
        .build();

    let computed = compute_ratios(&snapshot, Period::Current, Period::Prior).unwrap();
    assert_eq!(computed.substituted, vec![Ratio::Dsri]);
    assert_eq!(computed.ratios.dsri, 1.0);
    assert!(computed.ratios.is_finite());
}

#[test]
fn neutralize_leaves_finite_sets_untouched() {
    let mut ratios = RatioSet::neutral();
    ratios.set(Ratio::Tata, 0.25);
    let computed = neutralize(ratios);
    assert_eq!(computed.ratios, ratios);
    assert!(computed.substituted.is_empty());

    ratios.set(Ratio::Lvgi, f64::NEG_INFINITY);
    let computed = neutralize(ratios);
    assert_eq!(computed.substituted, vec![Ratio::Lvgi]);
    assert_eq!(computed.ratios.lvgi, 1.0);
    assert_eq!(computed.ratios.tata, 0.25);
}

#[test]
fn aggregate_of_neutral_set_is_constant_plus_weight_sum() {
    let (score, weighted) = aggregate(&RatioSet::neutral(), &COEFFICIENTS);
    assert_close(score, -4.84 + 0.92 + 0.528 + 0.404 + 0.892 + 0.115 - 0.172 + 4.679 - 0.327, 1e-12);
    assert_eq!(weighted.get(Ratio::Sgai), -0.172);
}

#[test]
fn finite_ratios_overflowing_the_sum_are_rejected() {
    let year = year_with(&[
        (Metric::NetIncome, 1e308),
        (Metric::OperatingCashFlow, 0.0),
        (Metric::TotalAssets, 1.0),
    ]);
    let snapshot = FinancialSnapshot::builder()
        .period(Period::Current, &year)
        .period(Period::Prior, &year)
        .build();

    let computed = compute_ratios(&snapshot, Period::Current, Period::Prior).unwrap();
    assert!(computed.ratios.is_finite());
    assert!(computed.substituted.is_empty());

    for policy in [FallbackPolicy::Strict, FallbackPolicy::NeutralDefault] {
        let err = ScoreCalculator::new(policy)
            .score(&snapshot, Period::Current, Period::Prior)
            .unwrap_err();
        assert!(
            matches!(
                err,
                BeneishError::NonFiniteScore {
                    current: Period::Current,
                    prior: Period::Prior
                }
            ),
            "got {err:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Missing data and the fallback policy
// ---------------------------------------------------------------------------

fn snapshot_missing_prior_ppe() -> FinancialSnapshot {
    let prior: Vec<(Metric, f64)> = baseline_year()
        .into_iter()
        .filter(|(m, _)| *m != Metric::NetPpe)
        .collect();
    FinancialSnapshot::builder()
        .ticker("GAP")
        .period(Period::Current, &baseline_year())
        .period(Period::Prior, &prior)
        .build()
}

#[test]
fn missing_metric_raises_missing_data_under_strict_policy() {
    let err = ScoreCalculator::default()
        .score(&snapshot_missing_prior_ppe(), Period::Current, Period::Prior)
        .unwrap_err();

    match err {
        BeneishError::MissingData { metric, period } => {
            assert_eq!(metric, Metric::NetPpe);
            assert_eq!(period, Period::Prior);
        }
        other => panic!("expected MissingData, got {other:?}"),
    }
}

#[test]
fn missing_period_raises_missing_data() {
    let err = ScoreCalculator::default()
        .score(&worked_example(), Period::Prior, Period::TwoPrior)
        .unwrap_err();
    assert!(matches!(
        err,
        BeneishError::MissingData {
            period: Period::TwoPrior,
            ..
        }
    ));
}

#[test]
fn neutral_default_policy_returns_tagged_fallback() {
    let calculator = ScoreCalculator::new(FallbackPolicy::NeutralDefault);
    let result = calculator
        .score(&snapshot_missing_prior_ppe(), Period::Current, Period::Prior)
        .unwrap();

    assert!(result.is_fallback());
    assert!(!result.is_computed());
    match &result.outcome {
        ScoreOutcome::NeutralFallback { reason } => {
            assert!(reason.contains("Net PPE"), "reason was {reason}");
            assert!(reason.contains("t-1"), "reason was {reason}");
        }
        other => panic!("expected NeutralFallback, got {other:?}"),
    }
    assert_eq!(result.ratios, RatioSet::neutral());
    assert_close(
        result.score,
        COEFFICIENTS.constant + COEFFICIENTS.weight_sum(),
        1e-12,
    );
}

#[test]
fn neutral_default_policy_still_computes_complete_data() {
    let calculator = ScoreCalculator::new(FallbackPolicy::NeutralDefault);
    let result = calculator
        .score(&worked_example(), Period::Current, Period::Prior)
        .unwrap();
    assert!(result.is_computed());
    assert_close(result.ratios.sgi, 1.2, 1e-12);
}

#[test]
fn evaluate_attaches_verdict() {
    let scored = ScoreCalculator::default()
        .evaluate(&worked_example(), Period::Current, Period::Prior)
        .unwrap();
    assert_eq!(scored.verdict.score, scored.mscore.score);
    assert!(!scored.verdict.is_likely_manipulated());
    let flagged: Vec<Ratio> = scored.verdict.flagged().map(|v| v.ratio).collect();
    assert_eq!(flagged, vec![Ratio::Dsri]);
}
