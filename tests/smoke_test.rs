//! Live smoke test against the Yahoo Finance timeseries endpoint.
//!
//! Run with:
//! ```sh
//! cargo test -- --ignored --nocapture
//! ```

use beneish_sdk::config::DEFAULT_TICKER;
use beneish_sdk::report::{Comparison, Report};
use beneish_sdk::{BeneishError, BeneishSdk, Period};

/// Print a section header to stderr.
fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

#[test]
#[ignore]
fn smoke_test() {
    let sdk = BeneishSdk::builder().build().unwrap();

    section("FETCH");
    let snapshot = sdk.fetch(DEFAULT_TICKER).unwrap();
    eprintln!("  {} values, complete periods {:?}", snapshot.len(), snapshot.complete_periods());
    assert!(snapshot.is_complete(Period::Current));
    assert!(snapshot.is_complete(Period::Prior));

    section("ANALYZE");
    let analysis = sdk.analyze(DEFAULT_TICKER).unwrap();
    assert!(analysis.current.mscore.is_computed());
    assert!(analysis.current.mscore.score.is_finite());
    assert!(analysis.current.mscore.ratios.is_finite());
    eprintln!("{}", Comparison::new(&analysis));
    eprintln!(
        "{}",
        Report::new(&analysis.ticker, "Current Period", &analysis.current)
    );
    if let Some(prior) = &analysis.prior {
        eprintln!("{}", Report::new(&analysis.ticker, "Prior Period", prior));
    }

    section("UNKNOWN TICKER");
    match sdk.analyze("THIS-TICKER-DOES-NOT-EXIST") {
        Err(BeneishError::ProviderUnavailable(msg)) => eprintln!("  [PASS] {msg}"),
        other => panic!("expected ProviderUnavailable, got {other:?}"),
    }
}
