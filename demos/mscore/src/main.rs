//! Score one ticker and print the year-over-year comparison followed by the
//! detailed report for each period.
//!
//! ```sh
//! cargo run -- [TICKER] [SNAPSHOT_PATH]
//! ```
//!
//! Without a ticker the default from `beneish_sdk::config` is used. A
//! snapshot file or directory switches the SDK to offline mode.

use std::env;
use std::process::ExitCode;

use beneish_sdk::config::DEFAULT_TICKER;
use beneish_sdk::report::{Comparison, Report};
use beneish_sdk::{BeneishError, BeneishSdk};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let ticker = args
        .next()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TICKER.to_string());

    let mut builder = BeneishSdk::builder();
    if let Some(path) = args.next() {
        builder = builder.offline_snapshot(path);
    }
    let sdk = match builder.build() {
        Ok(sdk) => sdk,
        Err(e) => {
            eprintln!("Failed to initialize SDK: {e}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!("Fetching financial data for {ticker}...");
    let analysis = match sdk.analyze(&ticker) {
        Ok(analysis) => analysis,
        Err(BeneishError::ProviderUnavailable(reason)) => {
            eprintln!("Unable to calculate Beneish M-Score for {ticker}: {reason}");
            eprintln!("Try another ticker or check that the company files complete statements.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error during analysis: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", Comparison::new(&analysis));
    println!("{}", Report::new(&analysis.ticker, "Current Period", &analysis.current));
    if let Some(prior) = &analysis.prior {
        println!("{}", Report::new(&analysis.ticker, "Prior Period", prior));
    }
    ExitCode::SUCCESS
}
