//! Offline provider reading snapshots from JSON files.
//!
//! The path may name a single snapshot file, or a directory holding one file
//! per ticker (`AAPL.json` or `AAPL.json.gz`). Gzipped files are decompressed
//! transparently.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ensure_scorable, normalize_ticker, FinancialDataProvider};
use crate::error::{BeneishError, Result};
use crate::models::FinancialSnapshot;

/// Serves [`FinancialSnapshot`]s from local JSON files.
#[derive(Debug, Clone)]
pub struct SnapshotFileProvider {
    path: PathBuf,
}

impl SnapshotFileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Locate the file holding `ticker`'s snapshot.
    fn locate(&self, ticker: &str) -> Result<PathBuf> {
        if !self.path.is_dir() {
            return Ok(self.path.clone());
        }
        [format!("{ticker}.json"), format!("{ticker}.json.gz")]
            .iter()
            .map(|name| self.path.join(name))
            .find(|p| p.exists())
            .ok_or_else(|| {
                BeneishError::ProviderUnavailable(format!(
                    "no snapshot file for {ticker} in {}",
                    self.path.display()
                ))
            })
    }
}

/// Load and parse a snapshot file (handles `.gz` transparently).
pub fn load_snapshot(path: &Path) -> Result<FinancialSnapshot> {
    let contents = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let file = fs::File::open(path)?;
        let mut decoder = BufReader::new(GzDecoder::new(BufReader::new(file)));
        let mut contents = String::new();
        decoder.read_to_string(&mut contents)?;
        contents
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&contents)?)
}

impl FinancialDataProvider for SnapshotFileProvider {
    fn fetch(&self, ticker: &str) -> Result<FinancialSnapshot> {
        let ticker = normalize_ticker(ticker)?;
        let path = self.locate(&ticker)?;
        debug!(path = %path.display(), ticker = %ticker, "loading snapshot file");

        let snapshot = load_snapshot(&path)?;
        if let Some(held) = snapshot.ticker() {
            if !held.eq_ignore_ascii_case(&ticker) {
                return Err(BeneishError::ProviderUnavailable(format!(
                    "snapshot file {} holds {held}, not {ticker}",
                    path.display()
                )));
            }
        }
        let snapshot = if snapshot.ticker().is_none() {
            snapshot.with_ticker(ticker.clone())
        } else {
            snapshot
        };

        ensure_scorable(&ticker, &snapshot)?;
        Ok(snapshot)
    }
}
