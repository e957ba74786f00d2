//! Run report files.
//!
//! A report is a timestamped directory under the output root:
//!
//! ```text
//! <output_dir>/<YYYY-MM-DD_HHMMSS>/
//!     summary.json   run summary
//!     wealth.csv     date, wealth at the start of each period
//!     rewards.csv    date, reward per asset (unset rewards written as 1.0)
//!     weights.csv    date, agent weight per asset before each update
//!     returns.csv    date, price per asset divided by its first logged price
//! ```

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use simulation::{RunHistory, RunSummary};
use tracing::info;
use types::{DATE_FORMAT, NaiveDate};

use crate::error::{Result, StorageError};

/// Format of the per-run subdirectory name.
pub const RUN_DIR_FORMAT: &str = "%Y-%m-%d_%H%M%S";

pub const SUMMARY_FILE: &str = "summary.json";
pub const WEALTH_FILE: &str = "wealth.csv";
pub const REWARDS_FILE: &str = "rewards.csv";
pub const WEIGHTS_FILE: &str = "weights.csv";
pub const RETURNS_FILE: &str = "returns.csv";

/// Writes run reports under an output root.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a report into a new directory named after the local time.
    ///
    /// Returns the directory written.
    pub fn write(&self, summary: &RunSummary, history: &RunHistory) -> Result<PathBuf> {
        let name = chrono::Local::now().format(RUN_DIR_FORMAT).to_string();
        let dir = self.output_dir.join(name);
        self.write_to(&dir, summary, history)?;
        Ok(dir)
    }

    /// Write a report into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path, summary: &RunSummary, history: &RunHistory) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let summary_path = dir.join(SUMMARY_FILE);
        let file = File::create(&summary_path).map_err(|e| StorageError::io(&summary_path, e))?;
        serde_json::to_writer_pretty(file, summary)?;

        let dates = history.dates();
        let assets: Vec<&str> = history.universe().iter().map(String::as_str).collect();
        let records = history.records();

        let wealth: Vec<Vec<f64>> = records.iter().map(|r| vec![r.wealth_before]).collect();
        write_table(&dir.join(WEALTH_FILE), &["wealth"], &dates, &wealth)?;

        let rewards: Vec<Vec<f64>> = records
            .iter()
            .map(|r| {
                r.rewards
                    .iter()
                    .map(|&x| if x == 0.0 { 1.0 } else { x })
                    .collect()
            })
            .collect();
        write_table(&dir.join(REWARDS_FILE), &assets, &dates, &rewards)?;

        let weights: Vec<Vec<f64>> = records.iter().map(|r| r.weights.clone()).collect();
        write_table(&dir.join(WEIGHTS_FILE), &assets, &dates, &weights)?;

        write_table(
            &dir.join(RETURNS_FILE),
            &assets,
            &dates,
            &history.normalized_prices(),
        )?;

        info!(dir = %dir.display(), periods = records.len(), "report written");
        Ok(())
    }
}

/// Write a `date,<columns...>` table, one row per date.
fn write_table(path: &Path, columns: &[&str], dates: &[NaiveDate], rows: &[Vec<f64>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| StorageError::csv(path, e))?;

    let header = std::iter::once("date").chain(columns.iter().copied());
    writer
        .write_record(header)
        .map_err(|e| StorageError::csv(path, e))?;

    for (date, row) in dates.iter().zip(rows) {
        let record = std::iter::once(date.format(DATE_FORMAT).to_string())
            .chain(row.iter().map(f64::to_string));
        writer
            .write_record(record)
            .map_err(|e| StorageError::csv(path, e))?;
    }

    writer.flush().map_err(|e| StorageError::io(path, e))
}
