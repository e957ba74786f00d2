//! CSV-backed price sources.
//!
//! One file per asset. The asset id is the upper-cased file stem
//! (`aapl.csv` -> `AAPL`). Each file needs a header with a `date` column
//! (`YYYY-MM-DD`) and a price column, `adj_close` unless configured
//! otherwise. Rows are streamed one at a time; nothing is buffered beyond
//! the current record.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use simulation::{FeedError, PriceSource};
use tracing::{debug, info};
use types::{AssetId, AssetUniverse, Observation};

use crate::error::{Result, StorageError};

/// Default price column.
pub const DEFAULT_PRICE_COLUMN: &str = "adj_close";

/// Name of the date column.
pub const DATE_COLUMN: &str = "date";

/// Streaming price source over one CSV file.
#[derive(Debug)]
pub struct CsvPriceSource {
    asset: AssetId,
    path: PathBuf,
    reader: csv::Reader<File>,
    record: StringRecord,
    date_index: usize,
    price_index: usize,
}

impl CsvPriceSource {
    /// Open `path` and locate the date and price columns.
    pub fn open(path: impl AsRef<Path>, price_column: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let asset = asset_id(&path)?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| StorageError::csv(&path, e))?;
        let headers = reader
            .headers()
            .map_err(|e| StorageError::csv(&path, e))?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| FeedError::MissingColumn {
                    asset: asset.clone(),
                    column: name.to_string(),
                })
        };
        let date_index = column(DATE_COLUMN)?;
        let price_index = column(price_column)?;

        debug!(%asset, path = %path.display(), price_column, "opened price file");
        Ok(Self {
            asset,
            path,
            reader,
            record: StringRecord::new(),
            date_index,
            price_index,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceSource for CsvPriceSource {
    fn asset(&self) -> &str {
        &self.asset
    }

    fn next_observation(&mut self) -> std::result::Result<Option<Observation>, FeedError> {
        let has_row = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| FeedError::Read {
                asset: self.asset.clone(),
                source: Box::new(e),
            })?;
        if !has_row {
            return Ok(None);
        }

        let row = self.record.position().map_or(0, |p| p.line());
        let date = self.record.get(self.date_index).unwrap_or("");
        let price = self.record.get(self.price_index).unwrap_or("");

        Observation::parse(date, price)
            .map(Some)
            .map_err(|source| FeedError::Malformed {
                asset: self.asset.clone(),
                row,
                source,
            })
    }
}

/// Asset id for a price file: its upper-cased stem.
pub fn asset_id(path: &Path) -> Result<AssetId> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .ok_or_else(|| StorageError::InvalidFileName(path.to_path_buf()))
}

/// Open one source per `*.csv` file in `dir`, sorted by asset id.
pub fn load_price_directory(dir: impl AsRef<Path>, price_column: &str) -> Result<Vec<CsvPriceSource>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| StorageError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StorageError::io(dir, e))?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push((asset_id(&path)?, path));
        }
    }

    if files.is_empty() {
        return Err(StorageError::EmptyDirectory(dir.to_path_buf()));
    }
    files.sort();
    // Two files differing only in case map to the same asset.
    AssetUniverse::new(files.iter().map(|(asset, _)| asset.clone()))?;

    info!(dir = %dir.display(), assets = files.len(), price_column, "loading price directory");
    files
        .into_iter()
        .map(|(_, path)| CsvPriceSource::open(path, price_column))
        .collect()
}
