//! Storage layer for the online portfolio gym.
//!
//! - Input: [`CsvPriceSource`] streams one asset's prices from a CSV file;
//!   [`load_price_directory`] opens a directory of them in asset order.
//! - Output: [`ReportWriter`] persists a finished run as a summary plus
//!   per-period CSV tables.
//!
//! This crate only handles persistence; the simulation logic lives in the
//! `simulation` crate.

mod csv_source;
mod error;
mod report;

pub use csv_source::{
    CsvPriceSource, DATE_COLUMN, DEFAULT_PRICE_COLUMN, asset_id, load_price_directory,
};
pub use error::{Result, StorageError};
pub use report::{
    REWARDS_FILE, RETURNS_FILE, RUN_DIR_FORMAT, ReportWriter, SUMMARY_FILE, WEALTH_FILE,
    WEIGHTS_FILE,
};
