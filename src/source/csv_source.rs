use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::constants::dataset::{
    COL_MONTH, COL_PRICE, COL_PRICE_PER_SQFT, COL_SQFT_LIVING, COL_YEAR, REQUIRED_COLUMNS,
};
use crate::data::{Dataset, SaleRecord};
use crate::errors::QueryError;
use crate::source::DatasetSource;
use crate::types::{Month, Year};

/// Loads sale records from a headered CSV file.
///
/// Required columns: `price, sqft_living, bedroom_category, year, month`. A
/// `price_per_sqft` column is used when present; empty cells fall back to
/// `price / sqft_living`. Extra columns are ignored.
#[derive(Clone, Debug)]
pub struct CsvSource {
    path: PathBuf,
    id: String,
}

impl CsvSource {
    /// Create a source for the CSV file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.display().to_string();
        Self { path, id }
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Dataset, QueryError> {
        let file = std::fs::File::open(&self.path).map_err(|err| QueryError::DatasetLoad {
            path: self.id.clone(),
            reason: err.to_string(),
        })?;
        let records = read_records(file)?;
        info!(
            source_id = %self.id,
            record_count = records.len(),
            "dataset loaded"
        );
        Ok(Dataset::from_records(records))
    }
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    price: usize,
    sqft_living: usize,
    bedroom_category: usize,
    year: usize,
    month: usize,
    price_per_sqft: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, QueryError> {
        let position = |name: &str| headers.iter().position(|header| header == name);
        let mut required = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = position(name).ok_or_else(|| QueryError::MissingColumn {
                column: name.to_string(),
            })?;
        }
        let [price, sqft_living, bedroom_category, year, month] = required;
        Ok(Self {
            price,
            sqft_living,
            bedroom_category,
            year,
            month,
            price_per_sqft: position(COL_PRICE_PER_SQFT),
        })
    }
}

/// Parse every row of a headered CSV stream into validated records.
///
/// Fails on the first missing column or untypeable cell; `row` in errors is 1-based and
/// excludes the header.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<SaleRecord>, QueryError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let columns = ColumnIndex::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    let mut out_of_range_months = 0usize;
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = idx + 1;
        let price: f64 = parse_cell(&row, columns.price, COL_PRICE, line)?;
        let sqft_living: f64 = parse_cell(&row, columns.sqft_living, COL_SQFT_LIVING, line)?;
        let year: Year = parse_cell(&row, columns.year, COL_YEAR, line)?;
        let month: Month = parse_cell(&row, columns.month, COL_MONTH, line)?;
        if !(1..=12).contains(&month) {
            out_of_range_months += 1;
        }
        let bedroom_category = cell(&row, columns.bedroom_category);

        let mut record = SaleRecord::new(price, sqft_living, bedroom_category, year, month);
        match columns.price_per_sqft {
            Some(ppsf_idx) if !cell(&row, ppsf_idx).is_empty() => {
                let price_per_sqft = parse_cell(&row, ppsf_idx, COL_PRICE_PER_SQFT, line)?;
                record = record.with_price_per_sqft(price_per_sqft);
            }
            _ => {}
        }
        records.push(record);
    }

    if out_of_range_months > 0 {
        warn!(
            rows = out_of_range_months,
            "dataset contains months outside 1-12"
        );
    }
    Ok(records)
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn parse_cell<T: FromStr>(
    row: &StringRecord,
    idx: usize,
    column: &str,
    line: usize,
) -> Result<T, QueryError> {
    let raw = cell(row, idx);
    raw.parse::<T>().map_err(|_| QueryError::InvalidValue {
        column: column.to_string(),
        row: line,
        value: raw.to_string(),
    })
}
