//! CSV price-history loading.
//!
//! Expected header (case-insensitive, extra columns ignored):
//! `Days, Price, Description, Rating, Comment, AvailableOn`.
//! `Days` and `Price` are required; the rest may be absent.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::{PriceError, Result};
use crate::record::PriceRecord;

const COL_DAYS: &str = "Days";
const COL_PRICE: &str = "Price";
const COL_DESCRIPTION: &str = "Description";
const COL_RATING: &str = "Rating";
const COL_COMMENT: &str = "Comment";
const COL_AVAILABLE_ON: &str = "AvailableOn";

/// Column positions resolved from the header row.
#[derive(Debug)]
struct Columns {
    days: usize,
    price: usize,
    description: Option<usize>,
    rating: Option<usize>,
    comment: Option<usize>,
    available_on: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required =
            |name: &str| find(name).ok_or_else(|| PriceError::MissingColumn(name.to_string()));

        Ok(Self {
            days: required(COL_DAYS)?,
            price: required(COL_PRICE)?,
            description: find(COL_DESCRIPTION),
            rating: find(COL_RATING),
            comment: find(COL_COMMENT),
            available_on: find(COL_AVAILABLE_ON),
        })
    }
}

/// Load a product's price history from a CSV file.
///
/// # Errors
///
/// Returns [`PriceError::Io`] if the file cannot be opened, plus everything
/// [`read_price_history`] can return.
pub fn load_price_history(path: impl AsRef<Path>) -> Result<Vec<PriceRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PriceError::io(path, e))?;
    let records = read_price_history(file)?;
    debug!(path = %path.display(), rows = records.len(), "loaded price history");
    Ok(records)
}

/// Parse price history from any CSV reader.
///
/// Empty cells become `None`. Unparseable prices and ratings also become
/// `None`; an unparseable or zero `Days` value is an error.
///
/// # Errors
///
/// Returns [`PriceError::MissingColumn`] if `Days` or `Price` is absent from
/// the header, [`PriceError::InvalidRow`] for a bad `Days` cell, or
/// [`PriceError::Csv`] for malformed CSV.
pub fn read_price_history<R: Read>(reader: R) -> Result<Vec<PriceRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::from_headers(rdr.headers()?)?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result?;
        // Header is line 1, so data rows start at 2.
        let line = idx + 2;
        records.push(parse_row(&row, &columns, line)?);
    }
    Ok(records)
}

fn parse_row(row: &StringRecord, columns: &Columns, line: usize) -> Result<PriceRecord> {
    let text = |col: Option<usize>| {
        col.and_then(|i| row.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let days_raw = row.get(columns.days).unwrap_or_default();
    let day_of_year = parse_day(days_raw).ok_or_else(|| PriceError::InvalidRow {
        row: line,
        reason: format!("{COL_DAYS} value {days_raw:?} is not a positive day number"),
    })?;

    let price_raw = row.get(columns.price).unwrap_or_default();
    let price = parse_price(price_raw);
    if price.is_none() && !price_raw.is_empty() {
        warn!(row = line, value = price_raw, "non-numeric price treated as missing");
    }

    Ok(PriceRecord {
        day_of_year,
        price,
        description: text(columns.description),
        rating: text(columns.rating).and_then(|r| r.parse::<f64>().ok()),
        comment: text(columns.comment),
        available_on: text(columns.available_on),
    })
}

/// Parse a day offset. Accepts integral floats ("42.0") as written by
/// spreadsheet exports.
fn parse_day(s: &str) -> Option<u32> {
    if let Ok(day) = s.parse::<u32>() {
        return (day >= 1).then_some(day);
    }
    let value = s.parse::<f64>().ok()?;
    if value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Parse a price cell, tolerating currency symbols and thousands separators
/// (e.g., "₹1,299.00", "Rs. 499", "₹.50").
fn parse_price(s: &str) -> Option<f64> {
    let cleaned = s.replace(',', "");
    let first_digit = cleaned.find(|c: char| c.is_ascii_digit())?;
    let prefix = &cleaned[..first_digit];

    let mut start = first_digit;
    // A dot directly before the digits is a decimal point unless it ends an
    // abbreviation like "Rs.".
    if let Some(before_dot) = prefix.strip_suffix('.') {
        if !before_dot.ends_with(char::is_alphabetic) {
            start -= 1;
        }
    }
    if cleaned[..start].ends_with(|c: char| c == '-' || c == '+') {
        start -= 1;
    }

    cleaned[start..]
        .trim_end()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}
