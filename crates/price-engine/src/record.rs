//! Historical price rows and minimum-price extraction.

use serde::Serialize;

use crate::error::PriceError;

/// One row of a product's price history.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceRecord {
    /// 1-based day offset within the reference year.
    pub day_of_year: u32,
    /// Observed price. `None` when the source cell was empty or non-numeric.
    pub price: Option<f64>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    /// Top review text for the listing.
    pub comment: Option<String>,
    /// Marketplace the listing was available on.
    pub available_on: Option<String>,
}

impl PriceRecord {
    /// A record with only a day and a price set.
    pub fn new(day_of_year: u32, price: f64) -> Self {
        Self {
            day_of_year,
            price: Some(price),
            ..Self::default()
        }
    }

    /// The price if it can be compared (present and not NaN).
    pub fn comparable_price(&self) -> Option<f64> {
        self.price.filter(|p| !p.is_nan())
    }

    fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// Find the record with the lowest price.
///
/// Ties resolve to the earliest record. Records without a comparable price
/// are skipped. If the winning record has no description, the description of
/// the first record in `records` is substituted.
///
/// # Errors
///
/// Returns [`PriceError::EmptyInput`] if `records` is empty, or
/// [`PriceError::NoNumericPrice`] if no record carries a comparable price.
///
/// # Examples
///
/// ```
/// use price_engine::record::{find_minimum_price_record, PriceRecord};
///
/// let records = vec![
///     PriceRecord::new(10, 120.0),
///     PriceRecord::new(42, 95.5),
///     PriceRecord::new(77, 200.0),
/// ];
/// let best = find_minimum_price_record(&records).unwrap();
/// assert_eq!(best.day_of_year, 42);
/// ```
pub fn find_minimum_price_record(records: &[PriceRecord]) -> Result<PriceRecord, PriceError> {
    let first = records.first().ok_or(PriceError::EmptyInput)?;

    let mut best: Option<(&PriceRecord, f64)> = None;
    for record in records {
        let Some(price) = record.comparable_price() else {
            continue;
        };
        // Strict less-than keeps the first occurrence on ties.
        if best.is_none_or(|(_, lowest)| price < lowest) {
            best = Some((record, price));
        }
    }

    let (winner, _) = best.ok_or(PriceError::NoNumericPrice)?;
    let mut result = winner.clone();
    if !result.has_description() {
        result.description = first.description.clone();
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn described(day: u32, price: Option<f64>, description: Option<&str>) -> PriceRecord {
        PriceRecord {
            day_of_year: day,
            price,
            description: description.map(str::to_string),
            ..PriceRecord::default()
        }
    }

    // ── argmin tests ────────────────────────────────────────────────────

    #[test]
    fn test_minimum_of_three() {
        let records = vec![
            PriceRecord::new(1, 120.0),
            PriceRecord::new(2, 95.5),
            PriceRecord::new(3, 200.0),
        ];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.price, Some(95.5));
        assert_eq!(best.day_of_year, 2);
    }

    #[test]
    fn test_tie_keeps_first_occurrence() {
        let records = vec![PriceRecord::new(5, 50.0), PriceRecord::new(9, 50.0)];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.day_of_year, 5);
    }

    // ── description fallback tests ──────────────────────────────────────

    #[test]
    fn test_missing_description_falls_back_to_first_record() {
        let records = vec![
            described(1, Some(300.0), Some("Great product")),
            described(2, Some(150.0), None),
        ];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.day_of_year, 2);
        assert_eq!(best.description.as_deref(), Some("Great product"));
    }

    #[test]
    fn test_blank_description_falls_back_to_first_record() {
        let records = vec![
            described(1, Some(300.0), Some("Sturdy frame")),
            described(2, Some(150.0), Some("   ")),
        ];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.description.as_deref(), Some("Sturdy frame"));
    }

    #[test]
    fn test_present_description_is_kept() {
        let records = vec![
            described(1, Some(300.0), Some("Great product")),
            described(2, Some(150.0), Some("Festive sale")),
        ];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.description.as_deref(), Some("Festive sale"));
    }

    #[test]
    fn test_fallback_when_first_description_also_missing() {
        let records = vec![described(1, Some(300.0), None), described(2, Some(10.0), None)];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.description, None);
    }

    // ── non-numeric and error tests ─────────────────────────────────────

    #[test]
    fn test_non_numeric_prices_are_skipped() {
        let records = vec![
            described(1, None, Some("first")),
            described(2, Some(f64::NAN), None),
            described(3, Some(80.0), None),
        ];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.day_of_year, 3);
        assert_eq!(best.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = find_minimum_price_record(&[]);
        assert!(matches!(result, Err(PriceError::EmptyInput)));
    }

    #[test]
    fn test_no_numeric_price_rejected() {
        let records = vec![described(1, None, None), described(2, Some(f64::NAN), None)];
        let result = find_minimum_price_record(&records);
        assert!(matches!(result, Err(PriceError::NoNumericPrice)));
    }

    // ── metadata tests ──────────────────────────────────────────────────

    #[test]
    fn test_metadata_follows_winner() {
        let records = vec![
            PriceRecord::new(1, 500.0),
            PriceRecord {
                day_of_year: 200,
                price: Some(410.0),
                description: Some("4 seater".into()),
                rating: Some(4.5),
                comment: Some("Value for money".into()),
                available_on: Some("Flipkart".into()),
            },
        ];
        let best = find_minimum_price_record(&records).unwrap();
        assert_eq!(best.rating, Some(4.5));
        assert_eq!(best.comment.as_deref(), Some("Value for money"));
        assert_eq!(best.available_on.as_deref(), Some("Flipkart"));
    }
}
