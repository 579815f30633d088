//! End-to-end best-price lookup for a catalogued product.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::calendar::resolve_week_and_month;
use crate::catalog::ProductCatalog;
use crate::dataset::load_price_history;
use crate::error::{PriceError, Result};
use crate::model::ModelArtifact;
use crate::record::find_minimum_price_record;

/// The best historical price for a product and everything known about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPriceReport {
    pub product: String,
    pub currency: String,
    pub price: f64,
    pub day_of_year: u32,
    pub week_number: u32,
    pub month_name: String,
    pub description: Option<String>,
    /// Top review left on the best-price listing.
    pub review: Option<String>,
    pub rating: Option<f64>,
    pub available_on: Option<String>,
    /// Model artifact that was loaded for the product.
    pub model_file: String,
}

/// Find the best historical price for `product_name`.
///
/// Dataset and model paths from the catalog are resolved against `base_dir`.
/// The week and month are computed in `reference_year`.
///
/// # Errors
///
/// Returns [`PriceError::UnknownProduct`] for a name not in the catalog, any
/// loading error from the dataset or model artifact, and the lookup errors of
/// [`find_minimum_price_record`] and [`resolve_week_and_month`].
pub fn best_price_for(
    catalog: &ProductCatalog,
    product_name: &str,
    base_dir: &Path,
    reference_year: i32,
) -> Result<BestPriceReport> {
    let entry = catalog.find(product_name)?;

    let model = ModelArtifact::load(entry.model_path(base_dir))?;
    let records = load_price_history(entry.dataset_path(base_dir))?;

    let best = find_minimum_price_record(&records)?;
    // find_minimum_price_record only returns records with a comparable price.
    let price = best.comparable_price().ok_or(PriceError::NoNumericPrice)?;
    let week = resolve_week_and_month(best.day_of_year, reference_year)?;

    info!(
        product = %entry.name,
        price,
        day = best.day_of_year,
        week = week.week_number,
        "best price found"
    );

    Ok(BestPriceReport {
        product: entry.name.clone(),
        currency: catalog.currency.clone(),
        price,
        day_of_year: best.day_of_year,
        week_number: week.week_number,
        month_name: week.month_name,
        description: best.description,
        review: best.comment,
        rating: best.rating,
        available_on: best.available_on,
        model_file: model.path().display().to_string(),
    })
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

impl fmt::Display for BestPriceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Best Price for {}: {} {}",
            self.product, self.currency, self.price
        )?;
        writeln!(f, "Week of the Year: {}", self.week_number)?;
        writeln!(f, "Month: {}", self.month_name)?;
        writeln!(f, "Description: {}", or_dash(self.description.as_deref()))?;
        writeln!(f, "Top Review: {}", or_dash(self.review.as_deref()))?;
        match self.rating {
            Some(rating) => writeln!(f, "Rating: {rating}")?,
            None => writeln!(f, "Rating: -")?,
        }
        write!(f, "Available On: {}", or_dash(self.available_on.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductEntry;

    const HISTORY: &str = "\
Days,Price,Description,Rating,Comment,AvailableOn
10,14999,Poco M4 5G 6GB RAM,4.3,Great battery,Flipkart
45,12999,,4.1,Camera is average,Amazon
300,12999,Diwali offer,4.4,Worth it,Flipkart
";

    fn fixture() -> (tempfile::TempDir, ProductCatalog) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mobile.csv"), HISTORY).unwrap();
        std::fs::write(dir.path().join("mobile.sav"), [0x80, 0x04, 0x4b]).unwrap();
        let catalog = ProductCatalog::new(
            "₹",
            vec![ProductEntry {
                name: "Poco M4".to_string(),
                dataset_file: "mobile.csv".into(),
                model_file: "mobile.sav".into(),
            }],
        )
        .unwrap();
        (dir, catalog)
    }

    #[test]
    fn test_best_price_end_to_end() {
        let (dir, catalog) = fixture();
        let report = best_price_for(&catalog, "Poco M4", dir.path(), 2025).unwrap();

        assert_eq!(report.price, 12999.0);
        // First of the tied minimum rows wins: day 45 = Feb 14 2025, ISO week 7
        assert_eq!(report.day_of_year, 45);
        assert_eq!(report.week_number, 7);
        assert_eq!(report.month_name, "February");
        // Its description is blank, so the first row's description is used
        assert_eq!(report.description.as_deref(), Some("Poco M4 5G 6GB RAM"));
        assert_eq!(report.review.as_deref(), Some("Camera is average"));
        assert_eq!(report.rating, Some(4.1));
        assert_eq!(report.available_on.as_deref(), Some("Amazon"));
        assert!(report.model_file.ends_with("mobile.sav"));
    }

    #[test]
    fn test_display_matches_widget_lines() {
        let (dir, catalog) = fixture();
        let report = best_price_for(&catalog, "poco m4", dir.path(), 2025).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Best Price for Poco M4: ₹ 12999"), "got: {text}");
        assert!(text.contains("Week of the Year: 7"));
        assert!(text.contains("Month: February"));
        assert!(text.contains("Top Review: Camera is average"));
        assert!(text.ends_with("Available On: Amazon"));
    }

    #[test]
    fn test_missing_model_fails() {
        let (dir, catalog) = fixture();
        std::fs::remove_file(dir.path().join("mobile.sav")).unwrap();
        let result = best_price_for(&catalog, "Poco M4", dir.path(), 2025);
        assert!(matches!(result, Err(PriceError::Io { .. })));
    }

    #[test]
    fn test_unknown_product_fails() {
        let (dir, catalog) = fixture();
        let result = best_price_for(&catalog, "LG SmartTV", dir.path(), 2025);
        assert!(matches!(result, Err(PriceError::UnknownProduct(_))));
    }

    #[test]
    fn test_empty_dataset_fails() {
        let (dir, catalog) = fixture();
        std::fs::write(dir.path().join("mobile.csv"), "Days,Price\n").unwrap();
        let result = best_price_for(&catalog, "Poco M4", dir.path(), 2025);
        assert!(matches!(result, Err(PriceError::EmptyInput)));
    }

    #[test]
    fn test_day_outside_reference_year_fails() {
        let (dir, catalog) = fixture();
        std::fs::write(dir.path().join("mobile.csv"), "Days,Price\n366,10\n").unwrap();
        let result = best_price_for(&catalog, "Poco M4", dir.path(), 2025);
        assert!(matches!(
            result,
            Err(PriceError::InvalidDayOfYear { day: 366, year: 2025 })
        ));
        // Same row is valid in a leap year
        assert!(best_price_for(&catalog, "Poco M4", dir.path(), 2024).is_ok());
    }

    #[test]
    fn test_display_missing_fields_as_dash() {
        let report = BestPriceReport {
            product: "LG SmartTV".into(),
            currency: "₹".into(),
            price: 29990.0,
            day_of_year: 1,
            week_number: 1,
            month_name: "January".into(),
            description: None,
            review: None,
            rating: None,
            available_on: None,
            model_file: "tv.sav".into(),
        };
        let text = report.to_string();
        assert!(text.contains("Description: -"));
        assert!(text.contains("Rating: -"));
    }
}
