//! # price-engine
//!
//! Deterministic best-price lookup over historical e-commerce price data.
//!
//! Given a product's price history, the engine finds the cheapest observed
//! listing and reports when it happened as an ISO 8601 week number and month
//! name. All date math takes an explicit reference year; nothing reads the
//! system clock.
//!
//! ## Modules
//!
//! - [`calendar`] — Day-of-year → ISO week number and month name
//! - [`record`] — Price rows and minimum-price extraction
//! - [`dataset`] — CSV price-history loading
//! - [`catalog`] — Product → dataset/model file configuration
//! - [`model`] — Opaque pretrained model artifacts
//! - [`report`] — End-to-end best-price report for a catalogued product
//! - [`error`] — Error types

pub mod calendar;
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod model;
pub mod record;
pub mod report;

pub use calendar::{date_for_day, month_name, resolve_week_and_month, WeekInfo};
pub use catalog::{ProductCatalog, ProductEntry};
pub use dataset::{load_price_history, read_price_history};
pub use error::{PriceError, Result};
pub use model::ModelArtifact;
pub use record::{find_minimum_price_record, PriceRecord};
pub use report::{best_price_for, BestPriceReport};
