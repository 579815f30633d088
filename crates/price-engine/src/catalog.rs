//! Product catalog: which dataset and model artifact belong to each product.
//!
//! The catalog is plain configuration passed into the loading layer, so no
//! deployment-specific paths live in code. JSON shape:
//!
//! ```json
//! {
//!   "currency": "₹",
//!   "products": [
//!     { "name": "Poco M4", "dataset_file": "mobile.csv", "model_file": "mobile.sav" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PriceError, Result};

fn default_currency() -> String {
    "₹".to_string()
}

/// A single selectable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Display name shown in the product menu.
    pub name: String,
    /// Price-history CSV, absolute or relative to the catalog's base directory.
    pub dataset_file: PathBuf,
    /// Pretrained model artifact, absolute or relative to the base directory.
    pub model_file: PathBuf,
}

impl ProductEntry {
    pub fn dataset_path(&self, base_dir: &Path) -> PathBuf {
        resolve(base_dir, &self.dataset_file)
    }

    pub fn model_path(&self, base_dir: &Path) -> PathBuf {
        resolve(base_dir, &self.model_file)
    }
}

fn resolve(base_dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base_dir.join(file)
    }
}

/// Ordered table of products plus display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    /// Currency symbol printed before prices.
    #[serde(default = "default_currency")]
    pub currency: String,
    pub products: Vec<ProductEntry>,
}

impl ProductCatalog {
    /// Build a catalog from entries, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidCatalog`] if there are no products, a name
    /// is blank, or two products share a name.
    pub fn new(currency: impl Into<String>, products: Vec<ProductEntry>) -> Result<Self> {
        let catalog = Self {
            currency: currency.into(),
            products,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Json`] for malformed JSON, or
    /// [`PriceError::InvalidCatalog`] as for [`ProductCatalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a catalog file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Io`] if the file cannot be read, otherwise as for
    /// [`ProductCatalog::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PriceError::io(path, e))?;
        let catalog = Self::from_json_str(&text)?;
        debug!(path = %path.display(), products = catalog.products.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Product names in menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.name.as_str())
    }

    /// Look up a product by exact name, falling back to a case-insensitive match.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownProduct`] if nothing matches.
    pub fn find(&self, name: &str) -> Result<&ProductEntry> {
        let wanted = name.trim();
        self.products
            .iter()
            .find(|p| p.name == wanted)
            .or_else(|| {
                self.products
                    .iter()
                    .find(|p| p.name.to_lowercase() == wanted.to_lowercase())
            })
            .ok_or_else(|| PriceError::UnknownProduct(name.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.products.is_empty() {
            return Err(PriceError::InvalidCatalog(
                "catalog has no products".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for product in &self.products {
            if product.name.trim().is_empty() {
                return Err(PriceError::InvalidCatalog(
                    "product name must not be blank".to_string(),
                ));
            }
            if !seen.insert(product.name.to_lowercase()) {
                return Err(PriceError::InvalidCatalog(format!(
                    "duplicate product name: {}",
                    product.name
                )));
            }
        }
        Ok(())
    }
}
