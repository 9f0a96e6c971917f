//! # Furnace Catalog
//!
//! The line of "Муссон" wood-fired furnaces, ordered by increasing chamber
//! volume. The builtin catalog is constructed once and shared by reference;
//! a replacement catalog can be read from TOML.
//!
//! ## TOML Format
//!
//! ```toml
//! [[models]]
//! name = "Муссон 300"
//! volume_l = 77.0
//! duct_count = 2
//! duct_diameter_mm = 133.0
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! assert_eq!(catalog.len(), 5);
//! assert_eq!(catalog.get("Муссон 600").unwrap().volume_l, 125.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicMeters, Liters};

/// A single furnace model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnaceModel {
    /// Model name as printed in the product line
    pub name: String,
    /// Firebox volume in liters
    pub volume_l: f64,
    /// Number of flue ducts
    pub duct_count: u32,
    /// Flue duct diameter in millimeters
    pub duct_diameter_mm: f64,
}

impl FurnaceModel {
    pub fn new(name: impl Into<String>, volume_l: f64, duct_count: u32, duct_diameter_mm: f64) -> Self {
        FurnaceModel {
            name: name.into(),
            volume_l,
            duct_count,
            duct_diameter_mm,
        }
    }

    /// Firebox volume in cubic meters
    pub fn volume_m3(&self) -> f64 {
        CubicMeters::from(Liters(self.volume_l)).value()
    }
}

/// Ordered collection of furnace models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<FurnaceModel>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    models: vec![
        FurnaceModel::new("Муссон 300", 77.0, 2, 133.0),
        FurnaceModel::new("Муссон 600", 125.0, 3, 133.0),
        FurnaceModel::new("Муссон 1000", 200.0, 3, 133.0),
        FurnaceModel::new("Муссон 1500", 311.0, 4, 133.0),
        FurnaceModel::new("Муссон 2000", 467.0, 4, 159.0),
    ],
});

impl Catalog {
    /// The builtin five-model catalog
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog, rejecting empty lists and non-physical entries.
    pub fn new(models: Vec<FurnaceModel>) -> CalcResult<Self> {
        let catalog = Catalog { models };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.validate()?;
        tracing::debug!(models = catalog.len(), "loaded furnace catalog");
        Ok(catalog)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.models.is_empty() {
            return Err(CalcError::catalog("catalog contains no furnace models"));
        }
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(CalcError::catalog("furnace model with empty name"));
            }
            if model.volume_l.is_nan() || model.volume_l <= 0.0 {
                return Err(CalcError::catalog(format!(
                    "'{}' has non-positive chamber volume {}",
                    model.name, model.volume_l
                )));
            }
            if self.models.iter().filter(|m| m.name == model.name).count() > 1 {
                return Err(CalcError::catalog(format!("duplicate model name '{}'", model.name)));
            }
        }
        Ok(())
    }

    /// Look up a model by exact name
    pub fn get(&self, name: &str) -> Option<&FurnaceModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FurnaceModel> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
