//! # Materials Database
//!
//! Reference thermal data for wall construction and firewood.
//!
//! ## Tables
//!
//! - **Wall materials**: thermal conductivity λ, W/(m·K)
//! - **Surface films**: interior and exterior surface resistance, m²·K/W
//! - **Firewood**: bulk density and lower heating value (see [`firewood`])
//!
//! All tables are closed enumerations with `match`-based lookups, so every
//! property access is total. Name parsing is the only place an unknown value
//! can appear; see [`WallMaterial::from_str_flexible`] (strict) and
//! [`WallMaterial::from_name_or_default`] (lenient, falls back to brick).
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::materials::WallMaterial;
//!
//! let brick = WallMaterial::Brick;
//! assert_eq!(brick.conductivity(), 0.81);
//!
//! let parsed = WallMaterial::from_str_flexible("aerated concrete").unwrap();
//! assert_eq!(parsed, WallMaterial::AeratedConcrete);
//! ```

pub mod firewood;

pub use firewood::FirewoodSpecies;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Interior surface resistance R_si, m²·K/W
pub const R_SI: f64 = 0.13;

/// Exterior surface resistance R_se, m²·K/W
pub const R_SE: f64 = 0.04;

/// Wall materials with tabulated conductivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallMaterial {
    /// Solid clay brick
    Brick,
    /// Autoclaved aerated concrete block
    AeratedConcrete,
    /// Solid timber beam
    Timber,
    /// Insulated sandwich panel
    SandwichPanel,
    /// Basalt mineral wool (averaged)
    MineralWool,
    /// Oriented strand board
    Osb,
    /// Profiled steel sheet
    SteelSheet,
}

impl WallMaterial {
    /// All wall material variants
    pub const ALL: [WallMaterial; 7] = [
        WallMaterial::Brick,
        WallMaterial::AeratedConcrete,
        WallMaterial::Timber,
        WallMaterial::SandwichPanel,
        WallMaterial::MineralWool,
        WallMaterial::Osb,
        WallMaterial::SteelSheet,
    ];

    /// Material used when a name cannot be resolved
    pub const FALLBACK: WallMaterial = WallMaterial::Brick;

    /// Thermal conductivity λ in W/(m·K)
    pub fn conductivity(&self) -> f64 {
        match self {
            WallMaterial::Brick => 0.81,
            WallMaterial::AeratedConcrete => 0.12,
            WallMaterial::Timber => 0.18,
            WallMaterial::SandwichPanel => 0.04,
            WallMaterial::MineralWool => 0.045,
            WallMaterial::Osb => 0.13,
            // High, but the sheet is thin
            WallMaterial::SteelSheet => 58.0,
        }
    }

    /// Parse from common string representations.
    ///
    /// Returns `MaterialNotFound` for anything unrecognized.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "brick" | "кирпич" => Ok(WallMaterial::Brick),
            "aerated-concrete" | "aac" | "gas-block" | "газоблок" => {
                Ok(WallMaterial::AeratedConcrete)
            }
            "timber" | "wood" | "beam" | "дерево" | "брус" => Ok(WallMaterial::Timber),
            "sandwich-panel" | "sandwich" | "сэндвич-панель" => Ok(WallMaterial::SandwichPanel),
            "mineral-wool" | "wool" | "минеральная-вата" => Ok(WallMaterial::MineralWool),
            "osb" => Ok(WallMaterial::Osb),
            "steel-sheet" | "steel" | "профнастил" => Ok(WallMaterial::SteelSheet),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Parse a material name, falling back to [`WallMaterial::FALLBACK`]
    /// (brick) when the name is unknown.
    pub fn from_name_or_default(s: &str) -> Self {
        match Self::from_str_flexible(s) {
            Ok(material) => material,
            Err(_) => {
                tracing::warn!(
                    material = s,
                    fallback = %Self::FALLBACK,
                    "unknown wall material, using fallback conductivity"
                );
                Self::FALLBACK
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WallMaterial::Brick => "Brick",
            WallMaterial::AeratedConcrete => "Aerated concrete block",
            WallMaterial::Timber => "Timber (beam)",
            WallMaterial::SandwichPanel => "Sandwich panel",
            WallMaterial::MineralWool => "Mineral wool",
            WallMaterial::Osb => "OSB",
            WallMaterial::SteelSheet => "Profiled steel sheet",
        }
    }
}

impl std::fmt::Display for WallMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductivity_table() {
        assert_eq!(WallMaterial::Brick.conductivity(), 0.81);
        assert_eq!(WallMaterial::AeratedConcrete.conductivity(), 0.12);
        assert_eq!(WallMaterial::MineralWool.conductivity(), 0.045);
        assert_eq!(WallMaterial::SteelSheet.conductivity(), 58.0);
        assert!(WallMaterial::ALL.iter().all(|m| m.conductivity() > 0.0));
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!(WallMaterial::from_str_flexible("Brick").unwrap(), WallMaterial::Brick);
        assert_eq!(
            WallMaterial::from_str_flexible("sandwich_panel").unwrap(),
            WallMaterial::SandwichPanel
        );
        assert_eq!(WallMaterial::from_str_flexible("Газоблок").unwrap(), WallMaterial::AeratedConcrete);

        let err = WallMaterial::from_str_flexible("granite").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("granite"));
    }

    #[test]
    fn test_lenient_parse_falls_back_to_brick() {
        assert_eq!(WallMaterial::from_name_or_default("granite"), WallMaterial::Brick);
        assert_eq!(WallMaterial::from_name_or_default("osb"), WallMaterial::Osb);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&WallMaterial::AeratedConcrete).unwrap();
        assert_eq!(json, "\"aerated-concrete\"");
        let parsed: WallMaterial = serde_json::from_str("\"steel-sheet\"").unwrap();
        assert_eq!(parsed, WallMaterial::SteelSheet);
    }
}
