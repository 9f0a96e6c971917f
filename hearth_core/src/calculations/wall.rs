//! # Wall Resistance
//!
//! Total thermal resistance of a wall assembly, surface films included.
//!
//! ## Constructions
//!
//! - **Homogeneous**: one material at the given thickness
//! - **Clad mineral wool**: 9 mm OSB sheathing, mineral wool at an explicit
//!   thickness, 0.5 mm profiled steel sheet
//!
//! The clad construction ignores the generic wall thickness; the wool layer
//! thickness is always passed separately.
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::calculations::wall::{calculate, WallAssembly};
//! use hearth_core::materials::WallMaterial;
//!
//! let wall = WallAssembly::Homogeneous {
//!     material: WallMaterial::Brick,
//!     thickness_m: 0.40,
//! };
//! let result = calculate(&wall);
//! assert!((result.total_resistance - 0.6638).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{layer_resistance, total_resistance};
use crate::errors::{CalcError, CalcResult};
use crate::materials::WallMaterial;
use crate::units::{Meters, Millimeters};

/// OSB sheathing of the clad construction, mm
pub const OSB_THICKNESS_MM: f64 = 9.0;

/// Steel sheet of the clad construction, mm
pub const STEEL_SHEET_THICKNESS_MM: f64 = 0.5;

/// Wool thickness used when the caller has no explicit value, m
pub const DEFAULT_WOOL_THICKNESS_M: f64 = 0.05;

/// Wool thicknesses offered for the clad construction, cm
pub const WOOL_THICKNESS_OPTIONS_CM: [f64; 4] = [5.0, 10.0, 15.0, 20.0];

/// Wall constructions offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallConstruction {
    Brick,
    AeratedConcrete,
    Timber,
    SandwichPanel,
    /// OSB + mineral wool + steel sheet
    CladMineralWool,
}

impl WallConstruction {
    pub const ALL: [WallConstruction; 5] = [
        WallConstruction::Brick,
        WallConstruction::AeratedConcrete,
        WallConstruction::Timber,
        WallConstruction::SandwichPanel,
        WallConstruction::CladMineralWool,
    ];

    /// Construction used when a name cannot be resolved
    pub const FALLBACK: WallConstruction = WallConstruction::Brick;

    /// The single material of a homogeneous construction
    pub fn material(&self) -> Option<WallMaterial> {
        match self {
            WallConstruction::Brick => Some(WallMaterial::Brick),
            WallConstruction::AeratedConcrete => Some(WallMaterial::AeratedConcrete),
            WallConstruction::Timber => Some(WallMaterial::Timber),
            WallConstruction::SandwichPanel => Some(WallMaterial::SandwichPanel),
            WallConstruction::CladMineralWool => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, WallConstruction::CladMineralWool)
    }

    /// Parse from common string representations.
    ///
    /// Returns `MaterialNotFound` for anything unrecognized.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        if matches!(
            key.as_str(),
            "clad-mineral-wool" | "mineral-wool-cladding" | "минеральная-вата-с-обшивкой"
        ) {
            return Ok(WallConstruction::CladMineralWool);
        }
        match WallMaterial::from_str_flexible(s)? {
            WallMaterial::Brick => Ok(WallConstruction::Brick),
            WallMaterial::AeratedConcrete => Ok(WallConstruction::AeratedConcrete),
            WallMaterial::Timber => Ok(WallConstruction::Timber),
            WallMaterial::SandwichPanel => Ok(WallConstruction::SandwichPanel),
            WallMaterial::MineralWool => Ok(WallConstruction::CladMineralWool),
            WallMaterial::Osb | WallMaterial::SteelSheet => Err(CalcError::material_not_found(s)),
        }
    }

    /// Parse a construction name, falling back to brick when it is unknown
    pub fn from_name_or_default(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_else(|_| {
            tracing::warn!(
                construction = s,
                fallback = %Self::FALLBACK,
                "unknown wall construction, using fallback conductivity"
            );
            Self::FALLBACK
        })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WallConstruction::CladMineralWool => "Mineral wool with cladding",
            other => other.material().map(|m| m.display_name()).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for WallConstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One layer of a wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallLayer {
    pub material: WallMaterial,
    pub thickness_m: f64,
}

impl WallLayer {
    pub fn new(material: WallMaterial, thickness_m: f64) -> Self {
        WallLayer { material, thickness_m }
    }

    /// Layer resistance d/λ, m²·K/W
    pub fn resistance(&self) -> f64 {
        layer_resistance(self.thickness_m, self.material.conductivity())
    }
}

/// Wall build-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WallAssembly {
    /// One material
    Homogeneous { material: WallMaterial, thickness_m: f64 },
    /// Layers in series, inside to outside
    Composite { layers: Vec<WallLayer> },
}

impl WallAssembly {
    /// OSB + mineral wool + steel sheet with the given wool thickness
    pub fn clad_mineral_wool(wool_thickness_m: f64) -> Self {
        WallAssembly::Composite {
            layers: vec![
                WallLayer::new(WallMaterial::Osb, Meters::from(Millimeters(OSB_THICKNESS_MM)).value()),
                WallLayer::new(WallMaterial::MineralWool, wool_thickness_m),
                WallLayer::new(
                    WallMaterial::SteelSheet,
                    Meters::from(Millimeters(STEEL_SHEET_THICKNESS_MM)).value(),
                ),
            ],
        }
    }

    /// Build the assembly for a construction choice.
    ///
    /// Homogeneous constructions use `wall_thickness_m`; the clad
    /// construction uses `wool_thickness_m` and ignores the wall thickness.
    pub fn from_construction(
        construction: WallConstruction,
        wall_thickness_m: f64,
        wool_thickness_m: f64,
    ) -> Self {
        match construction.material() {
            Some(material) => WallAssembly::Homogeneous {
                material,
                thickness_m: wall_thickness_m,
            },
            None => WallAssembly::clad_mineral_wool(wool_thickness_m),
        }
    }

    /// Layers of the assembly, inside to outside
    pub fn layers(&self) -> Vec<WallLayer> {
        match self {
            WallAssembly::Homogeneous { material, thickness_m } => {
                vec![WallLayer::new(*material, *thickness_m)]
            }
            WallAssembly::Composite { layers } => layers.clone(),
        }
    }

    /// Check that every layer has positive thickness
    pub fn validate(&self) -> CalcResult<()> {
        let layers = self.layers();
        if layers.is_empty() {
            return Err(CalcError::invalid_input("wall.layers", "[]", "Wall needs at least one layer"));
        }
        for layer in layers {
            if layer.thickness_m.is_nan() || layer.thickness_m <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("wall.{}", layer.material.display_name()),
                    layer.thickness_m.to_string(),
                    "Layer thickness must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Resistance contribution of one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerResistance {
    pub material: WallMaterial,
    pub thickness_m: f64,
    pub resistance: f64,
}

/// Results from the wall resistance calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallResult {
    /// Per-layer breakdown, inside to outside
    pub layers: Vec<LayerResistance>,
    /// Σ d/λ over the layers, m²·K/W
    pub layer_sum: f64,
    /// R_si + Σ d/λ + R_se, m²·K/W
    pub total_resistance: f64,
}

/// Calculate the total resistance of a wall assembly.
pub fn calculate(assembly: &WallAssembly) -> WallResult {
    let layers: Vec<LayerResistance> = assembly
        .layers()
        .iter()
        .map(|layer| LayerResistance {
            material: layer.material,
            thickness_m: layer.thickness_m,
            resistance: layer.resistance(),
        })
        .collect();

    let layer_sum: f64 = layers.iter().map(|l| l.resistance).sum();
    let total = total_resistance(layer_sum);

    tracing::debug!(layers = layers.len(), layer_sum, total, "wall resistance");

    WallResult {
        layers,
        layer_sum,
        total_resistance: total,
    }
}

/// Total wall resistance for a construction choice, m²·K/W.
///
/// See [`WallAssembly::from_construction`] for how the two thicknesses are used.
pub fn wall_r_value(construction: WallConstruction, wall_thickness_m: f64, wool_thickness_m: f64) -> f64 {
    calculate(&WallAssembly::from_construction(
        construction,
        wall_thickness_m,
        wool_thickness_m,
    ))
    .total_resistance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{R_SE, R_SI};
    use approx::assert_relative_eq;

    #[test]
    fn test_brick_40cm() {
        let r = wall_r_value(WallConstruction::Brick, 0.40, DEFAULT_WOOL_THICKNESS_M);
        assert_relative_eq!(r, 0.13 + 0.40 / 0.81 + 0.04, epsilon = 1e-12);
        assert_relative_eq!(r, 0.664, epsilon = 1e-3);
    }

    #[test]
    fn test_clad_wool_sums_three_layers() {
        let result = calculate(&WallAssembly::clad_mineral_wool(0.10));
        assert_eq!(result.layers.len(), 3);
        assert_eq!(result.layers[0].material, WallMaterial::Osb);
        assert_eq!(result.layers[2].material, WallMaterial::SteelSheet);

        let expected = 0.009 / 0.13 + 0.10 / 0.045 + 0.0005 / 58.0;
        assert_relative_eq!(result.layer_sum, expected, epsilon = 1e-12);
        assert_relative_eq!(result.total_resistance, R_SI + expected + R_SE, epsilon = 1e-12);
    }

    #[test]
    fn test_clad_wool_ignores_wall_thickness() {
        let thin = wall_r_value(WallConstruction::CladMineralWool, 0.05, 0.15);
        let thick = wall_r_value(WallConstruction::CladMineralWool, 1.00, 0.15);
        assert_eq!(thin, thick);

        let more_wool = wall_r_value(WallConstruction::CladMineralWool, 0.05, 0.20);
        assert!(more_wool > thin);
    }

    #[test]
    fn test_resistance_never_below_surface_films() {
        for construction in WallConstruction::ALL {
            let r = wall_r_value(construction, 0.05, 0.05);
            assert!(r >= R_SI + R_SE, "{:?} gave {}", construction, r);
        }
    }

    #[test]
    fn test_construction_parse() {
        assert_eq!(
            WallConstruction::from_str_flexible("Timber").unwrap(),
            WallConstruction::Timber
        );
        assert_eq!(
            WallConstruction::from_str_flexible("clad_mineral_wool").unwrap(),
            WallConstruction::CladMineralWool
        );
        assert!(WallConstruction::from_str_flexible("osb").is_err());
        assert_eq!(
            WallConstruction::from_name_or_default("adobe"),
            WallConstruction::Brick
        );
    }

    #[test]
    fn test_validate() {
        assert!(WallAssembly::clad_mineral_wool(0.1).validate().is_ok());
        let bad = WallAssembly::Homogeneous {
            material: WallMaterial::Brick,
            thickness_m: 0.0,
        };
        assert_eq!(bad.validate().unwrap_err().error_code(), "INVALID_INPUT");
        let empty = WallAssembly::Composite { layers: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_assembly_serialization() {
        let wall = WallAssembly::Homogeneous {
            material: WallMaterial::Brick,
            thickness_m: 0.4,
        };
        let json = serde_json::to_string(&wall).unwrap();
        assert!(json.contains("\"kind\":\"homogeneous\""));
        let parsed: WallAssembly = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, wall);
    }
}
