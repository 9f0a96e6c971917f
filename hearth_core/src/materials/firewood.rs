//! Firewood species
//!
//! Bulk density and lower heating value of seasoned firewood.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Firewood species offered for a fuel charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirewoodSpecies {
    /// Conifers (pine, spruce)
    Softwood,
    /// Birch
    Birch,
    /// Oak
    Oak,
}

impl FirewoodSpecies {
    /// All species variants for UI selection
    pub const ALL: [FirewoodSpecies; 3] = [
        FirewoodSpecies::Softwood,
        FirewoodSpecies::Birch,
        FirewoodSpecies::Oak,
    ];

    /// Density in kg/m³
    pub fn density_kg_m3(&self) -> f64 {
        match self {
            FirewoodSpecies::Softwood => 350.0,
            FirewoodSpecies::Birch => 450.0,
            FirewoodSpecies::Oak => 550.0,
        }
    }

    /// Lower heating value in MJ/kg
    pub fn specific_energy_mj_kg(&self) -> f64 {
        match self {
            FirewoodSpecies::Softwood => 17.0,
            FirewoodSpecies::Birch => 18.0,
            FirewoodSpecies::Oak => 19.5,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "softwood" | "conifer" | "pine" | "spruce" | "хвойные" => Ok(FirewoodSpecies::Softwood),
            "birch" | "берёза" | "береза" => Ok(FirewoodSpecies::Birch),
            "oak" | "дуб" => Ok(FirewoodSpecies::Oak),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FirewoodSpecies::Softwood => "Softwood (pine, spruce)",
            FirewoodSpecies::Birch => "Birch",
            FirewoodSpecies::Oak => "Oak",
        }
    }
}

impl std::fmt::Display for FirewoodSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_table() {
        assert_eq!(FirewoodSpecies::Softwood.density_kg_m3(), 350.0);
        assert_eq!(FirewoodSpecies::Softwood.specific_energy_mj_kg(), 17.0);
        assert_eq!(FirewoodSpecies::Oak.density_kg_m3(), 550.0);
        assert_eq!(FirewoodSpecies::Oak.specific_energy_mj_kg(), 19.5);
    }

    #[test]
    fn test_denser_wood_carries_more_energy_per_volume() {
        let per_m3: Vec<f64> = FirewoodSpecies::ALL
            .iter()
            .map(|s| s.density_kg_m3() * s.specific_energy_mj_kg())
            .collect();
        assert!(per_m3.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse() {
        assert_eq!(FirewoodSpecies::from_str_flexible("Хвойные").unwrap(), FirewoodSpecies::Softwood);
        assert_eq!(FirewoodSpecies::from_str_flexible(" Birch ").unwrap(), FirewoodSpecies::Birch);
        assert!(FirewoodSpecies::from_str_flexible("teak").is_err());
    }
}
