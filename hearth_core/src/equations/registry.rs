//! # Equation Registry
//!
//! Central registry of every formula the engine applies, with metadata for
//! the report appendix and the generated `EQUATIONS.md`.
//!
//! ## Usage
//!
//! ```rust
//! use hearth_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::LayerResistance, "Wall");
//! tracker.record(Equation::LayerResistance, "Wall, second layer");
//! assert_eq!(tracker.unique_equations(), vec![Equation::LayerResistance]);
//!
//! let meta = Equation::PeakPower.metadata();
//! assert_eq!(meta.formula_plain, "P_peak = 2 * P_avg");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source a formula is taken from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// EN ISO 6946 - thermal resistance of building components
    Iso6946 { section: &'static str },
    /// СП 50.13330 - thermal protection of buildings
    Sp50 { section: &'static str },
    /// Energy conservation, no specific standard
    EnergyBalance,
    /// Sizing rule of the furnace selector
    SelectionRule,
}

impl Reference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            Reference::Iso6946 { section } => format!("EN ISO 6946, {}", section),
            Reference::Sp50 { section } => format!("SP 50.13330, {}", section),
            Reference::EnergyBalance => "Energy balance".to_string(),
            Reference::SelectionRule => "Furnace selection rule".to_string(),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Groups for ordering the appendix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Wall and element resistance
    Resistance,
    /// Room heat loss
    HeatLoss,
    /// Fuel charge and burn curve
    Combustion,
    /// Model choice, cascade and refuelling
    Selection,
}

impl EquationCategory {
    pub const ALL: [EquationCategory; 4] = [
        EquationCategory::Resistance,
        EquationCategory::HeatLoss,
        EquationCategory::Combustion,
        EquationCategory::Selection,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Resistance => "Thermal Resistance",
            EquationCategory::HeatLoss => "Heat Loss",
            EquationCategory::Combustion => "Combustion",
            EquationCategory::Selection => "Furnace Selection",
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Everything needed to document a formula
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    pub reference: Reference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// R = d/λ
    LayerResistance,
    /// R_T = R_si + ΣR + R_se
    TotalResistance,
    /// P = 4√A
    SquarePerimeter,
    /// Q = AΔt/R
    ConductiveLoss,
    /// Q_total = ΣQ / 1000
    TotalHeatLoss,
    /// P_req = 1.2 Q_total
    DesignLoad,
    /// m = Vφρ
    FuelMass,
    /// E = mq
    FuelEnergy,
    /// E_use = E/3.6 η
    UsableEnergy,
    /// P_avg = E_use/T
    AveragePower,
    /// P_peak = 2 P_avg
    PeakPower,
    /// P(t) = P_peak (1 - t/T)
    LinearDecay,
    /// Most powerful qualifying model
    ModelSelection,
    /// n = ceil(P_req / P_avg,max)
    CascadeCount,
    /// Last grid time with P(t) >= P_req
    RefuelInterval,
}

/// Every registered equation, in appendix order
pub const ALL_EQUATIONS: [Equation; 15] = [
    Equation::LayerResistance,
    Equation::TotalResistance,
    Equation::SquarePerimeter,
    Equation::ConductiveLoss,
    Equation::TotalHeatLoss,
    Equation::DesignLoad,
    Equation::FuelMass,
    Equation::FuelEnergy,
    Equation::UsableEnergy,
    Equation::AveragePower,
    Equation::PeakPower,
    Equation::LinearDecay,
    Equation::ModelSelection,
    Equation::CascadeCount,
    Equation::RefuelInterval,
];

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::LayerResistance => EquationMetadata {
                name: "Layer Resistance",
                description: "Thermal resistance of one homogeneous layer",
                formula_plain: "R = d / lambda",
                reference: Reference::Iso6946 { section: "6.7.1" },
                variables: vec![
                    Variable::new("d", "Layer thickness", "m"),
                    Variable::new("lambda", "Thermal conductivity", "W/(m·K)"),
                ],
                assumptions: vec!["One-dimensional steady conduction"],
                category: EquationCategory::Resistance,
                source_module: "equations/thermal.rs",
                source_function: "layer_resistance",
            },
            Equation::TotalResistance => EquationMetadata {
                name: "Total Element Resistance",
                description: "Series sum of layer resistances and surface films",
                formula_plain: "R_T = R_si + sum(R_i) + R_se",
                reference: Reference::Iso6946 { section: "6.9" },
                variables: vec![
                    Variable::new("R_si", "Interior surface resistance (0.13)", "m²·K/W"),
                    Variable::new("R_se", "Exterior surface resistance (0.04)", "m²·K/W"),
                    Variable::new("R_i", "Resistance of layer i", "m²·K/W"),
                ],
                assumptions: vec!["Layers are in series", "No thermal bridges"],
                category: EquationCategory::Resistance,
                source_module: "equations/thermal.rs",
                source_function: "total_resistance",
            },
            Equation::SquarePerimeter => EquationMetadata {
                name: "Square Footprint Perimeter",
                description: "Perimeter of a square room with the given floor area",
                formula_plain: "P = 4 * sqrt(A)",
                reference: Reference::EnergyBalance,
                variables: vec![Variable::new("A", "Floor area", "m²")],
                assumptions: vec!["Square floor plan"],
                category: EquationCategory::HeatLoss,
                source_module: "equations/thermal.rs",
                source_function: "square_perimeter",
            },
            Equation::ConductiveLoss => EquationMetadata {
                name: "Conductive Heat Loss",
                description: "Steady heat flow through one enclosing surface",
                formula_plain: "Q = A * dt / R",
                reference: Reference::Sp50 { section: "Appendix Ж" },
                variables: vec![
                    Variable::new("A", "Surface area", "m²"),
                    Variable::new("dt", "Indoor minus outdoor temperature", "K"),
                    Variable::new("R", "Total resistance of the surface", "m²·K/W"),
                ],
                assumptions: vec!["Steady state", "No infiltration, solar or internal gains"],
                category: EquationCategory::HeatLoss,
                source_module: "equations/thermal.rs",
                source_function: "conductive_loss_w",
            },
            Equation::TotalHeatLoss => EquationMetadata {
                name: "Total Heat Loss",
                description: "Sum of wall, floor and ceiling losses in kilowatts",
                formula_plain: "Q_total = (Q_walls + Q_floor + Q_ceiling) / 1000, 0 if dt <= 0",
                reference: Reference::EnergyBalance,
                variables: vec![Variable::new("Q_total", "Room heat loss", "kW")],
                assumptions: vec!["No heating demand when indoor is not warmer than outdoor"],
                category: EquationCategory::HeatLoss,
                source_module: "calculations/heat_loss.rs",
                source_function: "calculate",
            },
            Equation::DesignLoad => EquationMetadata {
                name: "Design Load",
                description: "Heat loss with a 20 % safety margin",
                formula_plain: "P_req = 1.2 * Q_total",
                reference: Reference::SelectionRule,
                variables: vec![Variable::new("P_req", "Required furnace output", "kW")],
                assumptions: vec![],
                category: EquationCategory::HeatLoss,
                source_module: "calculations/recommendation.rs",
                source_function: "required_load_kw",
            },
            Equation::FuelMass => EquationMetadata {
                name: "Fuel Mass",
                description: "Mass of firewood in one charge",
                formula_plain: "m = V * phi * rho",
                reference: Reference::EnergyBalance,
                variables: vec![
                    Variable::new("V", "Firebox volume", "m³"),
                    Variable::new("phi", "Fill fraction", "-"),
                    Variable::new("rho", "Wood bulk density", "kg/m³"),
                ],
                assumptions: vec![],
                category: EquationCategory::Combustion,
                source_module: "equations/combustion.rs",
                source_function: "fuel_mass_kg",
            },
            Equation::FuelEnergy => EquationMetadata {
                name: "Fuel Energy",
                description: "Chemical energy of the charge at the lower heating value",
                formula_plain: "E = m * q",
                reference: Reference::EnergyBalance,
                variables: vec![
                    Variable::new("m", "Fuel mass", "kg"),
                    Variable::new("q", "Lower heating value", "MJ/kg"),
                ],
                assumptions: vec![],
                category: EquationCategory::Combustion,
                source_module: "equations/combustion.rs",
                source_function: "fuel_energy_mj",
            },
            Equation::UsableEnergy => EquationMetadata {
                name: "Usable Energy",
                description: "Heat delivered to the room from one charge",
                formula_plain: "E_use = E / 3.6 * eta",
                reference: Reference::EnergyBalance,
                variables: vec![
                    Variable::new("E", "Fuel energy", "MJ"),
                    Variable::new("eta", "Furnace and system efficiency", "-"),
                ],
                assumptions: vec!["1 kWh = 3.6 MJ"],
                category: EquationCategory::Combustion,
                source_module: "equations/combustion.rs",
                source_function: "usable_energy_kwh",
            },
            Equation::AveragePower => EquationMetadata {
                name: "Average Output",
                description: "Mean thermal output over the burn",
                formula_plain: "P_avg = E_use / T, 0 if T = 0",
                reference: Reference::EnergyBalance,
                variables: vec![Variable::new("T", "Burn duration", "h")],
                assumptions: vec![],
                category: EquationCategory::Combustion,
                source_module: "equations/combustion.rs",
                source_function: "average_power_kw",
            },
            Equation::PeakPower => EquationMetadata {
                name: "Peak Output",
                description: "Output at ignition for a linear decay to zero",
                formula_plain: "P_peak = 2 * P_avg",
                reference: Reference::EnergyBalance,
                variables: vec![Variable::new("P_avg", "Average output", "kW")],
                assumptions: vec!["Area under the ramp equals the usable energy"],
                category: EquationCategory::Combustion,
                source_module: "equations/combustion.rs",
                source_function: "peak_power_kw",
            },
            Equation::LinearDecay => EquationMetadata {
                name: "Burn Curve",
                description: "Output at time t into the burn",
                formula_plain: "P(t) = max(0, P_peak * (1 - t / T))",
                reference: Reference::EnergyBalance,
                variables: vec![Variable::new("t", "Time since charging", "h")],
                assumptions: vec!["Sampled every 0.5 h"],
                category: EquationCategory::Combustion,
                source_module: "equations/combustion.rs",
                source_function: "linear_decay_power_kw",
            },
            Equation::ModelSelection => EquationMetadata {
                name: "Model Selection",
                description: "Most powerful model whose average output covers the design load",
                formula_plain: "argmax P_avg,i subject to P_avg,i >= P_req",
                reference: Reference::SelectionRule,
                variables: vec![Variable::new("P_avg,i", "Average output of model i", "kW")],
                assumptions: vec!["First model wins ties"],
                category: EquationCategory::Selection,
                source_module: "calculations/recommendation.rs",
                source_function: "select_model",
            },
            Equation::CascadeCount => EquationMetadata {
                name: "Cascade Size",
                description: "Identical units of the strongest model needed to cover the load",
                formula_plain: "n = ceil(P_req / P_avg,max), offered if n > 1",
                reference: Reference::SelectionRule,
                variables: vec![Variable::new("n", "Number of furnaces", "-")],
                assumptions: vec!["Only when no single model qualifies"],
                category: EquationCategory::Selection,
                source_module: "calculations/recommendation.rs",
                source_function: "cascade",
            },
            Equation::RefuelInterval => EquationMetadata {
                name: "Refuel Interval",
                description: "Time until the burn curve drops below the design load",
                formula_plain: "t_refuel = max t on the 0.5 h grid with P(t') >= P_req for all t' <= t",
                reference: Reference::SelectionRule,
                variables: vec![Variable::new("t_refuel", "Time to next charge", "h")],
                assumptions: vec!["Rounded down to the sample grid"],
                category: EquationCategory::Selection,
                source_module: "calculations/recommendation.rs",
                source_function: "refuel_interval_h",
            },
        }
    }

    /// Equations in a category, in registry order
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }
}

// ============================================================================
// Usage Tracking
// ============================================================================

/// One application of an equation during an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// What it was applied to (e.g. "Walls", "Муссон 600")
    pub context: String,
}

/// Collects equation usages while an evaluation runs
#[derive(Debug, Clone, Default)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage {
            equation,
            context: context.into(),
        });
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Unique equations grouped by category, categories in appendix order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let unique = self.unique_equations();
        EquationCategory::ALL
            .iter()
            .map(|cat| {
                let eqs: Vec<Equation> = unique
                    .iter()
                    .filter(|eq| eq.metadata().category == *cat)
                    .copied()
                    .collect();
                (*cat, eqs)
            })
            .filter(|(_, eqs)| !eqs.is_empty())
            .collect()
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the `EQUATIONS.md` reference from the registry
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Hearth Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Every formula used by the heat-loss and furnace sizing engine, with its
source location and assumptions.

---

"#,
    );

    for category in EquationCategory::ALL {
        let equations = Equation::in_category(category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!("**Total Equations:** {}\n", ALL_EQUATIONS.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }
        assert!(Equation::PeakPower.metadata().formula_plain.contains("2 * P_avg"));
    }

    #[test]
    fn test_every_category_populated() {
        let total: usize = EquationCategory::ALL
            .iter()
            .map(|c| Equation::in_category(*c).len())
            .sum();
        assert_eq!(total, ALL_EQUATIONS.len());
    }

    #[test]
    fn test_citation() {
        assert_eq!(
            Reference::Iso6946 { section: "6.9" }.citation(),
            "EN ISO 6946, 6.9"
        );
    }

    #[test]
    fn test_tracker_groups_in_appendix_order() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::RefuelInterval, "Муссон 600");
        tracker.record(Equation::LayerResistance, "Walls");
        tracker.record(Equation::LayerResistance, "Walls");

        assert_eq!(tracker.usages().len(), 3);
        let grouped = tracker.by_category();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, EquationCategory::Resistance);
        assert_eq!(grouped[1], (EquationCategory::Selection, vec![Equation::RefuelInterval]));
    }

    #[test]
    fn test_markdown_lists_every_equation() {
        let md = generate_equations_markdown();
        for eq in ALL_EQUATIONS {
            assert!(md.contains(eq.metadata().name));
        }
        assert!(md.contains("**Total Equations:** 15"));
    }
}
