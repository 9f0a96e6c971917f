//! # Evaluation
//!
//! One full pass from user inputs to a furnace recommendation:
//! wall resistance → room heat loss → design load → burn of every catalog
//! model → selection or cascade → refuel interval.
//!
//! [`EvaluationInput`] is the validated boundary. Its defaults are the
//! reference scenario (100 m² room, 2.5 m ceiling, 40 cm brick, 22 °C
//! inside, −20 °C outside, softwood at 80 % fill, 85 % efficiency, 8 h burn).
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::catalog::Catalog;
//! use hearth_core::evaluation::{evaluate, EvaluationInput};
//!
//! let evaluation = evaluate(&EvaluationInput::default(), Catalog::builtin()).unwrap();
//! assert!((evaluation.heat_loss.total_kw - 9.21).abs() < 0.01);
//! assert_eq!(evaluation.recommendation.model_name(), Some("Муссон 2000"));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::burn::BURN_DURATION_OPTIONS_H;
use crate::calculations::heat_loss::{self, HeatLossInput, HeatLossResult, RoomSpec, DEFAULT_CEILING_R, DEFAULT_FLOOR_R};
use crate::calculations::recommendation::{self, ModelRun, Recommendation};
use crate::calculations::wall::{self, WallAssembly, WallConstruction, WallResult, WOOL_THICKNESS_OPTIONS_CM};
use crate::catalog::Catalog;
use crate::equations::{Equation, EquationTracker, EquationUsage};
use crate::errors::{CalcError, CalcResult};
use crate::materials::FirewoodSpecies;
use crate::units::{Centimeters, Meters};

/// Accepted floor area, m²
pub const AREA_RANGE_M2: (f64, f64) = (4.0, 2000.0);
/// Accepted ceiling height, m
pub const HEIGHT_RANGE_M: (f64, f64) = (1.6, 6.0);
/// Accepted homogeneous wall thickness, cm
pub const WALL_THICKNESS_RANGE_CM: (f64, f64) = (5.0, 100.0);
/// Accepted indoor temperature, °C
pub const T_IN_RANGE_C: (f64, f64) = (15.0, 70.0);
/// Accepted outdoor temperature, °C
pub const T_OUT_RANGE_C: (f64, f64) = (-50.0, 10.0);
/// Accepted firebox fill, %
pub const FILL_RANGE_PERCENT: (f64, f64) = (50.0, 100.0);
/// Accepted furnace efficiency, %
pub const EFFICIENCY_RANGE_PERCENT: (f64, f64) = (70.0, 95.0);

/// Everything the user chooses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationInput {
    /// Floor area, m²
    pub area_m2: f64,
    /// Ceiling height, m
    pub height_m: f64,
    pub construction: WallConstruction,
    /// Wall thickness, or insulation thickness for the clad construction, cm
    pub thickness_cm: f64,
    /// Indoor design temperature, °C
    pub t_in_c: f64,
    /// Outdoor design temperature, °C
    pub t_out_c: f64,
    pub species: FirewoodSpecies,
    /// Firebox fill, %
    pub fill_percent: f64,
    /// Furnace and system efficiency, %
    pub efficiency_percent: f64,
    /// Burn duration of one charge, h
    pub burn_hours: f64,
    /// Floor resistance, m²·K/W
    pub floor_r: f64,
    /// Ceiling resistance, m²·K/W
    pub ceiling_r: f64,
}

impl Default for EvaluationInput {
    fn default() -> Self {
        EvaluationInput {
            area_m2: 100.0,
            height_m: 2.5,
            construction: WallConstruction::Brick,
            thickness_cm: 40.0,
            t_in_c: 22.0,
            t_out_c: -20.0,
            species: FirewoodSpecies::Softwood,
            fill_percent: 80.0,
            efficiency_percent: 85.0,
            burn_hours: 8.0,
            floor_r: DEFAULT_FLOOR_R,
            ceiling_r: DEFAULT_CEILING_R,
        }
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64), unit: &str) -> CalcResult<()> {
    if value.is_nan() || value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be between {} and {} {}", min, max, unit),
        ));
    }
    Ok(())
}

impl EvaluationInput {
    pub fn room(&self) -> RoomSpec {
        RoomSpec {
            area_m2: self.area_m2,
            height_m: self.height_m,
            t_in_c: self.t_in_c,
            t_out_c: self.t_out_c,
        }
    }

    /// Wall build-up for the chosen construction and thickness
    pub fn wall_assembly(&self) -> WallAssembly {
        let thickness_m = Meters::from(Centimeters(self.thickness_cm)).value();
        WallAssembly::from_construction(self.construction, thickness_m, thickness_m)
    }

    pub fn fill_fraction(&self) -> f64 {
        self.fill_percent / 100.0
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency_percent / 100.0
    }

    /// Check every field against the accepted ranges.
    pub fn validate(&self) -> CalcResult<()> {
        check_range("area_m2", self.area_m2, AREA_RANGE_M2, "m²")?;
        check_range("height_m", self.height_m, HEIGHT_RANGE_M, "m")?;

        if self.construction.is_composite() {
            if !WOOL_THICKNESS_OPTIONS_CM.contains(&self.thickness_cm) {
                return Err(CalcError::invalid_input(
                    "thickness_cm",
                    self.thickness_cm.to_string(),
                    format!("Insulation thickness must be one of {:?} cm", WOOL_THICKNESS_OPTIONS_CM),
                ));
            }
        } else {
            check_range("thickness_cm", self.thickness_cm, WALL_THICKNESS_RANGE_CM, "cm")?;
        }

        check_range("t_in_c", self.t_in_c, T_IN_RANGE_C, "°C")?;
        check_range("t_out_c", self.t_out_c, T_OUT_RANGE_C, "°C")?;
        check_range("fill_percent", self.fill_percent, FILL_RANGE_PERCENT, "%")?;
        check_range("efficiency_percent", self.efficiency_percent, EFFICIENCY_RANGE_PERCENT, "%")?;

        if !BURN_DURATION_OPTIONS_H.contains(&self.burn_hours) {
            return Err(CalcError::invalid_input(
                "burn_hours",
                self.burn_hours.to_string(),
                format!("Burn duration must be one of {:?} h", BURN_DURATION_OPTIONS_H),
            ));
        }

        for (field, value) in [("floor_r", self.floor_r), ("ceiling_r", self.ceiling_r)] {
            if value.is_nan() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Resistance must be positive"));
            }
        }

        self.wall_assembly().validate()
    }
}

/// Complete result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub wall: WallResult,
    pub heat_loss: HeatLossResult,
    /// Heat loss with the safety margin, kW
    pub required_load_kw: f64,
    /// Every catalog model in catalog order
    pub runs: Vec<ModelRun>,
    pub recommendation: Recommendation,
    /// Formulas applied, in order of use
    pub equations: Vec<EquationUsage>,
}

impl Evaluation {
    /// Tracker replaying the recorded equation usages
    pub fn equation_tracker(&self) -> EquationTracker {
        let mut tracker = EquationTracker::new();
        for usage in &self.equations {
            tracker.record(usage.equation, usage.context.clone());
        }
        tracker
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        self.equation_tracker().unique_equations()
    }

    /// Run of the recommended model, if a single model was recommended
    pub fn recommended_run(&self) -> Option<&ModelRun> {
        let name = self.recommendation.model_name()?;
        self.runs.iter().find(|r| r.name() == name)
    }
}

/// Validate the input and catalog, then evaluate.
pub fn evaluate(input: &EvaluationInput, catalog: &Catalog) -> CalcResult<Evaluation> {
    input.validate()?;
    catalog.validate()?;
    Ok(evaluate_unchecked(input, catalog))
}

/// Evaluate without range checks.
///
/// Degenerate inputs give defined results (zero loss, zero output, no
/// recommendation) rather than errors.
pub fn evaluate_unchecked(input: &EvaluationInput, catalog: &Catalog) -> Evaluation {
    let mut tracker = EquationTracker::new();

    let assembly = input.wall_assembly();
    let wall = wall::calculate(&assembly);
    for layer in &wall.layers {
        tracker.record(Equation::LayerResistance, layer.material.display_name());
    }
    tracker.record(Equation::TotalResistance, "Wall");

    let heat_loss = heat_loss::calculate(&HeatLossInput {
        room: input.room(),
        wall_r: wall.total_resistance,
        floor_r: input.floor_r,
        ceiling_r: input.ceiling_r,
    });
    tracker.record(Equation::SquarePerimeter, "Room");
    for surface in ["Walls", "Floor", "Ceiling"] {
        tracker.record(Equation::ConductiveLoss, surface);
    }
    tracker.record(Equation::TotalHeatLoss, "Room");

    let required_load_kw = recommendation::required_load_kw(heat_loss.total_kw);
    tracker.record(Equation::DesignLoad, "Room");

    let runs = recommendation::run_catalog(
        catalog,
        input.fill_fraction(),
        input.species,
        input.efficiency(),
        input.burn_hours,
    );
    for run in &runs {
        for equation in [
            Equation::FuelMass,
            Equation::FuelEnergy,
            Equation::UsableEnergy,
            Equation::AveragePower,
            Equation::PeakPower,
            Equation::LinearDecay,
        ] {
            tracker.record(equation, run.name());
        }
    }

    let recommendation = recommendation::recommend(&runs, heat_loss.total_kw);
    tracker.record(Equation::ModelSelection, "Catalog");
    match &recommendation {
        Recommendation::Single { model, .. } => tracker.record(Equation::RefuelInterval, model.as_str()),
        Recommendation::Cascade(cascade) => tracker.record(Equation::CascadeCount, cascade.model.as_str()),
        Recommendation::None => {}
    }

    tracing::info!(
        heat_loss_kw = heat_loss.total_kw,
        required_load_kw,
        recommendation = ?recommendation.model_name(),
        cascade = ?recommendation.cascade().map(|c| c.descriptor()),
        "evaluation complete"
    );

    Evaluation {
        wall,
        heat_loss,
        required_load_kw,
        runs,
        recommendation,
        equations: tracker.usages().to_vec(),
    }
}
