//! # Furnace Recommendation
//!
//! Matches the room's design load against every catalog model's burn.
//!
//! ## Rules
//!
//! - **Design load**: heat loss × 1.2
//! - **Qualifying model**: average output ≥ design load
//! - **Selection**: the most powerful qualifying model. Models are scanned
//!   in catalog order and a model replaces the current pick only when its
//!   average output is strictly higher, so the first of equally powerful
//!   models wins. This deliberately oversizes rather than picking the
//!   smallest sufficient model.
//! - **Cascade**: when nothing qualifies and there is a load, N identical
//!   units of the strongest model, N = ⌈design load / its average⌉, offered
//!   only for N > 1
//! - **Refuel interval**: last half-hour sample before the selected model's
//!   output first drops below the design load
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::calculations::recommendation::{recommend, run_catalog};
//! use hearth_core::catalog::Catalog;
//! use hearth_core::materials::FirewoodSpecies;
//!
//! let runs = run_catalog(Catalog::builtin(), 0.8, FirewoodSpecies::Softwood, 0.85, 8.0);
//! let recommendation = recommend(&runs, 9.21);
//! assert_eq!(recommendation.model_name(), Some("Муссон 2000"));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::burn::{simulate, BurnInput, BurnResult, PowerCurve};
use crate::catalog::{Catalog, FurnaceModel};
use crate::materials::FirewoodSpecies;

/// Design load over heat loss
pub const SAFETY_MARGIN: f64 = 1.2;

/// Heat loss with the safety margin applied, kW
pub fn required_load_kw(heat_loss_kw: f64) -> f64 {
    heat_loss_kw * SAFETY_MARGIN
}

/// One catalog model burned under the common charge conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRun {
    pub model: FurnaceModel,
    pub burn: BurnResult,
}

impl ModelRun {
    pub fn name(&self) -> &str {
        &self.model.name
    }

    pub fn average_power_kw(&self) -> f64 {
        self.burn.average_power_kw
    }

    pub fn curve(&self) -> &PowerCurve {
        &self.burn.curve
    }
}

/// Burn every catalog model with the same fill, wood, efficiency and duration
pub fn run_catalog(
    catalog: &Catalog,
    fill_fraction: f64,
    species: FirewoodSpecies,
    efficiency: f64,
    burn_hours: f64,
) -> Vec<ModelRun> {
    catalog
        .iter()
        .map(|model| ModelRun {
            model: model.clone(),
            burn: simulate(&BurnInput {
                volume_l: model.volume_l,
                fill_fraction,
                species,
                efficiency,
                burn_hours,
            }),
        })
        .collect()
}

/// Several identical furnaces sharing the load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cascade {
    pub count: u32,
    pub model: String,
    /// Average output of one unit, kW
    pub unit_average_power_kw: f64,
}

impl Cascade {
    /// Combined average output, kW
    pub fn total_average_power_kw(&self) -> f64 {
        self.count as f64 * self.unit_average_power_kw
    }

    /// Short form, e.g. "3 × Муссон 2000"
    pub fn descriptor(&self) -> String {
        format!("{} × {}", self.count, self.model)
    }
}

/// Outcome of the selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Recommendation {
    /// One furnace covers the design load
    Single {
        model: String,
        average_power_kw: f64,
        /// Hours until the next charge is needed
        refuel_interval_h: f64,
    },
    /// No single furnace suffices; several of the strongest do
    Cascade(Cascade),
    /// Nothing to recommend (no load, or no model produces any output)
    None,
}

impl Recommendation {
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Recommendation::Single { model, .. } => Some(model),
            _ => None,
        }
    }

    pub fn cascade(&self) -> Option<&Cascade> {
        match self {
            Recommendation::Cascade(cascade) => Some(cascade),
            _ => None,
        }
    }

    /// Refuel interval of the single recommended model, 0 otherwise
    pub fn refuel_interval_h(&self) -> f64 {
        match self {
            Recommendation::Single { refuel_interval_h, .. } => *refuel_interval_h,
            _ => 0.0,
        }
    }
}

/// Whether `candidate` replaces a current pick with average `best_kw`
fn outranks(candidate: &ModelRun, best_kw: f64, required_kw: f64) -> bool {
    let avg = candidate.average_power_kw();
    avg >= required_kw && avg > best_kw
}

/// The most powerful model meeting `required_kw`, first one on ties
pub fn select_model(runs: &[ModelRun], required_kw: f64) -> Option<&ModelRun> {
    runs.iter()
        .fold((None, 0.0), |(best, best_kw), run| {
            if outranks(run, best_kw, required_kw) {
                (Some(run), run.average_power_kw())
            } else {
                (best, best_kw)
            }
        })
        .0
}

/// The model with the highest average output, first one on ties
pub fn strongest_model(runs: &[ModelRun]) -> Option<&ModelRun> {
    runs.iter().fold(None, |best: Option<&ModelRun>, run| match best {
        Some(b) if b.average_power_kw() >= run.average_power_kw() => Some(b),
        _ => Some(run),
    })
}

/// Cascade of the strongest model, when one is meaningful.
///
/// Returns `None` when there is no load, when the strongest model has no
/// output, when a single unit would already do, or when the unit count is
/// not a representable number.
pub fn cascade(runs: &[ModelRun], required_kw: f64, heat_loss_kw: f64) -> Option<Cascade> {
    if heat_loss_kw <= 0.0 {
        return None;
    }
    let strongest = strongest_model(runs)?;
    let unit_kw = strongest.average_power_kw();
    if unit_kw <= 0.0 {
        return None;
    }
    let units = (required_kw / unit_kw).ceil();
    if !units.is_finite() || units > u32::MAX as f64 {
        tracing::warn!(required_kw, unit_kw, "cascade unit count out of range");
        return None;
    }
    let count = units as u32;
    (count > 1).then(|| Cascade {
        count,
        model: strongest.name().to_string(),
        unit_average_power_kw: unit_kw,
    })
}

/// Last sampled time, walking from ignition, at which output still meets
/// the load. Zero when even the first sample falls short.
pub fn refuel_interval_h(curve: &PowerCurve, required_kw: f64) -> f64 {
    curve
        .samples
        .iter()
        .take_while(|s| s.power_kw >= required_kw)
        .last()
        .map_or(0.0, |s| s.time_h)
}

/// Select a furnace (or cascade) for a room with the given heat loss.
pub fn recommend(runs: &[ModelRun], heat_loss_kw: f64) -> Recommendation {
    let required_kw = required_load_kw(heat_loss_kw);

    if let Some(run) = select_model(runs, required_kw) {
        let refuel = refuel_interval_h(run.curve(), required_kw);
        tracing::debug!(model = run.name(), required_kw, refuel, "single model selected");
        return Recommendation::Single {
            model: run.name().to_string(),
            average_power_kw: run.average_power_kw(),
            refuel_interval_h: refuel,
        };
    }

    match cascade(runs, required_kw, heat_loss_kw) {
        Some(c) => {
            tracing::debug!(cascade = %c.descriptor(), required_kw, "no single model qualifies");
            Recommendation::Cascade(c)
        }
        None => {
            tracing::debug!(required_kw, heat_loss_kw, "no recommendation");
            Recommendation::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::burn::{BurnCharge, PowerSample};

    /// Synthetic run with the given average output over an 8 h burn
    fn run(name: &str, average_kw: f64) -> ModelRun {
        let peak = 2.0 * average_kw;
        let samples = (0..=16)
            .map(|i| {
                let t = i as f64 * 0.5;
                PowerSample {
                    time_h: t,
                    power_kw: (peak * (1.0 - t / 8.0)).max(0.0),
                }
            })
            .collect();
        ModelRun {
            model: FurnaceModel::new(name, 100.0, 2, 133.0),
            burn: BurnResult {
                charge: BurnCharge {
                    fuel_mass_kg: 0.0,
                    fuel_energy_mj: 0.0,
                    usable_energy_kwh: average_kw * 8.0,
                },
                average_power_kw: average_kw,
                peak_power_kw: peak,
                curve: PowerCurve { samples },
            },
        }
    }

    #[test]
    fn test_required_load_has_margin() {
        assert!((required_load_kw(9.21) - 11.052).abs() < 1e-9);
        assert_eq!(required_load_kw(0.0), 0.0);
    }

    #[test]
    fn test_selects_most_powerful_qualifying_model() {
        let runs = vec![run("A", 5.0), run("B", 12.0), run("C", 20.0), run("D", 8.0)];
        let picked = select_model(&runs, 10.0).unwrap();
        assert_eq!(picked.name(), "C");
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let runs = vec![run("A", 15.0), run("B", 15.0), run("C", 3.0)];
        assert_eq!(select_model(&runs, 10.0).unwrap().name(), "A");
        assert_eq!(strongest_model(&runs).unwrap().name(), "A");
    }

    #[test]
    fn test_exact_match_qualifies() {
        let runs = vec![run("A", 10.0)];
        assert_eq!(select_model(&runs, 10.0).unwrap().name(), "A");
    }

    #[test]
    fn test_never_selects_below_required() {
        let runs = vec![run("A", 4.0), run("B", 9.0), run("C", 13.0), run("D", 21.0)];
        for required in [0.5, 4.0, 8.9, 9.0, 13.5, 21.0, 30.0] {
            if let Some(picked) = select_model(&runs, required) {
                assert!(picked.average_power_kw() >= required);
            }
        }
        assert!(select_model(&runs, 30.0).is_none());
    }

    #[test]
    fn test_zero_output_never_selected() {
        let runs = vec![run("A", 0.0), run("B", 0.0)];
        assert!(select_model(&runs, 0.0).is_none());
        assert_eq!(recommend(&runs, 0.0), Recommendation::None);
    }

    #[test]
    fn test_cascade_when_nothing_qualifies() {
        let runs = vec![run("A", 10.0), run("B", 25.0), run("C", 18.0)];
        let recommendation = recommend(&runs, 50.0);
        let cascade = recommendation.cascade().unwrap();
        // 60 kW required / 25 kW per unit
        assert_eq!(cascade.count, 3);
        assert_eq!(cascade.model, "B");
        assert_eq!(cascade.descriptor(), "3 × B");
        assert!(cascade.total_average_power_kw() >= required_load_kw(50.0));
        assert_eq!(recommendation.model_name(), None);
        assert_eq!(recommendation.refuel_interval_h(), 0.0);
    }

    #[test]
    fn test_cascade_properties() {
        let runs = vec![run("A", 7.5), run("B", 13.0)];
        for loss in [11.0, 20.0, 33.3, 75.0, 140.0] {
            let required = required_load_kw(loss);
            let c = cascade(&runs, required, loss).unwrap();
            assert!(c.count >= 2);
            assert!(c.count as f64 * 13.0 >= required);
        }
    }

    #[test]
    fn test_no_cascade_without_load_or_output() {
        let runs = vec![run("A", 10.0)];
        assert!(cascade(&runs, 0.0, 0.0).is_none());

        let dead = vec![run("A", 0.0)];
        assert!(cascade(&dead, 12.0, 10.0).is_none());
        assert_eq!(recommend(&dead, 10.0), Recommendation::None);

        assert!(cascade(&[], 12.0, 10.0).is_none());
    }

    #[test]
    fn test_no_cascade_when_unit_count_overflows() {
        let runs = vec![run("A", 65.6)];
        assert!(cascade(&runs, 5.04e300, 4.2e300).is_none());
        assert!(cascade(&runs, f64::INFINITY, f64::INFINITY).is_none());
        assert!(cascade(&runs, f64::NAN, f64::NAN).is_none());
        assert_eq!(recommend(&runs, 4.2e300), Recommendation::None);

        // Largest count that still fits is offered and covers the load
        let required = 65.6 * 1e9;
        let c = cascade(&runs, required, required / SAFETY_MARGIN).unwrap();
        assert!(c.total_average_power_kw() >= required);
    }

    #[test]
    fn test_refuel_interval_on_grid() {
        // Peak 40 kW over 8 h, 5 kW lost per hour; 12 kW is met until 5.6 h
        let r = run("A", 20.0);
        assert_eq!(refuel_interval_h(r.curve(), 12.0), 5.5);
        assert_eq!(refuel_interval_h(r.curve(), 40.0), 0.0);
        assert_eq!(refuel_interval_h(r.curve(), 41.0), 0.0);
        assert_eq!(refuel_interval_h(r.curve(), 0.0), 8.0);
    }

    #[test]
    fn test_single_recommendation_carries_refuel() {
        let runs = vec![run("A", 5.0), run("B", 20.0)];
        // 10 kW loss -> 12 kW required
        let recommendation = recommend(&runs, 10.0);
        assert_eq!(recommendation.model_name(), Some("B"));
        assert_eq!(recommendation.refuel_interval_h(), 5.5);
        assert!(recommendation.cascade().is_none());
    }

    #[test]
    fn test_builtin_catalog_reference_room() {
        let runs = run_catalog(Catalog::builtin(), 0.8, FirewoodSpecies::Softwood, 0.85, 8.0);
        assert_eq!(runs.len(), 5);
        let recommendation = recommend(&runs, 9.207);
        assert_eq!(recommendation.model_name(), Some("Муссон 2000"));
        assert_eq!(recommendation.refuel_interval_h(), 7.0);
    }

    #[test]
    fn test_serialization_tags() {
        let json = serde_json::to_string(&Recommendation::None).unwrap();
        assert_eq!(json, "{\"kind\":\"none\"}");
    }
}
