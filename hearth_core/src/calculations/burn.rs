//! # Furnace Burn Curve
//!
//! Thermal output of one firewood charge over its burn, sampled every half
//! hour.
//!
//! ## Model
//!
//! - Charge: firebox volume × fill fraction × wood density gives the mass;
//!   mass × heating value gives the chemical energy; /3.6 × efficiency gives
//!   the heat delivered, kWh
//! - Output peaks at ignition at twice the average and decays linearly to
//!   zero at the end of the burn
//! - A zero, negative or non-finite burn duration yields zero output and a
//!   single sample at ignition
//! - The curve is sampled over at most [`MAX_SAMPLED_HOURS`]
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::calculations::burn::{simulate, BurnInput};
//! use hearth_core::materials::FirewoodSpecies;
//!
//! let input = BurnInput {
//!     volume_l: 125.0,
//!     fill_fraction: 0.8,
//!     species: FirewoodSpecies::Softwood,
//!     efficiency: 0.85,
//!     burn_hours: 8.0,
//! };
//! let result = simulate(&input);
//! assert!((result.average_power_kw - 17.56).abs() < 0.01);
//! assert_eq!(result.curve.samples.len(), 17);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{
    average_power_kw, fuel_energy_mj, fuel_mass_kg, linear_decay_power_kw, peak_power_kw,
    usable_energy_kwh,
};
use crate::materials::FirewoodSpecies;
use crate::units::{CubicMeters, Liters};

/// Time between curve samples, h
pub const SAMPLE_STEP_H: f64 = 0.5;

/// Longest stretch of a burn that gets sampled, h
pub const MAX_SAMPLED_HOURS: f64 = 168.0;

/// Burn durations offered to the user, h
pub const BURN_DURATION_OPTIONS_H: [f64; 7] = [2.0, 4.0, 6.0, 8.0, 12.0, 18.0, 24.0];

/// One fuel charge in one furnace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnInput {
    /// Firebox volume, L
    pub volume_l: f64,
    /// Share of the firebox filled with wood, (0, 1]
    pub fill_fraction: f64,
    pub species: FirewoodSpecies,
    /// Furnace and system efficiency, (0, 1]
    pub efficiency: f64,
    /// Burn duration of one charge, h
    pub burn_hours: f64,
}

/// Energy content of a charge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnCharge {
    pub fuel_mass_kg: f64,
    pub fuel_energy_mj: f64,
    /// Heat delivered to the room, kWh
    pub usable_energy_kwh: f64,
}

/// A point on the burn curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSample {
    pub time_h: f64,
    pub power_kw: f64,
}

/// Output samples in time order, non-increasing in power
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerCurve {
    pub samples: Vec<PowerSample>,
}

impl PowerCurve {
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time_h).collect()
    }

    pub fn powers(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.power_kw).collect()
    }

    /// Highest sampled output, kW
    pub fn peak_kw(&self) -> f64 {
        self.samples.iter().map(|s| s.power_kw).fold(0.0, f64::max)
    }

    /// Energy under the sampled curve by the trapezoid rule, kWh
    pub fn trapezoid_energy_kwh(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| 0.5 * (w[0].power_kw + w[1].power_kw) * (w[1].time_h - w[0].time_h))
            .sum()
    }
}

/// Results from the burn simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnResult {
    pub charge: BurnCharge,
    /// Mean output over the burn, kW
    pub average_power_kw: f64,
    /// Output at ignition, kW
    pub peak_power_kw: f64,
    pub curve: PowerCurve,
}

/// Energy content of the charge described by `input`
pub fn charge(input: &BurnInput) -> BurnCharge {
    let volume_m3 = CubicMeters::from(Liters(input.volume_l)).value();
    let mass = fuel_mass_kg(volume_m3, input.fill_fraction, input.species.density_kg_m3());
    let energy = fuel_energy_mj(mass, input.species.specific_energy_mj_kg());
    BurnCharge {
        fuel_mass_kg: mass,
        fuel_energy_mj: energy,
        usable_energy_kwh: usable_energy_kwh(energy, input.efficiency),
    }
}

/// Number of samples from 0 to `burn_hours` inclusive at [`SAMPLE_STEP_H`].
///
/// Degenerate durations give one sample; long ones stop at
/// [`MAX_SAMPLED_HOURS`].
pub fn sample_count(burn_hours: f64) -> usize {
    if !burn_hours.is_finite() || burn_hours <= 0.0 {
        return 1;
    }
    (burn_hours.min(MAX_SAMPLED_HOURS) / SAMPLE_STEP_H).floor() as usize + 1
}

/// Simulate one burn.
pub fn simulate(input: &BurnInput) -> BurnResult {
    let charge = charge(input);
    let average = average_power_kw(charge.usable_energy_kwh, input.burn_hours);
    let peak = peak_power_kw(average);

    let samples = (0..sample_count(input.burn_hours))
        .map(|i| {
            let time_h = i as f64 * SAMPLE_STEP_H;
            PowerSample {
                time_h,
                power_kw: linear_decay_power_kw(peak, time_h, input.burn_hours),
            }
        })
        .collect();

    tracing::debug!(
        volume_l = input.volume_l,
        usable_kwh = charge.usable_energy_kwh,
        average_kw = average,
        "burn simulated"
    );

    BurnResult {
        charge,
        average_power_kw: average,
        peak_power_kw: peak,
        curve: PowerCurve { samples },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn musson_600() -> BurnInput {
        BurnInput {
            volume_l: 125.0,
            fill_fraction: 0.8,
            species: FirewoodSpecies::Softwood,
            efficiency: 0.85,
            burn_hours: 8.0,
        }
    }

    #[test]
    fn test_musson_600_softwood() {
        let result = simulate(&musson_600());
        assert_relative_eq!(result.charge.fuel_mass_kg, 35.0, epsilon = 1e-9);
        assert_relative_eq!(result.charge.fuel_energy_mj, 595.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.charge.usable_energy_kwh, 140.49, epsilon = 0.01);
        assert_abs_diff_eq!(result.average_power_kw, 17.56, epsilon = 0.01);
        assert_abs_diff_eq!(result.peak_power_kw, 35.12, epsilon = 0.01);

        let at_4h = result.curve.samples[8];
        assert_eq!(at_4h.time_h, 4.0);
        assert_relative_eq!(at_4h.power_kw, result.average_power_kw, epsilon = 1e-9);
    }

    #[test]
    fn test_peak_is_twice_average() {
        for hours in BURN_DURATION_OPTIONS_H {
            let result = simulate(&BurnInput { burn_hours: hours, ..musson_600() });
            assert_eq!(result.curve.samples[0].power_kw, 2.0 * result.average_power_kw);
            assert_eq!(result.curve.peak_kw(), result.peak_power_kw);
        }
    }

    #[test]
    fn test_trapezoid_matches_average_energy() {
        for hours in BURN_DURATION_OPTIONS_H {
            let result = simulate(&BurnInput { burn_hours: hours, ..musson_600() });
            assert_relative_eq!(
                result.curve.trapezoid_energy_kwh(),
                result.average_power_kw * hours,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_sample_grid() {
        let result = simulate(&musson_600());
        assert_eq!(result.curve.samples.len(), 17);
        assert_eq!(result.curve.times().last(), Some(&8.0));
        assert_eq!(result.curve.powers().last(), Some(&0.0));
        assert!(result
            .curve
            .samples
            .windows(2)
            .all(|w| w[1].power_kw <= w[0].power_kw));

        assert_eq!(sample_count(24.0), 49);
        assert_eq!(sample_count(2.25), 5);
    }

    #[test]
    fn test_zero_duration_gives_zero_output() {
        let result = simulate(&BurnInput { burn_hours: 0.0, ..musson_600() });
        assert_eq!(result.average_power_kw, 0.0);
        assert_eq!(result.peak_power_kw, 0.0);
        assert_eq!(result.curve.samples, vec![PowerSample { time_h: 0.0, power_kw: 0.0 }]);
        assert!(result.charge.usable_energy_kwh > 0.0);
    }

    #[test]
    fn test_degenerate_durations_give_single_zero_sample() {
        for hours in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -3.0] {
            assert_eq!(sample_count(hours), 1);
            let result = simulate(&BurnInput { burn_hours: hours, ..musson_600() });
            assert_eq!(result.average_power_kw, 0.0);
            assert_eq!(result.curve.samples, vec![PowerSample { time_h: 0.0, power_kw: 0.0 }]);
        }
    }

    #[test]
    fn test_very_long_burn_sampling_is_bounded() {
        assert_eq!(sample_count(1e12), 337);
        assert_eq!(sample_count(f64::MAX), 337);

        let result = simulate(&BurnInput { burn_hours: 1e12, ..musson_600() });
        assert_eq!(result.curve.samples.len(), 337);
        assert_eq!(result.curve.samples.last().unwrap().time_h, MAX_SAMPLED_HOURS);
        assert!(result.curve.samples.iter().all(|s| s.power_kw.is_finite() && s.power_kw >= 0.0));
    }

    #[test]
    fn test_denser_wood_burns_hotter() {
        let softwood = simulate(&musson_600());
        let oak = simulate(&BurnInput {
            species: FirewoodSpecies::Oak,
            ..musson_600()
        });
        assert!(oak.average_power_kw > softwood.average_power_kw);
    }
}
