//! # Fuel Charge and Burn-Curve Formulas
//!
//! Energy balance of a single firewood charge and the linear power-decay
//! model of its burn.
//!
//! ## Notation
//!
//! - `V` = Firebox volume (m³)
//! - `φ` = Fill fraction of the firebox (0–1)
//! - `ρ` = Bulk density of the wood (kg/m³)
//! - `q` = Lower heating value (MJ/kg)
//! - `η` = Furnace and system efficiency (0–1)
//! - `T` = Burn duration (h)
//! - `P` = Thermal output (kW)
//!
//! ## Decay Model
//!
//! Output falls linearly from a peak at ignition to zero at `T`. The area
//! under that ramp is `½·P_peak·T`, and it must equal the usable energy
//! `P_avg·T`, which fixes `P_peak = 2·P_avg`.

use crate::units::{KilowattHours, Megajoules};

/// Mass of wood in a charge
///
/// # Formula
/// - m = V·φ·ρ
#[inline]
pub fn fuel_mass_kg(volume_m3: f64, fill_fraction: f64, density_kg_m3: f64) -> f64 {
    volume_m3 * fill_fraction * density_kg_m3
}

/// Chemical energy of a charge
///
/// # Formula
/// - E = m·q
#[inline]
pub fn fuel_energy_mj(mass_kg: f64, specific_energy_mj_kg: f64) -> f64 {
    mass_kg * specific_energy_mj_kg
}

/// Heat delivered to the room from a charge
///
/// # Formula
/// - E_use = E / 3.6 · η
#[inline]
pub fn usable_energy_kwh(fuel_energy_mj: f64, efficiency: f64) -> f64 {
    KilowattHours::from(Megajoules(fuel_energy_mj)).value() * efficiency
}

/// Mean output over the burn
///
/// # Formula
/// - P_avg = E_use / T, or 0 when T is not a positive finite duration
#[inline]
pub fn average_power_kw(usable_kwh: f64, burn_hours: f64) -> f64 {
    if burn_hours.is_finite() && burn_hours > 0.0 {
        usable_kwh / burn_hours
    } else {
        0.0
    }
}

/// Output at ignition for the linear decay model
///
/// # Formula
/// - P_peak = 2·P_avg
#[inline]
pub fn peak_power_kw(average_kw: f64) -> f64 {
    2.0 * average_kw
}

/// Output at time t into the burn
///
/// # Formula
/// - P(t) = max(0, P_peak·(1 − t/T)), or 0 when T is not a positive finite duration
#[inline]
pub fn linear_decay_power_kw(peak_kw: f64, t_hours: f64, burn_hours: f64) -> f64 {
    if !burn_hours.is_finite() || burn_hours <= 0.0 {
        return 0.0;
    }
    (peak_kw * (1.0 - t_hours / burn_hours)).max(0.0)
}
