//! # Steady-State Conduction Formulas
//!
//! One-dimensional, steady-state heat flow through plane building elements.
//!
//! ## Notation
//!
//! - `d` = Layer thickness (m)
//! - `λ` = Thermal conductivity (W/(m·K))
//! - `R` = Thermal resistance (m²·K/W)
//! - `A` = Surface area (m²)
//! - `Δt` = Indoor minus outdoor temperature (K)
//! - `Q` = Heat flow (W)
//!
//! ## References
//!
//! - EN ISO 6946: Building components and building elements, thermal
//!   resistance and thermal transmittance
//! - СП 50.13330: Тепловая защита зданий

use crate::materials::{R_SE, R_SI};

/// Resistance of a single homogeneous layer
///
/// # Formula
/// - R = d / λ
///
/// # Arguments
/// * `thickness_m` - Layer thickness d (m)
/// * `conductivity` - Thermal conductivity λ (W/(m·K))
#[inline]
pub fn layer_resistance(thickness_m: f64, conductivity: f64) -> f64 {
    thickness_m / conductivity
}

/// Total resistance of an element from the sum of its layer resistances
///
/// # Formula
/// - R_T = R_si + Σ R_i + R_se
///
/// Layers are in series, so resistances add directly.
#[inline]
pub fn total_resistance(layer_sum: f64) -> f64 {
    R_SI + layer_sum + R_SE
}

/// Perimeter of a square footprint with the given floor area
///
/// # Formula
/// - P = 4·√A
#[inline]
pub fn square_perimeter(area_m2: f64) -> f64 {
    4.0 * area_m2.sqrt()
}

/// Conductive heat flow through a surface
///
/// # Formula
/// - Q = A·Δt / R
///
/// # Returns
/// Heat flow in watts
#[inline]
pub fn conductive_loss_w(area_m2: f64, delta_t: f64, resistance: f64) -> f64 {
    area_m2 * delta_t / resistance
}
