//! # Room Heat Loss
//!
//! Steady-state conductive loss of a single room through its walls, floor
//! and ceiling.
//!
//! ## Assumptions
//!
//! - Square floor plan: perimeter = 4·√A
//! - Walls on all four sides are exterior walls of one construction
//! - Floor and ceiling have the same area as the footprint
//! - No infiltration, solar gain or thermal mass
//! - Indoor not warmer than outdoor means no loss at all
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::calculations::heat_loss::{calculate, HeatLossInput, RoomSpec};
//!
//! let input = HeatLossInput {
//!     room: RoomSpec { area_m2: 100.0, height_m: 2.5, t_in_c: 22.0, t_out_c: -20.0 },
//!     wall_r: 0.664,
//!     floor_r: 2.5,
//!     ceiling_r: 3.5,
//! };
//! let result = calculate(&input);
//! assert!((result.total_kw - 9.21).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{conductive_loss_w, square_perimeter};
use crate::units::{Kilowatts, Watts};

/// Insulated slab on grade, m²·K/W
pub const DEFAULT_FLOOR_R: f64 = 2.5;

/// Insulated attic floor, m²·K/W
pub const DEFAULT_CEILING_R: f64 = 3.5;

/// Room geometry and design temperatures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Floor area, m²
    pub area_m2: f64,
    /// Ceiling height, m
    pub height_m: f64,
    /// Indoor design temperature, °C
    pub t_in_c: f64,
    /// Outdoor design temperature, °C
    pub t_out_c: f64,
}

impl RoomSpec {
    pub fn delta_t(&self) -> f64 {
        self.t_in_c - self.t_out_c
    }

    pub fn perimeter_m(&self) -> f64 {
        square_perimeter(self.area_m2)
    }

    pub fn wall_area_m2(&self) -> f64 {
        self.perimeter_m() * self.height_m
    }

    pub fn volume_m3(&self) -> f64 {
        self.area_m2 * self.height_m
    }
}

/// Input to the heat-loss calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatLossInput {
    pub room: RoomSpec,
    /// Wall resistance, m²·K/W
    pub wall_r: f64,
    /// Floor resistance, m²·K/W
    pub floor_r: f64,
    /// Ceiling resistance, m²·K/W
    pub ceiling_r: f64,
}

/// Heat loss with per-surface breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatLossResult {
    /// Indoor minus outdoor, K
    pub delta_t: f64,
    pub perimeter_m: f64,
    pub wall_area_m2: f64,
    /// Loss through walls, W
    pub walls_w: f64,
    /// Loss through floor, W
    pub floor_w: f64,
    /// Loss through ceiling, W
    pub ceiling_w: f64,
    /// Total loss, kW (never negative)
    pub total_kw: f64,
}

/// Calculate room heat loss.
///
/// Returns exactly zero loss when `t_in <= t_out`.
pub fn calculate(input: &HeatLossInput) -> HeatLossResult {
    let room = &input.room;
    let delta_t = room.delta_t();
    let perimeter_m = room.perimeter_m();
    let wall_area_m2 = room.wall_area_m2();

    if delta_t <= 0.0 {
        tracing::debug!(delta_t, "no heating demand");
        return HeatLossResult {
            delta_t,
            perimeter_m,
            wall_area_m2,
            walls_w: 0.0,
            floor_w: 0.0,
            ceiling_w: 0.0,
            total_kw: 0.0,
        };
    }

    let walls = Watts(conductive_loss_w(wall_area_m2, delta_t, input.wall_r));
    let floor = Watts(conductive_loss_w(room.area_m2, delta_t, input.floor_r));
    let ceiling = Watts(conductive_loss_w(room.area_m2, delta_t, input.ceiling_r));
    let total: Kilowatts = (walls + floor + ceiling).into();

    tracing::debug!(
        walls_w = walls.value(),
        floor_w = floor.value(),
        ceiling_w = ceiling.value(),
        total_kw = total.value(),
        "room heat loss"
    );

    HeatLossResult {
        delta_t,
        perimeter_m,
        wall_area_m2,
        walls_w: walls.value(),
        floor_w: floor.value(),
        ceiling_w: ceiling.value(),
        total_kw: total.value(),
    }
}

/// Total heat loss in kW from scalar inputs.
pub fn heat_loss_kw(
    area_m2: f64,
    height_m: f64,
    wall_r: f64,
    floor_r: f64,
    ceiling_r: f64,
    t_in_c: f64,
    t_out_c: f64,
) -> f64 {
    calculate(&HeatLossInput {
        room: RoomSpec {
            area_m2,
            height_m,
            t_in_c,
            t_out_c,
        },
        wall_r,
        floor_r,
        ceiling_r,
    })
    .total_kw
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_input() -> HeatLossInput {
        HeatLossInput {
            room: RoomSpec {
                area_m2: 100.0,
                height_m: 2.5,
                t_in_c: 22.0,
                t_out_c: -20.0,
            },
            wall_r: 0.13 + 0.40 / 0.81 + 0.04,
            floor_r: DEFAULT_FLOOR_R,
            ceiling_r: DEFAULT_CEILING_R,
        }
    }

    #[test]
    fn test_reference_room() {
        let result = calculate(&reference_input());
        assert_relative_eq!(result.perimeter_m, 40.0);
        assert_relative_eq!(result.wall_area_m2, 100.0);
        assert_relative_eq!(result.floor_w, 1680.0, epsilon = 1e-9);
        assert_relative_eq!(result.ceiling_w, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(result.walls_w, 6327.0, epsilon = 1.0);
        assert_relative_eq!(result.total_kw, 9.21, epsilon = 0.01);
    }

    #[test]
    fn test_no_loss_without_temperature_difference() {
        for (t_in, t_out) in [(20.0, 20.0), (0.0, 5.0), (10.0, 10.0), (15.0, 30.0)] {
            let loss = heat_loss_kw(100.0, 2.5, 0.66, 2.5, 3.5, t_in, t_out);
            assert_eq!(loss, 0.0);
        }
    }

    #[test]
    fn test_monotonic_in_delta_t() {
        let mut previous = 0.0;
        for t_out in (-50..=10).rev() {
            let loss = heat_loss_kw(80.0, 2.7, 1.2, 2.5, 3.5, 22.0, t_out as f64);
            assert!(loss > previous, "t_out = {}", t_out);
            previous = loss;
        }
    }

    #[test]
    fn test_monotonic_in_each_resistance() {
        let base = calculate(&reference_input()).total_kw;
        let bumps: [fn(&mut HeatLossInput); 3] = [
            |i| i.wall_r *= 1.5,
            |i| i.floor_r *= 1.5,
            |i| i.ceiling_r *= 1.5,
        ];
        for bump in bumps {
            let mut input = reference_input();
            bump(&mut input);
            assert!(calculate(&input).total_kw < base);
        }
    }

    #[test]
    fn test_room_geometry() {
        let room = reference_input().room;
        assert_relative_eq!(room.volume_m3(), 250.0);
        assert_relative_eq!(room.delta_t(), 42.0);
    }
}
