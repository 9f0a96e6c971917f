//! # Sizing Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input)` / `simulate(input)` - Pure function, never fails
//!
//! Degenerate inputs (zero temperature difference, zero burn duration)
//! produce defined zero results instead of errors. Range checks on user
//! input live in [`crate::evaluation::EvaluationInput::validate`].
//!
//! ## Available Calculations
//!
//! - [`wall`] - Wall thermal resistance (homogeneous or layered)
//! - [`heat_loss`] - Room conductive heat loss
//! - [`burn`] - Burn curve of one firewood charge
//! - [`recommendation`] - Model selection, cascade and refuel interval

pub mod burn;
pub mod heat_loss;
pub mod recommendation;
pub mod wall;

// Re-export commonly used types
pub use burn::{BurnInput, BurnResult, PowerCurve, PowerSample};
pub use heat_loss::{HeatLossInput, HeatLossResult, RoomSpec};
pub use recommendation::{Cascade, ModelRun, Recommendation};
pub use wall::{WallAssembly, WallConstruction, WallLayer, WallResult};
