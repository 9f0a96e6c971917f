//! # hearth_core - Heat-Loss and Wood-Furnace Sizing Engine
//!
//! `hearth_core` estimates the steady-state heat loss of a single room and
//! picks a wood-fired furnace from the "Муссон" line that can cover it. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Total**: Calculators never fail; degenerate inputs give zero results
//! - **Validated at the edge**: Range checks live in [`evaluation::EvaluationInput::validate`]
//! - **Traceable**: Every formula is registered in [`equations::registry`]
//!
//! ## Quick Start
//!
//! ```rust
//! use hearth_core::catalog::Catalog;
//! use hearth_core::evaluation::{evaluate, EvaluationInput};
//! use hearth_core::report::{render_report, ReportOptions};
//!
//! let input = EvaluationInput::default();
//! let evaluation = evaluate(&input, Catalog::builtin()).unwrap();
//! let report = render_report(&input, &evaluation, &ReportOptions::default());
//! assert!(report.contains("Муссон 2000"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Wall resistance, heat loss, burn curve, recommendation
//! - [`evaluation`] - Validated inputs and the full evaluation pipeline
//! - [`report`] - Plain-text report rendering
//! - [`catalog`] - Furnace models, builtin or loaded from TOML
//! - [`materials`] - Wall materials and firewood species
//! - [`equations`] - Formulas and the equation registry
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic report saves, input and catalog files

pub mod calculations;
pub mod catalog;
pub mod equations;
pub mod errors;
pub mod evaluation;
pub mod file_io;
pub mod materials;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{Catalog, FurnaceModel};
pub use errors::{CalcError, CalcResult};
pub use evaluation::{evaluate, Evaluation, EvaluationInput};
pub use file_io::{load_catalog, load_input, save_report};
pub use report::{render_report, report_filename, ReportOptions};
