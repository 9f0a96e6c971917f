//! # Thermal and Combustion Equations
//!
//! Every formula the calculators apply, kept in one place so it can be
//! checked against its reference and documented in the report appendix.
//!
//! ## Modules
//!
//! - [`thermal`] - Layer resistance, surface films, conductive loss
//! - [`combustion`] - Fuel charge energy and the linear burn curve
//! - [`registry`] - Equation metadata and usage tracking

pub mod combustion;
pub mod registry;
pub mod thermal;

pub use combustion::{
    average_power_kw,
    fuel_energy_mj,
    fuel_mass_kg,
    linear_decay_power_kw,
    peak_power_kw,
    usable_energy_kwh,
};

pub use thermal::{
    conductive_loss_w,
    layer_resistance,
    square_perimeter,
    total_resistance,
};

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Reference,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
