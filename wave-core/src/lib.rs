//! Discrete 2D wave-field simulator.
//!
//! [`WaveField`] integrates a damped scalar wave equation over an N×N grid
//! with an explicit leapfrog stencil. A quadratic sponge layer absorbs waves
//! near the clamped edges. Hosts read [`WaveField::surface`] once per frame
//! and drive [`WaveField::update`] through a [`FixedStepper`].

mod control;
mod error;
mod field;
mod grid;
mod stepper;

pub use control::{Control, DAMPING_STEP, IMPULSE_MAX, IMPULSE_MIN, SPEED_STEP};
pub use error::{FieldError, Result};
pub use field::{
    DEFAULT_DAMPING, Disturbance, MAX_DAMPING, SPONGE_FRACTION, WaveField, sponge_thickness,
};
pub use grid::Grid;
pub use stepper::FixedStepper;
