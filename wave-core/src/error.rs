//! Error types for field construction and input validation.

use thiserror::Error;

/// Result type for wave field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised at the boundary of the wave field.
///
/// Parameter nudges that fall outside their legal range are not errors; they
/// are ignored and the previous value is kept.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The grid leaves no interior cell outside the sponge layer.
    #[error("grid size {size} leaves no interior outside a sponge layer of {sponge} cells")]
    GridTooSmall { size: usize, sponge: usize },

    /// Propagation speed must be finite and positive.
    #[error("invalid propagation speed: {0}")]
    InvalidSpeed(f64),

    /// Disturbance magnitude range is inverted, not finite, or too wide to sample.
    #[error("invalid disturbance range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    /// Fixed physics increment must be finite and positive.
    #[error("invalid timestep: {0}")]
    InvalidTimestep(f64),

    /// Control name not recognised.
    #[error("unknown control: {0:?}")]
    UnknownControl(String),
}
