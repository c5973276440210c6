use crate::error::{FieldError, Result};
use crate::field::WaveField;

/// Fixed-timestep accumulator.
///
/// Hosts feed it real elapsed time; it advances the field in whole `dt`
/// increments and carries the remainder to the next call.
#[derive(Clone, Debug)]
pub struct FixedStepper {
    dt: f64,
    accum: f64,
}

impl FixedStepper {
    pub fn new(dt: f64) -> Result<FixedStepper> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FieldError::InvalidTimestep(dt));
        }
        Ok(FixedStepper { dt, accum: 0.0 })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time accumulated but not yet stepped.
    pub fn pending(&self) -> f64 {
        self.accum
    }

    /// Negative or non-finite durations are dropped.
    pub fn accumulate(&mut self, elapsed: f64) {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accum += elapsed;
        }
    }

    /// Steps `field` until less than one `dt` remains. Returns steps taken.
    pub fn drain(&mut self, field: &mut WaveField) -> u32 {
        let mut steps = 0;
        while self.accum >= self.dt {
            field.update(self.dt);
            self.accum -= self.dt;
            steps += 1;
        }
        steps
    }

    pub fn advance(&mut self, field: &mut WaveField, elapsed: f64) -> u32 {
        self.accumulate(elapsed);
        self.drain(field)
    }

    pub fn reset(&mut self) {
        self.accum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_timestep() {
        assert_eq!(
            FixedStepper::new(0.0).err(),
            Some(FieldError::InvalidTimestep(0.0))
        );
        assert!(FixedStepper::new(-0.1).is_err());
        assert!(FixedStepper::new(f64::INFINITY).is_err());
    }

    #[test]
    fn carries_remainder_between_calls() {
        let mut field = WaveField::new(8, 1.0, 0.1).unwrap();
        let mut stepper = FixedStepper::new(0.25).unwrap();

        assert_eq!(stepper.advance(&mut field, 0.625), 2);
        assert_eq!(stepper.pending(), 0.125);
        assert_eq!(stepper.advance(&mut field, 0.125), 1);
        assert_eq!(stepper.pending(), 0.0);
    }

    #[test]
    fn ignores_negative_and_nan_elapsed() {
        let mut field = WaveField::new(8, 1.0, 0.1).unwrap();
        let mut stepper = FixedStepper::new(0.1).unwrap();
        assert_eq!(stepper.advance(&mut field, -1.0), 0);
        assert_eq!(stepper.advance(&mut field, f64::NAN), 0);
        assert_eq!(stepper.pending(), 0.0);
    }

    #[test]
    fn reset_drops_pending_time() {
        let mut stepper = FixedStepper::new(0.5).unwrap();
        stepper.accumulate(0.3);
        stepper.reset();
        assert_eq!(stepper.pending(), 0.0);
    }
}
