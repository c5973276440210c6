use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{FieldError, Result};
use crate::field::{Disturbance, WaveField};

pub const SPEED_STEP: f64 = 0.1;
pub const DAMPING_STEP: f64 = 0.005;
pub const IMPULSE_MIN: f64 = -10.0;
pub const IMPULSE_MAX: f64 = 10.0;

/// Interactive adjustments a host can forward to the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    SpeedUp,
    SpeedDown,
    DampingUp,
    DampingDown,
    Reset,
    Impulse,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::SpeedUp => "speed+",
            Control::SpeedDown => "speed-",
            Control::DampingUp => "damping+",
            Control::DampingDown => "damping-",
            Control::Reset => "reset",
            Control::Impulse => "impulse",
        }
    }

    /// Applies the control. Nudges that leave the legal range are dropped by
    /// the field's setters. Returns the disturbance for `Impulse`.
    pub fn apply<R: Rng + ?Sized>(
        self,
        field: &mut WaveField,
        rng: &mut R,
    ) -> Result<Option<Disturbance>> {
        match self {
            Control::SpeedUp => field.set_speed(field.speed() + SPEED_STEP),
            Control::SpeedDown => field.set_speed(field.speed() - SPEED_STEP),
            Control::DampingUp => field.set_damping(field.damping() + DAMPING_STEP),
            Control::DampingDown => field.set_damping(field.damping() - DAMPING_STEP),
            Control::Reset => field.reset(),
            Control::Impulse => {
                let d = field.add_random_disturbance(rng, IMPULSE_MIN, IMPULSE_MAX)?;
                return Ok(Some(d));
            }
        }
        Ok(None)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Control {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Control> {
        match s.trim() {
            "speed+" => Ok(Control::SpeedUp),
            "speed-" => Ok(Control::SpeedDown),
            "damping+" => Ok(Control::DampingUp),
            "damping-" => Ok(Control::DampingDown),
            "reset" => Ok(Control::Reset),
            "impulse" => Ok(Control::Impulse),
            other => Err(FieldError::UnknownControl(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn names_round_trip() {
        for c in [
            Control::SpeedUp,
            Control::SpeedDown,
            Control::DampingUp,
            Control::DampingDown,
            Control::Reset,
            Control::Impulse,
        ] {
            assert_eq!(c.as_str().parse::<Control>(), Ok(c));
        }
        assert_eq!(
            "jump".parse::<Control>(),
            Err(FieldError::UnknownControl("jump".into()))
        );
    }

    #[test]
    fn nudges_speed_and_damping() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut field = WaveField::new(40, 4.0, 0.02).unwrap();

        Control::SpeedUp.apply(&mut field, &mut rng).unwrap();
        assert!((field.speed() - 4.1).abs() < 1e-12);
        Control::DampingUp.apply(&mut field, &mut rng).unwrap();
        assert!((field.damping() - 0.025).abs() < 1e-12);
        Control::DampingDown.apply(&mut field, &mut rng).unwrap();
        Control::DampingDown.apply(&mut field, &mut rng).unwrap();
        assert!((field.damping() - 0.015).abs() < 1e-12);
    }

    #[test]
    fn nudges_past_the_bound_are_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut field = WaveField::new(40, 0.05, 0.004).unwrap();

        Control::SpeedDown.apply(&mut field, &mut rng).unwrap();
        assert_eq!(field.speed(), 0.05);
        Control::DampingDown.apply(&mut field, &mut rng).unwrap();
        assert_eq!(field.damping(), 0.004);
    }

    #[test]
    fn impulse_lands_inside_the_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut field = WaveField::new(40, 4.0, 0.02).unwrap();
        let s = field.sponge_thickness();

        for _ in 0..50 {
            let d = Control::Impulse
                .apply(&mut field, &mut rng)
                .unwrap()
                .expect("impulse reports its disturbance");
            assert!(d.row >= s && d.row <= 40 - s - 1);
            assert!(d.col >= s && d.col <= 40 - s - 1);
            assert!((IMPULSE_MIN..=IMPULSE_MAX).contains(&d.value));
        }
    }
}
