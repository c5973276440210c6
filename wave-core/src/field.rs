use rand::Rng;
use tracing::{debug, trace};

use crate::error::{FieldError, Result};
use crate::grid::Grid;

/// Exclusive upper bound for damping accepted by [`WaveField::set_damping`].
pub const MAX_DAMPING: f64 = 0.2;
/// Share of the half-size given to the absorbing border.
pub const SPONGE_FRACTION: f64 = 0.125;
/// Damping used when the constructor receives a value outside (0, 1).
pub const DEFAULT_DAMPING: f64 = 0.5;

/// A single impulse added by [`WaveField::add_random_disturbance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disturbance {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Damped scalar wave equation integrated over a square grid.
///
/// Three height buffers rotate between the previous, current and next roles
/// on every step; `current` indexes the buffer holding the visible surface.
/// A static damping mask raises absorption towards the edges so outgoing
/// waves fade before they hit the clamped boundary.
pub struct WaveField {
    n: usize,
    speed: f64,
    base_damping: f64,
    sponge: usize,
    buffers: [Grid; 3],
    current: usize,
    damping_mask: Grid,
}

impl WaveField {
    pub fn new(size: usize, speed: f64, base_damping: f64) -> Result<WaveField> {
        let sponge = sponge_thickness(size);
        if size < 3 || size < 2 * sponge + 1 {
            return Err(FieldError::GridTooSmall { size, sponge });
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(FieldError::InvalidSpeed(speed));
        }

        let base_damping = if base_damping > 0.0 && base_damping < 1.0 {
            base_damping
        } else {
            debug!(
                requested = base_damping,
                used = DEFAULT_DAMPING,
                "damping outside (0, 1), using default"
            );
            DEFAULT_DAMPING
        };

        let mut field = WaveField {
            n: size,
            speed,
            base_damping,
            sponge,
            buffers: [Grid::zeros(size), Grid::zeros(size), Grid::zeros(size)],
            current: 0,
            damping_mask: Grid::zeros(size),
        };
        field.compute_damping_mask();

        debug!(size, sponge, speed, damping = base_damping, "wave field created");
        Ok(field)
    }

    // ---- Parameters ----

    /// Accepts values strictly inside (0, MAX_DAMPING); anything else is ignored.
    pub fn set_damping(&mut self, value: f64) {
        if !(value > 0.0 && value < MAX_DAMPING) {
            debug!(value, kept = self.base_damping, "damping rejected");
            return;
        }
        self.base_damping = value;
        self.compute_damping_mask();
    }

    pub fn damping(&self) -> f64 {
        self.base_damping
    }

    /// Accepts finite, strictly positive values; anything else is ignored.
    pub fn set_speed(&mut self, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            debug!(value, kept = self.speed, "speed rejected");
            return;
        }
        self.speed = value;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Stencil coefficient `(speed * delta)^2` for an increment.
    pub fn alpha(&self, delta: f64) -> f64 {
        let a = self.speed * delta;
        a * a
    }

    pub fn is_stable(&self, delta: f64) -> bool {
        self.alpha(delta) < 1.0
    }

    // ---- Accessors ----

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn sponge_thickness(&self) -> usize {
        self.sponge
    }

    /// Read-only view of the current surface. Treat it as a snapshot: the
    /// next mutating call may rotate a different buffer into place.
    pub fn surface(&self) -> &Grid {
        &self.buffers[self.current]
    }

    pub fn damping_mask(&self) -> &Grid {
        &self.damping_mask
    }

    // ---- Mutation ----

    /// Advances the field by `delta`. Does nothing when the step would be
    /// unstable (`alpha >= 1`).
    pub fn update(&mut self, delta: f64) {
        let alpha = self.alpha(delta);
        if !(alpha < 1.0) {
            trace!(alpha, delta, "step skipped, stability bound violated");
            return;
        }

        let n = self.n;
        let (next, cur, prev) = split_roles(&mut self.buffers, self.current);
        let out = next.as_mut_slice();
        let c = cur.as_slice();
        let p = prev.as_slice();
        let mask = self.damping_mask.as_slice();

        for i in 0..n {
            let row = i * n;
            for j in 0..n {
                let idx = row + j;
                if i == 0 || j == 0 || i == n - 1 || j == n - 1 {
                    out[idx] = 0.0;
                    continue;
                }

                let u = c[idx];
                let lap = c[idx + n] + c[idx - n] + c[idx + 1] + c[idx - 1] - 4.0 * u;
                let h = 2.0 * u - p[idx] + alpha * lap;
                out[idx] = h * (1.0 - mask[idx]);
            }
        }

        self.current = (self.current + 1) % 3;
    }

    /// Adds a value drawn from `[min, max]` to a random cell of the interior
    /// band that excludes the sponge layer.
    pub fn add_random_disturbance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        min: f64,
        max: f64,
    ) -> Result<Disturbance> {
        if !(min.is_finite() && max.is_finite()) || min > max || !(max - min).is_finite() {
            return Err(FieldError::InvalidRange { min, max });
        }

        let lo = self.sponge;
        let hi = self.n - self.sponge - 1;
        let row = rng.gen_range(lo..=hi);
        let col = rng.gen_range(lo..=hi);
        let value = if min == max {
            min
        } else {
            rng.gen_range(min..=max)
        };

        self.buffers[self.current][(row, col)] += value;
        trace!(row, col, value, "disturbance added");

        Ok(Disturbance { row, col, value })
    }

    /// Zeroes the previous and current surfaces. The mask and parameters are
    /// left alone.
    pub fn reset(&mut self) {
        let (_, cur, prev) = split_roles_mut(&mut self.buffers, self.current);
        cur.fill(0.0);
        prev.fill(0.0);
    }

    // ---- Internal ----

    fn compute_damping_mask(&mut self) {
        let n = self.n;
        let sponge = self.sponge as f64;
        let base = self.base_damping;

        for i in 0..n {
            for j in 0..n {
                let distance = i.min(j).min(n - 1 - i).min(n - 1 - j);
                let s = (1.0 - distance as f64 / sponge).clamp(0.0, 1.0);
                self.damping_mask[(i, j)] = base + (1.0 - base) * s * s;
            }
        }
    }
}

/// Absorbing border width for a grid of `size` cells, at least one.
pub fn sponge_thickness(size: usize) -> usize {
    ((size as f64 * 0.5 * SPONGE_FRACTION).floor() as usize).max(1)
}

/// Borrows the buffers as (next, current, previous).
fn split_roles(buffers: &mut [Grid; 3], current: usize) -> (&mut Grid, &Grid, &Grid) {
    let (next, cur, prev) = split_roles_mut(buffers, current);
    (next, &*cur, &*prev)
}

fn split_roles_mut(
    buffers: &mut [Grid; 3],
    current: usize,
) -> (&mut Grid, &mut Grid, &mut Grid) {
    let [a, b, c] = buffers;
    match current {
        0 => (b, a, c),
        1 => (c, b, a),
        _ => (a, c, b),
    }
}
