use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;
use wave_core::{Control, FixedStepper, WaveField};

#[wasm_bindgen]
pub struct WaveSim {
    inner: WaveField,
    stepper: FixedStepper,
    rng: ChaCha8Rng,
}

#[wasm_bindgen]
impl WaveSim {
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, speed: f64, damping: f64, dt: f64, seed: u64) -> Result<WaveSim, JsValue> {
        let inner = WaveField::new(size, speed, damping).map_err(to_js)?;
        let stepper = FixedStepper::new(dt).map_err(to_js)?;
        Ok(WaveSim { inner, stepper, rng: ChaCha8Rng::seed_from_u64(seed) })
    }

    // Parameters
    pub fn set_speed(&mut self, v: f64) { self.inner.set_speed(v); }
    pub fn set_damping(&mut self, v: f64) { self.inner.set_damping(v); }
    pub fn speed(&self) -> f64 { self.inner.speed() }
    pub fn damping(&self) -> f64 { self.inner.damping() }

    pub fn size(&self) -> usize { self.inner.size() }
    pub fn dt(&self) -> f64 { self.stepper.dt() }

    pub fn reset(&mut self) {
        self.inner.reset();
        self.stepper.reset();
    }

    pub fn add_random_disturbance(&mut self, min: f64, max: f64) -> Result<(), JsValue> {
        self.inner
            .add_random_disturbance(&mut self.rng, min, max)
            .map(|_| ())
            .map_err(to_js)
    }

    /// Keyboard-style control by name: "speed+", "speed-", "damping+",
    /// "damping-", "reset" or "impulse".
    pub fn apply(&mut self, action: &str) -> Result<(), JsValue> {
        let control: Control = action.parse().map_err(to_js)?;
        control.apply(&mut self.inner, &mut self.rng).map_err(to_js)?;
        if control == Control::Reset {
            self.stepper.reset();
        }
        Ok(())
    }

    // Copy-based JS access (reliable)
    pub fn get_surface(&self) -> Vec<f64> {
        self.inner.surface().as_slice().to_vec()
    }

    pub fn update(&mut self, delta: f64) { self.inner.update(delta); }

    // Accumulated stepping + timing (WASM-only)
    pub fn advance(&mut self, elapsed_seconds: f64) -> StepInfo {
        let t0 = now_ms();
        let steps = self.stepper.advance(&mut self.inner, elapsed_seconds);
        let t1 = now_ms();
        StepInfo { steps, compute_ms: t1 - t0 }
    }
}

#[wasm_bindgen]
pub struct StepInfo {
    steps: u32,
    compute_ms: f64,
}

#[wasm_bindgen]
impl StepInfo {
    pub fn steps(&self) -> u32 { self.steps }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}


fn to_js(e: wave_core::FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
