use crate::domain::{Fetched, InstrumentCode, QuoteRecord};
use crate::error::FetchError;
use crate::source::QuoteSource;

const MU: f64 = 0.01;
const SIGMA: f64 = 0.02;
const INITIAL_PRICE: f64 = 800.0;

/// Synthetic source stepping a multiplicative random walk.
///
/// Each fetch multiplies the previous price by `1 + N(0.01, 0.02) / 100`.
/// Baseline and open are fixed at construction; fetches never fail.
pub struct RandomWalkSource {
    code: InstrumentCode,
    current: f64,
    previous_close: f64,
    open: f64,
    rng: fastrand::Rng,
}

impl RandomWalkSource {
    pub fn new(code: InstrumentCode) -> Self {
        let mut rng = fastrand::Rng::new();
        let previous_close = INITIAL_PRICE;
        let open = step(previous_close, &mut rng);
        Self {
            code,
            current: open,
            previous_close,
            open,
            rng,
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(code: InstrumentCode, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let previous_close = INITIAL_PRICE;
        let open = step(previous_close, &mut rng);
        Self {
            code,
            current: open,
            previous_close,
            open,
            rng,
        }
    }
}

impl QuoteSource for RandomWalkSource {
    fn code(&self) -> &InstrumentCode {
        &self.code
    }

    fn fetch(&mut self) -> Result<Fetched, FetchError> {
        self.current = step(self.current, &mut self.rng);
        Ok(Fetched::new(
            QuoteRecord::new(self.current, self.previous_close, self.open),
            Some(String::from("random")),
        ))
    }
}

fn step(current: f64, rng: &mut fastrand::Rng) -> f64 {
    current * (1.0 + gaussian(rng) / 100.0)
}

/// Sample N(MU, SIGMA) via Box-Muller.
fn gaussian(rng: &mut fastrand::Rng) -> f64 {
    let mut u1 = rng.f64();
    // ln(0) is -inf; nudge off the boundary.
    if u1 <= f64::EPSILON {
        u1 = f64::EPSILON;
    }
    let u2 = rng.f64();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    MU + SIGMA * z
}
