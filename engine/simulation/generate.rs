use serde::{Deserialize, Serialize};

use crate::profile::DayPeriod;
use metrics::{stress_score, Density, Thresholds};

// independent volatility applied on top of the time-of-day factor
const VOLATILITY_MIN: f64 = 0.85;
const VOLATILITY_MAX: f64 = 1.15;

// bounds on the combined speed factor
const MIN_SPEED_FACTOR: f64 = 0.1;
const MAX_SPEED_FACTOR: f64 = 1.2;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Metrics error: {0}")]
    MetricsError(#[from] metrics::Error),
}

/// A plausible (speed, stress, density) triple for a node with no live
/// telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedMetrics {
    pub speed: f64,
    pub stress: u32,
    pub density: Density,
}

/**
 * Produces simulated metrics for a node as a function of time of day.
 *
 * The speed is the node's free-flow speed scaled by a factor drawn from the
 * hour's profile range and an independent volatility draw, with the combined
 * factor clamped to a sane range. The resulting speed is fed through the same
 * stress formula as live telemetry, so the two paths can never disagree.
 *
 * Deterministic for a fixed RNG: callers that need reproducible output supply
 * a seeded generator.
 */
pub fn simulate<R: rand::Rng>(
    normal_speed: f64,
    hour: u32,
    thresholds: &Thresholds,
    rng: &mut R,
) -> Result<SimulatedMetrics, Error> {
    let period = DayPeriod::classify(hour)?;

    let (low, high) = period.speed_factor_range();
    let period_factor = rng.gen_range(low..high);
    let volatility = rng.gen_range(VOLATILITY_MIN..VOLATILITY_MAX);
    let factor = (period_factor * volatility).clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR);

    let speed = normal_speed * factor;
    let stress = stress_score(speed, normal_speed)?;

    Ok(SimulatedMetrics {
        speed,
        stress,
        density: Density::from_stress(stress, thresholds),
    })
}
