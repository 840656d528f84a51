use serde::{Deserialize, Serialize};

use metrics::Thresholds;

// linear confidence decay over the forecast horizon
const CONFIDENCE_START: f64 = 95.0;
const CONFIDENCE_FLOOR: f64 = 50.0;
const CONFIDENCE_DECAY_PER_MINUTE: f64 = 0.5;

// the band around the predicted stress widens with the horizon
const BAND_BASE_HALF_WIDTH: f64 = 5.0;
const BAND_GROWTH_PER_MINUTE: f64 = 0.1;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Metrics error: {0}")]
    MetricsError(#[from] metrics::Error),
    #[error("Simulation error: {0}")]
    SimulationError(#[from] simulation::Error),
}

/// A node's projected stress at some future offset, with a confidence band
/// that widens as the horizon grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub predicted_stress: u32,
    /// 50-95; decays linearly with the horizon
    pub confidence: f64,
    /// symmetric band around the predicted stress, clamped to the 0-100 scale
    pub confidence_range: (f64, f64),
    pub target_hour: u32,
}

/// Recommended response to a forecast, keyed off the shared thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Preemptive,
    Monitor,
    Nominal,
}

impl Outlook {
    pub fn recommended_action(&self) -> &'static str {
        match self {
            Outlook::Preemptive => "Immediate pre-emptive action: reroute traffic now",
            Outlook::Monitor => "Monitor closely and prepare interventions",
            Outlook::Nominal => "No action needed",
        }
    }
}

impl ForecastEntry {
    pub fn outlook(&self, thresholds: &Thresholds) -> Outlook {
        if self.predicted_stress > thresholds.severity_critical {
            Outlook::Preemptive
        } else if self.predicted_stress > thresholds.density_high {
            Outlook::Monitor
        } else {
            Outlook::Nominal
        }
    }

    pub fn is_early_warning(&self, thresholds: &Thresholds) -> bool {
        self.predicted_stress > thresholds.density_high
    }
}

/**
 * Projects a node's stress at `now + offset_minutes`.
 *
 * This models "what stress looks like at the target hour" via the simulated
 * metrics profile, not a trend extrapolation from history. Confidence decays
 * linearly with the horizon down to a floor; the confidence band widens with
 * the horizon. Pure function of its inputs aside from the supplied RNG.
 */
pub fn forecast<R: rand::Rng>(
    normal_speed: f64,
    offset_minutes: u32,
    current_hour: u32,
    thresholds: &Thresholds,
    rng: &mut R,
) -> Result<ForecastEntry, Error> {
    // validate up front: the wrap below would silently launder a bad hour
    metrics::validate_hour(current_hour)?;

    let target_hour = (current_hour + offset_minutes / 60) % 24;
    let projected = simulation::simulate(normal_speed, target_hour, thresholds, rng)?;

    let confidence = (CONFIDENCE_START - offset_minutes as f64 * CONFIDENCE_DECAY_PER_MINUTE)
        .max(CONFIDENCE_FLOOR);
    let half_width = BAND_BASE_HALF_WIDTH + offset_minutes as f64 * BAND_GROWTH_PER_MINUTE;
    let stress = projected.stress as f64;

    Ok(ForecastEntry {
        predicted_stress: projected.stress,
        confidence,
        confidence_range: ((stress - half_width).max(0.0), (stress + half_width).min(100.0)),
        target_hour,
    })
}
