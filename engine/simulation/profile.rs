use serde::{Deserialize, Serialize};

/// Traffic profile for an hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    MorningPeak,
    EveningPeak,
    Night,
    Daytime,
}

impl DayPeriod {
    /**
     * Classifies a wall-clock hour: morning peak 08:00-10:59, evening peak
     * 17:00-19:59, night 22:00-04:59 (wrapping midnight), daytime otherwise.
     */
    pub fn classify(hour: u32) -> Result<Self, metrics::Error> {
        metrics::validate_hour(hour)?;
        Ok(match hour {
            8..=10 => DayPeriod::MorningPeak,
            17..=19 => DayPeriod::EveningPeak,
            hour if hour >= 22 || hour < 5 => DayPeriod::Night,
            _ => DayPeriod::Daytime,
        })
    }

    /**
     * The multiplicative range applied to a node's free-flow speed during
     * this period. Night traffic occasionally moves faster than "normal".
     */
    pub fn speed_factor_range(&self) -> (f64, f64) {
        match self {
            DayPeriod::MorningPeak | DayPeriod::EveningPeak => (0.40, 0.60),
            DayPeriod::Night => (0.95, 1.10),
            DayPeriod::Daytime => (0.70, 0.90),
        }
    }
}
