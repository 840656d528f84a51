// amplification applied to the fractional speed drop before converting it to
// a 0-100 percentage
pub const AMPLIFICATION: f64 = 1.5;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid speed: {0}")]
    InvalidSpeed(f64),
    #[error("Normal speed must be positive")]
    ZeroNormalSpeed,
    #[error("Invalid hour of day: {0}")]
    InvalidHour(u32),
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),
}

/**
 * Maps a (current speed, free-flow speed) pair to a stress score in [0, 100].
 *
 * Speeds are in km/h. Moving at or above free flow scores 0; a full stop
 * saturates the scale. Pure and idempotent, so the live and simulated paths
 * can share it.
 */
pub fn stress_score(current_speed: f64, normal_speed: f64) -> Result<u32, Error> {
    if !current_speed.is_finite() || current_speed < 0.0 {
        return Err(Error::InvalidSpeed(current_speed));
    }
    if !normal_speed.is_finite() || normal_speed < 0.0 {
        return Err(Error::InvalidSpeed(normal_speed));
    }
    if normal_speed == 0.0 {
        return Err(Error::ZeroNormalSpeed);
    }

    if current_speed >= normal_speed {
        return Ok(0);
    }

    let speed_drop = (normal_speed - current_speed) / normal_speed;
    let percent = (speed_drop * AMPLIFICATION * 100.0).clamp(0.0, 100.0);
    Ok(percent.round() as u32)
}

pub fn validate_hour(hour: u32) -> Result<(), Error> {
    if hour > 23 {
        return Err(Error::InvalidHour(hour));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::stress::*;

    #[test]
    fn free_flow_is_zero() {
        assert_eq!(stress_score(50.0, 50.0).unwrap(), 0);
        assert_eq!(stress_score(80.0, 50.0).unwrap(), 0);
    }

    #[test]
    fn total_stop_saturates() {
        // drop fraction 1.0 * 1.5 = 150%, clamped
        assert_eq!(stress_score(0.0, 50.0).unwrap(), 100);
    }

    #[test]
    fn half_drop_amplified() {
        // 50% drop * 1.5 = 75%
        assert_eq!(stress_score(25.0, 50.0).unwrap(), 75);
    }

    #[test]
    fn bounded() {
        for speed in 0..=120 {
            let stress = stress_score(speed as f64, 60.0).unwrap();
            assert!(stress <= 100);
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            stress_score(-1.0, 50.0).unwrap_err(),
            Error::InvalidSpeed(-1.0)
        );
        assert_eq!(stress_score(10.0, 0.0).unwrap_err(), Error::ZeroNormalSpeed);
        assert!(matches!(
            stress_score(f64::NAN, 50.0).unwrap_err(),
            Error::InvalidSpeed(_)
        ));
        assert!(matches!(
            stress_score(10.0, f64::INFINITY).unwrap_err(),
            Error::InvalidSpeed(_)
        ));
    }

    #[test]
    fn hour_range() {
        assert!(validate_hour(0).is_ok());
        assert!(validate_hour(23).is_ok());
        assert_eq!(validate_hour(24).unwrap_err(), Error::InvalidHour(24));
    }
}
