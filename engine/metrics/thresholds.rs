use serde::{Deserialize, Serialize};

use crate::stress::Error;

/**
 * The canonical stress thresholds, shared by every component that buckets a
 * stress score. Keeping them in one place guarantees that density, cascade
 * detection, and forecasting agree on what "congested" means.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// stress above which a node's density is high
    pub density_high: u32,
    /// stress above which a node's density is medium
    pub density_medium: u32,
    /// upstream stress required to open a cascade candidate
    pub cascade_trigger: u32,
    /// downstream stress indicating congestion is already spreading
    pub cascade_spread: u32,
    /// combined score above which an alert is critical
    pub severity_critical: u32,
    /// combined score above which an alert is high
    pub severity_high: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            density_high: 70,
            density_medium: 40,
            cascade_trigger: 70,
            cascade_spread: 50,
            severity_critical: 85,
            severity_high: 70,
        }
    }
}

impl Thresholds {
    /**
     * Checks that the threshold set is monotonic. A non-monotonic set would
     * let a higher stress value land in a lower bucket.
     */
    pub fn validate(&self) -> Result<(), Error> {
        if self.density_high <= self.density_medium {
            return Err(Error::InvalidThresholds(format!(
                "density_high ({}) must exceed density_medium ({})",
                self.density_high, self.density_medium
            )));
        }
        if self.severity_critical <= self.severity_high {
            return Err(Error::InvalidThresholds(format!(
                "severity_critical ({}) must exceed severity_high ({})",
                self.severity_critical, self.severity_high
            )));
        }
        if self.cascade_trigger <= self.cascade_spread {
            return Err(Error::InvalidThresholds(format!(
                "cascade_trigger ({}) must exceed cascade_spread ({})",
                self.cascade_trigger, self.cascade_spread
            )));
        }
        for threshold in [
            self.density_high,
            self.density_medium,
            self.cascade_trigger,
            self.cascade_spread,
            self.severity_critical,
            self.severity_high,
        ] {
            if threshold > 100 {
                return Err(Error::InvalidThresholds(format!(
                    "threshold {} is outside the stress scale",
                    threshold
                )));
            }
        }
        Ok(())
    }
}
