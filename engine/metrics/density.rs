use serde::{Deserialize, Serialize};

use crate::thresholds::Thresholds;

/// Coarse bucketing of a stress score, used for map coloring and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Low,
    Medium,
    High,
}

impl Density {
    pub fn from_stress(stress: u32, thresholds: &Thresholds) -> Self {
        if stress > thresholds.density_high {
            Density::High
        } else if stress > thresholds.density_medium {
            Density::Medium
        } else {
            Density::Low
        }
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Density::Low => write!(f, "low"),
            Density::Medium => write!(f, "medium"),
            Density::High => write!(f, "high"),
        }
    }
}
