use serde::{Deserialize, Serialize};

use metrics::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    pub(crate) fn from_score(score: u32, thresholds: &Thresholds) -> Self {
        if score > thresholds.severity_critical {
            Severity::Critical
        } else if score > thresholds.severity_high {
            Severity::High
        } else {
            Severity::Medium
        }
    }

    /**
     * Coarse ETA band until the downstream node locks up. Not a precise
     * estimate; the dashboard shows it verbatim.
     */
    pub fn time_to_collapse(&self) -> &'static str {
        match self {
            Severity::Critical => "8-12 min",
            Severity::High | Severity::Medium => "15-25 min",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/**
 * A propagating-congestion warning for one adjacent node pair. Recomputed
 * fresh on every detection pass; the id is stable for the same pair so the
 * consuming UI can deduplicate across cycles.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeAlert {
    pub id: String,
    pub upstream: String,
    pub downstream: String,
    /// combined severity of the pair, 0-100
    pub score: u32,
    pub severity: Severity,
    pub time_to_collapse: String,
    /// 0-100, rises with score but capped below certainty
    pub confidence: f64,
}
