mod density;
mod stress;
mod thresholds;

pub use crate::density::Density;
pub use crate::stress::{stress_score, validate_hour, Error, AMPLIFICATION};
pub use crate::thresholds::Thresholds;
