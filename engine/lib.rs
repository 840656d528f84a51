mod engine;
mod history;
mod time_state;

pub use crate::engine::{Engine, Error, SpeedReading};
pub use crate::history::StressLog;
pub use crate::time_state::TimeState;
