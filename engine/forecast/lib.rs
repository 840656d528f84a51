mod projector;

pub use crate::projector::{forecast, Error, ForecastEntry, Outlook};
