mod config;
mod corridor;
mod node;

pub use crate::config::{Config, Error as ConfigError};
pub use crate::corridor::{Corridor, Error};
pub use crate::node::{NodeData, StressHistory, TrafficNode};
