use serde::{Deserialize, Serialize};

use cascade::CascadeAlert;
use corridor::{Config, Corridor, NodeData};
use forecast::ForecastEntry;

use crate::history::StressLog;
use crate::time_state::TimeState;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] corridor::ConfigError),
    #[error("Corridor error: {0}")]
    CorridorError(#[from] corridor::Error),
    #[error("Simulation error: {0}")]
    SimulationError(#[from] simulation::Error),
    #[error("Forecast error: {0}")]
    ForecastError(#[from] forecast::Error),
    #[error("Unknown node: {0}")]
    UnknownNode(u64),
}

/// One telemetry observation from the external poller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedReading {
    pub node_id: u64,
    /// observed speed, km/h
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    pub corridor: Corridor,
    pub time_state: TimeState,
    pub stress_log: StressLog,
}

impl Engine {
    /**
     * Builds a monitor over an empty corridor. The caller supplies the start
     * time (seconds since the epoch); the engine never reads a clock itself,
     * which keeps every computation a function of its inputs.
     *
     * Fails on an invalid config.
     */
    pub fn new(config: Config, start_time: u64) -> Result<Self, Error> {
        config.validate()?;
        let time_state = TimeState::new(start_time, config.poll_interval);
        let stress_log = StressLog::new(config.snapshots_per_day);
        Ok(Self {
            corridor: Corridor::new(config),
            time_state,
            stress_log,
        })
    }

    pub fn load(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load_file(path: &std::path::Path) -> Result<Self, Error> {
        Ok(Self::load(&std::fs::read_to_string(path)?)?)
    }

    pub fn dump(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn dump_file(&self, path: &std::path::Path) -> Result<(), Error> {
        Ok(std::fs::write(path, self.dump()?)?)
    }

    pub fn add_node(&mut self, data: NodeData) -> u64 {
        self.corridor.add_node(data)
    }

    /**
     * Applies a batch of telemetry readings. A reading that fails validation
     * is reported and skipped; the rest of the batch still lands, so one bad
     * sensor never takes down a whole poll cycle.
     */
    pub fn apply_telemetry(&mut self, readings: &[SpeedReading]) -> Vec<(u64, Error)> {
        let mut failures = Vec::new();
        for reading in readings {
            if let Err(err) = self.corridor.apply_speed(reading.node_id, reading.speed) {
                failures.push((reading.node_id, err.into()));
            }
        }
        failures
    }

    /**
     * Simulation fallback for nodes with no live telemetry this cycle. The
     * simulated speed goes through the same write path as a real reading, so
     * the stress formula cannot diverge between the two.
     */
    pub fn simulate_missing<R: rand::Rng>(
        &mut self,
        node_ids: &[u64],
        rng: &mut R,
    ) -> Result<(), Error> {
        let hour = self.time_state.current_hour();
        for &id in node_ids {
            let normal_speed = self
                .corridor
                .get_node(id)
                .ok_or(Error::UnknownNode(id))?
                .data
                .normal_speed;
            let simulated = simulation::simulate(
                normal_speed,
                hour,
                &self.corridor.config.thresholds,
                rng,
            )?;
            self.corridor.apply_speed(id, simulated.speed)?;
        }
        Ok(())
    }

    pub fn cascade_alerts(&self) -> Vec<CascadeAlert> {
        cascade::detect_cascades(
            &self.corridor.nodes_in_order(),
            &self.corridor.config.thresholds,
        )
    }

    pub fn forecast_node<R: rand::Rng>(
        &self,
        id: u64,
        offset_minutes: u32,
        rng: &mut R,
    ) -> Result<ForecastEntry, Error> {
        let node = self.corridor.get_node(id).ok_or(Error::UnknownNode(id))?;
        Ok(forecast::forecast(
            node.data.normal_speed,
            offset_minutes,
            self.time_state.current_hour(),
            &self.corridor.config.thresholds,
            rng,
        )?)
    }

    /**
     * Advances the monitor clock, folding the corridor's stress into the
     * long-run log at each slot boundary crossed.
     */
    pub fn advance(&mut self, delta: u64) {
        let period = self.stress_log.slot_period();
        let start = self.time_state.wall_time();
        let end = start + delta;

        let mut next = (start / period + 1) * period;
        while next <= end {
            self.stress_log.record(&self.corridor, next);
            next += period;
        }

        self.time_state.advance(delta);
    }

    /**
     * Advances by one poll interval. Convenience for the common poller loop.
     */
    pub fn advance_cycle(&mut self) {
        self.advance(self.time_state.poll_interval);
    }

    /// interpolated long-run expectation for a node at a wall time
    pub fn expected_stress(&self, id: u64, wall_time: u64) -> f64 {
        self.stress_log.expected_stress(id, wall_time)
    }
}
