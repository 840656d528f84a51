use chrono::Timelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeState {
    /// seconds elapsed since the monitor came up
    pub current_time: u64,
    /// seconds between telemetry refreshes from the external poller
    pub poll_interval: u64,
    /// seconds since the epoch at which the monitor came up, supplied by the
    /// caller so that the engine never reads a clock itself
    pub monitor_start_time: u64,
}

impl TimeState {
    pub fn new(monitor_start_time: u64, poll_interval: u64) -> Self {
        Self {
            current_time: 0,
            poll_interval,
            monitor_start_time,
        }
    }

    /// seconds since the epoch for the current monitor time
    pub fn wall_time(&self) -> u64 {
        self.monitor_start_time + self.current_time
    }

    pub fn current_date_time(&self) -> chrono::NaiveDateTime {
        chrono::NaiveDateTime::from_timestamp_opt(self.wall_time() as i64, 0)
            .expect("wall time out of range")
    }

    /// wall-clock hour of day, 0-23, for the simulation and forecast paths
    pub fn current_hour(&self) -> u32 {
        self.current_date_time().hour()
    }

    pub fn pretty_current_date_time(&self) -> String {
        self.current_date_time()
            .format("%a, %b %d, %Y %l:%M %P")
            .to_string()
    }

    pub fn advance(&mut self, delta: u64) {
        self.current_time += delta;
    }
}

#[cfg(test)]
mod tests {
    use crate::time_state::TimeState;

    #[test]
    fn hour_tracks_wall_clock() {
        // midnight at the epoch
        let mut time_state = TimeState::new(0, 300);
        assert_eq!(time_state.current_hour(), 0);

        time_state.advance(8 * 3600 + 1800);
        assert_eq!(time_state.current_hour(), 8);

        time_state.advance(24 * 3600);
        assert_eq!(time_state.current_hour(), 8);
    }
}
