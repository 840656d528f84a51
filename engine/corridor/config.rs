#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error parsing TOML: {0}")]
    TomlParsingError(#[from] toml::de::Error),
    #[error("Error serializing TOML: {0}")]
    TomlSerializingError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Metrics error: {0}")]
    MetricsError(#[from] metrics::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /** Number of past stress values retained per node for trend display. */
    pub history_capacity: usize,
    /** Seconds between telemetry refreshes from the external poller. */
    pub poll_interval: u64,
    /** Number of long-run stress log slots per day. Must divide a day evenly. */
    pub snapshots_per_day: usize,
    /** Stress thresholds shared by density, cascade, and forecast bucketing. */
    pub thresholds: metrics::Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_capacity: 20,
            poll_interval: 300,
            snapshots_per_day: 24,
            thresholds: metrics::Thresholds::default(),
        }
    }
}

impl Config {
    pub fn load(data: &str) -> Result<Self, Error> {
        return Ok(toml::from_str(data)?);
    }

    pub fn load_file(path: &std::path::Path) -> Result<Self, Error> {
        return Ok(Self::load(&std::fs::read_to_string(path)?)?);
    }

    pub fn dump(&self) -> Result<String, Error> {
        return Ok(toml::to_string(self)?);
    }

    pub fn dump_file(&self, path: &std::path::Path) -> Result<(), Error> {
        return Ok(std::fs::write(path, self.dump()?)?);
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.thresholds.validate()?;
        if self.history_capacity == 0 {
            return Err(Error::InvalidConfig(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if self.snapshots_per_day == 0 || 86400 % self.snapshots_per_day != 0 {
            return Err(Error::InvalidConfig(format!(
                "snapshots_per_day ({}) must divide a day evenly",
                self.snapshots_per_day
            )));
        }
        if self.poll_interval == 0 {
            return Err(Error::InvalidConfig(
                "poll_interval must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}
