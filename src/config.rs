use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub subject: SubjectConfig,
    pub sampling: SamplingConfig,
    pub output: OutputConfig,
}

/// What one series describes: a process (by pid or program name), a disk and an interface.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectConfig {
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub program: Option<String>,
    pub disk_device: String,
    pub network_interface: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    pub sample_interval_ms: u64,
    /// Stop collecting after this many seconds; 0 runs until a shutdown signal.
    #[serde(default)]
    pub duration_secs: u64,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// How often to log collector stats at INFO level.
    pub stats_log_interval_secs: u64,
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    /// Refuse to interpolate more than this many missing seconds.
    #[serde(default)]
    pub max_backfill_seconds: Option<u64>,
}

/// `CONFIG_FILE`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into())
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.subject.pid.is_some() != self.subject.program.is_some(),
            "exactly one of subject.pid and subject.program must be set"
        );
        if let Some(program) = &self.subject.program {
            anyhow::ensure!(
                !program.is_empty(),
                "subject.program must be non-empty"
            );
        }
        anyhow::ensure!(
            !self.subject.disk_device.is_empty(),
            "subject.disk_device must be non-empty"
        );
        anyhow::ensure!(
            !self.subject.network_interface.is_empty(),
            "subject.network_interface must be non-empty"
        );
        anyhow::ensure!(
            self.sampling.sample_interval_ms > 0,
            "sampling.sample_interval_ms must be > 0, got {}",
            self.sampling.sample_interval_ms
        );
        anyhow::ensure!(
            self.sampling.channel_capacity > 0,
            "sampling.channel_capacity must be > 0, got {}",
            self.sampling.channel_capacity
        );
        anyhow::ensure!(
            self.sampling.stats_log_interval_secs > 0,
            "sampling.stats_log_interval_secs must be > 0, got {}",
            self.sampling.stats_log_interval_secs
        );
        anyhow::ensure!(!self.output.path.is_empty(), "output.path must be non-empty");
        if let Some(limit) = self.output.max_backfill_seconds {
            anyhow::ensure!(
                limit > 0,
                "output.max_backfill_seconds must be > 0, got {}",
                limit
            );
        }
        Ok(())
    }
}
