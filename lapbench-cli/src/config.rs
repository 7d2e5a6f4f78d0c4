//! Configuration loading from lapbench.toml
//!
//! LapBench configuration can be specified in a `lapbench.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory. Every field is optional; CLI flags and `LAPBENCH_LAPS` take
//! precedence over the file.

use anyhow::Context;
use lapbench_core::{Clock, LapCount, MonotonicClock, SystemClock};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Name of the configuration file looked up by [`LapConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "lapbench.toml";

/// LapBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LapConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Clock the lap timers read
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ClockKind {
    /// `std::time::Instant`, never goes backwards (default)
    #[default]
    Monotonic,
    /// Wall clock; backwards jumps are clamped to zero-length laps
    System,
}

impl ClockKind {
    /// Build the clock
    pub fn clock(self) -> Arc<dyn Clock> {
        match self {
            ClockKind::Monotonic => Arc::new(MonotonicClock::new()),
            ClockKind::System => Arc::new(SystemClock),
        }
    }

    /// Name used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            ClockKind::Monotonic => "monotonic",
            ClockKind::System => "system",
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Laps per test; non-positive values fall back to the default
    #[serde(default)]
    pub laps: Option<i64>,
    /// Clock: "monotonic" or "system"
    #[serde(default)]
    pub clock: ClockKind,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Show the baseline comparison chart in human output
    #[serde(default = "default_show_baselines")]
    pub show_baselines: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_baselines: default_show_baselines(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_show_baselines() -> bool {
    true
}

impl LapConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the current directory.
    ///
    /// A file that exists but cannot be loaded is reported and ignored.
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for [`CONFIG_FILE_NAME`]
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!("ignoring configuration: {:#}", e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Resolve the lap count from the first external value present.
    ///
    /// `cli_value` is the `--laps` flag (or `LAPBENCH_LAPS`), which wins
    /// over `[runner] laps`. Whichever source is used, an invalid value
    /// resolves to [`LapCount::DEFAULT`].
    pub fn resolve_laps(&self, cli_value: Option<&str>) -> LapCount {
        match cli_value {
            Some(raw) => LapCount::resolve(Some(raw)),
            None => LapCount::resolve_int(self.runner.laps),
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# LapBench Configuration

[runner]
# Laps per test (uncomment to override the default of 10)
# laps = 10
# Clock: "monotonic" or "system"
clock = "monotonic"

[output]
# Default output format: human, json, csv
format = "human"
# Show the baseline comparison chart in human output
show_baselines = true
"#
        .to_string()
    }
}
