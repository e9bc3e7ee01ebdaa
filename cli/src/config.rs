//! CLI configuration — TOML file as the base, flags and env override.

use divs_types::SimulationParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings the demo binary runs with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Where the session blob lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Simulated-backend tuning.
    #[serde(default)]
    pub simulation: SimulationParams,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./divs_data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            simulation: SimulationParams::defaults(),
        }
    }
}
