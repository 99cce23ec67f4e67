use crate::generator::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub bind: SocketAddr,
    /// How long classified sentences stay queryable.
    pub retention_secs: u64,
    /// Per-category cap on the sentence log.
    pub max_entries: usize,
    pub feed: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
            retention_secs: 300,
            max_entries: 10_000,
            feed: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(bind: SocketAddr, rate_per_sec: f64, seed: u64) -> Self {
        Self {
            bind,
            feed: GeneratorConfig {
                rate_per_sec,
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
