use std::net::SocketAddr;

use anyhow::{Context, Result};
use game_core::Params;

pub const DETECTOR_VAR: &str = "SNAKE_DETECTOR";
pub const TELEMETRY_ADDR_VAR: &str = "SNAKE_TELEMETRY_ADDR";
pub const SNAPSHOT_ADDR_VAR: &str = "SNAKE_SNAPSHOT_ADDR";

/// Process-level settings, read from the environment at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Command line of the hand-landmark detector (keyboard only if unset)
    pub detector: Option<String>,
    pub telemetry_addr: SocketAddr,
    /// Where to publish per-frame snapshots, if anywhere
    pub snapshot_addr: Option<SocketAddr>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let telemetry_addr = read(TELEMETRY_ADDR_VAR)
            .unwrap_or_else(|| Params::TELEMETRY_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{TELEMETRY_ADDR_VAR} is not a socket address"))?;

        let snapshot_addr = read(SNAPSHOT_ADDR_VAR)
            .map(|v| v.parse::<SocketAddr>())
            .transpose()
            .with_context(|| format!("{SNAPSHOT_ADDR_VAR} is not a socket address"))?;

        Ok(Self {
            detector: read(DETECTOR_VAR),
            telemetry_addr,
            snapshot_addr,
        })
    }
}
