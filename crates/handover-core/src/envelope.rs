use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::UpgradeConfig;

/// Snapshot handed from the managed process to the updater process. Crosses
/// the boundary exactly once, as an encoded command-line token; the two
/// sides never share memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandoffEnvelope {
    pub config: UpgradeConfig,
    pub managed_executable: PathBuf,
    /// Original managed arguments, program name excluded, space-joined.
    pub managed_arguments: String,
}

impl HandoffEnvelope {
    pub fn new(
        config: UpgradeConfig,
        managed_executable: PathBuf,
        arguments: &[String],
    ) -> Self {
        Self {
            config,
            managed_executable,
            managed_arguments: arguments.join(" "),
        }
    }

    /// Encodes the envelope as a printable token suitable for a single
    /// command-line argument.
    pub fn encode(&self) -> Result<String> {
        let payload = serde_json::to_vec(self).context("failed to serialize handoff envelope")?;
        Ok(STANDARD.encode(payload))
    }

    pub fn decode(token: &str) -> Result<Self> {
        let payload = STANDARD
            .decode(token)
            .context("handoff token is not valid base64")?;
        serde_json::from_slice(&payload).context("handoff token does not decode to an envelope")
    }

    /// Splits the joined argument string back into an argument vector.
    pub fn argument_list(&self) -> Vec<String> {
        self.managed_arguments
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
