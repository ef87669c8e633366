use anyhow::{anyhow, Result};

/// Outcome of an upgrade attempt on the managed side. These are normal
/// control-flow results the caller branches on, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeStatus {
    /// An updater for this product is already active.
    Upgrading,
    /// This invocation is itself the post-update relaunch.
    Ended,
    /// The detection collaborator found nothing newer.
    NoNewVersion,
    /// An updater process was spawned; the caller must exit promptly.
    Started,
}

impl UpgradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upgrading => "upgrading",
            Self::Ended => "ended",
            Self::NoNewVersion => "no-new-version",
            Self::Started => "started",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "upgrading" => Ok(Self::Upgrading),
            "ended" => Ok(Self::Ended),
            "no-new-version" => Ok(Self::NoNewVersion),
            "started" => Ok(Self::Started),
            _ => Err(anyhow!("invalid upgrade status: {value}")),
        }
    }

    /// The managed executable is obligated to terminate on `Started` so the
    /// updater can replace its files.
    pub fn requires_exit(&self) -> bool {
        matches!(self, Self::Started)
    }
}
