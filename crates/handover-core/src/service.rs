use anyhow::Result;

/// Capability seam for the update-detection collaborator. Implementations
/// own the version comparison, download and extraction story; this mechanism
/// only asks whether an upgrade is worth starting.
pub trait UpdateService {
    fn detect_new_version(&self) -> Result<bool>;
}
