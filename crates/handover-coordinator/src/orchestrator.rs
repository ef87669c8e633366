use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use handover_core::{
    absolutize, is_post_update_invocation, HandoffEnvelope, UpdateService, UpgradeConfig,
    UpgradeStatus,
};

use crate::guard::UpdaterGuard;
use crate::invocation::Invocation;

/// Managed-side entry point. Decides whether an upgrade should start and, if
/// so, hands off to the updater executable. On `Started` the caller must
/// exit promptly; the spawned updater owns the rest of the cycle and
/// relaunches the managed executable when it is done.
pub fn try_upgrade<S: UpdateService>(
    config: &mut UpgradeConfig,
    updater_executable: &Path,
    service: &S,
) -> Result<UpgradeStatus> {
    let invocation = Invocation::current()?;
    try_upgrade_with(
        config,
        updater_executable,
        service,
        &UpdaterGuard::for_product(),
        &invocation,
    )
}

/// Same state machine with the ambient process state made explicit. The
/// checks run in strict order; the first match wins.
pub fn try_upgrade_with<S: UpdateService>(
    config: &mut UpgradeConfig,
    updater_executable: &Path,
    service: &S,
    guard: &UpdaterGuard,
    invocation: &Invocation,
) -> Result<UpgradeStatus> {
    if !updater_executable.is_file() {
        return Err(anyhow!(
            "updater executable not found: {}",
            updater_executable.display()
        ));
    }

    if guard.is_held()? {
        return Ok(UpgradeStatus::Upgrading);
    }

    if is_post_update_invocation(&invocation.arguments) {
        return Ok(UpgradeStatus::Ended);
    }

    if !service.detect_new_version()? {
        return Ok(UpgradeStatus::NoNewVersion);
    }

    let managed_executable = absolutize(&invocation.executable)?;
    let base_dir = managed_executable.parent().ok_or_else(|| {
        anyhow!(
            "managed executable has no parent directory: {}",
            managed_executable.display()
        )
    })?;
    config.resolve_target_folder(base_dir)?;

    // The sentinel cannot be present here: the post-update check above would
    // have returned already.
    let envelope = HandoffEnvelope::new(
        config.clone(),
        managed_executable.clone(),
        &invocation.arguments,
    );
    let token = envelope.encode()?;

    // Fire and forget: the updater outlives this process and is never waited on.
    Command::new(updater_executable)
        .arg(token)
        .spawn()
        .with_context(|| {
            format!(
                "failed to spawn updater: {}",
                updater_executable.display()
            )
        })?;

    Ok(UpgradeStatus::Started)
}
