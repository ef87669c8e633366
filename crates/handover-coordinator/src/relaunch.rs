use std::process::Command;

use anyhow::{Context, Result};
use handover_core::UPDATED_SIGN;

use crate::bootstrap::UpdaterContext;

/// Updater-side exit point, called once file replacement is complete.
/// Restarts the managed executable with its original arguments plus the
/// sentinel token appended last, then fully decouples from it.
pub fn run_managed_executable(context: UpdaterContext) -> Result<()> {
    let (envelope, guard) = context.into_parts();

    // The guard must be released before the relaunch so the restarted
    // process's own upgrade check does not see a stale "upgrading" state.
    guard.release()?;

    Command::new(&envelope.managed_executable)
        .args(envelope.argument_list())
        .arg(UPDATED_SIGN)
        .spawn()
        .with_context(|| {
            format!(
                "failed to relaunch managed executable: {}",
                envelope.managed_executable.display()
            )
        })?;

    Ok(())
}
