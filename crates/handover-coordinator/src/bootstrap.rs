use anyhow::Result;
use handover_core::{HandoffEnvelope, UpdateService, UpgradeConfig};

use crate::guard::{GuardHandle, UpdaterGuard};

/// Everything the updater process needs for the rest of the upgrade cycle:
/// the recovered envelope and the held single-instance guard. Only a
/// successful bootstrap can construct one, and the relaunch trigger consumes
/// it, so "relaunch without bootstrap" cannot be expressed.
#[derive(Debug)]
pub struct UpdaterContext {
    envelope: HandoffEnvelope,
    guard: GuardHandle,
}

impl UpdaterContext {
    pub fn envelope(&self) -> &HandoffEnvelope {
        &self.envelope
    }

    pub(crate) fn into_parts(self) -> (HandoffEnvelope, GuardHandle) {
        (self.envelope, self.guard)
    }
}

/// Updater-side entry point. Recovers the handoff envelope from this
/// process's own first argument and builds the update service bound to the
/// recovered configuration.
///
/// Returns `Ok(None)` when the updater cannot proceed: launched without a
/// token (someone double-clicked it), with a token that fails to decode, or
/// while another updater already holds the guard. All of those are expected
/// conditions, not bugs, so they never surface as errors.
pub fn try_resolve_update_service<S, F>(build_service: F) -> Result<Option<(S, UpdaterContext)>>
where
    S: UpdateService,
    F: FnOnce(UpgradeConfig) -> S,
{
    let arguments: Vec<String> = std::env::args().skip(1).collect();
    resolve_with(&arguments, &UpdaterGuard::for_product(), build_service)
}

pub fn resolve_with<S, F>(
    arguments: &[String],
    guard: &UpdaterGuard,
    build_service: F,
) -> Result<Option<(S, UpdaterContext)>>
where
    S: UpdateService,
    F: FnOnce(UpgradeConfig) -> S,
{
    let Some(token) = arguments.first() else {
        return Ok(None);
    };
    let Ok(envelope) = HandoffEnvelope::decode(token) else {
        return Ok(None);
    };
    let Some(handle) = guard.acquire()? else {
        return Ok(None);
    };

    let service = build_service(envelope.config.clone());
    Ok(Some((
        service,
        UpdaterContext {
            envelope,
            guard: handle,
        },
    )))
}
