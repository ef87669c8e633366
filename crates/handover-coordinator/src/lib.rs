mod bootstrap;
mod guard;
mod invocation;
mod orchestrator;
mod relaunch;

pub use bootstrap::{resolve_with, try_resolve_update_service, UpdaterContext};
pub use guard::{GuardHandle, UpdaterGuard, GUARD_NAME};
pub use invocation::Invocation;
pub use orchestrator::{try_upgrade, try_upgrade_with};
pub use relaunch::run_managed_executable;
