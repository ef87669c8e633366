mod config;
mod envelope;
mod sentinel;
mod service;
mod status;

pub use config::{absolutize, UpgradeConfig};
pub use envelope::HandoffEnvelope;
pub use sentinel::{is_post_update_invocation, UPDATED_SIGN};
pub use service::UpdateService;
pub use status::UpgradeStatus;

#[cfg(test)]
mod tests;
