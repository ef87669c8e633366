use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use handover_coordinator::{run_managed_executable, try_resolve_update_service};
use handover_core::{UpdateService, UpgradeConfig};

/// Detection collaborator bound to the recovered configuration. The demo
/// updater never downloads anything, so it only carries the config around.
struct DemoService {
    #[allow(dead_code)]
    config: UpgradeConfig,
}

impl UpdateService for DemoService {
    fn detect_new_version(&self) -> Result<bool> {
        Ok(false)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("handover-updater: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let Some((_service, context)) = try_resolve_update_service(|config| DemoService { config })?
    else {
        // Expected when launched by hand or with a corrupted token.
        eprintln!(
            "handover-updater: no usable handoff token; launch through the managed application"
        );
        return Ok(ExitCode::from(2));
    };

    let envelope = context.envelope();
    if let Some(folder) = &envelope.config.target_folder {
        println!("replacing files under {}", folder.display());
    }

    // A real updater swaps the installation here. The demo records what it
    // received so the end-to-end tests can inspect the decoded envelope.
    if let Some(report_dir) = envelope.config.options.get("report_dir") {
        let dir = Path::new(report_dir);
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create report dir: {}", dir.display()))?;
        let payload =
            serde_json::to_string_pretty(envelope).context("failed to render envelope report")?;
        fs::write(dir.join("envelope.json"), payload).context("failed to write envelope report")?;
    }

    run_managed_executable(context)?;
    println!("managed executable relaunched");
    Ok(ExitCode::SUCCESS)
}
