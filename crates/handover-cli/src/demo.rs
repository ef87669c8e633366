use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use handover_coordinator::try_upgrade;
use handover_core::{UpdateService, UpgradeConfig, UpgradeStatus};

/// Set to "1" to make the demo's version probe report an available update.
const NEW_VERSION_ENV: &str = "HANDOVER_DEMO_NEW_VERSION";

#[derive(Parser, Debug)]
#[command(name = "handover-demo")]
#[command(about = "Sample managed application exercising the upgrade handoff", long_about = None)]
struct Cli {
    /// Path to the updater executable.
    #[arg(long)]
    updater: PathBuf,
    /// Upgrade config file (TOML). Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    target_folder: Option<PathBuf>,
    /// Directory the demo chain writes its observations into.
    #[arg(long)]
    report_dir: Option<PathBuf>,
    /// Ordinary application arguments, including the relaunch sentinel.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    passthrough: Vec<String>,
}

struct EnvProbeService;

impl UpdateService for EnvProbeService {
    fn detect_new_version(&self) -> Result<bool> {
        Ok(std::env::var(NEW_VERSION_ENV).as_deref() == Ok("1"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            UpgradeConfig::from_toml_str(&raw)?
        }
        None => UpgradeConfig::default(),
    };
    if cli.target_folder.is_some() {
        config.target_folder = cli.target_folder.clone();
    }
    if let Some(dir) = &cli.report_dir {
        config
            .options
            .insert("report_dir".to_string(), dir.display().to_string());
    }

    let status = try_upgrade(&mut config, &cli.updater, &EnvProbeService)?;
    match status {
        UpgradeStatus::Started => {
            // Contract: the managed process must get out of the updater's way.
            println!("upgrade started; exiting so the updater can replace files");
            return Ok(());
        }
        UpgradeStatus::Upgrading => {
            println!("an updater is already running; continuing without upgrading");
        }
        UpgradeStatus::Ended => {
            println!("restarted after a completed update");
            if let Some(dir) = &cli.report_dir {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create report dir: {}", dir.display()))?;
                let argv: Vec<String> = std::env::args().skip(1).collect();
                fs::write(dir.join("relaunched.txt"), argv.join(" "))
                    .context("failed to write relaunch report")?;
            }
        }
        UpgradeStatus::NoNewVersion => {
            println!("no new version available");
        }
    }

    println!("demo application running");
    Ok(())
}
