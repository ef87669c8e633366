use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

/// Configuration handed to the update-detection collaborator. Captured into
/// the handoff envelope once resolved and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpgradeConfig {
    /// Installation folder the updater replaces files in. Defaults to the
    /// managed executable's own directory when unset.
    #[serde(default)]
    pub target_folder: Option<PathBuf>,
    /// Where the detection collaborator looks for new versions.
    #[serde(default)]
    pub package_source: Option<String>,
    /// Collaborator-specific settings this mechanism treats as opaque.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl UpgradeConfig {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse upgrade config")?;
        if let Some(source) = &config.package_source {
            if source.trim().is_empty() {
                return Err(anyhow!("package_source must not be empty when set"));
            }
        }
        for key in config.options.keys() {
            if key.trim().is_empty() {
                return Err(anyhow!("option keys must not be empty"));
            }
        }
        Ok(config)
    }

    /// Pins `target_folder` to an absolute, normalized path, substituting
    /// `fallback` when the folder is unset or empty.
    pub fn resolve_target_folder(&mut self, fallback: &Path) -> anyhow::Result<()> {
        let resolved = match &self.target_folder {
            None => fallback.to_path_buf(),
            Some(folder) if folder.as_os_str().is_empty() => fallback.to_path_buf(),
            Some(folder) => absolutize(folder)?,
        };
        self.target_folder = Some(resolved);
        Ok(())
    }
}

/// Lexically absolutizes a path against the current directory. The path does
/// not have to exist yet, so this never touches the filesystem beyond the
/// current-directory lookup.
pub fn absolutize(path: &Path) -> anyhow::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to resolve current directory")?
            .join(path)
    };
    Ok(normalize_components(&joined))
}

fn normalize_components(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
