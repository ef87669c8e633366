use std::path::PathBuf;

use anyhow::{Context, Result};

/// The running process's own entry point: executable path plus the arguments
/// it was launched with, program name excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: PathBuf,
    pub arguments: Vec<String>,
}

impl Invocation {
    pub fn current() -> Result<Self> {
        let executable =
            std::env::current_exe().context("failed to resolve current executable path")?;
        let arguments = std::env::args().skip(1).collect();
        Ok(Self {
            executable,
            arguments,
        })
    }

    pub fn new(executable: impl Into<PathBuf>, arguments: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            arguments,
        }
    }
}
