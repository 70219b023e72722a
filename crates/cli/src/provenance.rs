use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sidecar describing an animation's frame directory.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub directory_type: &'static str,
    pub software_version: &'static str,
    pub code_rev: String,
    pub polytwister: String,
    pub max_w: f64,
    pub scale: f64,
    pub file_names: Vec<String>,
    pub params: serde_json::Value,
}

impl Manifest {
    pub fn sections(
        polytwister: &str,
        max_w: f64,
        scale: f64,
        file_names: Vec<String>,
        params: serde_json::Value,
    ) -> Self {
        Self {
            directory_type: "sections",
            software_version: polytwister::VERSION,
            code_rev: current_git_rev(),
            polytwister: polytwister.to_string(),
            max_w,
            scale,
            file_names,
            params,
        }
    }
}

/// Write `<dir>/manifest.json`, creating `dir` if needed.
pub fn write_manifest<P: AsRef<Path>>(dir: P, manifest: &Manifest) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("manifest.json");
    fs::write(&path, serde_json::to_vec_pretty(manifest)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
