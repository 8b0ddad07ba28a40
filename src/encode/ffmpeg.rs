use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::foundation::error::{MdlError, MdlResult};

/// How `ffmpeg` turns a numbered frame sequence into one file.
#[derive(Clone, Debug)]
pub struct AssembleConfig {
    /// printf-style input pattern, e.g. `anim/spin%03d.png`.
    pub input_pattern: PathBuf,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl AssembleConfig {
    pub fn validate(&self) -> MdlResult<()> {
        if self.fps == 0 {
            return Err(MdlError::validation("animation fps must be non-zero"));
        }
        if self.input_pattern.as_os_str().is_empty() {
            return Err(MdlError::validation("frame input pattern must be non-empty"));
        }
        Ok(())
    }

    fn args(&self) -> Vec<String> {
        vec![
            if self.overwrite { "-y" } else { "-n" }.to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-framerate".to_string(),
            self.fps.to_string(),
            "-i".to_string(),
            self.input_pattern.to_string_lossy().into_owned(),
            self.out_path.to_string_lossy().into_owned(),
        ]
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> MdlResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Run the system `ffmpeg` binary over a persisted frame sequence.
pub fn assemble(cfg: &AssembleConfig) -> MdlResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(MdlError::validation(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    if !is_ffmpeg_on_path() {
        return Err(MdlError::validation(
            "ffmpeg is required to assemble animations, but was not found on PATH",
        ));
    }

    let output = Command::new("ffmpeg")
        .args(cfg.args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            MdlError::Other(anyhow::anyhow!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MdlError::Other(anyhow::anyhow!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    tracing::info!(out = %cfg.out_path.display(), "assembled animation");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
