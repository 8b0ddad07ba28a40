use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    encode::{
        ffmpeg::{self, AssembleConfig},
        sink::FrameSink,
    },
    foundation::{
        core::{FrameIndex, frame_file_name},
        error::{MdlError, MdlResult},
    },
    render::surface::Surface,
};

/// Where and how [`FileSink`] writes its output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for numbered animation frames.
    pub anim_dir: PathBuf,
    /// Image format extension of animation frames.
    pub frame_ext: String,
    /// Extension of the assembled animation (`<basename>.<ext>`).
    pub animation_ext: String,
    /// Directory for the assembled animation.
    pub out_dir: PathBuf,
    pub fps: u32,
    pub overwrite: bool,
    /// File `display` writes to; there is no window to show frames in.
    pub preview_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            anim_dir: PathBuf::from("anim"),
            frame_ext: "png".to_string(),
            animation_ext: "gif".to_string(),
            out_dir: PathBuf::from("."),
            fps: 30,
            overwrite: true,
            preview_path: PathBuf::from("display.png"),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> MdlResult<()> {
        if self.frame_ext.trim().is_empty() || self.animation_ext.trim().is_empty() {
            return Err(MdlError::validation("output extensions must be non-empty"));
        }
        if self.fps == 0 {
            return Err(MdlError::validation("output fps must be non-zero"));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> MdlResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| MdlError::serde(format!("parse output config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn animation_path(&self, basename: &str) -> PathBuf {
        self.out_dir
            .join(format!("{basename}.{}", self.animation_ext))
    }
}

/// Writes surfaces as image files and assembles animations with the system `ffmpeg`.
#[derive(Clone, Debug)]
pub struct FileSink {
    cfg: OutputConfig,
}

impl FileSink {
    pub fn new(cfg: OutputConfig) -> MdlResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &OutputConfig {
        &self.cfg
    }
}

impl FrameSink for FileSink {
    fn present(&mut self, surface: &Surface) -> MdlResult<()> {
        write_image(surface, &self.cfg.preview_path)?;
        tracing::info!(path = %self.cfg.preview_path.display(), "display written");
        Ok(())
    }

    fn persist(&mut self, surface: &Surface, name: &str) -> MdlResult<()> {
        write_image(surface, Path::new(name))
    }

    fn assemble_animation(&mut self, basename: &str) -> MdlResult<()> {
        let cfg = AssembleConfig {
            input_pattern: self
                .cfg
                .anim_dir
                .join(format!("{basename}%03d.{}", self.cfg.frame_ext)),
            fps: self.cfg.fps,
            out_path: self.cfg.animation_path(basename),
            overwrite: self.cfg.overwrite,
        };
        ffmpeg::assemble(&cfg)
    }

    fn frame_name(&self, basename: &str, frame: FrameIndex) -> String {
        self.cfg
            .anim_dir
            .join(frame_file_name(basename, frame, &self.cfg.frame_ext))
            .to_string_lossy()
            .into_owned()
    }
}

/// Encode a surface; the format follows the path's extension.
pub fn write_image(surface: &Surface, path: &Path) -> MdlResult<()> {
    ffmpeg::ensure_parent_dir(path)?;
    image::save_buffer(
        path,
        &surface.to_rgb8_bytes(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}
