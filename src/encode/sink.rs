use crate::{
    foundation::{
        core::{FrameIndex, frame_file_name},
        error::MdlResult,
    },
    render::surface::Surface,
};

/// Presentation and persistence collaborator fed by the frame orchestrator.
pub trait FrameSink {
    /// Show the surface (e.g. on screen).
    fn present(&mut self, surface: &Surface) -> MdlResult<()>;

    /// Store the surface under `name` (a path for file-based sinks).
    fn persist(&mut self, surface: &Surface, name: &str) -> MdlResult<()>;

    /// Combine every persisted frame of `basename` into one animation artifact.
    fn assemble_animation(&mut self, basename: &str) -> MdlResult<()>;

    /// Name an animation frame is persisted under.
    fn frame_name(&self, basename: &str, frame: FrameIndex) -> String {
        frame_file_name(basename, frame, "png")
    }
}
