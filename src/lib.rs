//! mdl-engine runs MDL scene descriptions frame by frame.
//!
//! The parser's output (a list of [`Command`]s plus a [`SymbolTable`]) is turned into pixels
//! by a pluggable [`RenderBackend`] and handed to a [`FrameSink`].
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: `Command -> Directive` (typed arguments, checked arity) via [`Scene`]
//! 2. **Resolve**: `&[Directive] -> Animation` (frame count, base name, per-frame knob table)
//! 3. **Interpret**: per frame, `Directive`s + knob values -> [`Surface`] using a fresh
//!    [`TransformStack`]
//! 4. **Output**: `display`/`save` requests and, for animations, numbered frames plus one
//!    assembled artifact
//!
//! Tessellation, rasterization and lighting are not implemented here; they live behind
//! [`RenderBackend`].
#![forbid(unsafe_code)]

mod animation;
mod command;
mod encode;
mod foundation;
mod interp;
mod render;

/// 4x4 transform helpers and the transform stack.
pub mod transform;

pub use animation::knobs::{
    Animation, AnimationState, DEFAULT_BASENAME, KnobTable, build_table, discover, resolve,
};
pub use command::model::{Arg, Axis, Command, Directive, Op, Shape, VarySpec, normalize_commands};
pub use command::scene::{Scene, SceneFile};
pub use command::symbols::{Symbol, SymbolTable};
pub use encode::ffmpeg::{AssembleConfig, assemble, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::files::{FileSink, OutputConfig, write_image};
pub use encode::sink::FrameSink;
pub use foundation::core::{Canvas, FrameIndex, Mat4, Rgb8, Vec3, frame_file_name};
pub use foundation::error::{MdlError, MdlResult};
pub use interp::interpreter::{FrameOutput, Interpreter, OutputRequest};
pub use render::backend::{EdgeList, PolygonList, RenderBackend, RenderSettings};
pub use render::pipeline::{RenderStats, RenderThreading, render_scene, run_frames};
pub use render::shading::{Lighting, PointLight, Reflectance, Shading};
pub use render::surface::Surface;
pub use transform::stack::TransformStack;
