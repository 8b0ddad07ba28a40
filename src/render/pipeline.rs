use rayon::prelude::*;

use crate::{
    animation::knobs::{self, Animation, AnimationState},
    command::{scene::Scene, symbols::SymbolTable},
    encode::sink::FrameSink,
    foundation::{
        core::FrameIndex,
        error::{MdlError, MdlResult},
    },
    interp::interpreter::{FrameOutput, Interpreter, OutputRequest},
    render::backend::{RenderBackend, RenderSettings},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_persisted: u64,
    pub requests_forwarded: u64,
}

/// Resolve knobs, then render every frame of `scene` into `sink`.
///
/// Resolution errors surface before any frame is interpreted.
pub fn render_scene(
    scene: &mut Scene,
    settings: &RenderSettings,
    threading: &RenderThreading,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> MdlResult<(Animation, RenderStats)> {
    let animation = knobs::resolve(&scene.directives)?;
    let stats = run_frames(scene, &animation, settings, threading, backend, sink)?;
    Ok((animation, stats))
}

/// Interpret the scene once per frame, in frame order.
///
/// Before each frame the frame's resolved knobs are written into `scene.symbols`; knobs not
/// varied on that frame keep their previous value. When the scene is animated every frame is
/// persisted under [`FrameSink::frame_name`] and assembled at the end.
#[tracing::instrument(skip_all, fields(basename = %animation.state.basename, frames = animation.state.num_frames))]
pub fn run_frames(
    scene: &mut Scene,
    animation: &Animation,
    settings: &RenderSettings,
    threading: &RenderThreading,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> MdlResult<RenderStats> {
    settings.validate()?;
    let state = &animation.state;
    if animation.table.len() != state.num_frames as usize {
        return Err(MdlError::validation(format!(
            "knob table has {} frames, animation declares {}",
            animation.table.len(),
            state.num_frames
        )));
    }

    let interp = Interpreter::new(&scene.directives, settings);
    let mut stats = RenderStats::default();

    if !threading.parallel {
        for frame in animation.frames() {
            merge_knobs(&mut scene.symbols, animation, frame)?;
            let out = interp.run_frame(frame, &scene.symbols, backend)?;
            flush_frame(out, state, sink, &mut stats)?;
        }
    } else {
        if backend.fork_worker().is_none() {
            return Err(MdlError::validation(
                "parallel render requires a backend that supports worker forking",
            ));
        }
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = u32::try_from(threading.chunk_size.max(1)).unwrap_or(u32::MAX);
        let shared: &dyn RenderBackend = &*backend;

        let mut chunk_start = 0u32;
        while chunk_start < state.num_frames {
            let chunk_end = chunk_start.saturating_add(chunk_size).min(state.num_frames);

            // Carry-over between frames is order dependent, so snapshots are taken sequentially.
            let mut snapshots = Vec::with_capacity((chunk_end - chunk_start) as usize);
            for f in chunk_start..chunk_end {
                let frame = FrameIndex(f);
                merge_knobs(&mut scene.symbols, animation, frame)?;
                snapshots.push((frame, scene.symbols.clone()));
            }

            let rendered = pool.install(|| {
                snapshots
                    .par_iter()
                    .map_init(
                        || shared.fork_worker(),
                        |worker, (frame, symbols)| -> MdlResult<FrameOutput> {
                            let worker = worker.as_mut().ok_or_else(|| {
                                MdlError::validation("backend stopped forking render workers")
                            })?;
                            interp.run_frame(*frame, symbols, &mut **worker)
                        },
                    )
                    .collect::<Vec<_>>()
            });

            for out in rendered {
                flush_frame(out?, state, sink, &mut stats)?;
            }
            chunk_start = chunk_end;
        }
    }

    if state.is_animated {
        sink.assemble_animation(&state.basename)?;
    }

    tracing::info!(
        frames = stats.frames_total,
        persisted = stats.frames_persisted,
        requests = stats.requests_forwarded,
        "render finished"
    );
    Ok(stats)
}

fn merge_knobs(
    symbols: &mut SymbolTable,
    animation: &Animation,
    frame: FrameIndex,
) -> MdlResult<()> {
    let values = animation
        .table
        .frame(frame)
        .ok_or_else(|| MdlError::range(format!("frame {frame} has no knob table entry")))?;
    symbols.merge_frame(values)
}

/// Forward a frame's requests and, if animated, persist it. The surface is dropped afterwards.
fn flush_frame(
    out: FrameOutput,
    state: &AnimationState,
    sink: &mut dyn FrameSink,
    stats: &mut RenderStats,
) -> MdlResult<()> {
    for request in out.requests {
        match request {
            OutputRequest::Display(surface) => sink.present(&surface)?,
            OutputRequest::Save { name, surface } => sink.persist(&surface, &name)?,
        }
        stats.requests_forwarded += 1;
    }

    if state.is_animated {
        let name = sink.frame_name(&state.basename, out.frame);
        tracing::debug!(frame = out.frame.0, %name, "persisting frame");
        sink.persist(&out.surface, &name)?;
        stats.frames_persisted += 1;
    }

    stats.frames_total += 1;
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> MdlResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MdlError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MdlError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
