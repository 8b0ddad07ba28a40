//! Two-pass resolution of animation directives (`frames`, `basename`, `vary`).
//!
//! Pass one discovers the animation shape of a scene and validates ordering and ranges; pass
//! two linearly interpolates every `vary` into a per-frame knob table. Both are pure functions
//! over the directive list; the result is an immutable [`Animation`].

use std::collections::BTreeMap;

use crate::{
    command::model::{Directive, VarySpec},
    foundation::{
        core::FrameIndex,
        error::{MdlError, MdlResult},
    },
};

/// Base name used when `frames` appears without a preceding `basename`.
pub const DEFAULT_BASENAME: &str = "default";

/// Animation parameters discovered in pass one.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AnimationState {
    pub basename: String,
    pub is_animated: bool,
    pub num_frames: u32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            basename: DEFAULT_BASENAME.to_string(),
            is_animated: false,
            num_frames: 1,
        }
    }
}

/// Resolved knob values, one map per frame.
///
/// A knob missing from a frame's map was not varied on that frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct KnobTable {
    frames: Vec<BTreeMap<String, f64>>,
}

impl KnobTable {
    fn with_frames(num_frames: u32) -> Self {
        Self {
            frames: vec![BTreeMap::new(); num_frames as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, frame: FrameIndex) -> Option<&BTreeMap<String, f64>> {
        self.frames.get(frame.0 as usize)
    }

    pub fn value(&self, frame: FrameIndex, knob: &str) -> Option<f64> {
        self.frame(frame)?.get(knob).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeMap<String, f64>> {
        self.frames.iter()
    }
}

/// Output of knob resolution: only ever built from a fully validated directive list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Animation {
    pub state: AnimationState,
    pub table: KnobTable,
}

impl Animation {
    pub fn frames(&self) -> impl Iterator<Item = FrameIndex> {
        (0..self.state.num_frames).map(FrameIndex)
    }
}

/// Run both passes. Any ordering or range violation aborts before a table is built.
#[tracing::instrument(skip_all, fields(count = directives.len()))]
pub fn resolve(directives: &[Directive]) -> MdlResult<Animation> {
    let state = discover(directives)?;
    let table = build_table(directives, state.num_frames)?;
    tracing::info!(
        basename = %state.basename,
        num_frames = state.num_frames,
        animated = state.is_animated,
        "resolved animation"
    );
    Ok(Animation { state, table })
}

/// Pass one: find `frames`/`basename` and validate every `vary` against them.
pub fn discover(directives: &[Directive]) -> MdlResult<AnimationState> {
    let mut state = AnimationState::default();
    let mut found_basename = false;
    let mut found_frames = false;

    for (index, d) in directives.iter().enumerate() {
        match d {
            Directive::Frames { count } => {
                found_frames = true;
                state.is_animated = true;
                state.num_frames = *count;
                if !found_basename {
                    tracing::info!(
                        basename = %state.basename,
                        "frames given before any basename; using default base name"
                    );
                }
            }
            Directive::Basename { name } => {
                found_basename = true;
                state.basename = name.clone();
            }
            Directive::Vary(vary) => {
                if !found_frames {
                    return Err(MdlError::ordering(format!(
                        "command #{index}: vary '{}' appears before any frames directive",
                        vary.knob
                    )));
                }
                check_vary_range(index, vary, state.num_frames)?;
            }
            _ => {}
        }
    }

    if found_basename && !found_frames {
        tracing::warn!(
            basename = %state.basename,
            "basename without frames has no effect; rendering a single still frame"
        );
    }

    Ok(state)
}

/// Pass two: interpolate every `vary` into a table of `num_frames` maps.
///
/// Later directives overwrite earlier ones on overlapping frames.
pub fn build_table(directives: &[Directive], num_frames: u32) -> MdlResult<KnobTable> {
    let mut table = KnobTable::with_frames(num_frames);

    for (index, d) in directives.iter().enumerate() {
        let Directive::Vary(vary) = d else {
            continue;
        };
        // A later `frames` may have shrunk the animation after pass one checked this range.
        check_vary_range(index, vary, num_frames)?;

        let span = (vary.end_frame - vary.start_frame) as f64;
        let increment = (vary.end_value - vary.start_value) / span;

        for f in vary.start_frame..=vary.end_frame {
            let value = if f == vary.end_frame {
                // Exact endpoint instead of the accumulated float.
                vary.end_value
            } else {
                vary.start_value + ((f - vary.start_frame) as f64) * increment
            };
            table.frames[f as usize].insert(vary.knob.clone(), value);
        }
    }

    Ok(table)
}

fn check_vary_range(index: usize, vary: &VarySpec, num_frames: u32) -> MdlResult<()> {
    let last = i64::from(num_frames) - 1;
    let in_range = |f: i64| (0..=last).contains(&f);
    if !in_range(vary.start_frame) || !in_range(vary.end_frame) {
        return Err(MdlError::range(format!(
            "command #{index}: vary '{}' frames {}..{} fall outside 0..{last}",
            vary.knob, vary.start_frame, vary.end_frame
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/knobs.rs"]
mod tests;
