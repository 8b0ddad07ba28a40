use crate::{
    command::{
        model::{Directive, Op, Shape},
        symbols::SymbolTable,
    },
    foundation::{
        core::FrameIndex,
        error::{MdlError, MdlResult},
    },
    render::{
        backend::{RenderBackend, RenderSettings},
        shading::{Reflectance, Shading},
        surface::Surface,
    },
    transform::{affine, stack::TransformStack},
};

/// A `display` or `save` issued mid-frame, with the surface as it was at that point.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputRequest {
    Display(Surface),
    Save { name: String, surface: Surface },
}

/// Everything one frame produced.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub frame: FrameIndex,
    pub surface: Surface,
    /// In source order.
    pub requests: Vec<OutputRequest>,
}

/// Executes a directive list against one frame's symbol values.
///
/// Holds no per-frame state: every [`run_frame`](Self::run_frame) call starts from an identity
/// transform stack and a blank surface.
#[derive(Clone, Copy, Debug)]
pub struct Interpreter<'a> {
    directives: &'a [Directive],
    settings: &'a RenderSettings,
}

struct FrameState {
    frame: FrameIndex,
    stack: TransformStack,
    surface: Surface,
    requests: Vec<OutputRequest>,
}

impl<'a> Interpreter<'a> {
    pub fn new(directives: &'a [Directive], settings: &'a RenderSettings) -> Self {
        Self {
            directives,
            settings,
        }
    }

    #[tracing::instrument(skip_all, fields(frame = frame.0))]
    pub fn run_frame(
        &self,
        frame: FrameIndex,
        symbols: &SymbolTable,
        backend: &mut dyn RenderBackend,
    ) -> MdlResult<FrameOutput> {
        let mut state = FrameState {
            frame,
            stack: TransformStack::new(),
            surface: self.settings.new_surface(),
            requests: Vec::new(),
        };

        for (index, directive) in self.directives.iter().enumerate() {
            self.step(&mut state, index, directive, symbols, backend)?;
        }

        tracing::debug!(requests = state.requests.len(), "frame interpreted");
        Ok(FrameOutput {
            frame,
            surface: state.surface,
            requests: state.requests,
        })
    }

    fn step(
        &self,
        state: &mut FrameState,
        index: usize,
        directive: &Directive,
        symbols: &SymbolTable,
        backend: &mut dyn RenderBackend,
    ) -> MdlResult<()> {
        let at = Site {
            frame: state.frame,
            index,
            op: directive.op(),
        };

        match directive {
            // Consumed by knob resolution.
            Directive::Frames { .. } | Directive::Basename { .. } | Directive::Vary(_) => {}

            Directive::Shape {
                shape, constants, ..
            } => {
                let reflectance = self.reflectance(symbols, constants.as_deref(), at)?;
                let step = self.settings.step;
                let mut polygons = match *shape {
                    Shape::Box { corner, size } => backend.tessellate_box(corner, size)?,
                    Shape::Sphere { center, radius } => {
                        backend.tessellate_sphere(center, radius, step)?
                    }
                    Shape::Torus {
                        center,
                        minor_radius,
                        major_radius,
                    } => backend.tessellate_torus(center, minor_radius, major_radius, step)?,
                };
                polygons.transform(state.stack.top());
                let shading = Shading {
                    lighting: self.settings.lighting,
                    reflectance,
                };
                backend.draw_polygons(&polygons, &mut state.surface, &shading)?;
            }

            Directive::Line {
                constants, p0, p1, ..
            } => {
                if let Some(name) = constants.as_deref() {
                    self.reflectance(symbols, Some(name), at)?;
                }
                let mut edges = backend.tessellate_line(*p0, *p1)?;
                edges.transform(state.stack.top());
                backend.draw_lines(&edges, &mut state.surface, self.settings.line_color)?;
            }

            Directive::Move { offset, knob } => {
                let k = knob_factor(symbols, knob.as_deref(), at)?;
                state.stack.apply(affine::translate(*offset * k));
            }
            Directive::Scale { factors, knob } => {
                let k = knob_factor(symbols, knob.as_deref(), at)?;
                state.stack.apply(affine::scale(*factors * k));
            }
            Directive::Rotate {
                axis,
                degrees,
                knob,
            } => {
                let k = knob_factor(symbols, knob.as_deref(), at)?;
                state.stack.apply(affine::rotate(*axis, degrees * k));
            }

            Directive::Push => state.stack.push_copy(),
            Directive::Pop => {
                state
                    .stack
                    .pop()
                    .map_err(|_| MdlError::stack_underflow(format!("{at}: pop without push")))?;
            }

            Directive::Display => state
                .requests
                .push(OutputRequest::Display(state.surface.clone())),
            Directive::Save { name } => state.requests.push(OutputRequest::Save {
                name: name.clone(),
                surface: state.surface.clone(),
            }),
        }

        Ok(())
    }

    fn reflectance(
        &self,
        symbols: &SymbolTable,
        constants: Option<&str>,
        at: Site,
    ) -> MdlResult<Reflectance> {
        let Some(name) = constants else {
            return Ok(self.settings.reflectance);
        };
        symbols
            .constants(name)
            .copied()
            .ok_or_else(|| MdlError::lookup(format!("{at}: constants '{name}' is not defined")))
    }
}

/// Value a knob-carrying transform scales its numeric arguments by (1 without a knob).
fn knob_factor(symbols: &SymbolTable, knob: Option<&str>, at: Site) -> MdlResult<f64> {
    let Some(name) = knob else {
        return Ok(1.0);
    };
    symbols
        .knob(name)
        .ok_or_else(|| MdlError::lookup(format!("{at}: knob '{name}' is not defined")))
}

/// Where in the run an error happened.
#[derive(Clone, Copy, Debug)]
struct Site {
    frame: FrameIndex,
    index: usize,
    op: Op,
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame {}, command #{} ({})", self.frame, self.index, self.op)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interp/interpreter.rs"]
mod tests;
