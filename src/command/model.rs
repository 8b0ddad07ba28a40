use crate::foundation::{
    core::Vec3,
    error::{MdlError, MdlResult},
};

/// Operation named by a raw command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Frames,
    Basename,
    Vary,
    Box,
    Sphere,
    Torus,
    Line,
    Move,
    Scale,
    Rotate,
    Push,
    Pop,
    Display,
    Save,
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Self::Frames => "frames",
            Self::Basename => "basename",
            Self::Vary => "vary",
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::Line => "line",
            Self::Move => "move",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Display => "display",
            Self::Save => "save",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One argument slot of a raw command.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Num(f64),
    Str(String),
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// A command as handed over by the parser, before normalization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Command {
    pub op: Op,
    #[serde(default)]
    pub args: Vec<Arg>,
    #[serde(default)]
    pub knob: Option<String>,
}

impl Command {
    pub fn new(op: Op, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            op,
            args: args.into_iter().collect(),
            knob: None,
        }
    }

    pub fn with_knob(mut self, knob: impl Into<String>) -> Self {
        self.knob = Some(knob.into());
        self
    }

    /// Resolve the argument list into a strongly typed [`Directive`].
    ///
    /// `index` is the command's position in the source list and only feeds error messages.
    pub fn normalize(&self, index: usize) -> MdlResult<Directive> {
        let mut args = ArgCursor {
            args: &self.args,
            pos: 0,
            op: self.op,
            index,
        };

        if self.knob.is_some()
            && !matches!(self.op, Op::Vary | Op::Move | Op::Scale | Op::Rotate)
        {
            return Err(args.error("knob is only accepted on vary/move/scale/rotate"));
        }

        let directive = match self.op {
            Op::Frames => {
                let count = args.num()?;
                if count.fract() != 0.0 || count < 1.0 || count > f64::from(u32::MAX) {
                    return Err(args.error(format!("frame count must be an integer >= 1, got {count}")));
                }
                Directive::Frames {
                    count: count as u32,
                }
            }
            Op::Basename => Directive::Basename { name: args.str()? },
            Op::Vary => {
                let knob = self
                    .knob
                    .clone()
                    .ok_or_else(|| args.error("vary requires a knob name"))?;
                let start_frame = args.frame_index()?;
                let end_frame = args.frame_index()?;
                let start_value = args.num()?;
                let end_value = args.num()?;
                if start_frame >= end_frame {
                    return Err(args.error(format!(
                        "vary start frame {start_frame} must be before end frame {end_frame}"
                    )));
                }
                Directive::Vary(VarySpec {
                    knob,
                    start_frame,
                    end_frame,
                    start_value,
                    end_value,
                })
            }
            Op::Box => {
                let constants = args.opt_str();
                let corner = args.vec3()?;
                let size = args.vec3()?;
                let coords = args.opt_str();
                Directive::Shape {
                    shape: Shape::Box { corner, size },
                    constants,
                    coords,
                }
            }
            Op::Sphere => {
                let constants = args.opt_str();
                let center = args.vec3()?;
                let radius = args.num()?;
                let coords = args.opt_str();
                Directive::Shape {
                    shape: Shape::Sphere { center, radius },
                    constants,
                    coords,
                }
            }
            Op::Torus => {
                let constants = args.opt_str();
                let center = args.vec3()?;
                let minor_radius = args.num()?;
                let major_radius = args.num()?;
                let coords = args.opt_str();
                Directive::Shape {
                    shape: Shape::Torus {
                        center,
                        minor_radius,
                        major_radius,
                    },
                    constants,
                    coords,
                }
            }
            Op::Line => {
                let constants = args.opt_str();
                let p0 = args.vec3()?;
                let coords0 = args.opt_str();
                let p1 = args.vec3()?;
                let coords1 = args.opt_str();
                Directive::Line {
                    constants,
                    p0,
                    coords0,
                    p1,
                    coords1,
                }
            }
            Op::Move => Directive::Move {
                offset: args.vec3()?,
                knob: self.knob.clone(),
            },
            Op::Scale => Directive::Scale {
                factors: args.vec3()?,
                knob: self.knob.clone(),
            },
            Op::Rotate => {
                let axis_name = args.str()?;
                let axis = Axis::parse(&axis_name)
                    .ok_or_else(|| args.error(format!("unknown rotation axis '{axis_name}'")))?;
                Directive::Rotate {
                    axis,
                    degrees: args.num()?,
                    knob: self.knob.clone(),
                }
            }
            Op::Push => Directive::Push,
            Op::Pop => Directive::Pop,
            Op::Display => Directive::Display,
            Op::Save => Directive::Save { name: args.str()? },
        };

        args.finish()?;
        Ok(directive)
    }
}

/// Normalize a whole command list, failing on the first malformed command.
pub fn normalize_commands(commands: &[Command]) -> MdlResult<Vec<Directive>> {
    commands
        .iter()
        .enumerate()
        .map(|(i, c)| c.normalize(i))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            "z" | "Z" => Some(Self::Z),
            _ => None,
        }
    }
}

/// Geometry parameters of a solid shape directive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Axis-aligned box from its front-top-left corner and `(width, height, depth)`.
    Box { corner: Vec3, size: Vec3 },
    Sphere { center: Vec3, radius: f64 },
    Torus {
        center: Vec3,
        minor_radius: f64,
        major_radius: f64,
    },
}

impl Shape {
    pub fn op(&self) -> Op {
        match self {
            Self::Box { .. } => Op::Box,
            Self::Sphere { .. } => Op::Sphere,
            Self::Torus { .. } => Op::Torus,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VarySpec {
    pub knob: String,
    /// Signed so that negative indices survive until range validation.
    pub start_frame: i64,
    pub end_frame: i64,
    pub start_value: f64,
    pub end_value: f64,
}

/// A normalized command with strongly typed arguments.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Directive {
    Frames {
        count: u32,
    },
    Basename {
        name: String,
    },
    Vary(VarySpec),
    Shape {
        shape: Shape,
        constants: Option<String>,
        coords: Option<String>,
    },
    Line {
        constants: Option<String>,
        p0: Vec3,
        coords0: Option<String>,
        p1: Vec3,
        coords1: Option<String>,
    },
    Move {
        offset: Vec3,
        knob: Option<String>,
    },
    Scale {
        factors: Vec3,
        knob: Option<String>,
    },
    Rotate {
        axis: Axis,
        degrees: f64,
        knob: Option<String>,
    },
    Push,
    Pop,
    Display,
    Save {
        name: String,
    },
}

impl Directive {
    pub fn op(&self) -> Op {
        match self {
            Self::Frames { .. } => Op::Frames,
            Self::Basename { .. } => Op::Basename,
            Self::Vary(_) => Op::Vary,
            Self::Shape { shape, .. } => shape.op(),
            Self::Line { .. } => Op::Line,
            Self::Move { .. } => Op::Move,
            Self::Scale { .. } => Op::Scale,
            Self::Rotate { .. } => Op::Rotate,
            Self::Push => Op::Push,
            Self::Pop => Op::Pop,
            Self::Display => Op::Display,
            Self::Save { .. } => Op::Save,
        }
    }
}

struct ArgCursor<'a> {
    args: &'a [Arg],
    pos: usize,
    op: Op,
    index: usize,
}

impl ArgCursor<'_> {
    fn error(&self, msg: impl std::fmt::Display) -> MdlError {
        MdlError::validation(format!("command #{} ({}): {msg}", self.index, self.op))
    }

    fn num(&mut self) -> MdlResult<f64> {
        match self.args.get(self.pos) {
            Some(Arg::Num(v)) => {
                self.pos += 1;
                Ok(*v)
            }
            Some(Arg::Str(s)) => Err(self.error(format!(
                "argument {} must be a number, got '{s}'",
                self.pos
            ))),
            None => Err(self.error(format!("missing numeric argument {}", self.pos))),
        }
    }

    fn str(&mut self) -> MdlResult<String> {
        match self.args.get(self.pos) {
            Some(Arg::Str(s)) => {
                self.pos += 1;
                Ok(s.clone())
            }
            Some(Arg::Num(v)) => Err(self.error(format!(
                "argument {} must be a name, got {v}",
                self.pos
            ))),
            None => Err(self.error(format!("missing name argument {}", self.pos))),
        }
    }

    fn opt_str(&mut self) -> Option<String> {
        match self.args.get(self.pos) {
            Some(Arg::Str(s)) => {
                self.pos += 1;
                Some(s.clone())
            }
            _ => None,
        }
    }

    fn vec3(&mut self) -> MdlResult<Vec3> {
        Ok(Vec3::new(self.num()?, self.num()?, self.num()?))
    }

    fn frame_index(&mut self) -> MdlResult<i64> {
        let v = self.num()?;
        if v.fract() != 0.0 || !v.is_finite() {
            return Err(self.error(format!("frame index must be an integer, got {v}")));
        }
        Ok(v as i64)
    }

    fn finish(&self) -> MdlResult<()> {
        if self.pos != self.args.len() {
            return Err(self.error(format!(
                "expected {} arguments, got {}",
                self.pos,
                self.args.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/model.rs"]
mod tests;
