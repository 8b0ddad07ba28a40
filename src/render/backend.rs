use crate::{
    foundation::{
        core::{Canvas, Mat4, Rgb8, Vec3},
        error::{MdlError, MdlResult},
    },
    render::{
        shading::{Lighting, Reflectance, Shading},
        surface::Surface,
    },
    transform::affine,
};

/// Triangles as a flat point list, three points per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonList {
    pub points: Vec<Vec3>,
}

impl PolygonList {
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.points.extend_from_slice(&[a, b, c]);
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.points.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn transform(&mut self, m: &Mat4) {
        affine::transform_points(m, &mut self.points);
    }
}

/// Line segments as a flat point list, two points per edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeList {
    pub points: Vec<Vec3>,
}

impl EdgeList {
    pub fn push_edge(&mut self, a: Vec3, b: Vec3) {
        self.points.extend_from_slice(&[a, b]);
    }

    pub fn edges(&self) -> impl Iterator<Item = [Vec3; 2]> + '_ {
        self.points.chunks_exact(2).map(|e| [e[0], e[1]])
    }

    pub fn transform(&mut self, m: &Mat4) {
        affine::transform_points(m, &mut self.points);
    }
}

/// Geometry and rasterization primitives the interpreter dispatches to.
///
/// Tessellation produces geometry in the shape's local coordinates; the interpreter applies the
/// active transform before calling the draw methods.
pub trait RenderBackend: Send + Sync {
    fn tessellate_box(&mut self, corner: Vec3, size: Vec3) -> MdlResult<PolygonList>;

    fn tessellate_sphere(&mut self, center: Vec3, radius: f64, step: u32)
    -> MdlResult<PolygonList>;

    fn tessellate_torus(
        &mut self,
        center: Vec3,
        minor_radius: f64,
        major_radius: f64,
        step: u32,
    ) -> MdlResult<PolygonList>;

    fn tessellate_line(&mut self, p0: Vec3, p1: Vec3) -> MdlResult<EdgeList> {
        let mut edges = EdgeList::default();
        edges.push_edge(p0, p1);
        Ok(edges)
    }

    fn draw_polygons(
        &mut self,
        polygons: &PolygonList,
        surface: &mut Surface,
        shading: &Shading,
    ) -> MdlResult<()>;

    fn draw_lines(&mut self, edges: &EdgeList, surface: &mut Surface, color: Rgb8)
    -> MdlResult<()>;

    /// An independent backend for a parallel render worker, if supported.
    fn fork_worker(&self) -> Option<Box<dyn RenderBackend>> {
        None
    }
}

/// Render-side configuration shared by every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub canvas: Canvas,
    pub background: Rgb8,
    pub line_color: Rgb8,
    pub lighting: Lighting,
    /// Reflectance for shapes that name no constants set.
    pub reflectance: Reflectance,
    /// Tessellation resolution for spheres and tori.
    pub step: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Rgb8::BLACK,
            line_color: Rgb8::BLACK,
            lighting: Lighting::default(),
            reflectance: Reflectance::default(),
            step: 20,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> MdlResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.step == 0 {
            return Err(MdlError::validation("tessellation step must be non-zero"));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> MdlResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| MdlError::serde(format!("parse render settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn new_surface(&self) -> Surface {
        Surface::new(self.canvas, self.background)
    }
}
