#![allow(dead_code)]

use mdl_engine::{
    EdgeList, FrameSink, MdlResult, PolygonList, RenderBackend, Rgb8, Shading, Surface, Vec3,
};

/// One triangle per solid (corner, +x edge, +y edge) and a white pixel per vertex.
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexBackend;

impl RenderBackend for VertexBackend {
    fn tessellate_box(&mut self, corner: Vec3, size: Vec3) -> MdlResult<PolygonList> {
        let mut p = PolygonList::default();
        p.push_triangle(
            corner,
            corner + Vec3::new(size.x, 0.0, 0.0),
            corner + Vec3::new(0.0, size.y, 0.0),
        );
        Ok(p)
    }

    fn tessellate_sphere(&mut self, center: Vec3, radius: f64, _step: u32) -> MdlResult<PolygonList> {
        self.tessellate_box(center, Vec3::splat(radius))
    }

    fn tessellate_torus(
        &mut self,
        center: Vec3,
        _minor_radius: f64,
        major_radius: f64,
        _step: u32,
    ) -> MdlResult<PolygonList> {
        self.tessellate_box(center, Vec3::splat(major_radius))
    }

    fn draw_polygons(
        &mut self,
        polygons: &PolygonList,
        surface: &mut Surface,
        _shading: &Shading,
    ) -> MdlResult<()> {
        for p in &polygons.points {
            surface.plot(p.x.round() as i64, p.y.round() as i64, p.z, Rgb8::WHITE);
        }
        Ok(())
    }

    fn draw_lines(&mut self, edges: &EdgeList, surface: &mut Surface, color: Rgb8) -> MdlResult<()> {
        for p in &edges.points {
            surface.plot(p.x.round() as i64, p.y.round() as i64, p.z, color);
        }
        Ok(())
    }

    fn fork_worker(&self) -> Option<Box<dyn RenderBackend>> {
        Some(Box::new(*self))
    }
}

/// Records the first vertex of every polygon draw, in world space.
#[derive(Debug, Default)]
pub struct FirstVertexRecorder {
    pub drawn: Vec<Vec3>,
}

impl RenderBackend for FirstVertexRecorder {
    fn tessellate_box(&mut self, corner: Vec3, size: Vec3) -> MdlResult<PolygonList> {
        VertexBackend.tessellate_box(corner, size)
    }

    fn tessellate_sphere(&mut self, center: Vec3, radius: f64, step: u32) -> MdlResult<PolygonList> {
        VertexBackend.tessellate_sphere(center, radius, step)
    }

    fn tessellate_torus(
        &mut self,
        center: Vec3,
        minor_radius: f64,
        major_radius: f64,
        step: u32,
    ) -> MdlResult<PolygonList> {
        VertexBackend.tessellate_torus(center, minor_radius, major_radius, step)
    }

    fn draw_polygons(
        &mut self,
        polygons: &PolygonList,
        _surface: &mut Surface,
        _shading: &Shading,
    ) -> MdlResult<()> {
        self.drawn.push(polygons.points[0]);
        Ok(())
    }

    fn draw_lines(&mut self, _edges: &EdgeList, _surface: &mut Surface, _color: Rgb8) -> MdlResult<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NameSink {
    pub presented: usize,
    pub persisted: Vec<String>,
    pub assembled: Vec<String>,
}

impl FrameSink for NameSink {
    fn present(&mut self, _surface: &Surface) -> MdlResult<()> {
        self.presented += 1;
        Ok(())
    }

    fn persist(&mut self, _surface: &Surface, name: &str) -> MdlResult<()> {
        self.persisted.push(name.to_string());
        Ok(())
    }

    fn assemble_animation(&mut self, basename: &str) -> MdlResult<()> {
        self.assembled.push(basename.to_string());
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
