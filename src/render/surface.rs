use crate::foundation::core::{Canvas, Rgb8};

/// Per-frame render target: a color buffer plus a depth buffer of the same size.
///
/// Row-major, origin at the top-left. Depth grows toward the viewer; a fresh surface holds
/// `f64::NEG_INFINITY` everywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    canvas: Canvas,
    background: Rgb8,
    pixels: Vec<Rgb8>,
    depth: Vec<f64>,
}

impl Surface {
    pub fn new(canvas: Canvas, background: Rgb8) -> Self {
        let n = canvas.pixel_count();
        Self {
            canvas,
            background,
            pixels: vec![background; n],
            depth: vec![f64::NEG_INFINITY; n],
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.canvas.width) || y >= i64::from(self.canvas.height)
        {
            return None;
        }
        Some((y as usize) * (self.canvas.width as usize) + (x as usize))
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb8> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    pub fn depth(&self, x: i64, y: i64) -> Option<f64> {
        self.offset(x, y).map(|i| self.depth[i])
    }

    /// Depth-tested write. Returns whether the pixel was written; off-canvas writes are dropped.
    pub fn plot(&mut self, x: i64, y: i64, z: f64, color: Rgb8) -> bool {
        let Some(i) = self.offset(x, y) else {
            return false;
        };
        if z < self.depth[i] {
            return false;
        }
        self.depth[i] = z;
        self.pixels[i] = color;
        true
    }

    /// Reset both buffers, keeping the allocation.
    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.depth.fill(f64::NEG_INFINITY);
    }

    /// Tightly packed RGB8 rows, as image encoders expect.
    pub fn to_rgb8_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            out.extend_from_slice(&[p.r, p.g, p.b]);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
