//! Lighting parameters handed to the rasterizer.
//!
//! The engine never evaluates these itself; it only picks the right reflectance per shape and
//! forwards everything to [`RenderBackend::draw_polygons`](crate::RenderBackend::draw_polygons).

use crate::foundation::core::{Rgb8, Vec3};

/// Per-channel reflection coefficients of a surface (a "constants" set).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reflectance {
    pub ambient: [f64; 3],
    pub diffuse: [f64; 3],
    pub specular: [f64; 3],
}

impl Default for Reflectance {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.5, 0.5, 0.5],
            specular: [0.5, 0.5, 0.5],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Rgb8,
}

/// Scene-wide lighting environment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lighting {
    pub view: Vec3,
    pub ambient: Rgb8,
    pub light: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            view: Vec3::new(0.0, 0.0, 1.0),
            ambient: Rgb8::new(50, 50, 50),
            light: PointLight {
                position: Vec3::new(0.5, 0.75, 1.0),
                color: Rgb8::new(0, 255, 255),
            },
        }
    }
}

/// Everything a polygon draw call needs to shade one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub lighting: Lighting,
    pub reflectance: Reflectance,
}
