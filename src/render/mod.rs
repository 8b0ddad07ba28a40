pub mod backend;
pub mod pipeline;
pub mod shading;
pub mod surface;
