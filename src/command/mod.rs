pub mod model;
pub mod scene;
pub mod symbols;
