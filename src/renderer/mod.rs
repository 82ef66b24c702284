//! WebGPU rendering module
//!
//! Builds a triangle list from the frame state each frame and draws it with a
//! single flat-color pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
