//! WebGPU rendering module
//!
//! Scenes are tessellated on the CPU into flat-colored triangles in canvas
//! pixel space, then uploaded and drawn by a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, canvas_to_ndc};
pub use scene::{Scene, SceneStyle};
pub use vertex::Vertex;
