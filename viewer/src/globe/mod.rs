//! Textured globe rendering: UV sphere mesh, pipeline, and orbit camera.

pub mod mesh;
pub mod orbit_cam;
pub mod pipeline;

pub use mesh::{build_sphere_mesh, SphereMesh};
pub use orbit_cam::OrbitCamera;
pub use pipeline::GlobeRenderer;
