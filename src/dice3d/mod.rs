//! 3D dice simulation: per-die roll state, settle detection and face
//! resolution, the physics-engine port, and the rapier table scene.

pub mod port;
pub mod scene;
pub mod systems;
pub mod types;

pub use port::*;
pub use scene::*;
pub use systems::*;
pub use types::*;
