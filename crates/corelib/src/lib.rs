//! Core types: math re-exports, the model transform composer, the framing
//! camera and the viewer session that ties them to a loaded mesh.

pub use glam::{Mat3, Mat4, Vec3, vec3};

pub mod camera;
pub mod session;
pub mod transform;

pub use camera::Camera;
pub use session::{Key, Operation, Session, UnknownKey};
pub use transform::{Axis, ModelUniform, TransformState};
