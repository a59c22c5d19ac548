//! Asset loading: Wavefront OBJ meshes into CPU-side, GPU-ready buffers.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{ObjError, ObjResult, ParseErrorKind};
pub use mesh::{Bounds, Mesh, Triangle, VertexLayout};
pub use obj::{load_obj_from_path, load_obj_from_reader, load_obj_from_str};
