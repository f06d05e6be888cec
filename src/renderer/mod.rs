//! Rendering module
//!
//! Scenes are built as draw lists; `shapes` tessellates their geometry into
//! vertices for a GPU surface.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Anchor, DrawCommand, menu_scene, race_scene};
pub use shapes::tessellate;
pub use vertex::{Color, Vertex};
