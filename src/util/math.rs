//! Math type re-exports.
//!
//! Cast stores vectors as tightly packed 32-bit floats, which is exactly the
//! layout of the `glam` single precision types.

pub use glam::{Vec2, Vec3, Vec4};
