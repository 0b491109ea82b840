//! Math primitives shared by every simulation component.

pub mod vec3;

pub use vec3::Vec3;
