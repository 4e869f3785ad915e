mod orientation;
mod scalar;
mod spherical;

pub use orientation::look_rotation;
pub use scalar::{clamp_unordered, map_linear};
pub use spherical::Spherical;
