pub mod camera;
pub mod surface;

pub use camera::*;
pub use surface::*;
