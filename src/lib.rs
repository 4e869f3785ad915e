pub mod camera;
pub mod cli;
pub mod controller;
pub mod core;
pub mod math;
pub mod settings;
pub mod traits;

pub use camera::Camera;
pub use controller::{FirstPersonController, MovementState, MAX_LATITUDE};
pub use settings::ControllerSettings;
