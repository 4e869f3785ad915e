use glam::{Mat4, Quat, Vec3};

use crate::math::look_rotation;
use crate::traits::camera::SceneCamera;

/// Free camera: a world position plus an orientation quaternion.
/// Looks down its local -Z axis with +Y as the default up vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    pub up: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            up: Vec3::Y,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Camera-to-world transform
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCamera for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn look_at(&mut self, target: Vec3) {
        self.orientation = look_rotation(self.position, target, self.up);
    }
}
