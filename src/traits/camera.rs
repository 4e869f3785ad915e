use glam::{Quat, Vec3};

/// A scene object the first-person controller can drive.
///
/// Implementors expose a mutable world position, an orientation quaternion
/// and a look-at primitive. Local-axis translation is provided on top.
pub trait SceneCamera {
    /// World-space position
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// Current orientation; the camera looks down its local -Z axis
    fn orientation(&self) -> Quat;

    /// Rotate so the local -Z axis points at `target`
    fn look_at(&mut self, target: Vec3);

    /// Move `distance` along a unit axis expressed in camera space
    fn translate_on_axis(&mut self, axis: Vec3, distance: f32) {
        let offset = self.orientation() * axis * distance;
        self.set_position(self.position() + offset);
    }

    fn translate_x(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::X, distance);
    }

    fn translate_z(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::Z, distance);
    }

    /// Unit vector the camera is facing
    fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }
}

/// Camera movement and control abstraction
pub trait CameraController {
    /// Update camera state based on elapsed time
    fn update(&mut self, delta_time: f32);

    /// Get the view matrix for rendering
    fn view_matrix(&self) -> [[f32; 4]; 4];

    /// Get the camera position in world space
    fn position(&self) -> [f32; 3];

    /// Get the camera forward direction
    fn forward(&self) -> [f32; 3];
}
