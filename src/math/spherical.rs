use glam::Vec3;

/// Spherical coordinates: polar angle `phi` measured from +Y, azimuth `theta`
/// measured around Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub const fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();

        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }

        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;

        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

impl Default for Spherical {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}
