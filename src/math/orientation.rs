use glam::{Mat3, Quat, Vec3};

/// Orientation for a camera at `eye` whose local -Z axis points at `target`.
///
/// Degenerate inputs follow the usual scene-graph conventions: a target equal
/// to the eye keeps looking down -Z, and a view direction parallel to `up`
/// is nudged slightly so a basis can still be built.
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let mut z = eye - target;

    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }

    z = z.normalize();
    let mut x = up.cross(z);

    if x.length_squared() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }

        z = z.normalize();
        x = up.cross(z);
    }

    x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
