//! Math utilities and types
//!
//! Fixed-size engine types backed by nalgebra. Scripts work with the
//! variable-length [`Vector`](super::vector::Vector) kernel and convert
//! into these types at the engine boundary.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    #[must_use]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    #[must_use]
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    #[must_use]
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
}

/// Extension trait for Mat4 with camera matrix constructors
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a perspective projection matrix (depth mapped to [0, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create an orthographic projection matrix (depth mapped to [0, 1])
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed view matrix looking along `front` from `eye`
    fn look_to(eye: Vec3, front: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [a⁻¹/tan(φ/2)    0              0                    0           ]
        //     [0               1/tan(φ/2)     0                    0           ]
        //     [0               0              f/(f-n)              -nf/(f-n)   ]
        //     [0               0              1                    0           ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;
        result
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let mut result = Mat4::identity();
        result[(0, 0)] = 2.0 / (right - left);
        result[(1, 1)] = 2.0 / (top - bottom);
        result[(2, 2)] = 1.0 / (far - near);
        result[(0, 3)] = -(right + left) / (right - left);
        result[(1, 3)] = -(top + bottom) / (top - bottom);
        result[(2, 3)] = -near / (far - near);
        result
    }

    fn look_to(eye: Vec3, front: Vec3, up: Vec3) -> Mat4 {
        let forward = front.normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,  // Negative forward for right-handed
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_conversion_roundtrip() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = 1e-6);
        assert_relative_eq!(utils::rad_to_deg(utils::deg_to_rad(89.0)), 89.0, epsilon = 1e-4);
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(utils::clamp(120.0, -89.0, 89.0), 89.0);
        assert_eq!(utils::clamp(-120.0, -89.0, 89.0), -89.0);
        assert_eq!(utils::clamp(12.5, -89.0, 89.0), 12.5);
    }

    #[test]
    fn test_look_to_moves_eye_to_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = Mat4::look_to(eye, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0));
        let transformed = view.transform_point(&nalgebra::Point3::from(eye));
        assert_relative_eq!(transformed.coords, Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_orthographic_maps_bounds_to_ndc() {
        let projection = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 100.0);
        let corner = projection.transform_point(&nalgebra::Point3::new(2.0, 1.0, 0.1));
        assert_relative_eq!(corner.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.z, 0.0, epsilon = 1e-5);
    }
}
