//! Transform component
//!
//! Rotation is stored as Euler angles in degrees, applied X then Y then Z,
//! so scripts can accumulate rotation deltas directly.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Spatial transform of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,
    /// Euler rotation in degrees
    pub rotation: Vec3,
    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Identity transform
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Offset the position
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Add Euler degrees to the rotation
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Add to the per-axis scale
    pub fn scale_by(&mut self, delta: Vec3) {
        self.scale += delta;
    }

    /// Model matrix: `T * Rx * Ry * Rz * S`
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Mat4::rotation_x(utils::deg_to_rad(self.rotation.x))
            * Mat4::rotation_y(utils::deg_to_rad(self.rotation.y))
            * Mat4::rotation_z(utils::deg_to_rad(self.rotation.z));
        Mat4::new_translation(&self.position) * rotation * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_edits_accumulate() {
        let mut transform = TransformComponent::identity();
        transform.translate(Vec3::new(1.0, 2.0, 3.0));
        transform.translate(Vec3::new(1.0, 0.0, -1.0));
        transform.rotate(Vec3::new(0.0, 45.0, 0.0));
        transform.rotate(Vec3::new(0.0, 45.0, 10.0));
        transform.scale_by(Vec3::new(1.0, 0.0, 0.5));

        assert_relative_eq!(transform.position, Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(transform.rotation, Vec3::new(0.0, 90.0, 10.0));
        assert_relative_eq!(transform.scale, Vec3::new(2.0, 1.0, 1.5));
    }

    #[test]
    fn test_matrix_applies_scale_then_rotation_then_translation() {
        let transform = TransformComponent {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, 0.0, 90.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        let point = transform.to_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(point, Vec4::new(10.0, 2.0, 0.0, 1.0), epsilon = 1e-5);
    }
}
