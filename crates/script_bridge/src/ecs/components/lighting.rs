//! Light components
//!
//! Colors are RGBA with alpha pinned to 1; scripts only ever supply RGB.

use crate::foundation::math::{Vec3, Vec4};

/// Omnidirectional light emitting from a position
#[derive(Debug, Clone, PartialEq)]
pub struct PointLightComponent {
    /// RGBA color
    pub color: Vec4,
    /// World space position
    pub position: Vec3,
    /// Attenuation radius
    pub radius: f32,
    /// Intensity multiplier
    pub intensity: f32,
}

impl Default for PointLightComponent {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            position: Vec3::zeros(),
            radius: 10.0,
            intensity: 1.0,
        }
    }
}

/// Light with parallel rays along a direction
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLightComponent {
    /// RGBA color
    pub color: Vec4,
    /// Direction the light travels
    pub direction: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
}

impl Default for DirectionalLightComponent {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            intensity: 1.0,
        }
    }
}

/// Opaque RGBA from an RGB triple
#[must_use]
pub fn opaque(rgb: Vec3) -> Vec4 {
    Vec4::new(rgb.x, rgb.y, rgb.z, 1.0)
}
