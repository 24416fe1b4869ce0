//! Component kinds
//!
//! The scene supports a closed set of component kinds. Scripts name them by
//! their string key ("Transform", "Point Light", ...); [`ComponentKind`]
//! parses those keys and [`ComponentMask`] records which kinds an entity
//! currently carries.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// Every component kind the scene can attach to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Position, rotation and scale
    Transform,
    /// Surface material attributes
    Material,
    /// Infinitely distant light
    DirectionalLight,
    /// Omnidirectional light with a radius
    PointLight,
    /// Perspective projection camera
    PerspectiveCamera,
    /// Orthographic projection camera
    OrthographicCamera,
    /// Unit quad mesh primitive
    Quad,
    /// Unit cube mesh primitive
    Cube,
}

impl ComponentKind {
    /// All kinds in declaration order
    pub const ALL: [Self; 8] = [
        Self::Transform,
        Self::Material,
        Self::DirectionalLight,
        Self::PointLight,
        Self::PerspectiveCamera,
        Self::OrthographicCamera,
        Self::Quad,
        Self::Cube,
    ];

    /// String key used by scripts
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::Material => "Material",
            Self::DirectionalLight => "Directional Light",
            Self::PointLight => "Point Light",
            Self::PerspectiveCamera => "Perspective Camera",
            Self::OrthographicCamera => "Orthographic Camera",
            Self::Quad => "Quad",
            Self::Cube => "Cube",
        }
    }

    /// Kinds that scripts can retrieve as a typed view
    #[must_use]
    pub const fn is_viewable(self) -> bool {
        matches!(
            self,
            Self::Transform | Self::Material | Self::DirectionalLight | Self::PointLight
        )
    }

    /// Mask bit for this kind
    #[must_use]
    pub const fn mask(self) -> ComponentMask {
        match self {
            Self::Transform => ComponentMask::TRANSFORM,
            Self::Material => ComponentMask::MATERIAL,
            Self::DirectionalLight => ComponentMask::DIRECTIONAL_LIGHT,
            Self::PointLight => ComponentMask::POINT_LIGHT,
            Self::PerspectiveCamera => ComponentMask::PERSPECTIVE_CAMERA,
            Self::OrthographicCamera => ComponentMask::ORTHOGRAPHIC_CAMERA,
            Self::Quad => ComponentMask::QUAD,
            Self::Cube => ComponentMask::CUBE,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known component kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component kind '{0}'")]
pub struct UnknownComponentKind(pub String);

impl FromStr for ComponentKind {
    type Err = UnknownComponentKind;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| UnknownComponentKind(key.to_string()))
    }
}

bitflags! {
    /// Set of component kinds attached to one entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ComponentMask: u16 {
        /// Transform
        const TRANSFORM = 1 << 0;
        /// Material
        const MATERIAL = 1 << 1;
        /// Directional light
        const DIRECTIONAL_LIGHT = 1 << 2;
        /// Point light
        const POINT_LIGHT = 1 << 3;
        /// Perspective camera
        const PERSPECTIVE_CAMERA = 1 << 4;
        /// Orthographic camera
        const ORTHOGRAPHIC_CAMERA = 1 << 5;
        /// Quad mesh
        const QUAD = 1 << 6;
        /// Cube mesh
        const CUBE = 1 << 7;
    }
}

impl ComponentMask {
    /// Kinds present in this mask
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.mask()))
    }
}
