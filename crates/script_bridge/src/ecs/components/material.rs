//! Material component and the material storage behind it
//!
//! Attribute values live in a [`MaterialStorage`] owned by the scene, laid
//! out as a GPU-ready [`MaterialInfo`] block. The component itself only
//! holds the storage id. Ambient, albedo and emission are four-component
//! slots; every other attribute is a scalar.

use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Material storage identifier
    pub struct MaterialId;
}

/// Addressable material attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MaterialAttribute {
    /// Addresses nothing
    None = 0,
    /// Ambient color (vec4)
    Ambient = 1,
    /// Albedo color (vec4)
    Albedo = 2,
    /// Albedo texture factor
    AlbedoFactor = 3,
    /// Metallic value
    Metallic = 4,
    /// Metallic texture factor
    MetallicFactor = 5,
    /// Emission color (vec4)
    Emission = 6,
    /// Emission strength
    EmissionFactor = 7,
    /// Surface roughness
    Roughness = 8,
}

impl MaterialAttribute {
    /// Whether the attribute stores four components rather than a scalar
    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::Ambient | Self::Albedo | Self::Emission)
    }

    /// Numeric attribute code
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for MaterialAttribute {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::None,
            1 => Self::Ambient,
            2 => Self::Albedo,
            3 => Self::AlbedoFactor,
            4 => Self::Metallic,
            5 => Self::MetallicFactor,
            6 => Self::Emission,
            7 => Self::EmissionFactor,
            8 => Self::Roughness,
            other => return Err(other),
        })
    }
}

/// Material block as uploaded to the GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialInfo {
    /// Ambient color
    pub ambient: [f32; 4],
    /// Albedo color
    pub albedo: [f32; 4],
    /// Emission color
    pub emission: [f32; 4],
    /// Albedo texture factor
    pub albedo_factor: f32,
    /// Metallic value
    pub metallic: f32,
    /// Metallic texture factor
    pub metallic_factor: f32,
    /// Emission strength
    pub emission_factor: f32,
    /// Surface roughness
    pub roughness: f32,
    _padding: [f32; 3],
}

impl Default for MaterialInfo {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1, 1.0],
            albedo: [1.0, 1.0, 1.0, 1.0],
            emission: [0.0, 0.0, 0.0, 1.0],
            albedo_factor: 1.0,
            metallic: 0.0,
            metallic_factor: 1.0,
            emission_factor: 0.0,
            roughness: 0.5,
            _padding: [0.0; 3],
        }
    }
}

impl MaterialInfo {
    /// Read an attribute as four components
    ///
    /// Scalars report `(value, 0, 0, 0)`; `None` reports zeros.
    #[must_use]
    pub fn get(&self, attribute: MaterialAttribute) -> [f32; 4] {
        let scalar = |value: f32| [value, 0.0, 0.0, 0.0];
        match attribute {
            MaterialAttribute::None => [0.0; 4],
            MaterialAttribute::Ambient => self.ambient,
            MaterialAttribute::Albedo => self.albedo,
            MaterialAttribute::Emission => self.emission,
            MaterialAttribute::AlbedoFactor => scalar(self.albedo_factor),
            MaterialAttribute::Metallic => scalar(self.metallic),
            MaterialAttribute::MetallicFactor => scalar(self.metallic_factor),
            MaterialAttribute::EmissionFactor => scalar(self.emission_factor),
            MaterialAttribute::Roughness => scalar(self.roughness),
        }
    }

    /// Write an attribute; scalars take the first component
    ///
    /// Returns `false` for `None`, which edits nothing.
    pub fn set(&mut self, attribute: MaterialAttribute, values: [f32; 4]) -> bool {
        let [first, ..] = values;
        match attribute {
            MaterialAttribute::None => return false,
            MaterialAttribute::Ambient => self.ambient = values,
            MaterialAttribute::Albedo => self.albedo = values,
            MaterialAttribute::Emission => self.emission = values,
            MaterialAttribute::AlbedoFactor => self.albedo_factor = first,
            MaterialAttribute::Metallic => self.metallic = first,
            MaterialAttribute::MetallicFactor => self.metallic_factor = first,
            MaterialAttribute::EmissionFactor => self.emission_factor = first,
            MaterialAttribute::Roughness => self.roughness = first,
        }
        true
    }
}

/// Authoritative store of material values
///
/// Edited materials are marked dirty until the renderer collects them.
#[derive(Debug, Default)]
pub struct MaterialStorage {
    materials: SlotMap<MaterialId, MaterialInfo>,
    dirty: HashSet<MaterialId>,
}

impl MaterialStorage {
    /// Create an empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material
    pub fn insert(&mut self, info: MaterialInfo) -> MaterialId {
        let id = self.materials.insert(info);
        self.dirty.insert(id);
        id
    }

    /// Drop a material
    pub fn remove(&mut self, id: MaterialId) -> Option<MaterialInfo> {
        self.dirty.remove(&id);
        self.materials.remove(id)
    }

    /// Look up a material
    #[must_use]
    pub fn get(&self, id: MaterialId) -> Option<&MaterialInfo> {
        self.materials.get(id)
    }

    /// Write one attribute and mark the material dirty
    ///
    /// Returns `false` when the id is stale or the attribute is `None`.
    pub fn set_attribute(&mut self, id: MaterialId, attribute: MaterialAttribute, values: [f32; 4]) -> bool {
        let Some(info) = self.materials.get_mut(id) else {
            return false;
        };
        let changed = info.set(attribute, values);
        if changed {
            self.dirty.insert(id);
        }
        changed
    }

    /// Read one attribute
    #[must_use]
    pub fn attribute(&self, id: MaterialId, attribute: MaterialAttribute) -> Option<[f32; 4]> {
        self.get(id).map(|info| info.get(attribute))
    }

    /// Raw bytes of a material block for upload
    #[must_use]
    pub fn as_bytes(&self, id: MaterialId) -> Option<&[u8]> {
        self.get(id).map(bytemuck::bytes_of)
    }

    /// Take the set of materials edited since the last call
    pub fn take_dirty(&mut self) -> Vec<MaterialId> {
        self.dirty.drain().collect()
    }

    /// Number of stored materials
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no materials are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Material attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialComponent {
    /// Storage entry holding the values
    pub material: MaterialId,
}
