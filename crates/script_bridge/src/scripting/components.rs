//! Typed component views
//!
//! A view is a [`ComponentHandle`] plus typed accessors. It stores no
//! component data: every call re-resolves the handle against the world and
//! forwards to the authoritative storage. When the entity or the component
//! is gone, setters do nothing and getters return sentinels.

use crate::ecs::components::{lighting, MaterialAttribute, PointLightComponent, TransformComponent};
use crate::ecs::{ComponentKind, EntityId, World};
use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::Vector;

use super::{ScriptError, WorldRef};

/// Reported by transform getters when the handle no longer resolves
pub const INVALID_TRANSFORM: (f32, f32, f32) = (-10000.0, -100000.0, -10000.0);

/// Opaque reference to one component of one entity
#[derive(Debug, Clone)]
pub struct ComponentHandle {
    world: WorldRef,
    entity: EntityId,
    kind: ComponentKind,
}

impl ComponentHandle {
    pub(crate) fn new(world: WorldRef, entity: EntityId, kind: ComponentKind) -> Self {
        Self { world, entity, kind }
    }

    /// Kind of the referenced component
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Owning entity
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity
    }

    /// Whether the component is still attached to a live entity
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.read(|_, _| Some(())).is_some()
    }

    fn read<R>(&self, f: impl FnOnce(&World, EntityId) -> Option<R>) -> Option<R> {
        let world = self.world.upgrade()?;
        let Ok(world) = world.try_borrow() else {
            log::warn!("World is mutably borrowed, {} read on {:?} skipped", self.kind, self.entity);
            return None;
        };
        if !world.has_component(self.entity, self.kind) {
            return None;
        }
        f(&world, self.entity)
    }

    fn write<R>(&self, f: impl FnOnce(&mut World, EntityId) -> Option<R>) -> Option<R> {
        let world = self.world.upgrade()?;
        let Ok(mut world) = world.try_borrow_mut() else {
            log::warn!("World is borrowed, {} edit on {:?} skipped", self.kind, self.entity);
            return None;
        };
        if !world.has_component(self.entity, self.kind) {
            log::trace!("{} on {:?} no longer attached, edit ignored", self.kind, self.entity);
            return None;
        }
        f(&mut world, self.entity)
    }
}

/// Typed access to a component kind
pub trait ComponentView: Sized {
    /// Kind this view wraps
    const KIND: ComponentKind;

    /// Wrap a handle of kind [`Self::KIND`]
    fn from_handle(handle: ComponentHandle) -> Self;

    /// Underlying handle
    fn handle(&self) -> &ComponentHandle;

    /// Whether the component still resolves
    fn is_valid(&self) -> bool {
        self.handle().is_valid()
    }
}

/// Any script-viewable component
#[derive(Debug, Clone)]
pub enum AnyComponent {
    /// Transform view
    Transform(Transform),
    /// Material view
    Material(Material),
    /// Point light view
    PointLight(PointLight),
    /// Directional light view
    DirectionalLight(DirectionalLight),
}

impl AnyComponent {
    /// Build the view matching the handle's kind
    ///
    /// Kinds scripts cannot view yield `None`.
    #[must_use]
    pub fn from_handle(handle: ComponentHandle) -> Option<Self> {
        let kind = handle.kind();
        if !kind.is_viewable() {
            log::trace!("{} components are not viewable from scripts", kind);
            return None;
        }
        Some(match kind {
            ComponentKind::Transform => Self::Transform(Transform::from_handle(handle)),
            ComponentKind::Material => Self::Material(Material::from_handle(handle)),
            ComponentKind::PointLight => Self::PointLight(PointLight::from_handle(handle)),
            ComponentKind::DirectionalLight => Self::DirectionalLight(DirectionalLight::from_handle(handle)),
            _ => return None,
        })
    }

    /// Kind of the wrapped component
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Transform(_) => ComponentKind::Transform,
            Self::Material(_) => ComponentKind::Material,
            Self::PointLight(_) => ComponentKind::PointLight,
            Self::DirectionalLight(_) => ComponentKind::DirectionalLight,
        }
    }
}

macro_rules! component_view {
    ($view:ident, $kind:expr) => {
        impl ComponentView for $view {
            const KIND: ComponentKind = $kind;

            fn from_handle(handle: ComponentHandle) -> Self {
                Self { handle }
            }

            fn handle(&self) -> &ComponentHandle {
                &self.handle
            }
        }
    };
}

component_view!(Transform, ComponentKind::Transform);
component_view!(Material, ComponentKind::Material);
component_view!(PointLight, ComponentKind::PointLight);
component_view!(DirectionalLight, ComponentKind::DirectionalLight);

fn vec3_arg(vector: &Vector) -> Result<Vec3, ScriptError> {
    Ok(vector.to_vec3()?)
}

fn triple(v: Vec3) -> (f32, f32, f32) {
    (v.x, v.y, v.z)
}

/// Script view of an entity's transform
#[derive(Debug, Clone)]
pub struct Transform {
    handle: ComponentHandle,
}

impl Transform {
    fn edit(&self, f: impl FnOnce(&mut TransformComponent)) {
        self.handle.write(|world, id| world.transform_mut(id).map(f));
    }

    fn query(&self, f: impl FnOnce(&TransformComponent) -> Vec3) -> (f32, f32, f32) {
        self.handle
            .read(|world, id| world.transform(id).map(f))
            .map_or(INVALID_TRANSFORM, triple)
    }

    /// Move by a position delta
    pub fn translate(&self, dx: f32, dy: f32, dz: f32) {
        self.edit(|t| t.translate(Vec3::new(dx, dy, dz)));
    }

    /// Rotate by Euler deltas in degrees
    pub fn rotate(&self, dx: f32, dy: f32, dz: f32) {
        self.edit(|t| t.rotate(Vec3::new(dx, dy, dz)));
    }

    /// Add to the per-axis scale
    pub fn scale(&self, dx: f32, dy: f32, dz: f32) {
        self.edit(|t| t.scale_by(Vec3::new(dx, dy, dz)));
    }

    /// Current position, or [`INVALID_TRANSFORM`]
    #[must_use]
    pub fn get_translation(&self) -> (f32, f32, f32) {
        self.query(|t| t.position)
    }

    /// Current Euler rotation in degrees, or [`INVALID_TRANSFORM`]
    #[must_use]
    pub fn get_rotation(&self) -> (f32, f32, f32) {
        self.query(|t| t.rotation)
    }

    /// Current scale, or [`INVALID_TRANSFORM`]
    #[must_use]
    pub fn get_scale(&self) -> (f32, f32, f32) {
        self.query(|t| t.scale)
    }

    /// Current model matrix
    #[must_use]
    pub fn matrix(&self) -> Option<Mat4> {
        self.handle.read(|world, id| world.transform(id).map(TransformComponent::to_matrix))
    }
}

/// Script view of an entity's material
#[derive(Debug, Clone)]
pub struct Material {
    handle: ComponentHandle,
}

impl Material {
    /// Set an attribute from 1 to 4 values, zero-padded to 4
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] for an empty slice or more than four
    /// values; nothing is written in that case.
    pub fn set_attribute(&self, attribute: MaterialAttribute, values: &[f32]) -> Result<(), ScriptError> {
        if values.is_empty() || values.len() > 4 {
            return Err(ScriptError::InvalidArgument(format!(
                "material attribute {attribute:?} takes 1 to 4 values, got {}",
                values.len()
            )));
        }
        if attribute == MaterialAttribute::None {
            log::warn!("Material attribute None addresses nothing, edit ignored");
            return Ok(());
        }

        let mut padded = [0.0; 4];
        padded[..values.len()].copy_from_slice(values);
        self.handle.write(|world, id| {
            let material = world.material(id)?.material;
            world
                .material_storage_mut()
                .set_attribute(material, attribute, padded)
                .then_some(())
        });
        log::trace!("Material {:?} set to {:?}", attribute, padded);
        Ok(())
    }

    /// Set an attribute addressed by its numeric code
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] for an unknown code or bad arity.
    pub fn set_attribute_code(&self, code: u32, values: &[f32]) -> Result<(), ScriptError> {
        let attribute = MaterialAttribute::try_from(code)
            .map_err(|code| ScriptError::InvalidArgument(format!("unknown material attribute code {code}")))?;
        self.set_attribute(attribute, values)
    }

    /// Stored value of an attribute as four components
    ///
    /// Scalars report `(value, 0, 0, 0)`. A handle that no longer resolves
    /// reports zeros.
    #[must_use]
    pub fn get_attribute(&self, attribute: MaterialAttribute) -> [f32; 4] {
        self.handle
            .read(|world, id| {
                let material = world.material(id)?.material;
                world.material_storage().attribute(material, attribute)
            })
            .unwrap_or_default()
    }
}

/// Script view of an entity's point light
#[derive(Debug, Clone)]
pub struct PointLight {
    handle: ComponentHandle,
}

impl PointLight {
    fn edit(&self, f: impl FnOnce(&mut PointLightComponent)) {
        self.handle.write(|world, id| world.point_light_mut(id).map(f));
    }

    /// Move the light by an offset
    ///
    /// # Errors
    /// [`ScriptError::Vector`] unless `offset` has 3 components.
    pub fn translate_position(&self, offset: &Vector) -> Result<(), ScriptError> {
        let offset = vec3_arg(offset)?;
        self.edit(|light| light.position += offset);
        Ok(())
    }

    /// Replace the RGB color; alpha stays 1
    ///
    /// # Errors
    /// [`ScriptError::Vector`] unless `rgb` has 3 components.
    pub fn update_color(&self, rgb: &Vector) -> Result<(), ScriptError> {
        let rgb = vec3_arg(rgb)?;
        self.edit(|light| light.color = lighting::opaque(rgb));
        Ok(())
    }

    /// Replace the intensity
    pub fn update_intensity(&self, intensity: f32) {
        self.edit(|light| light.intensity = intensity);
    }

    /// Replace the radius
    pub fn update_radius(&self, radius: f32) {
        self.edit(|light| light.radius = radius);
    }
}

/// Script view of an entity's directional light
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    handle: ComponentHandle,
}

impl DirectionalLight {
    /// Replace the light direction
    ///
    /// # Errors
    /// [`ScriptError::Vector`] unless `direction` has 3 components.
    pub fn update_direction(&self, direction: &Vector) -> Result<(), ScriptError> {
        let direction = vec3_arg(direction)?;
        self.handle
            .write(|world, id| world.directional_light_mut(id).map(|light| light.direction = direction));
        Ok(())
    }

    /// Replace the RGB color; alpha stays 1
    ///
    /// # Errors
    /// [`ScriptError::Vector`] unless `rgb` has 3 components.
    pub fn update_color(&self, rgb: &Vector) -> Result<(), ScriptError> {
        let rgb = vec3_arg(rgb)?;
        self.handle
            .write(|world, id| world.directional_light_mut(id).map(|light| light.color = lighting::opaque(rgb)));
        Ok(())
    }

    /// Replace the intensity
    pub fn update_intensity(&self, intensity: f32) {
        self.handle
            .write(|world, id| world.directional_light_mut(id).map(|light| light.intensity = intensity));
    }
}
