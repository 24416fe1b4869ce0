//! Scene world
//!
//! Owns every entity and component. Entities live in a [`SlotMap`], and each
//! component kind has its own [`SecondaryMap`] keyed by the entity id, so a
//! stale id resolves to nothing in every store at once.
//!
//! Entities also form a tree. Each record keeps its parent and its children in
//! insertion order; removing an entity removes its whole subtree.

use slotmap::{SecondaryMap, SlotMap};

use super::component::{ComponentKind, ComponentMask};
use super::components::{
    CubeComponent, DirectionalLightComponent, MaterialComponent, MaterialInfo, MaterialStorage,
    OrthographicCamera, OrthographicCameraComponent, PerspectiveCamera, PerspectiveCameraComponent,
    PointLightComponent, QuadComponent, SharedCamera, TransformComponent,
};
use super::entity::EntityId;

#[derive(Debug)]
struct EntityRecord {
    name: String,
    mask: ComponentMask,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

/// Scene world containing all entities and components
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<EntityId, EntityRecord>,
    transforms: SecondaryMap<EntityId, TransformComponent>,
    materials: SecondaryMap<EntityId, MaterialComponent>,
    point_lights: SecondaryMap<EntityId, PointLightComponent>,
    directional_lights: SecondaryMap<EntityId, DirectionalLightComponent>,
    perspective_cameras: SecondaryMap<EntityId, PerspectiveCameraComponent>,
    orthographic_cameras: SecondaryMap<EntityId, OrthographicCameraComponent>,
    quads: SecondaryMap<EntityId, QuadComponent>,
    cubes: SecondaryMap<EntityId, CubeComponent>,
    material_storage: MaterialStorage,
}

impl World {
    /// Create an empty world
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named root entity with no components
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let name = name.into();
        log::debug!("Creating entity '{}'", name);
        self.entities.insert(EntityRecord {
            name,
            mask: ComponentMask::empty(),
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create a named entity under `parent`
    ///
    /// A stale parent is reported and the entity becomes a root instead.
    pub fn create_child(&mut self, parent: EntityId, name: impl Into<String>) -> EntityId {
        let name = name.into();
        if !self.contains(parent) {
            log::warn!("Parent {:?} of '{}' does not exist, adding it as a root", parent, name);
            return self.create_entity(name);
        }
        let id = self.create_entity(name);
        self.link(parent, id);
        id
    }

    /// Move an entity under a new parent
    ///
    /// Returns `false` if either id is stale or `new_parent` lies in the
    /// subtree of `child`, which would close a cycle.
    pub fn reparent(&mut self, child: EntityId, new_parent: EntityId) -> bool {
        if !self.contains(child) || !self.contains(new_parent) {
            return false;
        }
        if self.is_ancestor_or_self(child, new_parent) {
            log::warn!("Cannot move {:?} under its own subtree {:?}", child, new_parent);
            return false;
        }
        self.unlink(child);
        self.link(new_parent, child);
        log::debug!("Moved entity {:?} under {:?}", child, new_parent);
        true
    }

    /// Parent of an entity, `None` for roots and stale ids
    #[must_use]
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(id).and_then(|record| record.parent)
    }

    /// Direct children of an entity in insertion order
    #[must_use]
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities
            .get(id)
            .map(|record| record.children.as_slice())
            .unwrap_or_default()
    }

    /// Remove an entity, its descendants and all of their components
    ///
    /// Returns `false` if the id was already stale.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.unlink(id);

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(mask) = self.mask(current) else {
                continue;
            };
            for kind in mask.kinds() {
                self.detach(current, kind);
            }
            if let Some(record) = self.entities.remove(current) {
                log::debug!("Removed entity {:?} '{}'", current, record.name);
                pending.extend(record.children);
            }
        }
        true
    }

    fn link(&mut self, parent: EntityId, child: EntityId) {
        if let Some(record) = self.entities.get_mut(child) {
            record.parent = Some(parent);
        }
        if let Some(record) = self.entities.get_mut(parent) {
            record.children.push(child);
        }
    }

    fn unlink(&mut self, child: EntityId) {
        let Some(parent) = self.entities.get_mut(child).and_then(|record| record.parent.take()) else {
            return;
        };
        if let Some(record) = self.entities.get_mut(parent) {
            record.children.retain(|&id| id != child);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether the id refers to a live entity
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Find a live entity by name
    ///
    /// With duplicate names the entity in the lowest slot wins.
    #[must_use]
    pub fn entity_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, record)| record.name == name)
            .map(|(id, _)| id)
    }

    /// Name of a live entity
    #[must_use]
    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(id).map(|record| record.name.as_str())
    }

    /// Iterate over live entity ids
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys()
    }

    /// Number of live entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Component kinds attached to an entity
    #[must_use]
    pub fn mask(&self, id: EntityId) -> Option<ComponentMask> {
        self.entities.get(id).map(|record| record.mask)
    }

    /// Whether an entity carries a component kind
    #[must_use]
    pub fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.mask(id).is_some_and(|mask| mask.contains(kind.mask()))
    }

    /// Attach a default-initialized component
    ///
    /// Returns `false` if the id is stale or the kind is already attached.
    pub fn add_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        let Some(record) = self.entities.get_mut(id) else {
            return false;
        };
        if record.mask.contains(kind.mask()) {
            return false;
        }
        record.mask.insert(kind.mask());

        match kind {
            ComponentKind::Transform => {
                self.transforms.insert(id, TransformComponent::identity());
            }
            ComponentKind::Material => {
                let material = self.material_storage.insert(MaterialInfo::default());
                self.materials.insert(id, MaterialComponent { material });
            }
            ComponentKind::DirectionalLight => {
                self.directional_lights.insert(id, DirectionalLightComponent::default());
            }
            ComponentKind::PointLight => {
                self.point_lights.insert(id, PointLightComponent::default());
            }
            ComponentKind::PerspectiveCamera => {
                self.perspective_cameras.insert(id, PerspectiveCameraComponent::default());
            }
            ComponentKind::OrthographicCamera => {
                self.orthographic_cameras.insert(id, OrthographicCameraComponent::default());
            }
            ComponentKind::Quad => {
                self.quads.insert(id, QuadComponent);
            }
            ComponentKind::Cube => {
                self.cubes.insert(id, CubeComponent);
            }
        }
        log::debug!("Added {} to entity {:?}", kind, id);
        true
    }

    /// Detach a component
    ///
    /// Returns `false` if the id is stale or the kind is not attached.
    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        let Some(record) = self.entities.get_mut(id) else {
            return false;
        };
        if !record.mask.contains(kind.mask()) {
            return false;
        }
        record.mask.remove(kind.mask());
        self.detach(id, kind);
        log::debug!("Removed {} from entity {:?}", kind, id);
        true
    }

    fn detach(&mut self, id: EntityId, kind: ComponentKind) {
        match kind {
            ComponentKind::Transform => {
                self.transforms.remove(id);
            }
            ComponentKind::Material => {
                if let Some(component) = self.materials.remove(id) {
                    self.material_storage.remove(component.material);
                }
            }
            ComponentKind::DirectionalLight => {
                self.directional_lights.remove(id);
            }
            ComponentKind::PointLight => {
                self.point_lights.remove(id);
            }
            ComponentKind::PerspectiveCamera => {
                self.perspective_cameras.remove(id);
            }
            ComponentKind::OrthographicCamera => {
                self.orthographic_cameras.remove(id);
            }
            ComponentKind::Quad => {
                self.quads.remove(id);
            }
            ComponentKind::Cube => {
                self.cubes.remove(id);
            }
        }
    }

    /// Transform of an entity
    #[must_use]
    pub fn transform(&self, id: EntityId) -> Option<&TransformComponent> {
        self.transforms.get(id)
    }

    /// Mutable transform of an entity
    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut TransformComponent> {
        self.transforms.get_mut(id)
    }

    /// Point light of an entity
    #[must_use]
    pub fn point_light(&self, id: EntityId) -> Option<&PointLightComponent> {
        self.point_lights.get(id)
    }

    /// Mutable point light of an entity
    pub fn point_light_mut(&mut self, id: EntityId) -> Option<&mut PointLightComponent> {
        self.point_lights.get_mut(id)
    }

    /// Directional light of an entity
    #[must_use]
    pub fn directional_light(&self, id: EntityId) -> Option<&DirectionalLightComponent> {
        self.directional_lights.get(id)
    }

    /// Mutable directional light of an entity
    pub fn directional_light_mut(&mut self, id: EntityId) -> Option<&mut DirectionalLightComponent> {
        self.directional_lights.get_mut(id)
    }

    /// Material component of an entity
    #[must_use]
    pub fn material(&self, id: EntityId) -> Option<MaterialComponent> {
        self.materials.get(id).copied()
    }

    /// Material value storage
    #[must_use]
    pub fn material_storage(&self) -> &MaterialStorage {
        &self.material_storage
    }

    /// Mutable material value storage
    pub fn material_storage_mut(&mut self) -> &mut MaterialStorage {
        &mut self.material_storage
    }

    /// Shared perspective camera of an entity
    #[must_use]
    pub fn perspective_camera(&self, id: EntityId) -> Option<SharedCamera<PerspectiveCamera>> {
        self.perspective_cameras.get(id).map(|component| component.camera.clone())
    }

    /// Shared orthographic camera of an entity
    #[must_use]
    pub fn orthographic_camera(&self, id: EntityId) -> Option<SharedCamera<OrthographicCamera>> {
        self.orthographic_cameras.get(id).map(|component| component.camera.clone())
    }
}
