//! Script-side entity handle
//!
//! An [`Entity`] is a weak reference to a node in the scene. The engine may
//! destroy the node or the whole scene at any frame boundary; after that every
//! mutator is a no-op and every query returns a sentinel.

use std::rc::Rc;

use crate::ecs::{ComponentKind, EntityId, World, NULL_ENTITY_ID};

use super::components::{AnyComponent, ComponentHandle, ComponentView};
use super::{ScriptError, WorldRef};

/// Name reported by a handle that no longer resolves
pub const NULL_ENTITY_NAME: &str = "null entity";

/// Handle to one scene node
#[derive(Debug, Clone)]
pub struct Entity {
    world: WorldRef,
    id: EntityId,
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.world.ptr_eq(&other.world)
    }
}

impl Eq for Entity {}

impl Entity {
    pub(crate) fn from_id(world: WorldRef, id: EntityId) -> Self {
        Self { world, id }
    }

    /// Create a new named entity in the scene
    ///
    /// # Errors
    /// [`ScriptError::InvalidHandle`] when the scene no longer exists.
    pub fn create(world: &WorldRef, name: &str) -> Result<Self, ScriptError> {
        let scene = world
            .upgrade()
            .ok_or_else(|| ScriptError::InvalidHandle(format!("cannot create '{name}': scene is gone")))?;
        let id = scene
            .try_borrow_mut()
            .map_err(|_| ScriptError::InvalidHandle(format!("cannot create '{name}': scene is busy")))?
            .create_entity(name);
        Ok(Self::from_id(world.clone(), id))
    }

    /// Create a named child of this node
    ///
    /// If this handle is stale the child is added as a root.
    ///
    /// # Errors
    /// [`ScriptError::InvalidHandle`] when the scene no longer exists.
    pub fn create_child(&self, name: &str) -> Result<Self, ScriptError> {
        let scene = self
            .world
            .upgrade()
            .ok_or_else(|| ScriptError::InvalidHandle(format!("cannot create '{name}': scene is gone")))?;
        let id = scene
            .try_borrow_mut()
            .map_err(|_| ScriptError::InvalidHandle(format!("cannot create '{name}': scene is busy")))?
            .create_child(self.id, name);
        Ok(Self::from_id(self.world.clone(), id))
    }

    /// Look up an entity by name
    #[must_use]
    pub fn get_by_name(world: &WorldRef, name: &str) -> Option<Self> {
        let scene = world.upgrade()?;
        let id = scene.try_borrow().ok()?.entity_by_name(name)?;
        Some(Self::from_id(world.clone(), id))
    }

    /// Look up an entity by the id reported from [`Entity::get_id`]
    #[must_use]
    pub fn get_by_id(world: &WorldRef, id: u64) -> Option<Self> {
        let id = EntityId::from_bits(id);
        let scene = world.upgrade()?;
        let live = scene.try_borrow().ok()?.contains(id);
        live.then(|| Self::from_id(world.clone(), id))
    }

    pub(crate) fn with_scene<R>(&self, f: impl FnOnce(&mut World, EntityId) -> R) -> Option<R> {
        let scene: Rc<_> = self.world.upgrade()?;
        let Ok(mut world) = scene.try_borrow_mut() else {
            log::warn!("World is borrowed, operation on entity {:?} skipped", self.id);
            return None;
        };
        if !world.contains(self.id) {
            return None;
        }
        Some(f(&mut world, self.id))
    }

    /// Whether the handle still refers to a live node
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.with_scene(|_, _| ()).is_some()
    }

    /// Engine-side identifier
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Node name, or `"null entity"` for an invalid handle
    #[must_use]
    pub fn get_name(&self) -> String {
        self.with_scene(|world, id| world.name(id).map(str::to_string))
            .flatten()
            .unwrap_or_else(|| NULL_ENTITY_NAME.to_string())
    }

    /// 64-bit node id, or [`NULL_ENTITY_ID`] for an invalid handle
    #[must_use]
    pub fn get_id(&self) -> u64 {
        self.with_scene(|_, id| id.to_bits()).unwrap_or(NULL_ENTITY_ID)
    }

    /// Parent node, `None` for roots and invalid handles
    #[must_use]
    pub fn get_parent(&self) -> Option<Self> {
        let parent = self.with_scene(|world, id| world.parent(id)).flatten()?;
        Some(Self::from_id(self.world.clone(), parent))
    }

    /// Direct children in creation order
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.with_scene(|world, id| world.children(id).to_vec())
            .unwrap_or_default()
            .into_iter()
            .map(|child| Self::from_id(self.world.clone(), child))
            .collect()
    }

    /// Move this node, with its subtree, under `new_parent`
    ///
    /// Returns `false` if either handle is invalid or `new_parent` lies in
    /// this node's subtree.
    pub fn move_to(&self, new_parent: &Self) -> bool {
        if !self.world.ptr_eq(&new_parent.world) {
            log::warn!("Cannot move entity {:?} into another scene", self.id);
            return false;
        }
        let target = new_parent.id;
        self.with_scene(|world, id| world.reparent(id, target))
            .unwrap_or(false)
    }

    /// Attach a default component; already present kinds are left alone
    pub fn add_component(&self, kind: ComponentKind) {
        self.with_scene(|world, id| world.add_component(id, kind));
    }

    /// Detach a component
    pub fn remove_component(&self, kind: ComponentKind) {
        self.with_scene(|world, id| world.remove_component(id, kind));
    }

    /// Attach a component named by its string key
    ///
    /// # Errors
    /// [`ScriptError::UnknownComponent`] when the key names no kind.
    pub fn add_component_by_key(&self, key: &str) -> Result<(), ScriptError> {
        self.add_component(key.parse()?);
        Ok(())
    }

    /// Detach a component named by its string key
    ///
    /// # Errors
    /// [`ScriptError::UnknownComponent`] when the key names no kind.
    pub fn remove_component_by_key(&self, key: &str) -> Result<(), ScriptError> {
        self.remove_component(key.parse()?);
        Ok(())
    }

    /// Whether the node carries a component kind
    #[must_use]
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.with_scene(|world, id| world.has_component(id, kind))
            .unwrap_or(false)
    }

    /// View of an attached component
    ///
    /// Returns `None` when the handle is invalid, the kind is not attached or
    /// scripts cannot view the kind.
    #[must_use]
    pub fn get_component(&self, kind: ComponentKind) -> Option<AnyComponent> {
        if !self.has_component(kind) {
            log::warn!("Entity '{}' has no {} component", self.get_name(), kind);
            return None;
        }
        AnyComponent::from_handle(ComponentHandle::new(self.world.clone(), self.id, kind))
    }

    /// View of a component named by its string key
    ///
    /// # Errors
    /// [`ScriptError::UnknownComponent`] when the key names no kind.
    pub fn get_component_by_key(&self, key: &str) -> Result<Option<AnyComponent>, ScriptError> {
        Ok(self.get_component(key.parse()?))
    }

    /// Typed view of an attached component
    #[must_use]
    pub fn component<V: ComponentView>(&self) -> Option<V> {
        self.has_component(V::KIND)
            .then(|| V::from_handle(ComponentHandle::new(self.world.clone(), self.id, V::KIND)))
    }

    /// Remove the node and its subtree from the scene and invalidate this handle
    ///
    /// Other handles to the same node or any descendant become invalid at once.
    pub fn remove_from_tree(&mut self) {
        self.with_scene(|world, id| world.remove_entity(id));
        self.id = EntityId::default();
    }
}
