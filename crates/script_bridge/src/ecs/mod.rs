//! Engine-side scene storage
//!
//! The [`World`] is the single owner of entities and their components.
//! Scripts never hold component data directly; they go through the handles
//! in [`crate::scripting`].

pub mod component;
pub mod components;
pub mod entity;
pub mod world;

pub use component::{ComponentKind, ComponentMask, UnknownComponentKind};
pub use entity::{EntityId, NULL_ENTITY_ID};
pub use world::World;
