//! Script-facing bridge into the scene
//!
//! Scripts reach engine state only through the handles defined here:
//! [`Entity`] for scene nodes, the [`components`] views for component data
//! and the camera controllers for camera objects. Handles hold a weak
//! reference to the scene and re-resolve on every call.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::ecs::World;

pub mod camera_controller;
pub mod components;
pub mod entity;
pub mod error;
pub mod fly_camera;
pub mod script;

#[cfg(test)]
mod tests;

pub use camera_controller::{OrthographicCameraController, PerspectiveCameraController};
pub use components::{
    AnyComponent, ComponentHandle, ComponentView, DirectionalLight, Material, PointLight, Transform,
    INVALID_TRANSFORM,
};
pub use entity::{Entity, NULL_ENTITY_NAME};
pub use error::ScriptError;
pub use fly_camera::{FlyCameraScript, FlyCameraState};
pub use script::{FrameReport, Script, ScriptContext, ScriptHost, ScriptId, ScriptStatus};

/// Scene shared between the engine and scripts
pub type SharedWorld = Rc<RefCell<World>>;

/// Weak scene reference held by script handles
pub type WorldRef = Weak<RefCell<World>>;

/// Create an empty shared scene
#[must_use]
pub fn shared_world() -> SharedWorld {
    Rc::new(RefCell::new(World::new()))
}
