//! Camera controllers
//!
//! A controller binds to the camera object of one camera entity and pushes
//! parameters into it. It holds a shared reference to the camera, so it keeps
//! working (on a camera nobody renders) after the entity is removed. Every
//! setter recomputes the camera's view and projection matrices.

use crate::ecs::components::{OrthographicCamera, PerspectiveCamera, SharedCamera};
use crate::foundation::math::Vec3;
use crate::foundation::Vector;

use super::{Entity, ScriptError};

fn vec3_arg(vector: &Vector, what: &str) -> Result<Vec3, ScriptError> {
    vector
        .to_vec3()
        .map_err(|_| ScriptError::InvalidArgument(format!("{what} needs 3 components, got {}", vector.len())))
}

/// Controller for a perspective camera entity
///
/// Parameters only flow into the camera; the controller never hands the
/// camera object back to scripts.
///
/// ```compile_fail
/// use std::rc::Rc;
/// use script_bridge::ecs::ComponentKind;
/// use script_bridge::scripting::{shared_world, Entity, PerspectiveCameraController};
///
/// let world = shared_world();
/// let camera = Entity::create(&Rc::downgrade(&world), "Camera").unwrap();
/// camera.add_component(ComponentKind::PerspectiveCamera);
/// let controller = PerspectiveCameraController::new(&camera).unwrap();
/// let _ = controller.camera();
/// ```
#[derive(Debug, Clone)]
pub struct PerspectiveCameraController {
    camera: SharedCamera<PerspectiveCamera>,
}

impl PerspectiveCameraController {
    /// Bind to the perspective camera carried by `entity`
    ///
    /// # Errors
    /// [`ScriptError::InvalidHandle`] when the entity is invalid or has no
    /// perspective camera.
    pub fn new(entity: &Entity) -> Result<Self, ScriptError> {
        let camera = entity.with_scene(|world, id| world.perspective_camera(id)).flatten().ok_or_else(|| {
            ScriptError::InvalidHandle(format!("'{}' has no perspective camera", entity.get_name()))
        })?;
        log::debug!("Perspective camera controller bound to '{}'", entity.get_name());
        Ok(Self { camera })
    }

    #[cfg(test)]
    pub(crate) fn camera(&self) -> &SharedCamera<PerspectiveCamera> {
        &self.camera
    }

    fn apply(&self, f: impl FnOnce(&mut PerspectiveCamera)) {
        let Ok(mut camera) = self.camera.try_borrow_mut() else {
            log::warn!("Camera is borrowed elsewhere, update skipped");
            return;
        };
        f(&mut *camera);
        camera.update_view_projection();
    }

    /// Set the vertical field of view in degrees
    pub fn set_fov(&self, fov: f32) {
        self.apply(|camera| camera.fov = fov);
    }

    /// Set the aspect ratio
    pub fn set_aspect_ratio(&self, aspect_ratio: f32) {
        self.apply(|camera| camera.aspect_ratio = aspect_ratio);
    }

    /// Set the near plane distance
    pub fn set_near(&self, near: f32) {
        self.apply(|camera| camera.near = near);
    }

    /// Set the far plane distance
    pub fn set_far(&self, far: f32) {
        self.apply(|camera| camera.far = far);
    }

    /// Set the camera position
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] unless `position` has 3 components.
    pub fn update_position(&self, position: &Vector) -> Result<(), ScriptError> {
        let position = vec3_arg(position, "position")?;
        self.apply(|camera| camera.position = position);
        Ok(())
    }

    /// Set the camera up vector
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] unless `up` has 3 components.
    pub fn update_up(&self, up: &Vector) -> Result<(), ScriptError> {
        let up = vec3_arg(up, "up")?;
        self.apply(|camera| camera.up = up);
        Ok(())
    }

    /// Set the viewing direction
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] unless `front` has 3 components.
    pub fn update_front(&self, front: &Vector) -> Result<(), ScriptError> {
        let front = vec3_arg(front, "front")?;
        self.apply(|camera| camera.front = front);
        Ok(())
    }
}

/// Controller for an orthographic camera entity
#[derive(Debug, Clone)]
pub struct OrthographicCameraController {
    camera: SharedCamera<OrthographicCamera>,
}

impl OrthographicCameraController {
    /// Bind to the orthographic camera carried by `entity`
    ///
    /// # Errors
    /// [`ScriptError::InvalidHandle`] when the entity is invalid or has no
    /// orthographic camera.
    pub fn new(entity: &Entity) -> Result<Self, ScriptError> {
        let camera = entity.with_scene(|world, id| world.orthographic_camera(id)).flatten().ok_or_else(|| {
            ScriptError::InvalidHandle(format!("'{}' has no orthographic camera", entity.get_name()))
        })?;
        log::debug!("Orthographic camera controller bound to '{}'", entity.get_name());
        Ok(Self { camera })
    }

    #[cfg(test)]
    pub(crate) fn camera(&self) -> &SharedCamera<OrthographicCamera> {
        &self.camera
    }

    fn apply(&self, f: impl FnOnce(&mut OrthographicCamera)) {
        let Ok(mut camera) = self.camera.try_borrow_mut() else {
            log::warn!("Camera is borrowed elsewhere, update skipped");
            return;
        };
        f(&mut *camera);
        camera.update_view_projection();
    }

    /// Set the left clipping plane
    pub fn set_left(&self, left: f32) {
        self.apply(|camera| camera.left = left);
    }

    /// Set the right clipping plane
    pub fn set_right(&self, right: f32) {
        self.apply(|camera| camera.right = right);
    }

    /// Set the top clipping plane
    pub fn set_top(&self, top: f32) {
        self.apply(|camera| camera.top = top);
    }

    /// Set the bottom clipping plane
    pub fn set_bottom(&self, bottom: f32) {
        self.apply(|camera| camera.bottom = bottom);
    }

    /// Set the camera position
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] unless `position` has 3 components.
    pub fn update_position(&self, position: &Vector) -> Result<(), ScriptError> {
        let position = vec3_arg(position, "position")?;
        self.apply(|camera| camera.position = position);
        Ok(())
    }

    /// Set the camera up vector
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] unless `up` has 3 components.
    pub fn update_up(&self, up: &Vector) -> Result<(), ScriptError> {
        let up = vec3_arg(up, "up")?;
        self.apply(|camera| camera.up = up);
        Ok(())
    }

    /// Set the viewing direction
    ///
    /// # Errors
    /// [`ScriptError::InvalidArgument`] unless `front` has 3 components.
    pub fn update_front(&self, front: &Vector) -> Result<(), ScriptError> {
        let front = vec3_arg(front, "front")?;
        self.apply(|camera| camera.front = front);
        Ok(())
    }
}
