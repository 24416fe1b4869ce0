//! Camera components
//!
//! Camera objects are shared between the scene and script-side controllers,
//! so a controller keeps its camera alive even after the owning entity is
//! removed from the scene.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Camera object shared with controllers
pub type SharedCamera<T> = Rc<RefCell<T>>;

/// Perspective projection camera
///
/// The view and projection matrices are cached and only change through
/// [`PerspectiveCamera::update_view_projection`].
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height
    pub aspect_ratio: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// World space position
    pub position: Vec3,
    /// Viewing direction
    pub front: Vec3,
    /// Up vector
    pub up: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        let mut camera = Self {
            fov: 60.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::zeros(),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            view: Mat4::identity(),
            projection: Mat4::identity(),
        };
        camera.update_view_projection();
        camera
    }
}

impl PerspectiveCamera {
    /// Recompute the cached matrices from the current parameters
    pub fn update_view_projection(&mut self) {
        self.view = Mat4::look_to(self.position, self.front, self.up);
        self.projection = Mat4::perspective(utils::deg_to_rad(self.fov), self.aspect_ratio, self.near, self.far);
        log::trace!(
            "Perspective camera updated - position: {:?}, front: {:?}",
            self.position,
            self.front
        );
    }

    /// Cached view matrix
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Cached projection matrix
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Cached `projection * view`
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Orthographic projection camera
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Left clipping plane
    pub left: f32,
    /// Right clipping plane
    pub right: f32,
    /// Top clipping plane
    pub top: f32,
    /// Bottom clipping plane
    pub bottom: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// World space position
    pub position: Vec3,
    /// Viewing direction
    pub front: Vec3,
    /// Up vector
    pub up: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        let mut camera = Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::zeros(),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            view: Mat4::identity(),
            projection: Mat4::identity(),
        };
        camera.update_view_projection();
        camera
    }
}

impl OrthographicCamera {
    /// Recompute the cached matrices from the current parameters
    pub fn update_view_projection(&mut self) {
        self.view = Mat4::look_to(self.position, self.front, self.up);
        self.projection = Mat4::orthographic(self.left, self.right, self.bottom, self.top, self.near, self.far);
        log::trace!(
            "Orthographic camera updated - position: {:?}, front: {:?}",
            self.position,
            self.front
        );
    }

    /// Cached view matrix
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Cached projection matrix
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

/// Perspective camera attached to an entity
#[derive(Debug, Clone, Default)]
pub struct PerspectiveCameraComponent {
    /// Shared camera object
    pub camera: SharedCamera<PerspectiveCamera>,
}

/// Orthographic camera attached to an entity
#[derive(Debug, Clone, Default)]
pub struct OrthographicCameraComponent {
    /// Shared camera object
    pub camera: SharedCamera<OrthographicCamera>,
}
