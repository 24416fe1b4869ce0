//! Fly camera
//!
//! Keyboard movement and mouse look for a perspective camera entity. All
//! state that persists between frames lives in [`FlyCameraState`]; the
//! [`FlyCameraScript`] only binds that state to a camera controller.
//!
//! | Key | Movement |
//! |-----|----------|
//! | W / S | against / along `up` |
//! | A / D | along / against `normalize(front x up)` |
//! | Q / E | against / along `front` |

use crate::core::config::FlyCameraConfig;
use crate::foundation::math::utils;
use crate::foundation::vector::{self, Vector, VectorError};
use crate::input::{InputSource, KeyCode};

use super::{PerspectiveCameraController, Script, ScriptContext, ScriptError};

/// Camera state carried from one frame to the next
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCameraState {
    /// World units per second
    pub speed: f32,
    /// Degrees of rotation per unit of mouse movement
    pub sensitivity: f32,
    /// Pitch bound in degrees
    pub pitch_limit: f32,
    /// Camera position
    pub position: Vector,
    /// Viewing direction
    pub front: Vector,
    /// Camera up vector
    pub up: Vector,
    /// Accumulated yaw in degrees
    pub yaw: f32,
    /// Accumulated pitch in degrees
    pub pitch: f32,
    /// Cursor position seen on the previous frame
    pub last_mouse: Option<(f64, f64)>,
    /// Key that must be held for look and movement
    pub look_key: Option<KeyCode>,
}

impl FlyCameraState {
    /// Initial state from configuration
    ///
    /// Yaw and pitch are derived from the configured front vector so the
    /// first frame does not snap the view.
    #[must_use]
    pub fn from_config(config: &FlyCameraConfig) -> Self {
        // Angles start from the configured front rather than zero, so a
        // front other than +X is kept on the first mouse delta.
        let [x, y, z] = config.front;
        let horizontal = x.hypot(z);
        let pitch = utils::rad_to_deg(y.atan2(horizontal));
        let yaw = utils::rad_to_deg(z.atan2(x));

        Self {
            speed: config.speed,
            sensitivity: config.sensitivity,
            pitch_limit: config.pitch_limit,
            position: Vector::from(config.position),
            front: Vector::from(config.front),
            up: Vector::from(config.up),
            yaw,
            pitch: utils::clamp(pitch, -config.pitch_limit, config.pitch_limit),
            last_mouse: None,
            look_key: config.look_key,
        }
    }

    /// Position delta for this frame's held keys
    ///
    /// # Errors
    /// [`VectorError::InvalidArgument`] when sideways movement is requested
    /// and `front` is parallel to `up`.
    pub fn movement(&self, input: &dyn InputSource, delta: f32) -> Result<Vector, VectorError> {
        let step = self.speed * delta;
        let mut movement = Vector::zeros(3);

        if input.is_key_down(KeyCode::W) {
            movement = &movement - &(&self.up * step);
        }
        if input.is_key_down(KeyCode::S) {
            movement = &movement + &(&self.up * step);
        }

        let strafe_left = input.is_key_down(KeyCode::A);
        let strafe_right = input.is_key_down(KeyCode::D);
        if strafe_left || strafe_right {
            let side = vector::normalize(&vector::cross(&self.front, &self.up)?)?;
            if strafe_left {
                movement = &movement + &(&side * step);
            }
            if strafe_right {
                movement = &movement - &(&side * step);
            }
        }

        if input.is_key_down(KeyCode::Q) {
            movement = &movement - &(&self.front * step);
        }
        if input.is_key_down(KeyCode::E) {
            movement = &movement + &(&self.front * step);
        }
        Ok(movement)
    }

    /// Apply one frame of movement and mouse look
    ///
    /// Returns `false` when a look key is configured but not held; only the
    /// cursor position is tracked then.
    ///
    /// # Errors
    /// Propagates vector kernel failures from [`Self::movement`].
    pub fn update(&mut self, input: &dyn InputSource, delta: f32) -> Result<bool, VectorError> {
        let (x, y) = input.mouse_coordinates();
        // The first sample only seeds tracking; measuring it against (0, 0)
        // would turn the initial cursor position into a large jump.
        let (last_x, last_y) = self.last_mouse.unwrap_or((x, y));
        self.last_mouse = Some((x, y));

        if let Some(key) = self.look_key {
            if !input.is_key_down(key) {
                return Ok(false);
            }
        }

        let movement = self.movement(input, delta)?;
        self.position = &self.position + &movement;

        #[allow(clippy::cast_possible_truncation)]
        let (dx, dy) = ((x - last_x) as f32, (y - last_y) as f32);
        self.yaw += dx * self.sensitivity;
        self.pitch = utils::clamp(self.pitch - dy * self.sensitivity, -self.pitch_limit, self.pitch_limit);
        self.front = self.look_direction()?;
        Ok(true)
    }

    /// Unit front vector for the current yaw and pitch
    ///
    /// # Errors
    /// Never fails for finite angles; kept fallible to surface NaN input.
    pub fn look_direction(&self) -> Result<Vector, VectorError> {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        vector::normalize(&Vector::new([
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        ]))
    }
}

/// Script driving a perspective camera entity as a fly camera
pub struct FlyCameraScript {
    camera_entity: String,
    state: FlyCameraState,
    controller: Option<PerspectiveCameraController>,
}

impl FlyCameraScript {
    /// Script configured from `config`
    #[must_use]
    pub fn new(config: &FlyCameraConfig) -> Self {
        Self {
            camera_entity: config.camera_entity.clone(),
            state: FlyCameraState::from_config(config),
            controller: None,
        }
    }

    /// Current camera state
    #[must_use]
    pub fn state(&self) -> &FlyCameraState {
        &self.state
    }
}

impl Script for FlyCameraScript {
    fn name(&self) -> &str {
        "fly_camera"
    }

    fn on_create(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        let entity = ctx
            .get_entity_by_name(&self.camera_entity)
            .ok_or_else(|| ScriptError::InvalidHandle(format!("no entity named '{}'", self.camera_entity)))?;
        let controller = PerspectiveCameraController::new(&entity)?;
        controller.update_up(&self.state.up)?;
        controller.update_position(&self.state.position)?;
        controller.update_front(&self.state.front)?;
        self.controller = Some(controller);
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut ScriptContext<'_>, delta: f32) -> Result<(), ScriptError> {
        let Some(controller) = &self.controller else {
            return Err(ScriptError::InvalidHandle("fly camera has no controller".to_string()));
        };
        if self.state.update(ctx.input(), delta)? {
            controller.update_position(&self.state.position)?;
            controller.update_front(&self.state.front)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::input::InputState;
    use approx::assert_relative_eq;

    fn state() -> FlyCameraState {
        FlyCameraState::from_config(&FlyCameraConfig::default())
    }

    #[test]
    fn test_w_moves_against_up() {
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::W, true);
        let movement = state().movement(&input, 0.1).expect("movement");
        assert_relative_eq!(movement.to_vec3().expect("3d"), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        for key in [KeyCode::W, KeyCode::S, KeyCode::A, KeyCode::D, KeyCode::Q, KeyCode::E] {
            input.handle_key_input(key, true);
        }
        let movement = state().movement(&input, 0.5).expect("movement");
        assert_relative_eq!(movement.magnitude(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_strafe_is_unit_speed() {
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::A, true);
        let movement = state().movement(&input, 0.1).expect("movement");
        assert_relative_eq!(movement.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_initial_angles_reproduce_front() {
        let state = state();
        let expected = vector::normalize(&state.front).expect("non-zero").to_vec3().expect("3d");
        let front = state.look_direction().expect("direction").to_vec3().expect("3d");
        assert_relative_eq!(front, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_first_frame_has_no_mouse_delta() {
        let mut state = state();
        let yaw = state.yaw;
        let mut input = InputState::new();
        input.handle_mouse_move(640.0, 360.0);
        assert!(state.update(&input, 0.016).expect("update"));
        assert_relative_eq!(state.yaw, yaw);

        input.handle_mouse_move(650.0, 360.0);
        state.update(&input, 0.016).expect("update");
        assert_relative_eq!(state.yaw, yaw + 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_clamps_exactly() {
        let mut state = state();
        let mut input = InputState::new();
        state.update(&input, 0.016).expect("seed");
        for step in 1..=20 {
            input.handle_mouse_move(0.0, -15.0 * f64::from(step));
            state.update(&input, 0.016).expect("update");
        }
        assert_eq!(state.pitch, 89.0);

        input.handle_mouse_move(0.0, 1000.0);
        state.update(&input, 0.016).expect("update");
        assert_eq!(state.pitch, -89.0);
    }

    #[test]
    fn test_look_key_gates_motion() {
        let mut config = FlyCameraConfig::default();
        config.look_key = Some(KeyCode::X);
        let mut state = FlyCameraState::from_config(&config);
        let start = state.position.clone();

        let mut input = InputState::new();
        input.handle_key_input(KeyCode::W, true);
        input.handle_mouse_move(10.0, 10.0);
        assert!(!state.update(&input, 0.1).expect("update"));
        assert_eq!(state.position, start);
        assert_eq!(state.last_mouse, Some((10.0, 10.0)));

        input.handle_key_input(KeyCode::X, true);
        assert!(state.update(&input, 0.1).expect("update"));
        assert_relative_eq!(state.position[1], start[1] + 1.0, epsilon = 1e-5);
    }
}
