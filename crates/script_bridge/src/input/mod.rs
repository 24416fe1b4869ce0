//! Input polling interface consumed by scripts
//!
//! The windowing layer owns the real device state; scripts only poll it
//! through [`InputSource`]. [`InputState`] is an in-memory source that hosts
//! feed from their event loop (or from recorded input in headless runs).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Polling interface for keyboard and mouse state
pub trait InputSource {
    /// Key is currently held
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Key went down this frame
    fn is_key_pressed(&self, key: KeyCode) -> bool;

    /// Key went up this frame
    fn is_key_released(&self, key: KeyCode) -> bool;

    /// Mouse button is currently held
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Cursor position in window coordinates
    fn mouse_coordinates(&self) -> (f64, f64);

    /// Scroll offset accumulated this frame
    fn scroll_wheel(&self) -> (f64, f64);
}

/// In-memory input state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_down_last_frame: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f64, f64),
    scroll: (f64, f64),
}

impl InputState {
    /// Create an input state with nothing held
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
    }

    /// Handle scroll wheel movement
    pub fn handle_scroll(&mut self, dx: f64, dy: f64) {
        self.scroll.0 += dx;
        self.scroll.1 += dy;
    }

    /// Close the current frame: edge detection restarts and scroll resets
    pub fn end_frame(&mut self) {
        self.keys_down_last_frame.clone_from(&self.keys_down);
        self.scroll = (0.0, 0.0);
    }
}

impl InputSource for InputState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key) && !self.keys_down_last_frame.contains(&key)
    }

    fn is_key_released(&self, key: KeyCode) -> bool {
        !self.keys_down.contains(&key) && self.keys_down_last_frame.contains(&key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    fn mouse_coordinates(&self) -> (f64, f64) {
        self.mouse_position
    }

    fn scroll_wheel(&self) -> (f64, f64) {
        self.scroll
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Left shift
    LeftShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_edges_follow_frames() {
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::W, true);
        assert!(input.is_key_down(KeyCode::W));
        assert!(input.is_key_pressed(KeyCode::W));

        input.end_frame();
        assert!(input.is_key_down(KeyCode::W));
        assert!(!input.is_key_pressed(KeyCode::W));

        input.handle_key_input(KeyCode::W, false);
        assert!(input.is_key_released(KeyCode::W));
        input.end_frame();
        assert!(!input.is_key_released(KeyCode::W));
    }

    #[test]
    fn test_scroll_resets_each_frame() {
        let mut input = InputState::new();
        input.handle_scroll(0.0, 1.0);
        input.handle_scroll(0.0, 2.0);
        assert_eq!(input.scroll_wheel(), (0.0, 3.0));
        input.end_frame();
        assert_eq!(input.scroll_wheel(), (0.0, 0.0));
    }

    #[test]
    fn test_mouse_state() {
        let mut input = InputState::new();
        input.handle_mouse_move(120.0, 45.5);
        input.handle_mouse_button(MouseButton::Right, true);
        assert_eq!(input.mouse_coordinates(), (120.0, 45.5));
        assert!(input.is_mouse_button_down(MouseButton::Right));
        assert!(!input.is_mouse_button_down(MouseButton::Left));
    }
}
