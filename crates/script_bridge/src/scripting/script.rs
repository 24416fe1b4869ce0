//! Script lifecycle
//!
//! Scripts implement [`Script`] and are driven by a [`ScriptHost`]: the
//! creation hook runs once, the update hook every frame. A failing callback
//! is logged and counted but never stops the frame loop.

use std::rc::Rc;

use crate::core::config::HostConfig;
use crate::foundation::logging;
use crate::input::{InputSource, KeyCode, MouseButton};

use super::{Entity, ScriptError, SharedWorld, WorldRef};

/// Per-callback access to the scene, input and logging
pub struct ScriptContext<'a> {
    world: WorldRef,
    input: &'a dyn InputSource,
}

impl<'a> ScriptContext<'a> {
    /// Context over a scene and an input source
    #[must_use]
    pub fn new(world: &SharedWorld, input: &'a dyn InputSource) -> Self {
        Self {
            world: Rc::downgrade(world),
            input,
        }
    }

    /// Weak reference to the scene
    #[must_use]
    pub fn world(&self) -> &WorldRef {
        &self.world
    }

    /// Input source for this frame
    #[must_use]
    pub fn input(&self) -> &'a dyn InputSource {
        self.input
    }

    /// Look up an entity by name
    #[must_use]
    pub fn get_entity_by_name(&self, name: &str) -> Option<Entity> {
        Entity::get_by_name(&self.world, name)
    }

    /// Create a named entity
    ///
    /// # Errors
    /// [`ScriptError::InvalidHandle`] when the scene is gone.
    pub fn create_entity(&self, name: &str) -> Result<Entity, ScriptError> {
        Entity::create(&self.world, name)
    }

    /// Key is currently held
    #[must_use]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.input.is_key_down(key)
    }

    /// Key went down this frame
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.input.is_key_pressed(key)
    }

    /// Key went up this frame
    #[must_use]
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.input.is_key_released(key)
    }

    /// Mouse button is currently held
    #[must_use]
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.input.is_mouse_button_down(button)
    }

    /// Cursor position
    #[must_use]
    pub fn get_mouse_coordinates(&self) -> (f64, f64) {
        self.input.mouse_coordinates()
    }

    /// Scroll offset this frame
    #[must_use]
    pub fn get_scroll_wheel(&self) -> (f64, f64) {
        self.input.scroll_wheel()
    }

    /// Log an informational message under the script target
    pub fn log_info(&self, message: &str) {
        logging::script_info(message);
    }

    /// Log a warning under the script target
    pub fn log_warning(&self, message: &str) {
        logging::script_warning(message);
    }

    /// Log an error under the script target
    pub fn log_error(&self, message: &str) {
        logging::script_error(message);
    }
}

/// Per-frame script behavior
pub trait Script {
    /// Name used in log messages
    fn name(&self) -> &str;

    /// Called once before the first update
    ///
    /// # Errors
    /// A failure is logged by the host and the script is never updated.
    fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Called every frame with the elapsed seconds
    ///
    /// # Errors
    /// A failure is logged by the host; the next frame runs normally.
    fn on_update(&mut self, ctx: &mut ScriptContext<'_>, delta: f32) -> Result<(), ScriptError>;
}

/// Lifecycle state of a hosted script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Waiting for its creation hook
    Pending,
    /// Updated every frame
    Running,
    /// Creation hook failed; never updated
    CreateFailed,
    /// Too many consecutive update failures
    Disabled,
}

/// Index of a script inside its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptId(usize);

struct HostedScript {
    script: Box<dyn Script>,
    status: ScriptStatus,
    failures: u32,
    consecutive_failures: u32,
}

/// Outcome of one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Callbacks that completed
    pub succeeded: usize,
    /// Callbacks that returned an error
    pub failed: usize,
}

/// Owns scripts and drives their callbacks against one scene
pub struct ScriptHost {
    world: SharedWorld,
    scripts: Vec<HostedScript>,
    max_consecutive_failures: u32,
}

impl ScriptHost {
    /// Host for `world` with the given failure policy
    #[must_use]
    pub fn new(world: SharedWorld, config: &HostConfig) -> Self {
        Self {
            world,
            scripts: Vec::new(),
            max_consecutive_failures: config.max_consecutive_failures,
        }
    }

    /// Scene driven by this host
    #[must_use]
    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    /// Register a script; its creation hook runs on the next frame
    pub fn add_script(&mut self, script: Box<dyn Script>) -> ScriptId {
        log::info!("Registered script '{}'", script.name());
        self.scripts.push(HostedScript {
            script,
            status: ScriptStatus::Pending,
            failures: 0,
            consecutive_failures: 0,
        });
        ScriptId(self.scripts.len() - 1)
    }

    /// Number of hosted scripts
    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Whether no scripts are hosted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Lifecycle state of a script
    #[must_use]
    pub fn status(&self, id: ScriptId) -> Option<ScriptStatus> {
        self.scripts.get(id.0).map(|hosted| hosted.status)
    }

    /// Total failed callbacks of a script
    #[must_use]
    pub fn failure_count(&self, id: ScriptId) -> Option<u32> {
        self.scripts.get(id.0).map(|hosted| hosted.failures)
    }

    /// Run creation hooks of pending scripts
    pub fn create_pending(&mut self, input: &dyn InputSource) -> FrameReport {
        let mut report = FrameReport::default();
        let mut ctx = ScriptContext::new(&self.world, input);

        for hosted in self.scripts.iter_mut().filter(|h| h.status == ScriptStatus::Pending) {
            match hosted.script.on_create(&mut ctx) {
                Ok(()) => {
                    hosted.status = ScriptStatus::Running;
                    report.succeeded += 1;
                }
                Err(err) => {
                    log::error!("Script '{}' failed in on_create: {}", hosted.script.name(), err);
                    hosted.status = ScriptStatus::CreateFailed;
                    hosted.failures += 1;
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Run one frame: pending creation hooks, then every running update hook
    pub fn update(&mut self, input: &dyn InputSource, delta: f32) -> FrameReport {
        let mut report = self.create_pending(input);
        let mut ctx = ScriptContext::new(&self.world, input);
        let limit = self.max_consecutive_failures;

        for hosted in self.scripts.iter_mut().filter(|h| h.status == ScriptStatus::Running) {
            match hosted.script.on_update(&mut ctx, delta) {
                Ok(()) => {
                    hosted.consecutive_failures = 0;
                    report.succeeded += 1;
                }
                Err(err) => {
                    log::error!("Script '{}' failed in on_update: {}", hosted.script.name(), err);
                    hosted.failures += 1;
                    hosted.consecutive_failures += 1;
                    report.failed += 1;
                    if limit > 0 && hosted.consecutive_failures >= limit {
                        log::warn!(
                            "Script '{}' disabled after {} consecutive failures",
                            hosted.script.name(),
                            hosted.consecutive_failures
                        );
                        hosted.status = ScriptStatus::Disabled;
                    }
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::input::InputState;
    use std::cell::RefCell;

    struct Counter {
        updates: Rc<RefCell<u32>>,
    }

    impl Script for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn on_update(&mut self, _ctx: &mut ScriptContext<'_>, _delta: f32) -> Result<(), ScriptError> {
            *self.updates.borrow_mut() += 1;
            Ok(())
        }
    }

    struct BadCreate;

    impl Script for BadCreate {
        fn name(&self) -> &str {
            "bad_create"
        }

        fn on_create(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
            Err(ScriptError::InvalidHandle("nothing to bind".to_string()))
        }

        fn on_update(&mut self, _ctx: &mut ScriptContext<'_>, _delta: f32) -> Result<(), ScriptError> {
            panic!("must not be updated");
        }
    }

    #[test]
    fn test_create_failure_skips_updates() {
        let world = Rc::new(RefCell::new(World::new()));
        let mut host = ScriptHost::new(world, &HostConfig::default());
        let updates = Rc::new(RefCell::new(0));
        let bad = host.add_script(Box::new(BadCreate));
        let good = host.add_script(Box::new(Counter { updates: Rc::clone(&updates) }));
        let input = InputState::new();

        let first = host.update(&input, 0.016);
        host.update(&input, 0.016);

        assert_eq!(first, FrameReport { succeeded: 2, failed: 1 });
        assert_eq!(host.status(bad), Some(ScriptStatus::CreateFailed));
        assert_eq!(host.status(good), Some(ScriptStatus::Running));
        assert_eq!(host.failure_count(bad), Some(1));
        assert_eq!(*updates.borrow(), 2);
    }

    #[test]
    fn test_context_reaches_scene() {
        let world = Rc::new(RefCell::new(World::new()));
        let input = InputState::new();
        let ctx = ScriptContext::new(&world, &input);

        let created = ctx.create_entity("Probe").expect("scene alive");
        assert_eq!(ctx.get_entity_by_name("Probe"), Some(created));
        assert!(ctx.get_entity_by_name("missing").is_none());
        assert!(!ctx.is_key_down(KeyCode::W));
    }
}
