//! # Script Bridge
//!
//! The script-facing layer of a real-time 3D engine: a variable-length
//! vector kernel and handle-based access to scene entities, their
//! components and camera objects.
//!
//! ## Features
//!
//! - **Vector kernel**: arithmetic, products, normalization and distance
//!   over [`Vector`](foundation::Vector)
//! - **Generational handles**: entity and component handles that go quietly
//!   stale when the engine removes what they point at
//! - **Component views**: Transform, Material, PointLight and DirectionalLight
//! - **Camera controllers**: perspective and orthographic, plus a fly camera
//! - **Script host**: lifecycle hooks with per-script failure isolation
//!
//! ## Quick Start
//!
//! ```rust
//! use script_bridge::prelude::*;
//!
//! let world = shared_world();
//! {
//!     let mut scene = world.borrow_mut();
//!     let camera = scene.create_entity("Camera");
//!     scene.add_component(camera, ComponentKind::PerspectiveCamera);
//! }
//!
//! let config = BridgeConfig::default();
//! let mut host = ScriptHost::new(world, &config.host);
//! host.add_script(Box::new(FlyCameraScript::new(&config.fly_camera)));
//!
//! let input = InputState::new();
//! let report = host.update(&input, 1.0 / 60.0);
//! assert_eq!(report.failed, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod scripting;

/// Common imports for bridge users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{BridgeConfig, FlyCameraConfig, HostConfig, LoggingConfig},
        ecs::{components::MaterialAttribute, ComponentKind, EntityId, World, NULL_ENTITY_ID},
        foundation::{
            logging,
            math::{Mat4, Vec3, Vec4},
            time::Timer,
            vector::{cross, cross2, distance, dot, normalize},
            Vector, VectorError,
        },
        input::{InputSource, InputState, KeyCode, MouseButton},
        scripting::{
            shared_world, AnyComponent, ComponentView, DirectionalLight, Entity, FlyCameraScript,
            FlyCameraState, Material, OrthographicCameraController, PerspectiveCameraController, PointLight,
            Script, ScriptContext, ScriptError, ScriptHost, SharedWorld, Transform,
        },
    };
}
