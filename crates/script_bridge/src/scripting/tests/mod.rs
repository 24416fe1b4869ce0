//! End-to-end tests of the script bridge against a live scene

mod entity;

use std::rc::Rc;

use crate::ecs::ComponentKind;
use crate::scripting::{shared_world, Entity, SharedWorld, WorldRef};

/// Scene with a camera, a lit cube and a sun
fn demo_scene() -> SharedWorld {
    let world = shared_world();
    {
        let mut scene = world.borrow_mut();
        let camera = scene.create_entity("Camera");
        scene.add_component(camera, ComponentKind::Transform);
        scene.add_component(camera, ComponentKind::PerspectiveCamera);

        let cube = scene.create_entity("Cube");
        for kind in [
            ComponentKind::Transform,
            ComponentKind::Material,
            ComponentKind::PointLight,
            ComponentKind::Cube,
        ] {
            scene.add_component(cube, kind);
        }

        let sun = scene.create_entity("Sun");
        scene.add_component(sun, ComponentKind::DirectionalLight);
    }
    world
}

fn weak(world: &SharedWorld) -> WorldRef {
    Rc::downgrade(world)
}

fn entity(world: &SharedWorld, name: &str) -> Entity {
    Entity::get_by_name(&weak(world), name).expect("entity exists in demo scene")
}
