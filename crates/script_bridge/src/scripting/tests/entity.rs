use super::{demo_scene, entity, weak};
use crate::ecs::{ComponentKind, NULL_ENTITY_ID};
use crate::scripting::{AnyComponent, Entity, ScriptError, Transform, INVALID_TRANSFORM, NULL_ENTITY_NAME};

#[test]
fn test_get_by_name_missing_is_none() {
    let world = demo_scene();
    assert!(Entity::get_by_name(&weak(&world), "missing").is_none());
}

#[test]
fn test_name_and_id() {
    let world = demo_scene();
    let cube = entity(&world, "Cube");
    assert_eq!(cube.get_name(), "Cube");
    assert_eq!(cube.get_id(), cube.id().to_bits());
    assert_ne!(cube.get_id(), NULL_ENTITY_ID);
}

#[test]
fn test_removed_entity_reports_sentinels() {
    let world = demo_scene();
    let mut cube = entity(&world, "Cube");
    let other = entity(&world, "Cube");
    let transform = cube.component::<Transform>().expect("transform");

    cube.remove_from_tree();

    assert!(!cube.is_valid());
    assert!(!other.is_valid());
    assert_eq!(cube.get_name(), NULL_ENTITY_NAME);
    assert_eq!(other.get_id(), NULL_ENTITY_ID);
    assert!(cube.get_component(ComponentKind::Transform).is_none());

    // Mutators on dead handles are silent no-ops
    cube.add_component(ComponentKind::Quad);
    other.remove_component(ComponentKind::Material);
    transform.translate(1.0, 1.0, 1.0);
    assert_eq!(transform.get_translation(), INVALID_TRANSFORM);
    assert!(Entity::get_by_name(&weak(&world), "Cube").is_none());
}

#[test]
fn test_handle_stays_invalid_after_slot_reuse() {
    let world = demo_scene();
    let stale = entity(&world, "Sun");
    world.borrow_mut().remove_entity(stale.id());

    let fresh = Entity::create(&weak(&world), "Moon").expect("scene alive");
    fresh.add_component(ComponentKind::DirectionalLight);

    assert!(!stale.is_valid());
    assert!(!stale.has_component(ComponentKind::DirectionalLight));
    assert_eq!(stale.get_name(), NULL_ENTITY_NAME);
    assert!(fresh.has_component(ComponentKind::DirectionalLight));
    assert_ne!(stale.get_id(), fresh.get_id());
}

#[test]
fn test_add_component_twice_keeps_state() {
    let world = demo_scene();
    let cube = entity(&world, "Cube");
    let transform = cube.component::<Transform>().expect("transform");
    transform.translate(3.0, 0.0, 0.0);

    cube.add_component(ComponentKind::Transform);
    assert_eq!(transform.get_translation(), (3.0, 0.0, 0.0));
}

#[test]
fn test_get_component_maps_kinds() {
    let world = demo_scene();
    let cube = entity(&world, "Cube");
    assert!(matches!(
        cube.get_component(ComponentKind::Material),
        Some(AnyComponent::Material(_))
    ));
    assert!(matches!(
        cube.get_component(ComponentKind::PointLight),
        Some(AnyComponent::PointLight(_))
    ));
    // Attached but not viewable from scripts
    assert!(cube.has_component(ComponentKind::Cube));
    assert!(cube.get_component(ComponentKind::Cube).is_none());
    // Not attached
    assert!(cube.get_component(ComponentKind::DirectionalLight).is_none());
}

#[test]
fn test_component_keys_are_checked() {
    let world = demo_scene();
    let sun = entity(&world, "Sun");
    sun.add_component_by_key("Transform").expect("known key");
    assert!(sun.has_component(ComponentKind::Transform));

    let err = sun.add_component_by_key("Rigidbody").unwrap_err();
    assert!(matches!(err, ScriptError::UnknownComponent(key) if key == "Rigidbody"));

    sun.remove_component_by_key("Directional Light").expect("known key");
    assert!(!sun.has_component(ComponentKind::DirectionalLight));
}

#[test]
fn test_create_fails_once_scene_is_gone() {
    let world = demo_scene();
    let scene = weak(&world);
    let camera = entity(&world, "Camera");
    drop(world);

    assert!(matches!(Entity::create(&scene, "Late"), Err(ScriptError::InvalidHandle(_))));
    assert!(!camera.is_valid());
    assert_eq!(camera.get_name(), NULL_ENTITY_NAME);
}

#[test]
fn test_get_component_by_key() {
    let world = demo_scene();
    let cube = entity(&world, "Cube");
    assert!(matches!(
        cube.get_component_by_key("Point Light"),
        Ok(Some(AnyComponent::PointLight(_)))
    ));
    assert!(matches!(cube.get_component_by_key("Directional Light"), Ok(None)));
    assert!(matches!(
        cube.get_component_by_key("Rigidbody"),
        Err(ScriptError::UnknownComponent(key)) if key == "Rigidbody"
    ));
}

#[test]
fn test_children_follow_creation_order() {
    let world = demo_scene();
    let cube = entity(&world, "Cube");
    let lid = cube.create_child("Lid").expect("scene alive");
    let base = cube.create_child("Base").expect("scene alive");

    assert_eq!(cube.children(), vec![lid.clone(), base]);
    assert_eq!(lid.get_parent(), Some(cube.clone()));
    assert_eq!(cube.get_parent(), None);
    assert_eq!(Entity::get_by_name(&weak(&world), "Lid"), Some(lid));
}

#[test]
fn test_removing_parent_invalidates_descendants() {
    let world = demo_scene();
    let mut cube = entity(&world, "Cube");
    let lid = cube.create_child("Lid").expect("scene alive");
    let handle = lid.create_child("Handle").expect("scene alive");
    handle.add_component(ComponentKind::Transform);
    let transform = handle.component::<Transform>().expect("transform");
    let sun = entity(&world, "Sun");

    cube.remove_from_tree();

    assert!(!lid.is_valid());
    assert!(!handle.is_valid());
    assert_eq!(handle.get_name(), NULL_ENTITY_NAME);
    assert_eq!(transform.get_translation(), INVALID_TRANSFORM);
    assert!(lid.children().is_empty());
    assert!(sun.is_valid());
    assert_eq!(world.borrow().len(), 2);
}

#[test]
fn test_move_to_reparents_subtree() {
    let world = demo_scene();
    let cube = entity(&world, "Cube");
    let sun = entity(&world, "Sun");
    let lid = cube.create_child("Lid").expect("scene alive");

    assert!(lid.move_to(&sun));
    assert!(cube.children().is_empty());
    assert_eq!(sun.children(), vec![lid.clone()]);
    assert_eq!(lid.get_parent(), Some(sun.clone()));

    // A node cannot move under its own subtree
    assert!(!sun.move_to(&lid));
    assert_eq!(sun.get_parent(), None);
}

#[test]
fn test_child_of_removed_entity_becomes_root() {
    let world = demo_scene();
    let mut sun = entity(&world, "Sun");
    let stale = sun.clone();
    sun.remove_from_tree();

    let orphan = stale.create_child("Orphan").expect("scene alive");
    assert!(orphan.is_valid());
    assert_eq!(orphan.get_parent(), None);
}

#[test]
fn test_get_by_id_round_trips_live_entities() {
    let world = demo_scene();
    let mut sun = entity(&world, "Sun");
    let id = sun.get_id();
    assert_eq!(Entity::get_by_id(&weak(&world), id), Some(sun.clone()));

    sun.remove_from_tree();
    assert!(Entity::get_by_id(&weak(&world), id).is_none());
    assert!(Entity::get_by_id(&weak(&world), NULL_ENTITY_ID).is_none());
}
