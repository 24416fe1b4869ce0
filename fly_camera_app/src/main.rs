//! Fly camera demo application
//!
//! Builds a small scene (camera, lit cube, sun), attaches the fly-camera
//! script and a spinner, then runs the configured number of frames headless
//! with recorded input, logging the camera position every frame.
//!
//! Usage: `fly_camera_demo [config.toml|config.ron]`

use script_bridge::prelude::*;
use thiserror::Error;

/// Demo application errors
#[derive(Error, Debug)]
enum AppError {
    /// Configuration could not be loaded or is out of range
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene setup through the script bridge failed
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),
}

/// Rotates one entity about its Y axis
struct Spinner {
    target: String,
    degrees_per_second: f32,
}

impl Script for Spinner {
    fn name(&self) -> &str {
        "spinner"
    }

    fn on_create(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        ctx.log_info(&format!("spinning '{}' at {} deg/s", self.target, self.degrees_per_second));
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut ScriptContext<'_>, delta: f32) -> Result<(), ScriptError> {
        let transform = ctx
            .get_entity_by_name(&self.target)
            .and_then(|entity| entity.component::<Transform>())
            .ok_or_else(|| ScriptError::InvalidHandle(format!("'{}' has no transform", self.target)))?;
        transform.rotate(0.0, self.degrees_per_second * delta, 0.0);
        Ok(())
    }
}

fn build_scene(world: &SharedWorld, camera_name: &str) -> Result<(), ScriptError> {
    let scene = std::rc::Rc::downgrade(world);

    let camera = Entity::create(&scene, camera_name)?;
    camera.add_component(ComponentKind::Transform);
    camera.add_component(ComponentKind::PerspectiveCamera);

    let cube = Entity::create(&scene, "Cube")?;
    for key in ["Transform", "Material", "Point Light", "Cube"] {
        cube.add_component_by_key(key)?;
    }
    if let Some(material) = cube.component::<Material>() {
        material.set_attribute(MaterialAttribute::Albedo, &[0.8, 0.7, 0.5, 1.0])?;
        material.set_attribute(MaterialAttribute::Metallic, &[0.1])?;
        material.set_attribute(MaterialAttribute::Roughness, &[0.3])?;
    }
    if let Some(light) = cube.component::<PointLight>() {
        light.translate_position(&Vector::from([0.0, -3.0, 0.0]))?;
        light.update_radius(15.0);
    }

    let sun = Entity::create(&scene, "Sun")?;
    sun.add_component(ComponentKind::DirectionalLight);
    if let Some(light) = sun.component::<DirectionalLight>() {
        light.update_direction(&Vector::from([-0.7, 1.0, 0.3]))?;
        light.update_color(&Vector::from([1.0, 0.95, 0.9]))?;
        light.update_intensity(1.5);
    }
    Ok(())
}

/// Hand edited material blocks to the renderer; returns the bytes sent
fn upload_materials(world: &mut World) -> usize {
    let storage = world.material_storage_mut();
    let dirty = storage.take_dirty();
    dirty
        .iter()
        .filter_map(|&id| storage.as_bytes(id))
        .map(<[u8]>::len)
        .sum()
}

/// Recorded input: fly forward, strafe, then look around
fn drive_input(input: &mut InputState, frame: u32, frames: u32, look_key: Option<KeyCode>) {
    let third = (frames / 3).max(1);
    input.handle_key_input(KeyCode::W, frame < third);
    input.handle_key_input(KeyCode::D, (third..2 * third).contains(&frame));
    if let Some(key) = look_key {
        input.handle_key_input(key, true);
    }
    if frame >= 2 * third {
        let step = f64::from(frame - 2 * third);
        input.handle_mouse_move(step * 4.0, step * -1.5);
    }
}

fn run() -> Result<(), AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => BridgeConfig::load_from_file(&path)?,
        None => BridgeConfig::default(),
    };
    config.validate()?;
    logging::init_with_level(config.logging.level_filter()?);
    log::info!("Starting fly camera demo for {} frames", config.host.frames);

    let world = shared_world();
    build_scene(&world, &config.fly_camera.camera_entity)?;

    let mut host = ScriptHost::new(world.clone(), &config.host);
    host.add_script(Box::new(FlyCameraScript::new(&config.fly_camera)));
    host.add_script(Box::new(Spinner {
        target: "Cube".to_string(),
        degrees_per_second: 45.0,
    }));

    let camera = world
        .borrow()
        .entity_by_name(&config.fly_camera.camera_entity)
        .and_then(|id| world.borrow().perspective_camera(id));

    let mut input = InputState::new();
    let mut timer = Timer::new();
    let mut failures = 0;
    let mut uploaded = upload_materials(&mut world.borrow_mut());

    for frame in 0..config.host.frames {
        drive_input(&mut input, frame, config.host.frames, config.fly_camera.look_key);
        let delta = match config.host.fixed_delta {
            Some(step) => timer.advance(step),
            None => timer.update(),
        };

        let report = host.update(&input, delta);
        failures += report.failed;
        input.end_frame();
        uploaded += upload_materials(&mut world.borrow_mut());

        if let Some(camera) = &camera {
            let camera = camera.borrow();
            log::info!(
                "frame {:>4}: camera at ({:.3}, {:.3}, {:.3}) facing ({:.3}, {:.3}, {:.3})",
                frame,
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.front.x,
                camera.front.y,
                camera.front.z
            );
        }
    }

    log::info!(
        "Finished {} frames in {:.2}s simulated ({:.1} fps), {} failed callbacks, {} material bytes uploaded",
        timer.frame_count(),
        timer.total_time(),
        timer.average_fps(),
        failures,
        uploaded
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // Logging may not be initialized if config loading failed
        eprintln!("fly_camera_demo: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_bridge::ecs::components::MaterialInfo;

    #[test]
    fn test_material_edits_upload_once() {
        let world = shared_world();
        build_scene(&world, "Camera").expect("scene builds");

        let block = std::mem::size_of::<MaterialInfo>();
        assert_eq!(upload_materials(&mut world.borrow_mut()), block);
        assert_eq!(upload_materials(&mut world.borrow_mut()), 0);

        let cube = Entity::get_by_name(&std::rc::Rc::downgrade(&world), "Cube").expect("cube");
        let material = cube.component::<Material>().expect("material");
        material.set_attribute(MaterialAttribute::Roughness, &[0.9]).expect("scalar");
        assert_eq!(upload_materials(&mut world.borrow_mut()), block);
    }
}
