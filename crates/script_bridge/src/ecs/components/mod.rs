//! Component data types stored by the scene

pub mod camera;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod transform;

pub use camera::{
    OrthographicCamera, OrthographicCameraComponent, PerspectiveCamera, PerspectiveCameraComponent, SharedCamera,
};
pub use lighting::{DirectionalLightComponent, PointLightComponent};
pub use material::{MaterialAttribute, MaterialComponent, MaterialId, MaterialInfo, MaterialStorage};
pub use mesh::{CubeComponent, QuadComponent};
pub use transform::TransformComponent;
