use glam::Vec3;

/// Analytic sphere tested by every camera ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 0.0, 1.0),
            radius: 1.0,
        }
    }
}

/// Runtime description of the ray-traced scene.
///
/// The floor plane is implicit: it passes through the world origin with the
/// camera up vector as its normal, so only the sphere needs describing here.
/// The scene is fixed for the lifetime of a session; the renderer bakes it
/// into the shader when the pipeline is built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scene {
    pub sphere: Sphere,
}
