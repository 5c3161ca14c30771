//! CPU mirror of the fragment shader's ray evaluation.
//!
//! The shader is the renderer of record; these functions reproduce its math
//! over `glam` types so the intersection and shading behavior stays testable
//! and can drive the headless mode.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::scene::{Scene, Sphere};

/// Distance reported when a ray does not intersect.
pub const NO_HIT: f32 = -1.0;

/// Checkerboard frequency along both floor axes; cells are pi/4 wide.
pub const CHECKER_FREQUENCY: f32 = 4.0;

/// Builds the camera ray for a pixel, with +y running up the screen.
///
/// Both axes divide by the viewport width, which is how the aspect ratio is
/// folded into the ray spread. Always unit length.
pub fn primary_ray(pixel: Vec2, width: f32, height: f32, dir: Vec3, up: Vec3) -> Vec3 {
    let coord = 0.5 * (pixel - 0.5 * Vec2::new(width, height)) / width;
    let right = dir.cross(up).normalize();
    let true_up = right.cross(dir).normalize();
    (dir + right * coord.x + true_up * coord.y).normalize()
}

/// Distance along `ray` from `origin` to the sphere surface, or [`NO_HIT`].
///
/// Root selection is asymmetric: the near root only counts when the origin
/// is outside the sphere, the far root only when it is inside. An origin
/// exactly on the surface reports no hit.
pub fn hit_sphere(origin: Vec3, ray: Vec3, sphere: &Sphere) -> f32 {
    let oc = origin - sphere.center;
    let a = ray.dot(ray);
    let b = 2.0 * ray.dot(oc);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return NO_HIT;
    }
    let near = (-b - discriminant.sqrt()) / (2.0 * a);
    let far = (-b + discriminant.sqrt()) / (2.0 * a);
    let distance = oc.length();
    if distance > sphere.radius && near >= 0.0 {
        return near;
    }
    if distance < sphere.radius && far >= 0.0 {
        return far;
    }
    NO_HIT
}

/// Distance to the plane through the origin with normal `up`, or [`NO_HIT`]
/// when the ray is parallel to it. A negative distance is returned as-is;
/// checking the sign is the caller's job.
pub fn hit_floor(origin: Vec3, ray: Vec3, up: Vec3) -> f32 {
    let b = origin.dot(up);
    let k = ray.dot(up);
    if k == 0.0 {
        return NO_HIT;
    }
    -b / k
}

/// Checkerboard sign at a floor point: +1 or -1 in alternating cells, 0 on
/// the cell boundaries (GLSL `sign` semantics).
pub fn checker_sign(point: Vec3) -> f32 {
    let value = (CHECKER_FREQUENCY * point.x).sin() * (CHECKER_FREQUENCY * point.y).sin();
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Maps the checkerboard sign to the red/green channel pair.
pub fn checker_color(point: Vec3) -> Vec3 {
    let value = checker_sign(point);
    Vec3::new(value.max(0.0), (-value).max(0.0), 0.0)
}

/// Shades one camera ray against the scene, returning linear RGB.
///
/// A sphere miss is black. On a hit the ray is redirected from the hit point
/// toward the reference point one radius above the sphere center, then
/// tested against the floor; a floor miss is black too.
pub fn shade(eye: Vec3, ray: Vec3, scene: &Scene, up: Vec3) -> Vec3 {
    let t = hit_sphere(eye, ray, &scene.sphere);
    if t < 0.0 {
        return Vec3::ZERO;
    }
    let p = eye + ray * t;
    let redirected = (p - (scene.sphere.center + up * scene.sphere.radius)).normalize();
    let t = hit_floor(p, redirected, up);
    if t < 0.0 {
        return Vec3::ZERO;
    }
    checker_color(p + redirected * t)
}

/// Hit counters for one traced frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub width: u32,
    pub height: u32,
    pub sphere_hits: u64,
    pub floor_hits: u64,
}

/// Traces a full frame on the CPU and tallies intersections. Drives the
/// headless mode; the shader performs the same work per pixel on the GPU.
pub fn trace_frame(camera: &Camera, scene: &Scene, width: u32, height: u32) -> FrameStats {
    let mut stats = FrameStats {
        width,
        height,
        sphere_hits: 0,
        floor_hits: 0,
    };
    let (w, h) = (width as f32, height as f32);
    for y in 0..height {
        for x in 0..width {
            let pixel = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let ray = primary_ray(pixel, w, h, camera.dir(), camera.up);
            let t = hit_sphere(camera.eye, ray, &scene.sphere);
            if t < 0.0 {
                continue;
            }
            stats.sphere_hits += 1;
            let p = camera.eye + ray * t;
            let redirected =
                (p - (scene.sphere.center + camera.up * scene.sphere.radius)).normalize();
            if hit_floor(p, redirected, camera.up) >= 0.0 {
                stats.floor_hits += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f32::consts::PI;

    const EPS: f32 = 1e-3;

    fn sphere() -> Sphere {
        Sphere::default()
    }

    #[test]
    fn ray_through_the_center_hits_the_entry_point() {
        let t = hit_sphere(Vec3::new(-10.0, 0.0, 1.0), Vec3::X, &sphere());
        assert!((t - 9.0).abs() < EPS);
    }

    #[test]
    fn negative_discriminant_reports_no_hit() {
        let t = hit_sphere(Vec3::new(-10.0, 5.0, 1.0), Vec3::X, &sphere());
        assert_eq!(t, NO_HIT);
    }

    #[test]
    fn outside_origin_never_selects_the_far_root() {
        // Sphere behind the origin: both roots are negative, so even though
        // the quadratic has solutions the result is a miss.
        let t = hit_sphere(Vec3::new(12.0, 0.0, 1.0), Vec3::X, &sphere());
        assert_eq!(t, NO_HIT);
    }

    #[test]
    fn inside_origin_selects_the_far_root() {
        let t = hit_sphere(Vec3::new(0.0, 0.0, 1.0), Vec3::X, &sphere());
        assert!((t - 1.0).abs() < EPS);
        // The same geometry along another axis behaves identically.
        let t = hit_sphere(Vec3::new(0.0, 0.0, 1.0), Vec3::Z, &sphere());
        assert!((t - 1.0).abs() < EPS);
    }

    #[test]
    fn floor_hit_from_above() {
        let t = hit_floor(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, Vec3::Z);
        assert!((t - 5.0).abs() < EPS);
    }

    #[test]
    fn ray_parallel_to_the_floor_reports_no_hit() {
        let t = hit_floor(Vec3::new(0.0, 0.0, 5.0), Vec3::X, Vec3::Z);
        assert_eq!(t, NO_HIT);
    }

    #[test]
    fn floor_behind_the_origin_returns_a_negative_distance() {
        let t = hit_floor(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::Z);
        assert!(t < 0.0);
        assert_ne!(t, NO_HIT);
    }

    #[test]
    fn center_pixel_ray_is_the_view_direction() {
        let dir = Vec3::X;
        let ray = primary_ray(Vec2::new(640.0, 360.0), 1280.0, 720.0, dir, Vec3::Z);
        assert!((ray - dir).length() < EPS);
    }

    #[test]
    fn primary_rays_are_unit_length() {
        for pixel in [
            Vec2::new(0.0, 0.0),
            Vec2::new(1279.0, 0.0),
            Vec2::new(333.0, 711.0),
        ] {
            let ray = primary_ray(pixel, 1280.0, 720.0, Vec3::X, Vec3::Z);
            assert!((ray.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn checker_cells_alternate_across_quarter_pi_boundaries() {
        let inside = Vec3::new(PI / 8.0, PI / 8.0, 0.0);
        assert_eq!(checker_sign(inside), 1.0);
        // One cell over along x, then along y.
        assert_eq!(checker_sign(inside + Vec3::X * (PI / 4.0)), -1.0);
        assert_eq!(checker_sign(inside + Vec3::Y * (PI / 4.0)), -1.0);
        // Diagonal neighbor flips twice.
        assert_eq!(
            checker_sign(inside + (Vec3::X + Vec3::Y) * (PI / 4.0)),
            1.0
        );
    }

    #[test]
    fn checker_colors_swap_channels_between_adjacent_cells() {
        let inside = Vec3::new(PI / 8.0, PI / 8.0, 0.0);
        assert_eq!(checker_color(inside), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(
            checker_color(inside + Vec3::X * (PI / 4.0)),
            Vec3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn sphere_miss_shades_black() {
        let color = shade(Vec3::new(-10.0, 5.0, 1.0), Vec3::X, &Scene::default(), Vec3::Z);
        assert_eq!(color, Vec3::ZERO);
    }

    #[test]
    fn sphere_hits_redirect_down_onto_the_floor() {
        let scene = Scene::default();
        let eye = Vec3::new(-10.0, 0.0, 1.0);
        let ray = primary_ray(Vec2::new(600.0, 420.0), 1280.0, 720.0, Vec3::X, Vec3::Z);
        let t = hit_sphere(eye, ray, &scene.sphere);
        assert!(t > 0.0);
        let p = eye + ray * t;
        let redirected = (p - (scene.sphere.center + Vec3::Z)).normalize();
        // The redirect reference sits at the sphere's top, so the new ray
        // never points above the horizontal.
        assert!(redirected.z <= 0.0);
        assert!(hit_floor(p, redirected, Vec3::Z) >= 0.0);
        // This particular ray lands well inside a positive checker cell.
        assert_eq!(shade(eye, ray, &scene, Vec3::Z), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn traced_frame_counts_are_consistent() {
        let stats = trace_frame(&Camera::default(), &Scene::default(), 128, 128);
        assert_eq!((stats.width, stats.height), (128, 128));
        assert!(stats.sphere_hits > 0);
        assert!(stats.floor_hits > 0);
        assert!(stats.floor_hits <= stats.sphere_hits);
        assert!(stats.sphere_hits < 128 * 128);
    }
}
