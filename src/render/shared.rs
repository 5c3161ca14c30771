use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::scene::Scene;

/// Per-frame parameters consumed by the renderer's uniform buffer.
#[derive(Clone, Debug)]
pub struct FrameParams {
    pub mvp: Mat4,
    pub eye: Vec3,
    pub dir: Vec3,
    pub up: Vec3,
    pub width: f32,
    pub height: f32,
}

/// GPU layout of [`FrameParams`]. Field order packs each vec3 with the
/// following scalar into a single 16-byte slot, matching the WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct Globals {
    pub mvp: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub w: f32,
    pub dir: [f32; 3],
    pub h: f32,
    pub up: [f32; 3],
    pub _pad: f32,
}

impl From<&FrameParams> for Globals {
    fn from(params: &FrameParams) -> Self {
        Self {
            mvp: params.mvp.to_cols_array_2d(),
            eye: params.eye.into(),
            w: params.width,
            dir: params.dir.into(),
            h: params.height,
            up: params.up.into(),
            _pad: 0.0,
        }
    }
}

/// Full-screen trigger quad: four vertices in the x = 0 plane. The quad is
/// unrelated to the ray-traced content; it only makes the fragment shader
/// run for every pixel.
pub(crate) const QUAD_VERTICES: &[f32] = &[
    0.0, 0.5, 0.5, //
    0.0, -0.5, 0.5, //
    0.0, -0.5, -0.5, //
    0.0, 0.5, -0.5,
];

pub(crate) const QUAD_INDICES: &[u16] = &[0, 1, 2, 2, 3, 0];

/// Bakes the scene's sphere into the shader source.
pub(crate) fn shader_source(scene: &Scene) -> String {
    let center = scene.sphere.center;
    SHADER_TEMPLATE
        .replace(
            "__SPHERE_CENTER__",
            &format!(
                "vec3<f32>({:?}, {:?}, {:?})",
                center.x, center.y, center.z
            ),
        )
        .replace("__SPHERE_RADIUS__", &format!("{:?}", scene.sphere.radius))
}

const SHADER_TEMPLATE: &str = r#"
struct Globals {
    mvp: mat4x4<f32>,
    eye: vec3<f32>,
    W: f32,
    dir: vec3<f32>,
    H: f32,
    up: vec3<f32>,
    _pad: f32,
}

@group(0) @binding(0)
var<uniform> globals: Globals;

const SPHERE_CENTER: vec3<f32> = __SPHERE_CENTER__;
const SPHERE_RADIUS: f32 = __SPHERE_RADIUS__;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

@vertex
fn vs_main(@location(0) vert_pos: vec3<f32>) -> VertexOutput {
    var output: VertexOutput;
    output.position = globals.mvp * vec4<f32>(vert_pos, 1.0);
    return output;
}

fn hit_floor(source: vec3<f32>, ray: vec3<f32>) -> f32 {
    let b = dot(source, globals.up);
    let k = dot(ray, globals.up);
    if (k == 0.0) {
        return -1.0;
    }
    return -b / k;
}

fn hit_sphere(source: vec3<f32>, ray: vec3<f32>) -> f32 {
    let a = dot(ray, ray);
    let b = 2.0 * dot(ray, source - SPHERE_CENTER);
    let c = dot(source - SPHERE_CENTER, source - SPHERE_CENTER) - SPHERE_RADIUS * SPHERE_RADIUS;
    let d = b * b - 4.0 * a * c;
    if (d < 0.0) {
        return -1.0;
    }
    let near = (-b - sqrt(d)) / (2.0 * a);
    let far = (-b + sqrt(d)) / (2.0 * a);
    let dist = length(SPHERE_CENTER - source);
    if (dist > SPHERE_RADIUS && near >= 0.0) {
        return near;
    }
    if (dist < SPHERE_RADIUS && far >= 0.0) {
        return far;
    }
    return -1.0;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    // Framebuffer y runs down; flip so +y points up the screen.
    let pixel = vec2<f32>(input.position.x, globals.H - input.position.y);
    let coord = 0.5 * (pixel - 0.5 * vec2<f32>(globals.W, globals.H)) / globals.W;

    let right = normalize(cross(globals.dir, globals.up));
    let true_up = normalize(cross(right, globals.dir));

    var ray = normalize(globals.dir + right * coord.x + true_up * coord.y);

    var t = hit_sphere(globals.eye, ray);
    if (t < 0.0) {
        return vec4<f32>(0.0, 0.0, 0.0, 1.0);
    }

    var p = globals.eye + ray * t;
    ray = normalize(p - (SPHERE_CENTER + globals.up * SPHERE_RADIUS));

    t = hit_floor(p, ray);
    if (t < 0.0) {
        return vec4<f32>(0.0, 0.0, 0.0, 1.0);
    }

    p = p + ray * t;

    let val = sign(sin(4.0 * p.x) * sin(4.0 * p.y));
    return vec4<f32>(max(0.0, val), max(0.0, -val), 0.0, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_source_bakes_the_sphere_constants() {
        let source = shader_source(&Scene::default());
        assert!(source.contains("const SPHERE_CENTER: vec3<f32> = vec3<f32>(0.0, 0.0, 1.0);"));
        assert!(source.contains("const SPHERE_RADIUS: f32 = 1.0;"));
        assert!(!source.contains("__SPHERE_"));
    }

    #[test]
    fn shader_carries_the_uniform_contract_names() {
        let source = shader_source(&Scene::default());
        for field in ["mvp:", "eye:", "dir:", "up:", "W:", "H:"] {
            assert!(source.contains(field), "missing uniform field {field}");
        }
    }

    #[test]
    fn globals_layout_matches_the_wgsl_struct() {
        // mat4 plus three padded vec3/f32 slots.
        assert_eq!(std::mem::size_of::<Globals>(), 112);
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
    }

    #[test]
    fn globals_pack_the_frame_params() {
        let params = FrameParams {
            mvp: Mat4::IDENTITY,
            eye: Vec3::new(-10.0, 0.0, 1.0),
            dir: Vec3::X,
            up: Vec3::Z,
            width: 640.0,
            height: 480.0,
        };
        let globals = Globals::from(&params);
        assert_eq!(globals.eye, [-10.0, 0.0, 1.0]);
        assert_eq!(globals.dir, [1.0, 0.0, 0.0]);
        assert_eq!(globals.up, [0.0, 0.0, 1.0]);
        assert_eq!(globals.w, 640.0);
        assert_eq!(globals.h, 480.0);
        assert_eq!(globals.mvp[0][0], 1.0);
    }

    #[test]
    fn quad_covers_both_triangles() {
        assert_eq!(QUAD_VERTICES.len(), 4 * 3);
        assert_eq!(QUAD_INDICES, &[0, 1, 2, 2, 3, 0]);
    }
}
