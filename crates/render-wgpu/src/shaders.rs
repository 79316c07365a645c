/// WGSL source for every scene pipeline.
///
/// One module holds the shared camera uniform and two entry-point pairs:
/// `vs_mesh`/`fs_mesh` for instanced meshes and `vs_grid`/`fs_grid` for the
/// floor lines. Lit mesh instances get a fixed directional light, unlit ones
/// keep their flat color. Everything fades toward the clear color with
/// distance from the eye.
pub const SCENE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    fog_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

const LIGHT_DIR: vec3<f32> = vec3<f32>(0.3, 1.0, 0.5);

fn fade(rgb: vec3<f32>, dist: f32, start: f32, end: f32) -> vec3<f32> {
    return mix(rgb, camera.fog_color.rgb, smoothstep(start, end, dist));
}

struct MeshIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) lit: f32,
};

struct MeshOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) world: vec3<f32>,
    @location(3) lit: f32,
};

@vertex
fn vs_mesh(v: MeshIn) -> MeshOut {
    let model = mat4x4<f32>(v.model_0, v.model_1, v.model_2, v.model_3);
    let world = model * vec4<f32>(v.position, 1.0);

    var out: MeshOut;
    out.clip = camera.view_proj * world;
    out.normal = (model * vec4<f32>(v.normal, 0.0)).xyz;
    out.color = v.color;
    out.world = world.xyz;
    out.lit = v.lit;
    return out;
}

@fragment
fn fs_mesh(f: MeshOut) -> @location(0) vec4<f32> {
    let diffuse = max(dot(normalize(f.normal), normalize(LIGHT_DIR)), 0.0);
    let shade = mix(1.0, 0.3 + 0.7 * diffuse, f.lit);
    let rgb = fade(f.color.rgb * shade, distance(f.world, camera.eye.xyz), 20.0, 60.0);
    return vec4<f32>(rgb, f.color.a);
}

struct LineIn {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) world: vec3<f32>,
};

@vertex
fn vs_grid(v: LineIn) -> LineOut {
    var out: LineOut;
    out.clip = camera.view_proj * vec4<f32>(v.position, 1.0);
    out.color = v.color;
    out.world = v.position;
    return out;
}

@fragment
fn fs_grid(f: LineOut) -> @location(0) vec4<f32> {
    // Lines fade out before the grid edge.
    let rgb = fade(f.color.rgb, distance(f.world.xz, camera.eye.xz), 8.0, 24.0);
    return vec4<f32>(rgb, f.color.a);
}
"#;
