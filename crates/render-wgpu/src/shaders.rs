/// WGSL shader for lit scene geometry.
///
/// Matrices are uploaded pre-transposed (row-vector convention), so vectors
/// multiply from the left.
pub const SCENE_SHADER: &str = r#"
struct ObjectUniforms {
    world: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

struct DirectionalLight {
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    direction: vec3<f32>,
};

struct SceneLights {
    light_one: DirectionalLight,
    light_two: DirectionalLight,
};

@group(0) @binding(0)
var<uniform> object: ObjectUniforms;

@group(0) @binding(1)
var<uniform> lights: SceneLights;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) texcoord: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) texcoord: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = vec4<f32>(vertex.position, 1.0) * object.world;
    let view_pos = world_pos * object.view;

    var out: VertexOutput;
    out.clip_position = view_pos * object.projection;
    out.world_normal = (vec4<f32>(vertex.normal, 0.0) * object.world).xyz;
    out.texcoord = vertex.texcoord;
    return out;
}

fn shade(light: DirectionalLight, normal: vec3<f32>) -> vec4<f32> {
    let to_light = normalize(-light.direction);
    let amount = saturate(dot(normal, to_light));
    return light.ambient + light.diffuse * amount;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.world_normal);
    let color = shade(lights.light_one, normal) + shade(lights.light_two, normal);
    return vec4<f32>(color.rgb, 1.0);
}
"#;
