use glow::HasContext;

use nox_configurator_lib::compositor::SurfaceId;
use nox_configurator_lib::viewport::mesh::{LineMeshData, MeshData};

// ── Frame parameters ─────────────────────────────────────────

/// Everything the block pass needs, captured on the UI thread
pub struct BlockFrame {
    pub surface: SurfaceId,
    pub mesh: MeshData,
    pub view_projection: glam::Mat4,
    pub model: glam::Mat4,
    pub eye: glam::Vec3,
    pub ambient: glam::Vec3,
    pub key_dir: glam::Vec3,
    pub key_color: glam::Vec3,
    pub fill_dir: glam::Vec3,
    pub fill_color: glam::Vec3,
    pub roughness: f32,
    pub background: [f32; 3],
}

/// Everything the line-field pass needs
pub struct FieldFrame {
    pub surface: SurfaceId,
    pub lines: LineMeshData,
    pub view_projection: glam::Mat4,
    pub clear_color: [f32; 3],
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

struct GpuLines {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

/// GPU mirror of the compositor's surfaces: at most one block mesh for the
/// preview viewport and one line buffer for the background overlay. Buffers
/// are keyed by surface, so a new surface always gets fresh buffers.
pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    block: Option<(SurfaceId, GpuMesh)>,
    field: Option<(SurfaceId, GpuLines)>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        let line_program = compile_program(gl, LINE_VERT, LINE_FRAG)?;
        Ok(Self {
            mesh_program,
            line_program,
            block: None,
            field: None,
        })
    }

    /// Upload the block mesh unless this surface already has it
    fn sync_block(&mut self, gl: &glow::Context, surface: SurfaceId, mesh: &MeshData) -> Result<(), String> {
        if matches!(self.block, Some((id, _)) if id == surface) {
            return Ok(());
        }
        if let Some((_, old)) = self.block.take() {
            delete_mesh(gl, &old);
        }
        self.block = Some((surface, upload_mesh(gl, mesh)?));
        tracing::debug!(?surface, "Uploaded block mesh");
        Ok(())
    }

    /// Stream the current segment positions into the overlay's line buffer
    fn sync_field(&mut self, gl: &glow::Context, surface: SurfaceId, lines: &LineMeshData) -> Result<(), String> {
        if let Some((id, gpu)) = &mut self.field {
            if *id == surface {
                update_lines(gl, gpu, lines);
                return Ok(());
            }
        }
        if let Some((_, old)) = self.field.take() {
            delete_lines(gl, &old);
        }
        self.field = Some((surface, upload_lines(gl, lines)?));
        Ok(())
    }

    /// Free buffers whose surface is no longer mounted
    pub fn release_stale(&mut self, gl: &glow::Context, is_live: impl Fn(SurfaceId) -> bool) {
        if let Some((id, _)) = &self.block {
            if !is_live(*id) {
                if let Some((id, old)) = self.block.take() {
                    delete_mesh(gl, &old);
                    tracing::debug!(surface = ?id, "Released block mesh");
                }
            }
        }
        if let Some((id, _)) = &self.field {
            if !is_live(*id) {
                if let Some((_, old)) = self.field.take() {
                    delete_lines(gl, &old);
                }
            }
        }
    }

    /// Clear the preview rect and draw the lit block
    pub fn paint_block(&mut self, gl: &glow::Context, viewport: [i32; 4], frame: &BlockFrame) {
        if let Err(e) = self.sync_block(gl, frame.surface, &frame.mesh) {
            tracing::error!("Failed to upload block mesh: {e}");
            return;
        }
        let Some((_, mesh)) = &self.block else {
            return;
        };

        unsafe {
            begin_pass(gl, viewport, frame.background);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            let p = self.mesh_program;
            gl.use_program(Some(p));
            set_uniform_mat4(gl, p, "u_mvp", &(frame.view_projection * frame.model));
            set_uniform_mat4(gl, p, "u_model", &frame.model);
            set_uniform_vec3(gl, p, "u_eye", &frame.eye);
            set_uniform_vec3(gl, p, "u_ambient", &frame.ambient);
            set_uniform_vec3(gl, p, "u_key_dir", &frame.key_dir);
            set_uniform_vec3(gl, p, "u_key_color", &frame.key_color);
            set_uniform_vec3(gl, p, "u_fill_dir", &frame.fill_dir);
            set_uniform_vec3(gl, p, "u_fill_color", &frame.fill_color);
            set_uniform_f32(gl, p, "u_roughness", frame.roughness);

            draw_mesh(gl, mesh);

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    /// Clear the whole window to the overlay color and draw the segments
    pub fn paint_field(&mut self, gl: &glow::Context, viewport: [i32; 4], frame: &FieldFrame) {
        if let Err(e) = self.sync_field(gl, frame.surface, &frame.lines) {
            tracing::error!("Failed to upload line field: {e}");
            return;
        }
        let Some((_, lines)) = &self.field else {
            return;
        };

        unsafe {
            begin_pass(gl, viewport, frame.clear_color);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            gl.use_program(Some(self.line_program));
            set_uniform_mat4(gl, self.line_program, "u_mvp", &frame.view_projection);
            draw_lines(gl, lines);

            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some((_, mesh)) = self.block.take() {
            delete_mesh(gl, &mesh);
        }
        if let Some((_, lines)) = self.field.take() {
            delete_lines(gl, &lines);
        }
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
        }
    }
}

unsafe fn begin_pass(gl: &glow::Context, viewport: [i32; 4], clear: [f32; 3]) {
    let [x, y, w, h] = viewport;
    gl.viewport(x, y, w, h);
    gl.scissor(x, y, w, h);
    gl.enable(glow::SCISSOR_TEST);
    gl.clear_color(clear[0], clear[1], clear[2], 1.0);
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuMesh, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 9 * 4;
        // position
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);
        // color
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 6 * 4);

        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: data.indices.len() as i32,
        })
    }
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> Result<GpuLines, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::DYNAMIC_DRAW,
        );

        let stride = 7 * 4;
        // position
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // rgba
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 4, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        Ok(GpuLines {
            vao,
            vbo,
            vertex_count: data.vertex_count() as i32,
        })
    }
}

fn update_lines(gl: &glow::Context, gpu: &mut GpuLines, data: &LineMeshData) {
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(gpu.vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            cast_slice(&data.vertices),
            glow::DYNAMIC_DRAW,
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
    }
    gpu.vertex_count = data.vertex_count() as i32;
}

fn delete_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    unsafe {
        gl.delete_vertex_array(mesh.vao);
        gl.delete_buffer(mesh.vbo);
        gl.delete_buffer(mesh.ibo);
    }
}

fn delete_lines(gl: &glow::Context, lines: &GpuLines) {
    unsafe {
        gl.delete_vertex_array(lines.vao);
        gl.delete_buffer(lines.vbo);
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

unsafe fn draw_lines(gl: &glow::Context, lines: &GpuLines) {
    gl.bind_vertex_array(Some(lines.vao));
    gl.draw_arrays(glow::LINES, 0, lines.vertex_count);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;
        let vert = compile_shader(gl, glow::VERTEX_SHADER, vert_src)?;
        let frag = compile_shader(gl, glow::FRAGMENT_SHADER, frag_src)?;

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("program link error: {log}"));
        }
        Ok(program)
    }
}

unsafe fn compile_shader(gl: &glow::Context, kind: u32, src: &str) -> Result<glow::Shader, String> {
    let shader = gl.create_shader(kind)?;
    gl.shader_source(shader, src);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(format!("shader compile error: {log}"));
    }
    Ok(shader)
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_world;
out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_world = (u_model * vec4(a_position, 1.0)).xyz;
    v_normal = mat3(u_model) * a_normal;
    v_color = a_color;
}
"#;

// Ambient plus two directional lights, Blinn-Phong highlight sharpened as
// roughness drops.
const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_eye;
uniform vec3 u_ambient;
uniform vec3 u_key_dir;
uniform vec3 u_key_color;
uniform vec3 u_fill_dir;
uniform vec3 u_fill_color;
uniform float u_roughness;

in vec3 v_world;
in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

vec3 shade(vec3 n, vec3 v, vec3 l, vec3 color) {
    float diffuse = max(dot(n, l), 0.0);
    vec3 h = normalize(l + v);
    float shininess = mix(128.0, 4.0, clamp(u_roughness, 0.0, 1.0));
    float spec = diffuse > 0.0 ? pow(max(dot(n, h), 0.0), shininess) * (1.0 - u_roughness) : 0.0;
    return color * (diffuse * v_color + spec);
}

void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_eye - v_world);
    vec3 lit = u_ambient * v_color
        + shade(n, v, u_key_dir, u_key_color)
        + shade(n, v, u_fill_dir, u_fill_color);
    frag_color = vec4(lit, 1.0);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;
