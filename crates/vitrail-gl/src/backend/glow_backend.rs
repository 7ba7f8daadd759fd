use glow::HasContext;
use vitrail_api::{Bitmap, BitmapFormat, VertexBufferFormat};

use super::{GlBackend, ShaderStage};
use crate::error::DriverError;

// Attribute locations shared by both vertex layouts; the GLSL sources declare
// matching `layout(location = ...)` qualifiers.
const ATTR_POSITION: u32 = 0;
const ATTR_COLOR: u32 = 1;
const ATTR_UV: u32 = 2;
const ATTR_OBJECT: u32 = 3;
const ATTR_DATA_BASE: u32 = 4;
const DATA_VECTORS: u32 = 7;

/// Production [`GlBackend`] over a [`glow::Context`].
///
/// The wrapper does not own the native context's lifecycle (window, function
/// loading); it only issues calls against it, and must be used from the
/// thread the context is current on. A single vertex array object is created
/// up front and stays bound; geometry binds rewrite its attribute pointers.
pub struct GlowBackend {
    gl: glow::Context,
    vao: <glow::Context as HasContext>::VertexArray,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Result<Self, DriverError> {
        let vao = unsafe { gl.create_vertex_array() }
            .map_err(|detail| DriverError::backend("create_vertex_array", detail))?;
        unsafe { gl.bind_vertex_array(Some(vao)) };
        Ok(Self { gl, vao })
    }

    /// The wrapped context, for embedders that present or composite outside
    /// the driver.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl Drop for GlowBackend {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

impl GlBackend for GlowBackend {
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type Texture = <glow::Context as HasContext>::Texture;
    type Buffer = <glow::Context as HasContext>::Buffer;
    type Framebuffer = <glow::Context as HasContext>::Framebuffer;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(kind) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn set_uniform_sampler(&self, program: Self::Program, name: &str, unit: i32) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl.uniform_1_i32(location.as_ref(), unit);
        }
    }

    fn set_uniform_matrix(&self, program: Self::Program, name: &str, matrix: &[f32; 16]) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl.uniform_matrix_4_f32_slice(location.as_ref(), false, matrix);
        }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn allocate_texture_storage(&self, texture: Self::Texture, width: u32, height: u32) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
            set_default_sampling(&self.gl);
        }
    }

    fn upload_texture(&self, texture: Self::Texture, bitmap: &Bitmap) {
        let (internal_format, format) = match bitmap.format {
            BitmapFormat::A8 => (glow::R8, glow::RED),
            BitmapFormat::Bgra8 => (glow::RGBA8, glow::BGRA),
        };
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            // Rows are tightly packed; A8 rows are not 4-byte aligned.
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                bitmap.width as i32,
                bitmap.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&bitmap.pixels)),
            );
            set_default_sampling(&self.gl);
        }
    }

    fn bind_texture(&self, unit: u32, texture: Option<Self::Texture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, texture);
        }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn upload_vertices(&self, buffer: Self::Buffer, data: &[u8]) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::DYNAMIC_DRAW);
        }
    }

    fn upload_indices(&self, buffer: Self::Buffer, indices: &[u32]) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::DYNAMIC_DRAW,
            );
        }
    }

    fn bind_geometry(
        &self,
        vertices: Self::Buffer,
        format: VertexBufferFormat,
        indices: Self::Buffer,
    ) {
        let stride = format.stride() as i32;
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertices));
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(indices));

            self.gl
                .vertex_attrib_pointer_f32(ATTR_POSITION, 2, glow::FLOAT, false, stride, 0);
            self.gl.enable_vertex_attrib_array(ATTR_POSITION);
            self.gl
                .vertex_attrib_pointer_f32(ATTR_COLOR, 4, glow::UNSIGNED_BYTE, true, stride, 8);
            self.gl.enable_vertex_attrib_array(ATTR_COLOR);
            self.gl
                .vertex_attrib_pointer_f32(ATTR_UV, 2, glow::FLOAT, false, stride, 12);
            self.gl.enable_vertex_attrib_array(ATTR_UV);

            match format {
                VertexBufferFormat::Pos2Color4Uv2 => {
                    self.gl.disable_vertex_attrib_array(ATTR_OBJECT);
                    for i in 0..DATA_VECTORS {
                        self.gl.disable_vertex_attrib_array(ATTR_DATA_BASE + i);
                    }
                }
                VertexBufferFormat::Pos2Color4Uv2Obj2Data28 => {
                    self.gl
                        .vertex_attrib_pointer_f32(ATTR_OBJECT, 2, glow::FLOAT, false, stride, 20);
                    self.gl.enable_vertex_attrib_array(ATTR_OBJECT);
                    for i in 0..DATA_VECTORS {
                        self.gl.vertex_attrib_pointer_f32(
                            ATTR_DATA_BASE + i,
                            4,
                            glow::FLOAT,
                            false,
                            stride,
                            28 + (i as i32) * 16,
                        );
                        self.gl.enable_vertex_attrib_array(ATTR_DATA_BASE + i);
                    }
                }
            }
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn create_framebuffer(&self, color: Self::Texture) -> Result<Self::Framebuffer, String> {
        unsafe {
            let framebuffer = self.gl.create_framebuffer()?;
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color),
                0,
            );
            let status = self.gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                self.gl.delete_framebuffer(framebuffer);
                return Err(format!("framebuffer incomplete: {status:#06x}"));
            }
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            Ok(framebuffer)
        }
    }

    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) }
    }

    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer) {
        unsafe { self.gl.delete_framebuffer(framebuffer) }
    }

    fn set_viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
    }

    fn set_blend(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
                // Renderer output is premultiplied alpha.
                self.gl.blend_func(glow::ONE, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }

    fn set_scissor(&self, rect: Option<[i32; 4]>) {
        unsafe {
            match rect {
                Some([x, y, width, height]) => {
                    self.gl.enable(glow::SCISSOR_TEST);
                    self.gl.scissor(x, y, width, height);
                }
                None => self.gl.disable(glow::SCISSOR_TEST),
            }
        }
    }

    fn clear(&self) {
        unsafe {
            self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_indexed(&self, count: u32, offset: u32) {
        let byte_offset = (offset as usize * core::mem::size_of::<u32>()) as i32;
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count as i32, glow::UNSIGNED_INT, byte_offset);
        }
    }
}

unsafe fn set_default_sampling(gl: &glow::Context) {
    unsafe {
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
    }
}
