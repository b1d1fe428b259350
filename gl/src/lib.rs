// pathfinder/gl/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An OpenGL 3.3 implementation of the device abstraction.
//!
//! The embedder is responsible for creating a context and loading function pointers with
//! `gl::load_with()` before constructing a `GLDevice`.

#[macro_use]
extern crate log;

use gl::types::{GLboolean, GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint, GLvoid};
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use pathfinder_gpu::{BlendState, BufferTarget, BufferUploadMode, ClearParams, DepthFunc, Device};
use pathfinder_gpu::{Primitive, ProgramError, RenderState, ShaderKind, TextureDataRef};
use pathfinder_gpu::{TextureFormat, TextureSamplingFlags, UniformData, VertexAttrClass};
use pathfinder_gpu::{VertexAttrDescriptor, VertexAttrType};
use std::ffi::CString;
use std::mem;
use std::ptr;

pub struct GLDevice {
    default_framebuffer: GLuint,
}

impl GLDevice {
    #[inline]
    pub fn new(default_framebuffer: GLuint) -> GLDevice {
        GLDevice { default_framebuffer }
    }

    #[inline]
    pub fn set_default_framebuffer(&mut self, framebuffer: GLuint) {
        self.default_framebuffer = framebuffer;
    }

    fn set_texture_parameters(&self, texture: &GLTexture) {
        self.bind_texture(texture, 0);
        unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint); ck();
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint); ck();
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            ck();
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            ck();
        }
    }

    fn set_render_state(&self, render_state: &RenderState) {
        unsafe {
            match render_state.blend {
                BlendState::Off => {
                    gl::Disable(gl::BLEND); ck();
                }
                BlendState::RGBOneAlphaOne => {
                    gl::BlendEquation(gl::FUNC_ADD); ck();
                    gl::BlendFunc(gl::ONE, gl::ONE); ck();
                    gl::Enable(gl::BLEND); ck();
                }
                BlendState::RGBOneAlphaOneMinusSrcAlpha => {
                    gl::BlendEquation(gl::FUNC_ADD); ck();
                    gl::BlendFuncSeparate(gl::ONE, gl::ONE_MINUS_SRC_ALPHA, gl::ONE, gl::ONE);
                    ck();
                    gl::Enable(gl::BLEND); ck();
                }
            }

            match render_state.depth {
                None => {
                    gl::Disable(gl::DEPTH_TEST); ck();
                }
                Some(ref state) => {
                    gl::DepthFunc(state.func.to_gl_depth_func()); ck();
                    gl::DepthMask(state.write as GLboolean); ck();
                    gl::Enable(gl::DEPTH_TEST); ck();
                }
            }

            if render_state.cull_back_faces {
                gl::FrontFace(gl::CCW); ck();
                gl::CullFace(gl::BACK); ck();
                gl::Enable(gl::CULL_FACE); ck();
            } else {
                gl::Disable(gl::CULL_FACE); ck();
            }

            match render_state.scissor {
                None => {
                    gl::Disable(gl::SCISSOR_TEST); ck();
                }
                Some(rect) => {
                    set_scissor_rect(rect);
                }
            }

            let color_mask = render_state.color_mask as GLboolean;
            gl::ColorMask(color_mask, color_mask, color_mask, color_mask); ck();
        }
    }

    fn reset_render_state(&self, render_state: &RenderState) {
        unsafe {
            if render_state.blend != BlendState::Off {
                gl::Disable(gl::BLEND); ck();
            }
            if render_state.depth.is_some() {
                gl::DepthMask(gl::TRUE); ck();
                gl::Disable(gl::DEPTH_TEST); ck();
            }
            if render_state.cull_back_faces {
                gl::Disable(gl::CULL_FACE); ck();
            }
            if render_state.scissor.is_some() {
                gl::Disable(gl::SCISSOR_TEST); ck();
            }
            gl::ColorMask(gl::TRUE, gl::TRUE, gl::TRUE, gl::TRUE); ck();
        }
    }
}

impl Device for GLDevice {
    type Buffer = GLBuffer;
    type Framebuffer = GLFramebuffer;
    type Program = GLProgram;
    type Shader = GLShader;
    type Texture = GLTexture;
    type Uniform = GLUniform;
    type VertexArray = GLVertexArray;
    type VertexAttr = GLVertexAttr;

    fn create_texture(&self, format: TextureFormat, size: Vector2I) -> GLTexture {
        let mut texture = GLTexture { gl_texture: 0, size, format };
        unsafe {
            gl::GenTextures(1, &mut texture.gl_texture); ck();
            self.bind_texture(&texture, 0);
            gl::TexImage2D(gl::TEXTURE_2D,
                           0,
                           format.gl_internal_format(),
                           size.x() as GLsizei,
                           size.y() as GLsizei,
                           0,
                           format.gl_format(),
                           format.gl_type(),
                           ptr::null());
            ck();
        }

        self.set_texture_parameters(&texture);
        texture
    }

    fn create_texture_from_data(&self,
                                format: TextureFormat,
                                size: Vector2I,
                                data: TextureDataRef)
                                -> GLTexture {
        let texture = self.create_texture(format, size);
        self.upload_to_texture(&texture, size, data);
        texture
    }

    fn create_shader_from_source(&self, name: &str, source: &[u8], kind: ShaderKind)
                                 -> Result<GLShader, ProgramError> {
        let gl_shader_kind = match kind {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = GLShader { gl_shader: gl::CreateShader(gl_shader_kind) };
            ck();
            gl::ShaderSource(shader.gl_shader,
                             1,
                             [source.as_ptr() as *const GLchar].as_ptr(),
                             [source.len() as GLint].as_ptr());
            ck();
            gl::CompileShader(shader.gl_shader); ck();

            let mut compile_status = 0;
            gl::GetShaderiv(shader.gl_shader, gl::COMPILE_STATUS, &mut compile_status); ck();
            if compile_status != gl::TRUE as GLint {
                let mut info_log_length = 0;
                gl::GetShaderiv(shader.gl_shader, gl::INFO_LOG_LENGTH, &mut info_log_length);
                ck();
                let mut info_log = vec![0; info_log_length as usize];
                gl::GetShaderInfoLog(shader.gl_shader,
                                     info_log.len() as GLint,
                                     ptr::null_mut(),
                                     info_log.as_mut_ptr() as *mut GLchar);
                ck();
                let log = String::from_utf8_lossy(&info_log).into_owned();
                error!("{:?} shader '{}' compilation failed:\n{}", kind, name, log);
                return Err(ProgramError::Compile { name: name.to_owned(), kind, log });
            }

            Ok(shader)
        }
    }

    fn create_vertex_array(&self) -> GLVertexArray {
        unsafe {
            let mut array = GLVertexArray { gl_vertex_array: 0 };
            gl::GenVertexArrays(1, &mut array.gl_vertex_array); ck();
            array
        }
    }

    fn create_program_from_shaders(&self,
                                   name: &str,
                                   vertex_shader: GLShader,
                                   fragment_shader: GLShader)
                                   -> Result<GLProgram, ProgramError> {
        unsafe {
            let program = GLProgram {
                gl_program: gl::CreateProgram(),
                vertex_shader,
                fragment_shader,
            };
            ck();
            gl::AttachShader(program.gl_program, program.vertex_shader.gl_shader); ck();
            gl::AttachShader(program.gl_program, program.fragment_shader.gl_shader); ck();
            gl::LinkProgram(program.gl_program); ck();

            let mut link_status = 0;
            gl::GetProgramiv(program.gl_program, gl::LINK_STATUS, &mut link_status); ck();
            if link_status != gl::TRUE as GLint {
                let mut info_log_length = 0;
                gl::GetProgramiv(program.gl_program, gl::INFO_LOG_LENGTH, &mut info_log_length);
                ck();
                let mut info_log = vec![0; info_log_length as usize];
                gl::GetProgramInfoLog(program.gl_program,
                                      info_log.len() as GLint,
                                      ptr::null_mut(),
                                      info_log.as_mut_ptr() as *mut GLchar);
                ck();
                let log = String::from_utf8_lossy(&info_log).into_owned();
                error!("Program '{}' linking failed:\n{}", name, log);
                return Err(ProgramError::Link { name: name.to_owned(), log });
            }

            Ok(program)
        }
    }

    fn get_vertex_attr(&self, program: &GLProgram, name: &str) -> Option<GLVertexAttr> {
        let name = CString::new(format!("a{}", name)).ok()?;
        let attr = unsafe {
            let attr = gl::GetAttribLocation(program.gl_program, name.as_ptr() as *const GLchar);
            ck();
            attr
        };
        if attr < 0 {
            None
        } else {
            Some(GLVertexAttr { attr: attr as GLuint })
        }
    }

    fn get_uniform(&self, program: &GLProgram, name: &str) -> Option<GLUniform> {
        let name = CString::new(format!("u{}", name)).ok()?;
        let location = unsafe {
            let location = gl::GetUniformLocation(program.gl_program,
                                                  name.as_ptr() as *const GLchar);
            ck();
            location
        };
        if location < 0 {
            None
        } else {
            Some(GLUniform { location })
        }
    }

    fn use_program(&self, program: &GLProgram) {
        unsafe {
            gl::UseProgram(program.gl_program); ck();
        }
    }

    fn configure_vertex_attr(&self, attr: &GLVertexAttr, descriptor: &VertexAttrDescriptor) {
        unsafe {
            let attr_type = descriptor.attr_type.to_gl_type();
            match descriptor.class {
                VertexAttrClass::Float | VertexAttrClass::FloatNorm => {
                    let normalized = if descriptor.class == VertexAttrClass::FloatNorm {
                        gl::TRUE
                    } else {
                        gl::FALSE
                    };
                    gl::VertexAttribPointer(attr.attr,
                                            descriptor.size as GLint,
                                            attr_type,
                                            normalized,
                                            descriptor.stride as GLint,
                                            descriptor.offset as *const GLvoid);
                    ck();
                }
                VertexAttrClass::Int => {
                    gl::VertexAttribIPointer(attr.attr,
                                             descriptor.size as GLint,
                                             attr_type,
                                             descriptor.stride as GLint,
                                             descriptor.offset as *const GLvoid);
                    ck();
                }
            }
            gl::VertexAttribDivisor(attr.attr, descriptor.divisor); ck();
            gl::EnableVertexAttribArray(attr.attr); ck();
        }
    }

    fn set_uniform(&self, uniform: &GLUniform, data: UniformData) {
        unsafe {
            match data {
                UniformData::Int(value) => {
                    gl::Uniform1i(uniform.location, value); ck();
                }
                UniformData::Float(value) => {
                    gl::Uniform1f(uniform.location, value); ck();
                }
                UniformData::Vec2(data) => {
                    gl::Uniform2f(uniform.location, data[0], data[1]); ck();
                }
                UniformData::Vec4(data) => {
                    gl::Uniform4f(uniform.location, data[0], data[1], data[2], data[3]); ck();
                }
                UniformData::Mat4(columns) => {
                    let mut values = [0.0; 16];
                    for (column_index, column) in columns.iter().enumerate() {
                        for row_index in 0..4 {
                            values[column_index * 4 + row_index] = column[row_index];
                        }
                    }
                    gl::UniformMatrix4fv(uniform.location, 1, gl::FALSE, values.as_ptr()); ck();
                }
                UniformData::TextureUnit(unit) => {
                    gl::Uniform1i(uniform.location, unit as GLint); ck();
                }
            }
        }
    }

    fn create_framebuffer(&self, texture: GLTexture, depth_texture: Option<GLTexture>)
                          -> GLFramebuffer {
        let mut gl_framebuffer = 0;
        unsafe {
            gl::GenFramebuffers(1, &mut gl_framebuffer); ck();
            gl::BindFramebuffer(gl::FRAMEBUFFER, gl_framebuffer); ck();
            gl::FramebufferTexture2D(gl::FRAMEBUFFER,
                                     gl::COLOR_ATTACHMENT0,
                                     gl::TEXTURE_2D,
                                     texture.gl_texture,
                                     0);
            ck();
            if let Some(ref depth_texture) = depth_texture {
                gl::FramebufferTexture2D(gl::FRAMEBUFFER,
                                         gl::DEPTH_ATTACHMENT,
                                         gl::TEXTURE_2D,
                                         depth_texture.gl_texture,
                                         0);
                ck();
            }
            assert_eq!(gl::CheckFramebufferStatus(gl::FRAMEBUFFER), gl::FRAMEBUFFER_COMPLETE);
        }

        GLFramebuffer { gl_framebuffer, texture, depth_texture }
    }

    fn create_buffer(&self) -> GLBuffer {
        unsafe {
            let mut gl_buffer = 0;
            gl::GenBuffers(1, &mut gl_buffer); ck();
            GLBuffer { gl_buffer }
        }
    }

    fn upload_to_buffer<T>(&self,
                           buffer: &GLBuffer,
                           data: &[T],
                           target: BufferTarget,
                           mode: BufferUploadMode) {
        let target = target.to_gl_target();
        let mode = match mode {
            BufferUploadMode::Static => gl::STATIC_DRAW,
            BufferUploadMode::Dynamic => gl::DYNAMIC_DRAW,
        };
        unsafe {
            gl::BindBuffer(target, buffer.gl_buffer); ck();
            gl::BufferData(target,
                           (data.len() * mem::size_of::<T>()) as GLsizeiptr,
                           data.as_ptr() as *const GLvoid,
                           mode);
            ck();
        }
    }

    #[inline]
    fn framebuffer_texture<'f>(&self, framebuffer: &'f GLFramebuffer) -> &'f GLTexture {
        &framebuffer.texture
    }

    #[inline]
    fn texture_size(&self, texture: &GLTexture) -> Vector2I {
        texture.size
    }

    fn set_texture_sampling_mode(&self, texture: &GLTexture, flags: TextureSamplingFlags) {
        self.bind_texture(texture, 0);
        let filter = |nearest: bool| (if nearest { gl::NEAREST } else { gl::LINEAR }) as GLint;
        unsafe {
            gl::TexParameteri(gl::TEXTURE_2D,
                              gl::TEXTURE_MIN_FILTER,
                              filter(flags.contains(TextureSamplingFlags::NEAREST_MIN)));
            ck();
            gl::TexParameteri(gl::TEXTURE_2D,
                              gl::TEXTURE_MAG_FILTER,
                              filter(flags.contains(TextureSamplingFlags::NEAREST_MAG)));
            ck();
        }
    }

    fn upload_to_texture(&self, texture: &GLTexture, size: Vector2I, data: TextureDataRef) {
        assert!(size.x() <= texture.size.x() && size.y() <= texture.size.y());
        assert!(data.len() >= size.area() as usize * texture.format.channels());
        let data_ptr = match data {
            TextureDataRef::U8(data) => data.as_ptr() as *const GLvoid,
            TextureDataRef::F32(data) => data.as_ptr() as *const GLvoid,
        };
        unsafe {
            self.bind_texture(texture, 0);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1); ck();
            gl::TexSubImage2D(gl::TEXTURE_2D,
                              0,
                              0,
                              0,
                              size.x() as GLsizei,
                              size.y() as GLsizei,
                              texture.format.gl_format(),
                              texture.format.gl_type(),
                              data_ptr);
            ck();
        }
    }

    fn clear(&self, params: &ClearParams) {
        unsafe {
            if let Some(rect) = params.rect {
                set_scissor_rect(rect);
            }

            let mut flags = 0;
            if let Some(color) = params.color {
                gl::ColorMask(gl::TRUE, gl::TRUE, gl::TRUE, gl::TRUE); ck();
                gl::ClearColor(color.r(), color.g(), color.b(), color.a()); ck();
                flags |= gl::COLOR_BUFFER_BIT;
            }
            if let Some(depth) = params.depth {
                gl::DepthMask(gl::TRUE); ck();
                gl::ClearDepth(depth as _); ck();
                flags |= gl::DEPTH_BUFFER_BIT;
            }

            if flags != 0 {
                gl::Clear(flags); ck();
            }

            if params.rect.is_some() {
                gl::Disable(gl::SCISSOR_TEST); ck();
            }
        }
    }

    fn draw_arrays(&self,
                   primitive: Primitive,
                   first: u32,
                   index_count: u32,
                   render_state: &RenderState) {
        self.set_render_state(render_state);
        unsafe {
            gl::DrawArrays(primitive.to_gl_primitive(), first as GLint, index_count as GLsizei);
            ck();
        }
        self.reset_render_state(render_state);
    }

    fn draw_elements(&self,
                     primitive: Primitive,
                     first: u32,
                     index_count: u32,
                     render_state: &RenderState) {
        self.set_render_state(render_state);
        unsafe {
            let offset = first as usize * mem::size_of::<u32>();
            gl::DrawElements(primitive.to_gl_primitive(),
                             index_count as GLsizei,
                             gl::UNSIGNED_INT,
                             offset as *const GLvoid);
            ck();
        }
        self.reset_render_state(render_state);
    }

    fn draw_arrays_instanced(&self,
                             primitive: Primitive,
                             index_count: u32,
                             instance_count: u32,
                             render_state: &RenderState) {
        self.set_render_state(render_state);
        unsafe {
            gl::DrawArraysInstanced(primitive.to_gl_primitive(),
                                    0,
                                    index_count as GLsizei,
                                    instance_count as GLsizei);
            ck();
        }
        self.reset_render_state(render_state);
    }

    fn draw_elements_instanced(&self,
                               primitive: Primitive,
                               index_count: u32,
                               instance_count: u32,
                               render_state: &RenderState) {
        self.set_render_state(render_state);
        unsafe {
            gl::DrawElementsInstanced(primitive.to_gl_primitive(),
                                      index_count as GLsizei,
                                      gl::UNSIGNED_INT,
                                      ptr::null(),
                                      instance_count as GLsizei);
            ck();
        }
        self.reset_render_state(render_state);
    }

    #[inline]
    fn bind_vertex_array(&self, vertex_array: &GLVertexArray) {
        unsafe {
            gl::BindVertexArray(vertex_array.gl_vertex_array); ck();
        }
    }

    #[inline]
    fn bind_buffer(&self, buffer: &GLBuffer, target: BufferTarget) {
        unsafe {
            gl::BindBuffer(target.to_gl_target(), buffer.gl_buffer); ck();
        }
    }

    fn bind_default_framebuffer(&self, viewport: RectI) {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.default_framebuffer); ck();
        }
        self.set_viewport(viewport);
    }

    fn bind_framebuffer(&self, framebuffer: &GLFramebuffer) {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, framebuffer.gl_framebuffer); ck();
        }
        self.set_viewport(RectI::from_size(framebuffer.texture.size));
    }

    #[inline]
    fn bind_texture(&self, texture: &GLTexture, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit); ck();
            gl::BindTexture(gl::TEXTURE_2D, texture.gl_texture); ck();
        }
    }

    fn set_viewport(&self, viewport: RectI) {
        unsafe {
            let (origin, size) = (viewport.origin(), viewport.size());
            gl::Viewport(origin.x(), origin.y(), size.x(), size.y()); ck();
        }
    }
}

unsafe fn set_scissor_rect(rect: RectI) {
    let (origin, size) = (rect.origin(), rect.size());
    gl::Scissor(origin.x(), origin.y(), size.x(), size.y()); ck();
    gl::Enable(gl::SCISSOR_TEST); ck();
}

pub struct GLBuffer {
    pub gl_buffer: GLuint,
}

impl Drop for GLBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &mut self.gl_buffer); ck();
        }
    }
}

pub struct GLFramebuffer {
    pub gl_framebuffer: GLuint,
    pub texture: GLTexture,
    pub depth_texture: Option<GLTexture>,
}

impl Drop for GLFramebuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteFramebuffers(1, &mut self.gl_framebuffer); ck();
        }
    }
}

pub struct GLProgram {
    pub gl_program: GLuint,
    #[allow(dead_code)]
    vertex_shader: GLShader,
    #[allow(dead_code)]
    fragment_shader: GLShader,
}

impl Drop for GLProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.gl_program); ck();
        }
    }
}

pub struct GLShader {
    gl_shader: GLuint,
}

impl Drop for GLShader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.gl_shader); ck();
        }
    }
}

pub struct GLTexture {
    gl_texture: GLuint,
    pub size: Vector2I,
    pub format: TextureFormat,
}

impl Drop for GLTexture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &mut self.gl_texture); ck();
        }
    }
}

#[derive(Debug)]
pub struct GLUniform {
    location: GLint,
}

pub struct GLVertexArray {
    pub gl_vertex_array: GLuint,
}

impl Drop for GLVertexArray {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &mut self.gl_vertex_array); ck();
        }
    }
}

pub struct GLVertexAttr {
    attr: GLuint,
}

trait BufferTargetExt {
    fn to_gl_target(self) -> GLuint;
}

impl BufferTargetExt for BufferTarget {
    fn to_gl_target(self) -> GLuint {
        match self {
            BufferTarget::Vertex => gl::ARRAY_BUFFER,
            BufferTarget::Index => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

trait DepthFuncExt {
    fn to_gl_depth_func(self) -> GLenum;
}

impl DepthFuncExt for DepthFunc {
    fn to_gl_depth_func(self) -> GLenum {
        match self {
            DepthFunc::Less => gl::LESS,
            DepthFunc::Greater => gl::GREATER,
            DepthFunc::Always => gl::ALWAYS,
        }
    }
}

trait PrimitiveExt {
    fn to_gl_primitive(self) -> GLuint;
}

impl PrimitiveExt for Primitive {
    fn to_gl_primitive(self) -> GLuint {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::Lines => gl::LINES,
        }
    }
}

trait TextureFormatExt {
    fn gl_internal_format(self) -> GLint;
    fn gl_format(self) -> GLuint;
    fn gl_type(self) -> GLuint;
}

impl TextureFormatExt for TextureFormat {
    fn gl_internal_format(self) -> GLint {
        match self {
            TextureFormat::R8 => gl::R8 as GLint,
            TextureFormat::RGBA8 => gl::RGBA as GLint,
            TextureFormat::RGBA16F => gl::RGBA16F as GLint,
            TextureFormat::RGBA32F => gl::RGBA32F as GLint,
            TextureFormat::Depth24 => gl::DEPTH_COMPONENT24 as GLint,
        }
    }

    fn gl_format(self) -> GLuint {
        match self {
            TextureFormat::R8 => gl::RED,
            TextureFormat::RGBA8 | TextureFormat::RGBA16F | TextureFormat::RGBA32F => gl::RGBA,
            TextureFormat::Depth24 => gl::DEPTH_COMPONENT,
        }
    }

    fn gl_type(self) -> GLuint {
        match self {
            TextureFormat::R8 | TextureFormat::RGBA8 => gl::UNSIGNED_BYTE,
            TextureFormat::RGBA16F => gl::HALF_FLOAT,
            TextureFormat::RGBA32F => gl::FLOAT,
            TextureFormat::Depth24 => gl::UNSIGNED_INT,
        }
    }
}

trait VertexAttrTypeExt {
    fn to_gl_type(self) -> GLuint;
}

impl VertexAttrTypeExt for VertexAttrType {
    fn to_gl_type(self) -> GLuint {
        match self {
            VertexAttrType::F32 => gl::FLOAT,
            VertexAttrType::I16 => gl::SHORT,
            VertexAttrType::U16 => gl::UNSIGNED_SHORT,
            VertexAttrType::U8 => gl::UNSIGNED_BYTE,
        }
    }
}

// Error checking

#[cfg(debug_assertions)]
fn ck() {
    unsafe {
        let err = gl::GetError();
        if err != gl::NO_ERROR {
            panic!("GL error: 0x{:x} ({})", err, match err {
                gl::INVALID_ENUM => "INVALID_ENUM",
                gl::INVALID_VALUE => "INVALID_VALUE",
                gl::INVALID_OPERATION => "INVALID_OPERATION",
                gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
                gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
                _ => "Unknown"
            });
        }
    }
}

#[cfg(not(debug_assertions))]
fn ck() {}
