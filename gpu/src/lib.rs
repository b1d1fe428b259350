// pathfinder/gpu/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Minimal abstractions over GPU device capabilities.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

use crate::resources::ResourceLoader;
use pathfinder_geometry::color::ColorF;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use pathfinder_simd::default::F32x4;
use std::io;
use thiserror::Error;

pub mod resources;

/// A stateful command-issuing GPU device.
///
/// Every method issues commands into a single ordered stream and returns without waiting for
/// the GPU. Objects created by a device release their GPU storage when dropped.
pub trait Device: Sized {
    type Buffer;
    type Framebuffer;
    type Program;
    type Shader;
    type Texture;
    type Uniform;
    type VertexArray;
    type VertexAttr;

    fn create_texture(&self, format: TextureFormat, size: Vector2I) -> Self::Texture;
    fn create_texture_from_data(&self,
                                format: TextureFormat,
                                size: Vector2I,
                                data: TextureDataRef)
                                -> Self::Texture;
    fn create_shader_from_source(&self, name: &str, source: &[u8], kind: ShaderKind)
                                 -> Result<Self::Shader, ProgramError>;
    fn create_vertex_array(&self) -> Self::VertexArray;
    fn create_program_from_shaders(&self,
                                   name: &str,
                                   vertex_shader: Self::Shader,
                                   fragment_shader: Self::Shader)
                                   -> Result<Self::Program, ProgramError>;
    /// Looks up `a<name>`. Returns `None` if the program does not declare it.
    fn get_vertex_attr(&self, program: &Self::Program, name: &str) -> Option<Self::VertexAttr>;
    /// Looks up `u<name>`. Returns `None` if the program does not declare it.
    fn get_uniform(&self, program: &Self::Program, name: &str) -> Option<Self::Uniform>;
    fn use_program(&self, program: &Self::Program);
    fn configure_vertex_attr(&self, attr: &Self::VertexAttr, descriptor: &VertexAttrDescriptor);
    fn set_uniform(&self, uniform: &Self::Uniform, data: UniformData);
    fn create_framebuffer(&self, texture: Self::Texture, depth_texture: Option<Self::Texture>)
                          -> Self::Framebuffer;
    fn create_buffer(&self) -> Self::Buffer;
    fn upload_to_buffer<T>(&self,
                           buffer: &Self::Buffer,
                           data: &[T],
                           target: BufferTarget,
                           mode: BufferUploadMode);
    fn framebuffer_texture<'f>(&self, framebuffer: &'f Self::Framebuffer) -> &'f Self::Texture;
    fn texture_size(&self, texture: &Self::Texture) -> Vector2I;
    fn set_texture_sampling_mode(&self, texture: &Self::Texture, flags: TextureSamplingFlags);
    /// Replaces the contents of the rectangle `(0, 0)..size` of `texture`.
    fn upload_to_texture(&self, texture: &Self::Texture, size: Vector2I, data: TextureDataRef);
    fn clear(&self, params: &ClearParams);
    fn draw_arrays(&self,
                   primitive: Primitive,
                   first: u32,
                   index_count: u32,
                   render_state: &RenderState);
    fn draw_elements(&self,
                     primitive: Primitive,
                     first: u32,
                     index_count: u32,
                     render_state: &RenderState);
    fn draw_arrays_instanced(&self,
                             primitive: Primitive,
                             index_count: u32,
                             instance_count: u32,
                             render_state: &RenderState);
    fn draw_elements_instanced(&self,
                               primitive: Primitive,
                               index_count: u32,
                               instance_count: u32,
                               render_state: &RenderState);

    fn bind_vertex_array(&self, vertex_array: &Self::VertexArray);
    fn bind_buffer(&self, buffer: &Self::Buffer, target: BufferTarget);
    fn bind_default_framebuffer(&self, viewport: RectI);
    fn bind_framebuffer(&self, framebuffer: &Self::Framebuffer);
    fn bind_texture(&self, texture: &Self::Texture, unit: u32);
    fn set_viewport(&self, viewport: RectI);

    fn create_texture_from_png(&self, resources: &dyn ResourceLoader, name: &str)
                               -> Result<Self::Texture, ProgramError> {
        let path = format!("textures/{}.png", name);
        let data = resources.slurp(&path)
                            .map_err(|source| ProgramError::Resource { path: path.clone(), source })?;
        let (size, pixels) = decode_luma_png(&path, &data)?;
        Ok(self.create_texture_from_data(TextureFormat::R8, size, TextureDataRef::U8(&pixels)))
    }

    fn create_shader(&self, resources: &dyn ResourceLoader, name: &str, kind: ShaderKind)
                     -> Result<Self::Shader, ProgramError> {
        let suffix = match kind { ShaderKind::Vertex => 'v', ShaderKind::Fragment => 'f' };
        let path = format!("shaders/{}.{}s.glsl", name, suffix);
        let source = resources.slurp(&path)
                              .map_err(|source| ProgramError::Resource { path, source })?;
        self.create_shader_from_source(name, &source, kind)
    }

    fn create_program(&self, resources: &dyn ResourceLoader, name: &str)
                      -> Result<Self::Program, ProgramError> {
        let vertex_shader = self.create_shader(resources, name, ShaderKind::Vertex)?;
        let fragment_shader = self.create_shader(resources, name, ShaderKind::Fragment)?;
        let program = self.create_program_from_shaders(name, vertex_shader, fragment_shader)?;
        debug!("linked program `{}`", name);
        Ok(program)
    }
}

/// Failure to build a shader program or one of its inputs.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{kind:?} shader `{name}` failed to compile:\n{log}")]
    Compile { name: String, kind: ShaderKind, log: String },
    #[error("program `{name}` failed to link:\n{log}")]
    Link { name: String, log: String },
    #[error("failed to read resource `{path}`")]
    Resource { path: String, #[source] source: io::Error },
    #[error("failed to decode image `{path}`: {message}")]
    Image { path: String, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    R8,
    RGBA8,
    RGBA16F,
    RGBA32F,
    Depth24,
}

impl TextureFormat {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            TextureFormat::R8 | TextureFormat::Depth24 => 1,
            TextureFormat::RGBA8 | TextureFormat::RGBA16F | TextureFormat::RGBA32F => 4,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TextureDataRef<'a> {
    U8(&'a [u8]),
    F32(&'a [f32]),
}

impl<'a> TextureDataRef<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        match *self {
            TextureDataRef::U8(data) => data.len(),
            TextureDataRef::F32(data) => data.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

bitflags! {
    pub struct TextureSamplingFlags: u8 {
        const NEAREST_MIN = 0x01;
        const NEAREST_MAG = 0x02;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexAttrType {
    F32,
    I16,
    U16,
    U8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VertexAttrClass {
    Float,
    FloatNorm,
    Int,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexAttrDescriptor {
    pub size: usize,
    pub class: VertexAttrClass,
    pub attr_type: VertexAttrType,
    pub stride: usize,
    pub offset: usize,
    pub divisor: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BufferTarget {
    Vertex,
    Index,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BufferUploadMode {
    Static,
    Dynamic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformData {
    Int(i32),
    Float(f32),
    Vec2(F32x4),
    Vec4(F32x4),
    Mat4([F32x4; 4]),
    TextureUnit(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Triangles,
    Lines,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClearParams {
    pub color: Option<ColorF>,
    pub depth: Option<f32>,
    /// Restricts the clear to this rectangle of the bound framebuffer.
    pub rect: Option<RectI>,
}

impl ClearParams {
    #[inline]
    pub fn has_ops(&self) -> bool {
        self.color.is_some() || self.depth.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub blend: BlendState,
    pub depth: Option<DepthState>,
    pub cull_back_faces: bool,
    pub scissor: Option<RectI>,
    pub color_mask: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendState {
    Off,
    /// `ONE, ONE` on every channel.
    RGBOneAlphaOne,
    /// `ONE, ONE_MINUS_SRC_ALPHA` on color and `ONE, ONE` on alpha.
    RGBOneAlphaOneMinusSrcAlpha,
}

#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct DepthState {
    pub func: DepthFunc,
    pub write: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DepthFunc {
    Less,
    Greater,
    Always,
}

impl Default for RenderState {
    #[inline]
    fn default() -> RenderState {
        RenderState {
            blend: BlendState::default(),
            depth: None,
            cull_back_faces: false,
            scissor: None,
            color_mask: true,
        }
    }
}

impl Default for BlendState {
    #[inline]
    fn default() -> BlendState {
        BlendState::Off
    }
}

impl Default for DepthFunc {
    #[inline]
    fn default() -> DepthFunc {
        DepthFunc::Less
    }
}

/// Decodes a PNG into 8-bit luminance, as lookup tables are stored.
pub fn decode_luma_png(path: &str, data: &[u8]) -> Result<(Vector2I, Vec<u8>), ProgramError> {
    let image = image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .map_err(|err| ProgramError::Image { path: path.to_owned(), message: err.to_string() })?
        .to_luma8();
    let size = Vector2I::new(image.width() as i32, image.height() as i32);
    Ok((size, image.into_raw()))
}

impl UniformData {
    #[inline]
    pub fn from_vector_2i(vector: Vector2I) -> UniformData {
        UniformData::Vec2(F32x4::new(vector.x() as f32, vector.y() as f32, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_luma_png, ProgramError};
    use image::png::PngEncoder;
    use image::ColorType;
    use pathfinder_geometry::vector::Vector2I;

    #[test]
    fn test_decode_luma_png() {
        let pixels: Vec<u8> = (0..12).map(|value| value * 20).collect();
        let mut png = vec![];
        if let Err(err) = PngEncoder::new(&mut png).encode(&pixels, 4, 3, ColorType::L8) {
            panic!("failed to encode: {}", err);
        }

        match decode_luma_png("textures/test.png", &png) {
            Ok((size, decoded)) => {
                assert_eq!(size, Vector2I::new(4, 3));
                assert_eq!(decoded, pixels);
            }
            Err(err) => panic!("failed to decode: {}", err),
        }
    }

    #[test]
    fn test_decode_garbage_reports_path() {
        match decode_luma_png("textures/bad.png", b"not a png") {
            Err(ProgramError::Image { path, .. }) => assert_eq!(path, "textures/bad.png"),
            Err(err) => panic!("unexpected error: {}", err),
            Ok(_) => panic!("decoded garbage"),
        }
    }
}
