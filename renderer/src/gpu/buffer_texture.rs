// pathfinder/renderer/src/gpu/buffer_texture.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Flat arrays passed to shaders as RGBA textures.
//!
//! Four elements are packed into each texel. Shaders find element `i` by dividing by the
//! dimensions uniform that accompanies every buffer texture.

use crate::gpu::shaders::{ShaderProgram, UniformId};
use pathfinder_geometry::vector::Vector2I;
use pathfinder_gpu::{Device, TextureDataRef, TextureFormat, TextureSamplingFlags, UniformData};

/// What a buffer texture holds, which fixes the uniforms it binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTextureRole {
    PathColors,
    PathTransformST,
    PathTransformExt,
    PathBounds,
}

impl BufferTextureRole {
    #[inline]
    pub fn uniforms(self) -> (UniformId, UniformId) {
        match self {
            BufferTextureRole::PathColors => {
                (UniformId::PathColors, UniformId::PathColorsDimensions)
            }
            BufferTextureRole::PathTransformST => {
                (UniformId::PathTransformST, UniformId::PathTransformSTDimensions)
            }
            BufferTextureRole::PathTransformExt => {
                (UniformId::PathTransformExt, UniformId::PathTransformExtDimensions)
            }
            BufferTextureRole::PathBounds => {
                (UniformId::PathBounds, UniformId::PathBoundsDimensions)
            }
        }
    }
}

pub struct BufferTexture<D> where D: Device {
    role: BufferTextureRole,
    texture: Option<D::Texture>,
    format: TextureFormat,
    size: Vector2I,
}

impl<D> BufferTexture<D> where D: Device {
    #[inline]
    pub fn new(role: BufferTextureRole) -> BufferTexture<D> {
        BufferTexture { role, texture: None, format: TextureFormat::RGBA8, size: Vector2I::default() }
    }

    /// The backing texture, once something has been uploaded.
    #[inline]
    pub fn texture(&self) -> Option<&D::Texture> {
        self.texture.as_ref()
    }

    /// The size of the backing texture, in texels.
    #[inline]
    pub fn size(&self) -> Vector2I {
        self.size
    }

    /// Capacity in elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.size.area() as usize * 4
    }

    pub fn upload(&mut self, device: &D, data: TextureDataRef) {
        let format = match data {
            TextureDataRef::U8(_) => TextureFormat::RGBA8,
            TextureDataRef::F32(_) => TextureFormat::RGBA32F,
        };
        let texel_count = ((data.len() + 3) / 4).max(1);

        if self.texture.is_none() || self.format != format || self.capacity() < data.len() {
            let width = (texel_count as f64).sqrt().ceil() as usize;
            let height = (texel_count + width - 1) / width;
            let size = Vector2I::new(width as i32, height as i32);
            debug!("allocating {:?} buffer texture: {}x{}", self.role, width, height);

            let texture = device.create_texture(format, size);
            device.set_texture_sampling_mode(&texture,
                                             TextureSamplingFlags::NEAREST_MIN |
                                             TextureSamplingFlags::NEAREST_MAG);
            self.texture = Some(texture);
            self.format = format;
            self.size = size;
        }

        // Pad to whole rows so the upload covers the full texture.
        let (size, capacity) = (self.size, self.capacity());
        let texture = match self.texture {
            Some(ref texture) => texture,
            None => return,
        };
        match data {
            TextureDataRef::U8(data) => {
                let mut padded = data.to_vec();
                padded.resize(capacity, 0);
                device.upload_to_texture(texture, size, TextureDataRef::U8(&padded));
            }
            TextureDataRef::F32(data) => {
                let mut padded = data.to_vec();
                padded.resize(capacity, 0.0);
                device.upload_to_texture(texture, size, TextureDataRef::F32(&padded));
            }
        }
    }

    /// Binds the texture to `texture_unit` and sets its uniforms, if `program` declares them.
    pub fn bind(&self, device: &D, program: &ShaderProgram<D>, texture_unit: u32) {
        let texture = match self.texture {
            None => return,
            Some(ref texture) => texture,
        };
        let (texture_uniform, dimensions_uniform) = self.role.uniforms();
        if program.has_uniform(texture_uniform) {
            device.bind_texture(texture, texture_unit);
            device.set_uniform(program.uniform(texture_uniform),
                               UniformData::TextureUnit(texture_unit));
        }
        program.set_uniform_if_present(device,
                                       dimensions_uniform,
                                       UniformData::from_vector_2i(self.size));
    }
}

/// One lazily-created buffer texture per object.
pub struct BufferTextureCache<D> where D: Device {
    role: BufferTextureRole,
    entries: Vec<Option<BufferTexture<D>>>,
}

impl<D> BufferTextureCache<D> where D: Device {
    #[inline]
    pub fn new(role: BufferTextureRole) -> BufferTextureCache<D> {
        BufferTextureCache { role, entries: vec![] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keeps the entries below `object_count` and leaves new slots empty.
    pub fn resize(&mut self, object_count: usize) {
        self.entries.resize_with(object_count, || None);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get_or_create(&mut self, object_index: usize) -> &mut BufferTexture<D> {
        if object_index >= self.entries.len() {
            self.resize(object_index + 1);
        }
        let role = self.role;
        self.entries[object_index].get_or_insert_with(|| BufferTexture::new(role))
    }

    #[inline]
    pub fn get(&self, object_index: usize) -> Option<&BufferTexture<D>> {
        self.entries.get(object_index).and_then(|entry| entry.as_ref())
    }

    /// Binds the entry for `object_index`, if one has been uploaded.
    pub fn bind(&self, device: &D, program: &ShaderProgram<D>, object_index: usize, unit: u32) {
        match self.get(object_index) {
            Some(buffer_texture) => buffer_texture.bind(device, program, unit),
            None => warn!("no {:?} buffer texture for object {}", self.role, object_index),
        }
    }
}
