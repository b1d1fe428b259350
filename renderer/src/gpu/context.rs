// pathfinder/renderer/src/gpu/context.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Long-lived GPU objects that do not depend on the antialiasing configuration.

use crate::gpu::shaders::{AttributeId, ProgramId, ShaderProgram, ShaderPrograms};
use pathfinder_gpu::resources::ResourceLoader;
use pathfinder_gpu::{BufferTarget, BufferUploadMode, Device, ProgramError, VertexAttrClass};
use pathfinder_gpu::{VertexAttrDescriptor, VertexAttrType};

pub const MAX_PATHS: u32 = 65535;
pub const MAX_VERTICES: u32 = 4 * 1024 * 1024;

static QUAD_POSITIONS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
static QUAD_TEX_COORDS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
static QUAD_ELEMENTS: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub const QUAD_ELEMENT_COUNT: u32 = 6;

pub struct RenderContext<D> where D: Device {
    pub programs: ShaderPrograms<D>,
    pub quad_positions_buffer: D::Buffer,
    pub quad_tex_coords_buffer: D::Buffer,
    pub quad_elements_buffer: D::Buffer,
    /// `0.0..MAX_VERTICES` as floats.
    pub vertex_id_buffer: D::Buffer,
    /// `1..=MAX_PATHS` as `u16`s.
    pub instanced_path_id_buffer: D::Buffer,
    pub gamma_lut_texture: D::Texture,
    pub area_lut_texture: D::Texture,
}

impl<D> RenderContext<D> where D: Device {
    pub fn new(device: &D, resources: &dyn ResourceLoader)
               -> Result<RenderContext<D>, ProgramError> {
        let programs = ShaderPrograms::new(device, resources)?;

        let gamma_lut_texture = device.create_texture_from_png(resources, "gamma-lut")?;
        let area_lut_texture = device.create_texture_from_png(resources, "area-lut")?;

        let quad_positions_buffer = device.create_buffer();
        device.upload_to_buffer(&quad_positions_buffer,
                                &QUAD_POSITIONS,
                                BufferTarget::Vertex,
                                BufferUploadMode::Static);
        let quad_tex_coords_buffer = device.create_buffer();
        device.upload_to_buffer(&quad_tex_coords_buffer,
                                &QUAD_TEX_COORDS,
                                BufferTarget::Vertex,
                                BufferUploadMode::Static);
        let quad_elements_buffer = device.create_buffer();
        device.upload_to_buffer(&quad_elements_buffer,
                                &QUAD_ELEMENTS,
                                BufferTarget::Index,
                                BufferUploadMode::Static);

        let vertex_ids: Vec<f32> = (0..MAX_VERTICES).map(|id| id as f32).collect();
        let vertex_id_buffer = device.create_buffer();
        device.upload_to_buffer(&vertex_id_buffer,
                                &vertex_ids,
                                BufferTarget::Vertex,
                                BufferUploadMode::Static);

        let path_ids: Vec<u16> = (1..=MAX_PATHS).map(|id| id as u16).collect();
        let instanced_path_id_buffer = device.create_buffer();
        device.upload_to_buffer(&instanced_path_id_buffer,
                                &path_ids,
                                BufferTarget::Vertex,
                                BufferUploadMode::Static);

        info!("render context ready: {} programs linked", ProgramId::ALL.len());

        Ok(RenderContext {
            programs,
            quad_positions_buffer,
            quad_tex_coords_buffer,
            quad_elements_buffer,
            vertex_id_buffer,
            instanced_path_id_buffer,
            gamma_lut_texture,
            area_lut_texture,
        })
    }

    /// Points a vertex array at the unit quad for `program`.
    pub fn init_quad_vertex_array(&self,
                                  device: &D,
                                  vertex_array: &D::VertexArray,
                                  program: &ShaderProgram<D>) {
        device.bind_vertex_array(vertex_array);
        device.use_program(&program.program);

        device.bind_buffer(&self.quad_positions_buffer, BufferTarget::Vertex);
        program.configure_attribute_if_present(device, AttributeId::Position, &VEC2_ATTR);
        device.bind_buffer(&self.quad_tex_coords_buffer, BufferTarget::Vertex);
        program.configure_attribute_if_present(device, AttributeId::TexCoord, &VEC2_ATTR);
        device.bind_buffer(&self.quad_elements_buffer, BufferTarget::Index);
    }

    /// Points `aTessCoord` at the unit quad and binds the quad elements, for instanced draws.
    pub fn init_instanced_quad(&self,
                               device: &D,
                               program: &ShaderProgram<D>) {
        device.bind_buffer(&self.quad_positions_buffer, BufferTarget::Vertex);
        program.configure_attribute_if_present(device, AttributeId::TessCoord, &VEC2_ATTR);
        device.bind_buffer(&self.quad_elements_buffer, BufferTarget::Index);
    }
}

const VEC2_ATTR: VertexAttrDescriptor = VertexAttrDescriptor {
    size: 2,
    class: VertexAttrClass::Float,
    attr_type: VertexAttrType::F32,
    stride: 0,
    offset: 0,
    divisor: 0,
};
