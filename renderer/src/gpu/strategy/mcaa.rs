// pathfinder/renderer/src/gpu/strategy/mcaa.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Mesh coverage antialiasing.
//!
//! Each path contributes instanced bounding-box quads whose fragments compute signed edge
//! coverage. Coverage is summed into the accumulation framebuffer and resolved per object. In
//! multicolor mode accumulation goes straight to the destination instead.

use crate::gpu::context::QUAD_ELEMENT_COUNT;
use crate::gpu::options::{AntialiasingStrategyKind, DirectRenderingMode, SubpixelAaType};
use crate::gpu::options::TransformType;
use crate::gpu::renderer::RendererCore;
use crate::gpu::shaders::{AttributeId, ProgramId, UniformId};
use crate::gpu::strategy::xcaa::XcaaState;
use crate::gpu::strategy::AntialiasingStrategy;
use crate::mesh_index::resolve_index_range;
use crate::meshes::B_BOX_SIZE;
use pathfinder_geometry::color::ColorF;
use pathfinder_gpu::{BlendState, BufferTarget, DepthFunc, DepthState, Device, Primitive};
use pathfinder_gpu::{RenderState, UniformData, VertexAttrClass, VertexAttrDescriptor};
use pathfinder_gpu::VertexAttrType;
use std::mem;

const B_BOX_STRIDE: usize = B_BOX_SIZE * 4;

pub struct MeshCoverageStrategy<D> where D: Device {
    xcaa: XcaaState<D>,
    vertex_array: Option<D::VertexArray>,
}

impl<D> MeshCoverageStrategy<D> where D: Device {
    pub fn new(subpixel_aa: SubpixelAaType) -> MeshCoverageStrategy<D> {
        MeshCoverageStrategy { xcaa: XcaaState::new(subpixel_aa), vertex_array: None }
    }

    #[inline]
    pub fn xcaa(&self) -> &XcaaState<D> {
        &self.xcaa
    }

    #[inline]
    fn uses_aa_framebuffer(&self, core: &RendererCore<D>) -> bool {
        !core.scene.is_multicolor()
    }

    fn blend_state(&self, core: &RendererCore<D>) -> BlendState {
        if core.scene.is_multicolor() {
            BlendState::RGBOneAlphaOneMinusSrcAlpha
        } else {
            BlendState::RGBOneAlphaOne
        }
    }

    fn depth_state(&self) -> Option<DepthState> {
        match self.direct_rendering_mode() {
            DirectRenderingMode::Conservative => {
                Some(DepthState { func: DepthFunc::Greater, write: false })
            }
            DirectRenderingMode::None | DirectRenderingMode::Color => None,
        }
    }

    fn antialias_edges(&self, core: &RendererCore<D>, object_index: usize) {
        let vertex_array = match self.vertex_array {
            Some(ref vertex_array) => vertex_array,
            None => return,
        };
        let (meshes, mesh_buffers) = match core.object_meshes(object_index) {
            Some(object_meshes) => object_meshes,
            None => return,
        };

        let path_range = core.path_range_for_object(object_index);
        let instances = resolve_index_range(&meshes.b_box_path_ranges, path_range);
        if instances.is_empty() {
            return;
        }

        let device = &core.device;
        let program = core.program(ProgramId::Mcaa);
        device.bind_vertex_array(vertex_array);
        device.use_program(&program.program);
        core.context.init_instanced_quad(device, program);

        let b_box_offset = instances.start as usize * B_BOX_STRIDE;
        device.bind_buffer(&mesh_buffers.b_boxes, BufferTarget::Vertex);
        let b_box_attributes = [
            AttributeId::Rect,
            AttributeId::UV,
            AttributeId::DUVDX,
            AttributeId::DUVDY,
            AttributeId::SignMode,
        ];
        for (index, &attribute) in b_box_attributes.iter().enumerate() {
            program.configure_attribute_if_present(device, attribute, &VertexAttrDescriptor {
                size: 4,
                class: VertexAttrClass::Float,
                attr_type: VertexAttrType::F32,
                stride: B_BOX_STRIDE,
                offset: b_box_offset + index * 16,
                divisor: 1,
            });
        }

        device.bind_buffer(&mesh_buffers.b_box_path_ids, BufferTarget::Vertex);
        program.configure_attribute_if_present(device, AttributeId::PathID, &VertexAttrDescriptor {
            size: 1,
            class: VertexAttrClass::Float,
            attr_type: VertexAttrType::U16,
            stride: 0,
            offset: instances.start as usize * mem::size_of::<u16>(),
            divisor: 1,
        });

        self.xcaa.set_aa_uniforms(core, program, object_index, self.transform_type());
        core.set_path_colors_uniform(program, object_index, 3);
        program.set_uniform_if_present(device,
                                       UniformId::Multicolor,
                                       UniformData::Int(core.scene.is_multicolor() as i32));

        device.draw_elements_instanced(Primitive::Triangles,
                                       QUAD_ELEMENT_COUNT,
                                       instances.length(),
                                       &RenderState {
                                           blend: self.blend_state(core),
                                           depth: self.depth_state(),
                                           scissor: Some(self.xcaa.supersampled_used_rect(core)),
                                           ..RenderState::default()
                                       });
    }
}

impl<D> AntialiasingStrategy<D> for MeshCoverageStrategy<D> where D: Device {
    #[inline]
    fn kind(&self) -> AntialiasingStrategyKind {
        AntialiasingStrategyKind::Mcaa
    }

    fn attach_meshes(&mut self, core: &RendererCore<D>) {
        let uses_resolve_program = self.uses_aa_framebuffer(core);
        self.xcaa.attach_meshes(core, uses_resolve_program);
        self.vertex_array = Some(core.device.create_vertex_array());
    }

    fn set_framebuffer_size(&mut self, core: &RendererCore<D>) {
        self.xcaa.set_framebuffer_size(core);
    }

    fn antialias_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        let uses_aa_framebuffer = self.uses_aa_framebuffer(core);
        self.xcaa.upload_path_bounds(core, object_index);
        self.xcaa.prepare_aa(core, uses_aa_framebuffer);
        self.xcaa.clear_for_aa(core, uses_aa_framebuffer);
        self.antialias_edges(core, object_index);
    }

    fn finish_antialiasing_object(&mut self, core: &RendererCore<D>, _: usize) {
        self.xcaa.finish_antialiasing_object(core, self.uses_aa_framebuffer(core));
    }

    fn resolve_aa_for_object(&mut self, core: &RendererCore<D>, _: usize) {
        self.xcaa.resolve_aa_for_object(core,
                                        self.uses_aa_framebuffer(core),
                                        ColorF::black());
    }

    #[inline]
    fn direct_rendering_mode(&self) -> DirectRenderingMode {
        DirectRenderingMode::Conservative
    }

    #[inline]
    fn transform_type(&self) -> TransformType {
        TransformType::Affine
    }
}
