// pathfinder/renderer/src/gpu/strategy/stencil.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Stencil segment antialiasing.
//!
//! Every quadratic segment is drawn as an instanced quad, once for each side of the curve, and
//! the signed area it covers is summed into the accumulation framebuffer.

use crate::gpu::context::QUAD_ELEMENT_COUNT;
use crate::gpu::options::{AntialiasingStrategyKind, DirectRenderingMode, SubpixelAaType};
use crate::gpu::options::TransformType;
use crate::gpu::renderer::RendererCore;
use crate::gpu::shaders::{AttributeId, ProgramId, UniformId};
use crate::gpu::strategy::xcaa::XcaaState;
use crate::gpu::strategy::AntialiasingStrategy;
use crate::mesh_index::resolve_index_range;
use crate::meshes::{PackedMeshes, STENCIL_SEGMENT_SIZE};
use pathfinder_geometry::color::ColorF;
use pathfinder_geometry::range::Range;
use pathfinder_gpu::{BlendState, BufferTarget, Device, Primitive, RenderState, UniformData};
use pathfinder_gpu::{VertexAttrClass, VertexAttrDescriptor, VertexAttrType};
use std::mem;

const STENCIL_SEGMENT_STRIDE: usize = STENCIL_SEGMENT_SIZE * 4;

pub struct StencilSegmentStrategy<D> where D: Device {
    xcaa: XcaaState<D>,
    vertex_array: Option<D::VertexArray>,
}

impl<D> StencilSegmentStrategy<D> where D: Device {
    pub fn new(subpixel_aa: SubpixelAaType) -> StencilSegmentStrategy<D> {
        StencilSegmentStrategy { xcaa: XcaaState::new(subpixel_aa), vertex_array: None }
    }

    #[inline]
    pub fn xcaa(&self) -> &XcaaState<D> {
        &self.xcaa
    }

    // Meshes without a segment table are drawn whole.
    fn segment_range(meshes: &PackedMeshes, path_range: Range) -> Range {
        if meshes.stencil_segment_path_ranges.is_empty() {
            return Range::new(0, meshes.stencil_segment_count());
        }
        resolve_index_range(&meshes.stencil_segment_path_ranges, path_range)
    }

    fn antialias_segments(&self, core: &RendererCore<D>, object_index: usize) {
        let vertex_array = match self.vertex_array {
            Some(ref vertex_array) => vertex_array,
            None => return,
        };
        let (meshes, mesh_buffers) = match core.object_meshes(object_index) {
            Some(object_meshes) => object_meshes,
            None => return,
        };

        let segments = Self::segment_range(meshes, core.path_range_for_object(object_index));
        if segments.is_empty() {
            return;
        }

        let device = &core.device;
        let program = core.program(ProgramId::StencilAaa);
        device.bind_vertex_array(vertex_array);
        device.use_program(&program.program);
        core.context.init_instanced_quad(device, program);

        let segment_offset = segments.start as usize * STENCIL_SEGMENT_STRIDE;
        let point_attributes = [
            (&mesh_buffers.stencil_segments,
             [AttributeId::FromPosition, AttributeId::CtrlPosition, AttributeId::ToPosition]),
            (&mesh_buffers.stencil_normals,
             [AttributeId::FromNormal, AttributeId::CtrlNormal, AttributeId::ToNormal]),
        ];
        for &(buffer, ref attributes) in point_attributes.iter() {
            device.bind_buffer(buffer, BufferTarget::Vertex);
            for (index, &attribute) in attributes.iter().enumerate() {
                program.configure_attribute_if_present(device, attribute, &VertexAttrDescriptor {
                    size: 2,
                    class: VertexAttrClass::Float,
                    attr_type: VertexAttrType::F32,
                    stride: STENCIL_SEGMENT_STRIDE,
                    offset: segment_offset + index * 8,
                    divisor: 1,
                });
            }
        }

        device.bind_buffer(&mesh_buffers.stencil_segment_path_ids, BufferTarget::Vertex);
        program.configure_attribute_if_present(device, AttributeId::PathID, &VertexAttrDescriptor {
            size: 1,
            class: VertexAttrClass::Float,
            attr_type: VertexAttrType::U16,
            stride: 0,
            offset: segments.start as usize * mem::size_of::<u16>(),
            divisor: 1,
        });

        self.xcaa.set_aa_uniforms(core, program, object_index, self.transform_type());
        core.set_embolden_amount_uniform(program, object_index);

        let render_state = RenderState {
            blend: BlendState::RGBOneAlphaOne,
            depth: None,
            scissor: Some(self.xcaa.supersampled_used_rect(core)),
            ..RenderState::default()
        };
        for side in 0..2 {
            program.set_uniform_if_present(device, UniformId::Side, UniformData::Int(side));
            device.draw_elements_instanced(Primitive::Triangles,
                                           QUAD_ELEMENT_COUNT,
                                           segments.length(),
                                           &render_state);
        }
    }
}

impl<D> AntialiasingStrategy<D> for StencilSegmentStrategy<D> where D: Device {
    #[inline]
    fn kind(&self) -> AntialiasingStrategyKind {
        AntialiasingStrategyKind::StencilAaa
    }

    fn attach_meshes(&mut self, core: &RendererCore<D>) {
        self.xcaa.attach_meshes(core, true);
        self.vertex_array = Some(core.device.create_vertex_array());
    }

    fn set_framebuffer_size(&mut self, core: &RendererCore<D>) {
        self.xcaa.set_framebuffer_size(core);
    }

    fn antialias_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        self.xcaa.upload_path_bounds(core, object_index);
        self.xcaa.prepare_aa(core, true);
        self.xcaa.clear_for_aa(core, true);
        self.antialias_segments(core, object_index);
    }

    fn finish_antialiasing_object(&mut self, core: &RendererCore<D>, _: usize) {
        self.xcaa.finish_antialiasing_object(core, true);
    }

    fn resolve_aa_for_object(&mut self, core: &RendererCore<D>, _: usize) {
        self.xcaa.resolve_aa_for_object(core, true, ColorF::transparent_black());
    }

    #[inline]
    fn direct_rendering_mode(&self) -> DirectRenderingMode {
        DirectRenderingMode::None
    }

    #[inline]
    fn transform_type(&self) -> TransformType {
        TransformType::Affine
    }
}
