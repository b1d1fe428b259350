// pathfinder/renderer/src/meshes.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Packed, pre-tessellated meshes and their GPU counterparts.
//!
//! Tessellation happens upstream. Every per-path table is indexed by path ID minus one and may
//! run in either direction; see `mesh_index::resolve_index_range()`.

use pathfinder_geometry::range::Range;
use pathfinder_gpu::{BufferTarget, BufferUploadMode, Device};

/// Floats per B-quad in `b_quad_vertex_positions`: six vertices of two coordinates each.
pub const B_QUAD_VERTEX_POSITION_SIZE: usize = 12;
/// Floats per bounding-box instance: rect, UV, dUV/dx, dUV/dy, sign/mode.
pub const B_BOX_SIZE: usize = 20;
/// Floats per stencil segment, and per set of stencil normals: from, ctrl, to.
pub const STENCIL_SEGMENT_SIZE: usize = 6;

#[derive(Clone, Debug, Default)]
pub struct PackedMeshes {
    pub b_quad_vertex_positions: Vec<f32>,
    pub b_quad_vertex_position_path_ids: Vec<u16>,
    pub b_quad_vertex_interior_indices: Vec<u32>,
    pub b_boxes: Vec<f32>,
    pub b_box_path_ids: Vec<u16>,
    pub stencil_segments: Vec<f32>,
    pub stencil_segment_path_ids: Vec<u16>,
    pub stencil_normals: Vec<f32>,

    /// B-quads owned by each path, in units of B-quads.
    pub b_quad_vertex_position_path_ranges: Vec<Range>,
    /// Interior indices owned by each path.
    pub b_quad_vertex_interior_index_path_ranges: Vec<Range>,
    /// Bounding-box instances owned by each path.
    pub b_box_path_ranges: Vec<Range>,
    /// Stencil segments owned by each path.
    pub stencil_segment_path_ranges: Vec<Range>,
}

impl PackedMeshes {
    #[inline]
    pub fn path_count(&self) -> u32 {
        self.b_quad_vertex_position_path_ranges.len() as u32
    }

    #[inline]
    pub fn b_box_count(&self) -> u32 {
        (self.b_boxes.len() / B_BOX_SIZE) as u32
    }

    #[inline]
    pub fn stencil_segment_count(&self) -> u32 {
        (self.stencil_segments.len() / STENCIL_SEGMENT_SIZE) as u32
    }
}

/// The GPU buffers for one `PackedMeshes`. The range tables stay on the CPU side.
pub struct PackedMeshBuffers<D> where D: Device {
    pub b_quad_vertex_positions: D::Buffer,
    pub b_quad_vertex_position_path_ids: D::Buffer,
    pub b_quad_vertex_interior_indices: D::Buffer,
    pub b_boxes: D::Buffer,
    pub b_box_path_ids: D::Buffer,
    pub stencil_segments: D::Buffer,
    pub stencil_segment_path_ids: D::Buffer,
    pub stencil_normals: D::Buffer,
}

impl<D> PackedMeshBuffers<D> where D: Device {
    pub fn new(device: &D, meshes: &PackedMeshes) -> PackedMeshBuffers<D> {
        PackedMeshBuffers {
            b_quad_vertex_positions: upload(device, &meshes.b_quad_vertex_positions),
            b_quad_vertex_position_path_ids: upload(device,
                                                    &meshes.b_quad_vertex_position_path_ids),
            b_quad_vertex_interior_indices: upload_indices(device,
                                                           &meshes.b_quad_vertex_interior_indices),
            b_boxes: upload(device, &meshes.b_boxes),
            b_box_path_ids: upload(device, &meshes.b_box_path_ids),
            stencil_segments: upload(device, &meshes.stencil_segments),
            stencil_segment_path_ids: upload(device, &meshes.stencil_segment_path_ids),
            stencil_normals: upload(device, &meshes.stencil_normals),
        }
    }
}

fn upload<D, T>(device: &D, data: &[T]) -> D::Buffer where D: Device {
    let buffer = device.create_buffer();
    device.upload_to_buffer(&buffer, data, BufferTarget::Vertex, BufferUploadMode::Static);
    buffer
}

fn upload_indices<D>(device: &D, data: &[u32]) -> D::Buffer where D: Device {
    let buffer = device.create_buffer();
    device.upload_to_buffer(&buffer, data, BufferTarget::Index, BufferUploadMode::Static);
    buffer
}
