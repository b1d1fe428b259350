/* Any copyright is dedicated to the Public Domain.
 * http://creativecommons.org/publicdomain/zero/1.0/ */

use crate::meshes::{PackedMeshes, B_BOX_SIZE, B_QUAD_VERTEX_POSITION_SIZE};
use crate::meshes::STENCIL_SEGMENT_SIZE;
use crate::scene::{self, PathTransformBuffers, Scene};
use pathfinder_geometry::color::ColorF;
use pathfinder_geometry::range::Range;
use pathfinder_geometry::transform3d::Transform4F;
use pathfinder_geometry::vector::Vector2F;
use std::cell::RefCell;
use std::rc::Rc;

pub struct TestSceneState {
    pub object_count: usize,
    pub paths_per_object: u32,
    /// Per object. Objects past the end draw one instance.
    pub instance_ranges: Vec<Range>,
    /// Per object. Objects past the end use mesh coverage.
    pub stencil_objects: Vec<bool>,
    pub needs_stencil: bool,
    pub multicolor: bool,
    pub instanced_path_ids: bool,
    pub bg_color: ColorF,
    pub world_transform: Transform4F,
    pub modelview_transform: Transform4F,
    pub embolden_amount: Vector2F,
    pub pixels_per_em: f32,
}

/// A scene whose state the test keeps a handle to after the renderer takes ownership.
#[derive(Clone)]
pub struct TestScene(pub Rc<RefCell<TestSceneState>>);

impl TestScene {
    pub fn new(object_count: usize, paths_per_object: u32) -> TestScene {
        TestScene(Rc::new(RefCell::new(TestSceneState {
            object_count,
            paths_per_object,
            instance_ranges: vec![],
            stencil_objects: vec![],
            needs_stencil: false,
            multicolor: false,
            instanced_path_ids: false,
            bg_color: ColorF::white(),
            world_transform: Transform4F::default(),
            modelview_transform: Transform4F::default(),
            embolden_amount: Vector2F::default(),
            pixels_per_em: 0.0,
        })))
    }

    pub fn meshes(&self) -> Vec<PackedMeshes> {
        let state = self.0.borrow();
        (0..state.object_count).map(|_| test_meshes(state.paths_per_object)).collect()
    }
}

impl Scene for TestScene {
    fn object_count(&self) -> usize {
        self.0.borrow().object_count
    }

    fn path_colors_for_object(&self, _: usize) -> Vec<u8> {
        vec![255; (self.0.borrow().paths_per_object as usize + 1) * 4]
    }

    fn path_transforms_for_object(&self, _: usize) -> PathTransformBuffers<Vec<f32>> {
        scene::create_path_transform_buffers(self.0.borrow().paths_per_object)
    }

    fn path_bounding_rects(&self, _: usize) -> Vec<f32> {
        vec![0.0; (self.0.borrow().paths_per_object as usize + 1) * 4]
    }

    fn is_multicolor(&self) -> bool {
        self.0.borrow().multicolor
    }

    fn needs_stencil(&self) -> bool {
        self.0.borrow().needs_stencil
    }

    fn object_needs_stencil(&self, object_index: usize) -> bool {
        self.0.borrow().stencil_objects.get(object_index).cloned().unwrap_or(false)
    }

    fn world_transform(&self) -> Transform4F {
        self.0.borrow().world_transform
    }

    fn modelview_transform(&self, _: usize) -> Transform4F {
        self.0.borrow().modelview_transform
    }

    fn embolden_amount(&self) -> Vector2F {
        self.0.borrow().embolden_amount
    }

    fn pixels_per_em(&self) -> f32 {
        self.0.borrow().pixels_per_em
    }

    fn bg_color(&self) -> ColorF {
        self.0.borrow().bg_color
    }

    fn instance_range_for_object(&self, object_index: usize) -> Range {
        self.0.borrow().instance_ranges.get(object_index).cloned().unwrap_or(Range::new(0, 1))
    }

    fn path_ids_are_instanced(&self) -> bool {
        self.0.borrow().instanced_path_ids
    }
}

/// One B-quad, six interior indices, one bounding box and two stencil segments per path, in
/// ascending order.
pub fn test_meshes(path_count: u32) -> PackedMeshes {
    let mut meshes = PackedMeshes::default();
    for path_index in 0..path_count {
        let path_id = path_index as u16 + 1;

        meshes.b_quad_vertex_positions.extend(vec![0.0; B_QUAD_VERTEX_POSITION_SIZE]);
        meshes.b_quad_vertex_position_path_ids.extend(vec![path_id; 6]);
        meshes.b_quad_vertex_position_path_ranges.push(Range::new(path_index, path_index + 1));

        let first_vertex = path_index * 6;
        meshes.b_quad_vertex_interior_indices.extend(first_vertex..(first_vertex + 6));
        meshes.b_quad_vertex_interior_index_path_ranges
              .push(Range::new(first_vertex, first_vertex + 6));

        meshes.b_boxes.extend(vec![0.0; B_BOX_SIZE]);
        meshes.b_box_path_ids.push(path_id);
        meshes.b_box_path_ranges.push(Range::new(path_index, path_index + 1));

        meshes.stencil_segments.extend(vec![0.0; STENCIL_SEGMENT_SIZE * 2]);
        meshes.stencil_normals.extend(vec![0.0; STENCIL_SEGMENT_SIZE * 2]);
        meshes.stencil_segment_path_ids.extend(vec![path_id; 2]);
        meshes.stencil_segment_path_ranges.push(Range::new(path_index * 2, path_index * 2 + 2));
    }
    meshes
}
