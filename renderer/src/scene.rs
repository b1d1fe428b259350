// pathfinder/renderer/src/scene.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The application-side description of what is being rendered.

use crate::gpu::options::DirectRenderingMode;
use crate::gpu::shaders::ProgramId;
use pathfinder_geometry::color::ColorF;
use pathfinder_geometry::range::Range;
use pathfinder_geometry::transform3d::Transform4F;
use pathfinder_geometry::vector::Vector2F;

/// Per-path transforms, split into a scale/translation part (4 floats per path) and a skew
/// part (2 floats per path). Slot 0 belongs to path ID 0 and is never drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTransformBuffers<T> {
    pub st: T,
    pub ext: T,
}

/// Identity transforms for paths `1..=path_count`.
pub fn create_path_transform_buffers(path_count: u32) -> PathTransformBuffers<Vec<f32>> {
    let slots = path_count as usize + 1;
    let st = (0..slots).flat_map(|_| vec![1.0, 1.0, 0.0, 0.0]).collect();
    // Ext texels hold two paths, so round up to an even slot count.
    let ext = vec![0.0; (slots + (slots & 1)) * 2];
    PathTransformBuffers { st, ext }
}

/// The embedding application's view of the objects being rendered.
///
/// The renderer trusts these arrays to be sized consistently with `object_count()`.
pub trait Scene {
    fn object_count(&self) -> usize;

    /// RGBA8 colors, one per path ID.
    fn path_colors_for_object(&self, object_index: usize) -> Vec<u8>;
    fn path_transforms_for_object(&self, object_index: usize) -> PathTransformBuffers<Vec<f32>>;
    /// `[min_x, min_y, max_x, max_y]`, one rect per path ID.
    fn path_bounding_rects(&self, object_index: usize) -> Vec<f32>;

    fn is_multicolor(&self) -> bool;

    /// Whether the adaptive strategy should use stencil accumulation for per-pass work.
    fn needs_stencil(&self) -> bool;

    /// Whether the adaptive strategy should use stencil accumulation for this object.
    #[inline]
    fn object_needs_stencil(&self, _object_index: usize) -> bool {
        self.needs_stencil()
    }

    #[inline]
    fn world_transform(&self) -> Transform4F {
        Transform4F::default()
    }

    #[inline]
    fn modelview_transform(&self, _object_index: usize) -> Transform4F {
        Transform4F::default()
    }

    #[inline]
    fn bg_color(&self) -> ColorF {
        ColorF::white()
    }

    #[inline]
    fn fg_color(&self) -> ColorF {
        ColorF::transparent_black()
    }

    #[inline]
    fn clear_color_for_object(&self, _object_index: usize) -> ColorF {
        ColorF::transparent_black()
    }

    /// Extra outline dilation requested by the application. Stem darkening is added on top.
    #[inline]
    fn embolden_amount(&self) -> Vector2F {
        Vector2F::default()
    }

    /// The text size that stem darkening is computed for.
    #[inline]
    fn pixels_per_em(&self) -> f32 {
        0.0
    }

    /// Hinting parameters for `uHints`.
    #[inline]
    fn hints(&self) -> [f32; 4] {
        [0.0; 4]
    }

    /// Instances of this object to draw. An empty range skips the object entirely.
    #[inline]
    fn instance_range_for_object(&self, _object_index: usize) -> Range {
        Range::new(0, 1)
    }

    #[inline]
    fn mesh_index_for_object(&self, object_index: usize) -> usize {
        object_index
    }

    #[inline]
    fn direct_curve_program(&self) -> ProgramId {
        ProgramId::DirectCurve
    }

    #[inline]
    fn direct_interior_program(&self, mode: DirectRenderingMode) -> ProgramId {
        match mode {
            DirectRenderingMode::Conservative => ProgramId::ConservativeInterior,
            DirectRenderingMode::None | DirectRenderingMode::Color => ProgramId::DirectInterior,
        }
    }

    /// Whether path IDs come from the shared instanced path ID buffer instead of the mesh.
    #[inline]
    fn path_ids_are_instanced(&self) -> bool {
        false
    }
}
