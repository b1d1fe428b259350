// pathfinder/renderer/src/gpu/strategy/none.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! No antialiasing: the renderer's direct pass draws straight into the destination.

use crate::gpu::options::{AntialiasingStrategyKind, DirectRenderingMode, TransformType};
use crate::gpu::renderer::RendererCore;
use crate::gpu::strategy::AntialiasingStrategy;
use pathfinder_geometry::rect::RectI;
use pathfinder_gpu::Device;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoAAStrategy;

impl NoAAStrategy {
    #[inline]
    pub fn new() -> NoAAStrategy {
        NoAAStrategy
    }
}

impl<D> AntialiasingStrategy<D> for NoAAStrategy where D: Device {
    #[inline]
    fn kind(&self) -> AntialiasingStrategyKind {
        AntialiasingStrategyKind::None
    }

    fn attach_meshes(&mut self, _: &RendererCore<D>) {}

    fn set_framebuffer_size(&mut self, _: &RendererCore<D>) {}

    fn prepare_for_direct_rendering(&mut self, core: &RendererCore<D>) {
        core.bind_dest_framebuffer();
        core.device.set_viewport(RectI::from_size(core.dest_allocated_size()));
    }

    fn antialias_object(&mut self, _: &RendererCore<D>, _: usize) {}

    fn finish_antialiasing_object(&mut self, _: &RendererCore<D>, _: usize) {}

    fn resolve_aa_for_object(&mut self, _: &RendererCore<D>, _: usize) {}

    #[inline]
    fn direct_rendering_mode(&self) -> DirectRenderingMode {
        DirectRenderingMode::Color
    }

    #[inline]
    fn transform_type(&self) -> TransformType {
        TransformType::ThreeD
    }
}
