// pathfinder/renderer/src/gpu/strategy/mod.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Antialiasing strategies.
//!
//! The renderer drives a strategy through a fixed sequence every frame:
//!
//! ```text
//! prepare_for_rendering
//! for each pass:
//!     prepare_for_direct_rendering          (if the direct rendering mode is not `None`)
//!     for each object:
//!         prepare_to_render_object          (if the direct rendering mode is not `None`)
//!         finish_directly_rendering_object  (if the direct rendering mode is not `None`)
//!         antialias_object
//!         finish_antialiasing_object
//!         resolve_aa_for_object
//!     resolve
//! ```
//!
//! Strategies own their GPU state. They borrow the renderer's state for the duration of each
//! call and never hold on to it.

use crate::gpu::options::{AntialiasingOptions, AntialiasingStrategyKind, DirectRenderingMode};
use crate::gpu::options::TransformType;
use crate::gpu::renderer::RendererCore;
use pathfinder_geometry::transform3d::Transform4F;
use pathfinder_gpu::Device;

pub mod adaptive;
pub mod mcaa;
pub mod none;
pub mod ssaa;
pub mod stencil;
pub mod xcaa;

pub use self::adaptive::AdaptiveStencilMeshStrategy;
pub use self::mcaa::MeshCoverageStrategy;
pub use self::none::NoAAStrategy;
pub use self::ssaa::SSAAStrategy;
pub use self::stencil::StencilSegmentStrategy;

pub trait AntialiasingStrategy<D> where D: Device {
    fn kind(&self) -> AntialiasingStrategyKind;

    #[inline]
    fn init(&mut self, _: &RendererCore<D>) {}

    /// Called whenever the renderer's meshes change.
    fn attach_meshes(&mut self, core: &RendererCore<D>);

    /// Called whenever the destination size changes. Tears down and reallocates any
    /// size-dependent GPU state.
    fn set_framebuffer_size(&mut self, core: &RendererCore<D>);

    #[inline]
    fn prepare_for_rendering(&mut self, _: &RendererCore<D>) {}

    #[inline]
    fn prepare_for_direct_rendering(&mut self, _: &RendererCore<D>) {}

    #[inline]
    fn prepare_to_render_object(&mut self, _: &RendererCore<D>, _object_index: usize) {}

    #[inline]
    fn finish_directly_rendering_object(&mut self, _: &RendererCore<D>, _object_index: usize) {}

    fn antialias_object(&mut self, core: &RendererCore<D>, object_index: usize);

    fn finish_antialiasing_object(&mut self, core: &RendererCore<D>, object_index: usize);

    fn resolve_aa_for_object(&mut self, core: &RendererCore<D>, object_index: usize);

    #[inline]
    fn resolve(&mut self, _: &RendererCore<D>, _pass: u32) {}

    fn direct_rendering_mode(&self) -> DirectRenderingMode;

    fn transform_type(&self) -> TransformType;

    #[inline]
    fn pass_count(&self) -> u32 {
        1
    }

    #[inline]
    fn world_transform_for_pass(&self, _: &RendererCore<D>, _pass: u32) -> Transform4F {
        Transform4F::default()
    }
}

/// Builds the strategy for `kind`. `level` only matters for supersampling.
pub fn create_aa_strategy<D>(kind: AntialiasingStrategyKind,
                             level: u32,
                             options: &AntialiasingOptions)
                             -> Box<dyn AntialiasingStrategy<D>>
                             where D: Device + 'static {
    match kind {
        AntialiasingStrategyKind::None => Box::new(NoAAStrategy::new()),
        AntialiasingStrategyKind::Ssaa => Box::new(SSAAStrategy::new(level)),
        AntialiasingStrategyKind::Mcaa => Box::new(MeshCoverageStrategy::new(options.subpixel_aa)),
        AntialiasingStrategyKind::StencilAaa => {
            Box::new(StencilSegmentStrategy::new(options.subpixel_aa))
        }
        AntialiasingStrategyKind::AdaptiveStencilMesh => {
            Box::new(AdaptiveStencilMeshStrategy::new(options.subpixel_aa))
        }
    }
}
