// pathfinder/renderer/src/gpu/strategy/adaptive.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Chooses between stencil and mesh coverage antialiasing on every call.
//!
//! Both inner strategies stay initialized and attached, so the choice can change from one
//! object to the next.

use crate::gpu::options::{AntialiasingStrategyKind, DirectRenderingMode, SubpixelAaType};
use crate::gpu::options::TransformType;
use crate::gpu::renderer::RendererCore;
use crate::gpu::strategy::{AntialiasingStrategy, MeshCoverageStrategy, StencilSegmentStrategy};
use pathfinder_gpu::Device;

pub struct AdaptiveStencilMeshStrategy<D> where D: Device {
    mesh_strategy: MeshCoverageStrategy<D>,
    stencil_strategy: StencilSegmentStrategy<D>,
}

impl<D> AdaptiveStencilMeshStrategy<D> where D: Device {
    pub fn new(subpixel_aa: SubpixelAaType) -> AdaptiveStencilMeshStrategy<D> {
        AdaptiveStencilMeshStrategy {
            mesh_strategy: MeshCoverageStrategy::new(subpixel_aa),
            stencil_strategy: StencilSegmentStrategy::new(subpixel_aa),
        }
    }

    /// The kind of strategy that handles `object_index`, or per-pass work when `None`.
    pub fn appropriate_kind(&self, core: &RendererCore<D>, object_index: Option<usize>)
                            -> AntialiasingStrategyKind {
        let needs_stencil = match object_index {
            Some(object_index) => core.scene.object_needs_stencil(object_index),
            None => core.scene.needs_stencil(),
        };
        if needs_stencil {
            AntialiasingStrategyKind::StencilAaa
        } else {
            AntialiasingStrategyKind::Mcaa
        }
    }

    pub fn appropriate_strategy(&mut self,
                                core: &RendererCore<D>,
                                object_index: Option<usize>)
                                -> &mut dyn AntialiasingStrategy<D> {
        match self.appropriate_kind(core, object_index) {
            AntialiasingStrategyKind::StencilAaa => &mut self.stencil_strategy,
            _ => &mut self.mesh_strategy,
        }
    }

    #[inline]
    pub fn mesh_strategy(&self) -> &MeshCoverageStrategy<D> {
        &self.mesh_strategy
    }

    #[inline]
    pub fn stencil_strategy(&self) -> &StencilSegmentStrategy<D> {
        &self.stencil_strategy
    }
}

impl<D> AntialiasingStrategy<D> for AdaptiveStencilMeshStrategy<D> where D: Device {
    #[inline]
    fn kind(&self) -> AntialiasingStrategyKind {
        AntialiasingStrategyKind::AdaptiveStencilMesh
    }

    fn init(&mut self, core: &RendererCore<D>) {
        self.mesh_strategy.init(core);
        self.stencil_strategy.init(core);
    }

    fn attach_meshes(&mut self, core: &RendererCore<D>) {
        self.mesh_strategy.attach_meshes(core);
        self.stencil_strategy.attach_meshes(core);
    }

    fn set_framebuffer_size(&mut self, core: &RendererCore<D>) {
        self.mesh_strategy.set_framebuffer_size(core);
        self.stencil_strategy.set_framebuffer_size(core);
    }

    fn prepare_for_rendering(&mut self, core: &RendererCore<D>) {
        self.appropriate_strategy(core, None).prepare_for_rendering(core)
    }

    fn prepare_for_direct_rendering(&mut self, core: &RendererCore<D>) {
        self.appropriate_strategy(core, None).prepare_for_direct_rendering(core)
    }

    fn prepare_to_render_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        self.appropriate_strategy(core, Some(object_index))
            .prepare_to_render_object(core, object_index)
    }

    fn finish_directly_rendering_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        self.appropriate_strategy(core, Some(object_index))
            .finish_directly_rendering_object(core, object_index)
    }

    fn antialias_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        self.appropriate_strategy(core, Some(object_index)).antialias_object(core, object_index)
    }

    fn finish_antialiasing_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        self.appropriate_strategy(core, Some(object_index))
            .finish_antialiasing_object(core, object_index)
    }

    fn resolve_aa_for_object(&mut self, core: &RendererCore<D>, object_index: usize) {
        self.appropriate_strategy(core, Some(object_index))
            .resolve_aa_for_object(core, object_index)
    }

    fn resolve(&mut self, core: &RendererCore<D>, pass: u32) {
        self.appropriate_strategy(core, None).resolve(core, pass)
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
