// pathfinder/renderer/src/gpu/strategy/ssaa.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Supersampling: direct rendering at a multiple of the destination size, then a filtered blit.

use crate::gpu::context::QUAD_ELEMENT_COUNT;
use crate::gpu::options::{AntialiasingStrategyKind, DirectRenderingMode, TransformType};
use crate::gpu::renderer::RendererCore;
use crate::gpu::shaders::{ProgramId, UniformId};
use crate::gpu::strategy::AntialiasingStrategy;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use pathfinder_gpu::{ClearParams, Device, Primitive, RenderState, TextureFormat, UniformData};

pub struct SSAAStrategy<D> where D: Device {
    level: u32,
    dest_framebuffer_size: Vector2I,
    supersampled_framebuffer_size: Vector2I,
    supersampled_framebuffer: Option<D::Framebuffer>,
    resolve_vertex_array: Option<D::VertexArray>,
}

impl<D> SSAAStrategy<D> where D: Device {
    pub fn new(level: u32) -> SSAAStrategy<D> {
        SSAAStrategy {
            level,
            dest_framebuffer_size: Vector2I::default(),
            supersampled_framebuffer_size: Vector2I::default(),
            supersampled_framebuffer: None,
            resolve_vertex_array: None,
        }
    }

    /// Samples per pixel along each axis. Unsupported levels fall back to no supersampling.
    pub fn supersample_scale(&self) -> Vector2I {
        match self.level {
            2 => Vector2I::new(2, 1),
            4 => Vector2I::new(2, 2),
            8 => Vector2I::new(4, 2),
            16 => Vector2I::new(4, 4),
            _ => Vector2I::splat(1),
        }
    }

    #[inline]
    pub fn supersampled_framebuffer_size(&self) -> Vector2I {
        self.supersampled_framebuffer_size
    }

    fn bind_supersampled_framebuffer(&self, core: &RendererCore<D>) {
        if let Some(ref framebuffer) = self.supersampled_framebuffer {
            core.device.bind_framebuffer(framebuffer);
        }
        core.device.set_viewport(RectI::from_size(self.supersampled_framebuffer_size));
    }
}

impl<D> AntialiasingStrategy<D> for SSAAStrategy<D> where D: Device {
    #[inline]
    fn kind(&self) -> AntialiasingStrategyKind {
        AntialiasingStrategyKind::Ssaa
    }

    fn attach_meshes(&mut self, core: &RendererCore<D>) {
        let vertex_array = core.device.create_vertex_array();
        core.context.init_quad_vertex_array(&core.device,
                                            &vertex_array,
                                            core.program(ProgramId::Blit));
        self.resolve_vertex_array = Some(vertex_array);
    }

    fn set_framebuffer_size(&mut self, core: &RendererCore<D>) {
        self.dest_framebuffer_size = core.dest_allocated_size();
        self.supersampled_framebuffer_size =
            self.dest_framebuffer_size.scale_xy(self.supersample_scale());

        self.supersampled_framebuffer = None;

        let device = &core.device;
        let size = self.supersampled_framebuffer_size;
        let color_texture = device.create_texture(TextureFormat::RGBA8, size);
        let depth_texture = device.create_texture(TextureFormat::Depth24, size);
        self.supersampled_framebuffer =
            Some(device.create_framebuffer(color_texture, Some(depth_texture)));
        debug!("allocated {}x{} supersampled framebuffer", size.x(), size.y());
    }

    fn prepare_for_rendering(&mut self, core: &RendererCore<D>) {
        self.bind_supersampled_framebuffer(core);
        let used_size = core.dest_used_size().scale_xy(self.supersample_scale());
        core.device.clear(&ClearParams {
            color: Some(core.scene.bg_color()),
            depth: Some(0.0),
            rect: Some(RectI::from_size(used_size)),
        });
    }

    fn prepare_for_direct_rendering(&mut self, core: &RendererCore<D>) {
        self.bind_supersampled_framebuffer(core);
    }

    fn antialias_object(&mut self, _: &RendererCore<D>, _: usize) {}

    fn finish_antialiasing_object(&mut self, _: &RendererCore<D>, _: usize) {}

    fn resolve_aa_for_object(&mut self, _: &RendererCore<D>, _: usize) {}

    fn resolve(&mut self, core: &RendererCore<D>, _: u32) {
        let (framebuffer, vertex_array) = match (&self.supersampled_framebuffer,
                                                 &self.resolve_vertex_array) {
            (&Some(ref framebuffer), &Some(ref vertex_array)) => (framebuffer, vertex_array),
            _ => return,
        };

        let device = &core.device;
        core.bind_dest_framebuffer();
        device.set_viewport(RectI::from_size(self.dest_framebuffer_size));

        let program = core.program(ProgramId::Blit);
        device.bind_vertex_array(vertex_array);
        device.use_program(&program.program);
        core.set_transform_and_tex_scale_uniforms_for_dest(program);
        if program.has_uniform(UniformId::Source) {
            device.bind_texture(device.framebuffer_texture(framebuffer), 0);
            device.set_uniform(program.uniform(UniformId::Source), UniformData::TextureUnit(0));
        }
        device.draw_elements(Primitive::Triangles, 0, QUAD_ELEMENT_COUNT, &RenderState::default());
    }

    #[inline]
    fn direct_rendering_mode(&self) -> DirectRenderingMode {
        DirectRenderingMode::Color
    }

    #[inline]
    fn transform_type(&self) -> TransformType {
        TransformType::ThreeD
    }
}
