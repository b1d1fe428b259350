// pathfinder/renderer/src/gpu/strategy/xcaa.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! State shared by the strategies that accumulate coverage into a supersampled framebuffer and
//! then resolve it into the destination.

use crate::gpu::buffer_texture::{BufferTextureCache, BufferTextureRole};
use crate::gpu::context::QUAD_ELEMENT_COUNT;
use crate::gpu::options::{SubpixelAaType, TransformType};
use crate::gpu::renderer::RendererCore;
use crate::gpu::shaders::{ProgramId, ShaderProgram, UniformId};
use pathfinder_geometry::color::ColorF;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::transform3d::Transform4F;
use pathfinder_geometry::vector::Vector2I;
use pathfinder_gpu::{BlendState, ClearParams, Device, Primitive, RenderState, TextureDataRef};
use pathfinder_gpu::{TextureFormat, TextureSamplingFlags, UniformData};
use pathfinder_simd::default::F32x4;

/// Horizontal LCD filter weights; the fifth tap mirrors the fourth.
pub const LCD_FILTER_KERNEL: [f32; 4] = [0.033165, 0.102074, 0.221521, 0.286480];

pub struct XcaaState<D> where D: Device {
    subpixel_aa: SubpixelAaType,
    dest_framebuffer_size: Vector2I,
    supersampled_framebuffer_size: Vector2I,
    aa_framebuffer: Option<D::Framebuffer>,
    resolve_vertex_array: Option<D::VertexArray>,
    path_bounds: BufferTextureCache<D>,
}

impl<D> XcaaState<D> where D: Device {
    pub fn new(subpixel_aa: SubpixelAaType) -> XcaaState<D> {
        XcaaState {
            subpixel_aa,
            dest_framebuffer_size: Vector2I::default(),
            supersampled_framebuffer_size: Vector2I::default(),
            aa_framebuffer: None,
            resolve_vertex_array: None,
            path_bounds: BufferTextureCache::new(BufferTextureRole::PathBounds),
        }
    }

    #[inline]
    pub fn supersample_scale(&self) -> Vector2I {
        match self.subpixel_aa {
            SubpixelAaType::None => Vector2I::splat(1),
            SubpixelAaType::Lcd => Vector2I::new(3, 1),
        }
    }

    #[inline]
    pub fn supersampled_framebuffer_size(&self) -> Vector2I {
        self.supersampled_framebuffer_size
    }

    #[inline]
    pub fn aa_framebuffer(&self) -> Option<&D::Framebuffer> {
        self.aa_framebuffer.as_ref()
    }

    pub fn resolve_program_id(&self) -> ProgramId {
        match self.subpixel_aa {
            SubpixelAaType::None => ProgramId::XcaaMonoResolve,
            SubpixelAaType::Lcd => ProgramId::XcaaMonoSubpixelResolve,
        }
    }

    /// The scissor rectangle for accumulation: the used part of the destination, supersampled.
    #[inline]
    pub fn supersampled_used_rect(&self, core: &RendererCore<D>) -> RectI {
        RectI::from_size(core.dest_used_size().scale_xy(self.supersample_scale()))
    }

    pub fn attach_meshes(&mut self, core: &RendererCore<D>, uses_resolve_program: bool) {
        self.resolve_vertex_array = None;
        if uses_resolve_program {
            let vertex_array = core.device.create_vertex_array();
            let program = core.program(self.resolve_program_id());
            core.context.init_quad_vertex_array(&core.device, &vertex_array, program);
            self.resolve_vertex_array = Some(vertex_array);
        }
        self.path_bounds.clear();
    }

    /// Replaces the accumulation framebuffer with one sized for the current destination.
    pub fn set_framebuffer_size(&mut self, core: &RendererCore<D>) {
        self.dest_framebuffer_size = core.dest_allocated_size();
        self.supersampled_framebuffer_size =
            self.dest_framebuffer_size.scale_xy(self.supersample_scale());

        // Release the old framebuffer before allocating the new one.
        self.aa_framebuffer = None;

        let device = &core.device;
        let size = self.supersampled_framebuffer_size;
        let alpha_texture = device.create_texture(TextureFormat::RGBA16F, size);
        device.set_texture_sampling_mode(&alpha_texture,
                                         TextureSamplingFlags::NEAREST_MIN |
                                         TextureSamplingFlags::NEAREST_MAG);
        let depth_texture = device.create_texture(TextureFormat::Depth24, size);
        self.aa_framebuffer = Some(device.create_framebuffer(alpha_texture, Some(depth_texture)));
        debug!("allocated {}x{} accumulation framebuffer", size.x(), size.y());
    }

    pub fn upload_path_bounds(&mut self, core: &RendererCore<D>, object_index: usize) {
        let path_bounds = core.scene.path_bounding_rects(object_index);
        self.path_bounds
            .get_or_create(object_index)
            .upload(&core.device, TextureDataRef::F32(&path_bounds));
    }

    /// Points rendering at the accumulation framebuffer, or at whatever is bound when
    /// accumulation is bypassed.
    pub fn prepare_aa(&self, core: &RendererCore<D>, uses_aa_framebuffer: bool) {
        if uses_aa_framebuffer {
            if let Some(ref framebuffer) = self.aa_framebuffer {
                core.device.bind_framebuffer(framebuffer);
            }
        }
        core.device.set_viewport(RectI::from_size(self.supersampled_framebuffer_size));
    }

    pub fn clear_for_aa(&self, core: &RendererCore<D>, uses_aa_framebuffer: bool) {
        if !uses_aa_framebuffer {
            return;
        }
        core.device.clear(&ClearParams {
            color: Some(ColorF::transparent_black()),
            depth: Some(0.0),
            rect: Some(self.supersampled_used_rect(core)),
        });
    }

    pub fn finish_antialiasing_object(&self, core: &RendererCore<D>, uses_aa_framebuffer: bool) {
        core.bind_dest_framebuffer();
        core.device.set_viewport(RectI::from_size(self.dest_framebuffer_size));
        if !uses_aa_framebuffer {
            return;
        }
        core.device.clear(&ClearParams {
            color: Some(ColorF::white()),
            depth: Some(0.0),
            rect: Some(self.supersampled_used_rect(core)),
        });
    }

    /// Draws the accumulated coverage into the destination.
    pub fn resolve_aa_for_object(&self,
                                 core: &RendererCore<D>,
                                 uses_aa_framebuffer: bool,
                                 clear_color: ColorF) {
        if !uses_aa_framebuffer {
            return;
        }
        let (framebuffer, vertex_array) = match (&self.aa_framebuffer,
                                                 &self.resolve_vertex_array) {
            (&Some(ref framebuffer), &Some(ref vertex_array)) => (framebuffer, vertex_array),
            _ => {
                warn!("resolve requested before meshes and framebuffer size were set");
                return;
            }
        };

        let device = &core.device;
        let used_rect = RectI::from_size(core.dest_used_size());
        device.clear(&ClearParams {
            color: Some(clear_color),
            depth: None,
            rect: Some(used_rect),
        });

        let program = core.program(self.resolve_program_id());
        device.bind_vertex_array(vertex_array);
        device.use_program(&program.program);
        program.set_uniform_if_present(device,
                                       UniformId::FramebufferSize,
                                       UniformData::from_vector_2i(self.dest_framebuffer_size));
        if program.has_uniform(UniformId::AAAlpha) {
            device.bind_texture(device.framebuffer_texture(framebuffer), 0);
            device.set_uniform(program.uniform(UniformId::AAAlpha), UniformData::TextureUnit(0));
        }
        program.set_uniform_if_present(device,
                                       UniformId::AAAlphaDimensions,
                                       UniformData::from_vector_2i(
                                           self.supersampled_framebuffer_size));
        let (bg_color, fg_color) = (core.scene.bg_color(), core.scene.fg_color());
        if !bg_color.is_zero() {
            program.set_uniform_if_present(device,
                                           UniformId::BGColor,
                                           UniformData::Vec4(bg_color.0));
        }
        if !fg_color.is_zero() {
            program.set_uniform_if_present(device,
                                           UniformId::FGColor,
                                           UniformData::Vec4(fg_color.0));
        }
        core.set_transform_st_and_tex_scale_uniforms_for_dest(program);
        self.set_subpixel_aa_kernel_uniform(core, program);
        core.bind_gamma_lut(bg_color, 1, program);

        device.draw_elements(Primitive::Triangles, 0, QUAD_ELEMENT_COUNT, &RenderState {
            blend: BlendState::Off,
            depth: None,
            scissor: Some(used_rect),
            ..RenderState::default()
        });
    }

    fn set_subpixel_aa_kernel_uniform(&self, core: &RendererCore<D>, program: &ShaderProgram<D>) {
        if self.subpixel_aa == SubpixelAaType::None {
            return;
        }
        let kernel = F32x4::new(LCD_FILTER_KERNEL[0],
                                LCD_FILTER_KERNEL[1],
                                LCD_FILTER_KERNEL[2],
                                LCD_FILTER_KERNEL[3]);
        program.set_uniform_if_present(&core.device, UniformId::Kernel, UniformData::Vec4(kernel));
    }

    /// Uniforms common to every accumulation program.
    pub fn set_aa_uniforms(&self,
                           core: &RendererCore<D>,
                           program: &ShaderProgram<D>,
                           object_index: usize,
                           transform_type: TransformType) {
        let world_transform = Transform4F::default();
        match transform_type {
            TransformType::Affine => {
                core.set_transform_affine_uniforms(program, world_transform, object_index)
            }
            TransformType::ThreeD => {
                core.set_transform_uniform(program, world_transform, object_index)
            }
        }

        program.set_uniform_if_present(&core.device,
                                       UniformId::FramebufferSize,
                                       UniformData::from_vector_2i(
                                           self.supersampled_framebuffer_size));
        core.bind_path_transforms(program, object_index, 1, 0);
        self.path_bounds.bind(&core.device, program, object_index, 2);
        core.set_hints_uniform(program);
        core.bind_area_lut(4, program);
    }
}
