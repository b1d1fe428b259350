// pathfinder/renderer/src/gpu/renderer.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The top-level frame orchestrator.

use crate::gpu::buffer_texture::{BufferTextureCache, BufferTextureRole};
use crate::gpu::context::RenderContext;
use crate::gpu::options::{AntialiasingOptions, AntialiasingStrategyKind, DestFramebuffer};
use crate::gpu::options::{DirectRenderingMode, GammaCorrectionMode, RendererOptions};
use crate::gpu::options::StemDarkeningMode;
use crate::gpu::shaders::{AttributeId, ProgramId, ShaderProgram, UniformId};
use crate::gpu::strategy::{self, AntialiasingStrategy};
use crate::mesh_index::resolve_index_range;
use crate::meshes::{PackedMeshBuffers, PackedMeshes};
use crate::scene::Scene;
use pathfinder_geometry::color::ColorF;
use pathfinder_geometry::range::Range;
use pathfinder_geometry::transform3d::Transform4F;
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use pathfinder_gpu::resources::ResourceLoader;
use pathfinder_gpu::{BlendState, BufferTarget, ClearParams, DepthFunc, DepthState, Device};
use pathfinder_gpu::{Primitive, ProgramError, RenderState, TextureDataRef, UniformData};
use pathfinder_gpu::{VertexAttrClass, VertexAttrDescriptor, VertexAttrType};
use pathfinder_simd::default::F32x4;
use std::mem;

/// Everything the renderer owns apart from the active strategy.
///
/// Strategies borrow this for the duration of each call.
pub struct RendererCore<D> where D: Device {
    pub device: D,
    pub context: RenderContext<D>,
    pub scene: Box<dyn Scene>,
    dest_framebuffer: DestFramebuffer<D>,
    gamma_correction: GammaCorrectionMode,
    stem_darkening: StemDarkeningMode,

    meshes: Vec<PackedMeshes>,
    mesh_buffers: Vec<PackedMeshBuffers<D>>,

    path_colors: BufferTextureCache<D>,
    path_transforms_st: BufferTextureCache<D>,
    path_transforms_ext: BufferTextureCache<D>,

    implicit_cover_interior_vertex_array: D::VertexArray,
    implicit_cover_curve_vertex_array: D::VertexArray,
}

pub struct Renderer<D> where D: Device + 'static {
    core: RendererCore<D>,
    aa_strategy: Option<Box<dyn AntialiasingStrategy<D>>>,
}

impl<D> Renderer<D> where D: Device + 'static {
    /// Links every program and sets up the initial antialiasing strategy.
    pub fn new(device: D,
               resources: &dyn ResourceLoader,
               scene: Box<dyn Scene>,
               options: RendererOptions<D>)
               -> Result<Renderer<D>, ProgramError> {
        let context = RenderContext::new(&device, resources)?;
        let implicit_cover_interior_vertex_array = device.create_vertex_array();
        let implicit_cover_curve_vertex_array = device.create_vertex_array();

        let core = RendererCore {
            device,
            context,
            scene,
            dest_framebuffer: options.dest,
            gamma_correction: options.antialiasing.options.gamma_correction,
            stem_darkening: options.antialiasing.options.stem_darkening,
            meshes: vec![],
            mesh_buffers: vec![],
            path_colors: BufferTextureCache::new(BufferTextureRole::PathColors),
            path_transforms_st: BufferTextureCache::new(BufferTextureRole::PathTransformST),
            path_transforms_ext: BufferTextureCache::new(BufferTextureRole::PathTransformExt),
            implicit_cover_interior_vertex_array,
            implicit_cover_curve_vertex_array,
        };

        let mut renderer = Renderer { core, aa_strategy: None };
        let antialiasing = options.antialiasing;
        renderer.set_antialiasing_options(antialiasing.kind,
                                          antialiasing.level,
                                          antialiasing.options);
        Ok(renderer)
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.core.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.core.device
    }

    #[inline]
    pub fn scene(&self) -> &dyn Scene {
        &*self.core.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        &mut *self.core.scene
    }

    #[inline]
    pub fn core(&self) -> &RendererCore<D> {
        &self.core
    }

    #[inline]
    pub fn aa_strategy(&self) -> Option<&dyn AntialiasingStrategy<D>> {
        self.aa_strategy.as_ref().map(|strategy| &**strategy)
    }

    #[inline]
    pub fn meshes_attached(&self) -> bool {
        self.core.meshes_attached()
    }

    /// Replaces the strategy. The old strategy's GPU resources are released first.
    pub fn set_antialiasing_options(&mut self,
                                    kind: AntialiasingStrategyKind,
                                    level: u32,
                                    options: AntialiasingOptions) {
        self.core.gamma_correction = options.gamma_correction;
        self.core.stem_darkening = options.stem_darkening;

        self.aa_strategy = None;
        let mut aa_strategy = strategy::create_aa_strategy(kind, level, &options);
        debug!("antialiasing strategy: {:?} (level {}, {:?})", kind, level, options);

        aa_strategy.init(&self.core);
        if self.core.meshes_attached() {
            aa_strategy.attach_meshes(&self.core);
        }
        aa_strategy.set_framebuffer_size(&self.core);
        self.aa_strategy = Some(aa_strategy);
    }

    /// Replaces every object's meshes.
    pub fn attach_meshes(&mut self, meshes: Vec<PackedMeshes>) {
        let aa_strategy = match self.aa_strategy {
            Some(ref mut aa_strategy) => aa_strategy,
            None => panic!("attach_meshes() called before an antialiasing strategy was set"),
        };

        let device = &self.core.device;
        self.core.mesh_buffers =
            meshes.iter().map(|meshes| PackedMeshBuffers::new(device, meshes)).collect();
        self.core.meshes = meshes;
        debug!("attached {} packed meshes", self.core.meshes.len());

        aa_strategy.attach_meshes(&self.core);
    }

    /// Must be called whenever the destination changes size.
    pub fn canvas_resized(&mut self) {
        if let Some(ref mut aa_strategy) = self.aa_strategy {
            aa_strategy.set_framebuffer_size(&self.core);
        }
    }

    pub fn set_dest_framebuffer(&mut self, dest_framebuffer: DestFramebuffer<D>) {
        self.core.dest_framebuffer = dest_framebuffer;
        self.canvas_resized();
    }

    /// Uploads this frame's per-object data and renders it.
    pub fn redraw(&mut self) {
        if !self.core.meshes_attached() {
            return;
        }
        let object_count = self.core.scene.object_count();
        self.core.upload_path_colors(object_count);
        self.core.upload_path_transforms(object_count);
        self.render_atlas();
    }

    pub fn upload_path_colors(&mut self, object_count: usize) {
        self.core.upload_path_colors(object_count);
    }

    pub fn upload_path_transforms(&mut self, object_count: usize) {
        self.core.upload_path_transforms(object_count);
    }

    pub fn render_atlas(&mut self) {
        if !self.core.meshes_attached() {
            return;
        }
        let aa_strategy = match self.aa_strategy {
            Some(ref mut aa_strategy) => aa_strategy,
            None => panic!("render_atlas() called before an antialiasing strategy was set"),
        };
        let core = &self.core;

        core.clear_dest_framebuffer();
        aa_strategy.prepare_for_rendering(core);

        let object_count = core.scene.object_count();
        for pass in 0..aa_strategy.pass_count() {
            if aa_strategy.direct_rendering_mode() != DirectRenderingMode::None {
                aa_strategy.prepare_for_direct_rendering(core);
            }

            for object_index in 0..object_count {
                if core.scene.instance_range_for_object(object_index).is_empty() {
                    continue;
                }

                // The mode can change from object to object.
                let direct_rendering_mode = aa_strategy.direct_rendering_mode();
                if direct_rendering_mode != DirectRenderingMode::None {
                    aa_strategy.prepare_to_render_object(core, object_index);
                    core.clear_for_direct_rendering(object_index);
                    let pass_transform = aa_strategy.world_transform_for_pass(core, pass);
                    core.directly_render_object(direct_rendering_mode,
                                                pass_transform,
                                                object_index);
                    aa_strategy.finish_directly_rendering_object(core, object_index);
                }

                aa_strategy.antialias_object(core, object_index);
                aa_strategy.finish_antialiasing_object(core, object_index);
                aa_strategy.resolve_aa_for_object(core, object_index);
            }

            aa_strategy.resolve(core, pass);
        }
    }

    /// The full transform for `object_index` in `pass`, including the strategy's jitter.
    pub fn compute_transform(&self, pass: u32, object_index: usize) -> Transform4F {
        let pass_transform = match self.aa_strategy {
            Some(ref aa_strategy) => aa_strategy.world_transform_for_pass(&self.core, pass),
            None => Transform4F::default(),
        };
        self.core.compute_transform(pass_transform, object_index)
    }
}

impl<D> RendererCore<D> where D: Device {
    #[inline]
    pub fn program(&self, id: ProgramId) -> &ShaderProgram<D> {
        self.context.programs.get(id)
    }

    #[inline]
    pub fn meshes_attached(&self) -> bool {
        !self.meshes.is_empty() && !self.mesh_buffers.is_empty()
    }

    #[inline]
    pub fn meshes(&self) -> &[PackedMeshes] {
        &self.meshes
    }

    /// The CPU and GPU meshes that `object_index` draws from.
    pub fn object_meshes(&self, object_index: usize)
                         -> Option<(&PackedMeshes, &PackedMeshBuffers<D>)> {
        let mesh_index = self.scene.mesh_index_for_object(object_index);
        match (self.meshes.get(mesh_index), self.mesh_buffers.get(mesh_index)) {
            (Some(meshes), Some(mesh_buffers)) => Some((meshes, mesh_buffers)),
            _ => {
                warn!("object {} refers to missing mesh {}", object_index, mesh_index);
                None
            }
        }
    }

    /// Every path of the object's mesh, as 1-based IDs.
    pub fn path_range_for_object(&self, object_index: usize) -> Range {
        let mesh_index = self.scene.mesh_index_for_object(object_index);
        match self.meshes.get(mesh_index) {
            None => Range::empty(),
            Some(meshes) => Range::new(1, meshes.path_count() + 1),
        }
    }

    #[inline]
    pub fn dest_framebuffer(&self) -> &DestFramebuffer<D> {
        &self.dest_framebuffer
    }

    #[inline]
    pub fn dest_allocated_size(&self) -> Vector2I {
        self.dest_framebuffer.window_size(&self.device)
    }

    #[inline]
    pub fn dest_used_size(&self) -> Vector2I {
        self.dest_framebuffer.used_size(&self.device)
    }

    /// The fraction of the destination that holds content.
    pub fn used_size_factor(&self) -> Vector2F {
        let (used_size, allocated_size) = (self.dest_used_size(), self.dest_allocated_size());
        if allocated_size.x() <= 0 || allocated_size.y() <= 0 {
            return Vector2F::splat(1.0);
        }
        Vector2F::new(used_size.x() as f32 / allocated_size.x() as f32,
                      used_size.y() as f32 / allocated_size.y() as f32)
    }

    #[inline]
    pub fn bind_dest_framebuffer(&self) {
        self.dest_framebuffer.bind(&self.device);
    }

    #[inline]
    pub fn gamma_correction(&self) -> GammaCorrectionMode {
        self.gamma_correction
    }

    /// `pass_transform * modelview * world`: the strategy's transform is applied last.
    pub fn compute_transform(&self, pass_transform: Transform4F, object_index: usize)
                             -> Transform4F {
        pass_transform *
            self.scene.modelview_transform(object_index) *
            self.scene.world_transform()
    }

    fn upload_path_colors(&mut self, object_count: usize) {
        self.path_colors.resize(object_count);
        for object_index in 0..object_count {
            let path_colors = self.scene.path_colors_for_object(object_index);
            self.path_colors
                .get_or_create(object_index)
                .upload(&self.device, TextureDataRef::U8(&path_colors));
        }
    }

    fn upload_path_transforms(&mut self, object_count: usize) {
        self.path_transforms_st.resize(object_count);
        self.path_transforms_ext.resize(object_count);
        for object_index in 0..object_count {
            let path_transforms = self.scene.path_transforms_for_object(object_index);
            self.path_transforms_st
                .get_or_create(object_index)
                .upload(&self.device, TextureDataRef::F32(&path_transforms.st));
            self.path_transforms_ext
                .get_or_create(object_index)
                .upload(&self.device, TextureDataRef::F32(&path_transforms.ext));
        }
    }

    pub fn clear_dest_framebuffer(&self) {
        self.bind_dest_framebuffer();
        self.device.clear(&ClearParams {
            color: Some(self.scene.bg_color()),
            depth: Some(0.0),
            rect: None,
        });
    }

    pub fn clear_for_direct_rendering(&self, object_index: usize) {
        self.device.clear(&ClearParams {
            color: Some(self.scene.clear_color_for_object(object_index)),
            depth: Some(0.0),
            rect: None,
        });
    }

    pub fn set_framebuffer_size_uniform(&self, program: &ShaderProgram<D>) {
        program.set_uniform_if_present(&self.device,
                                       UniformId::FramebufferSize,
                                       UniformData::from_vector_2i(self.dest_allocated_size()));
    }

    pub fn set_transform_uniform(&self,
                                 program: &ShaderProgram<D>,
                                 pass_transform: Transform4F,
                                 object_index: usize) {
        if !program.has_uniform(UniformId::Transform) {
            return;
        }
        let transform = self.compute_transform(pass_transform, object_index);
        self.device.set_uniform(program.uniform(UniformId::Transform),
                                UniformData::Mat4(transform.to_columns()));
    }

    pub fn set_transform_st_uniform(&self,
                                    program: &ShaderProgram<D>,
                                    pass_transform: Transform4F,
                                    object_index: usize) {
        if !program.has_uniform(UniformId::TransformST) {
            return;
        }
        let transform = self.compute_transform(pass_transform, object_index);
        self.device.set_uniform(program.uniform(UniformId::TransformST),
                                UniformData::Vec4(transform.scale_translation()));
    }

    /// Splits the transform into `uTransformST` and `uTransformExt`. Perspective is dropped.
    pub fn set_transform_affine_uniforms(&self,
                                         program: &ShaderProgram<D>,
                                         pass_transform: Transform4F,
                                         object_index: usize) {
        let transform = self.compute_transform(pass_transform, object_index);
        program.set_uniform_if_present(&self.device,
                                       UniformId::TransformST,
                                       UniformData::Vec4(transform.scale_translation()));
        program.set_uniform_if_present(&self.device,
                                       UniformId::TransformExt,
                                       UniformData::Vec2(transform.skew()));
    }

    /// Maps the unit quad onto the used part of the destination.
    pub fn set_transform_and_tex_scale_uniforms_for_dest(&self, program: &ShaderProgram<D>) {
        let used_size_factor = self.used_size_factor();
        program.set_uniform_if_present(&self.device,
                                       UniformId::TexScale,
                                       UniformData::Vec2(used_size_factor.0));
        if program.has_uniform(UniformId::Transform) {
            let transform = Transform4F::from_translation(-1.0, -1.0, 0.0) *
                Transform4F::from_scale(2.0 * used_size_factor.x(),
                                        2.0 * used_size_factor.y(),
                                        1.0);
            self.device.set_uniform(program.uniform(UniformId::Transform),
                                    UniformData::Mat4(transform.to_columns()));
        }
    }

    pub fn set_transform_st_and_tex_scale_uniforms_for_dest(&self, program: &ShaderProgram<D>) {
        let used_size_factor = self.used_size_factor();
        let transform_st = F32x4::new(2.0 * used_size_factor.x(),
                                      2.0 * used_size_factor.y(),
                                      -1.0,
                                      -1.0);
        program.set_uniform_if_present(&self.device,
                                       UniformId::TransformST,
                                       UniformData::Vec4(transform_st));
        program.set_uniform_if_present(&self.device,
                                       UniformId::TexScale,
                                       UniformData::Vec2(used_size_factor.0));
    }

    pub fn set_path_colors_uniform(&self,
                                   program: &ShaderProgram<D>,
                                   object_index: usize,
                                   texture_unit: u32) {
        self.path_colors.bind(&self.device, program, object_index, texture_unit);
    }

    pub fn bind_path_transforms(&self,
                                program: &ShaderProgram<D>,
                                object_index: usize,
                                st_texture_unit: u32,
                                ext_texture_unit: u32) {
        self.path_transforms_st.bind(&self.device, program, object_index, st_texture_unit);
        self.path_transforms_ext.bind(&self.device, program, object_index, ext_texture_unit);
    }

    /// The scene's embolden amount plus any stem darkening.
    pub fn total_embolden_amount(&self) -> Vector2F {
        self.scene.embolden_amount() + self.stem_darkening.dilation(self.scene.pixels_per_em())
    }

    pub fn set_embolden_amount_uniform(&self, program: &ShaderProgram<D>, _object_index: usize) {
        program.set_uniform_if_present(&self.device,
                                       UniformId::EmboldenAmount,
                                       UniformData::Vec2(self.total_embolden_amount().0));
    }

    pub fn set_hints_uniform(&self, program: &ShaderProgram<D>) {
        let hints = self.scene.hints();
        program.set_uniform_if_present(&self.device,
                                       UniformId::Hints,
                                       UniformData::Vec4(F32x4::new(hints[0],
                                                                    hints[1],
                                                                    hints[2],
                                                                    hints[3])));
    }

    /// Binds the gamma LUT when gamma correction is on.
    pub fn bind_gamma_lut(&self, bg_color: ColorF, texture_unit: u32, program: &ShaderProgram<D>) {
        if self.gamma_correction == GammaCorrectionMode::Off {
            return;
        }
        if program.has_uniform(UniformId::GammaLUT) {
            self.device.bind_texture(&self.context.gamma_lut_texture, texture_unit);
            self.device.set_uniform(program.uniform(UniformId::GammaLUT),
                                    UniformData::TextureUnit(texture_unit));
        }
        program.set_uniform_if_present(&self.device,
                                       UniformId::BGColor,
                                       UniformData::Vec4(bg_color.0));
    }

    pub fn bind_area_lut(&self, texture_unit: u32, program: &ShaderProgram<D>) {
        if program.has_uniform(UniformId::AreaLUT) {
            self.device.bind_texture(&self.context.area_lut_texture, texture_unit);
            self.device.set_uniform(program.uniform(UniformId::AreaLUT),
                                    UniformData::TextureUnit(texture_unit));
        }
    }

    /// Loop-Blinn rendering of the object's interiors and, unless conservative, its curves.
    pub fn directly_render_object(&self,
                                  mode: DirectRenderingMode,
                                  pass_transform: Transform4F,
                                  object_index: usize) {
        if !self.meshes_attached() {
            return;
        }
        let instance_range = self.scene.instance_range_for_object(object_index);
        if instance_range.is_empty() {
            return;
        }
        let (meshes, mesh_buffers) = match self.object_meshes(object_index) {
            Some(object_meshes) => object_meshes,
            None => return,
        };
        let path_range = self.path_range_for_object(object_index);
        let instanced = self.scene.path_ids_are_instanced();

        // Interiors.
        let interior_program = self.program(self.scene.direct_interior_program(mode));
        self.device.bind_vertex_array(&self.implicit_cover_interior_vertex_array);
        self.device.use_program(&interior_program.program);
        self.device.bind_buffer(&mesh_buffers.b_quad_vertex_positions, BufferTarget::Vertex);
        interior_program.configure_attribute_if_present(&self.device,
                                                        AttributeId::Position,
                                                        &POSITION_ATTR);
        self.bind_path_ids(interior_program, mesh_buffers, instance_range, instanced);
        if interior_program.id == ProgramId::ConservativeInterior {
            self.device.bind_buffer(&self.context.vertex_id_buffer, BufferTarget::Vertex);
            interior_program.configure_attribute_if_present(&self.device,
                                                            AttributeId::VertexID,
                                                            &VERTEX_ID_ATTR);
        }
        self.device.bind_buffer(&mesh_buffers.b_quad_vertex_interior_indices,
                                BufferTarget::Index);

        if mode == DirectRenderingMode::Conservative {
            self.set_transform_affine_uniforms(interior_program, pass_transform, object_index);
        } else {
            self.set_transform_uniform(interior_program, pass_transform, object_index);
        }
        self.set_direct_uniforms(interior_program, object_index);

        let interior_range =
            resolve_index_range(&meshes.b_quad_vertex_interior_index_path_ranges, path_range);
        let interior_state = RenderState {
            blend: BlendState::Off,
            depth: Some(DepthState { func: DepthFunc::Greater, write: true }),
            cull_back_faces: true,
            ..RenderState::default()
        };
        if !instanced {
            self.device.draw_elements(Primitive::Triangles,
                                      interior_range.start,
                                      interior_range.length(),
                                      &interior_state);
        } else {
            self.device.draw_elements_instanced(Primitive::Triangles,
                                                interior_range.length(),
                                                instance_range.length(),
                                                &interior_state);
        }

        if mode == DirectRenderingMode::Conservative {
            return;
        }

        // Curves.
        let curve_program = self.program(self.scene.direct_curve_program());
        self.device.bind_vertex_array(&self.implicit_cover_curve_vertex_array);
        self.device.use_program(&curve_program.program);
        self.device.bind_buffer(&mesh_buffers.b_quad_vertex_positions, BufferTarget::Vertex);
        curve_program.configure_attribute_if_present(&self.device,
                                                     AttributeId::Position,
                                                     &POSITION_ATTR);
        self.device.bind_buffer(&self.context.vertex_id_buffer, BufferTarget::Vertex);
        curve_program.configure_attribute_if_present(&self.device,
                                                     AttributeId::VertexID,
                                                     &VERTEX_ID_ATTR);
        self.bind_path_ids(curve_program, mesh_buffers, instance_range, instanced);

        self.set_transform_uniform(curve_program, pass_transform, object_index);
        self.set_direct_uniforms(curve_program, object_index);

        let curve_range =
            resolve_index_range(&meshes.b_quad_vertex_position_path_ranges, path_range);
        let curve_state = RenderState {
            blend: BlendState::RGBOneAlphaOneMinusSrcAlpha,
            depth: Some(DepthState { func: DepthFunc::Greater, write: false }),
            ..RenderState::default()
        };
        if !instanced {
            self.device.draw_arrays(Primitive::Triangles,
                                    curve_range.start * 6,
                                    curve_range.length() * 6,
                                    &curve_state);
        } else {
            self.device.draw_arrays_instanced(Primitive::Triangles,
                                              curve_range.length() * 6,
                                              instance_range.length(),
                                              &curve_state);
        }
    }

    fn bind_path_ids(&self,
                     program: &ShaderProgram<D>,
                     mesh_buffers: &PackedMeshBuffers<D>,
                     instance_range: Range,
                     instanced: bool) {
        let path_ids = if instanced {
            &self.context.instanced_path_id_buffer
        } else {
            &mesh_buffers.b_quad_vertex_position_path_ids
        };
        self.device.bind_buffer(path_ids, BufferTarget::Vertex);
        program.configure_attribute_if_present(&self.device,
                                               AttributeId::PathID,
                                               &VertexAttrDescriptor {
            size: 1,
            class: VertexAttrClass::Float,
            attr_type: VertexAttrType::U16,
            stride: 0,
            offset: instance_range.start as usize * mem::size_of::<u16>(),
            divisor: if instanced { 1 } else { 0 },
        });
    }

    // Uniforms shared by the interior and curve programs.
    fn set_direct_uniforms(&self, program: &ShaderProgram<D>, object_index: usize) {
        self.set_framebuffer_size_uniform(program);
        self.set_hints_uniform(program);
        self.set_path_colors_uniform(program, object_index, 0);
        self.set_embolden_amount_uniform(program, object_index);
        self.bind_path_transforms(program, object_index, 1, 2);
    }
}

const POSITION_ATTR: VertexAttrDescriptor = VertexAttrDescriptor {
    size: 2,
    class: VertexAttrClass::Float,
    attr_type: VertexAttrType::F32,
    stride: 0,
    offset: 0,
    divisor: 0,
};

const VERTEX_ID_ATTR: VertexAttrDescriptor = VertexAttrDescriptor {
    size: 1,
    class: VertexAttrClass::Float,
    attr_type: VertexAttrType::F32,
    stride: 0,
    offset: 0,
    divisor: 0,
};
