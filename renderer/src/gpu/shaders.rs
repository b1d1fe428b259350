// pathfinder/renderer/src/gpu/shaders.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The closed set of shader programs, uniforms and vertex attributes.
//!
//! Each program resolves every `UniformId` and `AttributeId` once at link time. Programs are
//! heterogeneous, so callers check presence before binding.

use fxhash::FxHashMap;
use pathfinder_gpu::resources::ResourceLoader;
use pathfinder_gpu::{Device, ProgramError, UniformData, VertexAttrDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgramId {
    ConservativeInterior,
    DirectInterior,
    DirectCurve,
    Mcaa,
    StencilAaa,
    XcaaMonoResolve,
    XcaaMonoSubpixelResolve,
    Blit,
}

impl ProgramId {
    pub const ALL: [ProgramId; 8] = [
        ProgramId::ConservativeInterior,
        ProgramId::DirectInterior,
        ProgramId::DirectCurve,
        ProgramId::Mcaa,
        ProgramId::StencilAaa,
        ProgramId::XcaaMonoResolve,
        ProgramId::XcaaMonoSubpixelResolve,
        ProgramId::Blit,
    ];

    /// The resource name of the program's shaders.
    pub fn name(self) -> &'static str {
        match self {
            ProgramId::ConservativeInterior => "conservative-interior",
            ProgramId::DirectInterior => "direct-interior",
            ProgramId::DirectCurve => "direct-curve",
            ProgramId::Mcaa => "mcaa",
            ProgramId::StencilAaa => "stencil-aaa",
            ProgramId::XcaaMonoResolve => "xcaa-mono-resolve",
            ProgramId::XcaaMonoSubpixelResolve => "xcaa-mono-subpixel-resolve",
            ProgramId::Blit => "blit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformId {
    FramebufferSize,
    Transform,
    TransformST,
    TransformExt,
    TexScale,
    PathColors,
    PathColorsDimensions,
    PathTransformST,
    PathTransformSTDimensions,
    PathTransformExt,
    PathTransformExtDimensions,
    PathBounds,
    PathBoundsDimensions,
    EmboldenAmount,
    Hints,
    GammaLUT,
    AreaLUT,
    BGColor,
    FGColor,
    AAAlpha,
    AAAlphaDimensions,
    Kernel,
    Multicolor,
    Side,
    Source,
}

impl UniformId {
    pub const ALL: [UniformId; 25] = [
        UniformId::FramebufferSize,
        UniformId::Transform,
        UniformId::TransformST,
        UniformId::TransformExt,
        UniformId::TexScale,
        UniformId::PathColors,
        UniformId::PathColorsDimensions,
        UniformId::PathTransformST,
        UniformId::PathTransformSTDimensions,
        UniformId::PathTransformExt,
        UniformId::PathTransformExtDimensions,
        UniformId::PathBounds,
        UniformId::PathBoundsDimensions,
        UniformId::EmboldenAmount,
        UniformId::Hints,
        UniformId::GammaLUT,
        UniformId::AreaLUT,
        UniformId::BGColor,
        UniformId::FGColor,
        UniformId::AAAlpha,
        UniformId::AAAlphaDimensions,
        UniformId::Kernel,
        UniformId::Multicolor,
        UniformId::Side,
        UniformId::Source,
    ];

    /// The uniform's name, without the `u` prefix the device adds.
    pub fn name(self) -> &'static str {
        match self {
            UniformId::FramebufferSize => "FramebufferSize",
            UniformId::Transform => "Transform",
            UniformId::TransformST => "TransformST",
            UniformId::TransformExt => "TransformExt",
            UniformId::TexScale => "TexScale",
            UniformId::PathColors => "PathColors",
            UniformId::PathColorsDimensions => "PathColorsDimensions",
            UniformId::PathTransformST => "PathTransformST",
            UniformId::PathTransformSTDimensions => "PathTransformSTDimensions",
            UniformId::PathTransformExt => "PathTransformExt",
            UniformId::PathTransformExtDimensions => "PathTransformExtDimensions",
            UniformId::PathBounds => "PathBounds",
            UniformId::PathBoundsDimensions => "PathBoundsDimensions",
            UniformId::EmboldenAmount => "EmboldenAmount",
            UniformId::Hints => "Hints",
            UniformId::GammaLUT => "GammaLUT",
            UniformId::AreaLUT => "AreaLUT",
            UniformId::BGColor => "BGColor",
            UniformId::FGColor => "FGColor",
            UniformId::AAAlpha => "AAAlpha",
            UniformId::AAAlphaDimensions => "AAAlphaDimensions",
            UniformId::Kernel => "Kernel",
            UniformId::Multicolor => "Multicolor",
            UniformId::Side => "Side",
            UniformId::Source => "Source",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeId {
    Position,
    TexCoord,
    PathID,
    VertexID,
    TessCoord,
    Rect,
    UV,
    DUVDX,
    DUVDY,
    SignMode,
    FromPosition,
    CtrlPosition,
    ToPosition,
    FromNormal,
    CtrlNormal,
    ToNormal,
}

impl AttributeId {
    pub const ALL: [AttributeId; 16] = [
        AttributeId::Position,
        AttributeId::TexCoord,
        AttributeId::PathID,
        AttributeId::VertexID,
        AttributeId::TessCoord,
        AttributeId::Rect,
        AttributeId::UV,
        AttributeId::DUVDX,
        AttributeId::DUVDY,
        AttributeId::SignMode,
        AttributeId::FromPosition,
        AttributeId::CtrlPosition,
        AttributeId::ToPosition,
        AttributeId::FromNormal,
        AttributeId::CtrlNormal,
        AttributeId::ToNormal,
    ];

    /// The attribute's name, without the `a` prefix the device adds.
    pub fn name(self) -> &'static str {
        match self {
            AttributeId::Position => "Position",
            AttributeId::TexCoord => "TexCoord",
            AttributeId::PathID => "PathID",
            AttributeId::VertexID => "VertexID",
            AttributeId::TessCoord => "TessCoord",
            AttributeId::Rect => "Rect",
            AttributeId::UV => "UV",
            AttributeId::DUVDX => "DUVDX",
            AttributeId::DUVDY => "DUVDY",
            AttributeId::SignMode => "SignMode",
            AttributeId::FromPosition => "FromPosition",
            AttributeId::CtrlPosition => "CtrlPosition",
            AttributeId::ToPosition => "ToPosition",
            AttributeId::FromNormal => "FromNormal",
            AttributeId::CtrlNormal => "CtrlNormal",
            AttributeId::ToNormal => "ToNormal",
        }
    }
}

pub struct ShaderProgram<D> where D: Device {
    pub id: ProgramId,
    pub program: D::Program,
    uniforms: FxHashMap<UniformId, D::Uniform>,
    attributes: FxHashMap<AttributeId, D::VertexAttr>,
}

impl<D> ShaderProgram<D> where D: Device {
    pub fn new(device: &D, resources: &dyn ResourceLoader, id: ProgramId)
               -> Result<ShaderProgram<D>, ProgramError> {
        let program = device.create_program(resources, id.name())?;

        let mut uniforms = FxHashMap::default();
        for &uniform_id in UniformId::ALL.iter() {
            if let Some(uniform) = device.get_uniform(&program, uniform_id.name()) {
                uniforms.insert(uniform_id, uniform);
            }
        }

        let mut attributes = FxHashMap::default();
        for &attribute_id in AttributeId::ALL.iter() {
            if let Some(attribute) = device.get_vertex_attr(&program, attribute_id.name()) {
                attributes.insert(attribute_id, attribute);
            }
        }

        debug!("program `{}`: {} uniforms, {} attributes",
               id.name(),
               uniforms.len(),
               attributes.len());
        Ok(ShaderProgram { id, program, uniforms, attributes })
    }

    #[inline]
    pub fn has_uniform(&self, id: UniformId) -> bool {
        self.uniforms.contains_key(&id)
    }

    #[inline]
    pub fn has_attribute(&self, id: AttributeId) -> bool {
        self.attributes.contains_key(&id)
    }

    /// Panics if the program does not declare the uniform.
    pub fn uniform(&self, id: UniformId) -> &D::Uniform {
        match self.uniforms.get(&id) {
            Some(uniform) => uniform,
            None => panic!("program `{}` does not declare `u{}`", self.id.name(), id.name()),
        }
    }

    /// Panics if the program does not declare the attribute.
    pub fn attribute(&self, id: AttributeId) -> &D::VertexAttr {
        match self.attributes.get(&id) {
            Some(attribute) => attribute,
            None => panic!("program `{}` does not declare `a{}`", self.id.name(), id.name()),
        }
    }

    /// Sets the uniform if the program declares it.
    #[inline]
    pub fn set_uniform_if_present(&self, device: &D, id: UniformId, data: UniformData) {
        if let Some(uniform) = self.uniforms.get(&id) {
            device.set_uniform(uniform, data);
        }
    }

    /// Points the attribute at the currently bound vertex buffer if the program declares it.
    #[inline]
    pub fn configure_attribute_if_present(&self,
                                          device: &D,
                                          id: AttributeId,
                                          descriptor: &VertexAttrDescriptor) {
        if let Some(attribute) = self.attributes.get(&id) {
            device.configure_vertex_attr(attribute, descriptor);
        }
    }
}

/// Every program, linked up front. There is no partially-linked state.
pub struct ShaderPrograms<D> where D: Device {
    programs: Vec<ShaderProgram<D>>,
}

impl<D> ShaderPrograms<D> where D: Device {
    pub fn new(device: &D, resources: &dyn ResourceLoader)
               -> Result<ShaderPrograms<D>, ProgramError> {
        let mut programs = Vec::with_capacity(ProgramId::ALL.len());
        for &id in ProgramId::ALL.iter() {
            programs.push(ShaderProgram::new(device, resources, id)?);
        }
        Ok(ShaderPrograms { programs })
    }

    #[inline]
    pub fn get(&self, id: ProgramId) -> &ShaderProgram<D> {
        &self.programs[id as usize]
    }
}
