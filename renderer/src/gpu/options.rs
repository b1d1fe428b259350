// pathfinder/renderer/src/gpu/options.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various options that control how the renderer behaves.

use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::{Vector2F, Vector2I};
use pathfinder_gpu::Device;
use serde::{Deserialize, Serialize};

/// Options that influence rendering that can be changed at runtime.
pub struct RendererOptions<D> where D: Device {
    /// Where the rendering should go: either to the default framebuffer (i.e. screen) or to a
    /// custom framebuffer.
    pub dest: DestFramebuffer<D>,
    /// The antialiasing strategy to start with.
    pub antialiasing: AntialiasingSettings,
}

impl<D> Default for RendererOptions<D> where D: Device {
    #[inline]
    fn default() -> RendererOptions<D> {
        RendererOptions { dest: DestFramebuffer::default(), antialiasing: Default::default() }
    }
}

/// Which antialiasing algorithm the renderer runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AntialiasingStrategyKind {
    /// Direct rendering only.
    None,
    /// Supersampling with a downsampling blit.
    Ssaa,
    /// Mesh coverage accumulation over instanced bounding boxes.
    Mcaa,
    /// Stencil accumulation over instanced curve segments.
    StencilAaa,
    /// Stencil or mesh coverage, chosen per object.
    AdaptiveStencilMesh,
}

impl Default for AntialiasingStrategyKind {
    #[inline]
    fn default() -> AntialiasingStrategyKind {
        AntialiasingStrategyKind::Mcaa
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GammaCorrectionMode {
    Off,
    On,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubpixelAaType {
    None,
    /// Horizontal LCD stripes, resolved with a five-tap filter.
    Lcd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StemDarkeningMode {
    None,
    Dilate,
}

/// Should match macOS 10.13 High Sierra.
pub static STEM_DARKENING_FACTORS: [f32; 2] = [0.0121, 0.0121 * 1.25];

/// Should match macOS 10.13 High Sierra.
pub const MAX_STEM_DARKENING_AMOUNT: [f32; 2] = [0.3, 0.3];

/// Above this ppem value, no stem darkening is performed.
pub const MAX_STEM_DARKENING_PIXELS_PER_EM: f32 = 72.0;

impl StemDarkeningMode {
    /// How far outlines are pushed outward, in pixels, at the given size.
    pub fn dilation(self, pixels_per_em: f32) -> Vector2F {
        match self {
            StemDarkeningMode::Dilate if pixels_per_em <= MAX_STEM_DARKENING_PIXELS_PER_EM => {
                Vector2F::new(
                    f32::min(STEM_DARKENING_FACTORS[0] * pixels_per_em,
                             MAX_STEM_DARKENING_AMOUNT[0]),
                    f32::min(STEM_DARKENING_FACTORS[1] * pixels_per_em,
                             MAX_STEM_DARKENING_AMOUNT[1]))
            }
            StemDarkeningMode::Dilate | StemDarkeningMode::None => Vector2F::default(),
        }
    }
}

/// Antialiasing tweaks that apply regardless of the strategy kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AntialiasingOptions {
    pub gamma_correction: GammaCorrectionMode,
    pub subpixel_aa: SubpixelAaType,
    pub stem_darkening: StemDarkeningMode,
}

impl Default for AntialiasingOptions {
    #[inline]
    fn default() -> AntialiasingOptions {
        AntialiasingOptions {
            gamma_correction: GammaCorrectionMode::Off,
            subpixel_aa: SubpixelAaType::None,
            stem_darkening: StemDarkeningMode::None,
        }
    }
}

/// A complete antialiasing configuration, as passed to `Renderer::set_antialiasing_options()`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AntialiasingSettings {
    pub kind: AntialiasingStrategyKind,
    /// The supersampling level. Only meaningful for `Ssaa`.
    pub level: u32,
    pub options: AntialiasingOptions,
}

impl Default for AntialiasingSettings {
    #[inline]
    fn default() -> AntialiasingSettings {
        AntialiasingSettings {
            kind: AntialiasingStrategyKind::default(),
            level: 1,
            options: AntialiasingOptions::default(),
        }
    }
}

impl AntialiasingSettings {
    /// Parses settings from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<AntialiasingSettings, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// How path interiors are drawn before a strategy antialiases the edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectRenderingMode {
    None,
    /// Interiors are rasterized conservatively into depth only; no curve pass.
    Conservative,
    /// Interiors and Loop-Blinn curves are drawn in color.
    Color,
}

/// Which transform uniforms a strategy's programs consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformType {
    /// `uTransformST` and `uTransformExt`.
    Affine,
    /// A full `uTransform` matrix.
    ThreeD,
}

/// Where the rendered content should go.
#[derive(Clone)]
pub enum DestFramebuffer<D> where D: Device {
    /// The rendered content should go to the default framebuffer (e.g. the window in OpenGL).
    Default {
        /// The rectangle within the window to draw in, in device pixels.
        viewport: RectI,
        /// The total size of the window in device pixels.
        window_size: Vector2I,
    },
    /// The rendered content should go to a non-default framebuffer (off-screen, typically).
    Other(D::Framebuffer),
}

impl<D> Default for DestFramebuffer<D> where D: Device {
    #[inline]
    fn default() -> DestFramebuffer<D> {
        DestFramebuffer::Default { viewport: RectI::default(), window_size: Vector2I::default() }
    }
}

impl<D> DestFramebuffer<D> where D: Device {
    /// Returns a `DestFramebuffer` object that renders to the entire contents of the default
    /// framebuffer.
    #[inline]
    pub fn full_window(window_size: Vector2I) -> DestFramebuffer<D> {
        DestFramebuffer::Default { viewport: RectI::from_size(window_size), window_size }
    }

    /// The allocated size of the destination buffer, in device pixels.
    #[inline]
    pub fn window_size(&self, device: &D) -> Vector2I {
        match *self {
            DestFramebuffer::Default { window_size, .. } => window_size,
            DestFramebuffer::Other(ref framebuffer) => {
                device.texture_size(device.framebuffer_texture(framebuffer))
            }
        }
    }

    /// The part of the destination that content is drawn into. Anything beyond it is padding.
    #[inline]
    pub fn used_size(&self, device: &D) -> Vector2I {
        match *self {
            DestFramebuffer::Default { viewport, .. } => viewport.size(),
            DestFramebuffer::Other(_) => self.window_size(device),
        }
    }

    pub fn bind(&self, device: &D) {
        match *self {
            DestFramebuffer::Default { window_size, .. } => {
                device.bind_default_framebuffer(RectI::from_size(window_size))
            }
            DestFramebuffer::Other(ref framebuffer) => device.bind_framebuffer(framebuffer),
        }
    }
}
