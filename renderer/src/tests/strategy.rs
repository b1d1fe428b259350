/* Any copyright is dedicated to the Public Domain.
 * http://creativecommons.org/publicdomain/zero/1.0/ */

use super::device::DrawKind;
use super::scene::TestScene;
use super::{attached_renderer, new_renderer, window_size};
use crate::gpu::options::{AntialiasingOptions, AntialiasingStrategyKind, GammaCorrectionMode};
use crate::gpu::options::SubpixelAaType;
use crate::gpu::strategy::xcaa::LCD_FILTER_KERNEL;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use pathfinder_gpu::{BlendState, DepthFunc, DepthState, TextureFormat, UniformData};
use pathfinder_simd::default::F32x4;

#[test]
fn test_mcaa_draws_one_instance_per_bounding_box() {
    let scene = TestScene::new(1, 3);
    let mut renderer = attached_renderer(&scene, AntialiasingStrategyKind::Mcaa);
    renderer.redraw();

    let draw_calls = renderer.device().draw_calls();
    let programs: Vec<&str> = draw_calls.iter().map(|call| &*call.program).collect();
    assert_eq!(programs, vec!["conservative-interior", "mcaa", "xcaa-mono-resolve"]);

    let conservative = &draw_calls[0];
    assert_eq!((conservative.kind, conservative.first, conservative.count),
               (DrawKind::Elements, 0, 18));

    let mcaa = &draw_calls[1];
    assert_eq!((mcaa.kind, mcaa.count, mcaa.instances), (DrawKind::ElementsInstanced, 6, 3));
    assert_eq!(mcaa.render_state.blend, BlendState::RGBOneAlphaOne);
    assert_eq!(mcaa.render_state.depth,
               Some(DepthState { func: DepthFunc::Greater, write: false }));
    assert_eq!(mcaa.render_state.scissor, Some(RectI::from_size(window_size())));

    let resolve = &draw_calls[2];
    assert_eq!((resolve.kind, resolve.count), (DrawKind::Elements, 6));
    assert_eq!(resolve.render_state.blend, BlendState::Off);

    assert_eq!(renderer.device().uniform_values("mcaa", "Multicolor"), vec![UniformData::Int(0)]);

    let targets = renderer.device().framebuffer_targets();
    assert!(targets.contains(&Some(TextureFormat::RGBA16F)));
    assert_eq!(targets.last(), Some(&None));
}

#[test]
fn test_multicolor_mcaa_blends_directly_into_the_destination() {
    let scene = TestScene::new(1, 2);
    scene.0.borrow_mut().multicolor = true;
    let mut renderer = attached_renderer(&scene, AntialiasingStrategyKind::Mcaa);
    renderer.redraw();

    let draw_calls = renderer.device().draw_calls();
    let programs: Vec<&str> = draw_calls.iter().map(|call| &*call.program).collect();
    assert_eq!(programs, vec!["conservative-interior", "mcaa"]);
    assert_eq!(draw_calls[1].render_state.blend, BlendState::RGBOneAlphaOneMinusSrcAlpha);
    assert_eq!(renderer.device().uniform_values("mcaa", "Multicolor"), vec![UniformData::Int(1)]);
}

#[test]
fn test_stencil_draws_each_side_of_every_segment() {
    let scene = TestScene::new(1, 2);
    let mut renderer = attached_renderer(&scene, AntialiasingStrategyKind::StencilAaa);
    renderer.redraw();

    let draw_calls = renderer.device().draw_calls();
    assert_eq!(renderer.device().draw_programs(),
               vec!["stencil-aaa", "stencil-aaa", "xcaa-mono-resolve"]);
    for draw_call in &draw_calls[0..2] {
        assert_eq!((draw_call.kind, draw_call.count, draw_call.instances),
                   (DrawKind::ElementsInstanced, 6, 4));
        assert_eq!(draw_call.render_state.blend, BlendState::RGBOneAlphaOne);
        assert_eq!(draw_call.render_state.depth, None);
    }
    assert_eq!(renderer.device().uniform_values("stencil-aaa", "Side"),
               vec![UniformData::Int(0), UniformData::Int(1)]);
}

#[test]
fn test_stencil_without_segment_table_draws_every_segment() {
    let scene = TestScene::new(1, 3);
    let mut renderer = new_renderer(&scene,
                                    AntialiasingStrategyKind::StencilAaa,
                                    1,
                                    AntialiasingOptions::default());
    let mut meshes = scene.meshes();
    meshes[0].stencil_segment_path_ranges.clear();
    renderer.attach_meshes(meshes);
    renderer.device().clear_commands();
    renderer.redraw();

    let draw_calls = renderer.device().draw_calls();
    assert_eq!(draw_calls[0].instances, 6);
}

#[test]
fn test_adaptive_chooses_per_object() {
    let scene = TestScene::new(3, 1);
    scene.0.borrow_mut().stencil_objects = vec![true, false, true];
    let mut renderer = attached_renderer(&scene, AntialiasingStrategyKind::AdaptiveStencilMesh);
    renderer.redraw();

    assert_eq!(renderer.device().draw_programs(),
               vec!["stencil-aaa", "stencil-aaa", "xcaa-mono-resolve",
                    "mcaa", "xcaa-mono-resolve",
                    "stencil-aaa", "stencil-aaa", "xcaa-mono-resolve"]);
}

#[test]
fn test_adaptive_keeps_both_accumulation_framebuffers() {
    let scene = TestScene::new(1, 1);
    let renderer = attached_renderer(&scene, AntialiasingStrategyKind::AdaptiveStencilMesh);
    assert_eq!(renderer.device().live_framebuffers(), 2);
}

#[test]
fn test_ssaa_renders_at_a_multiple_and_blits() {
    let scene = TestScene::new(1, 1);
    let mut renderer = new_renderer(&scene,
                                    AntialiasingStrategyKind::Ssaa,
                                    4,
                                    AntialiasingOptions::default());
    let supersampled_size = Vector2I::new(128, 64);
    assert!(renderer.device()
                    .created_textures()
                    .contains(&(TextureFormat::RGBA8, supersampled_size)));

    renderer.attach_meshes(scene.meshes());
    renderer.device().clear_commands();
    renderer.redraw();
    assert_eq!(renderer.device().draw_programs(),
               vec!["direct-interior", "direct-curve", "blit"]);

    let targets = renderer.device().framebuffer_targets();
    assert!(targets.contains(&Some(TextureFormat::RGBA8)));
    assert_eq!(targets.last(), Some(&None));
    assert!(renderer.device().viewports().contains(&RectI::from_size(supersampled_size)));
}

#[test]
fn test_lcd_triples_horizontal_resolution() {
    let scene = TestScene::new(1, 1);
    let options = AntialiasingOptions {
        subpixel_aa: SubpixelAaType::Lcd,
        ..AntialiasingOptions::default()
    };
    let mut renderer = new_renderer(&scene, AntialiasingStrategyKind::Mcaa, 1, options);
    assert!(renderer.device()
                    .created_textures()
                    .contains(&(TextureFormat::RGBA16F, Vector2I::new(192, 32))));

    renderer.attach_meshes(scene.meshes());
    renderer.device().clear_commands();
    renderer.redraw();

    let kernel = F32x4::new(LCD_FILTER_KERNEL[0],
                            LCD_FILTER_KERNEL[1],
                            LCD_FILTER_KERNEL[2],
                            LCD_FILTER_KERNEL[3]);
    assert_eq!(renderer.device().uniform_values("xcaa-mono-subpixel-resolve", "Kernel"),
               vec![UniformData::Vec4(kernel)]);
}

#[test]
fn test_gamma_lut_is_bound_only_when_enabled() {
    let scene = TestScene::new(1, 1);

    let mut renderer = attached_renderer(&scene, AntialiasingStrategyKind::StencilAaa);
    renderer.redraw();
    assert!(renderer.device().uniform_values("xcaa-mono-resolve", "GammaLUT").is_empty());

    let options = AntialiasingOptions {
        gamma_correction: GammaCorrectionMode::On,
        ..AntialiasingOptions::default()
    };
    renderer.set_antialiasing_options(AntialiasingStrategyKind::StencilAaa, 1, options);
    renderer.device().clear_commands();
    renderer.redraw();
    assert_eq!(renderer.device().uniform_values("xcaa-mono-resolve", "GammaLUT"),
               vec![UniformData::TextureUnit(1)]);
}
