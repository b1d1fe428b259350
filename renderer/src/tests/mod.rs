/* Any copyright is dedicated to the Public Domain.
 * http://creativecommons.org/publicdomain/zero/1.0/ */

use self::device::{MockDevice, MockResourceLoader};
use self::scene::TestScene;
use crate::gpu::options::{AntialiasingOptions, AntialiasingSettings, AntialiasingStrategyKind};
use crate::gpu::options::{DestFramebuffer, RendererOptions};
use crate::gpu::renderer::Renderer;
use pathfinder_geometry::vector::Vector2I;

mod buffer_texture;
mod options;
mod scene;
mod strategy;

const WINDOW_SIZE: (i32, i32) = (64, 32);

fn window_size() -> Vector2I {
    Vector2I::new(WINDOW_SIZE.0, WINDOW_SIZE.1)
}

fn new_renderer(scene: &TestScene,
                kind: AntialiasingStrategyKind,
                level: u32,
                options: AntialiasingOptions)
                -> Renderer<MockDevice> {
    let _ = env_logger::try_init();
    let renderer_options = RendererOptions {
        dest: DestFramebuffer::full_window(window_size()),
        antialiasing: AntialiasingSettings { kind, level, options },
    };
    match Renderer::new(MockDevice::new(),
                        &MockResourceLoader,
                        Box::new(scene.clone()),
                        renderer_options) {
        Ok(renderer) => renderer,
        Err(err) => panic!("failed to create renderer: {}", err),
    }
}

/// A renderer with the scene's meshes attached and the setup commands discarded.
fn attached_renderer(scene: &TestScene, kind: AntialiasingStrategyKind) -> Renderer<MockDevice> {
    let mut renderer = new_renderer(scene, kind, 1, AntialiasingOptions::default());
    renderer.attach_meshes(scene.meshes());
    renderer.device().clear_commands();
    renderer
}
