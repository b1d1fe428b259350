/* Any copyright is dedicated to the Public Domain.
 * http://creativecommons.org/publicdomain/zero/1.0/ */

use super::device::{Command, MockDevice};
use crate::gpu::buffer_texture::{BufferTexture, BufferTextureCache, BufferTextureRole};
use pathfinder_geometry::vector::Vector2I;
use pathfinder_gpu::{TextureDataRef, TextureFormat};

fn uploads(device: &MockDevice) -> Vec<(Vector2I, usize)> {
    device.commands().into_iter().filter_map(|command| {
        match command {
            Command::UploadToTexture { size, len } => Some((size, len)),
            _ => None,
        }
    }).collect()
}

#[test]
fn test_buffer_texture_grows_only_when_needed() {
    let device = MockDevice::new();
    let mut buffer_texture = BufferTexture::new(BufferTextureRole::PathBounds);
    assert!(buffer_texture.texture().is_none());

    buffer_texture.upload(&device, TextureDataRef::F32(&[0.0; 10]));
    assert_eq!(buffer_texture.size(), Vector2I::new(2, 2));
    assert_eq!(buffer_texture.capacity(), 16);

    buffer_texture.upload(&device, TextureDataRef::F32(&[0.0; 16]));
    buffer_texture.upload(&device, TextureDataRef::F32(&[0.0; 3]));
    assert_eq!(device.created_textures(), vec![(TextureFormat::RGBA32F, Vector2I::new(2, 2))]);

    buffer_texture.upload(&device, TextureDataRef::F32(&[0.0; 17]));
    assert_eq!(buffer_texture.size(), Vector2I::new(3, 2));
    assert_eq!(device.created_textures(),
               vec![(TextureFormat::RGBA32F, Vector2I::new(2, 2)),
                    (TextureFormat::RGBA32F, Vector2I::new(3, 2))]);

    // Every upload covers the whole texture.
    let (small, large) = (Vector2I::new(2, 2), Vector2I::new(3, 2));
    assert_eq!(uploads(&device), vec![(small, 16), (small, 16), (small, 16), (large, 24)]);
    assert_eq!(device.live_textures(), 1);
}

#[test]
fn test_buffer_texture_reallocates_on_format_change() {
    let device = MockDevice::new();
    let mut buffer_texture = BufferTexture::new(BufferTextureRole::PathColors);
    buffer_texture.upload(&device, TextureDataRef::F32(&[0.0; 8]));
    buffer_texture.upload(&device, TextureDataRef::U8(&[0; 8]));
    assert_eq!(device.created_textures(),
               vec![(TextureFormat::RGBA32F, Vector2I::new(2, 1)),
                    (TextureFormat::RGBA8, Vector2I::new(2, 1))]);
}

#[test]
fn test_empty_upload_allocates_one_texel() {
    let device = MockDevice::new();
    let mut buffer_texture = BufferTexture::new(BufferTextureRole::PathTransformExt);
    buffer_texture.upload(&device, TextureDataRef::F32(&[]));
    assert_eq!(buffer_texture.size(), Vector2I::new(1, 1));
    assert_eq!(uploads(&device), vec![(Vector2I::new(1, 1), 4)]);
}

#[test]
fn test_cache_keeps_entries_when_resized() {
    let device = MockDevice::new();
    let mut cache = BufferTextureCache::new(BufferTextureRole::PathColors);
    cache.resize(2);
    assert_eq!(cache.len(), 2);
    assert!(cache.get(1).is_none());

    cache.get_or_create(1).upload(&device, TextureDataRef::U8(&[255; 4]));
    cache.resize(4);
    assert!(cache.get(1).is_some());
    assert!(cache.get(3).is_none());

    cache.get_or_create(6);
    assert_eq!(cache.len(), 7);

    cache.resize(1);
    assert_eq!(device.live_textures(), 0);
    cache.clear();
    assert!(cache.is_empty());
}
