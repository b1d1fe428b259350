/* Any copyright is dedicated to the Public Domain.
 * http://creativecommons.org/publicdomain/zero/1.0/ */

use crate::gpu::options::{AntialiasingSettings, AntialiasingStrategyKind, GammaCorrectionMode};
use crate::gpu::options::{StemDarkeningMode, SubpixelAaType};
use crate::gpu::options::{MAX_STEM_DARKENING_AMOUNT, STEM_DARKENING_FACTORS};
use pathfinder_geometry::vector::Vector2F;

#[test]
fn test_settings_parse_from_json() {
    let json = r#"{
        "kind": "stencil-aaa",
        "options": { "subpixel-aa": "lcd", "gamma-correction": "on" }
    }"#;
    let settings = match AntialiasingSettings::from_json(json) {
        Ok(settings) => settings,
        Err(err) => panic!("failed to parse settings: {}", err),
    };
    assert_eq!(settings.kind, AntialiasingStrategyKind::StencilAaa);
    assert_eq!(settings.level, 1);
    assert_eq!(settings.options.subpixel_aa, SubpixelAaType::Lcd);
    assert_eq!(settings.options.gamma_correction, GammaCorrectionMode::On);
    assert_eq!(settings.options.stem_darkening, StemDarkeningMode::None);
}

#[test]
fn test_empty_json_gives_defaults() {
    let settings = AntialiasingSettings::from_json("{}").ok();
    assert_eq!(settings, Some(AntialiasingSettings::default()));
    assert_eq!(AntialiasingSettings::default().kind, AntialiasingStrategyKind::Mcaa);
}

#[test]
fn test_every_kind_parses() {
    let kinds = [
        ("none", AntialiasingStrategyKind::None),
        ("ssaa", AntialiasingStrategyKind::Ssaa),
        ("mcaa", AntialiasingStrategyKind::Mcaa),
        ("stencil-aaa", AntialiasingStrategyKind::StencilAaa),
        ("adaptive-stencil-mesh", AntialiasingStrategyKind::AdaptiveStencilMesh),
    ];
    for &(name, kind) in kinds.iter() {
        let json = format!(r#"{{ "kind": "{}", "level": 4 }}"#, name);
        let settings = AntialiasingSettings::from_json(&json).ok();
        assert_eq!(settings.map(|settings| (settings.kind, settings.level)), Some((kind, 4)));
    }
}

#[test]
fn test_unknown_kind_is_rejected() {
    assert!(AntialiasingSettings::from_json(r#"{ "kind": "fxaa" }"#).is_err());
}

#[test]
fn test_stem_darkening_scales_with_size_and_clamps() {
    let dilate = StemDarkeningMode::Dilate;
    assert_eq!(dilate.dilation(10.0),
               Vector2F::new(STEM_DARKENING_FACTORS[0] * 10.0, STEM_DARKENING_FACTORS[1] * 10.0));
    assert_eq!(dilate.dilation(30.0),
               Vector2F::new(MAX_STEM_DARKENING_AMOUNT[0], MAX_STEM_DARKENING_AMOUNT[1]));
    assert_eq!(dilate.dilation(72.0), dilate.dilation(30.0));
    assert_eq!(dilate.dilation(100.0), Vector2F::default());
    assert_eq!(StemDarkeningMode::None.dilation(10.0), Vector2F::default());
}

#[test]
fn test_stem_darkening_parses_from_json() {
    let json = r#"{ "options": { "stem-darkening": "dilate" } }"#;
    let settings = AntialiasingSettings::from_json(json).ok();
    assert_eq!(settings.map(|settings| settings.options.stem_darkening),
               Some(StemDarkeningMode::Dilate));
}
