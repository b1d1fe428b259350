// pathfinder/renderer/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renders packed path meshes with a choice of antialiasing strategies.
//!
//! Meshes are produced ahead of time (see `meshes`). A `Scene` describes the objects to draw
//! each frame, and the `Renderer` drives the active antialiasing strategy over them.

#[macro_use]
extern crate log;

pub mod gpu;
pub mod mesh_index;
pub mod meshes;
pub mod scene;

#[cfg(test)]
mod tests;
