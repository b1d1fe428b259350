// pathfinder/gpu/src/resources.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An abstraction for reading resources.
//!
//! We can't always count on a filesystem being present.

use std::fs::File;
use std::io::{Error as IOError, ErrorKind, Read};
use std::path::{Path, PathBuf};

pub trait ResourceLoader {
    /// This is deliberately not a `Path`, because these are virtual paths
    /// that do not necessarily correspond to real paths on a filesystem.
    fn slurp(&self, path: &str) -> Result<Vec<u8>, IOError>;
}

pub struct FilesystemResourceLoader {
    pub directory: PathBuf,
}

impl FilesystemResourceLoader {
    /// Walks up from the current directory looking for `resources/` with `shaders/` and
    /// `textures/` inside.
    pub fn locate() -> Result<FilesystemResourceLoader, IOError> {
        let mut parent_directory = std::env::current_dir()?;
        loop {
            let resources_directory = parent_directory.join("resources");
            if is_resources_directory(&resources_directory) {
                return Ok(FilesystemResourceLoader { directory: resources_directory });
            }
            if !parent_directory.pop() {
                break;
            }
        }

        Err(IOError::new(ErrorKind::NotFound, "no suitable `resources/` directory found"))
    }
}

fn is_resources_directory(path: &Path) -> bool {
    path.join("shaders").is_dir() && path.join("textures").is_dir()
}

impl ResourceLoader for FilesystemResourceLoader {
    fn slurp(&self, virtual_path: &str) -> Result<Vec<u8>, IOError> {
        let mut path = self.directory.clone();
        virtual_path.split('/').for_each(|segment| path.push(segment));

        let mut data = vec![];
        File::open(&path)?.read_to_end(&mut data)?;
        Ok(data)
    }
}
