// font-locate/src/handle.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Encapsulates where the bytes of a resolved font can be read from.
//!
//! A source is combined with a path relative to it. Nothing is read until a caller asks for the
//! bytes.

use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::FontLoadingError;

/// A font file compiled into the binary.
#[derive(Clone, Copy, Debug)]
pub struct PackagedFont {
    /// The path of the file within the package, e.g. `packaged/DejaVuSansMono.ttf`.
    pub path: &'static str,
    /// The raw TrueType/OpenType data.
    pub bytes: &'static [u8],
}

impl PackagedFont {
    /// The file name without its directory.
    pub fn file_name(&self) -> &'static str {
        match self.path.rfind('/') {
            Some(slash) => &self.path[slash + 1..],
            None => self.path,
        }
    }
}

/// Encapsulates where the bytes of a resolved font can be read from.
#[derive(Clone)]
pub enum FontSource {
    /// A directory on disk; the font's path is relative to it.
    Directory(PathBuf),
    /// A table of fonts compiled into the binary; the font's path names an entry.
    Embedded(&'static [PackagedFont]),
    /// The raw data of a single font in memory; the font's path is informational.
    Memory(Arc<Vec<u8>>),
}

impl FontSource {
    /// Creates a source for a directory on disk.
    #[inline]
    pub fn from_directory<P>(directory: P) -> FontSource
    where
        P: Into<PathBuf>,
    {
        FontSource::Directory(directory.into())
    }

    /// Creates a source from raw TTF/OTF/etc. data in memory.
    #[inline]
    pub fn from_memory(bytes: Arc<Vec<u8>>) -> FontSource {
        FontSource::Memory(bytes)
    }

    /// Reads the file at `path` from this source.
    pub fn read(&self, path: &str) -> Result<Vec<u8>, FontLoadingError> {
        if path.is_empty() {
            return Err(FontLoadingError::NoSource);
        }
        match *self {
            FontSource::Directory(ref directory) => Ok(fs::read(directory.join(path))?),
            FontSource::Embedded(fonts) => fonts
                .iter()
                .find(|font| font.path == path)
                .map(|font| font.bytes.to_vec())
                .ok_or_else(|| FontLoadingError::NoSuchFile(path.to_owned())),
            FontSource::Memory(ref bytes) => Ok((**bytes).clone()),
        }
    }
}

impl PartialEq for FontSource {
    fn eq(&self, other: &FontSource) -> bool {
        match (self, other) {
            (FontSource::Directory(a), FontSource::Directory(b)) => a == b,
            (FontSource::Embedded(a), FontSource::Embedded(b)) => {
                a.len() == b.len() && std::ptr::eq(a.as_ptr(), b.as_ptr())
            }
            (FontSource::Memory(a), FontSource::Memory(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl Debug for FontSource {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            FontSource::Directory(ref directory) => {
                f.debug_tuple("Directory").field(directory).finish()
            }
            FontSource::Embedded(fonts) => f
                .debug_tuple("Embedded")
                .field(&fonts.iter().map(|font| font.path).collect::<Vec<_>>())
                .finish(),
            FontSource::Memory(ref bytes) => {
                write!(f, "Memory({} bytes)", bytes.len())
            }
        }
    }
}
