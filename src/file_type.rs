// font-locate/src/file_type.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The type of a font file, as far as it can be told from its name.

use std::path::Path;

const SINGLE_EXTENSIONS: [&str; 4] = ["ttf", "otf", "woff", "woff2"];
const COLLECTION_EXTENSIONS: [&str; 2] = ["ttc", "otc"];

/// The type of a font file: either a single font or a TrueType/OpenType collection.
///
/// Collections bundle several faces into one file. They are recognized but not opened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FileType {
    /// The font file represents a single font (`.ttf`, `.otf`, `.woff`, etc.)
    Single,
    /// The font file represents a collection of fonts (`.ttc`, `.otc`)
    Collection,
}

impl FileType {
    /// Classifies a path by its extension. Returns `None` for files that are not fonts.
    pub fn from_path<P>(path: P) -> Option<FileType>
    where
        P: AsRef<Path>,
    {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        if SINGLE_EXTENSIONS.contains(&&*extension) {
            Some(FileType::Single)
        } else if COLLECTION_EXTENSIONS.contains(&&*extension) {
            Some(FileType::Collection)
        } else {
            None
        }
    }

    /// Returns true if `path` names a font collection.
    #[inline]
    pub fn is_collection<P>(path: P) -> bool
    where
        P: AsRef<Path>,
    {
        FileType::from_path(path) == Some(FileType::Collection)
    }
}

/// Strips a trailing font-file extension from `name`, if there is one.
pub(crate) fn strip_font_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 && FileType::from_path(name).is_some() => &name[..dot],
        _ => name,
    }
}
