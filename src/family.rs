// font-locate/src/family.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Describes the known variants of a font family, as reported by a provider.

use serde::Deserialize;

/// The known variants of a font family and where to find them.
///
/// Variant labels are free-form strings such as `"regular"`, `"italic"` or `"700"`; the
/// matching algorithm interprets them heuristically.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FontVariantsLocation {
    /// The family name, e.g. "Noto Sans".
    pub family: String,
    /// The path of the font file, if the family lives in a single file.
    #[serde(default)]
    pub path: String,
    /// The variant labels.
    #[serde(default)]
    pub variants: Vec<String>,
}

impl FontVariantsLocation {
    /// Creates a location for `family` stored at `path`.
    pub fn new<F, P>(family: F, path: P) -> FontVariantsLocation
    where
        F: Into<String>,
        P: Into<String>,
    {
        FontVariantsLocation {
            family: family.into(),
            path: path.into(),
            variants: vec![],
        }
    }

    /// Adds a variant label and returns this location for method chaining.
    pub fn variant<V>(mut self, label: V) -> FontVariantsLocation
    where
        V: Into<String>,
    {
        self.variants.push(label.into());
        self
    }

    /// Returns true if and only if this family has no known variants.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
