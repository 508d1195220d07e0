// font-locate/src/font.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A resolved font: a variant of a typeface with a certain style and weight, plus the location
//! of its data.

use crate::error::FontLoadingError;
use crate::handle::FontSource;
use crate::properties::{Style, Weight};

/// A resolved, loadable font.
///
/// Resolution only records where the font lives. Call `read_bytes()` to load the data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScalableFont {
    /// The name the font was resolved under, usually its file name.
    pub name: String,
    /// The style of the font.
    pub style: Style,
    /// The weight of the font.
    pub weight: Weight,
    source: Option<FontSource>,
    path: String,
}

impl ScalableFont {
    /// Creates a font located at `path` within `source`.
    pub fn new<N, P>(
        name: N,
        style: Style,
        weight: Weight,
        source: FontSource,
        path: P,
    ) -> ScalableFont
    where
        N: Into<String>,
        P: Into<String>,
    {
        ScalableFont {
            name: name.into(),
            style,
            weight,
            source: Some(source),
            path: path.into(),
        }
    }

    /// The null font: no name, no source, no path.
    ///
    /// It signals "no resource" and accompanies cancellation and fallback errors only.
    #[inline]
    pub fn null() -> ScalableFont {
        ScalableFont::default()
    }

    /// Returns true if this is the null font.
    #[inline]
    pub fn is_null(&self) -> bool {
        *self == ScalableFont::null()
    }

    /// Returns true if this font can be handed out: it has a name, a source, and a path.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.source.is_some() && !self.path.is_empty()
    }

    /// Attaches a source and a path relative to it.
    pub fn set_source<P>(&mut self, source: FontSource, path: P)
    where
        P: Into<String>,
    {
        self.source = Some(source);
        self.path = path.into();
    }

    /// The path of the font within its source.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The source the font's data lives in.
    #[inline]
    pub fn source(&self) -> Option<&FontSource> {
        self.source.as_ref()
    }

    /// Reads the raw font data.
    pub fn read_bytes(&self) -> Result<Vec<u8>, FontLoadingError> {
        match self.source {
            Some(ref source) => source.read(&self.path),
            None => Err(FontLoadingError::NoSource),
        }
    }
}
