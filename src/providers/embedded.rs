// font-locate/src/providers/embedded.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A provider that serves fonts compiled into the binary.

use crate::cancel::CancelToken;
use crate::descriptor::Descriptor;
use crate::error::{FontLoadingError, SelectionError};
use crate::font::ScalableFont;
use crate::handle::{FontSource, PackagedFont};
use crate::matching;
use crate::properties::{Style, Weight};
use crate::provider::Provider;

/// The file name of the packaged font that serves as the fallback font.
pub const DEFAULT_FALLBACK_FILENAME: &str = "DejaVuSansMono.ttf";

/// The fonts packaged with this crate.
pub static PACKAGED_FONTS: &[PackagedFont] = &[
    PackagedFont {
        path: "packaged/DejaVuSansMono.ttf",
        bytes: include_bytes!("../../resources/packaged/DejaVuSansMono.ttf"),
    },
    PackagedFont {
        path: "packaged/DejaVuSansMono-Bold.ttf",
        bytes: include_bytes!("../../resources/packaged/DejaVuSansMono-Bold.ttf"),
    },
];

/// Returns the packaged fallback font.
pub fn default_font() -> Result<ScalableFont, FontLoadingError> {
    packaged_font(PACKAGED_FONTS, DEFAULT_FALLBACK_FILENAME)
}

fn packaged_font(
    fonts: &'static [PackagedFont],
    file_name: &str,
) -> Result<ScalableFont, FontLoadingError> {
    let font = fonts
        .iter()
        .find(|font| font.file_name() == file_name)
        .ok_or_else(|| FontLoadingError::NoSuchFile(file_name.to_owned()))?;
    Ok(to_scalable_font(fonts, font))
}

fn to_scalable_font(fonts: &'static [PackagedFont], font: &PackagedFont) -> ScalableFont {
    let (style, weight) = matching::guess_style_and_weight(font.file_name());
    ScalableFont::new(
        font.file_name(),
        style,
        weight,
        FontSource::Embedded(fonts),
        font.path,
    )
}

/// A provider that serves fonts compiled into the binary.
///
/// By default a request that matches none of the packaged fonts is answered with the default
/// packaged font, so this provider succeeds for every valid pattern. A strict provider fails
/// instead, which lets later providers in a chain have their turn.
#[derive(Clone, Debug)]
pub struct EmbeddedProvider {
    fonts: &'static [PackagedFont],
    default_file: &'static str,
    strict: bool,
}

impl EmbeddedProvider {
    /// Creates a provider over the fonts packaged with this crate.
    pub fn new() -> EmbeddedProvider {
        EmbeddedProvider::from_fonts(PACKAGED_FONTS, DEFAULT_FALLBACK_FILENAME)
    }

    /// Creates a provider over `fonts`, answering unmatched requests with `default_file`.
    pub fn from_fonts(
        fonts: &'static [PackagedFont],
        default_file: &'static str,
    ) -> EmbeddedProvider {
        EmbeddedProvider {
            fonts,
            default_file,
            strict: false,
        }
    }

    /// Sets whether unmatched requests fail, and returns this provider for method chaining.
    pub fn strict(mut self, strict: bool) -> EmbeddedProvider {
        self.strict = strict;
        self
    }

    /// The packaged fonts this provider serves.
    #[inline]
    pub fn fonts(&self) -> &'static [PackagedFont] {
        self.fonts
    }

    /// Finds the packaged font whose file name best matches the request.
    pub fn find(
        &self,
        pattern: &str,
        style: Style,
        weight: Weight,
    ) -> Result<ScalableFont, SelectionError> {
        matching::family_pattern(pattern)?;
        let candidates: Vec<&'static str> = self
            .fonts
            .iter()
            .map(|font| font.file_name())
            .filter(|file_name| matching::matches(file_name, pattern, style, weight))
            .collect();
        if let Some((file_name, confidence)) = matching::select_variant(&candidates, style, weight)
        {
            debug!(
                "found embedded font file {} (confidence={:?})",
                file_name, confidence
            );
            return packaged_font(self.fonts, file_name)
                .map_err(|error| SelectionError::CannotAccessSource(error.to_string()));
        }
        if self.strict {
            return Err(SelectionError::NotFound);
        }
        debug!("no embedded font matches {}, using {}", pattern, self.default_file);
        packaged_font(self.fonts, self.default_file)
            .map_err(|error| SelectionError::CannotAccessSource(error.to_string()))
    }
}

impl Default for EmbeddedProvider {
    fn default() -> EmbeddedProvider {
        EmbeddedProvider::new()
    }
}

impl Provider for EmbeddedProvider {
    fn locate(
        &self,
        _: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        self.find(&descriptor.pattern, descriptor.style, descriptor.weight)
    }
}
