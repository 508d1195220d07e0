// font-locate/src/descriptor.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A request for a font: a family-name pattern plus style and weight.

use crate::file_type;
use crate::properties::{Style, Weight};

/// A request for a font: a family-name pattern plus style and weight.
///
/// The pattern is a regular expression matched case-insensitively against family names. This
/// object supports a method chaining style for idiomatic initialization; e.g.
///
///     # use font_locate::descriptor::Descriptor;
///     # use font_locate::properties::{Style, Weight};
///     let descriptor = Descriptor::new("Noto Sans").style(Style::Italic).weight(Weight::BOLD);
///     assert_eq!(descriptor.normalized_name(), "noto_sans-italic-bold");
#[derive(Clone, Debug, PartialEq)]
pub struct Descriptor {
    /// The family-name pattern.
    pub pattern: String,
    /// The requested style.
    pub style: Style,
    /// The requested weight.
    pub weight: Weight,
}

impl Descriptor {
    /// Creates a request for the normal style and weight of `pattern`.
    #[inline]
    pub fn new<S>(pattern: S) -> Descriptor
    where
        S: Into<String>,
    {
        Descriptor {
            pattern: pattern.into(),
            style: Style::Normal,
            weight: Weight::NORMAL,
        }
    }

    /// Sets the style and returns this descriptor for method chaining.
    #[inline]
    pub fn style(mut self, style: Style) -> Descriptor {
        self.style = style;
        self
    }

    /// Sets the weight and returns this descriptor for method chaining.
    #[inline]
    pub fn weight(mut self, weight: Weight) -> Descriptor {
        self.weight = weight;
        self
    }

    /// The registry key for this request.
    #[inline]
    pub fn normalized_name(&self) -> String {
        normalize_font_name(&self.pattern, self.style, self.weight)
    }
}

/// Derives the registry key for a font name with a given style and weight.
///
/// The name is trimmed, stripped of a font-file extension, whitespace runs are folded into
/// `_`, and the result is lower-cased. Then `-italic` is appended for slanted styles, followed
/// by `-light` or `-bold` for light and bold weights.
pub fn normalize_font_name(name: &str, style: Style, weight: Weight) -> String {
    let name = file_type::strip_font_extension(name.trim());
    let mut normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    if style.is_slanted() {
        normalized.push_str("-italic");
    }
    if weight.is_light() {
        normalized.push_str("-light");
    } else if weight.is_bold() {
        normalized.push_str("-bold");
    }
    normalized
}
