// font-locate/src/providers/fontlist.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parses a list of installed fonts in the output format of `fc-list`.
//!
//! Each line reads `path: family[,family…]:style=Style[,Style…]`, e.g.
//!
//! ```text
//! /usr/share/fonts/NotoSansCham-Regular.ttf: Noto Sans Cham:style=Regular
//! ```
//!
//! Users produce the file with `fc-list > fontlist.txt`, which decouples this crate from the
//! fontconfig library.

use crate::family::FontVariantsLocation;

// Style keywords in order of precedence and the variant label each one stands for.
const STYLE_VARIANTS: [(&str, &str); 6] = [
    ("regular", "regular"),
    ("text", "regular"),
    ("light", "light"),
    ("italic", "italic"),
    ("bold", "bold"),
    ("black", "bold"),
];

/// Parses a font list. Lines that do not have at least three fields are skipped.
///
/// The first family name of a line is used, with a leading `.` removed. The style text is
/// reduced to a single variant label: "regular" (also for "text"), "light", "italic" or "bold"
/// (also for "black"). A line whose style says none of these yields an entry without variants,
/// which never matches.
pub fn parse(list: &str) -> Vec<FontVariantsLocation> {
    let mut locations = vec![];
    for line in list.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < 3 {
            continue;
        }
        let path = fields[0].trim();
        let family = fields[1].split(',').next().unwrap_or("").trim();
        let family = family.trim_start_matches('.');
        if path.is_empty() || family.is_empty() {
            continue;
        }
        let mut location = FontVariantsLocation::new(family, path);
        if let Some(variant) = style_variant(fields[2]) {
            location = location.variant(variant);
        }
        locations.push(location);
    }
    debug!("parsed {} entries from font list", locations.len());
    locations
}

fn style_variant(field: &str) -> Option<&'static str> {
    let field = field.to_lowercase();
    STYLE_VARIANTS
        .iter()
        .find(|&&(keyword, _)| field.contains(keyword))
        .map(|&(_, variant)| variant)
}
