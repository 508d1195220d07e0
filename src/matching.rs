// font-locate/src/matching.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Determines how closely a font variant matches a requested style and weight.
//!
//! Variant labels ("regular", "700italic", "Gill Sans MT Bold Italic") are interpreted
//! heuristically. Style and weight are scored separately on a four-level scale and then averaged,
//! rounding down, so that a variant matching only one axis is never overclaimed.

use std::path::Path;

use regex::{Regex, RegexBuilder};

use crate::error::SelectionError;
use crate::family::FontVariantsLocation;
use crate::file_type::{self, FileType};
use crate::properties::{Style, Weight};

/// How well a variant matches a request.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum MatchConfidence {
    /// The variant does not match.
    None = 0,
    /// The variant is usable, but noticeably different from what was requested.
    Low = 1,
    /// The variant is close to what was requested.
    High = 2,
    /// The variant is exactly what was requested.
    Perfect = 3,
}

impl MatchConfidence {
    /// The numeric level, 0 to 3.
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    fn from_level(level: u8) -> MatchConfidence {
        match level {
            0 => MatchConfidence::None,
            1 => MatchConfidence::Low,
            2 => MatchConfidence::High,
            _ => MatchConfidence::Perfect,
        }
    }

    /// Averages two confidences, rounding toward the lower level.
    #[inline]
    pub fn average(a: MatchConfidence, b: MatchConfidence) -> MatchConfidence {
        MatchConfidence::from_level((a.level() + b.level()) / 2)
    }
}

impl Default for MatchConfidence {
    fn default() -> MatchConfidence {
        MatchConfidence::None
    }
}

/// Tunables for variant matching.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchOptions {
    /// The minimum confidence at which a candidate is accepted.
    pub threshold: MatchConfidence,
}

impl Default for MatchOptions {
    fn default() -> MatchOptions {
        MatchOptions {
            threshold: MatchConfidence::Low,
        }
    }
}

impl MatchOptions {
    /// Sets the acceptance threshold and returns these options for method chaining.
    #[inline]
    pub fn threshold(mut self, threshold: MatchConfidence) -> MatchOptions {
        self.threshold = threshold;
        self
    }
}

// Checked in order, so compound keywords come before the words they contain.
const WEIGHT_KEYWORDS: [(&str, Weight); 13] = [
    ("thin", Weight::THIN),
    ("hairline", Weight::THIN),
    ("extralight", Weight::EXTRA_LIGHT),
    ("ultralight", Weight::EXTRA_LIGHT),
    ("semibold", Weight::SEMIBOLD),
    ("demibold", Weight::SEMIBOLD),
    ("extrabold", Weight::EXTRA_BOLD),
    ("ultrabold", Weight::EXTRA_BOLD),
    ("light", Weight::LIGHT),
    ("medium", Weight::MEDIUM),
    ("bold", Weight::BOLD),
    ("heavy", Weight::EXTRA_BOLD),
    ("black", Weight::BLACK),
];

/// Reads the style a variant label denotes.
pub fn guess_style(label: &str) -> Style {
    let label = label.to_lowercase();
    if label.contains("italic") {
        Style::Italic
    } else if label.contains("oblique") {
        Style::Oblique
    } else {
        Style::Normal
    }
}

/// Reads the weight a variant label denotes.
///
/// Leading digits ("300", "700italic") are taken as a numeric weight. Otherwise the label is
/// split into words and weight keywords are looked for among them, so a family name such as
/// "Nothing You Could Do" does not read as thin. A label saying "regular" or "normal" is normal
/// weight whatever else it says, as is a label without any keyword.
pub fn guess_weight(label: &str) -> Weight {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if let Ok(value) = digits.parse::<u16>() {
        return Weight(f32::from(value));
    }
    let words: Vec<String> = label_words(label)
        .into_iter()
        .map(|word| strip_style_suffix(&word).to_owned())
        .collect();
    if words.iter().any(|word| word == "regular" || word == "normal") {
        return Weight::NORMAL;
    }
    // "Extra Light" and "Semi-Bold" are spelled as two words.
    let pairs: Vec<String> = words
        .windows(2)
        .map(|pair| format!("{}{}", pair[0], pair[1]))
        .collect();
    WEIGHT_KEYWORDS
        .iter()
        .find(|&&(keyword, _)| words.iter().chain(pairs.iter()).any(|word| word == keyword))
        .map(|&(_, weight)| weight)
        .unwrap_or(Weight::NORMAL)
}

// Lowercase words of a label, split at separators, digits and lower-to-upper case changes.
fn label_words(label: &str) -> Vec<String> {
    let mut words = vec![];
    let mut word = String::new();
    let mut previous_lower = false;
    for c in label.chars() {
        if !c.is_alphabetic() || (c.is_uppercase() && previous_lower) {
            if !word.is_empty() {
                words.push(word.to_lowercase());
                word.clear();
            }
        }
        if c.is_alphabetic() {
            word.push(c);
        }
        previous_lower = c.is_lowercase();
    }
    if !word.is_empty() {
        words.push(word.to_lowercase());
    }
    words
}

// "lightitalic" reads as "light".
fn strip_style_suffix(word: &str) -> &str {
    for suffix in &["italic", "oblique"] {
        if word.len() > suffix.len() && word.ends_with(suffix) {
            return &word[..word.len() - suffix.len()];
        }
    }
    word
}

/// Scores how well the style of a variant label matches `style`.
pub fn match_style(label: &str, style: Style) -> MatchConfidence {
    match (style, guess_style(label)) {
        (requested, found) if requested == found => MatchConfidence::Perfect,
        (Style::Italic, Style::Oblique) | (Style::Oblique, Style::Italic) => MatchConfidence::High,
        (Style::Italic, Style::Normal) | (Style::Oblique, Style::Normal) => MatchConfidence::Low,
        _ => MatchConfidence::None,
    }
}

/// Scores how well the weight of a variant label matches `weight`.
///
/// The closer the weights, the higher the score: equal is perfect, one step (100) away is high,
/// up to three steps away is low.
pub fn match_weight(label: &str, weight: Weight) -> MatchConfidence {
    let distance = (weight.0 - guess_weight(label).0).abs();
    if distance == 0.0 {
        MatchConfidence::Perfect
    } else if distance <= 100.0 {
        MatchConfidence::High
    } else if distance <= 300.0 {
        MatchConfidence::Low
    } else {
        MatchConfidence::None
    }
}

/// Combines style and weight scores of a variant label into one confidence.
#[inline]
pub fn variant_confidence(label: &str, style: Style, weight: Weight) -> MatchConfidence {
    MatchConfidence::average(match_style(label, style), match_weight(label, weight))
}

// Candidates are ranked by the unrounded sum, so that a rounded-down tie between a near and a
// far variant still goes to the near one.
fn score(label: &str, style: Style, weight: Weight) -> (u8, MatchConfidence) {
    let style_confidence = match_style(label, style);
    let weight_confidence = match_weight(label, weight);
    (
        style_confidence.level() + weight_confidence.level(),
        MatchConfidence::average(style_confidence, weight_confidence),
    )
}

/// Selects the variant that best matches `style` and `weight`.
///
/// The first variant wins ties. Returns `None` only if `variants` is empty.
pub fn select_variant<'a, S>(
    variants: &'a [S],
    style: Style,
    weight: Weight,
) -> Option<(&'a str, MatchConfidence)>
where
    S: AsRef<str>,
{
    let mut best: Option<(&'a str, u8, MatchConfidence)> = None;
    for variant in variants {
        let variant = variant.as_ref();
        let (sum, confidence) = score(variant, style, weight);
        match best {
            Some((_, best_sum, _)) if sum <= best_sum => {}
            _ => best = Some((variant, sum, confidence)),
        }
    }
    best.map(|(variant, _, confidence)| (variant, confidence))
}

/// The outcome of a successful `closest_match`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantMatch<'a> {
    /// The family entry the variant belongs to.
    pub location: &'a FontVariantsLocation,
    /// The winning variant label.
    pub variant: &'a str,
    /// How well the variant matches.
    pub confidence: MatchConfidence,
    /// How many entries were passed over because they are font collections.
    pub skipped_collections: usize,
}

/// Compiles a family-name pattern for case-insensitive containment matching.
pub fn family_pattern(pattern: &str) -> Result<Regex, SelectionError> {
    RegexBuilder::new(pattern.trim())
        .case_insensitive(true)
        .build()
        .map_err(|error| SelectionError::InvalidPattern(error.to_string()))
}

/// Finds the best variant among all families whose name matches `pattern`.
///
/// Families are matched by case-insensitive regular-expression containment. Entries stored in
/// font collections are skipped and counted, as are families without variants. The strictly best
/// variant across all families wins; the first one seen wins ties.
///
/// Fails with `InvalidPattern` if the pattern does not compile, `NotFound` if no family has a
/// candidate variant, and `NoMatch` if the best candidate is below `options.threshold`.
pub fn closest_match<'a>(
    locations: &'a [FontVariantsLocation],
    pattern: &str,
    style: Style,
    weight: Weight,
    options: &MatchOptions,
) -> Result<VariantMatch<'a>, SelectionError> {
    let regex = family_pattern(pattern)?;
    let mut skipped_collections = 0;
    let mut best: Option<(&'a FontVariantsLocation, &'a str, u8, MatchConfidence)> = None;
    for location in locations {
        if FileType::is_collection(&location.path) {
            skipped_collections += 1;
            continue;
        }
        if location.is_empty() || !regex.is_match(&location.family.to_lowercase()) {
            continue;
        }
        for variant in &location.variants {
            let (sum, confidence) = score(variant, style, weight);
            match best {
                Some((_, _, best_sum, _)) if sum <= best_sum => {}
                _ => best = Some((location, variant, sum, confidence)),
            }
        }
    }
    if skipped_collections > 0 {
        info!(
            "skipping {} fonts: font collections not yet supported",
            skipped_collections
        );
    }

    let (location, variant, _, confidence) = best.ok_or(SelectionError::NotFound)?;
    debug!(
        "closest match for {} is {}|{} with confidence {:?}",
        pattern, location.family, variant, confidence
    );
    if confidence < options.threshold {
        return Err(SelectionError::NoMatch {
            family: location.family.clone(),
            confidence,
        });
    }
    Ok(VariantMatch {
        location,
        variant,
        confidence,
        skipped_collections,
    })
}

/// Guesses style and weight from a font file name such as `Gill Sans MT Bold Italic.ttf`.
pub fn guess_style_and_weight(file_name: &str) -> (Style, Weight) {
    let label = file_label(file_name);
    (guess_style(&label), guess_weight(&label))
}

/// Returns true if the font file `file_name` matches `pattern` with at least low confidence for
/// `style` and `weight`.
///
/// An invalid pattern matches nothing.
pub fn matches(file_name: &str, pattern: &str, style: Style, weight: Weight) -> bool {
    let regex = match family_pattern(pattern) {
        Ok(regex) => regex,
        Err(error) => {
            warn!("{}", error);
            return false;
        }
    };
    let label = file_label(file_name).to_lowercase();
    regex.is_match(&label) && variant_confidence(&label, style, weight) >= MatchConfidence::Low
}

// The file name without directories and font extension.
fn file_label(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    file_type::strip_font_extension(base).to_owned()
}
