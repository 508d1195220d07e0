// font-locate/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `font-locate` can return.

use std::convert::From;
use std::io;

use thiserror::Error;

use crate::cancel::CancelReason;
use crate::matching::MatchConfidence;

/// Reasons why the bytes behind a font could not be read.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The font has no byte source attached, or its path is empty.
    ///
    /// This is what reading the null font yields.
    #[error("no byte source attached to font")]
    NoSource,

    /// The attached source does not contain the given file.
    #[error("no such font file: {0}")]
    NoSuchFile(String),

    /// A disk or similar I/O error occurred while attempting to read the font.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reasons why a provider might fail to locate a font.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum SelectionError {
    /// The family-name pattern is not a valid regular expression.
    #[error("invalid font name pattern: {0}")]
    InvalidPattern(String),

    /// Candidates existed, but none of their variants cleared the confidence threshold.
    #[error("no suitable variant for {family} (confidence={confidence:?})")]
    NoMatch {
        /// The family of the best candidate.
        family: String,
        /// The confidence of the best candidate.
        confidence: MatchConfidence,
    },

    /// No font matching the given query was found.
    #[error("no font found")]
    NotFound,

    /// The source was inaccessible because of an I/O, network or similar error.
    #[error("failed to access source: {0}")]
    CannotAccessSource(String),

    /// The provider observed cancellation and stopped.
    #[error("{0}")]
    Cancelled(CancelReason),
}

impl From<CancelReason> for SelectionError {
    fn from(reason: CancelReason) -> SelectionError {
        SelectionError::Cancelled(reason)
    }
}

/// Reasons why a resolution did not produce the requested font.
///
/// Only `Cancelled`, `DeadlineExceeded` and `FallbackUnavailable` come with the null font. A
/// `NotFound` error always travels together with the fallback font, which is usable.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum ResolveError {
    /// The cancellation token was cancelled explicitly.
    #[error("resolution cancelled")]
    Cancelled,

    /// The cancellation token's deadline passed.
    #[error("resolution deadline exceeded")]
    DeadlineExceeded,

    /// Every provider failed for the normalized name `key`.
    #[error("font not found: {key}")]
    NotFound {
        /// The normalized font name.
        key: String,
    },

    /// The built-in fallback font could not be loaded.
    #[error("{}fallback failed: {reason}", missing_prefix(.missing))]
    FallbackUnavailable {
        /// The normalized name that was being looked up, if any.
        missing: Option<String>,
        /// Why the fallback could not be loaded.
        reason: String,
    },

    /// A single provider's own error. The chain moves past it and hands it to
    /// `ProviderChain::on_failure` hooks; it never ends a resolution.
    #[error("provider failed: {0}")]
    ProviderFailure(#[from] SelectionError),
}

impl ResolveError {
    /// True if this error stems from the cancellation token.
    #[inline]
    pub fn is_cancellation(&self) -> bool {
        matches!(*self, ResolveError::Cancelled | ResolveError::DeadlineExceeded)
    }
}

impl From<CancelReason> for ResolveError {
    fn from(reason: CancelReason) -> ResolveError {
        match reason {
            CancelReason::Cancelled => ResolveError::Cancelled,
            CancelReason::DeadlineExceeded => ResolveError::DeadlineExceeded,
        }
    }
}

fn missing_prefix(missing: &Option<String>) -> String {
    match *missing {
        Some(ref key) => format!("font {} not found; ", key),
        None => String::new(),
    }
}

/// Reasons why a remote transport request failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a status other than 200.
    #[error("request failed with status {0}")]
    Status(u16),

    /// The request could not be performed at all.
    #[error("request failed: {0}")]
    Request(String),
}
