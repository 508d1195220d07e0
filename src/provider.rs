// font-locate/src/provider.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The interface every font backend implements to take part in resolution.

use crate::cancel::CancelToken;
use crate::descriptor::Descriptor;
use crate::error::SelectionError;
use crate::font::ScalableFont;

/// A backend that can attempt to satisfy a font request.
///
/// Any function or closure of the shape `Fn(&CancelToken, &Descriptor) -> Result<ScalableFont,
/// SelectionError>` is a provider. Providers may block; they run on the resolution's background
/// thread, never the caller's.
pub trait Provider: Send + Sync {
    /// Tries to locate a font for `descriptor`.
    ///
    /// Cancellation-aware providers should poll `cancel` during long operations and return
    /// `SelectionError::Cancelled` when it fires. Others may ignore it.
    fn locate(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError>;
}

impl<F> Provider for F
where
    F: Fn(&CancelToken, &Descriptor) -> Result<ScalableFont, SelectionError> + Send + Sync,
{
    #[inline]
    fn locate(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        self(cancel, descriptor)
    }
}

/// Adapts a provider function that knows nothing about cancellation.
///
/// Once started, the function runs to completion; the chain only avoids starting the next
/// provider after cancellation.
pub fn ignore_cancel<F>(locate: F) -> impl Provider
where
    F: Fn(&Descriptor) -> Result<ScalableFont, SelectionError> + Send + Sync,
{
    move |_: &CancelToken, descriptor: &Descriptor| locate(descriptor)
}
