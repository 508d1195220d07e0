// font-locate/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `font-locate` finds a font file for a family-name pattern, a style and a weight.
//!
//! Requests are resolved against a registry of fonts found earlier and, on a miss, against a
//! chain of providers: fonts packaged with this crate, fonts installed on the system, and fonts
//! from a remote web-font directory. Resolution runs in the background and can be cancelled or
//! given a deadline. If no provider finds a font, the packaged fallback font is used.
//!
//! ```no_run
//! use font_locate::{resolve_font_loc, Descriptor, EmbeddedProvider, ProviderChain, Weight};
//!
//! let chain = ProviderChain::new().with(EmbeddedProvider::new());
//! let promise = resolve_font_loc(Descriptor::new("DejaVuSansMono").weight(Weight::BOLD), chain);
//! let resolution = promise.wait();
//! println!("{} ({:?})", resolution.font.name, resolution.error);
//! ```

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod cancel;
pub mod chain;
pub mod descriptor;
pub mod error;
pub mod family;
pub mod file_type;
pub mod font;
pub mod handle;
pub mod matching;
pub mod properties;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod resolve;


pub use crate::cancel::{CancelReason, CancelToken};
pub use crate::chain::ProviderChain;
pub use crate::descriptor::{normalize_font_name, Descriptor};
pub use crate::error::{ResolveError, SelectionError};
pub use crate::font::ScalableFont;
pub use crate::matching::MatchConfidence;
pub use crate::properties::{Style, Weight};
pub use crate::provider::Provider;
pub use crate::providers::{EmbeddedProvider, RemoteProvider, SystemProvider};
pub use crate::registry::Registry;
pub use crate::resolve::{
    resolve_font_loc, resolve_font_loc_with_cancel, FontPromise, Resolution, Resolver,
};
