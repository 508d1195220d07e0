// font-locate/src/providers/mod.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Concrete providers that can be put into a `ProviderChain`.
//!
//! The embedded provider serves the fonts packaged with this crate and supplies the fallback
//! font. The system provider finds installed fonts, either through a font list prepared by the
//! user or by scanning the platform font directories. The remote provider looks fonts up in a
//! web-font directory and caches the downloaded files on disk. It fetches over HTTPS with
//! `HttpTransport` unless the `http` feature is turned off, in which case the application supplies
//! its own `Transport`.

pub mod cache;
pub mod embedded;
pub mod fontlist;
#[cfg(feature = "http")]
pub mod http;
pub mod remote;
pub mod system;

pub use self::embedded::EmbeddedProvider;
#[cfg(feature = "http")]
pub use self::http::HttpTransport;
pub use self::remote::{RemoteConfig, RemoteProvider, Transport};
pub use self::system::{SystemConfig, SystemProvider};
