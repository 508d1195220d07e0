// font-locate/src/providers/remote.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A provider that looks fonts up in a remote web-font directory.
//!
//! The directory is the JSON listing of the Google Fonts developer API
//! (https://developers.google.com/fonts/docs/developer_api), which requires an API key. It is
//! fetched once per provider. Font files are downloaded into the user's cache directory and
//! reused from there on later runs.
//!
//! Requests go through a `Transport`. With the `http` feature, the default one is
//! `HttpTransport`; applications can plug in their own client instead.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::cancel::CancelToken;
use crate::descriptor::Descriptor;
use crate::error::{SelectionError, TransportError};
use crate::family::FontVariantsLocation;
use crate::font::ScalableFont;
use crate::handle::FontSource;
use crate::matching::{self, MatchConfidence, MatchOptions};
use crate::provider::Provider;

use super::cache;

/// The default endpoint of the directory listing.
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/webfonts/v1/webfonts?";

/// The environment variable consulted for the API key.
pub const API_KEY_VARIABLE: &str = "GOOGLE_FONTS_API_KEY";

/// Performs HTTP GET requests on behalf of the remote provider.
///
/// Any function or closure of the shape `Fn(&str) -> Result<Vec<u8>, TransportError>` is a
/// transport.
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the response body. Statuses other than 200 are errors.
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<Vec<u8>, TransportError> + Send + Sync,
{
    #[inline]
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self(url)
    }
}

/// Configuration of the remote provider.
///
/// This object supports a method chaining style for idiomatic initialization.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    /// An identifier for the calling application, used to name its cache directory.
    pub app_key: String,
    /// The key for the directory API.
    pub api_key: Option<String>,
    /// Overrides the cache directory. Downloads go into `<cache dir>/<initial>/`.
    pub cache_dir: Option<PathBuf>,
    /// The endpoint of the directory listing, ending in `?`.
    pub api_url: String,
}

impl RemoteConfig {
    /// Creates a configuration for the application `app_key`, without an API key.
    pub fn new<S>(app_key: S) -> RemoteConfig
    where
        S: Into<String>,
    {
        RemoteConfig {
            app_key: app_key.into(),
            api_key: None,
            cache_dir: None,
            api_url: DEFAULT_API_URL.to_owned(),
        }
    }

    /// Creates a configuration for `app_key` taking the API key from the environment.
    pub fn from_env<S>(app_key: S) -> RemoteConfig
    where
        S: Into<String>,
    {
        let mut config = RemoteConfig::new(app_key);
        config.api_key = env::var(API_KEY_VARIABLE)
            .ok()
            .filter(|key| !key.is_empty());
        config
    }

    /// Sets the API key and returns this configuration for method chaining.
    pub fn api_key<S>(mut self, api_key: S) -> RemoteConfig
    where
        S: Into<String>,
    {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the cache directory and returns this configuration for method chaining.
    pub fn cache_dir<P>(mut self, cache_dir: P) -> RemoteConfig
    where
        P: Into<PathBuf>,
    {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Sets the directory endpoint and returns this configuration for method chaining.
    pub fn api_url<S>(mut self, api_url: S) -> RemoteConfig
    where
        S: Into<String>,
    {
        self.api_url = api_url.into();
        self
    }

    fn directory_url(&self) -> Result<String, SelectionError> {
        match self.api_key {
            Some(ref api_key) if !api_key.is_empty() => {
                Ok(format!("{}sort=alpha&key={}", self.api_url, api_key))
            }
            _ => {
                error!("remote font directory API key not set");
                Err(SelectionError::CannotAccessSource(format!(
                    "API key must be configured or set as {} in the environment",
                    API_KEY_VARIABLE
                )))
            }
        }
    }
}

/// A font family entry of the remote directory.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RemoteFontInfo {
    /// Family name and variant labels.
    #[serde(flatten)]
    pub location: FontVariantsLocation,
    /// The version of the family.
    #[serde(default)]
    pub version: String,
    /// The scripts the family covers.
    #[serde(default)]
    pub subsets: Vec<String>,
    /// Download URLs, keyed by variant label.
    #[serde(default)]
    pub files: HashMap<String, String>,
}

#[derive(Deserialize)]
struct RemoteDirectory {
    #[serde(default)]
    items: Vec<RemoteFontInfo>,
}

/// Decodes a directory listing.
pub fn parse_directory(json: &[u8]) -> Result<Vec<RemoteFontInfo>, SelectionError> {
    let directory: RemoteDirectory = serde_json::from_slice(json).map_err(|error| {
        SelectionError::CannotAccessSource(format!("could not decode font directory: {}", error))
    })?;
    Ok(directory.items)
}

/// A provider that looks fonts up in a remote web-font directory.
#[allow(missing_debug_implementations)]
pub struct RemoteProvider {
    config: RemoteConfig,
    transport: Box<dyn Transport>,
    directory: OnceCell<Result<Vec<RemoteFontInfo>, SelectionError>>,
}

impl RemoteProvider {
    /// Creates a provider that talks to the directory through `transport`.
    pub fn new<T>(config: RemoteConfig, transport: T) -> RemoteProvider
    where
        T: Transport + 'static,
    {
        RemoteProvider {
            config,
            transport: Box::new(transport),
            directory: OnceCell::new(),
        }
    }

    /// Creates a provider for `app_key` that takes its API key from the environment and fetches
    /// over HTTPS.
    #[cfg(feature = "http")]
    pub fn from_env<S>(app_key: S) -> RemoteProvider
    where
        S: Into<String>,
    {
        RemoteProvider::over_http(RemoteConfig::from_env(app_key))
    }

    /// Creates a provider that fetches over HTTPS.
    #[cfg(feature = "http")]
    #[inline]
    pub fn over_http(config: RemoteConfig) -> RemoteProvider {
        RemoteProvider::new(config, super::http::HttpTransport::new())
    }

    /// The configuration of this provider.
    #[inline]
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// The directory listing, fetched on first use.
    ///
    /// A failed fetch is remembered: the directory is requested at most once per provider.
    pub fn directory(&self) -> Result<&[RemoteFontInfo], SelectionError> {
        self.directory
            .get_or_init(|| {
                info!("setting up remote font directory");
                let url = self.config.directory_url()?;
                let body = self.transport.get(&url).map_err(|error| {
                    error!("remote font directory request failed: {}", error);
                    SelectionError::CannotAccessSource(
                        "could not get font directory from remote service".to_owned(),
                    )
                })?;
                let items = parse_directory(&body)?;
                info!("transferred list of {} fonts from remote directory", items.len());
                Ok(items)
            })
            .as_ref()
            .map(|items| &items[..])
            .map_err(|error| error.clone())
    }

    /// Finds the first family matching `descriptor` and its best variant.
    ///
    /// Fails with `NotFound` if no family name matches, and with `NoMatch` if the best variant of
    /// every matching family is below low confidence.
    pub fn match_font_info(
        &self,
        descriptor: &Descriptor,
    ) -> Result<(&RemoteFontInfo, &str), SelectionError> {
        let directory = self.directory()?;
        let regex = matching::family_pattern(&descriptor.pattern)?;
        let threshold = MatchOptions::default().threshold;
        let mut rejected: Option<(&str, MatchConfidence)> = None;
        for info in directory {
            if !regex.is_match(&info.location.family.to_lowercase()) {
                continue;
            }
            debug!("remote font name matches pattern: {}", info.location.family);
            let selected =
                matching::select_variant(&info.location.variants, descriptor.style, descriptor.weight);
            match selected {
                Some((variant, confidence)) if confidence >= threshold => {
                    return Ok((info, variant));
                }
                Some((_, confidence)) => {
                    if rejected.map_or(true, |(_, best)| confidence > best) {
                        rejected = Some((&info.location.family, confidence));
                    }
                }
                None => {}
            }
        }
        match rejected {
            Some((family, confidence)) => Err(SelectionError::NoMatch {
                family: family.to_owned(),
                confidence,
            }),
            None => Err(SelectionError::NotFound),
        }
    }

    /// Searches the directory for `descriptor` and caches the font file.
    pub fn find(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        let (info, variant) = self.match_font_info(descriptor)?;
        if let Some(reason) = cancel.reason() {
            return Err(SelectionError::Cancelled(reason));
        }
        let (directory, name) = cache::cache_remote_font(&self.config, &*self.transport, info, variant)?;
        Ok(ScalableFont::new(
            name.clone(),
            descriptor.style,
            descriptor.weight,
            FontSource::from_directory(directory),
            name,
        ))
    }

    /// Dumps the directory entries whose family matches `pattern` to the log at info level.
    pub fn log_font_list(&self, pattern: &str) {
        let directory = match self.directory() {
            Ok(directory) => directory,
            Err(error) => {
                error!("unable to list remote fonts: {}", error);
                return;
            }
        };
        let regex = match matching::family_pattern(pattern) {
            Ok(regex) => regex,
            Err(error) => {
                error!("cannot list remote fonts: {}", error);
                return;
            }
        };
        info!("{} fonts in remote font directory", directory.len());
        for (index, info) in directory.iter().enumerate() {
            if regex.is_match(&info.location.family.to_lowercase()) {
                info!("[{:4}] {:<20}: {}", index, info.location.family, info.version);
                info!("       subsets: {:?}", info.subsets);
                info!("       variants: {:?}", info.location.variants);
            }
        }
    }
}

impl Provider for RemoteProvider {
    #[inline]
    fn locate(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        self.find(cancel, descriptor)
    }
}
