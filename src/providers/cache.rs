// font-locate/src/providers/cache.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Keeps downloaded font files in the user's cache directory.
//!
//! Files are grouped into sub-folders by the upper-cased initial of their family, e.g.
//! `~/.cache/<app>/fonts/I/Inconsolata-regular.ttf`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SelectionError;

use super::remote::{RemoteConfig, RemoteFontInfo, Transport};

/// Returns the cache folder `subfolder`, creating it if necessary.
///
/// The folder lives below `config.cache_dir` if that is set, and below
/// `<user cache dir>/<app key>/fonts` otherwise.
pub fn cache_font_dir(config: &RemoteConfig, subfolder: &str) -> Result<PathBuf, SelectionError> {
    let directory = match config.cache_dir {
        Some(ref cache_dir) => cache_dir.join(subfolder),
        None => {
            if config.app_key.is_empty() {
                return Err(SelectionError::CannotAccessSource(
                    "application key must be configured to locate the font cache".to_owned(),
                ));
            }
            let base = dirs_next::cache_dir().ok_or_else(|| {
                SelectionError::CannotAccessSource("no user cache directory".to_owned())
            })?;
            base.join(&config.app_key).join("fonts").join(subfolder)
        }
    };
    debug!("caching resource in {}", directory.display());
    fs::create_dir_all(&directory).map_err(|error| {
        SelectionError::CannotAccessSource(format!(
            "cannot create cache directory {}: {}",
            directory.display(),
            error
        ))
    })?;
    Ok(directory)
}

/// Makes sure `variant` of the family `info` is in the cache.
///
/// Returns the cache folder and the file name within it. A file that is present already is
/// reused without contacting the server.
pub fn cache_remote_font(
    config: &RemoteConfig,
    transport: &dyn Transport,
    info: &RemoteFontInfo,
    variant: &str,
) -> Result<(PathBuf, String), SelectionError> {
    let family = &info.location.family;
    let url = info
        .location
        .variants
        .iter()
        .find(|&known| known == variant)
        .and_then(|known| info.files.get(known))
        .ok_or_else(|| {
            SelectionError::CannotAccessSource(format!(
                "no variant equals {}, cannot cache {}",
                variant, family
            ))
        })?;
    // Family and variant come from the server and must not leave the cache folder.
    let safe_family = path_safe(family);
    let initial = safe_family
        .chars()
        .next()
        .ok_or_else(|| SelectionError::CannotAccessSource("empty family name".to_owned()))?;
    let directory = cache_font_dir(config, &initial.to_uppercase().to_string())?;

    let extension = url_extension(url);
    let name = match extension.get(1..) {
        Some(suffix) if !suffix.is_empty() => {
            format!("{}-{}.{}", safe_family, path_safe(variant), path_safe(suffix))
        }
        _ => format!("{}-{}", safe_family, path_safe(variant)),
    };
    let path = directory.join(&name);
    if path.is_file() {
        info!("font already cached: {}", path.display());
    } else {
        info!("caching font {} as {}", family, path.display());
        download(transport, url, &path)?;
    }
    Ok((directory, name))
}

// Writes to a temporary file first so that an interrupted download never looks cached.
fn download(transport: &dyn Transport, url: &str, path: &Path) -> Result<(), SelectionError> {
    let bytes = transport.get(url).map_err(|error| {
        SelectionError::CannotAccessSource(format!("could not download {}: {}", url, error))
    })?;
    let partial = path.with_extension("part");
    let io_error = |error: std::io::Error| {
        SelectionError::CannotAccessSource(format!("cannot write {}: {}", path.display(), error))
    };
    fs::write(&partial, &bytes).map_err(io_error)?;
    fs::rename(&partial, path).map_err(io_error)?;
    debug!("downloaded {} bytes from {}", bytes.len(), url);
    Ok(())
}

/// Replaces everything but letters, digits, spaces, `-` and `+` with `_`, so that the result is
/// a single path component that is neither `.` nor `..`.
pub fn path_safe(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '+' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// The extension of the last path segment of `url`, including the dot, or nothing.
pub(crate) fn url_extension(url: &str) -> &str {
    let path = url.split(|c| c == '?' || c == '#').next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[dot..],
        _ => "",
    }
}

