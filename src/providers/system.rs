// font-locate/src/providers/system.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A provider that finds fonts installed on the system.
//!
//! If the user keeps a font list (see `fontlist`) in the application's configuration directory,
//! that list is authoritative. Otherwise the platform font directories are scanned using the
//! WalkDir abstraction from the `walkdir` crate.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use walkdir::WalkDir;

use crate::cancel::CancelToken;
use crate::descriptor::Descriptor;
use crate::error::SelectionError;
use crate::family::FontVariantsLocation;
use crate::file_type::FileType;
use crate::font::ScalableFont;
use crate::handle::FontSource;
use crate::matching::{self, MatchOptions};
use crate::provider::Provider;

const FONT_LIST_DIRECTORY: &str = "fontconfig";
const FONT_LIST_FILE: &str = "fontlist.txt";

/// Where the system provider looks for fonts.
///
/// This object supports a method chaining style for idiomatic initialization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemConfig {
    /// An identifier for the calling application, used to find its configuration directory.
    pub app_key: String,
    /// Overrides the user's configuration directory.
    pub config_dir: Option<PathBuf>,
    /// Overrides the platform font directories that are scanned without a font list.
    pub font_directories: Option<Vec<PathBuf>>,
}

impl SystemConfig {
    /// Creates a configuration for the application `app_key`.
    pub fn new<S>(app_key: S) -> SystemConfig
    where
        S: Into<String>,
    {
        SystemConfig {
            app_key: app_key.into(),
            ..SystemConfig::default()
        }
    }

    /// Sets the configuration directory and returns this configuration for method chaining.
    pub fn config_dir<P>(mut self, config_dir: P) -> SystemConfig
    where
        P: Into<PathBuf>,
    {
        self.config_dir = Some(config_dir.into());
        self
    }

    /// Sets the directories to scan and returns this configuration for method chaining.
    pub fn font_directories(mut self, font_directories: Vec<PathBuf>) -> SystemConfig {
        self.font_directories = Some(font_directories);
        self
    }

    /// The path of the font list: `<config dir>/<app key>/fontconfig/fontlist.txt`.
    pub fn font_list_path(&self) -> Option<PathBuf> {
        if self.app_key.is_empty() {
            return None;
        }
        let base = match self.config_dir {
            Some(ref config_dir) => config_dir.clone(),
            None => dirs_next::config_dir()?,
        };
        Some(
            base.join(&self.app_key)
                .join(FONT_LIST_DIRECTORY)
                .join(FONT_LIST_FILE),
        )
    }
}

/// A provider that finds fonts installed on the system.
///
/// The font list is read, or the font directories scanned, on first use only.
#[allow(missing_debug_implementations)]
pub struct SystemProvider {
    config: SystemConfig,
    font_list: OnceCell<Option<Vec<FontVariantsLocation>>>,
    installed_fonts: OnceCell<Vec<PathBuf>>,
}

impl SystemProvider {
    /// Creates a provider with the given configuration.
    pub fn new(config: SystemConfig) -> SystemProvider {
        SystemProvider {
            config,
            font_list: OnceCell::new(),
            installed_fonts: OnceCell::new(),
        }
    }

    /// The parsed font list, or `None` if the user does not keep one.
    pub fn font_list(&self) -> Option<&[FontVariantsLocation]> {
        self.font_list
            .get_or_init(|| {
                let path = self.config.font_list_path()?;
                match fs::read_to_string(&path) {
                    Ok(list) => {
                        info!("loaded font list {}", path.display());
                        Some(super::fontlist::parse(&list))
                    }
                    Err(error) => {
                        debug!("no font list at {}: {}", path.display(), error);
                        None
                    }
                }
            })
            .as_deref()
    }

    /// The font files found in the font directories.
    pub fn installed_fonts(&self) -> &[PathBuf] {
        self.installed_fonts.get_or_init(|| {
            let directories = match self.config.font_directories {
                Some(ref directories) => directories.clone(),
                None => default_font_directories(),
            };
            let mut fonts = vec![];
            for directory in &directories {
                fonts.extend(discover_fonts(directory));
            }
            info!("found {} installed font files", fonts.len());
            fonts
        })
    }

    /// Searches for an installed font variant.
    pub fn find(&self, descriptor: &Descriptor) -> Result<ScalableFont, SelectionError> {
        if let Some(list) = self.font_list() {
            // The list is authoritative: no scan if it has no match.
            let found = matching::closest_match(
                list,
                &descriptor.pattern,
                descriptor.style,
                descriptor.weight,
                &MatchOptions::default(),
            )?;
            debug!(
                "{} is a listed system font: {}",
                descriptor.pattern, found.location.path
            );
            return font_at(
                &found.location.family,
                Path::new(&found.location.path),
                descriptor,
            );
        }

        matching::family_pattern(&descriptor.pattern)?;
        let candidates: Vec<&str> = self
            .installed_fonts()
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .filter(|file_name| {
                matching::matches(
                    file_name,
                    &descriptor.pattern,
                    descriptor.style,
                    descriptor.weight,
                )
            })
            .collect();
        let (file_name, _) =
            matching::select_variant(&candidates, descriptor.style, descriptor.weight)
                .ok_or(SelectionError::NotFound)?;
        let path = self
            .installed_fonts()
            .iter()
            .find(|path| path.file_name().and_then(|name| name.to_str()) == Some(file_name))
            .ok_or(SelectionError::NotFound)?;
        debug!("{} is a system font: {}", descriptor.pattern, path.display());
        font_at(&descriptor.pattern, path, descriptor)
    }
}

impl Provider for SystemProvider {
    fn locate(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        // Scanning may take a while; don't start it for a cancelled request.
        if let Some(reason) = cancel.reason() {
            return Err(SelectionError::Cancelled(reason));
        }
        self.find(descriptor)
    }
}

fn font_at(
    name: &str,
    path: &Path,
    descriptor: &Descriptor,
) -> Result<ScalableFont, SelectionError> {
    let path_error =
        || SelectionError::CannotAccessSource(format!("path error with {}", path.display()));
    let directory = path.parent().ok_or_else(path_error)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(path_error)?;
    Ok(ScalableFont::new(
        name,
        descriptor.style,
        descriptor.weight,
        FontSource::from_directory(directory),
        file_name,
    ))
}

fn discover_fonts(path: &Path) -> Vec<PathBuf> {
    let mut fonts = vec![];
    let mut collections = 0;
    for directory_entry in WalkDir::new(path).into_iter() {
        let directory_entry = match directory_entry {
            Ok(directory_entry) => directory_entry,
            Err(_) => continue,
        };
        if !directory_entry.file_type().is_file() {
            continue;
        }
        let path = directory_entry.path();
        match FileType::from_path(path) {
            Some(FileType::Single) => fonts.push(path.to_owned()),
            Some(FileType::Collection) => collections += 1,
            None => {}
        }
    }
    if collections > 0 {
        info!(
            "skipping {} fonts in {}: font collections not yet supported",
            collections,
            path.display()
        );
    }
    fonts
}

#[cfg(target_os = "android")]
fn default_font_directories() -> Vec<PathBuf> {
    vec![PathBuf::from("/system/fonts")]
}

#[cfg(target_family = "windows")]
fn default_font_directories() -> Vec<PathBuf> {
    let mut directories = vec![];
    if let Some(windows) = std::env::var_os("WINDIR") {
        directories.push(PathBuf::from(windows).join("Fonts"));
    }
    if let Some(mut path) = dirs_next::data_local_dir() {
        path.push("Microsoft");
        path.push("Windows");
        path.push("Fonts");
        directories.push(path);
    }
    directories
}

#[cfg(target_os = "macos")]
fn default_font_directories() -> Vec<PathBuf> {
    let mut directories = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/Network/Library/Fonts"),
    ];
    if let Some(mut path) = dirs_next::home_dir() {
        path.push("Library");
        path.push("Fonts");
        directories.push(path);
    }
    directories
}

#[cfg(not(any(target_os = "android", target_family = "windows", target_os = "macos")))]
fn default_font_directories() -> Vec<PathBuf> {
    let mut directories = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/var/run/host/usr/share/fonts"), // Flatpak specific
        PathBuf::from("/var/run/host/usr/local/share/fonts"),
    ];
    if let Some(path) = dirs_next::home_dir() {
        directories.push(path.join(".fonts")); // ~/.fonts is deprecated
        directories.push(path.join("local").join("share").join("fonts")); // Flatpak specific
    }
    if let Some(mut path) = dirs_next::data_dir() {
        path.push("fonts");
        directories.push(path);
    }
    directories
}
