// font-locate/src/registry.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A memoization cache from normalized font names to resolved fonts.
//!
//! Entries are never evicted or replaced: the first font stored under a name wins. The registry
//! also owns the fallback font, which is loaded at most once.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;

use crate::error::{FontLoadingError, ResolveError};
use crate::font::ScalableFont;
use crate::providers::embedded;
use crate::resolve::Resolution;

type FallbackLoader = dyn Fn() -> Result<ScalableFont, FontLoadingError> + Send + Sync;

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<Registry> = Arc::new(Registry::new());
}

/// The process-wide default registry.
#[inline]
pub fn global() -> Arc<Registry> {
    GLOBAL_REGISTRY.clone()
}

/// Holds the fonts resolved so far, keyed by normalized name.
pub struct Registry {
    fonts: Mutex<HashMap<String, ScalableFont>>,
    fallback: OnceCell<ScalableFont>,
    load_fallback: Box<FallbackLoader>,
}

impl Registry {
    /// Creates an empty registry whose fallback is the packaged default font.
    pub fn new() -> Registry {
        Registry::with_fallback_loader(embedded::default_font)
    }

    /// Creates an empty registry that obtains its fallback font from `load_fallback`.
    pub fn with_fallback_loader<F>(load_fallback: F) -> Registry
    where
        F: Fn() -> Result<ScalableFont, FontLoadingError> + Send + Sync + 'static,
    {
        Registry {
            fonts: Mutex::new(HashMap::new()),
            fallback: OnceCell::new(),
            load_fallback: Box::new(load_fallback),
        }
    }

    /// Returns the font stored under `normalized_name`, if any.
    pub fn lookup(&self, normalized_name: &str) -> Option<ScalableFont> {
        self.lock().get(normalized_name).cloned()
    }

    /// Stores `font` under `normalized_name` unless that name is taken already.
    ///
    /// The null font and fonts without a name or source are refused. Returns true if the font
    /// was inserted.
    pub fn store(&self, normalized_name: &str, font: ScalableFont) -> bool {
        if !font.is_valid() {
            error!("registry cannot store null font as {}", normalized_name);
            return false;
        }
        let mut fonts = self.lock();
        if fonts.contains_key(normalized_name) {
            return false;
        }
        debug!("registry stores font {} as {}", font.name, normalized_name);
        fonts.insert(normalized_name.to_owned(), font);
        true
    }

    /// Returns the fallback font, loading it on first use.
    ///
    /// Concurrent first calls converge on a single load. A failed load is reported and may be
    /// retried by a later call; a successful one is final.
    pub fn fallback(&self) -> Result<ScalableFont, FontLoadingError> {
        self.fallback
            .get_or_try_init(|| {
                let font = (self.load_fallback)()?;
                info!("font registry caches fallback font {}", font.name);
                Ok(font)
            })
            .map(|font| font.clone())
    }

    /// Returns the font stored under `normalized_name`, or the fallback font together with an
    /// error saying the name is missing.
    pub fn resolve_or_fallback(&self, normalized_name: &str) -> Resolution {
        debug!("registry searches for font {}", normalized_name);
        if let Some(font) = self.lookup(normalized_name) {
            info!("registry found font {}", normalized_name);
            return Resolution::found(font);
        }
        info!("registry does not contain font {}", normalized_name);
        self.fallback_for(normalized_name)
    }

    /// The fallback font paired with a `NotFound` error for `normalized_name`.
    pub(crate) fn fallback_for(&self, normalized_name: &str) -> Resolution {
        match self.fallback() {
            Ok(font) => Resolution::degraded(
                font,
                ResolveError::NotFound {
                    key: normalized_name.to_owned(),
                },
            ),
            Err(error) => Resolution::failed(ResolveError::FallbackUnavailable {
                missing: Some(normalized_name.to_owned()),
                reason: error.to_string(),
            }),
        }
    }

    /// The number of cached fonts, not counting the fallback.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no font has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Dumps the cached fonts to the log at info level.
    pub fn log_font_list(&self) {
        let fonts = self.lock();
        info!("--- registered fonts ---");
        let mut names: Vec<_> = fonts.keys().collect();
        names.sort();
        for name in names {
            let font = &fonts[name];
            info!("typeface [{}] = {} @ {:?}", name, font.name, font.path());
        }
        info!("------------------------");
    }

    fn lock(&self) -> MutexGuard<HashMap<String, ScalableFont>> {
        self.fonts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Registry")
            .field("fonts", &self.len())
            .field("fallback", &self.fallback.get().map(|font| &font.name))
            .finish()
    }
}
