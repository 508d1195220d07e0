// font-locate/src/resolve.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolves font requests against the registry and a chain of providers.
//!
//! Resolution runs on a background thread per request and hands back a `FontPromise`. The
//! promise is waited on with a cancellation token; whichever comes first, the result or the
//! token firing, decides what the caller sees.
//!
//! A resolution in which no provider finds the font is not a failure: it yields the fallback
//! font together with a `NotFound` error. Only cancellation and an unavailable fallback produce
//! the null font.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Instant;

use crate::cancel::CancelToken;
use crate::chain::ProviderChain;
use crate::descriptor::Descriptor;
use crate::error::{ResolveError, SelectionError};
use crate::font::ScalableFont;
use crate::registry::{self, Registry};

/// The outcome of a resolution: a font and, possibly, an error.
///
/// A non-null font with an error is degraded but usable, e.g. the fallback font after a failed
/// lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The resolved font, the fallback font, or the null font.
    pub font: ScalableFont,
    /// What went wrong, if anything.
    pub error: Option<ResolveError>,
}

impl Resolution {
    pub(crate) fn found(font: ScalableFont) -> Resolution {
        Resolution { font, error: None }
    }

    pub(crate) fn degraded(font: ScalableFont, error: ResolveError) -> Resolution {
        Resolution {
            font,
            error: Some(error),
        }
    }

    pub(crate) fn failed(error: ResolveError) -> Resolution {
        Resolution {
            font: ScalableFont::null(),
            error: Some(error),
        }
    }

    /// Returns true if a usable font came with an error.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.error.is_some() && !self.font.is_null()
    }

    /// Returns the font if the resolution had no error at all.
    pub fn into_result(self) -> Result<ScalableFont, ResolveError> {
        match self.error {
            None => Ok(self.font),
            Some(error) => Err(error),
        }
    }

    /// Splits the resolution into its font and error.
    #[inline]
    pub fn into_parts(self) -> (ScalableFont, Option<ResolveError>) {
        (self.font, self.error)
    }
}

/// Resolves font requests using a registry and a provider chain.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct Resolver {
    registry: Arc<Registry>,
    chain: ProviderChain,
}

impl Resolver {
    /// Creates a resolver that caches into the process-wide registry.
    pub fn new(chain: ProviderChain) -> Resolver {
        Resolver::with_registry(registry::global(), chain)
    }

    /// Creates a resolver that caches into `registry`.
    pub fn with_registry(registry: Arc<Registry>, chain: ProviderChain) -> Resolver {
        Resolver { registry, chain }
    }

    /// The registry this resolver caches into.
    #[inline]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The providers this resolver queries on a cache miss.
    #[inline]
    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Resolves `descriptor` on the calling thread.
    ///
    /// A token that has fired already stops resolution before even the registry is consulted.
    /// A registry hit is returned without asking any provider. On a miss the providers are
    /// queried in order; the first font found is stored in the registry before it is returned.
    /// If no provider finds anything, the fallback font is returned with a `NotFound` error.
    pub fn search(&self, cancel: &CancelToken, descriptor: &Descriptor) -> Resolution {
        if let Some(reason) = cancel.reason() {
            return Resolution::failed(reason.into());
        }
        let name = descriptor.normalized_name();
        if let Some(font) = self.registry.lookup(&name) {
            debug!("registry hit for {}", name);
            return Resolution::found(font);
        }
        match self.chain.locate(cancel, descriptor) {
            Ok(font) => {
                self.registry.store(&name, font.clone());
                // Another resolution of the same name may have stored its font first.
                let font = self.registry.lookup(&name).unwrap_or(font);
                Resolution::found(font)
            }
            Err(SelectionError::Cancelled(reason)) => Resolution::failed(reason.into()),
            Err(error) => {
                info!("no provider located {}: {}", name, error);
                self.registry.fallback_for(&name)
            }
        }
    }

    /// Starts resolving `descriptor` in the background, without a way to cancel it.
    #[inline]
    pub fn start(&self, descriptor: Descriptor) -> FontPromise {
        self.start_with_cancel(CancelToken::never(), descriptor)
    }

    /// Starts resolving `descriptor` in the background. `cancel` is checked before the registry
    /// lookup and before each provider.
    pub fn start_with_cancel(&self, cancel: CancelToken, descriptor: Descriptor) -> FontPromise {
        let settlement = Arc::new(Settlement::default());
        let task = {
            let resolver = self.clone();
            let cancel = cancel.clone();
            let descriptor = descriptor.clone();
            let settlement = settlement.clone();
            move || settlement.publish(resolver.search(&cancel, &descriptor))
        };
        let spawned = thread::Builder::new()
            .name("font-resolve".to_owned())
            .spawn(task);
        if let Err(error) = spawned {
            warn!("cannot spawn resolution thread, resolving inline: {}", error);
            settlement.publish(self.search(&cancel, &descriptor));
        }
        FontPromise { settlement }
    }
}

/// Resolves `descriptor` in the background against the process-wide registry.
///
/// Fonts are searched in the order of `chain`. If none of them is found, the fallback font is
/// returned with an error.
#[inline]
pub fn resolve_font_loc(descriptor: Descriptor, chain: ProviderChain) -> FontPromise {
    Resolver::new(chain).start(descriptor)
}

/// Like `resolve_font_loc`, with a cancellation token for the background resolution.
#[inline]
pub fn resolve_font_loc_with_cancel(
    cancel: CancelToken,
    descriptor: Descriptor,
    chain: ProviderChain,
) -> FontPromise {
    Resolver::new(chain).start_with_cancel(cancel, descriptor)
}

#[derive(Default)]
struct Settlement {
    slot: Mutex<Option<Resolution>>,
    ready: Condvar,
}

impl Settlement {
    fn publish(&self, resolution: Resolution) {
        *self.lock() = Some(resolution);
        self.ready.notify_all();
    }

    fn wake(&self) {
        let _slot = self.lock();
        self.ready.notify_all();
    }

    fn lock(&self) -> MutexGuard<Option<Resolution>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A handle to a resolution running in the background.
///
/// Once published, the result is kept: waiting again returns it right away. Any number of
/// threads may wait on the same promise, each with its own token.
#[allow(missing_debug_implementations)]
pub struct FontPromise {
    settlement: Arc<Settlement>,
}

impl FontPromise {
    /// Blocks until the resolution completes.
    #[inline]
    pub fn wait(&self) -> Resolution {
        self.wait_with(&CancelToken::never())
    }

    /// Blocks until the resolution completes or `cancel` fires, whichever comes first.
    ///
    /// If `cancel` fires first, the null font is returned with the token's reason. A token that
    /// has fired already always gives that outcome, even if the result is in; the result is not
    /// lost and a later wait with another token returns it.
    pub fn wait_with(&self, cancel: &CancelToken) -> Resolution {
        if let Some(reason) = cancel.reason() {
            return Resolution::failed(reason.into());
        }
        // Registered before taking the slot lock: an already cancelled token runs the callback
        // inline, and the callback takes that lock.
        let _registration = {
            let settlement = self.settlement.clone();
            cancel.on_cancel(move || settlement.wake())
        };
        let mut slot = self.settlement.lock();
        loop {
            if let Some(ref resolution) = *slot {
                return resolution.clone();
            }
            if let Some(reason) = cancel.reason() {
                return Resolution::failed(reason.into());
            }
            slot = match cancel.deadline() {
                Some(deadline) => {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    self.settlement
                        .ready
                        .wait_timeout(slot, timeout)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self
                    .settlement
                    .ready
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        }
    }

    /// Returns the result if the resolution has completed, without blocking.
    pub fn try_result(&self) -> Option<Resolution> {
        self.settlement.lock().clone()
    }
}
