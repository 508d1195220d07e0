// font-locate/src/chain.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A provider that encapsulates multiple providers and queries them in order.
//!
//! This is how an application ranks its font backends: e.g. fonts packaged with the binary
//! first, then the installed system fonts, then a remote font directory.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::descriptor::Descriptor;
use crate::error::{ResolveError, SelectionError};
use crate::font::ScalableFont;
use crate::provider::Provider;

/// An ordered list of providers, tried one after another until one succeeds.
#[derive(Clone, Default)]
#[allow(missing_debug_implementations)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn Provider>>,
    on_failure: Option<Arc<FailureHook>>,
}

/// Called with the provider's position in the chain and its error.
pub type FailureHook = dyn Fn(usize, &ResolveError) + Send + Sync;

impl ProviderChain {
    /// Creates an empty chain. Locating a font with it always fails with `NotFound`.
    #[inline]
    pub fn new() -> ProviderChain {
        ProviderChain::default()
    }

    /// Creates a chain that queries `providers` in the given order.
    pub fn from_providers(providers: Vec<Arc<dyn Provider>>) -> ProviderChain {
        ProviderChain {
            providers,
            on_failure: None,
        }
    }

    /// Sets a hook that sees every provider failure the chain moves past, and returns this chain
    /// for method chaining.
    ///
    /// Providers that panic are reported too. Cancellation is not a provider failure and is
    /// never reported.
    pub fn on_failure<F>(mut self, hook: F) -> ProviderChain
    where
        F: Fn(usize, &ResolveError) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(hook));
        self
    }

    /// Appends a provider and returns this chain for method chaining.
    pub fn with<P>(mut self, provider: P) -> ProviderChain
    where
        P: Provider + 'static,
    {
        self.push(provider);
        self
    }

    /// Appends a provider.
    pub fn push<P>(&mut self, provider: P)
    where
        P: Provider + 'static,
    {
        self.providers.push(Arc::new(provider))
    }

    /// Appends a shared provider.
    pub fn push_shared(&mut self, provider: Arc<dyn Provider>) {
        self.providers.push(provider)
    }

    /// The number of providers in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if and only if this chain has no providers in it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Queries the providers in order and returns the first font found.
    ///
    /// The token is checked before each provider is started. A failing provider does not stop
    /// the chain, but if the token fired in the meantime its reason is reported instead of the
    /// provider's error. A provider that panics counts as failed.
    pub fn locate(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        for (index, provider) in self.providers.iter().enumerate() {
            if let Some(reason) = cancel.reason() {
                return Err(SelectionError::Cancelled(reason));
            }
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                provider.locate(cancel, descriptor)
            }));
            match result {
                Ok(Ok(ref font)) if font.is_valid() => {
                    debug!(
                        "provider {} located {} for {}",
                        index, font.name, descriptor.pattern
                    );
                    return Ok(font.clone());
                }
                Ok(Ok(_)) => {
                    warn!(
                        "provider {} returned an incomplete font for {}",
                        index, descriptor.pattern
                    );
                }
                Ok(Err(error)) => {
                    if let Some(reason) = cancel.reason() {
                        return Err(SelectionError::Cancelled(reason));
                    }
                    self.report(index, descriptor, ResolveError::ProviderFailure(error));
                }
                Err(_) => {
                    error!("provider {} panicked for {}", index, descriptor.pattern);
                    let error = SelectionError::CannotAccessSource("provider panicked".to_owned());
                    self.report(index, descriptor, ResolveError::ProviderFailure(error));
                }
            }
        }
        if let Some(reason) = cancel.reason() {
            return Err(SelectionError::Cancelled(reason));
        }
        Err(SelectionError::NotFound)
    }

    fn report(&self, index: usize, descriptor: &Descriptor, error: ResolveError) {
        debug!("provider {} for {}: {}", index, descriptor.pattern, error);
        if let Some(ref hook) = self.on_failure {
            hook(index, &error);
        }
    }
}

impl Provider for ProviderChain {
    #[inline]
    fn locate(
        &self,
        cancel: &CancelToken,
        descriptor: &Descriptor,
    ) -> Result<ScalableFont, SelectionError> {
        ProviderChain::locate(self, cancel, descriptor)
    }
}
