// font-locate/src/cancel.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Cooperative cancellation for font resolution.
//!
//! A `CancelToken` is checked at well-defined points: before the cache lookup, before each
//! provider, and while a caller waits on a promise. Work that has already started is never torn
//! down; a slow provider runs to completion once invoked.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Why a token fired.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CancelReason {
    /// `CancelToken::cancel()` was called.
    Cancelled,
    /// The token's deadline passed.
    DeadlineExceeded,
}

impl Display for CancelReason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            CancelReason::Cancelled => f.write_str("cancelled"),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// A cancellation signal shared between the caller and a background resolution.
///
/// Clones share their state: cancelling one clone cancels all of them.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<State>,
    condvar: Condvar,
    deadline: Option<Instant>,
    cancellable: bool,
}

#[derive(Default)]
struct State {
    cancelled: bool,
    next_waiter: u64,
    waiters: Vec<(u64, Box<dyn Fn() + Send>)>,
}

impl CancelToken {
    /// Creates a token that fires only when `cancel()` is called.
    pub fn new() -> CancelToken {
        CancelToken::build(None, true)
    }

    /// Creates a token that never fires. Calling `cancel()` on it has no effect.
    pub fn never() -> CancelToken {
        CancelToken::build(None, false)
    }

    /// Creates a token that fires at `deadline`, or earlier if cancelled.
    pub fn with_deadline(deadline: Instant) -> CancelToken {
        CancelToken::build(Some(deadline), true)
    }

    /// Creates a token that fires once `timeout` has elapsed, or earlier if cancelled.
    pub fn with_timeout(timeout: Duration) -> CancelToken {
        CancelToken::with_deadline(Instant::now() + timeout)
    }

    fn build(deadline: Option<Instant>, cancellable: bool) -> CancelToken {
        CancelToken {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                condvar: Condvar::new(),
                deadline,
                cancellable,
            }),
        }
    }

    /// Cancels the token and wakes everybody waiting on it.
    pub fn cancel(&self) {
        if !self.inner.cancellable {
            return;
        }
        let waiters = {
            let mut state = self.lock();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            std::mem::replace(&mut state.waiters, vec![])
        };
        self.inner.condvar.notify_all();
        for (_, wake) in waiters {
            wake();
        }
    }

    /// Returns why the token fired, or `None` if it has not.
    ///
    /// Explicit cancellation takes precedence over an expired deadline.
    pub fn reason(&self) -> Option<CancelReason> {
        let state = self.lock();
        self.reason_locked(&state)
    }

    /// Returns true once the token has fired for any reason.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    /// The deadline, if this token has one.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Blocks for `duration`, returning early with the reason if the token fires first.
    ///
    /// Cancellation-aware providers use this in place of `thread::sleep`.
    pub fn sleep(&self, duration: Duration) -> Result<(), CancelReason> {
        let until = Instant::now() + duration;
        let mut state = self.lock();
        loop {
            if let Some(reason) = self.reason_locked(&state) {
                return Err(reason);
            }
            let now = Instant::now();
            if now >= until {
                return Ok(());
            }
            let wake_at = match self.inner.deadline {
                Some(deadline) if deadline < until => deadline,
                _ => until,
            };
            state = self
                .inner
                .condvar
                .wait_timeout(state, wake_at.saturating_duration_since(now))
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Registers `wake` to be called once when the token is cancelled explicitly.
    ///
    /// If the token is already cancelled, `wake` runs immediately. Deadlines do not trigger
    /// `wake`; waiters honor them through `deadline()`. Dropping the returned guard unregisters
    /// the callback.
    pub fn on_cancel<F>(&self, wake: F) -> CancelRegistration
    where
        F: Fn() + Send + 'static,
    {
        let mut state = self.lock();
        if state.cancelled {
            drop(state);
            wake();
            return CancelRegistration { token: None, id: 0 };
        }
        let id = state.next_waiter;
        state.next_waiter += 1;
        state.waiters.push((id, Box::new(wake)));
        CancelRegistration {
            token: Some(self.clone()),
            id,
        }
    }

    fn reason_locked(&self, state: &State) -> Option<CancelReason> {
        if state.cancelled {
            return Some(CancelReason::Cancelled);
        }
        match self.inner.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CancelToken {
    fn default() -> CancelToken {
        CancelToken::new()
    }
}

impl Debug for CancelToken {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("reason", &self.reason())
            .field("deadline", &self.inner.deadline)
            .finish()
    }
}

/// Keeps a callback registered with `CancelToken::on_cancel` alive.
#[must_use]
pub struct CancelRegistration {
    token: Option<CancelToken>,
    id: u64,
}

impl Drop for CancelRegistration {
    fn drop(&mut self) {
        if let Some(ref token) = self.token {
            token.lock().waiters.retain(|&(id, _)| id != self.id);
        }
    }
}
