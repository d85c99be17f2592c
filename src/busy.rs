// ABOUTME: In-flight call counter with a guard that releases on drop
// ABOUTME: Backs the busy signal of the AI gateway and the analysis service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Count of calls currently in flight
///
/// Busy while at least one [`BusyGuard`] is alive. Clones share the counter,
/// so a caller can observe the flag while another task runs the call.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicUsize>);

impl BusyFlag {
    /// New idle flag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one call as started; the returned guard marks it finished on drop
    #[must_use = "the call is only counted while the guard is alive"]
    pub fn enter(&self) -> BusyGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        BusyGuard(Arc::clone(&self.0))
    }

    /// True while any call is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    /// Number of calls in flight
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Held for the duration of one call
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicUsize>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
