//! Lazy per-instance moment cache shared by all distribution variants.
//!
//! Purpose
//! -------
//! Memoize raw moments keyed by integer order so that repeated `moment(k)`
//! queries (mean/variance derivations, plot overlays, cross-checks) pay the
//! matrix or product computation exactly once per order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Distribution instances are immutable after construction, so a cached
//!   value never becomes stale and the cache is never invalidated.
//! - The cache uses `RefCell` interior mutability and is therefore `!Sync`;
//!   sharing a distribution across threads requires external
//!   synchronization. Within a single thread the borrow is short-lived and
//!   never held across the compute closure.

use std::cell::RefCell;
use std::collections::HashMap;

/// Growable association from moment order to previously computed value.
///
/// Each distribution owns one cache; it is the only mutable state behind an
/// otherwise read-only instance.
#[derive(Debug, Default, Clone)]
pub struct MomentCache {
    cache: RefCell<HashMap<u32, f64>>,
}

impl MomentCache {
    /// Construct an empty cache.
    pub fn new() -> Self {
        MomentCache { cache: RefCell::new(HashMap::new()) }
    }

    /// Return the cached value for order `k`, computing and storing it via
    /// `calc` on first access.
    ///
    /// The borrow is released before `calc` runs so the closure may itself
    /// query lower-order moments without panicking.
    pub fn get_or_compute(&self, k: u32, calc: impl FnOnce() -> f64) -> f64 {
        if let Some(&cached) = self.cache.borrow().get(&k) {
            return cached;
        }
        let value = calc();
        self.cache.borrow_mut().insert(k, value);
        value
    }
}

/// `k!` as a float; exact for every order a moment query will realistically
/// ask for (f64 factorials are exact through 22!).
pub(crate) fn factorial(k: u32) -> f64 {
    (1..=k).map(f64::from).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Memoization behavior of `MomentCache::get_or_compute` (compute-once,
    //   stable return values, independence across orders).
    // - Exactness of the small-order factorial helper.
    // Moment formulas themselves are tested in the per-distribution modules.
    // -------------------------------------------------------------------------

    #[test]
    fn cache_computes_each_order_once() {
        let cache = MomentCache::new();
        let calls = Cell::new(0usize);
        let compute = || {
            calls.set(calls.get() + 1);
            42.0
        };

        assert_eq!(cache.get_or_compute(1, compute), 42.0);
        assert_eq!(cache.get_or_compute(1, || panic!("must hit the cache")), 42.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cache_keys_orders_independently() {
        let cache = MomentCache::new();
        assert_eq!(cache.get_or_compute(1, || 1.0), 1.0);
        assert_eq!(cache.get_or_compute(2, || 2.0), 2.0);
        assert_eq!(cache.get_or_compute(1, || 99.0), 1.0);
    }

    #[test]
    fn factorial_small_orders() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(4), 24.0);
        assert_eq!(factorial(10), 3_628_800.0);
    }
}
