// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Result caching keyed by a hash of the arguments.
//!
//! The cache is a single-level map and grows without bound: nothing is ever
//! evicted or invalidated. Bounding it (LRU, TTL) is a separate concern to
//! layer on top, deliberately out of scope here.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;

/// Caching wrapper created by [`memoize`] or [`memoize_with`].
///
/// On a cache hit the stored result is cloned and returned without invoking
/// the function; on a miss the function runs and its result is stored under
/// the call's key.
pub struct Memoize<A, K, R, F> {
    func: F,
    hasher: Box<dyn Fn(&A) -> K + Send + Sync>,
    cache: Mutex<HashMap<K, R>>,
}

impl<A, K, R, F> Memoize<A, K, R, F>
where
    K: Eq + Hash,
    R: Clone,
{
    /// Invoke the wrapper.
    ///
    /// The function runs outside the cache lock, so a recursive call
    /// through the wrapper cannot deadlock; if two racing callers miss on
    /// the same key, the first stored result wins and both observe it on
    /// their next call.
    pub fn call(&self, arg: A) -> R
    where
        F: Fn(A) -> R,
    {
        let key = (self.hasher)(&arg);
        if let Some(hit) = self.cache.lock().get(&key) {
            return hit.clone();
        }

        let value = (self.func)(arg);
        self.cache.lock().entry(key).or_insert(value).clone()
    }

    /// Number of cached entries.
    ///
    /// Grows monotonically; there is no eviction.
    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }
}

/// Memoize `func`, keyed by the argument itself.
///
/// Calls whose arguments compare equal share one cache entry; the function
/// runs once per distinct argument. Functions taking several logical inputs
/// key on the whole tuple - supply [`memoize_with`] and a custom hasher to
/// key on something narrower.
///
/// # Example
///
/// ```
/// use damper::memoize;
///
/// let reverse = memoize(|s: String| s.chars().rev().collect::<String>());
///
/// assert_eq!(reverse.call("alpha".to_string()), "ahpla");
/// assert_eq!(reverse.call("alpha".to_string()), "ahpla"); // cached
/// assert_eq!(reverse.cache_size(), 1);
/// ```
pub fn memoize<A, R, F>(func: F) -> Memoize<A, A, R, F>
where
    A: Clone + Eq + Hash,
    R: Clone,
    F: Fn(A) -> R,
{
    Memoize {
        func,
        hasher: Box::new(|arg: &A| arg.clone()),
        cache: Mutex::new(HashMap::new()),
    }
}

/// Memoize `func` with a custom key derivation.
///
/// `hasher` maps a call's arguments to the cache key; calls mapping to the
/// same key share one entry, whatever their arguments.
///
/// # Example
///
/// ```
/// use damper::memoize_with;
///
/// // Key on the first character only: "alpha" and "avocado" collide.
/// let first = memoize_with(|s: String| s.len(), |s: &String| s.chars().next());
///
/// assert_eq!(first.call("alpha".to_string()), 5);
/// assert_eq!(first.call("avocado".to_string()), 5); // same key, cached
/// ```
pub fn memoize_with<A, K, R, F, H>(func: F, hasher: H) -> Memoize<A, K, R, F>
where
    K: Eq + Hash,
    R: Clone,
    F: Fn(A) -> R,
    H: Fn(&A) -> K + Send + Sync + 'static,
{
    Memoize {
        func,
        hasher: Box::new(hasher),
        cache: Mutex::new(HashMap::new()),
    }
}
