//! Memoization with a caller-supplied cache key (v0.1)
//!
//! Uses DashMap so a [`Memo`] can be shared across threads without a lock
//! around the wrapped function.

use std::fmt;
use std::marker::PhantomData;

use dashmap::DashMap;
use tracing::trace;

/// A function wrapped with a result cache keyed by `serializer(args)`
pub struct Memo<A: ?Sized, R, F, S> {
    func: F,
    serializer: S,
    cache: DashMap<String, R>,
    _args: PhantomData<fn(&A)>,
}

/// Wrap `func` so repeated calls with the same serialized arguments return
/// the cached result
pub fn memoize<A, R, F, S>(func: F, serializer: S) -> Memo<A, R, F, S>
where
    A: ?Sized,
    R: Clone,
    F: Fn(&A) -> R,
    S: Fn(&A) -> String,
{
    Memo {
        func,
        serializer,
        cache: DashMap::new(),
        _args: PhantomData,
    }
}

impl<A, R, F, S> Memo<A, R, F, S>
where
    A: ?Sized,
    R: Clone,
    F: Fn(&A) -> R,
    S: Fn(&A) -> String,
{
    pub fn call(&self, args: &A) -> R {
        let key = (self.serializer)(args);
        if let Some(hit) = self.cache.get(&key) {
            trace!(key = %key, "memo hit");
            return hit.value().clone();
        }

        // Computed outside the shard lock so `func` may re-enter this memo.
        // Two racing callers may both compute; the first insert is kept.
        trace!(key = %key, "memo miss");
        let result = (self.func)(args);
        self.cache.entry(key).or_insert(result).value().clone()
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl<A: ?Sized, R, F, S> fmt::Debug for Memo<A, R, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("cached", &self.cache.len())
            .finish()
    }
}
