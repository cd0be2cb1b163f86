//! Identity tokens for cache invalidation.
//!
//! Caches in this crate never compare their inputs structurally. Each input
//! bundle (a card universe, a set of construction arguments, a permission
//! map) is stamped with an [`Identity`] when it is built, and a cache entry is
//! valid only while the identity it was computed against is still current.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// An opaque token that is unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(u64);

impl Identity {
    /// Allocates a fresh identity that compares unequal to every other one.
    pub fn next() -> Self {
        Identity(NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_are_unique() {
        let a = Identity::next();
        let b = Identity::next();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}
