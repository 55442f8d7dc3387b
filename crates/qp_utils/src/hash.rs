//! Hash containers with deterministic hashing.
//!
//! [`HashMap`] and [`HashSet`] are *hashbrown* containers that default to
//! [`FixedHashState`], a *foldhash* state with a fixed seed, so iteration
//! order only depends on the inserted keys.
//!
//! [`NoOpHashState`] passes a `u64` straight through and is meant for keys
//! that are already well distributed, such as `TypeId`.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_SEED: FixedState = FixedState::with_seed(0x51_7C_C1_B7_27_22_0A_95);

/// Hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A [`BuildHasher`] whose output only depends on the hashed value.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use qp_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("key"), FixedHashState.hash_one("key"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHashState

/// A hasher that keeps the last written `u64` as the hash.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// [`BuildHasher`] for [`NoOpHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher::default()
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A *hashbrown* map using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A *hashbrown* set using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

#[cfg(test)]
mod tests {
    use super::{HashMap, HashSet, NoOpHasher};
    use core::hash::Hasher;

    #[test]
    fn noop_hasher_keeps_u64() {
        let mut hasher = NoOpHasher::default();
        hasher.write_u64(42);
        assert_eq!(hasher.finish(), 42);
    }

    #[test]
    fn containers_use_fixed_state() {
        let mut map: HashMap<&str, u32> = HashMap::default();
        map.insert("a", 1);
        assert_eq!(map.get("a"), Some(&1));

        let mut set: HashSet<&str> = HashSet::default();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
    }
}
