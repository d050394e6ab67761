//! Fast hash map and hash set type aliases.
//!
//! Everything this tool indexes is keyed by strings: descriptor object
//! identifiers, target names, document keys. The Fx hash algorithm from
//! `rustc-hash` is roughly 2x faster than the standard library hasher for
//! such keys, and denial-of-service resistance is irrelevant for a local
//! batch tool, so these aliases are used throughout the workspace.

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new [`FxHashMap`] with the specified capacity.
///
/// # Examples
///
/// ```
/// use ps_core::fx_hash_map_with_capacity;
///
/// let map: ps_core::FxHashMap<String, u32> = fx_hash_map_with_capacity(16);
/// assert!(map.capacity() >= 16);
/// ```
#[inline]
#[must_use]
pub fn fx_hash_map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}
