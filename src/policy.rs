//! Hash-folding and sizing policy shared by both table variants.

/// Storage size for freshly created tables, and the floor no shrink goes
/// below. Must be a power of two.
pub(crate) const INITIAL_CAPACITY: usize = 4;

/// Mixes the high bits of a hash code down into the low bits.
///
/// Slot selection keeps only the low bits of the hash (storage sizes are
/// powers of two), so without this step any hasher whose output differs only
/// in the high bits would pile every key into a handful of slots.
#[inline]
pub(crate) fn spread(hash: u64) -> u64 {
    hash ^ (hash >> 20) ^ (hash >> 12) ^ (hash >> 7) ^ (hash >> 4)
}

/// Folds a hash code into a slot index in `[0, capacity)`.
///
/// `capacity` must be a power of two.
#[inline]
pub(crate) fn index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    spread(hash) as usize & (capacity - 1)
}
