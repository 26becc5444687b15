#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// An open-addressing symbol table using linear probing.
///
/// This module provides a `LinearProbingTable` that stores entries in a flat
/// power-of-two slot array, probes forward with wraparound, and repairs
/// probe runs when entries are removed.
pub mod linear_probing;

mod policy;

/// A separate-chaining symbol table built over sequential-search buckets.
///
/// This module provides a `SeparateChainingTable` that composes one
/// `SequentialTable` per bucket and redistributes entries when the average
/// chain length leaves its bounds.
pub mod separate_chaining;

pub mod sequential;

pub use linear_probing::LinearProbingTable;
pub use separate_chaining::SeparateChainingTable;
pub use sequential::SequentialTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Default hasher builder for the table types, used by `new`,
        /// `with_capacity`, and `Default`.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// Placeholder hasher builder used when the `foldhash` feature is
        /// disabled. It cannot be constructed; build tables through
        /// `with_hasher` instead.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}
