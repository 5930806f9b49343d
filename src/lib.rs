#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// The raw Robin Hood table.
///
/// This module provides `RobinHoodTable`, which stores values under
/// caller-supplied hashes and equality predicates. It owns the probing,
/// displacement, backward-shift deletion and growth logic.
pub mod hash_table;

/// A hash set built on the Robin Hood table.
///
/// This module provides a `RobinHoodSet` that wraps the `RobinHoodTable` and
/// provides a standard set interface with configurable hashers.
pub mod hash_set;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Default hasher for [`RobinHoodSet`].
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Default hasher for [`RobinHoodSet`].
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder default hasher for [`RobinHoodSet`].
        ///
        /// Without the `foldhash` or `std` features there is no default hasher;
        /// build sets with [`RobinHoodSet::with_hasher`] instead.
        pub enum DefaultHashBuilder {}
    }
}

pub use hash_set::RobinHoodSet;
pub use hash_table::RobinHoodTable;
