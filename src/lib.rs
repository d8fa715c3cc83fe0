//! Order-preserving maps with a manipulable entry sequence.
//!
//! [`SeqMap`] is an associative container with two faces over one set of
//! owned entries: a doubly traversable sequence that defines iteration order
//! and supports insertion at arbitrary positions, reordering, reversal, and
//! slicing, and a key-ordered index that resolves any key to its value in
//! O(log n). The two structures are kept consistent under every mutation;
//! inserting an existing key overwrites its value in place without moving it.
//!
//! ```rust
//! use seqmap::{seqmap, SeqMap};
//!
//! let mut map = seqmap! {
//!     "op" => 3,
//!     "ed" => 1,
//! };
//! map.unshift("intro", 0);
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["intro", "op", "ed"]);
//! assert_eq!(map[&"ed"], 1);
//!
//! map.sort_by_value();
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["intro", "ed", "op"]);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::cloned_instead_of_copied,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::flat_map_option,
    clippy::from_iter_instead_of_collect,
    clippy::if_not_else,
    clippy::manual_ok_or,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::redundant_closure_for_method_calls,
    clippy::redundant_else,
    clippy::unreadable_literal,
    clippy::unused_self
)]
#![no_std]

extern crate alloc;

mod arena;
mod serde;

pub mod iter;
pub mod seq_map;

pub use crate::seq_map::{Cursor, SeqMap};
