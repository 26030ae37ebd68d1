//! A growable vector built directly on a single owned raw buffer.
//!
//! [`SimpleVec`] separates its length from its allocated capacity, grows
//! by doubling, and performs every reallocation by populating a complete
//! replacement buffer before adopting it.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

extern crate alloc as alloc_crate;

pub mod alloc;

pub(crate) mod error;

pub mod storage;

pub mod vec;

pub use self::{
    error::{IndexError, StorageError, UpdateError},
    storage::ArrayBuffer,
    vec::{reserve, IntoIter, ReserveHint, SimpleVec},
};
