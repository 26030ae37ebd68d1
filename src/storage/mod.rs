//! Owned raw storage for collection types.

mod buffer;

pub(crate) mod utils;

pub use self::buffer::ArrayBuffer;
