//! Support for memory allocation.

use core::alloc::Layout;
use core::mem::size_of;
use core::ptr::NonNull;

use alloc_crate::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};

use crate::error::StorageError;
use crate::storage::utils::array_layout;

#[cfg(not(test))]
pub use alloc_crate::alloc::handle_alloc_error;

#[cfg(test)]
/// Custom allocation error handler.
pub fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size());
}

/// Allocate uninitialized storage for `count` values of `T` from the
/// global allocator.
///
/// Zero-sized requests (either `count == 0` or a zero-sized `T`) do not
/// touch the allocator and produce a dangling, well-aligned pointer.
pub fn allocate_array<T>(count: usize) -> Result<NonNull<T>, StorageError> {
    let layout = array_layout::<T>(count)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }
    // SAFETY: the layout has a non-zero size.
    let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
        return Err(StorageError::AllocError(layout));
    };
    log::trace!(
        "allocated array of {} x {} bytes at {:p}",
        count,
        size_of::<T>(),
        ptr
    );
    Ok(ptr.cast())
}

/// Release storage previously produced by [`allocate_array`].
///
/// # Safety
/// `ptr` must have been returned by `allocate_array::<T>(count)` with the
/// same `count`, and must not have been released already.
pub unsafe fn release_array<T>(ptr: NonNull<T>, count: usize) {
    // The layout was valid at allocation time, so it is still valid here.
    let layout =
        Layout::from_size_align_unchecked(size_of::<T>() * count, Layout::new::<T>().align());
    if layout.size() > 0 {
        log::trace!("releasing array of {} bytes at {:p}", layout.size(), ptr);
        raw_dealloc(ptr.as_ptr().cast(), layout);
    }
}
