use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;
use core::slice;

use const_default::ConstDefault;

use crate::alloc::{allocate_array, release_array};
use crate::error::StorageError;

/// Exclusive ownership of a single heap allocation holding a fixed number
/// of element slots.
///
/// The buffer has no notion of which slots are initialized: it never
/// constructs or drops elements, and only releases the allocation itself.
/// An empty buffer holds a dangling pointer and no allocation.
pub struct ArrayBuffer<T> {
    data: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> ArrayBuffer<T> {
    /// Create an empty buffer without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate a buffer with exactly `capacity` uninitialized slots.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        let data = allocate_array::<T>(capacity)?;
        Ok(Self {
            data,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Allocate a buffer with exactly `capacity` uninitialized slots,
    /// panicking on allocation failure.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buf) => buf,
            Err(err) => err.panic(),
        }
    }

    /// The number of slots in the buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// Access all slots of the buffer as uninitialized storage.
    #[inline]
    pub fn as_uninit_slice(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr().cast(), self.capacity) }
    }

    /// # Safety
    /// The index must be within the bounds of the buffer's capacity, otherwise a
    /// memory access error may occur.
    #[inline]
    pub unsafe fn uninit_index(&mut self, index: usize) -> &mut MaybeUninit<T> {
        &mut *self.data.as_ptr().add(index).cast()
    }

    /// # Safety
    /// The index must be within the bounds of the buffer's capacity and the
    /// slot must hold an initialized value.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        &*self.data.as_ptr().add(index)
    }

    /// # Safety
    /// The index must be within the bounds of the buffer's capacity and the
    /// slot must hold an initialized value.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        &mut *self.data.as_ptr().add(index)
    }

    /// Transfer the allocation out of this buffer, leaving it empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Exchange allocations with another buffer.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<T> ConstDefault for ArrayBuffer<T> {
    const DEFAULT: Self = Self::new();
}

impl<T> Default for ArrayBuffer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArrayBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("data", &self.data)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> Drop for ArrayBuffer<T> {
    fn drop(&mut self) {
        if self.capacity > 0 {
            // SAFETY: a non-empty buffer always holds the pointer returned
            // by allocate_array for the same capacity.
            unsafe { release_array(self.data, self.capacity) };
        }
    }
}

// The buffer owns its slots exclusively, like a Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for ArrayBuffer<T> {}

unsafe impl<T: Sync> Sync for ArrayBuffer<T> {}
