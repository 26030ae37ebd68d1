//! A growable vector built on a single owned buffer.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use const_default::ConstDefault;

use crate::error::{IndexError, StorageError, UpdateError};
use crate::storage::utils::grow_doubling;
use crate::storage::ArrayBuffer;

use self::insert::Inserter;

pub use self::into_iter::IntoIter;

#[macro_use]
mod macros;

mod insert;
mod into_iter;

#[cold]
#[inline(never)]
fn index_panic(index: usize, length: usize) -> ! {
    IndexError::new(index, length).panic()
}

/// A request to pre-allocate capacity when constructing a [`SimpleVec`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReserveHint {
    capacity_to_reserve: usize,
}

impl ReserveHint {
    /// Create a new hint for the given capacity.
    #[inline]
    pub const fn new(capacity_to_reserve: usize) -> Self {
        Self {
            capacity_to_reserve,
        }
    }

    /// The number of element slots to reserve.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity_to_reserve
    }
}

/// Create a [`ReserveHint`] for use in constructing a [`SimpleVec`].
///
/// ```
/// use simple_vec::{reserve, SimpleVec};
///
/// let v = SimpleVec::<u32>::from(reserve(5));
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 5);
/// ```
#[inline]
pub const fn reserve(capacity_to_reserve: usize) -> ReserveHint {
    ReserveHint::new(capacity_to_reserve)
}

/// A contiguous growable array with separate length and capacity.
///
/// Elements in `[0, len)` are live. Slots in `[len, capacity)` are allocated
/// but uninitialized. Whenever an operation needs more room than is
/// allocated, a replacement buffer is fully populated before being swapped
/// in, so a failed allocation never disturbs the existing contents.
pub struct SimpleVec<T> {
    buffer: ArrayBuffer<T>,
    length: usize,
}

impl<T> SimpleVec<T> {
    /// Constructs a new, empty `SimpleVec<T>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// let mut vec: simple_vec::SimpleVec<i32> = simple_vec::SimpleVec::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: ArrayBuffer::new(),
            length: 0,
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        Ok(Self {
            buffer: ArrayBuffer::try_with_capacity(capacity)?,
            length: 0,
        })
    }

    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Construct an empty vector with exactly the capacity requested by
    /// the hint.
    #[inline]
    pub fn try_with_reserve(hint: ReserveHint) -> Result<Self, StorageError> {
        Self::try_with_capacity(hint.capacity())
    }

    #[inline]
    pub fn with_reserve(hint: ReserveHint) -> Self {
        Self::with_capacity(hint.capacity())
    }

    /// Construct a vector of `length` default values, with a capacity
    /// of exactly `length`.
    pub fn try_with_len(length: usize) -> Result<Self, StorageError>
    where
        T: Default,
    {
        let mut buffer = ArrayBuffer::try_with_capacity(length)?;
        let mut insert = Inserter::new(buffer.as_uninit_slice());
        insert.push_with(&mut T::default);
        let length = insert.complete();
        Ok(Self { buffer, length })
    }

    pub fn with_len(length: usize) -> Self
    where
        T: Default,
    {
        match Self::try_with_len(length) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Construct a vector holding `count` copies of `elem`.
    pub fn try_from_elem(elem: T, count: usize) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut buffer = ArrayBuffer::try_with_capacity(count)?;
        let mut insert = Inserter::new(buffer.as_uninit_slice());
        if count > 0 {
            for _ in 1..count {
                insert.push_clone(&elem);
            }
            insert.push(elem);
        }
        let length = insert.complete();
        Ok(Self { buffer, length })
    }

    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem(elem, count) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Construct a vector by cloning each element of `data`. The capacity
    /// is exactly `data.len()`.
    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut buffer = ArrayBuffer::try_with_capacity(data.len())?;
        let mut insert = Inserter::new(buffer.as_uninit_slice());
        insert.push_slice(data);
        let length = insert.complete();
        Ok(Self { buffer, length })
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice(data) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }
}

impl<T> SimpleVec<T> {
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_mut_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buffer.as_mut_ptr(), self.length) }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Get a reference to the element at `index`, or an error if the index
    /// is not less than the length of the vector.
    ///
    /// ```
    /// let v = simple_vec::simple_vec![1, 2, 3];
    /// assert_eq!(v.at(1), Ok(&2));
    /// assert!(v.at(3).is_err());
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, IndexError> {
        if index < self.length {
            Ok(unsafe { self.buffer.get_unchecked(index) })
        } else {
            Err(IndexError::new(index, self.length))
        }
    }

    /// Get a mutable reference to the element at `index`, or an error if
    /// the index is not less than the length of the vector.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        if index < self.length {
            Ok(unsafe { self.buffer.get_unchecked_mut(index) })
        } else {
            Err(IndexError::new(index, self.length))
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn truncate(&mut self, length: usize) {
        let old_len = self.length;
        let new_len = length.min(old_len);
        let remove = old_len - new_len;
        if remove > 0 {
            self.length = new_len;
            unsafe {
                let to_drop: &mut [T] =
                    slice::from_raw_parts_mut(self.buffer.as_mut_ptr().add(new_len), remove);
                ptr::drop_in_place(to_drop);
            }
        }
    }

    /// Ensure that the capacity of the vector is at least `new_capacity`.
    ///
    /// Unlike `std::vec::Vec::reserve`, the argument is the total capacity
    /// requested and not the number of additional elements. When growth is
    /// required, exactly `new_capacity` slots are allocated.
    #[inline]
    pub fn reserve(&mut self, new_capacity: usize) {
        match self.try_reserve(new_capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), StorageError> {
        if new_capacity > self.buffer.capacity() {
            self.try_grow_to(new_capacity)?;
        }
        Ok(())
    }

    // Move the live elements into a new buffer of the given capacity and
    // adopt it. The previous allocation is released with the replaced buffer.
    fn try_grow_to(&mut self, capacity: usize) -> Result<(), StorageError> {
        let mut buffer = ArrayBuffer::try_with_capacity(capacity)?;
        log::trace!(
            "relocating {} elements (capacity {} -> {})",
            self.length,
            self.buffer.capacity(),
            capacity
        );
        unsafe {
            ptr::copy_nonoverlapping(self.buffer.as_ptr(), buffer.as_mut_ptr(), self.length);
        }
        self.buffer.swap(&mut buffer);
        Ok(())
    }

    /// Resize the vector to `new_len` elements, filling any new slots with
    /// the default value of `T`.
    ///
    /// When the capacity must grow, the new capacity is the larger of twice
    /// the current capacity and `new_len`.
    #[inline]
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        match self.try_resize(new_len) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    #[inline]
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), StorageError>
    where
        T: Default,
    {
        self.try_resize_with(new_len, T::default)
    }

    #[inline]
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        let length = self.length;
        match new_len.cmp(&length) {
            Ordering::Greater => {
                let capacity = self.buffer.capacity();
                if new_len > capacity {
                    self.try_grow_to(grow_doubling(capacity, new_len)?)?;
                }
                let mut insert =
                    Inserter::new(&mut self.buffer.as_uninit_slice()[length..new_len]);
                insert.push_with(&mut f);
                let added = insert.complete();
                self.length = length + added;
            }
            Ordering::Less => {
                self.truncate(new_len);
            }
            Ordering::Equal => {}
        }
        Ok(())
    }

    /// Append an element to the end of the vector, doubling the capacity
    /// when it is exhausted (or allocating a single slot when empty).
    #[inline]
    pub fn push_back(&mut self, item: T) {
        match self.try_push_back(item) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_push_back(&mut self, item: T) -> Result<(), UpdateError<T>> {
        self.try_insert(self.length, item)?;
        Ok(())
    }

    /// Remove and return the last element, or `None` if the vector is empty.
    /// The capacity is not changed.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.length > 0 {
            self.length -= 1;
            Some(unsafe { self.buffer.uninit_index(self.length).assume_init_read() })
        } else {
            None
        }
    }

    /// Insert `value` at position `index`, shifting all following elements
    /// toward the back. Returns the index of the inserted element.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        match self.try_insert(index, value) {
            Ok(index) => index,
            Err(error) => error.panic(),
        }
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<usize, UpdateError<T>> {
        let length = self.length;
        if index > length {
            index_panic(index, length);
        }
        let capacity = self.buffer.capacity();
        if length == capacity {
            let mut buffer = match grow_doubling(capacity, length.saturating_add(1))
                .and_then(ArrayBuffer::<T>::try_with_capacity)
            {
                Ok(buffer) => buffer,
                Err(error) => return Err(UpdateError::new(error, value)),
            };
            log::trace!(
                "relocating {} elements for insert (capacity {} -> {})",
                length,
                capacity,
                buffer.capacity()
            );
            unsafe {
                let src = self.buffer.as_ptr();
                let dst = buffer.as_mut_ptr();
                ptr::copy_nonoverlapping(src, dst, index);
                dst.add(index).write(value);
                ptr::copy_nonoverlapping(src.add(index), dst.add(index + 1), length - index);
            }
            self.buffer.swap(&mut buffer);
        } else {
            unsafe {
                let head = self.buffer.as_mut_ptr().add(index);
                if length > index {
                    ptr::copy(head, head.add(1), length - index);
                }
                head.write(value);
            }
        }
        self.length = length + 1;
        Ok(index)
    }

    /// Remove the element at `index`, shifting all following elements toward
    /// the front. Returns `index`, which now refers to the element that
    /// followed the removed one (or equals `len()` if the last element was
    /// removed). The capacity is not changed.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Remove and return the element at `index`, shifting all following
    /// elements toward the front.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let length = self.length;
        if index >= length {
            index_panic(index, length);
        }
        unsafe {
            let head = self.buffer.as_mut_ptr().add(index);
            let result = ptr::read(head);
            ptr::copy(head.add(1), head, length - index - 1);
            self.length = length - 1;
            result
        }
    }

    /// Exchange the contents of this vector with another, without touching
    /// any elements.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.buffer.swap(&mut other.buffer);
        mem::swap(&mut self.length, &mut other.length);
    }

    /// Move the contents of this vector into a new instance, leaving this
    /// vector empty with no allocated capacity.
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            buffer: self.buffer.take(),
            length: mem::replace(&mut self.length, 0),
        }
    }
}

impl<T> AsRef<[T]> for SimpleVec<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for SimpleVec<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for SimpleVec<T> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for SimpleVec<T> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Clone for SimpleVec<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    fn clone_from(&mut self, source: &Self) {
        if source.is_empty() {
            *self = Self::new();
        } else {
            let mut copy = source.clone();
            self.swap(&mut copy);
        }
    }
}

impl<T> ConstDefault for SimpleVec<T> {
    const DEFAULT: Self = Self::new();
}

impl<T: fmt::Debug> fmt::Debug for SimpleVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T> Default for SimpleVec<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SimpleVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Drop for SimpleVec<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> From<ReserveHint> for SimpleVec<T> {
    #[inline]
    fn from(hint: ReserveHint) -> Self {
        Self::with_reserve(hint)
    }
}

impl<T: Clone> From<&[T]> for SimpleVec<T> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T: Clone, const N: usize> From<&[T; N]> for SimpleVec<T> {
    #[inline]
    fn from(data: &[T; N]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVec<T> {
    fn from(data: [T; N]) -> Self {
        let mut vec = Self::with_capacity(N);
        let data = ManuallyDrop::new(data);
        unsafe { ptr::copy_nonoverlapping(data.as_ptr(), vec.buffer.as_mut_ptr(), N) };
        vec.length = N;
        vec
    }
}

impl<T> IntoIterator for SimpleVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let mut me = ManuallyDrop::new(self);
        IntoIter::new(me.buffer.take(), me.length)
    }
}

impl<'a, T> IntoIterator for &'a SimpleVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T1, T2> PartialEq<SimpleVec<T2>> for SimpleVec<T1>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &SimpleVec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: Eq> Eq for SimpleVec<T> {}

impl<T1, T2> PartialEq<[T2]> for SimpleVec<T1>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<T1, T2> PartialEq<&[T2]> for SimpleVec<T1>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<T1, T2, const N: usize> PartialEq<[T2; N]> for SimpleVec<T1>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2, const N: usize> PartialEq<&[T2; N]> for SimpleVec<T1>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<T1, T2> PartialEq<alloc_crate::vec::Vec<T2>> for SimpleVec<T1>
where
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &alloc_crate::vec::Vec<T2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<T: PartialOrd> PartialOrd for SimpleVec<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVec<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

#[cfg(feature = "zeroize")]
impl<T: zeroize::Zeroize> zeroize::Zeroize for SimpleVec<T> {
    fn zeroize(&mut self) {
        use zeroize::Zeroize;

        for item in self.as_mut_slice() {
            item.zeroize();
        }
        self.clear();
        // wipe the whole allocation, including previously vacated slots
        self.buffer.as_uninit_slice().zeroize();
    }
}
