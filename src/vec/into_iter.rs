use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;
use core::ptr;
use core::slice;

use crate::storage::ArrayBuffer;

/// An owning iterator over the elements of a [`SimpleVec`](super::SimpleVec).
pub struct IntoIter<T> {
    remain: Range<usize>,
    buf: ArrayBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(buf: ArrayBuffer<T>, length: usize) -> Self {
        Self {
            remain: Range {
                start: 0,
                end: length,
            },
            buf,
        }
    }

    /// The elements which have not yet been yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(self.buf.as_ptr().add(self.remain.start), self.remain.len())
        }
    }

    /// The elements which have not yet been yielded.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(
                self.buf.as_mut_ptr().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    fn clear(&mut self) {
        if !self.remain.is_empty() {
            let remain: *mut [T] = self.as_mut_slice();
            // mark the slots as consumed before dropping, in case a drop panics
            self.remain.start = self.remain.end;
            unsafe { ptr::drop_in_place(remain) };
        }
    }
}

impl<T> AsRef<[T]> for IntoIter<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for IntoIter<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.remain.start;
        if index != self.remain.end {
            self.remain.start = index + 1;
            unsafe { Some(ptr::read(self.buf.as_ptr().add(index))) }
        } else {
            None
        }
    }

    #[inline]
    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.len()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remain.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut index = self.remain.end;
        if index != self.remain.start {
            index -= 1;
            self.remain.end = index;
            unsafe { Some(ptr::read(self.buf.as_ptr().add(index))) }
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
