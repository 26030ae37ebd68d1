use core::mem::MaybeUninit;
use core::ptr;

/// Writes values into a run of uninitialized slots. If dropped before
/// `complete` is called (for instance when a clone panics), the values
/// written so far are dropped in place.
pub(crate) struct Inserter<'a, T> {
    buf: &'a mut [MaybeUninit<T>],
    pos: usize,
}

impl<'a, T> Inserter<'a, T> {
    #[inline]
    pub fn new(buf: &'a mut [MaybeUninit<T>]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        assert!(self.pos < self.buf.len());
        self.buf[self.pos].write(val);
        self.pos += 1;
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        self.push(val.clone());
    }

    #[inline]
    pub fn push_with(&mut self, f: &mut impl FnMut() -> T) {
        while self.pos < self.buf.len() {
            self.buf[self.pos].write(f());
            self.pos += 1;
        }
    }

    #[inline]
    pub fn push_slice(&mut self, data: &[T])
    where
        T: Clone,
    {
        assert!(self.buf.len() - self.pos >= data.len());
        for item in data {
            self.buf[self.pos].write(item.clone());
            self.pos += 1;
        }
    }

    /// Successfully complete the insertion, returning the number of
    /// initialized slots.
    #[inline]
    pub fn complete(mut self) -> usize {
        let count = self.pos;
        self.buf = &mut [];
        count
    }
}

impl<T> Drop for Inserter<'_, T> {
    #[inline]
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            unsafe {
                ptr::drop_in_place(&mut self.buf[..self.pos] as *mut [MaybeUninit<T>] as *mut [T])
            };
        }
    }
}
