use core::alloc::Layout;

use crate::error::StorageError;

#[inline]
pub fn array_layout<T>(count: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(count).map_err(StorageError::LayoutError)
}

/// Select the capacity for a buffer which must hold at least `minimum`
/// elements, doubling the previous capacity (or starting from one).
#[inline]
pub fn grow_doubling(prev: usize, minimum: usize) -> Result<usize, StorageError> {
    let preferred = if prev == 0 {
        1
    } else {
        prev.checked_mul(2).ok_or(StorageError::CapacityLimit)?
    };
    Ok(preferred.max(minimum))
}
