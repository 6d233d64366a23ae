use std::cell::UnsafeCell;

/// Shared mutable view over the pixel words, handed to blur workers.
///
/// Workers read and write through `&self`, so soundness rests on the caller
/// guaranteeing that no index is touched by two workers within one pass. The
/// partitioner upholds this by assigning each worker a disjoint range of
/// lines, and the barrier between passes orders all writes of one pass before
/// any read of the next.
pub(crate) struct UnsafeSlice<'a, T> {
    slice: &'a [UnsafeCell<T>],
}

unsafe impl<T: Send + Sync> Send for UnsafeSlice<'_, T> {}
unsafe impl<T: Send + Sync> Sync for UnsafeSlice<'_, T> {}

impl<'a, T: Copy> UnsafeSlice<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        // &mut [T] -> &[UnsafeCell<T>] is sound: UnsafeCell<T> has the same
        // layout as T, and the exclusive borrow is held for 'a.
        let ptr = slice as *mut [T] as *const [UnsafeCell<T>];
        Self {
            slice: unsafe { &*ptr },
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> T {
        unsafe { *self.slice[index].get() }
    }

    #[inline]
    pub(crate) fn write(&self, index: usize, value: T) {
        unsafe {
            *self.slice[index].get() = value;
        }
    }
}
