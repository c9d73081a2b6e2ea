use std::{fmt, marker::PhantomData};

use crate::handle::Handle;
use super::Elements;


/// A side table for small `Copy` values that uses a simple contiguous vector.
///
/// The vector is indexed by the handle ID and grows (amortized) to `id + 1`
/// when a handle beyond the current length is written. Reading a handle that
/// was never written, including handles beyond the current length, returns
/// `T::default()`.
///
/// # Example
///
/// ```
/// use halfmesh::{FaceHandle, handle::Handle, map::IntMap};
///
/// let mut map = IntMap::new();
/// let f3 = FaceHandle::new(3);
/// assert_eq!(map.get(f3), 0);
///
/// map.set(f3, 27);
/// assert_eq!(map.get(f3), 27);
/// assert_eq!(map.get(FaceHandle::new(100)), 0);
/// ```
#[derive(Clone)]
pub struct ValueMap<H: Handle, T: Copy + Default> {
    values: Vec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T: Copy + Default> ValueMap<H, T> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            _dummy: PhantomData,
        }
    }

    /// Creates an empty map with room for handles with IDs below `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            _dummy: PhantomData,
        }
    }

    pub fn get(&self, handle: H) -> T {
        self.values.get(handle.to_usize()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, handle: H, value: T) {
        let idx = handle.to_usize();
        if idx >= self.values.len() {
            self.values.resize(idx + 1, T::default());
        }
        self.values[idx] = value;
    }

    /// Resets all values to `T::default()`. The allocated memory is kept.
    pub fn clear(&mut self) {
        for v in &mut self.values {
            *v = T::default();
        }
    }

    /// Sets the value of every live element of `elements` to the result of
    /// `generator`.
    pub fn set_all<E, F>(&mut self, elements: &E, mut generator: F)
    where
        E: Elements<H> + ?Sized,
        F: FnMut(H) -> T,
    {
        for h in elements.element_handles() {
            let value = generator(h);
            self.set(h, value);
        }
    }

    /// Returns the values of all live elements of `elements`, in ID order.
    pub fn stream<'a, E>(&'a self, elements: &'a E) -> impl Iterator<Item = T> + 'a
    where
        E: Elements<H> + ?Sized,
    {
        elements.element_handles().map(move |h| self.get(h))
    }
}

impl<H: Handle, T: Copy + Default + PartialOrd> ValueMap<H, T> {
    /// Returns the one of both handles with the smaller value (`a` on ties).
    /// Useful as selector for [`walk`][crate::walk].
    pub fn min_of(&self, a: H, b: H) -> H {
        if self.get(b) < self.get(a) { b } else { a }
    }

    /// Returns the one of both handles with the larger value (`a` on ties).
    /// Useful as selector for [`walk`][crate::walk].
    pub fn max_of(&self, a: H, b: H) -> H {
        if self.get(b) > self.get(a) { b } else { a }
    }
}

impl<H: Handle, T: Copy + Default> Default for ValueMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T: Copy + Default + fmt::Debug> fmt::Debug for ValueMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().enumerate().map(|(i, v)| (H::from_usize(i), v)))
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use crate::handle::{Handle, VertexHandle};
    use super::*;

    #[test]
    fn grows_on_write() {
        let mut map = ValueMap::<VertexHandle, f64>::new();
        map.set(VertexHandle::new(7), 2.5);
        assert_eq!(map.values.len(), 8);
        assert_eq!(map.get(VertexHandle::new(7)), 2.5);
        assert_eq!(map.get(VertexHandle::new(6)), 0.0);

        map.set(VertexHandle::new(2), 1.0);
        assert_eq!(map.values.len(), 8);
    }

    #[test]
    fn clear_resets_to_default() {
        let mut map = ValueMap::<VertexHandle, bool>::new();
        map.set(VertexHandle::new(0), true);
        map.set(VertexHandle::new(3), true);
        map.clear();
        assert!(!map.get(VertexHandle::new(0)));
        assert!(!map.get(VertexHandle::new(3)));
    }

    #[test]
    fn min_and_max_prefer_first_on_ties() {
        let mut map = ValueMap::<VertexHandle, i32>::new();
        let (a, b, c) = (VertexHandle::new(0), VertexHandle::new(1), VertexHandle::new(2));
        map.set(a, 5);
        map.set(b, 5);
        map.set(c, 9);

        assert_eq!(map.min_of(a, b), a);
        assert_eq!(map.min_of(c, a), a);
        assert_eq!(map.max_of(b, a), b);
        assert_eq!(map.max_of(a, c), c);
    }
}
