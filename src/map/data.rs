use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::StableVec;

use crate::handle::Handle;
use super::Elements;


/// A side table for arbitrary values.
///
/// Values are stored in a `StableVec` indexed by the handle ID, so the memory
/// requirement grows with the highest handle ID written, not with the number
/// of values. Handles that were never written map to `None`.
///
/// # Example
///
/// ```
/// use halfmesh::{VertexHandle, handle::Handle, map::DataMap};
///
/// let mut names = DataMap::new();
/// let v0 = VertexHandle::new(0);
/// assert_eq!(names.get(v0), None);
///
/// names.set(v0, "anna");
/// assert_eq!(names.get(v0), Some(&"anna"));
/// assert_eq!(names[v0], "anna");
/// ```
#[derive(Clone)]
pub struct DataMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DataMap<H, T> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    /// Associates `value` with `handle` and returns the previous value.
    pub fn set(&mut self, handle: H, value: T) -> Option<T> {
        let idx = handle.to_usize();
        self.vec.reserve_for(idx);
        self.vec.insert(idx, value)
    }

    pub fn remove(&mut self, handle: H) -> Option<T> {
        let idx = handle.to_usize();
        if idx >= self.vec.capacity() {
            return None;
        }

        self.vec.remove(idx)
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.vec.clear();
    }

    /// Returns the number of stored values.
    pub fn num_values(&self) -> usize {
        self.vec.num_elements()
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
    /// Elements without a value yield `None`.
    pub fn stream<'a, E>(&'a self, elements: &'a E) -> impl Iterator<Item = Option<&'a T>> + 'a
    where
        E: Elements<H> + ?Sized,
    {
        elements.element_handles().map(move |h| self.get(h))
    }

    /// Iterates over all `(handle, value)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.vec.iter().map(|(idx, v)| (H::from_usize(idx), v))
    }
}

impl<H: Handle, T> Default for DataMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for DataMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no value found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DataMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no value found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DataMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}


#[cfg(test)]
mod tests {
    use crate::handle::{Handle, FaceHandle};
    use super::*;

    #[test]
    fn set_replaces_and_remove_clears() {
        let mut map = DataMap::new();
        let f = FaceHandle::new(4);

        assert_eq!(map.set(f, String::from("a")), None);
        assert_eq!(map.set(f, String::from("b")), Some(String::from("a")));
        assert_eq!(map.num_values(), 1);
        assert_eq!(map.remove(f), Some(String::from("b")));
        assert_eq!(map.remove(FaceHandle::new(1000)), None);
        assert!(!map.contains_handle(f));
    }
}
