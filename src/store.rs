//! Tombstoned element storage.

use std::{fmt, marker::PhantomData};

use stable_vec::StableVec;

use crate::handle::{hsize, Handle, DISCARDED_ID};


/// One stored element plus the ID it was created with. Discarding an element
/// overwrites `id` with `DISCARDED_ID`, but keeps the record around until the
/// store is trimmed.
#[derive(Clone)]
struct Record<T> {
    id: hsize,
    data: T,
}

/// Dense, ID-indexed storage for one category of mesh elements.
///
/// Handles handed out by `push` are sequential and never reused. Elements are
/// not removed when discarded: they are marked with a sentinel ID and stay in
/// memory (so that misuse can be reported properly) until `trim` is called.
#[derive(Clone)]
pub(crate) struct ElementStore<H: Handle, T> {
    vec: StableVec<Record<T>>,

    /// ID of the next element. We don't use `StableVec::push` so that IDs of
    /// trimmed elements at the end are not handed out again.
    next_id: hsize,

    /// Number of live (not discarded) elements.
    num_live: hsize,

    /// IDs of discarded records that are still stored.
    tombstones: Vec<hsize>,

    _dummy: PhantomData<H>,
}

/// State of a slot in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Live,
    Discarded,
    Missing,
}

impl<H: Handle, T> ElementStore<H, T> {
    pub(crate) fn new() -> Self {
        Self {
            vec: StableVec::new(),
            next_id: 0,
            num_live: 0,
            tombstones: Vec::new(),
            _dummy: PhantomData,
        }
    }

    pub(crate) fn push(&mut self, data: T) -> H {
        let id = self.next_id;
        assert!(id < DISCARDED_ID, "too many elements for handle size");
        self.next_id += 1;
        self.num_live += 1;

        let idx = id as usize;
        self.vec.reserve_for(idx);
        self.vec.insert(idx, Record { id, data });
        H::new(id)
    }

    pub(crate) fn slot(&self, handle: H) -> Slot {
        match self.vec.get(handle.to_usize()) {
            Some(r) if r.id == DISCARDED_ID => Slot::Discarded,
            Some(_) => Slot::Live,
            None if handle.idx() < self.next_id => Slot::Discarded,
            None => Slot::Missing,
        }
    }

    pub(crate) fn contains(&self, handle: H) -> bool {
        self.slot(handle) == Slot::Live
    }

    pub(crate) fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
            .filter(|r| r.id != DISCARDED_ID)
            .map(|r| &r.data)
    }

    pub(crate) fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
            .filter(|r| r.id != DISCARDED_ID)
            .map(|r| &mut r.data)
    }

    /// Marks the element as discarded. Returns `false` if it was not live.
    pub(crate) fn discard(&mut self, handle: H) -> bool {
        match self.vec.get_mut(handle.to_usize()) {
            Some(r) if r.id != DISCARDED_ID => {
                r.id = DISCARDED_ID;
                self.num_live -= 1;
                self.tombstones.push(handle.idx());
                true
            }
            _ => false,
        }
    }

    /// Physically removes all discarded records. Returns how many records
    /// were removed.
    pub(crate) fn trim(&mut self) -> usize {
        let count = self.tombstones.len();
        for id in self.tombstones.drain(..) {
            self.vec.remove(id as usize);
        }
        count
    }

    pub(crate) fn num_elements(&self) -> hsize {
        self.num_live
    }

    /// Upper bound (exclusive) of all IDs ever handed out.
    pub(crate) fn id_bound(&self) -> hsize {
        self.next_id
    }

    /// Iterates over the handles of all live elements, in ID order.
    pub(crate) fn handles(&self) -> impl Iterator<Item = H> + '_ {
        self.vec.iter()
            .filter(|(_, r)| r.id != DISCARDED_ID)
            .map(|(idx, _)| H::from_usize(idx))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.vec.iter()
            .filter(|(_, r)| r.id != DISCARDED_ID)
            .map(|(idx, r)| (H::from_usize(idx), &r.data))
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for ElementStore<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
