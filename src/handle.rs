//! Handles to refer to mesh elements.
//!
//! A handle is a small `Copy` value that identifies one element of one
//! category (vertex, half edge or face) inside a mesh. Handle IDs are assigned
//! sequentially per category, starting at 0, and are never reused: once an
//! element was discarded, its ID stays dead for the lifetime of the mesh. This
//! is what makes it possible to index [side tables][crate::map] by handle ID.

use std::{fmt, hash::Hash};


/// The integer type used to store handle IDs.
///
/// By default this is `u32`. With the `large-handle` feature, it is `u64`.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// The integer type used to store handle IDs.
///
/// By default this is `u32`. With the `large-handle` feature, it is `u64`.
#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;

/// The ID a record carries once it was discarded. No live element ever has
/// this ID; it doubles as the `None` value of `Optioned` handle fields.
pub(crate) const DISCARDED_ID: hsize = hsize::max_value();


/// Types that are handles to mesh elements.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash {
    /// Creates a handle from the given ID.
    fn new(id: hsize) -> Self;

    /// Returns the ID of this handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from an `usize`.
    ///
    /// Panics if `raw` does not fit into `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(raw <= hsize::max_value() as usize, "handle index {} too large", raw);
        Self::new(raw as hsize)
    }

    /// Helper method to get the ID as a `usize` directly from an handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(id: hsize) -> Self {
                $name(id)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.idx())
            }
        }

        impl optional::Noned for $name {
            fn is_none(&self) -> bool {
                self.0 == DISCARDED_ID
            }
            fn get_none() -> Self {
                $name(DISCARDED_ID)
            }
        }

        impl optional::OptEq for $name {
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }
    };
}

make_handle_type! {
    /// A handle that is associated with a vertex.
    VertexHandle = "V";
}

make_handle_type! {
    /// A handle that is associated with a half edge. Half edges are the
    /// directed sides of an undirected edge.
    HalfEdgeHandle = "HE";
}

make_handle_type! {
    /// A handle that is associated with a face.
    FaceHandle = "F";
}

#[cfg(not(feature = "large-handle"))]
static_assertions::assert_eq_size!(VertexHandle, u32);
#[cfg(not(feature = "large-handle"))]
static_assertions::assert_eq_size!(optional::Optioned<HalfEdgeHandle>, u32);


#[cfg(test)]
mod tests {
    use optional::Optioned as Opt;
    use super::*;

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", VertexHandle::new(3)), "V3");
        assert_eq!(format!("{:?}", HalfEdgeHandle::new(17)), "HE17");
        assert_eq!(format!("{:?}", FaceHandle::from_usize(0)), "F0");
    }

    #[test]
    fn optioned_uses_sentinel() {
        let none: Opt<FaceHandle> = Opt::none();
        assert!(none.is_none());
        assert_eq!(none.into_option(), None);

        let some = Opt::some(FaceHandle::new(5));
        assert_eq!(some.into_option(), Some(FaceHandle::new(5)));
    }
}
