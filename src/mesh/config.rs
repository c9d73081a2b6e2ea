//! Whether half edges store a `prev` link.
//!
//! `previous` can always be answered by walking the incoming half edges of
//! the tail vertex. Storing the link makes it a lookup and costs one handle
//! per half edge. The choice is made once, through the mesh's type
//! parameter, so both layouts share all of the mesh code.

use std::{fmt, marker::PhantomData};

use crate::sealed::Sealed;


/// Selects the half edge layout of a [`HalfEdgeMesh`][super::HalfEdgeMesh]:
/// either [`OmitPrev`] (the default) or [`StorePrev`].
pub trait Config: Sealed + 'static {
    /// [`StoreField`] or [`OmitField`] for the `prev` link.
    type PrevEdge: OptionalField;
}

/// Half edges store `next` and `opposite` only.
#[allow(missing_debug_implementations)]
pub enum OmitPrev {}
impl Sealed for OmitPrev {}
impl Config for OmitPrev {
    type PrevEdge = OmitField;
}

/// Half edges additionally store `prev`. [`Converter`][crate::build::Converter]
/// sets these links for the whole mesh when it is done; edit operations keep
/// them up to date.
#[allow(missing_debug_implementations)]
pub enum StorePrev {}
impl Sealed for StorePrev {}
impl Config for StorePrev {
    type PrevEdge = StoreField;
}


/// Storage of the `prev` link: a real field or a zero sized placeholder.
pub trait OptionalField: Sealed {
    #[doc(hidden)]
    type Storage<T: fmt::Debug + Copy>: FieldStorage<T>;
}

/// The link is kept.
#[allow(missing_debug_implementations)]
pub enum StoreField {}
impl Sealed for StoreField {}
impl OptionalField for StoreField {
    type Storage<T: fmt::Debug + Copy> = StoredField<T>;
}

/// The link is dropped on write and reads as absent.
#[allow(missing_debug_implementations)]
pub enum OmitField {}
impl Sealed for OmitField {}
impl OptionalField for OmitField {
    type Storage<T: fmt::Debug + Copy> = OmittedField<T>;
}

#[doc(hidden)]
pub trait FieldStorage<T>: From<T> + fmt::Debug + Copy {
    /// The stored value, or `None` for the placeholder. Known at compile
    /// time, so callers branching on it cost nothing.
    fn stored(self) -> Option<T>;
}

#[doc(hidden)]
#[derive(Clone, Copy, Debug)]
pub struct StoredField<T>(T);

impl<T: Copy + fmt::Debug> FieldStorage<T> for StoredField<T> {
    #[inline(always)]
    fn stored(self) -> Option<T> {
        Some(self.0)
    }
}

impl<T> From<T> for StoredField<T> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[doc(hidden)]
#[derive(Clone, Copy, Debug)]
pub struct OmittedField<T>(PhantomData<T>);

impl<T: Copy + fmt::Debug> FieldStorage<T> for OmittedField<T> {
    #[inline(always)]
    fn stored(self) -> Option<T> {
        None
    }
}

impl<T> From<T> for OmittedField<T> {
    #[inline(always)]
    fn from(_: T) -> Self {
        Self(PhantomData)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_prev_is_never_read() {
        let stored: <StoreField as OptionalField>::Storage<u32> = From::from(7);
        let omitted: <OmitField as OptionalField>::Storage<u32> = From::from(7);
        assert_eq!(stored.stored(), Some(7));
        assert_eq!(omitted.stored(), None);
        assert_eq!(std::mem::size_of_val(&omitted), 0);
    }
}
