//! Attribute side tables: data associated with mesh elements.
//!
//! A mesh only stores connectivity. Everything else (positions, flags,
//! original input indices, user data, …) lives in side tables that map
//! element handles to values. All side tables in this module use the handle
//! ID directly as index into a contiguous buffer: this is fast, and works
//! because mesh elements get sequential IDs that are never reused.
//!
//! There are two kinds of tables:
//!
//! - [`ValueMap`] stores `Copy + Default` values in a plain vector. Reading a
//!   handle that was never written returns `T::default()`. The aliases
//!   [`BoolMap`], [`IntMap`] and [`DoubleMap`] are the usual instantiations.
//! - [`DataMap`] stores arbitrary values. Reading a handle that was never
//!   written returns `None`.
//!
//! Both grow automatically on write. To fill or read a table for all live
//! elements of a mesh, pass the mesh to `set_all` or `stream`; this works with
//! everything implementing [`Elements`].

use crate::handle::Handle;


mod data;
mod value;

pub use self::{
    data::DataMap,
    value::ValueMap,
};


/// A side table storing a `bool` per element.
pub type BoolMap<H> = ValueMap<H, bool>;

/// A side table storing an `i32` per element.
pub type IntMap<H> = ValueMap<H, i32>;

/// A side table storing an `f64` per element.
pub type DoubleMap<H> = ValueMap<H, f64>;


/// Something that has a set of live elements of category `H`.
///
/// This is implemented by all mesh types for vertex, half edge and face
/// handles. The handles are always yielded in ID order.
pub trait Elements<H: Handle> {
    /// Returns an iterator over all live elements.
    fn element_handles(&self) -> Box<dyn Iterator<Item = H> + '_>;
}
