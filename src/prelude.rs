//! Reexports of the most important types and traits of this library for
//! convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use halfmesh::prelude::*;
//! ```

pub use crate::{
    build::{Conversion, ConvertError, ConvertOptions, Converter},
    handle::{FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
    map::{BoolMap, DataMap, DoubleMap, IntMap},
    mesh::{Config, FaceStatus, HalfEdgeMesh, Mesh2D, Mesh3D, MeshView, OmitPrev, StorePrev},
    source::{Coord2Source, Coord3Source, EdgeSource, FaceSource},
    winding::{Winding, WindingProvider},
};
