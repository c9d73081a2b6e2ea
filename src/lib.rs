//! Half edge meshes: building them from polygons or edges, and editing them.
//!
//! A [`HalfEdgeMesh`] stores the connectivity of a polygon mesh as vertices,
//! faces and half edges (two per undirected edge, pointing in opposite
//! directions). Meshes are built with a [`Converter`][build::Converter] from
//! a list of polygons or a list of undirected edges plus a way to tell the
//! [winding][winding::Winding] of vertex sequences. After that, they can be
//! edited in place (split/merge faces, split/collapse edges, remove
//! vertices).
//!
//! Elements are referred to by handles ([`VertexHandle`], [`HalfEdgeHandle`],
//! [`FaceHandle`]). Data associated with elements lives in side tables (see
//! [`map`]), indexed by handle.
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! let faces = vec![vec![0, 1, 2, 3]];
//! let mut mesh = Converter::new().convert_faces(&faces[..], None).unwrap().into_mesh();
//! assert_eq!(mesh.num_faces(), 2); // the quad and the outer boundary
//!
//! let quad = mesh.faces().find(|&f| mesh.face_status(f) == FaceStatus::Interior).unwrap();
//! let vertices = mesh.face_vertices(quad).collect::<Vec<_>>();
//! let new_face = mesh.split_face(quad, vertices[0], vertices[2]);
//! assert!(new_face.is_some());
//! assert_eq!(mesh.num_faces(), 3);
//! ```

pub mod build;
pub mod handle;
pub mod map;
pub mod mesh;
pub mod prelude;
pub mod source;
mod store;
pub mod traverse;
pub mod walk;
pub mod winding;

pub use cgmath;

pub use self::{
    handle::{hsize, FaceHandle, HalfEdgeHandle, VertexHandle},
    mesh::{FaceStatus, HalfEdgeMesh, Mesh2D, Mesh3D},
};


mod sealed {
    pub trait Sealed {}
}
