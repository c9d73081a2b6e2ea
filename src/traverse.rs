//! Detached, restartable views of rings in a mesh.
//!
//! The circulators of [`HalfEdgeMesh`] borrow the mesh, so the borrow checker
//! already rules out edits while they are alive. A [`Sequence`] instead only
//! remembers *what* to iterate over and can be kept around while the mesh is
//! edited. It records the [modification counter][HalfEdgeMesh::mod_count] at
//! creation; once the mesh was structurally modified, iterating it fails with
//! [`StaleTraversal`].
//!
//! ```
//! use halfmesh::{prelude::*, traverse::Sequence};
//!
//! let faces = vec![vec![0, 1, 2, 3]];
//! let mut mesh = Converter::new().convert_faces(&faces[..], None).unwrap().into_mesh();
//! let face = mesh.faces().next().unwrap();
//!
//! let edges = Sequence::face_edges(&mesh, face);
//! assert_eq!(edges.count(&mesh), Ok(4));
//!
//! let he = mesh.face_edge(face);
//! mesh.split_edge(he);
//! assert!(edges.iter(&mesh).is_err());
//! ```

use std::marker::PhantomData;

use failure::Fail;

use crate::{
    handle::{FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
    mesh::{BorderStarts, Config, HalfEdgeMesh, HalfEdgeRing},
};


/// The mesh was structurally modified after the sequence was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
#[fail(display = "mesh was modified (mod count {} -> {}) while a traversal was pending", expected, found)]
pub struct StaleTraversal {
    pub expected: u64,
    pub found: u64,
}

/// Where a sequence starts and how it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    FaceEdges(FaceHandle),
    Cycle(HalfEdgeHandle),
    Incoming(VertexHandle),
    Outgoing(VertexHandle),
    FaceBorders(FaceHandle),
}

/// Element types a [`Sequence`] can yield. Every ring is a ring of half
/// edges; this trait maps each half edge to the yielded element.
pub trait RingItem: Handle {
    #[doc(hidden)]
    fn from_half_edge<C: Config>(mesh: &HalfEdgeMesh<C>, he: HalfEdgeHandle) -> Self;
}

impl RingItem for HalfEdgeHandle {
    fn from_half_edge<C: Config>(_: &HalfEdgeMesh<C>, he: HalfEdgeHandle) -> Self {
        he
    }
}

impl RingItem for VertexHandle {
    fn from_half_edge<C: Config>(mesh: &HalfEdgeMesh<C>, he: HalfEdgeHandle) -> Self {
        mesh.head(he)
    }
}

impl RingItem for FaceHandle {
    fn from_half_edge<C: Config>(mesh: &HalfEdgeMesh<C>, he: HalfEdgeHandle) -> Self {
        mesh.face(mesh.opposite(he))
    }
}

/// A detached description of a ring of elements around a face or vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence<H: RingItem> {
    origin: Origin,
    mod_count: u64,
    _item: PhantomData<H>,
}

impl<H: RingItem> Sequence<H> {
    fn new<C: Config>(mesh: &HalfEdgeMesh<C>, origin: Origin) -> Self {
        Self {
            origin,
            mod_count: mesh.mod_count(),
            _item: PhantomData,
        }
    }

    /// Returns `true` if the mesh was structurally modified since this
    /// sequence was created.
    pub fn is_stale<C: Config>(&self, mesh: &HalfEdgeMesh<C>) -> bool {
        mesh.mod_count() != self.mod_count
    }

    /// Returns a fresh iterator over the elements of this sequence. Can be
    /// called any number of times as long as the mesh is not modified.
    pub fn iter<'a, C: Config>(
        &self,
        mesh: &'a HalfEdgeMesh<C>,
    ) -> Result<impl Iterator<Item = H> + 'a, StaleTraversal> {
        if self.is_stale(mesh) {
            return Err(StaleTraversal {
                expected: self.mod_count,
                found: mesh.mod_count(),
            });
        }

        let edges = match self.origin {
            Origin::FaceEdges(f) => RingEdges::Ring(mesh.face_edges(f)),
            Origin::Cycle(he) => RingEdges::Ring(mesh.cycle(he)),
            Origin::Incoming(v) => RingEdges::Ring(mesh.incoming_edges(v)),
            Origin::Outgoing(v) => RingEdges::Ring(mesh.outgoing_edges(v)),
            Origin::FaceBorders(f) => RingEdges::Borders(BorderStarts::new(mesh, f)),
        };

        Ok(edges.map(move |he| H::from_half_edge(mesh, he)))
    }

    /// Counts the elements of this sequence.
    pub fn count<C: Config>(&self, mesh: &HalfEdgeMesh<C>) -> Result<usize, StaleTraversal> {
        self.iter(mesh).map(|it| it.count())
    }

    /// Collects the elements of this sequence.
    pub fn to_vec<C: Config>(&self, mesh: &HalfEdgeMesh<C>) -> Result<Vec<H>, StaleTraversal> {
        self.iter(mesh).map(|it| it.collect())
    }
}

impl Sequence<HalfEdgeHandle> {
    /// The half edges bordering `face`.
    pub fn face_edges<C: Config>(mesh: &HalfEdgeMesh<C>, face: FaceHandle) -> Self {
        mesh.face_edge(face);
        Self::new(mesh, Origin::FaceEdges(face))
    }

    /// The loop of half edges starting at `he`.
    pub fn cycle<C: Config>(mesh: &HalfEdgeMesh<C>, he: HalfEdgeHandle) -> Self {
        mesh.head(he);
        Self::new(mesh, Origin::Cycle(he))
    }

    /// The half edges pointing to `vertex`.
    pub fn incoming_edges<C: Config>(mesh: &HalfEdgeMesh<C>, vertex: VertexHandle) -> Self {
        mesh.vertex_edge(vertex);
        Self::new(mesh, Origin::Incoming(vertex))
    }

    /// The half edges starting at `vertex`.
    pub fn outgoing_edges<C: Config>(mesh: &HalfEdgeMesh<C>, vertex: VertexHandle) -> Self {
        mesh.vertex_edge(vertex);
        Self::new(mesh, Origin::Outgoing(vertex))
    }
}

impl Sequence<VertexHandle> {
    /// The vertices of the boundary of `face`.
    pub fn face_vertices<C: Config>(mesh: &HalfEdgeMesh<C>, face: FaceHandle) -> Self {
        mesh.face_edge(face);
        Self::new(mesh, Origin::FaceEdges(face))
    }

    /// The vertices connected to `vertex` by an edge.
    pub fn vertex_neighbors<C: Config>(mesh: &HalfEdgeMesh<C>, vertex: VertexHandle) -> Self {
        mesh.vertex_edge(vertex);
        Self::new(mesh, Origin::Outgoing(vertex))
    }
}

impl Sequence<FaceHandle> {
    /// The faces sharing a border with `face`, once per contiguous border.
    pub fn face_neighbors<C: Config>(mesh: &HalfEdgeMesh<C>, face: FaceHandle) -> Self {
        mesh.face_edge(face);
        Self::new(mesh, Origin::FaceBorders(face))
    }
}

/// The half edges underlying a sequence.
enum RingEdges<'a, C: Config> {
    Ring(HalfEdgeRing<'a, C>),
    Borders(BorderStarts<'a, C>),
}

impl<C: Config> Iterator for RingEdges<'_, C> {
    type Item = HalfEdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RingEdges::Ring(it) => it.next(),
            RingEdges::Borders(it) => it.next(),
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::build::Converter;
    use super::*;

    fn quad_and_triangle() -> HalfEdgeMesh {
        let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
        Converter::new().convert_faces(&faces[..], None).unwrap().into_mesh()
    }

    #[test]
    fn restartable() {
        let mesh = quad_and_triangle();
        let v = mesh.vertices().next().unwrap();
        let seq = Sequence::vertex_neighbors(&mesh, v);

        let first = seq.to_vec(&mesh).unwrap();
        let second = seq.to_vec(&mesh).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), mesh.degree(v));
    }

    #[test]
    fn stale_after_edit() {
        let mut mesh = quad_and_triangle();
        let f = mesh.faces().next().unwrap();
        let seq = Sequence::face_neighbors(&mesh, f);
        assert!(seq.count(&mesh).is_ok());

        let he = mesh.face_edge(f);
        mesh.split_edge(he);
        let err = seq.count(&mesh).unwrap_err();
        assert_eq!(err.expected + 1, err.found);
        assert!(seq.is_stale(&mesh));
    }

    #[test]
    fn failed_edit_keeps_sequence_fresh() {
        let mut mesh = quad_and_triangle();
        let f = mesh.faces().next().unwrap();
        let seq = Sequence::face_edges(&mesh, f);

        assert!(!mesh.merge_faces(f, f));
        assert_eq!(seq.count(&mesh), Ok(mesh.face_edges(f).count()));
    }
}
