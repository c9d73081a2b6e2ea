//! Circulators and all kinds of neighborhood queries.

use crate::handle::{FaceHandle, HalfEdgeHandle, VertexHandle};
use super::{Config, HalfEdgeMesh};


// ===============================================================================================
// ===== Circulators
// ===============================================================================================

/// How a [`HalfEdgeRing`] advances from one half edge to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// `next`: around a face.
    Next,
    /// `next.opposite`: around the head vertex, yielding incoming edges.
    NextIncoming,
    /// `opposite.next`: around the tail vertex, yielding outgoing edges.
    NextOutgoing,
}

/// An iterator that circulates around a face or a vertex, yielding half
/// edges until the start half edge is reached again.
///
/// The ring also ends early if a link is missing, which can only happen while
/// the builder is running.
#[derive(Debug)]
pub struct HalfEdgeRing<'a, C: Config> {
    mesh: &'a HalfEdgeMesh<C>,
    start_he: HalfEdgeHandle,
    current_he: Option<HalfEdgeHandle>,
    step: Step,
}

impl<'a, C: Config> HalfEdgeRing<'a, C> {
    pub(crate) fn new(mesh: &'a HalfEdgeMesh<C>, start_he: HalfEdgeHandle, step: Step) -> Self {
        Self {
            mesh,
            start_he,
            current_he: Some(start_he),
            step,
        }
    }
}

impl<C: Config> Iterator for HalfEdgeRing<'_, C> {
    type Item = HalfEdgeHandle;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current_he?;
        let mesh = self.mesh;

        let next = match self.step {
            Step::Next => mesh.next_opt(out),
            Step::NextIncoming => mesh.next_opt(out).and_then(|he| mesh.opposite_opt(he)),
            Step::NextOutgoing => mesh.opposite_opt(out).and_then(|he| mesh.next_opt(he)),
        };

        // If we reached the start edge again, we are done.
        self.current_he = next.filter(|&he| he != self.start_he);
        Some(out)
    }
}

/// Iterates over the first half edge of each border a face shares with a
/// neighboring face. Each contiguous border is visited once.
#[derive(Debug)]
pub(crate) struct BorderStarts<'a, C: Config> {
    mesh: &'a HalfEdgeMesh<C>,
    origin: HalfEdgeHandle,
    current: Option<HalfEdgeHandle>,
}

impl<'a, C: Config> BorderStarts<'a, C> {
    pub(crate) fn new(mesh: &'a HalfEdgeMesh<C>, face: FaceHandle) -> Self {
        let origin = first_in_next_border(mesh, mesh.face_edge(face));
        Self { mesh, origin, current: Some(origin) }
    }
}

/// Returns the first half edge after `he` whose opposite face differs from
/// the opposite face of `he`. Returns `he` if there is none.
fn first_in_next_border<C: Config>(mesh: &HalfEdgeMesh<C>, he: HalfEdgeHandle) -> HalfEdgeHandle {
    let outside = mesh.face_opt(mesh.opposite(he));
    mesh.next_matching(he, |e| mesh.face_opt(mesh.opposite(e)) != outside)
        .unwrap_or(he)
}

impl<C: Config> Iterator for BorderStarts<'_, C> {
    type Item = HalfEdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        let next = first_in_next_border(self.mesh, out);
        self.current = Some(next).filter(|&he| he != self.origin);
        Some(out)
    }
}


// ===============================================================================================
// ===== Neighborhood queries
// ===============================================================================================

impl<C: Config> HalfEdgeMesh<C> {
    /// The half edges bordering `face`, in `next` order.
    pub fn face_edges(&self, face: FaceHandle) -> HalfEdgeRing<'_, C> {
        HalfEdgeRing::new(self, self.face_edge(face), Step::Next)
    }

    /// The head vertices of the half edges bordering `face`.
    pub fn face_vertices(&self, face: FaceHandle) -> impl Iterator<Item = VertexHandle> + '_ {
        self.face_edges(face).map(move |he| self.head(he))
    }

    /// The loop of half edges starting at `he`, in `next` order.
    pub fn cycle(&self, he: HalfEdgeHandle) -> HalfEdgeRing<'_, C> {
        self.he_rec(he);
        HalfEdgeRing::new(self, he, Step::Next)
    }

    /// The half edges pointing to `vertex`.
    pub fn incoming_edges(&self, vertex: VertexHandle) -> HalfEdgeRing<'_, C> {
        HalfEdgeRing::new(self, self.vertex_edge(vertex), Step::NextIncoming)
    }

    /// The half edges starting at `vertex`.
    pub fn outgoing_edges(&self, vertex: VertexHandle) -> HalfEdgeRing<'_, C> {
        let start = self.opposite(self.vertex_edge(vertex));
        HalfEdgeRing::new(self, start, Step::NextOutgoing)
    }

    /// The vertices connected to `vertex` by an edge.
    pub fn vertex_neighbors(&self, vertex: VertexHandle) -> impl Iterator<Item = VertexHandle> + '_ {
        self.outgoing_edges(vertex).map(move |he| self.head(he))
    }

    /// The faces sharing a border with `face`. A neighbor is yielded once per
    /// contiguous shared border.
    pub fn face_neighbors(&self, face: FaceHandle) -> impl Iterator<Item = FaceHandle> + '_ {
        BorderStarts::new(self, face).map(move |he| self.face(self.opposite(he)))
    }
}
