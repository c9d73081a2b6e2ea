//! Everything related to the [`HalfEdgeMesh`].

// # Some notes for developers about this implementation
//
// - Unlike in many half edge implementations, twins are linked explicitly via
//   the `opposite` field: the edit operations relink twins, so they cannot be
//   derived from handle IDs.
// - The `edge` of a vertex is an *incoming* half edge (its head is the
//   vertex). Circulating around a vertex is `next.opposite` for incoming and
//   `opposite.next` for outgoing half edges.
// - While the builder is running, `next`, `opposite` and `face` can be
//   missing. All public queries assume a finished mesh and panic on missing
//   links; the builder uses the `*_opt` variants.

use std::fmt;

use derive_more::Display;
use optional::Optioned as Opt;

use crate::{
    handle::{hsize, FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
    map::Elements,
    store::{ElementStore, Slot},
};

mod adj;
mod check;
mod config;
mod coords;
mod edit;
#[cfg(test)]
mod tests;

pub use self::{
    adj::HalfEdgeRing,
    config::{Config, FieldStorage, OmitField, OmitPrev, OptionalField, StoreField, StorePrev},
    coords::{Mesh2D, Mesh3D},
};
pub(crate) use self::adj::BorderStarts;



// ===============================================================================================
// ===== Definition of types stored inside the data structure
// ===============================================================================================

/// What a face represents.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum FaceStatus {
    /// The face was part of the input.
    #[display(fmt = "interior")]
    Interior,

    /// The face was synthesized by the builder: it is the outer rim of the
    /// mesh or the rim of a hole.
    #[display(fmt = "boundary")]
    Boundary,

    /// The builder could not classify the face (edge input carries no
    /// orientation ground truth).
    #[display(fmt = "unknown")]
    Unknown,
}

/// A polygon mesh stored as half edges.
///
/// Every undirected edge is stored as two half edges (twins) pointing in
/// opposite directions. Each half edge has a head vertex, an owning face, a
/// `next` half edge (walking the boundary of the face) and its `opposite`.
/// Optionally, a `prev` handle is stored as well (see [`Config`]).
///
/// Meshes are created by the [builder][crate::build] and modified in place by
/// the edit operations. Discarded elements stay in memory (so misuse can be
/// reported) until [`trim`][HalfEdgeMesh::trim] is called.
pub struct HalfEdgeMesh<C: Config = OmitPrev> {
    vertices: ElementStore<VertexHandle, Vertex>,
    half_edges: ElementStore<HalfEdgeHandle, HalfEdge<C>>,
    faces: ElementStore<FaceHandle, Face>,
    mod_count: u64,
}

/// Data stored per vertex.
#[derive(Clone, Copy)]
pub(crate) struct Vertex {
    /// Handle of one incoming half edge. Only `None` while the builder is
    /// still running.
    edge: Opt<HalfEdgeHandle>,
}

/// Data stored per face.
#[derive(Clone, Copy)]
pub(crate) struct Face {
    /// Handle of one (arbitrary) half edge bordering the face.
    edge: HalfEdgeHandle,
    status: FaceStatus,
}

/// Data stored per half edge.
pub(crate) struct HalfEdge<C: Config> {
    /// The vertex this half edge points to.
    head: VertexHandle,

    /// The face this half edge borders.
    face: Opt<FaceHandle>,

    /// The next half edge around the face.
    next: Opt<HalfEdgeHandle>,

    /// The twin half edge.
    opposite: Opt<HalfEdgeHandle>,

    /// The previous half edge around the face. This is only stored when the
    /// configuration `C` says so.
    prev: <C::PrevEdge as OptionalField>::Storage<Opt<HalfEdgeHandle>>,
}

impl<C: Config> Copy for HalfEdge<C> {}
impl<C: Config> Clone for HalfEdge<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Config> fmt::Debug for HalfEdgeMesh<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HalfEdgeMesh")
            .field("vertices", &self.vertices)
            .field("faces", &self.faces)
            .field("half_edges", &self.half_edges)
            .field("mod_count", &self.mod_count)
            .finish()
    }
}

impl<C: Config> Clone for HalfEdgeMesh<C> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            half_edges: self.half_edges.clone(),
            faces: self.faces.clone(),
            mod_count: self.mod_count,
        }
    }
}

impl<C: Config> Default for HalfEdgeMesh<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vertex {{ edge: {:?} }}", self.edge.into_option())
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ edge: {:?}, status: {} }}", self.edge, self.status)
    }
}

impl<C: Config> fmt::Debug for HalfEdge<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prev = self.prev.stored()
            .and_then(|prev| prev.into_option())
            .map(|prev| format!(" prev: {:6}", format!("{:?},", prev)))
            .unwrap_or_default();
        write!(
            f,
            "HalfEdge {{ head: {:5} next: {:6} opposite: {:6}{} face: {:?} }}",
            format!("{:?},", self.head),
            format!("{:?},", self.next.into_option()),
            format!("{:?},", self.opposite.into_option()),
            prev,
            self.face.into_option(),
        )
    }
}


// ===============================================================================================
// ===== Internal helper methods
// ===============================================================================================

/// Returns the record of the given handle or panics with a message naming the
/// handle.
fn checked<H: Handle, T>(store: &ElementStore<H, T>, handle: H) -> &T {
    match store.get(handle) {
        Some(record) => record,
        None => invalid_handle(handle, store.slot(handle)),
    }
}

fn checked_mut<H: Handle, T>(store: &mut ElementStore<H, T>, handle: H) -> &mut T {
    let slot = store.slot(handle);
    match store.get_mut(handle) {
        Some(record) => record,
        None => invalid_handle(handle, slot),
    }
}

#[cold]
fn invalid_handle<H: Handle>(handle: H, slot: Slot) -> ! {
    match slot {
        Slot::Discarded => panic!(
            "{:?} was passed to a half edge mesh, but it has been discarded",
            handle,
        ),
        _ => panic!(
            "{:?} was passed to a half edge mesh, but it does not exist in this mesh",
            handle,
        ),
    }
}

impl<C: Config> HalfEdgeMesh<C> {
    fn vertex_rec(&self, vh: VertexHandle) -> &Vertex {
        checked(&self.vertices, vh)
    }

    fn vertex_rec_mut(&mut self, vh: VertexHandle) -> &mut Vertex {
        checked_mut(&mut self.vertices, vh)
    }

    fn he_rec(&self, he: HalfEdgeHandle) -> &HalfEdge<C> {
        checked(&self.half_edges, he)
    }

    fn he_rec_mut(&mut self, he: HalfEdgeHandle) -> &mut HalfEdge<C> {
        checked_mut(&mut self.half_edges, he)
    }

    fn face_rec(&self, fh: FaceHandle) -> &Face {
        checked(&self.faces, fh)
    }

    fn face_rec_mut(&mut self, fh: FaceHandle) -> &mut Face {
        checked_mut(&mut self.faces, fh)
    }

    /// Marks the mesh as structurally modified. Every outstanding
    /// [`Sequence`][crate::traverse::Sequence] is stale afterwards.
    fn touch(&mut self) {
        self.mod_count += 1;
    }

    /// Tries to find a half edge pointing towards `start_edge.head` that
    /// satisfies the given predicate, circulating with `next.opposite`.
    /// Returns `None` if none is found or if the ring is still open.
    fn find_incoming_he(
        &self,
        start_edge: HalfEdgeHandle,
        mut predicate: impl FnMut(HalfEdgeHandle) -> bool,
    ) -> Option<HalfEdgeHandle> {
        let mut incoming = start_edge;
        loop {
            if predicate(incoming) {
                return Some(incoming);
            }

            let next = self.next_opt(incoming).and_then(|next| self.opposite_opt(next))?;
            if next == start_edge {
                return None;
            }

            incoming = next;
        }
    }
}


// ===============================================================================================
// ===== Primitives used by the builder and the edit operations
// ===============================================================================================

impl<C: Config> HalfEdgeMesh<C> {
    pub(crate) fn add_vertex(&mut self) -> VertexHandle {
        self.vertices.push(Vertex { edge: Opt::none() })
    }

    /// Adds a half edge pointing to `head`. All links are still missing.
    pub(crate) fn add_half_edge(&mut self, head: VertexHandle) -> HalfEdgeHandle {
        self.vertex_rec(head);
        self.half_edges.push(HalfEdge {
            head,
            face: Opt::none(),
            next: Opt::none(),
            opposite: Opt::none(),
            prev: From::from(Opt::none()),
        })
    }

    /// Adds a face bordered by the loop starting at `edge` and sets the face
    /// of every half edge in that loop.
    pub(crate) fn add_face(&mut self, edge: HalfEdgeHandle, status: FaceStatus) -> FaceHandle {
        let fh = self.faces.push(Face { edge, status });
        let mut he = edge;
        loop {
            self.set_face(he, fh);
            match self.next_opt(he) {
                Some(next) if next != edge => he = next,
                _ => break,
            }
        }
        fh
    }

    /// Sets `next` of `he` (and `prev` of `next`, if stored).
    ///
    /// Panics if `next` is the twin of `he`: that would create a face with
    /// zero width.
    pub(crate) fn link(&mut self, he: HalfEdgeHandle, next: HalfEdgeHandle) {
        if self.opposite_opt(he) == Some(next) {
            panic!("cannot link {:?} to its own opposite {:?}", he, next);
        }

        self.he_rec_mut(he).next = Opt::some(next);
        self.he_rec_mut(next).prev = From::from(Opt::some(he));
    }

    pub(crate) fn link_opposites(&mut self, a: HalfEdgeHandle, b: HalfEdgeHandle) {
        self.he_rec_mut(a).opposite = Opt::some(b);
        self.he_rec_mut(b).opposite = Opt::some(a);
    }

    pub(crate) fn set_head(&mut self, he: HalfEdgeHandle, head: VertexHandle) {
        self.vertex_rec(head);
        self.he_rec_mut(he).head = head;
    }

    pub(crate) fn set_face(&mut self, he: HalfEdgeHandle, face: FaceHandle) {
        self.he_rec_mut(he).face = Opt::some(face);
    }

    pub(crate) fn set_vertex_edge(&mut self, vh: VertexHandle, he: HalfEdgeHandle) {
        self.vertex_rec_mut(vh).edge = Opt::some(he);
    }

    pub(crate) fn set_vertex_edge_if_absent(&mut self, vh: VertexHandle, he: HalfEdgeHandle) {
        let v = self.vertex_rec_mut(vh);
        if v.edge.is_none() {
            v.edge = Opt::some(he);
        }
    }

    pub(crate) fn set_face_edge(&mut self, fh: FaceHandle, he: HalfEdgeHandle) {
        self.face_rec_mut(fh).edge = he;
    }

    pub(crate) fn discard_vertex(&mut self, vh: VertexHandle) {
        self.vertices.discard(vh);
    }

    pub(crate) fn discard_half_edge(&mut self, he: HalfEdgeHandle) {
        self.half_edges.discard(he);
    }

    pub(crate) fn discard_face(&mut self, fh: FaceHandle) {
        self.faces.discard(fh);
    }

    pub(crate) fn next_opt(&self, he: HalfEdgeHandle) -> Option<HalfEdgeHandle> {
        self.he_rec(he).next.into_option()
    }

    pub(crate) fn opposite_opt(&self, he: HalfEdgeHandle) -> Option<HalfEdgeHandle> {
        self.he_rec(he).opposite.into_option()
    }

    pub(crate) fn face_opt(&self, he: HalfEdgeHandle) -> Option<FaceHandle> {
        self.he_rec(he).face.into_option()
    }

    pub(crate) fn vertex_edge_opt(&self, vh: VertexHandle) -> Option<HalfEdgeHandle> {
        self.vertex_rec(vh).edge.into_option()
    }
}


// ===============================================================================================
// ===== Public queries
// ===============================================================================================

impl<C: Config> HalfEdgeMesh<C> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: ElementStore::new(),
            half_edges: ElementStore::new(),
            faces: ElementStore::new(),
            mod_count: 0,
        }
    }

    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    pub fn num_half_edges(&self) -> hsize {
        self.half_edges.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    /// Returns an iterator over all live vertices, in ID order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles()
    }

    /// Returns an iterator over all live half edges, in ID order.
    pub fn half_edges(&self) -> impl Iterator<Item = HalfEdgeHandle> + '_ {
        self.half_edges.handles()
    }

    /// Returns an iterator over all live faces, in ID order.
    pub fn faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles()
    }

    pub fn contains_vertex(&self, vh: VertexHandle) -> bool {
        self.vertices.contains(vh)
    }

    pub fn contains_half_edge(&self, he: HalfEdgeHandle) -> bool {
        self.half_edges.contains(he)
    }

    pub fn contains_face(&self, fh: FaceHandle) -> bool {
        self.faces.contains(fh)
    }

    /// Returns the modification counter. It is incremented by every operation
    /// that changes the structure of the mesh.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Physically removes all discarded elements from memory.
    ///
    /// Handles of live elements stay valid. Discarded handles are never
    /// handed out again.
    pub fn trim(&mut self) {
        self.touch();
        let removed = self.vertices.trim() + self.half_edges.trim() + self.faces.trim();
        log::trace!("trimmed {} discarded elements", removed);
    }

    /// The vertex the given half edge points to.
    pub fn head(&self, he: HalfEdgeHandle) -> VertexHandle {
        self.he_rec(he).head
    }

    /// The vertex the given half edge starts at (the head of its opposite).
    pub fn tail(&self, he: HalfEdgeHandle) -> VertexHandle {
        self.head(self.opposite(he))
    }

    /// The next half edge around the face of `he`.
    pub fn next(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        self.next_opt(he)
            .unwrap_or_else(|| panic!("{:?} is not linked to a next half edge", he))
    }

    /// The half edge whose `next` is `he`.
    ///
    /// If `prev` handles are stored (see [`Config`]), this is a simple lookup.
    /// Otherwise, the incoming half edges of the tail vertex are searched.
    pub fn previous(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        let stored = self.he_rec(he).prev.stored().and_then(|prev| prev.into_option());
        match stored {
            Some(prev) => prev,
            None => {
                let start = self.vertex_edge(self.tail(he));
                self.find_incoming_he(start, |incoming| self.next_opt(incoming) == Some(he))
                    .unwrap_or_else(|| panic!("bug: could not find the previous half edge of {:?}", he))
            }
        }
    }

    /// The twin of `he`: the half edge along the same edge, pointing the
    /// other way.
    pub fn opposite(&self, he: HalfEdgeHandle) -> HalfEdgeHandle {
        self.opposite_opt(he)
            .unwrap_or_else(|| panic!("{:?} has no opposite half edge", he))
    }

    /// The face bordered by `he`.
    pub fn face(&self, he: HalfEdgeHandle) -> FaceHandle {
        self.face_opt(he)
            .unwrap_or_else(|| panic!("{:?} does not border a face", he))
    }

    /// One half edge pointing to `vh`.
    pub fn vertex_edge(&self, vh: VertexHandle) -> HalfEdgeHandle {
        self.vertex_edge_opt(vh)
            .unwrap_or_else(|| panic!("{:?} has no incident half edge", vh))
    }

    /// One half edge bordering `fh`.
    pub fn face_edge(&self, fh: FaceHandle) -> HalfEdgeHandle {
        self.face_rec(fh).edge
    }

    pub fn face_status(&self, fh: FaceHandle) -> FaceStatus {
        self.face_rec(fh).status
    }

    /// The number of half edges pointing to `vh`.
    pub fn degree(&self, vh: VertexHandle) -> usize {
        self.incoming_edges(vh).count()
    }

    /// Returns the half edge going from `tail` to `head`, if these two
    /// vertices are connected.
    pub fn edge_between(&self, tail: VertexHandle, head: VertexHandle) -> Option<HalfEdgeHandle> {
        self.incoming_edges(head).find(|&he| self.tail(he) == tail)
    }

    /// Returns the first half edge of the face loop starting at `he` (`he`
    /// itself included) that satisfies `predicate`.
    pub fn next_matching(
        &self,
        he: HalfEdgeHandle,
        mut predicate: impl FnMut(HalfEdgeHandle) -> bool,
    ) -> Option<HalfEdgeHandle> {
        self.cycle(he).find(|&e| predicate(e))
    }

    pub fn are_neighbor_vertices(&self, a: VertexHandle, b: VertexHandle) -> bool {
        self.outgoing_edges(a).any(|he| self.head(he) == b)
    }

    pub fn are_neighbor_faces(&self, a: FaceHandle, b: FaceHandle) -> bool {
        self.face_edges(a).any(|he| self.face_opt(self.opposite(he)) == Some(b))
    }
}

impl<C: Config> Elements<VertexHandle> for HalfEdgeMesh<C> {
    fn element_handles(&self) -> Box<dyn Iterator<Item = VertexHandle> + '_> {
        Box::new(self.vertices())
    }
}

impl<C: Config> Elements<HalfEdgeHandle> for HalfEdgeMesh<C> {
    fn element_handles(&self) -> Box<dyn Iterator<Item = HalfEdgeHandle> + '_> {
        Box::new(self.half_edges())
    }
}

impl<C: Config> Elements<FaceHandle> for HalfEdgeMesh<C> {
    fn element_handles(&self) -> Box<dyn Iterator<Item = FaceHandle> + '_> {
        Box::new(self.faces())
    }
}


/// Types that contain a [`HalfEdgeMesh`]: the plain mesh and the variants
/// carrying vertex positions.
pub trait MeshView {
    type Config: Config;

    /// Returns the underlying half edge mesh.
    fn core(&self) -> &HalfEdgeMesh<Self::Config>;
}

impl<C: Config> MeshView for HalfEdgeMesh<C> {
    type Config = C;

    fn core(&self) -> &HalfEdgeMesh<C> {
        self
    }
}
