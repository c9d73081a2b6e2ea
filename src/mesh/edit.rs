//! Operations that change the topology of a mesh in place.
//!
//! Each operation first checks its preconditions. If they are not met, it
//! returns `None`/`false` without touching the mesh. Otherwise it mutates the
//! mesh, keeping all invariants, and increments the modification counter.

use smallvec::SmallVec;

use crate::handle::{FaceHandle, HalfEdgeHandle, VertexHandle};
use super::{
    adj::{HalfEdgeRing, Step},
    Config, HalfEdgeMesh,
};


impl<C: Config> HalfEdgeMesh<C> {
    /// Splits `face` into two faces by connecting the two given vertices of
    /// its boundary with a new edge.
    ///
    /// Returns the new face or `None` if one of the vertices is not on the
    /// boundary of `face`, if both are the same or if they are already
    /// adjacent along the boundary. Both faces keep the status of `face`.
    ///
    /// ```text
    ///      v1 ---- o             v1 ---- o
    ///      |       |             | ⟍     |
    ///      |   F   |     =>      |   ⟍ N |
    ///      |       |             | F   ⟍ |
    ///      o ---- v2             o ---- v2
    /// ```
    pub fn split_face(
        &mut self,
        face: FaceHandle,
        v1: VertexHandle,
        v2: VertexHandle,
    ) -> Option<FaceHandle> {
        self.face_rec(face);
        self.vertex_rec(v1);
        self.vertex_rec(v2);

        let edge1 = self.face_edges(face).find(|&he| self.head(he) == v1)?;
        let edge2 = self.face_edges(face).find(|&he| self.head(he) == v2)?;
        if edge1 == edge2 || self.next(edge1) == edge2 || self.next(edge2) == edge1 {
            return None;
        }

        self.touch();
        let edge1_next = self.next(edge1);
        let edge2_next = self.next(edge2);

        // The two half edges of the cut.
        let to_v2 = self.add_half_edge(v2);
        let to_v1 = self.add_half_edge(v1);
        self.link_opposites(to_v1, to_v2);

        self.link(edge1, to_v2);
        self.link(to_v2, edge2_next);
        self.link(edge2, to_v1);
        self.link(to_v1, edge1_next);

        // The old face keeps the loop its edge is in, the other loop gets the
        // new face.
        let status = self.face_status(face);
        let new_face = if self.face_edges(face).any(|he| he == to_v1) {
            self.set_face(to_v1, face);
            self.add_face(to_v2, status)
        } else {
            self.set_face(to_v2, face);
            self.add_face(to_v1, status)
        };

        Some(new_face)
    }

    /// Merges `face2` into `face1` by removing their common border.
    ///
    /// The half edges of the border and the vertices strictly inside it are
    /// discarded, as is `face2`. Returns `false` (and does nothing) if the
    /// faces are the same, share no border, share the entire boundary of
    /// `face1` or share more than one contiguous border.
    ///
    /// A vertex where `face1` passes once and `face2` twice is only detected
    /// when it splits the border as seen from `face2`.
    pub fn merge_faces(&mut self, face1: FaceHandle, face2: FaceHandle) -> bool {
        self.face_rec(face1);
        self.face_rec(face2);
        if face1 == face2 {
            return false;
        }

        let outside_is = |mesh: &Self, he: HalfEdgeHandle, face: FaceHandle| {
            mesh.face_opt(mesh.opposite(he)) == Some(face)
        };

        // The last half edge of the border, as seen from `face1`. It does not
        // exist if the border covers the whole loop.
        let border1_last = self.face_edges(face1)
            .find(|&he| outside_is(self, he, face2))
            .and_then(|first| {
                self.next_matching(first, |he| !outside_is(self, self.next(he), face2))
            });
        let border1_last = match border1_last {
            Some(he) => he,
            None => return false,
        };

        // First half edge after the border, last one before it and first one
        // on it.
        let border1_next = self.next(border1_last);
        let border1_prev = self.next_matching(border1_next, |he| {
            outside_is(self, self.next(he), face2)
        });
        let border1_prev = match border1_prev {
            Some(he) => he,
            None => panic!("bug: invalid border between {:?} and {:?}", face1, face2),
        };
        let border1_first = self.next(border1_prev);

        // The faces can share several borders. Walking from the first half
        // edge of this border has to end at its last one.
        let end = self.next_matching(border1_first, |he| !outside_is(self, self.next(he), face2));
        if end != Some(border1_last) {
            return false;
        }

        // The border is contiguous around `face1`, but it might not be around
        // `face2` (a vertex visited once by `face1` and twice by `face2`).
        let border2_first = self.opposite(border1_last);
        let border2_last = self.next_matching(border2_first, |he| {
            !outside_is(self, self.next(he), face1)
        });
        let border2_last = match border2_last {
            Some(he) if self.opposite(he) == border1_first => he,
            _ => return false,
        };

        self.touch();
        let extremity1 = self.head(border1_prev);
        let extremity2 = self.head(border1_last);
        let border2_next = self.next(border2_last);
        let border2_prev = self.previous(border2_first);

        // Discard everything strictly inside the border.
        let mut he = border1_first;
        loop {
            let opposite = self.opposite(he);
            let vertex = self.head(he);
            let next = self.next(he);

            self.discard_half_edge(he);
            self.discard_half_edge(opposite);
            if vertex != extremity2 {
                self.discard_vertex(vertex);
            }

            he = next;
            if he == border1_next {
                break;
            }
        }

        // Stitch the loop of `face2` into the loop of `face1`.
        self.link(border1_prev, border2_next);
        self.link(border2_prev, border1_next);

        // The edges of the extremities and of `face1` might have been
        // discarded.
        self.set_vertex_edge(extremity1, border1_prev);
        self.set_vertex_edge(extremity2, border2_prev);
        self.set_face_edge(face1, border1_prev);

        let loop_edges = self.cycle(border1_prev).collect::<Vec<_>>();
        for he in loop_edges {
            self.set_face(he, face1);
        }

        self.discard_face(face2);
        true
    }

    /// Splits the edge of `edge` into two edges by inserting a new vertex in
    /// its middle. Returns the new vertex.
    ///
    /// `edge` and its opposite are kept and now point to the new vertex.
    ///
    /// ```text
    ///             edge                         edge      new_edge
    ///   (tail) ---------> (head)     (tail) ------> (v) ------> (head)
    ///          <---------         =>        <------     <------
    ///             opp                     new_opp        opp
    /// ```
    pub fn split_edge(&mut self, edge: HalfEdgeHandle) -> VertexHandle {
        self.he_rec(edge);
        self.touch();

        let new_vertex = self.add_vertex();
        self.set_vertex_edge(new_vertex, edge);

        let edge_next = self.next(edge);
        let edge_opp = self.opposite(edge);
        let edge_opp_next = self.next(edge_opp);
        let head = self.head(edge);
        let tail = self.head(edge_opp);

        let new_edge = self.add_half_edge(head);
        let face = self.face(edge);
        self.set_face(new_edge, face);

        let new_opp = self.add_half_edge(tail);
        let face = self.face(edge_opp);
        self.set_face(new_opp, face);

        self.set_vertex_edge(head, new_edge);
        self.set_vertex_edge(tail, new_opp);
        self.set_head(edge, new_vertex);
        self.set_head(edge_opp, new_vertex);

        self.link(edge, new_edge);
        self.link(new_edge, edge_next);
        self.link(edge_opp, new_opp);
        self.link(new_opp, edge_opp_next);
        self.link_opposites(new_edge, edge_opp);
        self.link_opposites(edge, new_opp);

        new_vertex
    }

    /// Collapses `edge` by merging its head vertex into its tail vertex.
    ///
    /// `edge`, its opposite and the head vertex are discarded; all half edges
    /// that pointed to the head now point to the tail. Returns `false` (and
    /// does nothing) if `edge` or its opposite borders a triangle, since that
    /// would leave a face with only two half edges.
    pub fn collapse_edge(&mut self, edge: HalfEdgeHandle) -> bool {
        self.he_rec(edge);

        let edge_next = self.next(edge);
        if edge == self.next(self.next(edge_next)) {
            return false;
        }

        let edge_opp = self.opposite(edge);
        let edge_opp_next = self.next(edge_opp);
        if edge_opp == self.next(self.next(edge_opp_next)) {
            return false;
        }

        self.touch();

        // The faces must not reference the discarded half edges.
        let face = self.face(edge);
        if self.face_edge(face) == edge {
            self.set_face_edge(face, edge_next);
        }
        let face_opp = self.face(edge_opp);
        if self.face_edge(face_opp) == edge_opp {
            self.set_face_edge(face_opp, edge_opp_next);
        }

        let head = self.head(edge);
        let tail = self.head(edge_opp);
        let edge_opp_prev = self.previous(edge_opp);
        let edge_prev = self.previous(edge);

        // Everything pointing to the removed vertex has to point to the
        // remaining one.
        let incoming = HalfEdgeRing::new(self, edge, Step::NextIncoming)
            .collect::<SmallVec<[_; 8]>>();
        for he in incoming {
            self.set_head(he, tail);
        }

        self.link(edge_prev, edge_next);
        self.link(edge_opp_prev, edge_opp_next);

        if self.vertex_edge(tail) == edge_opp {
            self.set_vertex_edge(tail, edge_opp_prev);
        }

        self.discard_half_edge(edge);
        self.discard_half_edge(edge_opp);
        self.discard_vertex(head);
        true
    }

    /// Removes a vertex of degree 2, joining its two edges into one.
    ///
    /// Returns `false` (and does nothing) if the degree of `vertex` is not 2
    /// or if one of its two faces is a triangle.
    pub fn remove_vertex(&mut self, vertex: VertexHandle) -> bool {
        let edge1 = self.vertex_edge(vertex);
        let edge1_next = self.next(edge1);
        let edge2 = self.opposite(edge1_next);
        let edge2_next = self.next(edge2);

        if self.opposite(edge1) != edge2_next {
            return false;
        }

        let edge1_next_next = self.next(edge1_next);
        let edge2_next_next = self.next(edge2_next);
        if self.next(edge1_next_next) == edge1 || self.next(edge2_next_next) == edge2 {
            return false;
        }

        self.touch();
        let v1 = self.head(edge1_next);
        let v2 = self.head(edge2_next);

        self.link(edge1, edge1_next_next);
        self.set_head(edge1, v1);
        if self.vertex_edge(v1) == edge1_next {
            self.set_vertex_edge(v1, edge1);
        }
        let face1 = self.face(edge1_next);
        if self.face_edge(face1) == edge1_next {
            self.set_face_edge(face1, edge1);
        }

        self.link(edge2, edge2_next_next);
        self.set_head(edge2, v2);
        if self.vertex_edge(v2) == edge2_next {
            self.set_vertex_edge(v2, edge2);
        }
        let face2 = self.face(edge2_next);
        if self.face_edge(face2) == edge2_next {
            self.set_face_edge(face2, edge2);
        }

        self.link_opposites(edge1, edge2);

        self.discard_half_edge(edge1_next);
        self.discard_half_edge(edge2_next);
        self.discard_vertex(vertex);
        true
    }
}
