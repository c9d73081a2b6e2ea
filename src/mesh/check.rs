use crate::{
    handle::HalfEdgeHandle,
    map::BoolMap,
};
use super::{Config, HalfEdgeMesh};


impl<C: Config> HalfEdgeMesh<C> {
    /// Checks all invariants of the data structure and panics if one of them
    /// is violated.
    ///
    /// This is slow and mainly useful for tests and debugging. The invariants
    /// are:
    ///
    /// - `opposite(opposite(e)) == e` and `e != opposite(e)`
    /// - following `next` from any half edge returns to it after more than
    ///   two steps
    /// - `previous(next(e)) == e`
    /// - the edge of a vertex points to that vertex, as does every half edge
    ///   around that vertex
    /// - no face loop contains a half edge together with its opposite
    /// - all references point to live elements
    pub fn check_integrity(&self) {
        let bound = self.half_edges.id_bound() as usize + 1;

        // Check vertices
        for (vh, v) in self.vertices.iter() {
            let edge = match v.edge.into_option() {
                Some(edge) => edge,
                None => panic!("bug: [{:?}].edge = None, but every vertex needs an edge", vh),
            };
            if !self.half_edges.contains(edge) {
                panic!(
                    "bug (broken reference): [{:?}].edge = {:?}, but that half edge does not exist!",
                    vh,
                    edge,
                );
            }

            let mut steps = 0;
            for incoming in self.incoming_edges(vh) {
                if self.half_edges.get(incoming).map(|he| he.head) != Some(vh) {
                    panic!(
                        "bug: {:?} was found circulating around {:?}, but does not point to it",
                        incoming,
                        vh,
                    );
                }

                steps += 1;
                if steps > bound {
                    panic!("bug: circulating around {:?} does not terminate", vh);
                }
            }
        }

        // Check faces
        for (fh, f) in self.faces.iter() {
            if !self.half_edges.contains(f.edge) {
                panic!(
                    "bug (broken reference): [{:?}].edge = {:?}, but that half edge does not exist!",
                    fh,
                    f.edge,
                );
            }

            let mut in_loop = BoolMap::<HalfEdgeHandle>::new();
            let mut len = 0;
            for he in self.face_edges(fh) {
                if self.face_opt(he) != Some(fh) {
                    panic!(
                        "bug: {:?} is in the loop of {:?}, but [{:?}].face = {:?}",
                        he,
                        fh,
                        he,
                        self.face_opt(he),
                    );
                }
                in_loop.set(he, true);

                len += 1;
                if len > bound {
                    panic!("bug: the loop of {:?} does not terminate", fh);
                }
            }

            if len < 3 {
                panic!("bug: {:?} is bordered by only {} half edges", fh, len);
            }
            if let Some(he) = self.face_edges(fh).find(|&he| in_loop.get(self.opposite(he))) {
                panic!(
                    "bug: {:?} and its opposite {:?} both border {:?}",
                    he,
                    self.opposite(he),
                    fh,
                );
            }
        }

        // Check half edges
        for (heh, he) in self.half_edges.iter() {
            if !self.vertices.contains(he.head) {
                panic!(
                    "bug (broken reference): [{:?}].head = {:?}, but that vertex does not exist!",
                    heh,
                    he.head,
                );
            }

            match he.face.into_option() {
                Some(face) if !self.faces.contains(face) => panic!(
                    "bug (broken reference): [{:?}].face = {:?}, but that face does not exist!",
                    heh,
                    face,
                ),
                Some(_) => {}
                None => panic!("bug: [{:?}].face = None", heh),
            }

            let next = match he.next.into_option() {
                Some(next) if self.half_edges.contains(next) => next,
                next => panic!(
                    "bug (broken reference): [{:?}].next = {:?}, but that half edge does not exist!",
                    heh,
                    next,
                ),
            };

            let opposite = match he.opposite.into_option() {
                Some(opposite) if self.half_edges.contains(opposite) => opposite,
                opposite => panic!(
                    "bug (broken reference): [{:?}].opposite = {:?}, but that half edge does not \
                        exist!",
                    heh,
                    opposite,
                ),
            };

            if opposite == heh {
                panic!("bug: {:?} is its own opposite", heh);
            }
            if self.opposite_opt(opposite) != Some(heh) {
                panic!(
                    "bug: [{:?}].opposite = {:?}, but [{:?}].opposite = {:?}",
                    heh,
                    opposite,
                    opposite,
                    self.opposite_opt(opposite),
                );
            }
            if self.head(opposite) == he.head {
                panic!("bug: {:?} and its opposite both point to {:?}", heh, he.head);
            }

            let prev_of_next = self.previous(next);
            if prev_of_next != heh {
                panic!(
                    "bug: [{:?}].next = {:?}, but previous({:?}) = {:?}",
                    heh,
                    next,
                    next,
                    prev_of_next,
                );
            }
        }
    }
}
