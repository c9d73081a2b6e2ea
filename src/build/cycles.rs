//! The cycle graph: input polygons as cycles of shared edge records.

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    handle::HalfEdgeHandle,
    mesh::Config,
    winding::{Winding, WindingProvider},
};
use super::Builder;


/// One undirected edge of the input, shared by up to two cycles.
///
/// `v1 < v2` always holds (input vertex indices).
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeRecord {
    pub(crate) v1: usize,
    pub(crate) v2: usize,

    /// The half edge pointing to `v1`.
    pub(crate) to_v1: HalfEdgeHandle,

    /// The half edge pointing to `v2`.
    pub(crate) to_v2: HalfEdgeHandle,

    cycles: [Option<usize>; 2],
}

impl EdgeRecord {
    fn is_full(&self) -> bool {
        self.cycles[1].is_some()
    }

    fn add_cycle(&mut self, cycle: usize) {
        match self.cycles {
            [None, _] => self.cycles[0] = Some(cycle),
            [Some(_), None] => self.cycles[1] = Some(cycle),
            _ => panic!("bug: edge {}-{} already borders two cycles", self.v1, self.v2),
        }
    }

    /// The other cycle bordered by this edge, if any.
    pub(crate) fn opposite_cycle(&self, cycle: usize) -> Option<usize> {
        match self.cycles {
            [Some(c), other] if c == cycle => other,
            [other, Some(c)] if c == cycle => other,
            _ => panic!("bug: edge {}-{} does not border cycle {}", self.v1, self.v2, cycle),
        }
    }

    /// The input vertex shared with `other`, if any.
    pub(crate) fn shared_vertex(&self, other: &EdgeRecord) -> Option<usize> {
        if self.v1 == other.v1 || self.v1 == other.v2 {
            Some(self.v1)
        } else if self.v2 == other.v1 || self.v2 == other.v2 {
            Some(self.v2)
        } else {
            None
        }
    }

    /// The half edge of this record pointing to the vertex shared with
    /// `other`.
    pub(crate) fn edge_incoming_to(&self, other: &EdgeRecord) -> HalfEdgeHandle {
        if self.v1 == other.v1 || self.v1 == other.v2 {
            self.to_v1
        } else {
            self.to_v2
        }
    }
}

/// The order in which the records of a cycle are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Cycles accepted so far and the records they share.
#[derive(Debug, Default)]
pub(crate) struct CycleGraph {
    records: Vec<EdgeRecord>,
    record_ids: FxHashMap<(usize, usize), usize>,

    /// Record ids per cycle, in input order.
    cycles: Vec<SmallVec<[usize; 4]>>,

    /// The input face index per cycle.
    face_indices: Vec<usize>,
}

impl CycleGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds the polygon with the given vertex indices as new cycle.
    ///
    /// Returns `false` and logs a warning if the polygon has fewer than three
    /// vertices, visits a vertex twice or uses an edge that already borders
    /// two accepted cycles. Nothing is created in that case.
    pub(crate) fn add_cycle<C: Config>(
        &mut self,
        builder: &mut Builder<C>,
        face_index: usize,
        vertices: &[usize],
    ) -> bool {
        if vertices.len() < 3 {
            log::warn!("cannot add cycle with less than 3 vertices (face {})", face_index);
            return false;
        }

        let self_crossing = vertices.iter()
            .enumerate()
            .any(|(i, v)| vertices[i + 1..].contains(v));
        if self_crossing {
            log::warn!("cannot add self-crossing cycle (face {})", face_index);
            return false;
        }

        let keys = (0..vertices.len())
            .map(|i| {
                let (a, b) = (vertices[i], vertices[(i + 1) % vertices.len()]);
                (a.min(b), a.max(b))
            })
            .collect::<SmallVec<[_; 4]>>();

        let over_shared = keys.iter()
            .filter_map(|key| self.record_ids.get(key))
            .any(|&id| self.records[id].is_full());
        if over_shared {
            log::warn!(
                "cannot add cycle. One of its edges already present in two other cycles (face {})",
                face_index,
            );
            return false;
        }

        let cycle = self.cycles.len();
        let ids = keys.iter()
            .map(|&key| {
                let id = self.record(builder, key);
                self.records[id].add_cycle(cycle);
                id
            })
            .collect();

        self.cycles.push(ids);
        self.face_indices.push(face_index);
        true
    }

    /// Returns the id of the record for the given edge, creating it (and its
    /// two half edges) if necessary.
    fn record<C: Config>(&mut self, builder: &mut Builder<C>, (v1, v2): (usize, usize)) -> usize {
        if let Some(&id) = self.record_ids.get(&(v1, v2)) {
            return id;
        }

        let head1 = builder.vertex(v1);
        let head2 = builder.vertex(v2);
        let mesh = &mut builder.mesh;
        let to_v1 = mesh.add_half_edge(head1);
        mesh.set_vertex_edge_if_absent(head1, to_v1);
        let to_v2 = mesh.add_half_edge(head2);
        mesh.set_vertex_edge_if_absent(head2, to_v2);
        mesh.link_opposites(to_v1, to_v2);

        let id = self.records.len();
        self.records.push(EdgeRecord { v1, v2, to_v1, to_v2, cycles: [None, None] });
        self.record_ids.insert((v1, v2), id);
        id
    }

    pub(crate) fn num_cycles(&self) -> usize {
        self.cycles.len()
    }

    /// The input face index of the given cycle.
    pub(crate) fn face_index(&self, cycle: usize) -> usize {
        self.face_indices[cycle]
    }

    pub(crate) fn record_by_id(&self, id: usize) -> &EdgeRecord {
        &self.records[id]
    }

    /// Pairs of consecutive record ids of `cycle`, visited in the given
    /// direction. Forward yields `(0, 1), …, (n-1, 0)`, backward yields
    /// `(n-1, n-2), …, (0, n-1)`.
    pub(crate) fn pairs(
        &self,
        cycle: usize,
        direction: Direction,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        let ids = &self.cycles[cycle];
        let n = ids.len();
        (0..n).map(move |k| match direction {
            Direction::Forward => (ids[k], ids[(k + 1) % n]),
            Direction::Backward => {
                let i = n - 1 - k;
                (ids[i], ids[(i + n - 1) % n])
            }
        })
    }

    /// The direction in which `cycle` has to be visited for its loop to get
    /// the winding `target`.
    ///
    /// Without winding provider, or if the winding of the cycle cannot be
    /// determined, this is `Forward`.
    pub(crate) fn direction_for_winding(
        &self,
        cycle: usize,
        target: Winding,
        winding: Option<&dyn WindingProvider>,
    ) -> Direction {
        let winding = match winding {
            Some(w) => w,
            None => return Direction::Forward,
        };

        let vertices = self.pairs(cycle, Direction::Forward)
            .map(|(a, b)| {
                let (a, b) = (&self.records[a], &self.records[b]);
                a.shared_vertex(b).unwrap_or(a.v1)
            })
            .collect::<SmallVec<[_; 8]>>();

        match winding.winding(&vertices) {
            Winding::Undetermined => Direction::Forward,
            w if w == target => Direction::Forward,
            _ => Direction::Backward,
        }
    }

    /// The direction in which `cycle` has to be visited such that its half
    /// edge on `record` points to `v2` (if `to_v2`) or `v1`.
    pub(crate) fn direction_along(&self, cycle: usize, record: usize, to_v2: bool) -> Direction {
        let ids = &self.cycles[cycle];
        let n = ids.len();
        let rec = &self.records[record];
        let to = if to_v2 { rec.v2 } else { rec.v1 };

        for (i, &id) in ids.iter().enumerate() {
            if id != record {
                continue;
            }

            let next = &self.records[ids[(i + 1) % n]];
            if rec.shared_vertex(next) == Some(to) {
                return Direction::Forward;
            }

            let prev = &self.records[ids[(i + n - 1) % n]];
            if rec.shared_vertex(prev) == Some(to) {
                return Direction::Backward;
            }
        }

        panic!("bug: edge {}-{} is not part of cycle {}", rec.v1, rec.v2, cycle);
    }
}
