//! Completes the `next` links around every vertex after the input polygons
//! were linked, discovering the boundary loops (outer rim and holes).
//!
//! Around each vertex, the incoming half edges ("arrows") need a `next`
//! among the outgoing half edges. Most links are already set by the input
//! polygons. If exactly one is missing, it is unambiguous. Otherwise, the
//! arrows are sorted by angle and linked as a star, which can break input
//! loops. Those are restored afterwards by matching their vertex sequence
//! against the newly discovered loops.

use std::collections::VecDeque;

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    handle::{HalfEdgeHandle, VertexHandle},
    map::BoolMap,
    mesh::Config,
};
use super::{
    arrow::{link_star, Arrow, ArrowGraph, ArrowSorter},
    Builder, ConvertError,
};


/// A finished loop of half edges. `cycle` is the cycle the loop was created
/// for, or `None` for a synthesized boundary loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompletedLoop {
    pub(crate) start: HalfEdgeHandle,
    pub(crate) cycle: Option<usize>,
}

pub(crate) struct Completion<'a, 'b, C: Config> {
    builder: &'a mut Builder<C>,
    sorter: Option<ArrowSorter<'b>>,
    graph: ArrowGraph,

    /// First half edge of every input cycle, as linked initially.
    cycles: &'a [HalfEdgeHandle],

    /// Same, but `None` once a cycle was broken by reordering a vertex.
    result: Vec<Option<HalfEdgeHandle>>,

    /// Vertex sequence of every cycle, saved before it was first touched by
    /// reordering.
    mementos: FxHashMap<usize, SmallVec<[VertexHandle; 8]>>,

    /// Vertices that need to be checked again, with forced reordering.
    queue: VecDeque<VertexHandle>,
}

impl<'a, 'b, C: Config> Completion<'a, 'b, C> {
    pub(crate) fn new(
        builder: &'a mut Builder<C>,
        sorter: Option<ArrowSorter<'b>>,
        cycles: &'a [HalfEdgeHandle],
    ) -> Self {
        Self {
            builder,
            sorter,
            graph: ArrowGraph::new(),
            cycles,
            result: cycles.iter().copied().map(Some).collect(),
            mementos: FxHashMap::default(),
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<CompletedLoop>, ConvertError> {
        for (cycle, &start) in self.cycles.iter().enumerate() {
            let edges = self.builder.mesh.cycle(start).collect::<SmallVec<[_; 8]>>();
            for he in edges {
                self.add_arrow(he, cycle);
            }
        }

        let heads = self.graph.heads().to_vec();
        for v in heads {
            self.check_vertex(v, false)?;
            while let Some(w) = self.queue.pop_front() {
                self.check_vertex(w, true)?;
            }
        }

        // Mark what is left of the input loops and collect all remaining
        // loops as extra loops.
        let mut marked = BoolMap::<HalfEdgeHandle>::new();
        for &start in self.result.iter().flatten() {
            for he in self.builder.mesh.cycle(start) {
                marked.set(he, true);
            }
        }

        let mut extras = Vec::new();
        for &head in self.graph.heads() {
            for arrow in self.graph.arrows_at(head) {
                if marked.get(arrow.he) {
                    continue;
                }

                let loop_edges = self.closed_loop(arrow.he);
                for he in loop_edges {
                    marked.set(he, true);
                }
                extras.push(arrow.he);
            }
        }

        // Broken input loops get their index back if an equivalent loop was
        // found.
        for cycle in 0..self.result.len() {
            if self.result[cycle].is_some() {
                continue;
            }

            let memento = match self.mementos.get(&cycle) {
                Some(m) => m,
                None => continue,
            };
            if let Some(pos) = extras.iter().position(|&he| self.matches(he, memento)) {
                self.result[cycle] = Some(extras.remove(pos));
            }
        }

        let num_restored = self.result.iter().flatten().count();
        log::debug!(
            "completed {} input loops ({} broken) and {} boundary loops",
            num_restored,
            self.result.len() - num_restored,
            extras.len(),
        );

        let loops = self.result.iter()
            .enumerate()
            .filter_map(|(cycle, start)| start.map(|start| CompletedLoop { start, cycle: Some(cycle) }))
            .chain(extras.into_iter().map(|start| CompletedLoop { start, cycle: None }))
            .collect();

        Ok(loops)
    }

    /// Adds `he` as arrow of `cycle`. If the half edge after `he` has no
    /// predecessor yet, its opposite is not part of any input loop and is
    /// added as well.
    fn add_arrow(&mut self, he: HalfEdgeHandle, cycle: usize) {
        let mesh = &self.builder.mesh;
        self.graph.add(mesh, he, Some(cycle));

        let orphan = mesh.opposite(mesh.next(he));
        if mesh.next_opt(orphan).is_none() {
            self.graph.add(mesh, orphan, None);
        }
    }

    /// Walks the loop starting at `he`.
    ///
    /// Every arrow has a `next` at this point: each vertex was either linked
    /// by its polygons, had its single gap filled or was linked as a star.
    fn closed_loop(&self, start: HalfEdgeHandle) -> SmallVec<[HalfEdgeHandle; 8]> {
        let mesh = &self.builder.mesh;
        let mut out = SmallVec::new();
        let mut he = start;
        loop {
            out.push(he);
            he = match mesh.next_opt(he) {
                Some(next) => next,
                None => panic!("bug: {:?} has no `next` after completing all vertices", he),
            };

            if he == start {
                return out;
            }
        }
    }

    fn check_vertex(&mut self, v: VertexHandle, force: bool) -> Result<(), ConvertError> {
        let mesh = &self.builder.mesh;
        let arrows = self.graph.arrows_at(v).iter().copied().collect::<SmallVec<[Arrow; 8]>>();

        // The known `next` of every arrow, followed by the outgoing half
        // edges that still lack a predecessor.
        let mut outgoing = arrows.iter()
            .map(|a| mesh.next_opt(a.he))
            .collect::<SmallVec<[Option<HalfEdgeHandle>; 8]>>();
        if outgoing.contains(&None) {
            for a in &arrows {
                let opp = Some(mesh.opposite(a.he));
                if !outgoing.contains(&opp) {
                    outgoing.push(opp);
                }
            }
        }

        // Unlinked arrows are always border half edges whose opposite is part
        // of an input loop, so a single gap never has to be closed with the
        // opposite of the unlinked arrow itself.
        let missing = outgoing.len() - arrows.len();
        let orient = match missing {
            0 => arrows.len() != 2 && force,
            1 if !force => {
                let target = outgoing.last().copied().flatten();
                let unlinked = arrows.iter().find(|a| mesh.next_opt(a.he).is_none());
                match (unlinked, target) {
                    (Some(a), Some(target)) if mesh.opposite(a.he) != target => {
                        log::trace!("{:?}: linking {:?} -> {:?}", v, a.he, target);
                        self.builder.mesh.link(a.he, target);
                    }
                    _ => panic!("bug: single missing link at {:?} cannot be closed", v),
                }
                false
            }
            _ => true,
        };

        if orient {
            let sorter = match self.sorter {
                Some(sorter) => sorter,
                None => {
                    let vertex = self.builder.input_index(v);
                    return Err(ConvertError::MissingWinding { vertex });
                }
            };
            self.orient(v, &arrows, &outgoing, sorter);
        }

        Ok(())
    }

    /// Sorts the arrows of `v` by angle and links them as a star. Input loops
    /// that changed are invalidated and the neighbors are scheduled for a
    /// forced check.
    fn orient(
        &mut self,
        v: VertexHandle,
        arrows: &[Arrow],
        outgoing: &[Option<HalfEdgeHandle>],
        sorter: ArrowSorter<'_>,
    ) {
        log::trace!("{:?}: ordering {} arrows by angle", v, arrows.len());

        for cycle in arrows.iter().filter_map(|a| a.cycle) {
            if !self.mementos.contains_key(&cycle) {
                let mesh = &self.builder.mesh;
                let vertices = mesh.cycle(self.cycles[cycle]).map(|he| mesh.head(he)).collect();
                self.mementos.insert(cycle, vertices);
            }
        }

        let mut sorted = arrows.iter().copied().collect::<SmallVec<[Arrow; 8]>>();
        sorter.sort(self.builder, &mut sorted);
        link_star(&mut self.builder.mesh, &sorted);

        let mut changed = false;
        for (a, &old_next) in arrows.iter().zip(outgoing) {
            let new_next = self.builder.mesh.next_opt(a.he);
            if old_next.is_some() && old_next != new_next {
                changed = true;
                if let Some(cycle) = a.cycle {
                    self.result[cycle] = None;
                }
            }
        }

        if changed {
            for a in &sorted {
                self.queue.push_back(self.builder.mesh.tail(a.he));
            }
        }
    }

    /// Whether the loop starting at `start` visits the same vertices as
    /// `memento`, in either direction.
    fn matches(&self, start: HalfEdgeHandle, memento: &[VertexHandle]) -> bool {
        let mesh = &self.builder.mesh;
        let heads = mesh.cycle(start).map(|he| mesh.head(he)).collect::<SmallVec<[_; 8]>>();
        let n = heads.len();
        if n != memento.len() {
            return false;
        }

        let offset = match heads.iter().position(|&v| v == memento[0]) {
            Some(offset) => offset,
            None => return false,
        };

        let forward = (1..n).all(|i| heads[(offset + i) % n] == memento[i]);
        forward || (1..n).all(|i| heads[(offset + i) % n] == memento[n - i])
    }
}
