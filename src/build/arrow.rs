//! Half edges grouped by their head vertex ("arrows") and their angular
//! ordering around that vertex.

use std::cmp::Ordering;

use fxhash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    handle::{HalfEdgeHandle, VertexHandle},
    mesh::{Config, HalfEdgeMesh},
    winding::{Winding, WindingProvider},
};
use super::Builder;


/// A half edge considered as pointing into its head vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Arrow {
    pub(crate) he: HalfEdgeHandle,

    /// The cycle (see `cycles`) this half edge was created for, or `None`
    /// for half edges that are not part of any input polygon.
    pub(crate) cycle: Option<usize>,
}

/// All arrows of the builder, grouped by head vertex.
///
/// Vertices are remembered in the order in which their first arrow was
/// added, so that processing them is deterministic.
#[derive(Debug, Default)]
pub(crate) struct ArrowGraph {
    heads: Vec<VertexHandle>,
    arrows: FxHashMap<VertexHandle, SmallVec<[Arrow; 6]>>,
}

impl ArrowGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `he` as arrow into its head. Does nothing if `he` was already
    /// added.
    pub(crate) fn add<C: Config>(
        &mut self,
        mesh: &HalfEdgeMesh<C>,
        he: HalfEdgeHandle,
        cycle: Option<usize>,
    ) {
        let head = mesh.head(he);
        let heads = &mut self.heads;
        let arrows = self.arrows.entry(head).or_insert_with(|| {
            heads.push(head);
            SmallVec::new()
        });

        if arrows.iter().all(|a| a.he != he) {
            arrows.push(Arrow { he, cycle });
        }
    }

    /// All vertices with at least one arrow, in insertion order.
    pub(crate) fn heads(&self) -> &[VertexHandle] {
        &self.heads
    }

    /// The arrows pointing into `head`, in insertion order.
    pub(crate) fn arrows_at(&self, head: VertexHandle) -> &[Arrow] {
        self.arrows.get(&head).map(|a| &a[..]).unwrap_or(&[])
    }

    /// Returns the arrow going from `tail` to `head`, if there is one.
    pub(crate) fn arrow_between<C: Config>(
        &self,
        mesh: &HalfEdgeMesh<C>,
        tail: VertexHandle,
        head: VertexHandle,
    ) -> Option<Arrow> {
        self.arrows_at(head).iter().copied().find(|a| mesh.tail(a.he) == tail)
    }
}

/// Gives every arrow in `arrows` the opposite of its predecessor as `next`.
///
/// With counterclockwise sorted arrows, this turns a star of edges around
/// one vertex into the corners of the faces around it.
pub(crate) fn link_star<C: Config>(mesh: &mut HalfEdgeMesh<C>, arrows: &[Arrow]) {
    if arrows.len() < 2 {
        return;
    }

    for (i, a1) in arrows.iter().enumerate() {
        let a2 = arrows[(i + 1) % arrows.len()];
        let next = mesh.opposite(a1.he);
        mesh.link(a2.he, next);
    }
}


// ===============================================================================================
// ===== Angular sorting
// ===============================================================================================

/// Sorts arrows sharing a head counterclockwise by the direction of their
/// tails, using only winding queries.
///
/// Comparing two arrows `a1` and `a2` means asking for the winding of
/// `(tail(a2), head, tail(a1))`: with `a1` at 0°, the result is
/// counterclockwise (`a1 < a2`) if `a2` lies in ]0°, 180°[ and clockwise if it
/// lies in ]-180°, 0°[. This relation is only transitive on half circles, so
/// the circle is first split into zones by two non-collinear axes.
#[derive(Clone, Copy)]
pub(crate) struct ArrowSorter<'a> {
    winding: &'a dyn WindingProvider,
}

impl<'a> ArrowSorter<'a> {
    pub(crate) fn new(winding: &'a dyn WindingProvider) -> Self {
        Self { winding }
    }

    fn relative<C: Config>(&self, builder: &Builder<C>, a1: &Arrow, a2: &Arrow) -> Ordering {
        let mesh = &builder.mesh;
        let head = mesh.head(a1.he);
        debug_assert_eq!(head, mesh.head(a2.he), "comparing arrows with different heads");

        let indices = [
            builder.input_index(mesh.tail(a2.he)),
            builder.input_index(head),
            builder.input_index(mesh.tail(a1.he)),
        ];

        match self.winding.winding(&indices) {
            Winding::CounterClockwise => Ordering::Less,
            Winding::Clockwise => Ordering::Greater,
            Winding::Undetermined => Ordering::Equal,
        }
    }

    /// Position of `a` on the circle defined by the axes: -2 at 180°, -1 in
    /// ]-180°, 0°[, 0 at 0° and 1 in ]0°, 180°[.
    fn zone<C: Config>(&self, builder: &Builder<C>, a: &Arrow, axis1: &Arrow, axis2: &Arrow) -> i8 {
        match self.relative(builder, a, axis1) {
            Ordering::Less => -1,
            Ordering::Greater => 1,
            Ordering::Equal if self.relative(builder, a, axis2) == Ordering::Less => -2,
            Ordering::Equal => 0,
        }
    }

    fn compare<C: Config>(
        &self,
        builder: &Builder<C>,
        a1: &Arrow,
        a2: &Arrow,
        axis1: &Arrow,
        axis2: &Arrow,
    ) -> Ordering {
        let zone1 = self.zone(builder, a1, axis1, axis2);
        let zone2 = self.zone(builder, a2, axis1, axis2);

        // Inside one open half circle, the relative comparison is valid.
        if zone1 == zone2 && (zone1 == 1 || zone1 == -1) {
            self.relative(builder, a1, a2)
        } else {
            zone1.cmp(&zone2)
        }
    }

    /// Sorts `arrows` around their common head. Does nothing for two or
    /// fewer arrows, or if all arrows are collinear.
    pub(crate) fn sort<C: Config>(&self, builder: &Builder<C>, arrows: &mut [Arrow]) {
        if arrows.len() <= 2 {
            return;
        }

        // Find two arrows that are not collinear, such that `axis1 > axis2`.
        let mut axis1 = arrows[0];
        let mut axis2 = None;
        for arrow in &arrows[1..] {
            match self.relative(builder, &axis1, arrow) {
                Ordering::Greater => {
                    axis2 = Some(*arrow);
                    break;
                }
                Ordering::Less => {
                    axis2 = Some(axis1);
                    axis1 = *arrow;
                    break;
                }
                Ordering::Equal => {}
            }
        }

        let axis2 = match axis2 {
            Some(axis2) => axis2,
            None => return,
        };

        // Stable insertion sort: the arrows of one vertex are few.
        for i in 1..arrows.len() {
            let mut j = i;
            while j > 0
                && self.compare(builder, &arrows[j - 1], &arrows[j], &axis1, &axis2)
                    == Ordering::Greater
            {
                arrows.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}
