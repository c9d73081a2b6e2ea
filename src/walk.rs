//! Walking through a mesh: greedy paths and breadth/depth-first trees.
//!
//! All walkers visit each element at most once. They keep track of visited
//! elements in a [`Monitor`] that is also handed to custom `next`/`children`
//! closures, so those can make decisions based on what was already visited.

use std::collections::VecDeque;

use boolinator::Boolinator;
use smallvec::SmallVec;

use crate::{
    handle::{FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
    map::BoolMap,
    mesh::{Config, HalfEdgeMesh},
};


/// Elements that have a default notion of "neighbors" to walk to.
pub trait Walkable: Handle {
    /// Vertices walk to adjacent vertices, half edges to the half edges
    /// leaving their head, faces to adjacent faces.
    fn walk_neighbors<C: Config>(self, mesh: &HalfEdgeMesh<C>) -> SmallVec<[Self; 8]>;
}

impl Walkable for VertexHandle {
    fn walk_neighbors<C: Config>(self, mesh: &HalfEdgeMesh<C>) -> SmallVec<[Self; 8]> {
        mesh.vertex_neighbors(self).collect()
    }
}

impl Walkable for HalfEdgeHandle {
    fn walk_neighbors<C: Config>(self, mesh: &HalfEdgeMesh<C>) -> SmallVec<[Self; 8]> {
        mesh.outgoing_edges(mesh.head(self)).collect()
    }
}

impl Walkable for FaceHandle {
    fn walk_neighbors<C: Config>(self, mesh: &HalfEdgeMesh<C>) -> SmallVec<[Self; 8]> {
        mesh.face_neighbors(self).collect()
    }
}


/// Keeps track of the elements a walk has visited so far.
#[derive(Debug, Clone)]
pub struct Monitor<E: Handle> {
    visited: BoolMap<E>,
    num_visits: usize,
}

impl<E: Handle> Monitor<E> {
    fn new() -> Self {
        Self {
            visited: BoolMap::new(),
            num_visits: 0,
        }
    }

    fn visit(&mut self, e: E) {
        self.visited.set(e, true);
        self.num_visits += 1;
    }

    pub fn is_visited(&self, e: E) -> bool {
        self.visited.get(e)
    }

    /// The number of elements yielded so far.
    pub fn num_visits(&self) -> usize {
        self.num_visits
    }
}


// ===============================================================================================
// ===== Paths
// ===============================================================================================

/// A walk that goes from element to element, as decided by a `next` closure,
/// until that closure returns `None`.
///
/// Created by [`path`] or [`path_with`].
#[derive(Debug)]
pub struct PathWalk<E: Handle, F> {
    pending: Option<E>,
    monitor: Monitor<E>,
    next: F,
}

impl<E, F> Iterator for PathWalk<E, F>
where
    E: Handle,
    F: FnMut(E, &Monitor<E>) -> Option<E>,
{
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.pending.take()?;
        self.monitor.visit(e);
        self.pending = (self.next)(e, &self.monitor);
        Some(e)
    }
}

/// Walks from `start`, where each step is decided by `next`. The walk yields
/// `start` first and ends when `next` returns `None`.
pub fn path_with<E, F>(start: E, next: F) -> PathWalk<E, F>
where
    E: Handle,
    F: FnMut(E, &Monitor<E>) -> Option<E>,
{
    PathWalk {
        pending: Some(start),
        monitor: Monitor::new(),
        next,
    }
}

/// Walks greedily from `start`.
///
/// In each step, the current element and its unvisited neighbors are reduced
/// with `selector` (starting with the current element as accumulator). The
/// walk moves to the result or ends if the result is the current element.
///
/// ```
/// use halfmesh::{prelude::*, walk};
///
/// // Four quads in a row.
/// let faces = vec![vec![0, 1, 6, 5], vec![1, 2, 7, 6], vec![2, 3, 8, 7], vec![3, 4, 9, 8]];
/// let conv = Converter::new().convert_faces(&faces[..], None).unwrap();
/// let mesh = conv.mesh();
///
/// // Walk to the vertex with the highest input index.
/// let start = mesh.vertices().next().unwrap();
/// let end = walk::find(mesh, start, |a, b| {
///     if conv.vertex_index(b) > conv.vertex_index(a) { b } else { a }
/// });
/// assert_eq!(conv.vertex_index(end), Some(9));
/// ```
pub fn path<'a, C, E, S>(
    mesh: &'a HalfEdgeMesh<C>,
    start: E,
    selector: S,
) -> PathWalk<E, impl FnMut(E, &Monitor<E>) -> Option<E> + 'a>
where
    C: Config,
    E: Walkable,
    S: Fn(E, E) -> E + 'a,
{
    path_with(start, move |e, monitor: &Monitor<E>| {
        let reduced = e.walk_neighbors(mesh)
            .into_iter()
            .filter(|&n| !monitor.is_visited(n))
            .fold(e, |acc, n| selector(acc, n));

        (reduced != e).as_some(reduced)
    })
}

/// Returns the last element of the greedy walk [`path`] describes.
pub fn find<'a, C, E, S>(mesh: &'a HalfEdgeMesh<C>, start: E, selector: S) -> E
where
    C: Config,
    E: Walkable,
    S: Fn(E, E) -> E + 'a,
{
    path(mesh, start, selector).last().unwrap_or(start)
}


// ===============================================================================================
// ===== Trees
// ===============================================================================================

/// The order in which a [`TreeWalk`] visits elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOrder {
    BreadthFirst,
    DepthFirst,
}

/// The [`Monitor`] of a tree walk, which also knows the depth of the current
/// element.
#[derive(Debug, Clone)]
pub struct TreeMonitor<E: Handle> {
    visits: Monitor<E>,
    depth: usize,
}

impl<E: Handle> TreeMonitor<E> {
    /// The depth of the element yielded last. The root has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_visited(&self, e: E) -> bool {
        self.visits.is_visited(e)
    }

    pub fn num_visits(&self) -> usize {
        self.visits.num_visits()
    }
}

#[derive(Debug)]
enum Pending<E> {
    /// One queue for the current depth and one for the next.
    BreadthFirst {
        current: VecDeque<E>,
        next_depth: VecDeque<E>,
    },

    /// One stack per depth, starting at depth 1.
    DepthFirst(Vec<Vec<E>>),
}

/// A walk through the tree spanned by the "children" of each element.
///
/// Every element is yielded at most once, the root first. Children of
/// elements at `max_depth` are not visited.
#[derive(Debug)]
pub struct TreeWalk<E: Handle, F> {
    root: Option<E>,
    max_depth: Option<usize>,
    monitor: TreeMonitor<E>,
    pending: Pending<E>,
    children: F,
    buffer: Vec<E>,
    finished: bool,
}

impl<E, F> TreeWalk<E, F>
where
    E: Handle,
    F: FnMut(E, &TreeMonitor<E>, &mut Vec<E>),
{
    /// Creates a walk from `root`. `children` is called with an element, the
    /// monitor and a buffer to push the children of that element into.
    pub fn new(root: E, order: TreeOrder, max_depth: Option<usize>, children: F) -> Self {
        let pending = match order {
            TreeOrder::BreadthFirst => Pending::BreadthFirst {
                current: VecDeque::new(),
                next_depth: VecDeque::new(),
            },
            TreeOrder::DepthFirst => Pending::DepthFirst(Vec::new()),
        };

        Self {
            root: Some(root),
            max_depth,
            monitor: TreeMonitor { visits: Monitor::new(), depth: 0 },
            pending,
            children,
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Fills `self.buffer` with the unvisited children of `e`.
    fn collect_children(&mut self, e: E) {
        self.buffer.clear();
        if self.max_depth.map_or(true, |max| self.monitor.depth < max) {
            (self.children)(e, &self.monitor, &mut self.buffer);
            let monitor = &self.monitor;
            self.buffer.retain(|&child| !monitor.is_visited(child));
        }
    }

    fn pop(&mut self) -> Option<E> {
        match &mut self.pending {
            Pending::BreadthFirst { current, .. } => current.pop_front(),
            Pending::DepthFirst(stacks) => stacks[self.monitor.depth - 1].pop(),
        }
    }

    fn after_visit_breadth_first(&mut self, e: E) {
        self.collect_children(e);
        let (current, next_depth) = match &mut self.pending {
            Pending::BreadthFirst { current, next_depth } => (current, next_depth),
            Pending::DepthFirst(_) => unreachable!(),
        };
        next_depth.extend(self.buffer.drain(..));

        // The queue can contain the same element several times (added by
        // different parents).
        let monitor = &self.monitor.visits;
        let skip_visited = |q: &mut VecDeque<E>| {
            while q.front().map_or(false, |&e| monitor.is_visited(e)) {
                q.pop_front();
            }
        };

        skip_visited(&mut *current);
        let level_done = current.is_empty();
        if level_done {
            std::mem::swap(current, next_depth);
            skip_visited(&mut *current);
        }

        self.finished = current.is_empty();
        if level_done {
            self.monitor.depth += 1;
        }
    }

    fn after_visit_depth_first(&mut self, e: E) {
        self.collect_children(e);
        let depth = self.monitor.depth;
        let monitor = &self.monitor.visits;
        let stacks = match &mut self.pending {
            Pending::DepthFirst(stacks) => stacks,
            Pending::BreadthFirst { .. } => unreachable!(),
        };

        // Elements still pending further up the tree are visited from there.
        self.buffer.retain(|child| !stacks[..depth].iter().any(|s| s.contains(child)));

        if stacks.len() <= depth {
            stacks.push(Vec::new());
        }
        debug_assert!(stacks[depth].is_empty());
        stacks[depth].extend(self.buffer.drain(..));

        let mut depth = if stacks[depth].is_empty() { depth } else { depth + 1 };

        // Go back up until an unvisited element is found.
        while depth > 0 {
            let stack = &mut stacks[depth - 1];
            while stack.last().map_or(false, |&e| monitor.is_visited(e)) {
                stack.pop();
            }
            if !stack.is_empty() {
                break;
            }
            depth -= 1;
        }

        self.monitor.depth = depth;
        self.finished = depth == 0;
    }

    /// The monitor of this walk.
    pub fn monitor(&self) -> &TreeMonitor<E> {
        &self.monitor
    }
}

impl<E, F> Iterator for TreeWalk<E, F>
where
    E: Handle,
    F: FnMut(E, &TreeMonitor<E>, &mut Vec<E>),
{
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let e = match self.root.take() {
            Some(root) => root,
            None => self.pop()?,
        };
        self.monitor.visits.visit(e);

        match self.pending {
            Pending::BreadthFirst { .. } => self.after_visit_breadth_first(e),
            Pending::DepthFirst(_) => self.after_visit_depth_first(e),
        }

        Some(e)
    }
}

/// Walks the tree spanned by the default neighbors (see [`Walkable`]) of
/// each element.
pub fn tree<'a, C, E>(
    mesh: &'a HalfEdgeMesh<C>,
    root: E,
    order: TreeOrder,
    max_depth: Option<usize>,
) -> TreeWalk<E, impl FnMut(E, &TreeMonitor<E>, &mut Vec<E>) + 'a>
where
    C: Config,
    E: Walkable,
{
    TreeWalk::new(root, order, max_depth, move |e: E, _: &TreeMonitor<E>, out: &mut Vec<E>| {
        out.extend(e.walk_neighbors(mesh));
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    /// A walk over plain numbers in a binary tree: the children of `n` are
    /// `2n + 1` and `2n + 2`.
    fn binary(order: TreeOrder, max_depth: Option<usize>) -> Vec<VertexHandle> {
        TreeWalk::new(VertexHandle::new(0), order, max_depth, |v: VertexHandle, _: &TreeMonitor<_>, out: &mut Vec<_>| {
            let n = v.idx();
            if n < 7 {
                out.push(VertexHandle::new(2 * n + 1));
                out.push(VertexHandle::new(2 * n + 2));
            }
        }).collect()
    }

    fn ids(handles: &[VertexHandle]) -> Vec<u32> {
        handles.iter().map(|h| h.idx() as u32).collect()
    }

    #[test]
    fn breadth_first_order() {
        let all = binary(TreeOrder::BreadthFirst, None);
        assert_eq!(ids(&all), (0..15u32).collect::<Vec<_>>());

        let shallow = binary(TreeOrder::BreadthFirst, Some(1));
        assert_eq!(ids(&shallow), vec![0, 1, 2]);
    }

    #[test]
    fn depth_first_order() {
        // Children are taken from the end of the buffer.
        let all = binary(TreeOrder::DepthFirst, None);
        assert_eq!(ids(&all), vec![0, 2, 6, 14, 13, 5, 12, 11, 1, 4, 10, 9, 3, 8, 7]);

        let shallow = binary(TreeOrder::DepthFirst, Some(1));
        assert_eq!(ids(&shallow), vec![0, 2, 1]);
    }

    #[test]
    fn path_stops_at_fixpoint() {
        let steps = path_with(VertexHandle::new(0), |v: VertexHandle, monitor: &Monitor<_>| {
            assert!(monitor.is_visited(v));
            Some(VertexHandle::new(v.idx() + 1)).filter(|_| monitor.num_visits() < 4)
        });
        assert_eq!(ids(&steps.collect::<Vec<_>>()), vec![0, 1, 2, 3]);
    }
}
