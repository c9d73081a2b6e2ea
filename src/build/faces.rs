//! Turns the cycles of a [`CycleGraph`] into loops of half edges.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::{
    handle::HalfEdgeHandle,
    mesh::Config,
    winding::{Winding, WindingProvider},
};
use super::{
    cycles::{CycleGraph, Direction},
    Builder, ConvertError,
};


/// Links the half edges of every cycle into a loop, oriented
/// counterclockwise where the winding can be determined.
///
/// Once a cycle is linked, its neighbors across each edge record are
/// scheduled (in a queue) and linked in the direction opposite to it, so
/// that connected cycles end up consistently oriented. Returns the first
/// half edge of each cycle's loop.
pub(crate) fn link_cycles<C: Config>(
    builder: &mut Builder<C>,
    graph: &CycleGraph,
    winding: Option<&dyn WindingProvider>,
) -> Result<Vec<HalfEdgeHandle>, ConvertError> {
    let mut starts = vec![None; graph.num_cycles()];
    let mut queue = VecDeque::new();

    for cycle in 0..graph.num_cycles() {
        if starts[cycle].is_none() {
            let direction = graph.direction_for_winding(cycle, Winding::CounterClockwise, winding);
            link_cycle(builder, graph, cycle, direction, &mut starts, &mut queue)?;
        }

        while let Some((cycle, record, to_v2)) = queue.pop_front() {
            if starts[cycle].is_none() {
                let direction = graph.direction_along(cycle, record, to_v2);
                link_cycle(builder, graph, cycle, direction, &mut starts, &mut queue)?;
            }
        }
    }

    Ok(starts.into_iter().flatten().collect())
}

fn link_cycle<C: Config>(
    builder: &mut Builder<C>,
    graph: &CycleGraph,
    cycle: usize,
    direction: Direction,
    starts: &mut [Option<HalfEdgeHandle>],
    queue: &mut VecDeque<(usize, usize, bool)>,
) -> Result<(), ConvertError> {
    let mesh = &mut builder.mesh;
    let mut loop_edges = SmallVec::<[HalfEdgeHandle; 8]>::new();
    let mut adjacent = SmallVec::<[(usize, usize, bool); 8]>::new();

    for (id, next_id) in graph.pairs(cycle, direction) {
        let record = graph.record_by_id(id);
        let he = record.edge_incoming_to(graph.record_by_id(next_id));

        // Already linked: another cycle runs along this half edge in the
        // same direction.
        if mesh.next_opt(he).is_some() {
            return Err(ConvertError::ConflictingCycles { face: graph.face_index(cycle) });
        }

        loop_edges.push(he);
        if let Some(other) = record.opposite_cycle(cycle) {
            let other_to_v2 = mesh.opposite(he) == record.to_v2;
            adjacent.push((other, id, other_to_v2));
        }
    }

    for (i, &he) in loop_edges.iter().enumerate() {
        mesh.link(he, loop_edges[(i + 1) % loop_edges.len()]);
    }
    starts[cycle] = Some(loop_edges[0]);

    for (other, record, to_v2) in adjacent {
        if starts[other].is_none() {
            queue.push_back((other, record, to_v2));
        }
    }

    Ok(())
}
