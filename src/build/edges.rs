//! Face synthesis from a list of undirected edges.

use crate::{
    handle::HalfEdgeHandle,
    map::{BoolMap, DataMap},
    mesh::{Config, FaceStatus},
    source::EdgeSource,
};
use super::{
    arrow::{link_star, ArrowGraph, ArrowSorter},
    Builder, ConvertError,
};


/// Creates a twin pair per input edge, links the half edges around every
/// vertex by angle and turns every resulting loop into a face of unknown
/// status.
///
/// Fails if a loop does not close or if a loop contains both half edges of
/// one edge.
pub(crate) fn synthesize<C, E>(
    builder: &mut Builder<C>,
    edges: &E,
    sorter: ArrowSorter<'_>,
    edge_indices: &mut DataMap<HalfEdgeHandle, usize>,
) -> Result<(), ConvertError>
where
    C: Config,
    E: EdgeSource + ?Sized,
{
    let mut graph = ArrowGraph::new();
    for index in edges.edge_indices() {
        add_edge(builder, &mut graph, edges.edge_v1(index), edges.edge_v2(index), index, edge_indices);
    }

    let heads = graph.heads().to_vec();
    for &head in &heads {
        let mut arrows = graph.arrows_at(head).to_vec();
        sorter.sort(builder, &mut arrows);
        link_star(&mut builder.mesh, &arrows);
    }

    let mut marked = BoolMap::<HalfEdgeHandle>::new();
    for &head in &heads {
        for arrow in graph.arrows_at(head) {
            if marked.get(arrow.he) {
                continue;
            }

            let mut loop_edges = Vec::new();
            let mut he = arrow.he;
            loop {
                marked.set(he, true);
                loop_edges.push(he);

                he = match builder.mesh.next_opt(he) {
                    Some(next) => next,
                    None => {
                        let vertex = builder.input_index(builder.mesh.head(he));
                        return Err(ConvertError::UnclosedFace { vertex });
                    }
                };
                if he == arrow.he {
                    break;
                }
            }

            if let Some(&he) = loop_edges.iter().find(|&&he| {
                let opp = builder.mesh.opposite(he);
                loop_edges.contains(&opp)
            }) {
                let vertex = builder.input_index(builder.mesh.head(he));
                return Err(ConvertError::DegenerateFace { vertex });
            }

            builder.mesh.add_face(arrow.he, FaceStatus::Unknown);
        }
    }

    Ok(())
}

fn add_edge<C: Config>(
    builder: &mut Builder<C>,
    graph: &mut ArrowGraph,
    v1_index: usize,
    v2_index: usize,
    edge_index: usize,
    edge_indices: &mut DataMap<HalfEdgeHandle, usize>,
) {
    if v1_index == v2_index {
        log::warn!("cannot add an edge that connects a vertex to itself (edge {})", edge_index);
        return;
    }

    let v1 = builder.vertex(v1_index);
    let v2 = builder.vertex(v2_index);
    if graph.arrow_between(&builder.mesh, v1, v2).is_some() {
        log::debug!("skipping duplicate edge {} ({} - {})", edge_index, v1_index, v2_index);
        return;
    }

    let mesh = &mut builder.mesh;
    let to_v1 = mesh.add_half_edge(v1);
    let to_v2 = mesh.add_half_edge(v2);
    edge_indices.set(to_v1, edge_index);
    edge_indices.set(to_v2, edge_index);

    mesh.link_opposites(to_v1, to_v2);
    mesh.set_vertex_edge_if_absent(v1, to_v1);
    mesh.set_vertex_edge_if_absent(v2, to_v2);
    graph.add(mesh, to_v1, None);
    graph.add(mesh, to_v2, None);
}
