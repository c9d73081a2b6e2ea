//! Greedy paths and tree walks on a 21x21 vertex grid.

use halfmesh::{
    prelude::*,
    walk::{self, Monitor, TreeOrder},
};

mod util;
use self::util::*;


const MIDDLE: f64 = 10.0;

fn grid() -> Conversion<Mesh2D> {
    from_edges(&grid_edges(20, 20))
}

/// Manhattan distance between two grid vertices.
fn distance(mesh: &Mesh2D, a: VertexHandle, b: VertexHandle) -> f64 {
    (mesh.vertex_x(a) - mesh.vertex_x(b)).abs() + (mesh.vertex_y(a) - mesh.vertex_y(b)).abs()
}

/// Picks the vertex closer to the middle column; on a tie, the one closer
/// to the middle row.
fn closer_to_middle(mesh: &Mesh2D) -> impl Fn(VertexHandle, VertexHandle) -> VertexHandle + '_ {
    move |a, b| {
        let mut da = (mesh.vertex_x(a) - MIDDLE).abs();
        let mut db = (mesh.vertex_x(b) - MIDDLE).abs();
        if da == db {
            da = (mesh.vertex_y(a) - MIDDLE).abs();
            db = (mesh.vertex_y(b) - MIDDLE).abs();
        }
        if da < db { a } else { b }
    }
}

#[test]
fn greedy_path_to_middle() {
    init();
    let conv = grid();
    let mesh = conv.mesh();
    let start = vertex(&conv, v(0, 0));
    let middle = vertex(&conv, v(10, 10));

    let path = walk::path(mesh.mesh(), start, closer_to_middle(mesh)).collect::<Vec<_>>();
    assert_eq!(path.len(), 21);
    assert_eq!(path[0], start);
    assert_eq!(*path.last().unwrap(), middle);
    for pair in path.windows(2) {
        assert!(mesh.are_neighbor_vertices(pair[0], pair[1]));
    }

    assert_eq!(walk::find(mesh.mesh(), start, closer_to_middle(mesh)), middle);
    assert_eq!(walk::find(mesh.mesh(), middle, closer_to_middle(mesh)), middle);
}

#[test]
fn custom_path() {
    init();
    let conv = grid();
    let mesh = conv.mesh();
    let start = vertex(&conv, v(0, 3));

    // Straight to the right until the grid ends.
    let row = walk::path_with(start, |v: VertexHandle, monitor: &Monitor<_>| {
        assert!(monitor.is_visited(v));
        mesh.vertex_neighbors(v).find(|&n| {
            mesh.vertex_x(n) == mesh.vertex_x(v) + 1.0 && mesh.vertex_y(n) == mesh.vertex_y(v)
        })
    });
    let row = row.collect::<Vec<_>>();

    assert_eq!(row.len(), 21);
    assert!(row.iter().all(|&v| mesh.vertex_y(v) == 3.0));
    assert_eq!(conv.vertex_index(*row.last().unwrap()), Some(v(20, 3)));
}

#[test]
fn breadth_first() {
    init();
    let conv = grid();
    let mesh = conv.mesh();
    let middle = vertex(&conv, v(10, 10));

    let visited = walk::tree(mesh.mesh(), middle, TreeOrder::BreadthFirst, Some(5))
        .collect::<Vec<_>>();
    assert_eq!(visited.len(), 61);
    assert_eq!(visited[0], middle);

    // Level by level.
    let distances = visited.iter().map(|&v| distance(mesh, middle, v)).collect::<Vec<_>>();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*distances.last().unwrap(), 5.0);

    let all = walk::tree(mesh.mesh(), middle, TreeOrder::BreadthFirst, None).count();
    assert_eq!(all, 21 * 21);
}

#[test]
fn depth_first() {
    init();
    let conv = grid();
    let mesh = conv.mesh();
    let middle = vertex(&conv, v(10, 10));

    let mut visited = walk::tree(mesh.mesh(), middle, TreeOrder::DepthFirst, Some(5))
        .collect::<Vec<_>>();
    assert_eq!(visited[0], middle);
    assert!(visited.len() <= 61);
    assert!(visited.iter().all(|&v| distance(mesh, middle, v) <= 5.0));

    let count = visited.len();
    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), count);

    let all = walk::tree(mesh.mesh(), middle, TreeOrder::DepthFirst, None).count();
    assert_eq!(all, 21 * 21);
}

#[test]
fn face_tree() {
    init();
    let conv = grid();
    let mesh = conv.mesh();

    // The cell whose lower left corner is (10, 10).
    let corner = vertex(&conv, v(10, 10));
    let cell = mesh.incoming_edges(corner)
        .map(|he| mesh.face(he))
        .find(|&f| mesh.face_vertices(f).all(|v| mesh.vertex_x(v) >= 10.0 && mesh.vertex_y(v) >= 10.0))
        .unwrap();

    let around = walk::tree(mesh.mesh(), cell, TreeOrder::BreadthFirst, Some(1)).count();
    assert_eq!(around, 5);

    // All cells plus the outer loop.
    let all = walk::tree(mesh.mesh(), cell, TreeOrder::BreadthFirst, None).count();
    assert_eq!(all, 401);
}
