//! Orientation of built faces.

use halfmesh::{
    cgmath::Point2,
    prelude::*,
    winding::Reversed,
};

mod util;
use self::util::*;


fn face_winding(mesh: &Mesh2D, face: FaceHandle) -> Winding {
    let points = mesh.face_vertices(face).map(|v| mesh.position(v)).collect::<Vec<_>>();
    Winding::of_polygon(points.iter().copied())
}

fn build(faces: &[Vec<usize>], winding: Winding) -> Mesh2D {
    let coords = grid_coords();
    let conv = match winding {
        Winding::Clockwise => {
            let reversed = Reversed(coords.winding());
            Converter::new().convert_faces_2d(faces, &coords, Some(&reversed))
        }
        _ => Converter::new().convert_faces_2d(faces, &coords, None),
    };
    conv.unwrap().into_mesh()
}

/// Interior faces have `interior` winding, boundary faces the reverse.
fn assert_windings(mesh: &Mesh2D, interior: Winding) {
    mesh.check_integrity();
    for f in mesh.faces() {
        let expected = match mesh.face_status(f) {
            FaceStatus::Boundary => interior.reverse(),
            _ => interior,
        };
        assert_eq!(face_winding(mesh, f), expected, "winding of {:?}", f);
    }
}

#[test]
fn single_face() {
    init();
    let faces = vec![vec![v(0, 0), v(0, 1), v(0, 2), v(1, 0)]];
    let mesh = build(&faces, Winding::CounterClockwise);
    let face = mesh.faces().find(|&f| mesh.face_status(f) == FaceStatus::Interior).unwrap();

    let to_origin = mesh.face_edges(face)
        .find(|&he| mesh.position(mesh.head(he)) == Point2::new(0.0, 0.0))
        .unwrap();
    assert_eq!(mesh.position(mesh.head(mesh.next(to_origin))), Point2::new(1.0, 0.0));
    assert_windings(&mesh, Winding::CounterClockwise);
}

#[test]
fn degenerate_face() {
    init();
    let faces = vec![vec![v(0, 0), v(0, 1), v(0, 2)]];
    for &w in &[Winding::CounterClockwise, Winding::Clockwise] {
        let mesh = build(&faces, w);
        let face = mesh.faces().find(|&f| mesh.face_status(f) == FaceStatus::Interior).unwrap();
        assert_eq!(face_winding(&mesh, face), Winding::Undetermined);
    }
}

#[test]
fn four_quads() {
    init();
    let faces = vec![
        vec![v(0, 0), v(10, 0), v(10, 10), v(0, 10)],
        vec![v(10, 0), v(10, 10), v(20, 10), v(20, 0)],
        vec![v(0, 10), v(10, 10), v(10, 20), v(0, 20)],
        vec![v(10, 10), v(10, 20), v(20, 20), v(20, 10)],
    ];

    assert_windings(&build(&faces, Winding::CounterClockwise), Winding::CounterClockwise);
    assert_windings(&build(&faces, Winding::Clockwise), Winding::Clockwise);
}

#[test]
fn shuffled_fan() {
    init();
    let n = 100;
    let center = v(2000, 2000);
    let rim = (0..n)
        .map(|i| {
            let angle = std::f64::consts::PI * 2.0 * i as f64 / n as f64;
            let x = 2000 + (2000.0 * angle.cos()) as i64;
            let y = 2000 + (2000.0 * angle.sin()) as i64;
            v(x as usize, y as usize)
        })
        .collect::<Vec<_>>();

    // 37 and 100 are coprime, so this visits every triangle once.
    let faces = (0..n)
        .map(|i| (i * 37) % n)
        .map(|i| vec![center, rim[i], rim[(i + 1) % n]])
        .collect::<Vec<_>>();

    let mesh = build(&faces, Winding::CounterClockwise);
    assert_counts(&mesh, n + 1, 4 * n, n + 1);
    assert_windings(&mesh, Winding::CounterClockwise);

    assert_windings(&build(&faces, Winding::Clockwise), Winding::Clockwise);
}

#[test]
fn closure_provider() {
    init();
    // Points with a y axis pointing down.
    let flipped = |ids: &[usize]| {
        let coords = grid_coords();
        let points = ids.iter()
            .map(|&i| {
                let p = coords.coord(i);
                Point2::new(p.x, -p.y)
            })
            .collect::<Vec<_>>();
        Winding::of_polygon(points.iter().copied())
    };

    let faces = vec![vec![v(0, 0), v(1, 0), v(1, 1), v(0, 1)]];
    let mesh = Converter::new()
        .convert_faces_2d(&faces[..], &grid_coords(), Some(&flipped))
        .unwrap()
        .into_mesh();
    assert_windings(&mesh, Winding::Clockwise);
}

#[test]
fn display() {
    assert_eq!(Winding::Clockwise.to_string(), "clockwise");
    assert_eq!(Winding::CounterClockwise.to_string(), "counterclockwise");
    assert_eq!(Winding::Undetermined.reverse(), Winding::Undetermined);
}
