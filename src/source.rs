//! Input abstractions for the mesh builder.
//!
//! The builder never owns the caller's data. It reads polygons, edges and
//! coordinates through the small traits in this module, which are implemented
//! for the obvious slice types. For everything else, there are the closure
//! based [`FnFaces`], [`FnEdges`] and [`FnCoords`].

use std::{borrow::Cow, ops::Range};

use cgmath::{Point2, Point3};

use crate::winding::{Winding, WindingProvider};


/// A list of polygons, each given as cyclic list of vertex indices.
pub trait FaceSource {
    /// The range of valid face indices.
    fn face_indices(&self) -> Range<usize>;

    /// The vertex indices of the face with the given index, in order.
    fn face(&self, index: usize) -> Cow<'_, [usize]>;
}

impl FaceSource for [Vec<usize>] {
    fn face_indices(&self) -> Range<usize> {
        0..self.len()
    }
    fn face(&self, index: usize) -> Cow<'_, [usize]> {
        Cow::Borrowed(&self[index])
    }
}

impl FaceSource for Vec<Vec<usize>> {
    fn face_indices(&self) -> Range<usize> {
        0..self.len()
    }
    fn face(&self, index: usize) -> Cow<'_, [usize]> {
        Cow::Borrowed(&self[index])
    }
}

impl<const N: usize> FaceSource for [[usize; N]] {
    fn face_indices(&self) -> Range<usize> {
        0..self.len()
    }
    fn face(&self, index: usize) -> Cow<'_, [usize]> {
        Cow::Borrowed(&self[index][..])
    }
}

/// A face source defined by an index range and a closure.
#[derive(Clone, Debug)]
pub struct FnFaces<F> {
    pub indices: Range<usize>,
    pub face: F,
}

impl<F> FaceSource for FnFaces<F>
where
    F: Fn(usize) -> Vec<usize>,
{
    fn face_indices(&self) -> Range<usize> {
        self.indices.clone()
    }
    fn face(&self, index: usize) -> Cow<'_, [usize]> {
        Cow::Owned((self.face)(index))
    }
}


/// A list of undirected edges, each given by the indices of its two vertices.
pub trait EdgeSource {
    /// The range of valid edge indices.
    fn edge_indices(&self) -> Range<usize>;

    /// Index of the first vertex of the given edge.
    fn edge_v1(&self, index: usize) -> usize;

    /// Index of the second vertex of the given edge.
    fn edge_v2(&self, index: usize) -> usize;
}

impl EdgeSource for [[usize; 2]] {
    fn edge_indices(&self) -> Range<usize> {
        0..self.len()
    }
    fn edge_v1(&self, index: usize) -> usize {
        self[index][0]
    }
    fn edge_v2(&self, index: usize) -> usize {
        self[index][1]
    }
}

impl EdgeSource for [(usize, usize)] {
    fn edge_indices(&self) -> Range<usize> {
        0..self.len()
    }
    fn edge_v1(&self, index: usize) -> usize {
        self[index].0
    }
    fn edge_v2(&self, index: usize) -> usize {
        self[index].1
    }
}

/// An edge source defined by an index range and a closure returning both
/// vertex indices.
#[derive(Clone, Debug)]
pub struct FnEdges<F> {
    pub indices: Range<usize>,
    pub edge: F,
}

impl<F> EdgeSource for FnEdges<F>
where
    F: Fn(usize) -> (usize, usize),
{
    fn edge_indices(&self) -> Range<usize> {
        self.indices.clone()
    }
    fn edge_v1(&self, index: usize) -> usize {
        (self.edge)(index).0
    }
    fn edge_v2(&self, index: usize) -> usize {
        (self.edge)(index).1
    }
}


/// 2D positions of input vertices.
pub trait Coord2Source {
    fn coord(&self, vertex_index: usize) -> Point2<f64>;

    /// Returns a winding provider that uses these coordinates.
    fn winding(&self) -> CoordWinding<'_, Self> {
        CoordWinding(self)
    }
}

impl Coord2Source for [Point2<f64>] {
    fn coord(&self, vertex_index: usize) -> Point2<f64> {
        self[vertex_index]
    }
}

impl Coord2Source for [[f64; 2]] {
    fn coord(&self, vertex_index: usize) -> Point2<f64> {
        self[vertex_index].into()
    }
}

/// 2D coordinates computed by a closure from the vertex index.
#[derive(Clone, Copy, Debug)]
pub struct FnCoords<F>(pub F);

impl<F> Coord2Source for FnCoords<F>
where
    F: Fn(usize) -> Point2<f64>,
{
    fn coord(&self, vertex_index: usize) -> Point2<f64> {
        (self.0)(vertex_index)
    }
}

/// 3D positions of input vertices.
pub trait Coord3Source {
    fn coord(&self, vertex_index: usize) -> Point3<f64>;

    /// Returns a winding provider that uses the projection of these
    /// coordinates onto the xy plane.
    fn xy_winding(&self) -> XyWinding<'_, Self> {
        XyWinding(self)
    }
}

impl Coord3Source for [Point3<f64>] {
    fn coord(&self, vertex_index: usize) -> Point3<f64> {
        self[vertex_index]
    }
}

impl Coord3Source for [[f64; 3]] {
    fn coord(&self, vertex_index: usize) -> Point3<f64> {
        self[vertex_index].into()
    }
}

/// Winding provider backed by 2D coordinates.
#[derive(Debug)]
pub struct CoordWinding<'a, C: ?Sized>(&'a C);

impl<C: Coord2Source + ?Sized> WindingProvider for CoordWinding<'_, C> {
    fn winding(&self, vertex_indices: &[usize]) -> Winding {
        Winding::of_polygon(vertex_indices.iter().map(|&i| self.0.coord(i)))
    }
}

/// Winding provider backed by the xy projection of 3D coordinates.
#[derive(Debug)]
pub struct XyWinding<'a, C: ?Sized>(&'a C);

impl<C: Coord3Source + ?Sized> WindingProvider for XyWinding<'_, C> {
    fn winding(&self, vertex_indices: &[usize]) -> Winding {
        Winding::of_polygon(vertex_indices.iter().map(|&i| {
            let p = self.0.coord(i);
            Point2::new(p.x, p.y)
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_sources() {
        let faces = vec![vec![0, 1, 2], vec![2, 1, 3]];
        assert_eq!(faces.face_indices(), 0..2);
        assert_eq!(&*faces.face(1), &[2, 1, 3]);

        let edges: &[[usize; 2]] = &[[0, 1], [1, 2]];
        assert_eq!(edges.edge_v1(1), 1);
        assert_eq!(edges.edge_v2(1), 2);
    }

    #[test]
    fn closure_sources() {
        let quads = FnFaces { indices: 0..3, face: |i| vec![i, i + 1, i + 2, i + 3] };
        assert_eq!(&*quads.face(2), &[2, 3, 4, 5]);

        let chain = FnEdges { indices: 0..4, edge: |i| (i, i + 1) };
        assert_eq!((chain.edge_v1(3), chain.edge_v2(3)), (3, 4));
    }

    #[test]
    fn coordinate_windings() {
        let coords: &[[f64; 2]] = &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 0.0]];
        let winding = coords.winding();
        assert_eq!(winding.winding(&[0, 1, 2]), Winding::CounterClockwise);
        assert_eq!(winding.winding(&[0, 2, 1]), Winding::Clockwise);
        assert_eq!(winding.winding(&[0, 1, 3]), Winding::Undetermined);

        let grid = FnCoords(|i: usize| Point2::new((i % 100) as f64, (i / 100) as f64));
        assert_eq!(grid.winding().winding(&[0, 1, 101, 100]), Winding::CounterClockwise);

        let coords3: &[[f64; 3]] = &[[0.0, 0.0, 5.0], [1.0, 0.0, -2.0], [0.0, 1.0, 0.0]];
        assert_eq!(coords3.xy_winding().winding(&[0, 1, 2]), Winding::CounterClockwise);
    }
}
