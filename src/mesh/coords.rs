//! Meshes that carry a position per vertex.

use std::fmt;

use cgmath::{Point2, Point3};
use derive_more::{Deref, DerefMut};

use crate::{
    handle::{HalfEdgeHandle, VertexHandle},
    map::DataMap,
};
use super::{Config, HalfEdgeMesh, MeshView, OmitPrev};


/// A half edge mesh with a 2D position per vertex.
///
/// Dereferences to the underlying [`HalfEdgeMesh`], so all queries and edit
/// operations are available directly.
#[derive(Deref, DerefMut)]
pub struct Mesh2D<C: Config = OmitPrev> {
    #[deref]
    #[deref_mut]
    mesh: HalfEdgeMesh<C>,
    positions: DataMap<VertexHandle, Point2<f64>>,
}

impl<C: Config> Mesh2D<C> {
    pub fn new(mesh: HalfEdgeMesh<C>, positions: DataMap<VertexHandle, Point2<f64>>) -> Self {
        Self { mesh, positions }
    }

    pub fn mesh(&self) -> &HalfEdgeMesh<C> {
        &self.mesh
    }

    pub fn into_parts(self) -> (HalfEdgeMesh<C>, DataMap<VertexHandle, Point2<f64>>) {
        (self.mesh, self.positions)
    }

    /// Returns the position of `vertex`. Panics if it has none.
    pub fn position(&self, vertex: VertexHandle) -> Point2<f64> {
        self.positions[vertex]
    }

    pub fn set_position(&mut self, vertex: VertexHandle, position: Point2<f64>) {
        self.positions.set(vertex, position);
    }

    pub fn vertex_x(&self, vertex: VertexHandle) -> f64 {
        self.position(vertex).x
    }

    pub fn vertex_y(&self, vertex: VertexHandle) -> f64 {
        self.position(vertex).y
    }

    pub fn positions(&self) -> &DataMap<VertexHandle, Point2<f64>> {
        &self.positions
    }

    /// Splits the edge of `edge` (see [`HalfEdgeMesh::split_edge`]) and
    /// places the new vertex at `position`.
    pub fn split_edge_at(&mut self, edge: HalfEdgeHandle, position: Point2<f64>) -> VertexHandle {
        let vertex = self.mesh.split_edge(edge);
        self.positions.set(vertex, position);
        vertex
    }
}

impl<C: Config> Clone for Mesh2D<C> {
    fn clone(&self) -> Self {
        Self {
            mesh: self.mesh.clone(),
            positions: self.positions.clone(),
        }
    }
}

impl<C: Config> fmt::Debug for Mesh2D<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mesh2D")
            .field("mesh", &self.mesh)
            .field("positions", &self.positions)
            .finish()
    }
}

impl<C: Config> MeshView for Mesh2D<C> {
    type Config = C;

    fn core(&self) -> &HalfEdgeMesh<C> {
        &self.mesh
    }
}


/// A half edge mesh with a 3D position per vertex.
///
/// Dereferences to the underlying [`HalfEdgeMesh`], so all queries and edit
/// operations are available directly.
#[derive(Deref, DerefMut)]
pub struct Mesh3D<C: Config = OmitPrev> {
    #[deref]
    #[deref_mut]
    mesh: HalfEdgeMesh<C>,
    positions: DataMap<VertexHandle, Point3<f64>>,
}

impl<C: Config> Mesh3D<C> {
    pub fn new(mesh: HalfEdgeMesh<C>, positions: DataMap<VertexHandle, Point3<f64>>) -> Self {
        Self { mesh, positions }
    }

    pub fn mesh(&self) -> &HalfEdgeMesh<C> {
        &self.mesh
    }

    pub fn into_parts(self) -> (HalfEdgeMesh<C>, DataMap<VertexHandle, Point3<f64>>) {
        (self.mesh, self.positions)
    }

    /// Returns the position of `vertex`. Panics if it has none.
    pub fn position(&self, vertex: VertexHandle) -> Point3<f64> {
        self.positions[vertex]
    }

    pub fn set_position(&mut self, vertex: VertexHandle, position: Point3<f64>) {
        self.positions.set(vertex, position);
    }

    pub fn vertex_x(&self, vertex: VertexHandle) -> f64 {
        self.position(vertex).x
    }

    pub fn vertex_y(&self, vertex: VertexHandle) -> f64 {
        self.position(vertex).y
    }

    pub fn vertex_z(&self, vertex: VertexHandle) -> f64 {
        self.position(vertex).z
    }

    pub fn positions(&self) -> &DataMap<VertexHandle, Point3<f64>> {
        &self.positions
    }

    /// Splits the edge of `edge` (see [`HalfEdgeMesh::split_edge`]) and
    /// places the new vertex at `position`.
    pub fn split_edge_at(&mut self, edge: HalfEdgeHandle, position: Point3<f64>) -> VertexHandle {
        let vertex = self.mesh.split_edge(edge);
        self.positions.set(vertex, position);
        vertex
    }
}

impl<C: Config> Clone for Mesh3D<C> {
    fn clone(&self) -> Self {
        Self {
            mesh: self.mesh.clone(),
            positions: self.positions.clone(),
        }
    }
}

impl<C: Config> fmt::Debug for Mesh3D<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mesh3D")
            .field("mesh", &self.mesh)
            .field("positions", &self.positions)
            .finish()
    }
}

impl<C: Config> MeshView for Mesh3D<C> {
    type Config = C;

    fn core(&self) -> &HalfEdgeMesh<C> {
        &self.mesh
    }
}
