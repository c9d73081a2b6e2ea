//! Building half edge meshes from polygons or edges.
//!
//! The entry point is the [`Converter`]. It reads polygons (a [`FaceSource`])
//! or undirected edges (an [`EdgeSource`]) and builds a [`HalfEdgeMesh`] (or
//! a [`Mesh2D`]/[`Mesh3D`] when coordinates are given). The result is a
//! [`Conversion`], which also remembers which input index every vertex, half
//! edge or face came from, so that input data can be projected onto the mesh.
//!
//! ```
//! use halfmesh::prelude::*;
//!
//! // Two quads sharing the edge 1-4.
//! let faces = vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4]];
//! let conv = Converter::new().convert_faces(&faces[..], None).unwrap();
//! let mesh = conv.mesh();
//!
//! assert_eq!(mesh.num_vertices(), 6);
//! assert_eq!(mesh.num_half_edges(), 14);
//! assert_eq!(mesh.num_faces(), 3);
//!
//! // The outer rim was added as boundary face without input index.
//! let boundary = mesh.faces()
//!     .filter(|&f| mesh.face_status(f) == FaceStatus::Boundary)
//!     .collect::<Vec<_>>();
//! assert_eq!(boundary.len(), 1);
//! assert_eq!(conv.face_index(boundary[0]), None);
//! ```
//!
//! # Rejected input
//!
//! Polygons with fewer than three vertices, polygons visiting a vertex twice,
//! polygons using an edge that already borders two other polygons and edges
//! connecting a vertex to itself are skipped with a warning (via `log`). A
//! conversion fails as a whole (returning [`ConvertError`]) if the remaining
//! input cannot be turned into a valid mesh. No partially built mesh is ever
//! returned.

use std::{fmt, marker::PhantomData};

use failure::Fail;
use fxhash::FxHashMap;

use crate::{
    handle::{FaceHandle, HalfEdgeHandle, Handle, VertexHandle},
    map::{BoolMap, DataMap, DoubleMap, Elements, IntMap, ValueMap},
    mesh::{Config, FaceStatus, HalfEdgeMesh, Mesh2D, Mesh3D, MeshView, OmitPrev},
    source::{Coord2Source, Coord3Source, EdgeSource, FaceSource},
    winding::WindingProvider,
};

mod arrow;
mod completion;
mod cycles;
mod edges;
mod faces;

use self::{
    arrow::ArrowSorter,
    completion::Completion,
    cycles::CycleGraph,
};


/// Reasons why a conversion can fail.
///
/// Vertices are named by their input index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum ConvertError {
    /// Following `next` links from a half edge did not lead back to it.
    #[fail(display = "a face loop through vertex {} is not closed", vertex)]
    UnclosedFace { vertex: usize },

    /// A face loop contains both half edges of one edge.
    #[fail(display = "a face loop through vertex {} runs along both sides of an edge", vertex)]
    DegenerateFace { vertex: usize },

    /// Two polygons run along one edge in the same direction and cannot be
    /// oriented consistently.
    #[fail(display = "face {} conflicts with the orientation of its neighbors", face)]
    ConflictingCycles { face: usize },

    /// The half edges around a vertex have to be ordered by angle, but no
    /// winding provider was given.
    #[fail(display = "vertex {} is ambiguous and no winding provider was given", vertex)]
    MissingWinding { vertex: usize },
}

/// Runtime options of a [`Converter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Checks the integrity of every built mesh (panicking on failure) and
    /// logs all faces with their input vertex indices at `debug` level.
    pub debug_info: bool,
}

/// Builds half edge meshes from polygons or edges.
///
/// The type parameter chooses the memory layout of the built mesh (see
/// [`Config`]).
pub struct Converter<C: Config = OmitPrev> {
    options: ConvertOptions,
    _config: PhantomData<C>,
}

impl Converter<OmitPrev> {
    /// Creates a converter with default options that builds meshes without
    /// stored `prev` handles.
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }
}

impl Default for Converter<OmitPrev> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Config> Clone for Converter<C> {
    fn clone(&self) -> Self {
        Self::with_options(self.options)
    }
}

impl<C: Config> fmt::Debug for Converter<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Converter").field("options", &self.options).finish()
    }
}

/// The result of building a mesh, before positions are attached.
struct Built<C: Config> {
    mesh: HalfEdgeMesh<C>,
    vertex_indices: DataMap<VertexHandle, usize>,
    edge_indices: Option<DataMap<HalfEdgeHandle, usize>>,
    face_indices: Option<DataMap<FaceHandle, usize>>,
}

impl<C: Config> Built<C> {
    fn into_conversion<M>(self, make_mesh: impl FnOnce(HalfEdgeMesh<C>) -> M) -> Conversion<M> {
        Conversion {
            mesh: make_mesh(self.mesh),
            vertex_indices: self.vertex_indices,
            edge_indices: self.edge_indices,
            face_indices: self.face_indices,
        }
    }
}

impl<C: Config> Converter<C> {
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            _config: PhantomData,
        }
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Builds a mesh from polygons.
    ///
    /// Input polygons become `Interior` faces. Each connected group of
    /// polygons is oriented consistently; with a winding provider, loops are
    /// oriented counterclockwise. The outer rim and holes are added as
    /// `Boundary` faces.
    ///
    /// The winding provider is also needed when the polygons meet at a
    /// vertex in an ambiguous way (e.g. two polygons touching only at one
    /// vertex). Without one, such input fails with
    /// [`ConvertError::MissingWinding`].
    pub fn convert_faces<F>(
        &self,
        faces: &F,
        winding: Option<&dyn WindingProvider>,
    ) -> Result<Conversion<HalfEdgeMesh<C>>, ConvertError>
    where
        F: FaceSource + ?Sized,
    {
        let built = self.build_from_faces(faces, winding)?;
        Ok(built.into_conversion(|mesh| mesh))
    }

    /// Like [`convert_faces`][Converter::convert_faces], but also stores the
    /// given positions. If no winding provider is given, the winding of the
    /// coordinates is used.
    pub fn convert_faces_2d<F, P>(
        &self,
        faces: &F,
        coords: &P,
        winding: Option<&dyn WindingProvider>,
    ) -> Result<Conversion<Mesh2D<C>>, ConvertError>
    where
        F: FaceSource + ?Sized,
        P: Coord2Source + ?Sized,
    {
        let coord_winding = coords.winding();
        let built = self.build_from_faces(faces, Some(winding.unwrap_or(&coord_winding)))?;
        Ok(with_positions_2d(built, coords))
    }

    /// Like [`convert_faces`][Converter::convert_faces], but also stores the
    /// given positions. If no winding provider is given, the winding of the
    /// coordinates projected onto the xy plane is used.
    pub fn convert_faces_3d<F, P>(
        &self,
        faces: &F,
        coords: &P,
        winding: Option<&dyn WindingProvider>,
    ) -> Result<Conversion<Mesh3D<C>>, ConvertError>
    where
        F: FaceSource + ?Sized,
        P: Coord3Source + ?Sized,
    {
        let coord_winding = coords.xy_winding();
        let built = self.build_from_faces(faces, Some(winding.unwrap_or(&coord_winding)))?;
        Ok(with_positions_3d(built, coords))
    }

    /// Builds a mesh from undirected edges.
    ///
    /// The half edges around each vertex are ordered by angle (via `winding`)
    /// and every resulting loop becomes a face with status `Unknown`. Of
    /// several edges between the same two vertices, only the first is used.
    pub fn convert_edges<E>(
        &self,
        edges: &E,
        winding: &dyn WindingProvider,
    ) -> Result<Conversion<HalfEdgeMesh<C>>, ConvertError>
    where
        E: EdgeSource + ?Sized,
    {
        let built = self.build_from_edges(edges, winding)?;
        Ok(built.into_conversion(|mesh| mesh))
    }

    /// Like [`convert_edges`][Converter::convert_edges], but also stores the
    /// given positions. If no winding provider is given, the winding of the
    /// coordinates is used.
    pub fn convert_edges_2d<E, P>(
        &self,
        edges: &E,
        coords: &P,
        winding: Option<&dyn WindingProvider>,
    ) -> Result<Conversion<Mesh2D<C>>, ConvertError>
    where
        E: EdgeSource + ?Sized,
        P: Coord2Source + ?Sized,
    {
        let coord_winding = coords.winding();
        let built = self.build_from_edges(edges, winding.unwrap_or(&coord_winding))?;
        Ok(with_positions_2d(built, coords))
    }

    /// Like [`convert_edges`][Converter::convert_edges], but also stores the
    /// given positions. If no winding provider is given, the winding of the
    /// coordinates projected onto the xy plane is used.
    pub fn convert_edges_3d<E, P>(
        &self,
        edges: &E,
        coords: &P,
        winding: Option<&dyn WindingProvider>,
    ) -> Result<Conversion<Mesh3D<C>>, ConvertError>
    where
        E: EdgeSource + ?Sized,
        P: Coord3Source + ?Sized,
    {
        let coord_winding = coords.xy_winding();
        let built = self.build_from_edges(edges, winding.unwrap_or(&coord_winding))?;
        Ok(with_positions_3d(built, coords))
    }

    fn build_from_faces<F>(
        &self,
        faces: &F,
        winding: Option<&dyn WindingProvider>,
    ) -> Result<Built<C>, ConvertError>
    where
        F: FaceSource + ?Sized,
    {
        let mut builder = Builder::new();
        let mut graph = CycleGraph::new();
        for index in faces.face_indices() {
            graph.add_cycle(&mut builder, index, &faces.face(index));
        }

        let cycles = faces::link_cycles(&mut builder, &graph, winding)?;
        let sorter = winding.map(ArrowSorter::new);
        let loops = Completion::new(&mut builder, sorter, &cycles).run()?;

        let mut face_indices = DataMap::new();
        for l in loops {
            match l.cycle {
                Some(cycle) => {
                    let face = builder.mesh.add_face(l.start, FaceStatus::Interior);
                    face_indices.set(face, graph.face_index(cycle));
                }
                None => {
                    builder.mesh.add_face(l.start, FaceStatus::Boundary);
                }
            }
        }

        self.finish(builder, None, Some(face_indices))
    }

    fn build_from_edges<E>(&self, edges: &E, winding: &dyn WindingProvider) -> Result<Built<C>, ConvertError>
    where
        E: EdgeSource + ?Sized,
    {
        let mut builder = Builder::new();
        let mut edge_indices = DataMap::new();
        edges::synthesize(&mut builder, edges, ArrowSorter::new(winding), &mut edge_indices)?;

        self.finish(builder, Some(edge_indices), None)
    }

    fn finish(
        &self,
        builder: Builder<C>,
        edge_indices: Option<DataMap<HalfEdgeHandle, usize>>,
        face_indices: Option<DataMap<FaceHandle, usize>>,
    ) -> Result<Built<C>, ConvertError> {
        let Builder { mut mesh, vertex_indices, .. } = builder;

        // Star linking overwrites `next` links, which can leave stale `prev`
        // handles behind.
        let half_edges = mesh.half_edges().collect::<Vec<_>>();
        for he in half_edges {
            mesh.link(he, mesh.next(he));
        }

        log::debug!(
            "built mesh with {} vertices, {} half edges and {} faces",
            mesh.num_vertices(),
            mesh.num_half_edges(),
            mesh.num_faces(),
        );

        if self.options.debug_info {
            mesh.check_integrity();
            for f in mesh.faces() {
                let vertices = mesh.face_vertices(f)
                    .map(|v| vertex_indices.get(v).copied())
                    .collect::<Vec<_>>();
                log::debug!("{:?} ({}): {:?}", f, mesh.face_status(f), vertices);
            }
        }

        Ok(Built { mesh, vertex_indices, edge_indices, face_indices })
    }
}

fn with_positions_2d<C, P>(built: Built<C>, coords: &P) -> Conversion<Mesh2D<C>>
where
    C: Config,
    P: Coord2Source + ?Sized,
{
    let mut positions = DataMap::new();
    for (v, &index) in built.vertex_indices.iter() {
        positions.set(v, coords.coord(index));
    }
    built.into_conversion(|mesh| Mesh2D::new(mesh, positions))
}

fn with_positions_3d<C, P>(built: Built<C>, coords: &P) -> Conversion<Mesh3D<C>>
where
    C: Config,
    P: Coord3Source + ?Sized,
{
    let mut positions = DataMap::new();
    for (v, &index) in built.vertex_indices.iter() {
        positions.set(v, coords.coord(index));
    }
    built.into_conversion(|mesh| Mesh3D::new(mesh, positions))
}


// ===============================================================================================
// ===== Internal builder state
// ===============================================================================================

/// The mesh under construction and the vertices created so far.
pub(crate) struct Builder<C: Config> {
    pub(crate) mesh: HalfEdgeMesh<C>,
    vertex_indices: DataMap<VertexHandle, usize>,
    memo: FxHashMap<usize, VertexHandle>,
}

impl<C: Config> Builder<C> {
    pub(crate) fn new() -> Self {
        Self {
            mesh: HalfEdgeMesh::new(),
            vertex_indices: DataMap::new(),
            memo: FxHashMap::default(),
        }
    }

    /// Returns the vertex for the given input index, creating it on first
    /// use.
    pub(crate) fn vertex(&mut self, index: usize) -> VertexHandle {
        let mesh = &mut self.mesh;
        let indices = &mut self.vertex_indices;
        *self.memo.entry(index).or_insert_with(|| {
            let v = mesh.add_vertex();
            indices.set(v, index);
            v
        })
    }

    /// The input index of a vertex created by this builder.
    pub(crate) fn input_index(&self, v: VertexHandle) -> usize {
        self.vertex_indices[v]
    }
}


// ===============================================================================================
// ===== Conversion results
// ===============================================================================================

/// A built mesh together with the input index of each element.
///
/// Vertices always have an input index. Half edges have one for edge input
/// (both half edges of an input edge get its index); faces have one for face
/// input, except for synthesized `Boundary` faces. Elements added later by
/// edit operations have none.
#[derive(Debug, Clone)]
pub struct Conversion<M> {
    mesh: M,
    vertex_indices: DataMap<VertexHandle, usize>,
    edge_indices: Option<DataMap<HalfEdgeHandle, usize>>,
    face_indices: Option<DataMap<FaceHandle, usize>>,
}

impl<M: MeshView> Conversion<M> {
    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    /// Mutable access to the mesh, e.g. to edit it before projecting data.
    pub fn mesh_mut(&mut self) -> &mut M {
        &mut self.mesh
    }

    pub fn into_mesh(self) -> M {
        self.mesh
    }

    /// The input index of `v`.
    pub fn vertex_index(&self, v: VertexHandle) -> Option<usize> {
        self.vertex_indices.get(v).copied()
    }

    /// The index of the input edge `he` was created for.
    ///
    /// Panics if the mesh was not built from edges.
    pub fn edge_index(&self, he: HalfEdgeHandle) -> Option<usize> {
        self.edge_indices().get(he).copied()
    }

    /// The index of the input polygon `f` was created for. `None` for
    /// boundary faces.
    ///
    /// Panics if the mesh was not built from faces.
    pub fn face_index(&self, f: FaceHandle) -> Option<usize> {
        self.face_indices().get(f).copied()
    }

    fn edge_indices(&self) -> &DataMap<HalfEdgeHandle, usize> {
        match &self.edge_indices {
            Some(indices) => indices,
            None => panic!("edge data is not available for a conversion from faces"),
        }
    }

    fn face_indices(&self) -> &DataMap<FaceHandle, usize> {
        match &self.face_indices {
            Some(indices) => indices,
            None => panic!("face data is not available for a conversion from edges"),
        }
    }

    /// Maps every vertex to `f(input_index)`.
    pub fn vertex_data<T>(&self, f: impl FnMut(usize) -> T) -> DataMap<VertexHandle, T> {
        project_data(self.mesh.core(), &self.vertex_indices, f)
    }

    pub fn vertex_bool_data(&self, f: impl FnMut(usize) -> bool) -> BoolMap<VertexHandle> {
        project_values(self.mesh.core(), &self.vertex_indices, f)
    }

    pub fn vertex_int_data(&self, f: impl FnMut(usize) -> i32) -> IntMap<VertexHandle> {
        project_values(self.mesh.core(), &self.vertex_indices, f)
    }

    pub fn vertex_double_data(&self, f: impl FnMut(usize) -> f64) -> DoubleMap<VertexHandle> {
        project_values(self.mesh.core(), &self.vertex_indices, f)
    }

    /// Maps every half edge to `f(input_edge_index)`.
    ///
    /// Panics if the mesh was not built from edges.
    pub fn edge_data<T>(&self, f: impl FnMut(usize) -> T) -> DataMap<HalfEdgeHandle, T> {
        project_data(self.mesh.core(), self.edge_indices(), f)
    }

    pub fn edge_bool_data(&self, f: impl FnMut(usize) -> bool) -> BoolMap<HalfEdgeHandle> {
        project_values(self.mesh.core(), self.edge_indices(), f)
    }

    pub fn edge_int_data(&self, f: impl FnMut(usize) -> i32) -> IntMap<HalfEdgeHandle> {
        project_values(self.mesh.core(), self.edge_indices(), f)
    }

    pub fn edge_double_data(&self, f: impl FnMut(usize) -> f64) -> DoubleMap<HalfEdgeHandle> {
        project_values(self.mesh.core(), self.edge_indices(), f)
    }

    /// Maps every face to `f(input_face_index)`. Boundary faces get no
    /// value.
    ///
    /// Panics if the mesh was not built from faces.
    pub fn face_data<T>(&self, f: impl FnMut(usize) -> T) -> DataMap<FaceHandle, T> {
        project_data(self.mesh.core(), self.face_indices(), f)
    }

    /// Boundary faces map to `false`.
    pub fn face_bool_data(&self, f: impl FnMut(usize) -> bool) -> BoolMap<FaceHandle> {
        project_values(self.mesh.core(), self.face_indices(), f)
    }

    /// Boundary faces map to 0.
    pub fn face_int_data(&self, f: impl FnMut(usize) -> i32) -> IntMap<FaceHandle> {
        project_values(self.mesh.core(), self.face_indices(), f)
    }

    /// Boundary faces map to 0.0.
    pub fn face_double_data(&self, f: impl FnMut(usize) -> f64) -> DoubleMap<FaceHandle> {
        project_values(self.mesh.core(), self.face_indices(), f)
    }
}

fn project_data<H, E, T>(
    elements: &E,
    indices: &DataMap<H, usize>,
    mut f: impl FnMut(usize) -> T,
) -> DataMap<H, T>
where
    H: Handle,
    E: Elements<H> + ?Sized,
{
    let mut out = DataMap::new();
    for h in elements.element_handles() {
        if let Some(&index) = indices.get(h) {
            out.set(h, f(index));
        }
    }
    out
}

fn project_values<H, E, T>(
    elements: &E,
    indices: &DataMap<H, usize>,
    mut f: impl FnMut(usize) -> T,
) -> ValueMap<H, T>
where
    H: Handle,
    E: Elements<H> + ?Sized,
    T: Copy + Default,
{
    let mut out = ValueMap::new();
    for h in elements.element_handles() {
        if let Some(&index) = indices.get(h) {
            out.set(h, f(index));
        }
    }
    out
}
