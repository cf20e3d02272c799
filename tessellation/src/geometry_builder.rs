//! Tools for generating vertex and index buffers from the triangulators.
//!
//! Ported from the teacher's `geometry_builder` module
//! (`tessellation/src/geometry_builder.rs`): a `GeometryBuilder` trait that
//! separates "add a vertex" / "add a triangle" from the concrete vertex
//! layout an application wants, plus a `VertexBuffers<T>` convenience type
//! and a `BuffersBuilder` that offsets indices so algorithms never need to
//! know where in a larger buffer their output lands.
//!
//! This module additionally threads through the boundary-info triple that
//! spec §6 requires: a 3-bit mask per emitted triangle telling the caller
//! which of its three edges lie on the original polygon's boundary (used to
//! draw outlines without drawing triangulation diagonals).

use alloc::vec::Vec;
use core::ops::Add;

pub type Index = u32;

/// A virtual vertex offset in a geometry, valid only between
/// `begin_geometry` and `end_geometry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub Index);

impl VertexId {
    pub fn offset(&self) -> Index {
        self.0
    }
}

/// Separates triangulators from the concrete vertex layout.
pub trait GeometryBuilder<Input> {
    fn begin_geometry(&mut self);
    fn end_geometry(&mut self) -> Count;
    fn add_vertex(&mut self, vertex: Input) -> VertexId;
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);
    fn abort_geometry(&mut self);
}

/// A `GeometryBuilder` that also records, per triangle, which of its three
/// edges (`a-b`, `b-c`, `c-a`) lie on the original polygon's boundary (spec
/// §6's `BoundaryInfo`, used by the `TRIANGLES_WITH_BOUNDARY`/
/// `FAN_WITH_BOUNDARY` output layouts).
pub trait BoundaryGeometryBuilder<Input>: GeometryBuilder<Input> {
    fn add_triangle_with_boundary(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
        boundary: BoundaryInfo,
    );
}

/// Bit `0` = edge `(v0, v1)` is a boundary edge, bit `1` = `(v1, v2)`, bit
/// `2` = `(v2, v0)` (spec §6).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BoundaryInfo(pub u8);

impl BoundaryInfo {
    pub const NONE: BoundaryInfo = BoundaryInfo(0);

    pub fn new(ab: bool, bc: bool, ca: bool) -> Self {
        BoundaryInfo((ab as u8) | ((bc as u8) << 1) | ((ca as u8) << 2))
    }

    pub fn ab(self) -> bool {
        self.0 & 0b001 != 0
    }
    pub fn bc(self) -> bool {
        self.0 & 0b010 != 0
    }
    pub fn ca(self) -> bool {
        self.0 & 0b100 != 0
    }
}

/// How a triangulator's output index buffer is laid out, per spec §6.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriangleLayout {
    /// Flat triples of indices, one triangle each.
    Triangles,
    /// Same index layout as `Triangles`; a parallel `BoundaryInfo` buffer is
    /// also populated.
    TrianglesWithBoundary,
    /// A triangle fan: `(v0, vi, vi+1)` for `i = 1..n-1`, indices only.
    Fan,
    /// Fan layout with a parallel `BoundaryInfo` buffer.
    FanWithBoundary,
}

impl TriangleLayout {
    pub fn wants_boundary(self) -> bool {
        matches!(
            self,
            TriangleLayout::TrianglesWithBoundary | TriangleLayout::FanWithBoundary
        )
    }
}

/// Plain pair of vertex and index vectors, the common case for
/// `GeometryBuilder` implementations.
#[derive(Clone, Debug, Default)]
pub struct VertexBuffers<VertexType> {
    pub vertices: Vec<VertexType>,
    pub indices: Vec<Index>,
    pub boundary: Vec<BoundaryInfo>,
}

impl<VertexType> VertexBuffers<VertexType> {
    pub fn new() -> Self {
        VertexBuffers::with_capacity(64, 128)
    }

    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
            boundary: Vec::new(),
        }
    }
}

/// Number of vertices and indices added during a `begin_geometry` /
/// `end_geometry` span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Count {
    pub vertices: u32,
    pub indices: u32,
}

impl Add for Count {
    type Output = Count;
    fn add(self, other: Count) -> Count {
        Count {
            vertices: self.vertices + other.vertices,
            indices: self.indices + other.indices,
        }
    }
}

/// A temporary view over a `VertexBuffers` that records the vertex/index
/// offset in effect when it was created, so a triangulator's own indices
/// (always starting at zero) are translated transparently into the shared
/// buffer.
pub struct BuffersBuilder<'l, VertexType> {
    buffers: &'l mut VertexBuffers<VertexType>,
    vertex_offset: Index,
    index_offset: Index,
}

impl<'l, VertexType> BuffersBuilder<'l, VertexType> {
    pub fn new(buffers: &'l mut VertexBuffers<VertexType>) -> Self {
        let vertex_offset = buffers.vertices.len() as Index;
        let index_offset = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            vertex_offset,
            index_offset,
        }
    }
}

impl<'l, VertexType: Clone> GeometryBuilder<VertexType> for BuffersBuilder<'l, VertexType> {
    fn begin_geometry(&mut self) {
        self.vertex_offset = self.buffers.vertices.len() as Index;
        self.index_offset = self.buffers.indices.len() as Index;
    }

    fn end_geometry(&mut self) -> Count {
        Count {
            vertices: self.buffers.vertices.len() as u32 - self.vertex_offset,
            indices: self.buffers.indices.len() as u32 - self.index_offset,
        }
    }

    fn add_vertex(&mut self, v: VertexType) -> VertexId {
        self.buffers.vertices.push(v);
        VertexId(self.buffers.vertices.len() as Index - 1 - self.vertex_offset)
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        self.buffers.indices.push(a.offset() + self.vertex_offset);
        self.buffers.indices.push(b.offset() + self.vertex_offset);
        self.buffers.indices.push(c.offset() + self.vertex_offset);
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.vertex_offset as usize);
        self.buffers.indices.truncate(self.index_offset as usize);
    }
}

impl<'l, VertexType: Clone> BoundaryGeometryBuilder<VertexType> for BuffersBuilder<'l, VertexType> {
    fn add_triangle_with_boundary(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
        boundary: BoundaryInfo,
    ) {
        self.add_triangle(a, b, c);
        self.buffers.boundary.push(boundary);
    }
}

#[test]
fn test_buffers_builder_offsets_indices() {
    let mut buffers: VertexBuffers<(f32, f32)> = VertexBuffers::new();
    buffers.vertices.push((0.0, 0.0));
    buffers.indices.push(0);

    let mut builder = BuffersBuilder::new(&mut buffers);
    builder.begin_geometry();
    let a = builder.add_vertex((1.0, 1.0));
    let b = builder.add_vertex((2.0, 1.0));
    let c = builder.add_vertex((2.0, 2.0));
    assert_eq!(a.offset(), 0);
    builder.add_triangle(a, b, c);
    let count = builder.end_geometry();
    assert_eq!(count.vertices, 3);
    assert_eq!(count.indices, 3);
    assert_eq!(&buffers.indices[1..], &[1, 2, 3]);
}

#[test]
fn test_boundary_info_bits() {
    let b = BoundaryInfo::new(true, false, true);
    assert!(b.ab());
    assert!(!b.bc());
    assert!(b.ca());
    assert_eq!(b.0, 0b101);
}
