//! Planar subdivision, polygon simplification and triangulation core.
//!
//! The pipeline, leaves first: geometry primitives (`planargon_geom`) →
//! arenas (`arena`) → half-edge mesh (`dcel`) → planarizer (`planarize`) →
//! simplifier (`simplify`) → triangulators (`ear_clip`, `monotone`, `fan`) →
//! stroke tessellator (`stroke`). Output is always produced through a
//! [`geometry_builder::GeometryBuilder`] sink, the same separation of
//! algorithm from vertex layout the teacher's tessellation crate uses.
#![no_std]
#![allow(clippy::too_many_arguments)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

/// Expands to a debug-only trace line, gated further by a runtime `log`
/// field so tests can opt in without recompiling. This is the project's
/// entire "logging" story: there is no `log`/`tracing` dependency here,
/// matching the teacher's own tessellation core.
#[cfg(all(debug_assertions, feature = "std"))]
macro_rules! tess_log {
    ($obj:expr, $($arg:tt)*) => {
        if $obj.log {
            std::eprintln!($($arg)*);
        }
    };
}
#[cfg(not(all(debug_assertions, feature = "std")))]
macro_rules! tess_log {
    ($obj:expr, $($arg:tt)*) => {};
}

pub(crate) use tess_log;

mod arena;
mod chunker;
mod dcel;
mod ear_clip;
mod error;
mod fan;
pub mod geometry_builder;
mod monotone;
mod planarize;
mod simplify;
mod stroke;

#[cfg(test)]
mod ear_clip_tests;
#[cfg(test)]
mod planarize_tests;
#[cfg(test)]
mod simplify_tests;
#[cfg(test)]
mod stroke_tests;

pub use crate::chunker::Chunker;
pub use crate::dcel::{FaceId, HalfEdgeId, VertexId as MeshVertexId};
pub use crate::ear_clip::triangulate_ear_clip;
pub use crate::error::{
    AssertionViolation, InvalidInput, TessellationError, TessellationResult,
};
pub use crate::fan::triangulate_fan;
pub use crate::geometry_builder::{
    BoundaryGeometryBuilder, BoundaryInfo, BuffersBuilder, Count, GeometryBuilder, Index,
    TriangleLayout, VertexBuffers, VertexId,
};
pub use crate::monotone::{triangulate_monotone, MonotoneAxis};
pub use crate::planarize::{planarize, PlanarFace, Planarizer, WindingRule};
pub use crate::simplify::{simplify, Direction, SimpleContours};
pub use crate::stroke::{tessellate_stroke, Gravity};

pub use planargon_geom as geom;
