//! Numeric primitives shared by the planarizer, simplifier and triangulators.
//!
//! This crate knows nothing about polygons, faces or meshes: it only
//! provides the scalar abstraction the rest of the workspace is generic
//! over (`Scalar`), a 2D vector/point type built on top of it (`Vector2`),
//! a line segment type, and the orientation / segment-intersection
//! predicates the planarizer's numeric-robustness compensation depends on.
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;
extern crate alloc;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

mod fixed;
mod scalar;
mod segment;
mod vector;

pub use crate::fixed::Fixed;
pub use crate::scalar::Scalar;
pub use crate::segment::{classify_point, orient2d, LineSegment, Orientation, SegmentIntersection};
pub use crate::vector::{point, vector, Point, Vector2};
