//! The trivial fan triangulator (spec §4.5): for a convex polygon, emit
//! `(v0, vi, vi+1)` for `i = 1..n-2`.

use alloc::vec::Vec;

use planargon_geom::{Point, Scalar};

use crate::error::{InvalidInput, TessellationResult};
use crate::geometry_builder::{BoundaryGeometryBuilder, BoundaryInfo, GeometryBuilder};

/// Fans out `polygon` from its first vertex. The caller is responsible for
/// knowing the polygon is convex (or at least star-shaped from `v0`); this
/// function does not check.
pub fn triangulate_fan<N: Scalar + Copy>(
    polygon: &[Point<N>],
    want_boundary: bool,
    builder: &mut dyn BoundaryGeometryBuilder<Point<N>>,
) -> TessellationResult<()> {
    let n = polygon.len();
    if n < 3 {
        return Err(InvalidInput::ContourTooShort {
            contour_index: 0,
            len: n,
        }
        .into());
    }

    builder.begin_geometry();
    let ids: Vec<_> = polygon.iter().map(|&p| builder.add_vertex(p)).collect();

    for i in 1..n - 1 {
        let (a, b, c) = (ids[0], ids[i], ids[i + 1]);
        if want_boundary {
            // (v0, vi) is a boundary edge only for i == 1; (vi, vi+1) always is;
            // (vi+1, v0) is a boundary edge only for the last triangle.
            let ab = i == 1;
            let bc = true;
            let ca = i + 1 == n - 1;
            builder.add_triangle_with_boundary(a, b, c, BoundaryInfo::new(ab, bc, ca));
        } else {
            builder.add_triangle(a, b, c);
        }
    }

    builder.end_geometry();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_builder::{BuffersBuilder, VertexBuffers};

    #[test]
    fn test_fan_quad() {
        let polygon = [
            Point::<f32>::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
        let mut builder = BuffersBuilder::new(&mut buffers);
        triangulate_fan(&polygon, true, &mut builder).unwrap();

        assert_eq!(buffers.indices, &[0, 1, 2, 0, 2, 3]);
        assert_eq!(buffers.boundary.len(), 2);
        assert!(buffers.boundary[0].ab());
        assert!(buffers.boundary[0].bc());
        assert!(!buffers.boundary[0].ca());
        assert!(!buffers.boundary[1].ab());
        assert!(buffers.boundary[1].bc());
        assert!(buffers.boundary[1].ca());
    }
}
