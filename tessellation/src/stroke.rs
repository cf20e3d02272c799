//! Stroke tessellation (spec §4.6): expands a polyline into a filled strip
//! polygon of a given width. The per-vertex offset direction is the
//! teacher's averaged-tangent-normal construction
//! (`tessellation/src/math_utils.rs::compute_normal`), generalized from its
//! always-symmetric fill-stroke use to the three asymmetric gravities this
//! spec requires.

use alloc::vec::Vec;

use planargon_geom::{Point, Scalar, Vector2};

use crate::error::{InvalidInput, TessellationResult};
use crate::geometry_builder::{BoundaryGeometryBuilder, BoundaryInfo, GeometryBuilder};

/// Which side(s) of the path centerline the stroke is offset towards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gravity {
    /// Offset symmetrically, `width / 2` to each side.
    Center,
    /// Offset the full `width` to the "negative" side only (the side a
    /// `compute_normal` perpendicular of `(-dy, dx)` points towards).
    Inward,
    /// Offset the full `width` to the "positive" side only.
    Outward,
}

impl Gravity {
    /// Returns `(negative_side_offset, positive_side_offset)`, both
    /// distances along the per-vertex normal.
    fn offsets<N: Scalar>(self, width: N) -> (N, N) {
        let half = width / N::from_f64(2.0);
        match self {
            Gravity::Center => (-half, half),
            Gravity::Inward => (-width, N::ZERO),
            Gravity::Outward => (N::ZERO, width),
        }
    }
}

fn perpendicular<N: Scalar>(v: Vector2<N>) -> Vector2<N> {
    Vector2::new(-v.y, v.x)
}

/// Averaged-tangent-normal join direction: the bisector of the incoming and
/// outgoing unit tangents, rescaled so that offsetting by `d` along it lands
/// exactly `d` away from both adjacent edges (a miter join). Falls back to
/// the incoming edge's own normal when the turn is near 180 degrees (the
/// bisector degenerates) or near 0 degrees (the rescale factor blows up),
/// both guarded by `precision` — the same role the teacher's helper gives
/// its hardcoded `1e-4`.
fn compute_normal<N: Scalar>(precision: N, prev_dir: Vector2<N>, next_dir: Vector2<N>) -> Vector2<N> {
    let n1 = perpendicular(prev_dir);
    let sum = prev_dir + next_dir;

    if sum.square_length() < precision {
        return n1;
    }

    let tangent = sum.normalize();
    let n = perpendicular(tangent);
    let inv_len = n.dot(n1);

    if inv_len.abs() < precision {
        return n1;
    }

    n / inv_len
}

/// Expands `path` into a filled stroke polygon of the given `width`,
/// emitting a triangle strip (spec §4.6). `precision` guards the join
/// computation's near-degenerate cases (see [`compute_normal`]); a
/// reasonable default is a small fraction of `width * width`.
pub fn tessellate_stroke<N: Scalar>(
    path: &[Point<N>],
    width: N,
    gravity: Gravity,
    closed: bool,
    precision: N,
    want_boundary: bool,
    builder: &mut dyn BoundaryGeometryBuilder<Point<N>>,
) -> TessellationResult<()> {
    let n = path.len();
    if n < 2 {
        return Err(InvalidInput::ContourTooShort {
            contour_index: 0,
            len: n,
        }
        .into());
    }

    let (neg_offset, pos_offset) = gravity.offsets(width);
    let half_width = width / N::from_f64(2.0);

    let mut negative = Vec::with_capacity(n);
    let mut positive = Vec::with_capacity(n);

    for i in 0..n {
        let prev_dir = if i > 0 {
            Some((path[i] - path[i - 1]).normalize())
        } else if closed {
            Some((path[0] - path[n - 1]).normalize())
        } else {
            None
        };
        let next_dir = if i + 1 < n {
            Some((path[i + 1] - path[i]).normalize())
        } else if closed {
            Some((path[0] - path[i]).normalize())
        } else {
            None
        };

        let normal = match (prev_dir, next_dir) {
            (Some(a), Some(b)) => compute_normal(precision, a, b),
            (Some(a), None) => perpendicular(a),
            (None, Some(b)) => perpendicular(b),
            (None, None) => unreachable!("tessellate_stroke requires at least 2 vertices"),
        };

        negative.push(path[i] + normal * neg_offset);
        positive.push(path[i] + normal * pos_offset);
    }

    // Square caps: extend both offset endpoints by half the width along the
    // path's own tangent at each open end (spec §4.6 "handle endpoints with
    // square caps").
    if !closed {
        let start_tangent = (path[1] - path[0]).normalize();
        negative[0] = negative[0] - start_tangent * half_width;
        positive[0] = positive[0] - start_tangent * half_width;

        let end_tangent = (path[n - 1] - path[n - 2]).normalize();
        negative[n - 1] = negative[n - 1] + end_tangent * half_width;
        positive[n - 1] = positive[n - 1] + end_tangent * half_width;
    }

    builder.begin_geometry();
    let neg_ids: Vec<_> = negative.iter().map(|&p| builder.add_vertex(p)).collect();
    let pos_ids: Vec<_> = positive.iter().map(|&p| builder.add_vertex(p)).collect();

    let segment_count = if closed { n } else { n - 1 };
    for i in 0..segment_count {
        let j = (i + 1) % n;
        let is_cap_start = !closed && i == 0;
        let is_cap_end = !closed && i == segment_count - 1;

        // Quad (negative[i], positive[i], positive[j], negative[j]) split
        // along the negative[i]-positive[j] diagonal into two triangles.
        if want_boundary {
            builder.add_triangle_with_boundary(
                neg_ids[i],
                pos_ids[i],
                pos_ids[j],
                BoundaryInfo::new(is_cap_start, true, false),
            );
            builder.add_triangle_with_boundary(
                neg_ids[i],
                pos_ids[j],
                neg_ids[j],
                BoundaryInfo::new(false, true, is_cap_end),
            );
        } else {
            builder.add_triangle(neg_ids[i], pos_ids[i], pos_ids[j]);
            builder.add_triangle(neg_ids[i], pos_ids[j], neg_ids[j]);
        }
    }

    builder.end_geometry();
    Ok(())
}
