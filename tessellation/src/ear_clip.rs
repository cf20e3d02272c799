//! Ear-clipping triangulation of a simple polygon (spec §4.3), backed by a
//! pool of doubly linked nodes — the same index-arena style the rest of
//! this crate uses for the DCEL (`dcel.rs`) rather than a pointer-based
//! linked list.

use alloc::vec::Vec;

use planargon_geom::{classify_point, orient2d, LineSegment, Orientation, Point, Scalar, SegmentIntersection};

use crate::error::{InvalidInput, TessellationResult};
use crate::geometry_builder::{BoundaryGeometryBuilder, BoundaryInfo, GeometryBuilder};

fn orientation_sign(o: Orientation) -> i32 {
    match o {
        Orientation::CounterClockwise => 1,
        Orientation::Clockwise => -1,
        Orientation::Collinear => 0,
    }
}

#[derive(Clone, Copy, Debug)]
struct Node<N> {
    point: Point<N>,
    prev: usize,
    next: usize,
    original_index: usize,
}

/// Triangulates a simple polygon `polygon` (no holes; use the simplifier's
/// bridge construction first if holes need merging). Emits nothing (not an
/// error) if the polygon is degenerate — all vertices collinear or
/// coincident — per spec §7 `DegenerateGeometry`.
pub fn triangulate_ear_clip<N: Scalar>(
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

    let mut max_y_idx = 0;
    for i in 1..n {
        let p = polygon[i];
        let best = polygon[max_y_idx];
        if p.y > best.y || (p.y == best.y && p.x > best.x) {
            max_y_idx = i;
        }
    }
    let prev_of_max = (max_y_idx + n - 1) % n;
    let next_of_max = (max_y_idx + 1) % n;
    let poly_sign = orientation_sign(orient2d(
        polygon[prev_of_max],
        polygon[max_y_idx],
        polygon[next_of_max],
    ));
    if poly_sign == 0 {
        // Degenerate: all points collinear or coincident.
        builder.begin_geometry();
        builder.end_geometry();
        return Ok(());
    }

    let mut nodes: Vec<Node<N>> = (0..n)
        .map(|i| Node {
            point: polygon[i],
            prev: (i + n - 1) % n,
            next: (i + 1) % n,
            original_index: i,
        })
        .collect();

    let mut alive = alloc::vec![true; n];
    let mut active_count = n;

    builder.begin_geometry();
    let vertex_ids: Vec<_> = polygon.iter().map(|&p| builder.add_vertex(p)).collect();

    let is_ear = |nodes: &[Node<N>], alive: &[bool], i: usize| -> bool {
        let node = nodes[i];
        let a = nodes[node.prev].point;
        let b = node.point;
        let c = nodes[node.next].point;

        if orientation_sign(orient2d(a, b, c)) != poly_sign {
            return false;
        }

        for j in 0..nodes.len() {
            if !alive[j] || j == i || j == node.prev || j == node.next {
                continue;
            }
            let p = nodes[j].point;
            let s1 = orientation_sign(orient2d(a, b, p));
            let s2 = orientation_sign(orient2d(b, c, p));
            let s3 = orientation_sign(orient2d(c, a, p));
            if s1 == poly_sign && s2 == poly_sign && s3 == poly_sign {
                return false;
            }
        }

        // No other edge may cross the diagonal (a, c) that closes off the ear.
        let diagonal = LineSegment::new(a, c);
        let mut k = node.next;
        while k != node.prev {
            let k_next = nodes[k].next;
            if k_next == i {
                break;
            }
            let edge = LineSegment::new(nodes[k].point, nodes[k_next].point);
            if let SegmentIntersection::Point { alpha } = diagonal.intersection(&edge) {
                if alpha > N::ZERO && alpha < N::ONE {
                    return false;
                }
            }
            k = k_next;
        }
        true
    };

    let mut ears: Vec<bool> = (0..n).map(|i| is_ear(&nodes, &alive, i)).collect();

    let remove_degenerate_from = |nodes: &mut Vec<Node<N>>,
                                   alive: &mut Vec<bool>,
                                   active_count: &mut usize,
                                   mut idx: usize| {
        while *active_count > 3 {
            let node = nodes[idx];
            let a = nodes[node.prev].point;
            let c = nodes[node.next].point;
            if classify_point(node.point, a, c) != 0 {
                break;
            }
            let prev = node.prev;
            let next = node.next;
            nodes[prev].next = next;
            nodes[next].prev = prev;
            alive[idx] = false;
            *active_count -= 1;
            idx = next;
        }
    };

    let mut cursor = 0;
    while active_count > 3 {
        let mut steps = 0;
        while !(alive[cursor] && ears[cursor]) {
            cursor = nodes[cursor].next;
            steps += 1;
            if steps > nodes.len() + 1 {
                // No ear found; bail out rather than loop forever on malformed input.
                builder.end_geometry();
                return Ok(());
            }
        }

        let node = nodes[cursor];
        let (p, c, nx) = (node.prev, cursor, node.next);
        let (pa, ca, na) = (
            vertex_ids[nodes[p].original_index],
            vertex_ids[nodes[c].original_index],
            vertex_ids[nodes[nx].original_index],
        );

        if want_boundary {
            let adjacent = |x: usize, y: usize| {
                let d = if x > y { x - y } else { y - x };
                d == 1 || d == n - 1
            };
            let info = BoundaryInfo::new(
                adjacent(nodes[p].original_index, nodes[c].original_index),
                adjacent(nodes[c].original_index, nodes[nx].original_index),
                adjacent(nodes[nx].original_index, nodes[p].original_index),
            );
            builder.add_triangle_with_boundary(pa, ca, na, info);
        } else {
            builder.add_triangle(pa, ca, na);
        }

        nodes[p].next = nx;
        nodes[nx].prev = p;
        alive[cursor] = false;
        active_count -= 1;
        cursor = nx;

        remove_degenerate_from(&mut nodes, &mut alive, &mut active_count, p);
        if alive[nx] {
            remove_degenerate_from(&mut nodes, &mut alive, &mut active_count, nx);
        }

        if active_count > 3 {
            ears[p] = alive[p] && is_ear(&nodes, &alive, p);
            if alive[nx] {
                ears[nx] = is_ear(&nodes, &alive, nx);
            }
        }
    }

    // Emit the final triangle from the three remaining nodes.
    let last = (0..nodes.len()).find(|&i| alive[i]).expect("3 nodes remain");
    let node = nodes[last];
    let (p, c, nx) = (node.prev, last, node.next);
    let (pa, ca, na) = (
        vertex_ids[nodes[p].original_index],
        vertex_ids[nodes[c].original_index],
        vertex_ids[nodes[nx].original_index],
    );
    if want_boundary {
        let adjacent = |x: usize, y: usize| {
            let d = if x > y { x - y } else { y - x };
            d == 1 || d == n - 1
        };
        let info = BoundaryInfo::new(
            adjacent(nodes[p].original_index, nodes[c].original_index),
            adjacent(nodes[c].original_index, nodes[nx].original_index),
            adjacent(nodes[nx].original_index, nodes[p].original_index),
        );
        builder.add_triangle_with_boundary(pa, ca, na, info);
    } else {
        builder.add_triangle(pa, ca, na);
    }

    builder.end_geometry();
    Ok(())
}
