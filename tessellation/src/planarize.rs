//! Randomized incremental trapezoidal decomposition (spec §4.1): builds a
//! bounding frame, stages every input edge as an unprocessed conflict of the
//! frame face, then inserts them in a seeded random order, splitting and
//! (opportunistically) merging trapezoidal faces as it goes.
//!
//! This is the largest module in the crate by design (spec's relative
//! implementation budget puts the planarizer at 45%), mirroring how much of
//! the teacher's own tessellation crate is spent on its fill-rule sweep.

use alloc::vec::Vec;

use planargon_geom::{classify_point, LineSegment, Point, Scalar, SegmentIntersection};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::chunker::Chunker;
use crate::dcel::{
    classify_in_trapeze, side_of_separator, trapeze_view, EdgeKind, FaceId, HalfEdgeId, Mesh,
    TrapezeClass, TrapezeView, VertexId,
};
use crate::error::TessellationResult;
use crate::tess_log;

/// Which faces of the subdivision count as "filled" (spec §6).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindingRule {
    NonZero,
    EvenOdd,
}

impl WindingRule {
    fn is_filled(self, winding: i32) -> bool {
        match self {
            WindingRule::NonZero => winding != 0,
            WindingRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// One output face of [`planarize`]: its boundary ring in half-edge order,
/// its accumulated winding number, and whether `winding_rule` marks it
/// filled.
#[derive(Clone, Debug)]
pub struct PlanarFace<N> {
    pub ring: Vec<Point<N>>,
    pub winding: i32,
    pub filled: bool,
}

/// Owns the random seed that makes a planarize run reproducible (spec §5),
/// and the `log` flag `tess_log!` reads.
pub struct Planarizer {
    seed: u64,
    pub log: bool,
}

impl Planarizer {
    pub fn new(seed: u64) -> Self {
        Planarizer { seed, log: false }
    }

    pub fn planarize<N: Scalar>(
        &self,
        contours: &Chunker<Point<N>>,
        winding_rule: WindingRule,
    ) -> TessellationResult<Vec<PlanarFace<N>>> {
        contours.validate()?;

        let (mut mesh, frame_face, mut staged) = build_mesh(contours);

        let mut rng = StdRng::seed_from_u64(self.seed);
        staged.shuffle(&mut rng);

        for e in staged {
            tess_log!(self, "planarize: processing staged edge {:?}", e);
            process_edge(&mut mesh, e);
        }

        Ok(extract_faces(&mesh, frame_face, winding_rule))
    }
}

/// Free-function entry point matching spec §6's `planarize(contours,
/// winding_rule) -> faces`, with the seed (spec §5's required, non-hidden
/// source of non-determinism) as an explicit third argument.
pub fn planarize<N: Scalar>(
    contours: &Chunker<Point<N>>,
    winding_rule: WindingRule,
    seed: u64,
) -> TessellationResult<Vec<PlanarFace<N>>> {
    Planarizer::new(seed).planarize(contours, winding_rule)
}

// ---------------------------------------------------------------------
// Frame + edge staging (spec §4.1 steps 1-2)
// ---------------------------------------------------------------------

fn bbox<N: Scalar>(contours: &Chunker<Point<N>>) -> (N, N, N, N) {
    let mut first = true;
    let (mut minx, mut miny, mut maxx, mut maxy) = (N::ZERO, N::ZERO, N::ZERO, N::ZERO);
    for contour in contours.contours() {
        for &p in contour {
            if first {
                minx = p.x;
                maxx = p.x;
                miny = p.y;
                maxy = p.y;
                first = false;
            } else {
                if p.x < minx {
                    minx = p.x;
                }
                if p.x > maxx {
                    maxx = p.x;
                }
                if p.y < miny {
                    miny = p.y;
                }
                if p.y > maxy {
                    maxy = p.y;
                }
            }
        }
    }
    (minx, miny, maxx, maxy)
}

fn build_mesh<N: Scalar>(contours: &Chunker<Point<N>>) -> (Mesh<N>, FaceId, Vec<HalfEdgeId>) {
    let (minx, miny, maxx, maxy) = bbox(contours);
    let pad = N::from_f64(10.0);
    let (minx, miny, maxx, maxy) = (minx - pad, miny - pad, maxx + pad, maxy + pad);

    let vertex_count: usize = contours.contours().map(<[_]>::len).sum();
    let mut mesh = Mesh::with_capacity(vertex_count + 4, vertex_count * 2 + 4, vertex_count + 1);

    let frame_face = mesh.alloc_face();
    let v_bl = mesh.alloc_vertex(Point::new(minx, miny));
    let v_br = mesh.alloc_vertex(Point::new(maxx, miny));
    let v_tr = mesh.alloc_vertex(Point::new(maxx, maxy));
    let v_tl = mesh.alloc_vertex(Point::new(minx, maxy));

    // CCW frame boundary, no twins (spec §4.1 step 1).
    let e_bl = mesh.alloc_edge(v_bl, frame_face, EdgeKind::Ignore);
    let e_br = mesh.alloc_edge(v_br, frame_face, EdgeKind::Ignore);
    let e_tr = mesh.alloc_edge(v_tr, frame_face, EdgeKind::Ignore);
    let e_tl = mesh.alloc_edge(v_tl, frame_face, EdgeKind::Ignore);
    mesh.link(e_bl, e_br);
    mesh.link(e_br, e_tr);
    mesh.link(e_tr, e_tl);
    mesh.link(e_tl, e_bl);
    mesh.face_mut(frame_face).edge = Some(e_bl);
    mesh.vertex_mut(v_bl).edge = Some(e_bl);
    mesh.vertex_mut(v_br).edge = Some(e_br);
    mesh.vertex_mut(v_tr).edge = Some(e_tr);
    mesh.vertex_mut(v_tl).edge = Some(e_tl);

    let mut staged = Vec::new();
    for contour in contours.contours() {
        let ids: Vec<VertexId> = contour.iter().map(|&p| mesh.alloc_vertex(p)).collect();
        let n = ids.len();
        for i in 0..n {
            let (from, to) = (ids[i], ids[(i + 1) % n]);
            let (fwd, _back) = mesh.alloc_edge_pair(from, to, frame_face);
            mesh.push_conflict(frame_face, fwd);
            staged.push(fwd);
        }
    }

    (mesh, frame_face, staged)
}

// ---------------------------------------------------------------------
// Main loop + inner walk (spec §4.1 step 4)
// ---------------------------------------------------------------------

fn process_edge<N: Scalar>(mesh: &mut Mesh<N>, e: HalfEdgeId) {
    let twin = mesh.edge(e).twin.expect("staged edge has a twin");
    let target = mesh.coords(mesh.edge(twin).origin);
    let start = mesh.coords(mesh.edge(e).origin);
    let overall_sign = if target.y < start.y {
        1
    } else if target.y > start.y {
        -1
    } else {
        0
    };

    let mut a_vertex = mesh.edge(e).origin;
    let mut face = mesh.edge(e).conflict_face.unwrap_or_else(|| mesh.edge(e).face);

    // Bound the walk: at most a handful of trapezes per half-edge of the
    // mesh built so far, as a guard against a malformed-input infinite loop.
    let step_budget = mesh.half_edges.len() * 4 + 16;
    for _ in 0..step_budget {
        let a = mesh.coords(a_vertex);
        if a == target {
            return;
        }

        let trapeze = trapeze_view(mesh, face);
        let b_class = classify_in_trapeze(mesh, &trapeze, target);
        let b_prime = if b_class != TrapezeClass::Outside {
            target
        } else {
            clip_to_trapeze(mesh, &trapeze, a, target)
        };

        let next_vertex = if let Some(wall_edge) = find_containing_wall(mesh, &trapeze, a, b_prime)
        {
            let sign = if b_prime.y < a.y {
                1
            } else if b_prime.y > a.y {
                -1
            } else {
                0
            };
            splice_collinear(mesh, wall_edge, a, b_prime, sign)
        } else {
            splice_diagonal(mesh, face, a, b_prime, overall_sign)
        };

        if b_prime == target {
            return;
        }

        face = find_next_face(mesh, next_vertex, target);
        a_vertex = next_vertex;
    }

    debug_assert!(false, "planarizer inner walk did not terminate");
}

/// The four boundary edges of a trapeze as line segments, each paired with
/// the half-edge id whose origin/destination matches the segment endpoints
/// exactly (spec §3's `left_top`/`left_bottom`/`right_top`/`right_bottom`
/// plus the x-monotone top/bottom chains).
fn wall_candidates<N: Scalar>(
    mesh: &Mesh<N>,
    trapeze: &TrapezeView,
) -> Vec<(LineSegment<N>, HalfEdgeId)> {
    let mut out = Vec::new();
    // `left_top` and `right_bottom` are themselves the wall edges: in a
    // CCW trapeze boundary, the edge whose origin is the top-left vertex
    // traces straight down to the bottom-left vertex, and the edge whose
    // origin is the bottom-right vertex traces straight up to the
    // top-right vertex.
    let left_wall = trapeze.left_top;
    out.push((
        LineSegment::new(
            mesh.coords(mesh.edge(left_wall).origin),
            mesh.coords(mesh.dest(left_wall)),
        ),
        left_wall,
    ));
    let right_wall = trapeze.right_bottom;
    out.push((
        LineSegment::new(
            mesh.coords(mesh.edge(right_wall).origin),
            mesh.coords(mesh.dest(right_wall)),
        ),
        right_wall,
    ));
    for &edge in &trapeze.top_chain {
        out.push((
            LineSegment::new(mesh.coords(mesh.edge(edge).origin), mesh.coords(mesh.dest(edge))),
            edge,
        ));
    }
    for &edge in &trapeze.bottom_chain {
        out.push((
            LineSegment::new(mesh.coords(mesh.edge(edge).origin), mesh.coords(mesh.dest(edge))),
            edge,
        ));
    }
    out
}

fn on_segment<N: Scalar>(seg: LineSegment<N>, p: Point<N>) -> bool {
    if classify_point(p, seg.from, seg.to) != 0 {
        return false;
    }
    let (xlo, xhi) = if seg.from.x <= seg.to.x {
        (seg.from.x, seg.to.x)
    } else {
        (seg.to.x, seg.from.x)
    };
    let (ylo, yhi) = if seg.from.y <= seg.to.y {
        (seg.from.y, seg.to.y)
    } else {
        (seg.to.y, seg.from.y)
    };
    p.x >= xlo && p.x <= xhi && p.y >= ylo && p.y <= yhi
}

/// Finds a trapeze-boundary edge that `a` and `b` both lie on (spec §4.1
/// step 3: "both `a` and `b'` lie on the same wall of `T`").
fn find_containing_wall<N: Scalar>(
    mesh: &Mesh<N>,
    trapeze: &TrapezeView,
    a: Point<N>,
    b: Point<N>,
) -> Option<HalfEdgeId> {
    for (seg, edge) in wall_candidates(mesh, trapeze) {
        if on_segment(seg, a) && on_segment(seg, b) {
            return Some(edge);
        }
    }
    None
}

/// Intersects `(a, b)` with every wall of `trapeze`, keeping the
/// intersection with the largest `alpha` along `(a, b)`, then clamps the
/// result onto the chosen wall's endpoint range (spec §4.1 step 2's
/// numeric-robustness compensation).
fn clip_to_trapeze<N: Scalar>(mesh: &Mesh<N>, trapeze: &TrapezeView, a: Point<N>, b: Point<N>) -> Point<N> {
    let seg = LineSegment::new(a, b);
    let mut best: Option<(N, Point<N>)> = None;
    for (wall, _edge) in wall_candidates(mesh, trapeze) {
        if let SegmentIntersection::Point { alpha } = seg.intersection(&wall) {
            let take = match &best {
                None => true,
                Some((best_alpha, _)) => alpha > *best_alpha,
            };
            if take {
                let mut p = seg.sample(alpha);
                if wall.from.x == wall.to.x {
                    p.x = wall.from.x;
                    let (ylo, yhi) = if wall.from.y <= wall.to.y {
                        (wall.from.y, wall.to.y)
                    } else {
                        (wall.to.y, wall.from.y)
                    };
                    if p.y < ylo {
                        p.y = ylo;
                    }
                    if p.y > yhi {
                        p.y = yhi;
                    }
                } else {
                    let (xlo, xhi) = if wall.from.x <= wall.to.x {
                        (wall.from.x, wall.to.x)
                    } else {
                        (wall.to.x, wall.from.x)
                    };
                    if p.x < xlo {
                        p.x = xlo;
                    }
                    if p.x > xhi {
                        p.x = xhi;
                    }
                }
                best = Some((alpha, p));
            }
        }
    }
    best.map(|(_, p)| p).unwrap_or(b)
}

/// Splits a single wall edge at both `a` and `b` (in whichever order is
/// nearer the wall's origin) and bumps the winding of every half-edge
/// between them (spec §4.1 step 3).
fn splice_collinear<N: Scalar>(
    mesh: &mut Mesh<N>,
    wall_edge: HalfEdgeId,
    a: Point<N>,
    b: Point<N>,
    sign: i32,
) -> VertexId {
    if a == b {
        return mesh.edge(wall_edge).origin;
    }

    let origin_pt = mesh.coords(mesh.edge(wall_edge).origin);
    let dest_pt = mesh.coords(mesh.dest(wall_edge));
    let dir = dest_pt - origin_pt;
    let ta = (a - origin_pt).dot(dir);
    let tb = (b - origin_pt).dot(dir);

    let (e_a, e_b) = if ta <= tb {
        let e_a = try_split_edge_at(mesh, wall_edge, a);
        let e_b = try_split_edge_at(mesh, e_a, b);
        (e_a, e_b)
    } else {
        let e_b = try_split_edge_at(mesh, wall_edge, b);
        let e_a = try_split_edge_at(mesh, e_b, a);
        (e_a, e_b)
    };

    let (start, stop_vertex) = if ta <= tb {
        (e_a, mesh.edge(e_b).origin)
    } else {
        (e_b, mesh.edge(e_a).origin)
    };

    let mut cur = start;
    loop {
        mesh.edge_mut(cur).winding += sign;
        if let Some(t) = mesh.edge(cur).twin {
            mesh.edge_mut(t).winding -= sign;
        }
        let nxt = mesh.edge(cur).next;
        if mesh.edge(nxt).origin == stop_vertex {
            break;
        }
        cur = nxt;
    }

    mesh.edge(e_b).origin
}

/// Cuts `T` vertically through `a` and `b'` and connects them with a new
/// half-edge pair (spec §4.1 step 4, face split).
fn splice_diagonal<N: Scalar>(
    mesh: &mut Mesh<N>,
    face: FaceId,
    a: Point<N>,
    b: Point<N>,
    sign: i32,
) -> VertexId {
    let (wall_a, _, _) = ensure_vertical_at(mesh, face, a.x);

    if a.x == b.x {
        return splice_collinear(mesh, wall_a, a, b, sign);
    }

    let face_a_side = mesh.edge(wall_a).face;
    let twin_a = mesh.edge(wall_a).twin.expect("interior vertical wall has a twin");
    let face_b_side = mesh.edge(twin_a).face;

    let candidate_face = {
        let tv = trapeze_view(mesh, face_a_side);
        if b.x >= tv.left_x(mesh) && b.x <= tv.right_x(mesh) {
            face_a_side
        } else {
            face_b_side
        }
    };

    let (wall_b, _, _) = ensure_vertical_at(mesh, candidate_face, b.x);

    let ea = try_split_edge_at(mesh, wall_a, a);
    let eb = try_split_edge_at(mesh, wall_b, b);

    let new_ab = insert_edge_between_non_co_linear_vertices(mesh, ea, eb);
    mesh.edge_mut(new_ab).kind = EdgeKind::Input;
    mesh.edge_mut(new_ab).winding += sign;
    if let Some(t) = mesh.edge(new_ab).twin {
        mesh.edge_mut(t).kind = EdgeKind::Input;
        mesh.edge_mut(t).winding -= sign;
    }

    mesh.edge(eb).origin
}

/// Ensures a vertical wall exists at `x` within `face`, returning it and the
/// (possibly identical, if `x` was already a wall) faces on either side.
fn ensure_vertical_at<N: Scalar>(
    mesh: &mut Mesh<N>,
    face: FaceId,
    x: N,
) -> (HalfEdgeId, FaceId, FaceId) {
    let trapeze = trapeze_view(mesh, face);
    if x == trapeze.left_x(mesh) {
        return (trapeze.left_top, face, face);
    }
    if x == trapeze.right_x(mesh) {
        return (trapeze.right_bottom, face, face);
    }

    let top_edge = find_chain_edge_at_x(mesh, &trapeze.top_chain, x);
    let bottom_edge = find_chain_edge_at_x(mesh, &trapeze.bottom_chain, x);
    let y_top = point_on_chain_edge(mesh, top_edge, x);
    let y_bottom = point_on_chain_edge(mesh, bottom_edge, x);

    let e_top = try_split_edge_at(mesh, top_edge, Point::new(x, y_top));
    let e_bottom = try_split_edge_at(mesh, bottom_edge, Point::new(x, y_bottom));

    let sep = insert_edge_between_non_co_linear_vertices(mesh, e_bottom, e_top);
    mesh.edge_mut(sep).kind = EdgeKind::Unknown;
    let twin = mesh.edge(sep).twin.expect("new separator has a twin");
    mesh.edge_mut(twin).kind = EdgeKind::Unknown;

    let fa = mesh.edge(sep).face;
    let fb = mesh.edge(twin).face;
    let (left_face, right_face) = {
        let tv_a = trapeze_view(mesh, fa);
        if tv_a.right_x(mesh) == x {
            (fa, fb)
        } else {
            (fb, fa)
        }
    };

    try_merge_at_vertical(mesh, sep);

    (sep, left_face, right_face)
}

fn find_chain_edge_at_x<N: Scalar>(mesh: &Mesh<N>, chain: &[HalfEdgeId], x: N) -> HalfEdgeId {
    for &e in chain {
        let a = mesh.coords(mesh.edge(e).origin);
        let b = mesh.coords(mesh.dest(e));
        let (lo, hi) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        if x >= lo && x <= hi {
            return e;
        }
    }
    chain[0]
}

fn point_on_chain_edge<N: Scalar>(mesh: &Mesh<N>, e: HalfEdgeId, x: N) -> N {
    let a = mesh.coords(mesh.edge(e).origin);
    let b = mesh.coords(mesh.dest(e));
    let (lo, hi) = if a.x <= b.x { (a, b) } else { (b, a) };
    if x == lo.x {
        return lo.y;
    }
    if x == hi.x {
        return hi.y;
    }
    let t = (x - lo.x) / (hi.x - lo.x);
    lo.y + (hi.y - lo.y) * t
}

// ---------------------------------------------------------------------
// Sub-operations with their own contracts (spec §4.1 "Sub-operations")
// ---------------------------------------------------------------------

/// Splits `e` at `p`, or returns the existing half-edge whose origin is
/// already `p` (spec §4.1 `try_split_edge_at`).
pub fn try_split_edge_at<N: Scalar>(mesh: &mut Mesh<N>, e: HalfEdgeId, p: Point<N>) -> HalfEdgeId {
    let origin = mesh.edge(e).origin;
    if mesh.coords(origin) == p {
        return e;
    }
    let dest = mesh.dest(e);
    if mesh.coords(dest) == p {
        return match mesh.edge(e).twin {
            Some(t) => t,
            None => mesh.edge(e).next,
        };
    }

    let new_vertex = mesh.alloc_vertex(p);
    let face = mesh.edge(e).face;
    let winding = mesh.edge(e).winding;
    let kind = mesh.edge(e).kind;
    let old_next = mesh.edge(e).next;

    let e2 = mesh.alloc_edge(new_vertex, face, kind);
    mesh.edge_mut(e2).winding = winding;
    mesh.link(e, e2);
    mesh.link(e2, old_next);
    mesh.vertex_mut(new_vertex).edge = Some(e2);

    if let Some(t) = mesh.edge(e).twin {
        let t_face = mesh.edge(t).face;
        let t_winding = mesh.edge(t).winding;
        let t_kind = mesh.edge(t).kind;
        let t_old_prev = mesh.edge(t).prev;

        let t1 = mesh.alloc_edge(new_vertex, t_face, t_kind);
        mesh.edge_mut(t1).winding = t_winding;
        mesh.link(t_old_prev, t1);
        mesh.link(t1, t);

        mesh.edge_mut(e).twin = Some(t1);
        mesh.edge_mut(t1).twin = Some(e);
        mesh.edge_mut(e2).twin = Some(t);
        mesh.edge_mut(t).twin = Some(e2);
    }

    e2
}

/// Inserts a new half-edge pair between `ea.origin` and `eb.origin`, both
/// already on the boundary of the same face, splitting it in two (spec
/// §4.1 `insert_edge_between_non_co_linear_vertices`). Returns the new
/// half-edge whose origin is `ea.origin`.
pub fn insert_edge_between_non_co_linear_vertices<N: Scalar>(
    mesh: &mut Mesh<N>,
    ea: HalfEdgeId,
    eb: HalfEdgeId,
) -> HalfEdgeId {
    let face = mesh.edge(ea).face;
    debug_assert_eq!(mesh.edge(eb).face, face, "ea and eb must share a face");

    let va = mesh.edge(ea).origin;
    let vb = mesh.edge(eb).origin;
    let new_face = mesh.alloc_face();

    let new_ab = mesh.alloc_edge(va, face, EdgeKind::Unknown);
    let new_ba = mesh.alloc_edge(vb, face, EdgeKind::Unknown);
    mesh.edge_mut(new_ab).twin = Some(new_ba);
    mesh.edge_mut(new_ba).twin = Some(new_ab);

    let ea_prev = mesh.edge(ea).prev;
    let eb_prev = mesh.edge(eb).prev;

    mesh.link(ea_prev, new_ab);
    mesh.link(new_ab, eb);
    mesh.link(eb_prev, new_ba);
    mesh.link(new_ba, ea);

    mesh.face_mut(face).edge = Some(new_ab);

    let mut cur = new_ba;
    loop {
        mesh.edge_mut(cur).face = new_face;
        cur = mesh.edge(cur).next;
        if cur == new_ba {
            break;
        }
    }
    mesh.face_mut(new_face).edge = Some(new_ba);

    redistribute_conflicts(mesh, face, new_face, new_ab);

    new_ab
}

/// Walks `f1`'s conflict list (before the split it just underwent),
/// reassigning each unprocessed edge to `f1` or `f2` by classifying its
/// endpoints against the separator `sep` (spec §4.1 "Conflict
/// redistribution").
fn redistribute_conflicts<N: Scalar>(mesh: &mut Mesh<N>, f1: FaceId, f2: FaceId, sep: HalfEdgeId) {
    let edges = mesh.take_conflicts(f1);
    for u in edges {
        let a = mesh.coords(mesh.edge(u).origin);
        let b = mesh.coords(mesh.dest(u));
        let sa = side_of_separator(mesh, sep, a);
        let target = if sa > 0 {
            f1
        } else if sa < 0 {
            f2
        } else {
            let sb = side_of_separator(mesh, sep, b);
            if sb < 0 {
                f2
            } else {
                f1
            }
        };
        mesh.push_conflict(target, u);
    }
}

/// Locates the face on the far side of `at` in the direction of `toward`
/// by rotating CCW through `at`'s outgoing half-edges (spec §4.1 step 6).
fn find_next_face<N: Scalar>(mesh: &Mesh<N>, at: VertexId, toward: Point<N>) -> FaceId {
    let start = mesh.vertex(at).edge.expect("vertex has an outgoing edge");
    let mut out_edges = Vec::new();
    let mut cur = start;
    loop {
        out_edges.push(cur);
        let t = mesh.edge(cur).twin.expect("interior vertex edge has a twin");
        cur = mesh.edge(t).next;
        if cur == start {
            break;
        }
    }

    let p = mesh.coords(at);
    let n = out_edges.len();
    for i in 0..n {
        let e_i = out_edges[i];
        let e_next = out_edges[(i + 1) % n];
        let d_i = mesh.coords(mesh.dest(e_i));
        let d_next = mesh.coords(mesh.dest(e_next));
        let weakly_left = classify_point(toward, p, d_i) >= 0;
        let strictly_right_next = classify_point(toward, p, d_next) < 0;
        if weakly_left && strictly_right_next {
            return mesh.edge(e_i).face;
        }
    }
    mesh.edge(out_edges[0]).face
}

// ---------------------------------------------------------------------
// Face merge (spec §4.1 step 5)
// ---------------------------------------------------------------------

/// Attempts to remove a freshly created, still zero-winding vertical
/// separator whose neighboring horizontal edges are near-collinear, per the
/// `4 Area^2 <= eps^2 |AB|^2` test (spec §4.1 step 5, eps = 1).
fn try_merge_at_vertical<N: Scalar>(mesh: &mut Mesh<N>, sep: HalfEdgeId) {
    if mesh.edge(sep).winding != 0 {
        return;
    }
    let twin = match mesh.edge(sep).twin {
        Some(t) => t,
        None => return,
    };
    if mesh.edge(twin).winding != 0 {
        return;
    }

    let prev_a = mesh.edge(sep).prev;
    let next_a = mesh.edge(sep).next;
    let prev_b = mesh.edge(twin).prev;
    let next_b = mesh.edge(twin).next;

    if !near_collinear_at_shared_vertex(mesh, prev_a, next_b) {
        return;
    }
    if !near_collinear_at_shared_vertex(mesh, prev_b, next_a) {
        return;
    }

    merge_faces_removing_separator(mesh, sep, twin);
}

fn near_collinear_at_shared_vertex<N: Scalar>(mesh: &Mesh<N>, into_edge: HalfEdgeId, out_edge: HalfEdgeId) -> bool {
    let a = mesh.coords(mesh.edge(into_edge).origin);
    let b = mesh.coords(mesh.dest(into_edge));
    let c = mesh.coords(mesh.dest(out_edge));
    let twice_area = (b - a).cross(c - a);
    let ab2 = (b - a).square_length();
    let eps = N::ONE;
    twice_area * twice_area <= eps * eps * ab2
}

fn merge_faces_removing_separator<N: Scalar>(mesh: &mut Mesh<N>, sep: HalfEdgeId, twin: HalfEdgeId) {
    let face_a = mesh.edge(sep).face;
    let face_b = mesh.edge(twin).face;

    let prev_a = mesh.edge(sep).prev;
    let next_a = mesh.edge(sep).next;
    let prev_b = mesh.edge(twin).prev;
    let next_b = mesh.edge(twin).next;

    mesh.link(prev_a, next_b);
    mesh.link(prev_b, next_a);

    mesh.face_mut(face_a).edge = Some(next_b);
    mesh.face_mut(face_b).edge = None;

    let mut cur = next_b;
    loop {
        mesh.edge_mut(cur).face = face_a;
        cur = mesh.edge(cur).next;
        if cur == next_b {
            break;
        }
    }

    let leftover = mesh.take_conflicts(face_b);
    for u in leftover {
        mesh.push_conflict(face_a, u);
    }
}

// ---------------------------------------------------------------------
// Output extraction
// ---------------------------------------------------------------------

/// Floods winding numbers outward from the frame face (winding 0) across
/// the dual graph: crossing a half-edge from its own face to its twin's
/// subtracts that half-edge's winding contribution.
fn compute_windings<N: Scalar>(mesh: &Mesh<N>, frame_face: FaceId) -> Vec<i32> {
    let n = mesh.faces.len();
    let mut winding = alloc::vec![0i32; n];
    let mut visited = alloc::vec![false; n];
    let mut stack = alloc::vec![frame_face];
    visited[frame_face.index()] = true;

    while let Some(f) = stack.pop() {
        if mesh.face(f).edge.is_none() {
            continue;
        }
        for e in mesh.boundary(f) {
            if let Some(t) = mesh.edge(e).twin {
                let other = mesh.edge(t).face;
                if !visited[other.index()] {
                    visited[other.index()] = true;
                    winding[other.index()] = winding[f.index()] - mesh.edge(e).winding;
                    stack.push(other);
                }
            }
        }
    }
    winding
}

fn extract_faces<N: Scalar>(mesh: &Mesh<N>, frame_face: FaceId, rule: WindingRule) -> Vec<PlanarFace<N>> {
    let windings = compute_windings(mesh, frame_face);
    let mut out = Vec::new();
    for i in 0..mesh.faces.len() {
        let f = FaceId(i as u32);
        if f == frame_face || mesh.face(f).edge.is_none() {
            continue;
        }
        let boundary = mesh.boundary(f);
        let ring: Vec<Point<N>> = boundary.iter().map(|&e| mesh.coords(mesh.edge(e).origin)).collect();
        let winding = windings[i];
        out.push(PlanarFace {
            ring,
            winding,
            filled: rule.is_filled(winding),
        });
    }
    out
}
