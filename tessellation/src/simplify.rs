//! Polygon simplification (spec §4.2): decomposes self-intersecting input
//! contours into simple pieces, infers a winding direction for each, nests
//! them into a nonzero/even-odd fill tree, collapses same-fill nesting, and
//! bridges surviving holes into their parent so the result is a flat list
//! of simple, hole-free contours ready for `triangulate_ear_clip`.
//!
//! `simplify_components`, which the spec treats as an out-of-scope
//! collaborator, is implemented here by reusing the planarizer: running one
//! contour's edges through it and reading back its filled faces is exactly
//! the self-intersection resolution the pipeline needs, and it is the tool
//! spec §4.1 already built for arranging edges into faces.

use alloc::vec::Vec;

use planargon_geom::{classify_point, orient2d, LineSegment, Orientation, Point, Scalar, SegmentIntersection};

use crate::chunker::Chunker;
use crate::error::TessellationResult;
use crate::planarize::{Planarizer, WindingRule};

/// Winding direction of a simple contour (spec §3's `direction ∈ {cw, ccw,
/// unknown}`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Cw,
    Ccw,
    Unknown,
}

/// Output of [`simplify`]: a flat chunker of simple, hole-free contours
/// (holes already bridged in), one `Direction` and accumulated winding
/// depth per contour.
#[derive(Clone, Debug)]
pub struct SimpleContours<N> {
    pub contours: Chunker<Point<N>>,
    pub directions: Vec<Direction>,
    pub windings: Vec<i32>,
}

pub fn simplify<N: Scalar>(contours: &Chunker<Point<N>>, seed: u64) -> TessellationResult<SimpleContours<N>> {
    contours.validate()?;

    let rings = simplify_components(contours, seed)?;
    if rings.is_empty() {
        return Ok(SimpleContours {
            contours: Chunker::new(),
            directions: Vec::new(),
            windings: Vec::new(),
        });
    }

    let directions: Vec<Direction> = rings.iter().map(|r| infer_direction(r)).collect();
    let (nodes, roots) = build_inclusion_tree(&rings);

    let mut survivors = Vec::new();
    for &r in &roots {
        survivors.extend(tag_and_merge(&nodes, &directions, r, 0));
    }

    let mut flattened = Vec::new();
    for s in &survivors {
        flatten_and_bridge(s, &rings, &mut flattened);
    }

    let mut out = Chunker::new();
    let mut out_directions = Vec::new();
    let mut out_windings = Vec::new();
    for (ring, winding) in flattened {
        out.push_contour(ring);
        out_directions.push(if winding > 0 {
            Direction::Cw
        } else if winding < 0 {
            Direction::Ccw
        } else {
            Direction::Unknown
        });
        out_windings.push(winding);
    }

    Ok(SimpleContours {
        contours: out,
        directions: out_directions,
        windings: out_windings,
    })
}

/// Decomposes each input contour at its own self-intersections by
/// planarizing it alone and reading back its filled faces (spec §4.2 step
/// 1's `simplify_components` collaborator).
///
/// A face's `ring` is always listed in the DCEL's own CCW boundary-walk
/// order, regardless of which direction the piece of input contour that
/// produced it actually wound in; that direction survives only in the
/// face's signed `winding`. A piece that contributed negatively (a
/// clockwise loop) has its ring reversed here so the vertex order itself
/// carries the original orientation forward, the way
/// `infer_direction`/`bridge` downstream expect.
fn simplify_components<N: Scalar>(
    contours: &Chunker<Point<N>>,
    seed: u64,
) -> TessellationResult<Vec<Vec<Point<N>>>> {
    let mut out = Vec::new();
    for (i, contour) in contours.contours().enumerate() {
        let mut single = Chunker::new();
        single.push_contour(contour.iter().copied());
        let faces = Planarizer::new(seed.wrapping_add(i as u64)).planarize(&single, WindingRule::NonZero)?;
        for face in faces {
            if face.filled {
                let mut ring = face.ring;
                if face.winding < 0 {
                    ring.reverse();
                }
                out.push(ring);
            }
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------
// Direction inference (spec §4.2 step 2)
// ---------------------------------------------------------------------

fn infer_direction<N: Scalar>(ring: &[Point<N>]) -> Direction {
    let n = ring.len();
    if n < 3 {
        return Direction::Unknown;
    }

    let mut min_idx = 0;
    for i in 1..n {
        let p = ring[i];
        let best = ring[min_idx];
        if p.x < best.x || (p.x == best.x && p.y > best.y) {
            min_idx = i;
        }
    }

    let prev = match distinct_neighbor(ring, min_idx, -1) {
        Some(p) => p,
        None => return Direction::Unknown,
    };
    let next = match distinct_neighbor(ring, min_idx, 1) {
        Some(p) => p,
        None => return Direction::Unknown,
    };

    match orient2d(prev, ring[min_idx], next) {
        Orientation::CounterClockwise => Direction::Ccw,
        Orientation::Clockwise => Direction::Cw,
        Orientation::Collinear => Direction::Unknown,
    }
}

/// Walks `ring` from `start` in `step` direction (+1 or -1), skipping
/// vertices coincident with `ring[start]`, returning the first distinct one.
fn distinct_neighbor<N: Scalar>(ring: &[Point<N>], start: usize, step: isize) -> Option<Point<N>> {
    let n = ring.len() as isize;
    let base = ring[start];
    let mut idx = start as isize;
    for _ in 0..n {
        idx = (idx + step).rem_euclid(n);
        if ring[idx as usize] != base {
            return Some(ring[idx as usize]);
        }
    }
    None
}

// ---------------------------------------------------------------------
// Point-in-polygon (spec §4.2 "Point-in-polygon")
// ---------------------------------------------------------------------

fn winding_number<N: Scalar>(ring: &[Point<N>], p: Point<N>) -> i32 {
    let n = ring.len();
    let mut winding = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && classify_point(p, a, b) > 0 {
                winding += 1;
            }
        } else if b.y <= p.y && classify_point(p, a, b) < 0 {
            winding -= 1;
        }
    }
    winding
}

/// A point guaranteed interior to a simple polygon near its lex-min (and
/// therefore convex, per spec §4.2 step 2) vertex: the centroid of that
/// vertex and its two neighbors.
fn representative_point<N: Scalar>(ring: &[Point<N>]) -> Point<N> {
    let n = ring.len();
    let mut min_idx = 0;
    for i in 1..n {
        let p = ring[i];
        let best = ring[min_idx];
        if p.x < best.x || (p.x == best.x && p.y > best.y) {
            min_idx = i;
        }
    }
    let prev = ring[(min_idx + n - 1) % n];
    let next = ring[(min_idx + 1) % n];
    let sum = prev + ring[min_idx] + next;
    sum / N::from_f64(3.0)
}

fn ring_contains<N: Scalar>(rings: &[Vec<Point<N>>], outer: usize, inner: usize) -> bool {
    winding_number(&rings[outer], representative_point(&rings[inner])) != 0
}

// ---------------------------------------------------------------------
// Inclusion tree (spec §4.2 step 3)
// ---------------------------------------------------------------------

struct Node {
    children: Vec<usize>,
}

fn build_inclusion_tree<N: Scalar>(rings: &[Vec<Point<N>>]) -> (Vec<Node>, Vec<usize>) {
    let mut nodes: Vec<Node> = (0..rings.len()).map(|_| Node { children: Vec::new() }).collect();
    let mut roots: Vec<usize> = Vec::new();

    for i in 0..rings.len() {
        insert_one(&mut nodes, &mut roots, i, rings);
    }

    (nodes, roots)
}

fn insert_one<N: Scalar>(nodes: &mut Vec<Node>, roots: &mut Vec<usize>, new_idx: usize, rings: &[Vec<Point<N>>]) {
    let mut parent: Option<usize> = None;
    let mut siblings: Vec<usize> = roots.clone();

    loop {
        let descend_into = siblings.iter().copied().find(|&s| ring_contains(rings, s, new_idx));
        match descend_into {
            Some(s) => {
                parent = Some(s);
                siblings = nodes[s].children.clone();
            }
            None => break,
        }
    }

    let mut reparented = Vec::new();
    siblings.retain(|&s| {
        if ring_contains(rings, new_idx, s) {
            reparented.push(s);
            false
        } else {
            true
        }
    });

    nodes[new_idx].children = reparented.clone();

    match parent {
        Some(p) => {
            nodes[p].children.retain(|c| !reparented.contains(c));
            nodes[p].children.push(new_idx);
        }
        None => {
            roots.retain(|c| !reparented.contains(c));
            roots.push(new_idx);
        }
    }
}

// ---------------------------------------------------------------------
// Tag-and-merge (spec §4.2 step 4)
// ---------------------------------------------------------------------

struct SurvivingNode {
    ring_idx: usize,
    winding: i32,
    holes: Vec<SurvivingNode>,
}

fn tag_and_merge(nodes: &[Node], directions: &[Direction], node_idx: usize, parent_winding: i32) -> Vec<SurvivingNode> {
    let delta = match directions[node_idx] {
        Direction::Cw => 1,
        Direction::Ccw => -1,
        Direction::Unknown => 0,
    };
    let winding = parent_winding + delta;
    let same_fill_as_parent = (winding != 0) == (parent_winding != 0);

    let mut child_results = Vec::new();
    for &c in &nodes[node_idx].children {
        child_results.extend(tag_and_merge(nodes, directions, c, winding));
    }

    if same_fill_as_parent {
        // Redundant nesting (e.g. a duplicate same-direction contour):
        // this node contributes nothing of its own, but its surviving
        // descendants still need a home.
        child_results
    } else {
        let mut out = Vec::new();
        out.push(SurvivingNode {
            ring_idx: node_idx,
            winding,
            holes: child_results,
        });
        out
    }
}

// ---------------------------------------------------------------------
// Hole merging (spec §4.2 step 5)
// ---------------------------------------------------------------------

fn flatten_and_bridge<N: Scalar>(node: &SurvivingNode, rings: &[Vec<Point<N>>], out: &mut Vec<(Vec<Point<N>>, i32)>) {
    let mut merged = rings[node.ring_idx].clone();
    for hole in &node.holes {
        merged = bridge(&merged, &rings[hole.ring_idx]);
    }
    out.push((merged, node.winding));

    // Anything nested inside a hole is a separate shape (an island), not
    // part of this contour — emit it on its own.
    for hole in &node.holes {
        for grandchild in &hole.holes {
            flatten_and_bridge(grandchild, rings, out);
        }
    }
}

/// Signed area sign via the shoelace sum: positive for a CCW vertex order,
/// negative for CW, zero for a degenerate (zero-area) ring.
fn winding_sign<N: Scalar>(ring: &[Point<N>]) -> i32 {
    let n = ring.len();
    let mut sum = N::ZERO;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum = sum + (a.x * b.y - b.x * a.y);
    }
    if sum > N::ZERO {
        1
    } else if sum < N::ZERO {
        -1
    } else {
        0
    }
}

/// Splices `hole` into `outer` via a zero-width bridge between a mutually
/// visible vertex pair, found by naive O(n^2) search (spec §9 Open
/// Question decision): the simplest correct instance of the algorithm
/// class the spec describes.
///
/// A hole traversed in the same direction as its outer contour produces a
/// self-touching, non-simple ring once bridged; `hole` is reversed first
/// whenever its winding doesn't already oppose `outer`'s, regardless of
/// what order it arrived in.
fn bridge<N: Scalar>(outer: &[Point<N>], hole: &[Point<N>]) -> Vec<Point<N>> {
    let mut hole_oriented = hole.to_vec();
    let outer_sign = winding_sign(outer);
    if outer_sign != 0 && winding_sign(&hole_oriented) == outer_sign {
        hole_oriented.reverse();
    }
    let hole = &hole_oriented;

    let (i, j) = find_bridge(outer, hole);

    let mut out = Vec::with_capacity(outer.len() + hole.len() + 2);
    out.extend_from_slice(&outer[0..=i]);
    let hn = hole.len();
    for k in 0..=hn {
        out.push(hole[(j + k) % hn]);
    }
    out.push(outer[i]);
    out.extend_from_slice(&outer[i + 1..]);
    out
}

fn find_bridge<N: Scalar>(outer: &[Point<N>], hole: &[Point<N>]) -> (usize, usize) {
    for i in 0..outer.len() {
        for j in 0..hole.len() {
            if bridge_unobstructed(outer, hole, i, j) {
                return (i, j);
            }
        }
    }
    (0, 0)
}

fn bridge_unobstructed<N: Scalar>(outer: &[Point<N>], hole: &[Point<N>], i: usize, j: usize) -> bool {
    let seg = LineSegment::new(outer[i], hole[j]);

    let n = outer.len();
    for k in 0..n {
        if k == i || (k + 1) % n == i {
            continue;
        }
        let edge = LineSegment::new(outer[k], outer[(k + 1) % n]);
        if let SegmentIntersection::Point { alpha } = seg.intersection(&edge) {
            if alpha > N::ZERO && alpha < N::ONE {
                return false;
            }
        }
    }

    let m = hole.len();
    for k in 0..m {
        if k == j || (k + 1) % m == j {
            continue;
        }
        let edge = LineSegment::new(hole[k], hole[(k + 1) % m]);
        if let SegmentIntersection::Point { alpha } = seg.intersection(&edge) {
            if alpha > N::ZERO && alpha < N::ONE {
                return false;
            }
        }
    }

    true
}
