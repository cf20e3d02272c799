//! The doubly connected edge list (DCEL) the planarizer builds and mutates,
//! and the "trapeze view" derivation spec §3/§4.1 describes.
//!
//! Records are arena-resident, referenced by index rather than by pointer
//! (spec §9's "arena-and-index representation"), which sidesteps the
//! cyclic-pointer-graph problem the DCEL's `next`/`prev`/`twin` links would
//! otherwise create in safe Rust. This mirrors the index-newtype style the
//! teacher crate uses for `VertexId` (`tessellation/src/lib.rs`), extended
//! here to half-edges and faces as well.

use alloc::vec::Vec;
use crate::arena::{DynamicPool, StaticPool};
use planargon_geom::{classify_point, Point, Scalar};

macro_rules! index_type {
    ($name:ident) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

index_type!(VertexId);
index_type!(HalfEdgeId);
index_type!(FaceId);
index_type!(ConflictId);

/// Tags whether a half-edge comes from the original input or was created by
/// an internal subdivision step (spec §3).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Unknown,
    Input,
    Ignore,
}

#[derive(Clone, Debug)]
pub struct Vertex<N> {
    pub coords: Point<N>,
    pub edge: Option<HalfEdgeId>,
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub twin: Option<HalfEdgeId>,
    pub next: HalfEdgeId,
    pub prev: HalfEdgeId,
    pub face: FaceId,
    pub winding: i32,
    pub kind: EdgeKind,
    /// Valid only while this edge is unprocessed input, per spec §3.
    pub conflict_face: Option<FaceId>,
}

#[derive(Clone, Debug, Default)]
pub struct Face {
    pub edge: Option<HalfEdgeId>,
    pub conflict_list: Option<ConflictId>,
}

#[derive(Clone, Copy, Debug)]
pub struct ConflictNode {
    pub edge: HalfEdgeId,
    pub next: Option<ConflictId>,
}

/// Arena-backed planar subdivision being built by the planarizer.
///
/// `vertices`/`half_edges`/`faces` for the frame and staged input edges are
/// allocated once up front in a [`StaticPool`]; everything created by
/// incremental splits grows a [`DynamicPool`] — both pools are plain `Vec`s
/// under the hood (see `arena.rs`), so teardown is ordinary `Drop`, which is
/// the "scope-bound owner" spec §5 asks for.
pub struct Mesh<N> {
    pub vertices: StaticPool<Vertex<N>>,
    pub half_edges: StaticPool<HalfEdge>,
    pub faces: StaticPool<Face>,
    pub conflicts: DynamicPool<ConflictNode>,
}

impl<N: Scalar> Mesh<N> {
    pub fn with_capacity(vertices: usize, half_edges: usize, faces: usize) -> Self {
        Mesh {
            vertices: StaticPool::with_capacity(vertices),
            half_edges: StaticPool::with_capacity(half_edges),
            faces: StaticPool::with_capacity(faces),
            conflicts: DynamicPool::new(),
        }
    }

    pub fn alloc_vertex(&mut self, coords: Point<N>) -> VertexId {
        VertexId(self.vertices.alloc(Vertex { coords, edge: None }))
    }

    pub fn alloc_face(&mut self) -> FaceId {
        FaceId(self.faces.alloc(Face::default()))
    }

    /// Allocates a half-edge/twin pair from `from` to `to`, both starting
    /// with no `next`/`prev` (caller splices them into the DCEL), both
    /// tagged `Input` and pointing their conflict_face at `home_face`.
    pub fn alloc_edge_pair(
        &mut self,
        from: VertexId,
        to: VertexId,
        home_face: FaceId,
    ) -> (HalfEdgeId, HalfEdgeId) {
        let a_id = HalfEdgeId(self.half_edges.alloc(HalfEdge {
            origin: from,
            twin: None,
            next: HalfEdgeId(0),
            prev: HalfEdgeId(0),
            face: home_face,
            winding: 0,
            kind: EdgeKind::Input,
            conflict_face: Some(home_face),
        }));
        let b_id = HalfEdgeId(self.half_edges.alloc(HalfEdge {
            origin: to,
            twin: Some(a_id),
            next: HalfEdgeId(0),
            prev: HalfEdgeId(0),
            face: home_face,
            winding: 0,
            kind: EdgeKind::Input,
            conflict_face: None,
        }));
        self.half_edges.get_mut(a_id.0).twin = Some(b_id);
        (a_id, b_id)
    }

    #[inline]
    pub fn edge(&self, id: HalfEdgeId) -> &HalfEdge {
        self.half_edges.get(id.0)
    }

    #[inline]
    pub fn edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        self.half_edges.get_mut(id.0)
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex<N> {
        self.vertices.get(id.0)
    }

    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex<N> {
        self.vertices.get_mut(id.0)
    }

    /// Allocates a single half-edge with no twin, `conflict_face: None`: used
    /// for the frame's boundary, which spec §4.1 step 1 says has no twins.
    pub fn alloc_edge(&mut self, origin: VertexId, face: FaceId, kind: EdgeKind) -> HalfEdgeId {
        HalfEdgeId(self.half_edges.alloc(HalfEdge {
            origin,
            twin: None,
            next: HalfEdgeId(0),
            prev: HalfEdgeId(0),
            face,
            winding: 0,
            kind,
            conflict_face: None,
        }))
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        self.faces.get(id.0)
    }

    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        self.faces.get_mut(id.0)
    }

    #[inline]
    pub fn dest(&self, e: HalfEdgeId) -> VertexId {
        self.edge(self.edge(e).next).origin
    }

    #[inline]
    pub fn coords(&self, v: VertexId) -> Point<N> {
        self.vertex(v).coords
    }

    /// Links `prev -> next` around a face (spec §3 DCEL invariant).
    pub fn link(&mut self, prev: HalfEdgeId, next: HalfEdgeId) {
        self.edge_mut(prev).next = next;
        self.edge_mut(next).prev = prev;
    }

    /// Pushes an unprocessed input edge onto a face's conflict list (LIFO,
    /// matching spec §4.1's conflict redistribution contract).
    pub fn push_conflict(&mut self, face: FaceId, edge: HalfEdgeId) {
        let head = self.face(face).conflict_list;
        let node = ConflictId(self.conflicts.alloc(ConflictNode { edge, next: head }));
        self.face_mut(face).conflict_list = Some(node);
        self.edge_mut(edge).conflict_face = Some(face);
    }

    /// Walks a face's boundary once, returning its half-edges in order.
    /// Panics (debug-only assertion, spec §8 invariant 2) if the walk does
    /// not return to its start within `half_edges.len()` steps.
    pub fn boundary(&self, face: FaceId) -> Vec<HalfEdgeId> {
        let start = self
            .face(face)
            .edge
            .expect("face has no boundary edge recorded");
        let mut out = Vec::new();
        let mut cur = start;
        let limit = self.half_edges.len();
        loop {
            out.push(cur);
            cur = self.edge(cur).next;
            if cur == start {
                break;
            }
            debug_assert!(out.len() <= limit, "face boundary walk did not close");
        }
        out
    }

    /// Drains (and clears) the conflict list of `face`, returning its edges
    /// in the order they were pushed (most-recently-pushed first, since the
    /// list is LIFO).
    pub fn take_conflicts(&mut self, face: FaceId) -> Vec<HalfEdgeId> {
        let mut out = Vec::new();
        let mut cur = self.face_mut(face).conflict_list.take();
        while let Some(id) = cur {
            let node = *self.conflicts.get(id.0);
            out.push(node.edge);
            cur = node.next;
        }
        out
    }
}

/// The four marker half-edges that make every face a trapeze between
/// processing steps (spec §3's trapeze invariant).
#[derive(Copy, Clone, Debug)]
pub struct TrapezeView {
    pub left_top: HalfEdgeId,
    pub left_bottom: HalfEdgeId,
    pub right_bottom: HalfEdgeId,
    pub right_top: HalfEdgeId,
    /// Boundary half-edges from `right_top` to `left_top` (inclusive of
    /// `right_top`, exclusive of `left_top`), x-monotone.
    pub top_chain: Vec<HalfEdgeId>,
    /// Boundary half-edges from `left_bottom` to `right_bottom` (inclusive
    /// of `left_bottom`, exclusive of `right_bottom`), x-monotone.
    pub bottom_chain: Vec<HalfEdgeId>,
}

impl TrapezeView {
    pub fn left_x<N: Scalar>(&self, mesh: &Mesh<N>) -> N {
        mesh.coords(mesh.edge(self.left_top).origin).x
    }

    pub fn right_x<N: Scalar>(&self, mesh: &Mesh<N>) -> N {
        mesh.coords(mesh.edge(self.right_top).origin).x
    }
}

/// Derives the trapeze view of `face` via a single boundary walk (spec §3).
///
/// Panics under `debug_assertions` ([`AssertionViolation::DegenerateTrapeze`]
/// in the public API) if the face's boundary is not, in fact, a trapeze —
/// that is its own bug in the planarizer, not a caller error.
pub fn trapeze_view<N: Scalar>(mesh: &Mesh<N>, face: FaceId) -> TrapezeView {
    let boundary = mesh.boundary(face);
    debug_assert!(boundary.len() >= 3, "a trapeze has at least 3 edges");

    let mut xl = mesh.coords(mesh.edge(boundary[0]).origin).x;
    let mut xr = xl;
    for &e in &boundary {
        let x = mesh.coords(mesh.edge(e).origin).x;
        if x < xl {
            xl = x;
        }
        if x > xr {
            xr = x;
        }
    }

    // Among the vertices at x == xl, the one with greatest y is the top of
    // the left wall, least y is the bottom; symmetrically for x == xr.
    let mut left_top = None;
    let mut left_bottom = None;
    let mut right_top = None;
    let mut right_bottom = None;
    for &e in &boundary {
        let p = mesh.coords(mesh.edge(e).origin);
        if p.x == xl {
            left_top = Some(match left_top {
                None => e,
                Some(cur) => {
                    if p.y > mesh.coords(mesh.edge(cur).origin).y {
                        e
                    } else {
                        cur
                    }
                }
            });
            left_bottom = Some(match left_bottom {
                None => e,
                Some(cur) => {
                    if p.y < mesh.coords(mesh.edge(cur).origin).y {
                        e
                    } else {
                        cur
                    }
                }
            });
        }
        if p.x == xr {
            right_top = Some(match right_top {
                None => e,
                Some(cur) => {
                    if p.y > mesh.coords(mesh.edge(cur).origin).y {
                        e
                    } else {
                        cur
                    }
                }
            });
            right_bottom = Some(match right_bottom {
                None => e,
                Some(cur) => {
                    if p.y < mesh.coords(mesh.edge(cur).origin).y {
                        e
                    } else {
                        cur
                    }
                }
            });
        }
    }

    let left_top = left_top.expect("trapeze has a left wall");
    let left_bottom = left_bottom.expect("trapeze has a left wall");
    let right_top = right_top.expect("trapeze has a right wall");
    let right_bottom = right_bottom.expect("trapeze has a right wall");

    // The boundary walk is CCW, so from `left_top` it descends the left
    // wall first, then the bottom (left to right), then the right wall
    // (bottom to top), then the top (right to left) back to `left_top`:
    // bottom_chain runs `left_bottom -> right_bottom`, top_chain runs
    // `right_top -> left_top`.
    let start = boundary
        .iter()
        .position(|&e| e == left_top)
        .expect("left_top is on the boundary");
    let rotated: Vec<HalfEdgeId> = boundary[start..]
        .iter()
        .chain(boundary[..start].iter())
        .copied()
        .collect();
    let lb_pos = rotated
        .iter()
        .position(|&e| e == left_bottom)
        .expect("left_bottom is on the boundary");
    let rb_pos = rotated
        .iter()
        .position(|&e| e == right_bottom)
        .expect("right_bottom is on the boundary");
    let rt_pos = rotated
        .iter()
        .position(|&e| e == right_top)
        .expect("right_top is on the boundary");

    let bottom_chain = rotated[lb_pos..rb_pos.max(lb_pos + 1)].to_vec();
    let top_chain = rotated[rt_pos..].to_vec();

    TrapezeView {
        left_top,
        left_bottom,
        right_bottom,
        right_top,
        top_chain,
        bottom_chain,
    }
}

/// Where a point falls relative to a trapeze (spec §4.1 inner walk step 1).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrapezeClass {
    StrictlyInside,
    BoundaryVertex,
    LeftWall,
    RightWall,
    TopWall,
    BottomWall,
    Outside,
}

/// Classifies `p` against `trapeze` using only exact comparisons (spec §9:
/// "never epsilon" except the explicit merge-test below).
pub fn classify_in_trapeze<N: Scalar>(
    mesh: &Mesh<N>,
    trapeze: &TrapezeView,
    p: Point<N>,
) -> TrapezeClass {
    let xl = trapeze.left_x(mesh);
    let xr = trapeze.right_x(mesh);

    if p.x < xl || p.x > xr {
        return TrapezeClass::Outside;
    }

    if p.x == xl {
        let top = mesh.coords(mesh.edge(trapeze.left_top).origin);
        let bottom = mesh.coords(mesh.edge(trapeze.left_bottom).origin);
        return vertical_wall_class(p, top, bottom);
    }
    if p.x == xr {
        let top = mesh.coords(mesh.edge(trapeze.right_top).origin);
        let bottom = mesh.coords(mesh.edge(trapeze.right_bottom).origin);
        return vertical_wall_class(p, top, bottom);
    }

    let y_top = sample_chain_y(mesh, &trapeze.top_chain, p.x);
    let y_bottom = sample_chain_y(mesh, &trapeze.bottom_chain, p.x);

    if p.y == y_top || p.y == y_bottom {
        return TrapezeClass::BoundaryVertex;
    }
    if p.y > y_top {
        return TrapezeClass::Outside;
    }
    if p.y < y_bottom {
        return TrapezeClass::Outside;
    }
    TrapezeClass::StrictlyInside
}

fn vertical_wall_class<N: Scalar>(p: Point<N>, top: Point<N>, bottom: Point<N>) -> TrapezeClass {
    if p.y == top.y || p.y == bottom.y {
        return TrapezeClass::BoundaryVertex;
    }
    if p.y > bottom.y && p.y < top.y {
        return if p.x == top.x {
            TrapezeClass::LeftWall
        } else {
            TrapezeClass::RightWall
        };
    }
    TrapezeClass::Outside
}

/// Finds the y coordinate of an x-monotone chain at `x` by locating the
/// span that covers it and sampling it linearly. Falls back to the nearest
/// endpoint when `x` lands exactly on a chain vertex.
fn sample_chain_y<N: Scalar>(mesh: &Mesh<N>, chain: &[HalfEdgeId], x: N) -> N {
    for &e in chain {
        let a = mesh.coords(mesh.edge(e).origin);
        let b = mesh.coords(mesh.edge(mesh.edge(e).next).origin);
        let (lo, hi) = if a.x <= b.x { (a, b) } else { (b, a) };
        if x == lo.x {
            return lo.y;
        }
        if x == hi.x {
            return hi.y;
        }
        if x > lo.x && x < hi.x {
            let t = (x - lo.x) / (hi.x - lo.x);
            return lo.y + (hi.y - lo.y) * t;
        }
    }
    // Degenerate trapeze (zero-width chain): fall back to its single vertex.
    mesh.coords(mesh.edge(chain[0]).origin).y
}

/// `classify_point` specialised to classify a point against a separator
/// half-edge, used by conflict-list redistribution (spec §4.1).
pub fn side_of_separator<N: Scalar>(mesh: &Mesh<N>, sep: HalfEdgeId, p: Point<N>) -> i32 {
    let a = mesh.coords(mesh.edge(sep).origin);
    let b = mesh.coords(mesh.dest(sep));
    classify_point(p, a, b)
}
