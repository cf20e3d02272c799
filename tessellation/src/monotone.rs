//! Monotone-polygon triangulation (spec §4.4), a direct generalization of
//! the teacher's `BasicMonotoneTessellator` (`tessellation/src/monotone.rs`)
//! from its fill-specific vertical sweep to either axis via a
//! [`MonotoneAxis`] parameter. The classical stack-sweep algorithm is kept
//! in spirit: vertices are merged into one ascending-by-axis sequence
//! tagged by which of the two monotone chains they came from, then fed
//! one at a time through a stack that emits a triangle whenever three
//! consecutive entries turn the right way.

use alloc::vec::Vec;

use planargon_geom::{Point, Scalar};

use crate::error::{InvalidInput, TessellationResult};
use crate::geometry_builder::{BoundaryGeometryBuilder, BoundaryInfo, GeometryBuilder, VertexId};

/// Which coordinate a monotone polygon is monotone with respect to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MonotoneAxis {
    X,
    Y,
}

fn axis_coord<N: Scalar>(p: Point<N>, axis: MonotoneAxis) -> N {
    match axis {
        MonotoneAxis::X => p.x,
        MonotoneAxis::Y => p.y,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ChainSide {
    A,
    B,
}

impl ChainSide {
    fn opposite(self) -> Self {
        match self {
            ChainSide::A => ChainSide::B,
            ChainSide::B => ChainSide::A,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct MonotoneVertex<N> {
    pos: Point<N>,
    id: VertexId,
    side: ChainSide,
}

/// Triangulates a polygon known to be monotone along `axis`, in the order
/// its vertices are given (the same contract as the teacher's stack
/// sweep): behavior on non-monotone input is unspecified but must not
/// panic outside of debug assertions.
pub fn triangulate_monotone<N: Scalar>(
    polygon: &[Point<N>],
    axis: MonotoneAxis,
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

    let mut min_idx = 0;
    let mut max_idx = 0;
    for i in 1..n {
        if axis_coord(polygon[i], axis) < axis_coord(polygon[min_idx], axis) {
            min_idx = i;
        }
        if axis_coord(polygon[i], axis) > axis_coord(polygon[max_idx], axis) {
            max_idx = i;
        }
    }

    let chain_a = walk(n, min_idx, max_idx, 1);
    let chain_b = walk(n, min_idx, max_idx, n - 1);

    builder.begin_geometry();
    let ids: Vec<VertexId> = polygon.iter().map(|&p| builder.add_vertex(p)).collect();

    let mut tess = MonotoneTess::new();
    tess.begin(polygon[min_idx], ids[min_idx]);

    let mut ia = 1;
    let mut ib = 1;
    // Merge the two chains' interior vertices (everything but their shared
    // start at min_idx and shared end at max_idx) in ascending axis order.
    while ia < chain_a.len() - 1 || ib < chain_b.len() - 1 {
        let take_a = if ia >= chain_a.len() - 1 {
            false
        } else if ib >= chain_b.len() - 1 {
            true
        } else {
            axis_coord(polygon[chain_a[ia]], axis) <= axis_coord(polygon[chain_b[ib]], axis)
        };

        if take_a {
            let idx = chain_a[ia];
            tess.vertex(polygon[idx], ids[idx], ChainSide::A);
            ia += 1;
        } else {
            let idx = chain_b[ib];
            tess.vertex(polygon[idx], ids[idx], ChainSide::B);
            ib += 1;
        }
    }

    tess.end(polygon[max_idx], ids[max_idx]);

    for &(a, b, c) in &tess.triangles {
        if want_boundary {
            let info = boundary_info_for(n, a, b, c);
            builder.add_triangle_with_boundary(a, b, c, info);
        } else {
            builder.add_triangle(a, b, c);
        }
    }

    builder.end_geometry();
    Ok(())
}

fn walk(n: usize, from: usize, to: usize, step: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut i = from;
    loop {
        out.push(i);
        if i == to {
            break;
        }
        i = (i + step) % n;
    }
    out
}

fn boundary_info_for(n: usize, a: VertexId, b: VertexId, c: VertexId) -> BoundaryInfo {
    let adjacent = |x: VertexId, y: VertexId| {
        let (x, y) = (x.offset() as usize, y.offset() as usize);
        let d = if x > y { x - y } else { y - x };
        d == 1 || d == n - 1
    };
    BoundaryInfo::new(adjacent(a, b), adjacent(b, c), adjacent(c, a))
}

struct MonotoneTess<N> {
    stack: Vec<MonotoneVertex<N>>,
    previous: Option<MonotoneVertex<N>>,
    triangles: Vec<(VertexId, VertexId, VertexId)>,
}

impl<N: Scalar> MonotoneTess<N> {
    fn new() -> Self {
        MonotoneTess {
            stack: Vec::new(),
            previous: None,
            triangles: Vec::new(),
        }
    }

    fn begin(&mut self, pos: Point<N>, id: VertexId) {
        let first = MonotoneVertex {
            pos,
            id,
            side: ChainSide::A,
        };
        self.previous = Some(first);
        self.stack.clear();
        self.stack.push(first);
    }

    fn vertex(&mut self, pos: Point<N>, id: VertexId, side: ChainSide) {
        self.push_event(MonotoneVertex { pos, id, side });
    }

    fn push_event(&mut self, current: MonotoneVertex<N>) {
        let previous = self.previous.expect("begin() called before vertex()");
        let changed_side = current.side != previous.side;

        if changed_side {
            for i in 0..self.stack.len() - 1 {
                let mut a = self.stack[i];
                let mut b = self.stack[i + 1];
                let winding = (a.pos - b.pos).cross(current.pos - b.pos) >= N::ZERO;
                if !winding {
                    core::mem::swap(&mut a, &mut b);
                }
                self.triangles.push((a.id, b.id, current.id));
            }
            self.stack.clear();
            self.stack.push(previous);
        } else {
            let mut last_popped = self.stack.pop();
            while !self.stack.is_empty() {
                let mut a = last_popped.unwrap();
                let mut b = *self.stack.last().unwrap();
                if current.side == ChainSide::B {
                    core::mem::swap(&mut a, &mut b);
                }
                let cross = (current.pos - b.pos).cross(a.pos - b.pos);
                if cross >= N::ZERO {
                    self.triangles.push((b.id, a.id, current.id));
                    last_popped = self.stack.pop();
                } else {
                    break;
                }
            }
            if let Some(item) = last_popped {
                self.stack.push(item);
            }
        }

        self.stack.push(current);
        self.previous = Some(current);
    }

    fn end(&mut self, pos: Point<N>, id: VertexId) {
        let side = self.previous.expect("begin() called before end()").side.opposite();
        self.vertex(pos, id, side);
        self.stack.clear();
    }
}

#[test]
fn test_monotone_zigzag() {
    use crate::geometry_builder::{BuffersBuilder, VertexBuffers};

    let polygon: Vec<Point<f32>> = [
        (50.0, 100.0),
        (100.0, 50.0),
        (150.0, 100.0),
        (200.0, 50.0),
        (300.0, 100.0),
        (400.0, 50.0),
        (500.0, 100.0),
        (500.0, 200.0),
        (400.0, 150.0),
        (300.0, 200.0),
        (200.0, 150.0),
        (150.0, 200.0),
        (100.0, 150.0),
        (50.0, 200.0),
    ]
    .iter()
    .map(|&(x, y)| Point::new(x, y))
    .collect();

    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    triangulate_monotone(&polygon, MonotoneAxis::X, false, &mut builder).unwrap();

    assert_eq!(buffers.indices.len(), 3 * 12);
}
