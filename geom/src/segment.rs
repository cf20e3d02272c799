use crate::scalar::Scalar;
use crate::vector::{Point, Vector2};

/// Sign of the signed area of the triangle `(a, b, c)` — the orientation
/// predicate used throughout the planarizer and simplifier (spec §3, §4.1
/// `classify_point`, §4.2 direction inference).
///
/// Positive means `c` is to the left of the directed line `a -> b`
/// (counter-clockwise turn), negative means to the right (clockwise turn),
/// zero means collinear.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Exact orientation test: the sign of `(b - a) x (c - a)`.
pub fn orient2d<N: Scalar>(a: Point<N>, b: Point<N>, c: Point<N>) -> Orientation {
    let cross = (b - a).cross(c - a);
    if cross > N::ZERO {
        Orientation::CounterClockwise
    } else if cross < N::ZERO {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Classifies `p` against the directed line `a -> b`: `< 0` strictly right,
/// `> 0` strictly left, `0` on the line. This is `classify_point` from
/// spec §4.1 (used to classify an endpoint against a trapeze wall, and to
/// classify a conflict-list edge's endpoints against a separator half-edge).
pub fn classify_point<N: Scalar>(p: Point<N>, a: Point<N>, b: Point<N>) -> i32 {
    match orient2d(a, b, p) {
        Orientation::CounterClockwise => 1,
        Orientation::Clockwise => -1,
        Orientation::Collinear => 0,
    }
}

/// A directed line segment from `from` to `to`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<N> {
    pub from: Point<N>,
    pub to: Point<N>,
}

/// Outcome of intersecting two segments, with the parametric position
/// (`alpha`) along `self` at which the intersection occurs, as required by
/// the planarizer's "largest alpha wins" clipping rule (spec §4.1 step 2).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentIntersection<N> {
    /// The segments cross (or touch) at a single point, `alpha` along `self`.
    Point { alpha: N },
    /// The segments are parallel and do not touch.
    None,
    /// The segments are collinear (a degenerate case of parallel).
    Collinear,
}

impl<N: Scalar> LineSegment<N> {
    #[inline]
    pub fn new(from: Point<N>, to: Point<N>) -> Self {
        LineSegment { from, to }
    }

    #[inline]
    pub fn vector(&self) -> Vector2<N> {
        self.to - self.from
    }

    #[inline]
    pub fn sample(&self, t: N) -> Point<N> {
        self.from + self.vector() * t
    }

    /// Intersects `self` with `other`. Ported from the teacher's
    /// `LineSegment::intersection_t` (`geom/src/line.rs`): postpones the
    /// division by the cross product so the comparisons happen on exact
    /// values for integer/fixed-point coordinates, only dividing once the
    /// in-range check has passed.
    pub fn intersection(&self, other: &Self) -> SegmentIntersection<N> {
        let v1 = self.vector();
        let v2 = other.vector();
        let v1_cross_v2 = v1.cross(v2);

        if v1_cross_v2 == N::ZERO {
            // Parallel. Distinguish "never touches" from "collinear" by
            // checking whether `other.from` lies on the line through `self`.
            let v3 = other.from - self.from;
            return if v1.cross(v3) == N::ZERO {
                SegmentIntersection::Collinear
            } else {
                SegmentIntersection::None
            };
        }

        let sign = if v1_cross_v2 > N::ZERO { N::ONE } else { -N::ONE };
        let abs_v1_cross_v2 = v1_cross_v2.abs();

        let v3 = other.from - self.from;
        let t = v3.cross(v2) * sign;
        let u = v3.cross(v1) * sign;

        if t < N::ZERO || t > abs_v1_cross_v2 || u < N::ZERO || u > abs_v1_cross_v2 {
            return SegmentIntersection::None;
        }

        SegmentIntersection::Point {
            alpha: t / abs_v1_cross_v2,
        }
    }
}

#[test]
fn test_crossing_segments() {
    let a = LineSegment::new(Point::new(0.0f64, 0.0), Point::new(10.0, 10.0));
    let b = LineSegment::new(Point::new(0.0f64, 10.0), Point::new(10.0, 0.0));
    match a.intersection(&b) {
        SegmentIntersection::Point { alpha } => assert!((alpha - 0.5).abs() < 1e-9),
        other => panic!("expected a point intersection, got {:?}", other),
    }
}

#[test]
fn test_parallel_segments_no_touch() {
    let a = LineSegment::new(Point::new(0.0f64, 0.0), Point::new(10.0, 0.0));
    let b = LineSegment::new(Point::new(0.0f64, 1.0), Point::new(10.0, 1.0));
    assert_eq!(a.intersection(&b), SegmentIntersection::None);
}

#[test]
fn test_collinear_segments() {
    let a = LineSegment::new(Point::new(0.0f64, 0.0), Point::new(10.0, 0.0));
    let b = LineSegment::new(Point::new(2.0f64, 0.0), Point::new(12.0, 0.0));
    assert_eq!(a.intersection(&b), SegmentIntersection::Collinear);
}

#[test]
fn test_orient2d() {
    let a = Point::new(0.0f32, 0.0);
    let b = Point::new(10.0f32, 0.0);
    assert_eq!(orient2d(a, b, Point::new(5.0, 5.0)), Orientation::CounterClockwise);
    assert_eq!(orient2d(a, b, Point::new(5.0, -5.0)), Orientation::Clockwise);
    assert_eq!(orient2d(a, b, Point::new(5.0, 0.0)), Orientation::Collinear);
}
