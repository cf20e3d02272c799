use planargon_geom::Point;

use crate::chunker::Chunker;
use crate::simplify::{simplify, Direction};

fn chunker_from(points: &[(f32, f32)]) -> Chunker<Point<f32>> {
    let mut c = Chunker::new();
    c.push_contour(points.iter().map(|&(x, y)| Point::new(x, y)));
    c
}

// S5: a self-intersecting figure-eight (bowtie) simplifies to two triangles
// meeting at the crossing point, with opposite directions.
#[test]
fn test_simplify_bowtie_scenario_s5() {
    let contours = chunker_from(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
    let result = simplify(&contours, 1).unwrap();

    assert_eq!(result.contours.contour_count(), 2);
    for i in 0..2 {
        assert_eq!(result.contours.contour(i).len(), 3);
    }
    assert_ne!(result.directions[0], result.directions[1]);
    assert_ne!(result.directions[0], Direction::Unknown);
    assert_ne!(result.directions[1], Direction::Unknown);
}

// Invariant 8: direction of a simple CCW polygon is ccw; reversing its
// vertex order produces cw.
#[test]
fn test_simplify_direction_follows_winding_order() {
    let ccw = chunker_from(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let ccw_result = simplify(&ccw, 2).unwrap();
    assert_eq!(ccw_result.directions[0], Direction::Ccw);

    let cw = chunker_from(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
    let cw_result = simplify(&cw, 2).unwrap();
    assert_eq!(cw_result.directions[0], Direction::Cw);
}

// Invariant 9 (indirectly, via public behavior): a point-in-polygon check
// against a contour whose bounding box doesn't reach it must read as
// outside, so two contours in disjoint bounding boxes are never nested.
#[test]
fn test_simplify_disjoint_squares_are_not_nested() {
    let mut contours: Chunker<Point<f32>> = Chunker::new();
    contours.push_contour(
        [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
            .iter()
            .map(|&(x, y)| Point::new(x, y)),
    );
    contours.push_contour(
        [(100.0, 100.0), (110.0, 100.0), (110.0, 110.0), (100.0, 110.0)]
            .iter()
            .map(|&(x, y)| Point::new(x, y)),
    );

    let result = simplify(&contours, 3).unwrap();
    assert_eq!(result.contours.contour_count(), 2);
    for i in 0..2 {
        assert_eq!(result.contours.contour(i).len(), 4);
    }
}

// A donut (ccw outer, cw inner hole) merges into a single bridged contour.
#[test]
fn test_simplify_donut_bridges_into_one_contour() {
    let mut contours: Chunker<Point<f32>> = Chunker::new();
    contours.push_contour(
        [(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0)]
            .iter()
            .map(|&(x, y)| Point::new(x, y)),
    );
    contours.push_contour(
        [(5.0, 5.0), (5.0, 15.0), (15.0, 15.0), (15.0, 5.0)]
            .iter()
            .map(|&(x, y)| Point::new(x, y)),
    );

    let result = simplify(&contours, 4).unwrap();
    assert_eq!(result.contours.contour_count(), 1);
    assert!(result.contours.contour(0).len() > 4);
}

#[test]
fn test_simplify_rejects_short_contour() {
    let mut contours: Chunker<Point<f32>> = Chunker::new();
    contours.push_contour([Point::new(0.0f32, 0.0), Point::new(1.0, 0.0)]);
    assert!(simplify(&contours, 1).is_err());
}
