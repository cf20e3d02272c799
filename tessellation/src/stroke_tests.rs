use planargon_geom::Point;

use crate::geometry_builder::{BuffersBuilder, VertexBuffers};
use crate::stroke::{tessellate_stroke, Gravity};

fn run(
    path: &[Point<f32>],
    width: f32,
    gravity: Gravity,
    closed: bool,
) -> VertexBuffers<Point<f32>> {
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    tessellate_stroke(path, width, gravity, closed, 1e-4, true, &mut builder).unwrap();
    buffers
}

#[test]
fn test_stroke_open_two_point_path_vertex_and_index_counts() {
    let path = [Point::new(0.0f32, 0.0), Point::new(10.0, 0.0)];
    let buffers = run(&path, 10.0, Gravity::Center, false);

    // One segment, two triangles per segment, 6 indices per triangle pair.
    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
    assert_eq!(buffers.boundary.len(), 2);
}

// S6-style scenario: a straight horizontal segment with center gravity and
// square caps produces a rectangle extended by half the width at both ends.
#[test]
fn test_stroke_center_gravity_square_caps() {
    let path = [Point::new(0.0f32, 0.0), Point::new(10.0, 0.0)];
    let buffers = run(&path, 10.0, Gravity::Center, false);

    let expected = [
        Point::new(-5.0f32, -5.0),
        Point::new(-5.0, 5.0),
        Point::new(15.0, -5.0),
        Point::new(15.0, 5.0),
    ];
    for p in &expected {
        assert!(
            buffers.vertices.iter().any(|&v| (v.x - p.x).abs() < 1e-4 && (v.y - p.y).abs() < 1e-4),
            "expected a stroke vertex near {:?}, got {:?}",
            p,
            buffers.vertices
        );
    }
}

// Inward gravity offsets the full width to the negative side only, leaving
// the positive side exactly on the original centerline (away from caps).
#[test]
fn test_stroke_inward_gravity_keeps_positive_side_on_centerline() {
    let path = [
        Point::new(0.0f32, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
    ];
    let buffers = run(&path, 4.0, Gravity::Inward, false);

    // vertex layout: negative[0..n], positive[0..n]; index 4 is positive[1],
    // the interior vertex, unaffected by cap extension.
    let positive_interior = buffers.vertices[4];
    assert!((positive_interior.x - 10.0).abs() < 1e-4);
    assert!((positive_interior.y - 0.0).abs() < 1e-4);

    let negative_interior = buffers.vertices[1];
    assert!((negative_interior.x - 10.0).abs() < 1e-4);
    assert!((negative_interior.y - (-4.0)).abs() < 1e-4);
}

#[test]
fn test_stroke_closed_loop_has_one_segment_per_vertex() {
    let path = [
        Point::new(0.0f32, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ];
    let buffers = run(&path, 2.0, Gravity::Center, true);

    assert_eq!(buffers.vertices.len(), 8);
    // 4 segments (wrapping), 2 triangles each, 3 indices per triangle.
    assert_eq!(buffers.indices.len(), 4 * 2 * 3);
}

#[test]
fn test_stroke_rejects_too_short_path() {
    let path = [Point::new(0.0f32, 0.0)];
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    assert!(tessellate_stroke(&path, 1.0, Gravity::Center, false, 1e-4, false, &mut builder).is_err());
}
