use planargon_geom::Point;

use crate::ear_clip::triangulate_ear_clip;
use crate::geometry_builder::{BuffersBuilder, VertexBuffers};

fn square() -> Vec<Point<f32>> {
    [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect()
}

fn arrow() -> Vec<Point<f32>> {
    // A concave "arrowhead": notch at (5, 5) pointing into the polygon.
    [(0.0, 0.0), (10.0, 0.0), (5.0, 5.0), (10.0, 10.0), (0.0, 10.0)]
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect()
}

#[test]
fn test_ear_clip_square() {
    let polygon = square();
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    triangulate_ear_clip(&polygon, false, &mut builder).unwrap();

    assert_eq!(buffers.indices.len(), 6);
    assert_eq!(buffers.vertices.len(), 4);
}

#[test]
fn test_ear_clip_arrow_produces_three_triangles() {
    let polygon = arrow();
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    triangulate_ear_clip(&polygon, true, &mut builder).unwrap();

    assert_eq!(buffers.indices.len(), 9);
    assert_eq!(buffers.boundary.len(), 3);
}

#[test]
fn test_ear_clip_arrow_no_triangle_contains_another_vertex() {
    let polygon = arrow();
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    triangulate_ear_clip(&polygon, false, &mut builder).unwrap();

    let n = polygon.len();
    for tri in buffers.indices.chunks(3) {
        let (a, b, c) = (
            polygon[tri[0] as usize],
            polygon[tri[1] as usize],
            polygon[tri[2] as usize],
        );
        for i in 0..n {
            if i == tri[0] as usize || i == tri[1] as usize || i == tri[2] as usize {
                continue;
            }
            assert!(!point_strictly_in_triangle(polygon[i], a, b, c));
        }
    }
}

fn point_strictly_in_triangle(p: Point<f32>, a: Point<f32>, b: Point<f32>, c: Point<f32>) -> bool {
    use planargon_geom::{classify_point};
    let s1 = classify_point(p, a, b);
    let s2 = classify_point(p, b, c);
    let s3 = classify_point(p, c, a);
    (s1 > 0 && s2 > 0 && s3 > 0) || (s1 < 0 && s2 < 0 && s3 < 0)
}

#[test]
fn test_ear_clip_rejects_short_contour() {
    let polygon = [Point::<f32>::new(0.0, 0.0), Point::new(1.0, 0.0)];
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    assert!(triangulate_ear_clip(&polygon, false, &mut builder).is_err());
}

#[test]
fn test_ear_clip_degenerate_collinear_emits_nothing() {
    let polygon = [
        Point::<f32>::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(3.0, 0.0),
    ];
    let mut buffers: VertexBuffers<Point<f32>> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers);
    triangulate_ear_clip(&polygon, false, &mut builder).unwrap();
    assert!(buffers.indices.is_empty());
}
