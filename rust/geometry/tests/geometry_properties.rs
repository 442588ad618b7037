// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end checks across the vector, contour, mesh and UV modules.

use approx::assert_relative_eq;
use uvlab_geometry::vector::{
    array_equals, centroid, contains, equals, flip_horizontally_around_point, polygon_area,
    rotate_around_point, scale_around_point,
};
use uvlab_geometry::{
    board_mesh, box_corners, flip_face_normals, offset_contour, planar_geometry_from_points,
    planar_project_uv, points_on_circle, rotate_uv_incremental, Point3, Vector3,
};

fn hexagon() -> Vec<Point3<f64>> {
    let mut points = points_on_circle(3.0, 3.0, 6, 0.0, std::f64::consts::TAU, true).unwrap();
    points.pop();
    points
}

#[test]
fn convex_polygon_containment() {
    let polygon = hexagon();
    for inside in [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.5, 0.5, 0.0),
        Point3::new(-1.0, -1.0, 0.0),
    ] {
        assert!(contains(&polygon, &inside), "{inside:?} should be inside");
    }
    for outside in [
        Point3::new(3.5, 0.0, 0.0),
        Point3::new(0.0, 3.0, 0.0),
        Point3::new(-10.0, 2.0, 0.0),
    ] {
        assert!(!contains(&polygon, &outside), "{outside:?} should be outside");
    }
}

#[test]
fn full_rotation_is_identity() {
    let original = hexagon();
    let mut points = original.clone();
    rotate_around_point(360.0, &mut points, &Point3::new(1.0, 2.0, 0.0), &Vector3::z()).unwrap();
    assert!(array_equals(&points, &original));
}

#[test]
fn unit_scale_is_identity() {
    let original = hexagon();
    let mut points = original.clone();
    scale_around_point(&Vector3::new(1.0, 1.0, 1.0), &mut points, &Point3::new(5.0, 5.0, 5.0))
        .unwrap();
    assert!(array_equals(&points, &original));
}

#[test]
fn horizontal_flip_is_an_involution() {
    let original = hexagon();
    let mut points = original.clone();
    let pivot = Point3::new(2.0, 0.0, 0.0);
    flip_horizontally_around_point(&mut points, &pivot).unwrap();
    assert!(!array_equals(&points, &original));
    flip_horizontally_around_point(&mut points, &pivot).unwrap();
    assert!(array_equals(&points, &original));
}

#[test]
fn unit_square_centroid() {
    let square = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    assert_relative_eq!(centroid(&square).unwrap(), Point3::new(0.5, 0.5, 0.0));
}

#[test]
fn offset_room_outline() {
    let room = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 10.0, 0.0),
        Point3::new(10.0, 10.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
    ];
    let wall = offset_contour(1.0, &room).unwrap();

    assert!(equals(wall.first().unwrap(), wall.last().unwrap()));
    assert!(polygon_area(&wall) > 100.0);
    assert!(equals(&centroid(&wall).unwrap(), &centroid(&room).unwrap()));
    for (corner, offset) in room.iter().zip(&wall) {
        assert_relative_eq!((offset - corner).norm(), std::f64::consts::SQRT_2, epsilon = 1e-9);
    }
}

#[test]
fn board_from_unit_cube() {
    let mesh = board_mesh(&box_corners(Point3::origin(), Point3::new(1.0, 1.0, 1.0))).unwrap();
    assert!(mesh.vertex_count() <= 24);

    let (min, max) = mesh.bounds();
    assert_relative_eq!(min, Point3::new(0.0f32, 0.0, 0.0));
    assert_relative_eq!(max, Point3::new(1.0f32, 1.0, 1.0));
}

#[test]
fn flipping_twice_restores_board() {
    let mut mesh = board_mesh(&box_corners(
        Point3::new(-1.0, -1.0, 0.0),
        Point3::new(1.0, 3.0, 0.5),
    ))
    .unwrap();
    let indices = mesh.indices.clone();
    let uvs = mesh.uv_sets.clone();

    flip_face_normals(&mut mesh).unwrap();
    flip_face_normals(&mut mesh).unwrap();

    assert_eq!(mesh.indices, indices);
    assert_eq!(mesh.uv_sets, uvs);
}

#[test]
fn planar_disc_unwraps_into_unit_square() {
    let mut disc = planar_geometry_from_points(&hexagon()).unwrap();
    planar_project_uv(&mut disc).unwrap();
    rotate_uv_incremental(0.0, &mut disc).unwrap();

    let (lo, hi) = disc.uv_sets[0]
        .iter()
        .flatten()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    assert_relative_eq!(lo, 0.0);
    assert_relative_eq!(hi, 1.0);
}
