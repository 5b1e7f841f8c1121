// This file contains documented examples of how to set up and run the
// spatial and spatio-temporal trees.

use quadtree::{
    destination, find_nearest, haversine, Ellipse, GreatCircle, OctTree, QuadTree, Record,
    Rectangle, SpaceTimeRecord, SpaceTimeRectangle,
};

#[test]
fn quadtree_example() {
    // A QuadTree is built over a boundary rectangle, a per-node capacity,
    // and an optional maximum depth (None = unbounded).
    let boundary = Rectangle::from_centre(10.0, 4.0, 20.0, 8.0).unwrap();
    let mut qt: QuadTree = QuadTree::new(boundary, 3, None);

    // Records carry lon/lat, validated on construction - a latitude outside
    // [-90, 90] is an Err, never a panic.
    let records = vec![
        Record::new(10.0, 5.0).unwrap(),
        Record::new(19.0, 1.0).unwrap(),
        Record::new(0.0, 0.0).unwrap(),
        Record::new(-2.0, -9.2).unwrap(), // outside the boundary
        Record::new(12.8, 2.1).unwrap(),
    ];
    let mut inserted = 0;
    for r in records {
        if qt.insert(r) {
            inserted += 1;
        }
    }
    // The out-of-bounds record was rejected; everything else went in.
    assert_eq!(inserted, 4);

    // The fifth successful insert overflowed capacity 3, so the node
    // divided - the three original points stayed put, and only the new
    // record descended into a child.
    assert!(qt.is_divided());
    assert_eq!(qt.points().len(), 3);

    // A rectangle query returns every stored record the rectangle contains.
    let query = Rectangle::from_centre(12.5, 2.5, 1.0, 1.0).unwrap();
    let found = qt.query(&query);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].lon, 12.8);

    // An ellipse query works the same way, over a two-focus locus instead
    // of a box.
    let ellipse = Ellipse::new(12.5, 2.5, 2.0, 1.0, 0.0).unwrap();
    assert!(!ellipse.contains(found[0])); // outside this particular ellipse

    // nearby_points is a plain radius search in km, via haversine distance.
    let centre = Record::new(12.8, 2.1).unwrap();
    assert_eq!(qt.nearby_points(&centre, 1.0).len(), 1);
}

#[test]
fn quadtree_is_correct_across_the_antimeridian() {
    // Rectangles (and the trees built on them) stay correct when a region
    // straddles the discontinuity at +/-180 degrees longitude.
    let world = Rectangle::new(-180.0, 180.0, -90.0, 90.0).unwrap();
    let mut qt: QuadTree = QuadTree::new(world, 3, None);

    // One point just east of the antimeridian, one just west of it.
    qt.insert(Record::new(175.0, 43.0).unwrap());
    qt.insert(Record::new(-172.0, 49.0).unwrap());
    // A spread of decoys far from the antimeridian.
    for i in 0..50 {
        qt.insert(Record::new(-40.0 + i as f64 * 0.1, -40.0).unwrap());
    }

    // This query box wraps the antimeridian itself (west=140, east=-160).
    let query = Rectangle::new(140.0, -160.0, 40.0, 50.0).unwrap();
    assert_eq!(query.lon_range(), 60.0);
    assert_eq!(qt.query(&query).len(), 2);
}

#[test]
fn octtree_example() {
    // OctTree adds a time axis on top of the QuadTree idea: every boundary
    // and record carries a `Temporal` datetime in addition to lon/lat. Any
    // `Temporal` impl works - here we use plain `i64` pentad-style values.
    let boundary = SpaceTimeRectangle::new(10.0, 4.0, 20.0, 8.0, 0_i64, 100_i64).unwrap();
    let mut oct: OctTree<i64> = OctTree::new(boundary, 2, None);

    oct.insert(SpaceTimeRecord::new(10.0, 5.0, 10_i64).unwrap());
    oct.insert(SpaceTimeRecord::new(19.0, 1.0, 90_i64).unwrap());
    oct.insert(SpaceTimeRecord::new(12.8, 2.1, 50_i64).unwrap()); // forces an 8-way divide

    assert!(oct.is_divided());

    // nearby_points filters on both distance and time distance at once.
    let centre = SpaceTimeRecord::new(12.8, 2.1, 52_i64).unwrap();
    let found = oct.nearby_points(&centre, 5.0, 5, false);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].datetime, 50);
}

#[test]
fn nearest_value_and_great_circle_example() {
    // find_nearest bisects into a sorted slice of scalars (e.g. Julian days,
    // pentad numbers) to locate the nearest match for each query value.
    let pentads = [1.0, 6.0, 11.0, 16.0, 21.0];
    assert_eq!(find_nearest(&pentads, &[9.0, 100.0]), vec![2, 4]);

    // GreatCircle is a lower-level analytical object: the great circle
    // through two surface points, usable for perpendicular-distance and
    // intersection calculations.
    let equator = GreatCircle::new(-5.0, 0.0, 5.0, 0.0);
    let meridian = GreatCircle::new(0.0, -5.0, 0.0, 5.0);
    let (lon, lat) = equator.intersection(&meridian);
    assert!(lon.abs() < 1e-6 && lat.abs() < 1e-6);
    assert!((equator.intersection_angle(&meridian) - 90.0).abs() < 1e-6);

    // destination/haversine are the free-function building blocks underneath
    // every shape and tree in this crate.
    let (lon2, lat2) = destination(10.0, 20.0, 45.0, 100.0);
    assert!((haversine(10.0, 20.0, lon2, lat2) - 100.0).abs() < 1e-6);
}
