use nearthree::{Error, NeighborQuery, Neighborhood};

fn sample_points() -> Vec<[f64; 3]> {
    vec![
        [0.0, 0.0, 0.0], // 0
        [1.0, 0.0, 0.0], // 1
        [0.0, 1.0, 0.0], // 2
        [5.0, 5.0, 5.0], // 3
    ]
}

#[test]
fn test_knn_basic() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(2);
    let result = knn.collect([0.0, 0.0, 0.0]);

    assert_eq!(result.len(), 2);
    // Handle 0 is at distance 0 and must come first.
    assert_eq!(result[0], 0);
    // Handles 1 and 2 are both at distance 1; ties resolve to the lower handle.
    assert_eq!(result[1], 1);
}

#[test]
fn test_knn_sorted_by_distance() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(4);
    let result = knn.collect([5.0, 5.0, 5.0]);

    assert_eq!(result[0], 3);
    let dist = |h: usize| {
        let p = points[h];
        (p[0] - 5.0).powi(2) + (p[1] - 5.0).powi(2) + (p[2] - 5.0).powi(2)
    };
    for pair in result.windows(2) {
        assert!(dist(pair[0]) <= dist(pair[1]));
    }
}

#[test]
fn test_knn_larger_than_set() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(100);
    let result = knn.collect([0.0, 0.0, 0.0]);

    assert_eq!(result, vec![0, 1, 2, 3]);
}

#[test]
fn test_knn_extreme_k() {
    // Any k >= n is valid and yields all handles, up to usize::MAX.
    let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(usize::MAX);
    assert_eq!(knn.collect([0.0, 0.0, 0.0]), vec![0, 1]);

    let knn = neighborhood.k_neighbor_query(1 << 60);
    assert_eq!(knn.collect([2.0, 0.0, 0.0]), vec![1, 0]);
}

#[test]
fn test_knn_zero_k() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(0);
    assert!(knn.collect([0.0, 0.0, 0.0]).is_empty());
}

#[test]
fn test_knn_tie_break_ascending_handle() {
    // Four corners of a square, all at distance sqrt(2) from the center.
    let points = vec![
        [1.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0],
        [-1.0, -1.0, 0.0],
        [1.0, -1.0, 0.0],
    ];
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(3);
    assert_eq!(knn.collect([0.0, 0.0, 0.0]), vec![0, 1, 2]);
}

#[test]
fn test_range_basic() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let range = neighborhood.range_neighbor_query(1.0).unwrap();
    let mut result = range.collect([0.0, 0.0, 0.0]);
    result.sort_unstable();

    assert_eq!(result, vec![0, 1, 2]);
}

#[test]
fn test_range_zero_radius_exact_match_only() {
    let points = vec![
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [1e-100, 0.0, 0.0],
        [1.0, 1.0, 1.0],
    ];
    let neighborhood = Neighborhood::new(points.as_slice());

    let range = neighborhood.range_neighbor_query(0.0).unwrap();
    let mut result = range.collect([0.0, 0.0, 0.0]);
    result.sort_unstable();

    assert_eq!(result, vec![0, 1]);
}

#[test]
fn test_range_negative_radius_is_error() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    match neighborhood.range_neighbor_query(-1.0) {
        Err(Error::InvalidRadius(r)) => assert_eq!(r, -1.0),
        other => panic!("expected InvalidRadius, got {:?}", other.map(|_| ())),
    }

    let mut output = Vec::new();
    assert!(neighborhood
        .range_neighbors([0.0, 0.0, 0.0], -0.5, &mut output)
        .is_err());
    assert!(output.is_empty());
}

#[test]
fn test_empty_point_set() {
    let points: Vec<[f64; 3]> = Vec::new();
    let neighborhood = Neighborhood::new(points.as_slice());

    assert!(neighborhood.is_empty());

    let knn = neighborhood.k_neighbor_query(5);
    assert!(knn.collect([0.0, 0.0, 0.0]).is_empty());

    let range = neighborhood.range_neighbor_query(10.0).unwrap();
    assert!(range.collect([0.0, 0.0, 0.0]).is_empty());
}

#[test]
fn test_duplicate_points_do_not_degenerate() {
    // 1000 coincident points must still build and answer queries.
    let points = vec![[2.0, 2.0, 2.0]; 1000];
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(5);
    let result = knn.collect([2.0, 2.0, 2.0]);
    assert_eq!(result, vec![0, 1, 2, 3, 4]);

    let range = neighborhood.range_neighbor_query(0.0).unwrap();
    assert_eq!(range.collect([2.0, 2.0, 2.0]).len(), 1000);
}

#[test]
fn test_flat_points_accessor() {
    use nearthree::FlatPoints;

    let flat = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0];
    let accessor = FlatPoints(&flat);
    let neighborhood = Neighborhood::new(&accessor);

    let knn = neighborhood.k_neighbor_query(2);
    assert_eq!(knn.collect([0.0, 0.0, 0.0]), vec![0, 1]);

    let range = neighborhood.range_neighbor_query(1.0).unwrap();
    let mut result = range.collect([0.0, 0.0, 0.0]);
    result.sort_unstable();
    assert_eq!(result, vec![0, 1, 2]);
}

#[test]
fn test_functors_are_copy_and_shareable() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(2);
    let knn_copy = knn;
    assert_eq!(knn.collect([0.0, 0.0, 0.0]), knn_copy.collect([0.0, 0.0, 0.0]));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(move || {
                let result = knn.collect([0.0, 0.0, 0.0]);
                assert_eq!(result, vec![0, 1]);
            });
        }
    });
}

#[test]
fn test_neighbors_of_indexed() {
    let points = sample_points();
    let neighborhood = Neighborhood::new(points.as_slice());

    let knn = neighborhood.k_neighbor_query(1);
    let all = neighborhood.neighbors_of_indexed(&knn);

    assert_eq!(all.len(), 4);
    for (i, neighbors) in all.iter().enumerate() {
        // The nearest neighbor of an indexed point is the point itself.
        assert_eq!(neighbors, &vec![neighborhood.indexed_handles()[i]]);
    }
}
