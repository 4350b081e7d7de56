use palette_recolor_rs::{NearestNeighborSearch, NodeIndex, PartitionTree, Point3i, PointSet, PruningRule, SearchError};
use palette_recolor_rs::search::brute_force_nearest;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut StdRng, count: usize, max: i32) -> Vec<Point3i> {
    (0..count)
        .map(|_| Point3i::new(rng.gen_range(0..=max), rng.gen_range(0..=max), rng.gen_range(0..=max)))
        .collect()
}

fn collect_subtree(tree: &PartitionTree, index: Option<NodeIndex>, points: &mut Vec<Point3i>) {
    if let Some(index) = index {
        let node = tree.node(index);
        points.push(node.pivot());
        collect_subtree(tree, node.left(), points);
        collect_subtree(tree, node.right(), points);
    }
}

#[test]
fn test_dedup_counts_distinct_values() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut points = random_points(&mut rng, 2000, 15);
    let set = PointSet::build(points.clone());

    points.sort();
    points.dedup();

    assert_eq!(points.len(), set.len());
    assert_eq!(points, set.into_vec());
}

#[test]
fn test_partition_invariant_on_random_sets() {
    let mut rng = StdRng::seed_from_u64(11);

    for count in [1, 2, 3, 10, 100, 1000] {
        let set = PointSet::build(random_points(&mut rng, count, 255));
        let tree = PartitionTree::build(&set);

        for node in tree.iter() {
            let axis = node.axis();
            let split = node.pivot().channel(axis);

            let mut left = Vec::new();
            collect_subtree(&tree, node.left(), &mut left);
            assert!(left.iter().all(|point| point.channel(axis) <= split));

            let mut right = Vec::new();
            collect_subtree(&tree, node.right(), &mut right);
            assert!(right.iter().all(|point| point.channel(axis) >= split));
        }
    }
}

#[test]
fn test_size_and_height() {
    let mut rng = StdRng::seed_from_u64(13);

    for count in [0, 1, 2, 7, 8, 100, 1023, 1024, 5000] {
        let set = PointSet::build(random_points(&mut rng, count, 1000));
        let n = set.len();
        let tree = PartitionTree::build(&set);

        let mut owned = Vec::new();
        collect_subtree(&tree, tree.root(), &mut owned);
        owned.sort();

        assert_eq!(n, tree.len());
        assert_eq!(set.into_vec(), owned);

        // ceil(log2(n + 1)) is the bit length of n
        let bound = (usize::BITS - n.leading_zeros()) as usize;
        assert!(tree.height() <= bound, "height {} for {} points", tree.height(), n);
    }
}

#[test]
fn test_absolute_pruning_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(17);

    for count in [1, 2, 5, 16, 27, 64, 128, 256, 1000] {
        let set = PointSet::build(random_points(&mut rng, count, 255));
        let points = set.clone().into_vec();
        let tree = PartitionTree::build(&set);
        let search = NearestNeighborSearch::with_rule(&tree, PruningRule::AbsoluteDelta);

        for target in random_points(&mut rng, 500, 255) {
            let (_, expected) = brute_force_nearest(&points, target).unwrap();
            let result = search.query(target).unwrap();

            assert_eq!(expected, result.distance(), "target {} with {} points", target, points.len());
            assert_eq!(result.distance(), result.point().l1_distance(target));
            assert!(set.contains(&result.point()));
        }
    }
}

#[test]
fn test_absolute_pruning_with_out_of_range_targets() {
    let mut rng = StdRng::seed_from_u64(19);
    let set = PointSet::build(random_points(&mut rng, 200, 255));
    let points = set.clone().into_vec();
    let tree = PartitionTree::build(&set);
    let search = NearestNeighborSearch::new(&tree);

    for _ in 0..500 {
        let target = Point3i::new(rng.gen_range(-1000..1000), rng.gen_range(-1000..1000), rng.gen_range(-1000..1000));
        let (_, expected) = brute_force_nearest(&points, target).unwrap();
        assert_eq!(expected, search.query(target).unwrap().distance());
    }
}

#[test]
fn test_squared_pruning_never_beats_brute_force() {
    let mut rng = StdRng::seed_from_u64(23);
    let set = PointSet::build(random_points(&mut rng, 256, 255));
    let points = set.clone().into_vec();
    let tree = PartitionTree::build(&set);
    let search = NearestNeighborSearch::with_rule(&tree, PruningRule::SquaredDelta);

    for target in random_points(&mut rng, 1000, 255) {
        let (_, expected) = brute_force_nearest(&points, target).unwrap();
        let result = search.query(target).unwrap();

        assert!(result.distance() >= expected);
        assert!(result.visited() <= tree.len());
    }
}

#[test]
fn test_queries_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(29);
    let set = PointSet::build(random_points(&mut rng, 500, 255));
    let tree = PartitionTree::build(&set);
    let rebuilt = PartitionTree::build(&set);

    for rule in [PruningRule::AbsoluteDelta, PruningRule::SquaredDelta] {
        for target in random_points(&mut rng, 100, 255) {
            let first = NearestNeighborSearch::with_rule(&tree, rule).query(target).unwrap();
            let second = NearestNeighborSearch::with_rule(&tree, rule).query(target).unwrap();
            let other_tree = NearestNeighborSearch::with_rule(&rebuilt, rule).query(target).unwrap();

            assert_eq!(first, second);
            assert_eq!(first, other_tree);
        }
    }
}

#[test]
fn test_concurrent_queries_share_one_tree() {
    let mut rng = StdRng::seed_from_u64(31);
    let set = PointSet::build(random_points(&mut rng, 300, 255));
    let tree = PartitionTree::build(&set);
    let targets = random_points(&mut rng, 400, 255);

    let expected: Vec<_> = targets.iter()
        .map(|&target| NearestNeighborSearch::new(&tree).query(target).unwrap())
        .collect();

    std::thread::scope(|scope| {
        for chunk in 0..4 {
            let tree = &tree;
            let targets = &targets;
            let expected = &expected;
            scope.spawn(move || {
                for index in (chunk..targets.len()).step_by(4) {
                    let result = NearestNeighborSearch::new(tree).query(targets[index]).unwrap();
                    assert_eq!(expected[index], result);
                }
            });
        }
    });
}

#[test]
fn test_empty_tree_is_not_found() {
    let tree = PartitionTree::build(&PointSet::default());

    for rule in [PruningRule::AbsoluteDelta, PruningRule::SquaredDelta] {
        let result = NearestNeighborSearch::with_rule(&tree, rule).query(Point3i::new(1, 2, 3));
        assert_eq!(Err(SearchError::EmptyTree), result);
    }
}

#[test]
fn test_nearest_of_three_palette_colors() {
    let set = PointSet::build([
        Point3i::new(0, 0, 0),
        Point3i::new(255, 255, 255),
        Point3i::new(10, 10, 10)
    ]);
    let tree = PartitionTree::build(&set);
    let target = Point3i::new(12, 11, 9);

    let result = NearestNeighborSearch::new(&tree).query(target).unwrap();

    assert_eq!(Point3i::new(10, 10, 10), result.point());
    assert_eq!(4, result.distance());
    assert_eq!(32, Point3i::new(0, 0, 0).l1_distance(target));
    assert!(Point3i::new(255, 255, 255).l1_distance(target) >= 700);
}

#[test]
fn test_exact_match_stops_before_full_traversal() {
    let mut rng = StdRng::seed_from_u64(37);
    let mut points = random_points(&mut rng, 255, 255);
    points.push(Point3i::new(50, 60, 70));
    let set = PointSet::build(points);
    let tree = PartitionTree::build(&set);

    for rule in [PruningRule::AbsoluteDelta, PruningRule::SquaredDelta] {
        let result = NearestNeighborSearch::with_rule(&tree, rule).query(Point3i::new(50, 60, 70)).unwrap();

        assert_eq!(Point3i::new(50, 60, 70), result.point());
        assert_eq!(0, result.distance());
        assert!(result.visited() < tree.len());
    }
}
