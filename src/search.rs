use thiserror::Error;
use crate::{PartitionTree, Point3i};
use crate::point::{l1_distance, Distance};
use crate::tree::{next_axis, NodeIndex};

// ====================
// PUBLIC STRUCTS
// ====================

#[non_exhaustive]
#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchError {
    #[error("cannot search a tree built from zero points")]
    EmptyTree
}

/// Decides when the far side of a split can be skipped.
///
/// No point beyond the split plane can be closer in L1 than the distance to the
/// plane along the split axis, so [`PruningRule::AbsoluteDelta`] never misses the
/// true nearest point. [`PruningRule::SquaredDelta`] compares the squared axis
/// distance against the L1 bound instead, which is the comparison squared-Euclidean
/// trees use. It is kept for reproducing results made with that comparison; it can
/// return a point that is not the nearest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum PruningRule {
    #[default]
    AbsoluteDelta,
    SquaredDelta
}

impl PruningRule {
    pub fn prunes(&self, delta: i64, best_distance: Distance) -> bool {
        let magnitude = delta.unsigned_abs();
        match self {
            PruningRule::AbsoluteDelta => magnitude >= best_distance,

            // A saturated square is still at least as large as the real one
            PruningRule::SquaredDelta => magnitude.saturating_mul(magnitude) >= best_distance
        }
    }
}

/// Outcome of a single query. Every query creates its own.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SearchResult {
    point: Point3i,
    distance: Distance,
    visited: usize
}

impl SearchResult {
    pub fn point(&self) -> Point3i {
        self.point
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Number of tree nodes whose distance was computed.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

/// Nearest-neighbor queries against a shared, read-only tree.
///
/// The search only borrows the tree, and all state of a query lives on that
/// query's stack, so one tree can serve queries from any number of threads.
#[derive(Copy, Clone, Debug)]
pub struct NearestNeighborSearch<'a> {
    tree: &'a PartitionTree,
    rule: PruningRule
}

impl<'a> NearestNeighborSearch<'a> {
    pub fn new(tree: &'a PartitionTree) -> Self {
        NearestNeighborSearch::with_rule(tree, PruningRule::default())
    }

    pub fn with_rule(tree: &'a PartitionTree, rule: PruningRule) -> Self {
        NearestNeighborSearch { tree, rule }
    }

    pub fn rule(&self) -> PruningRule {
        self.rule
    }

    pub fn query(&self, target: Point3i) -> Result<SearchResult, SearchError> {
        let root = self.tree.root().ok_or(SearchError::EmptyTree)?;

        let mut state = SearchState {
            best: None,
            visited: 0
        };
        self.visit(root, target, 0, &mut state);

        // The root is always visited, so a best point exists
        let (point, distance) = state.best.ok_or(SearchError::EmptyTree)?;

        Ok(SearchResult {
            point,
            distance,
            visited: state.visited
        })
    }

    fn visit(&self, index: NodeIndex, target: Point3i, axis: usize, state: &mut SearchState) {
        let node = self.tree.node(index);
        let pivot = node.pivot();

        state.visited += 1;
        let distance = l1_distance(pivot, target);
        if state.best.map_or(true, |(_, best_distance)| distance < best_distance) {
            state.best = Some((pivot, distance));
        }

        if state.is_exact() {
            return;
        }

        let delta = pivot.channel(axis) as i64 - target.channel(axis) as i64;
        let (near, far) = if delta > 0 {
            (node.left(), node.right())
        } else {
            (node.right(), node.left())
        };

        let axis = next_axis(axis);
        if let Some(near) = near {
            self.visit(near, target, axis, state);
        }

        // An exact match below ends the whole search, not just this subtree
        if state.is_exact() {
            return;
        }

        if let Some(far) = far {
            if !self.rule.prunes(delta, state.best_distance()) {
                self.visit(far, target, axis, state);
            }
        }
    }
}

// ====================
// PUBLIC FUNCTIONS
// ====================

/// Queries `tree` with the default [`PruningRule`].
pub fn query(tree: &PartitionTree, target: Point3i) -> Result<SearchResult, SearchError> {
    NearestNeighborSearch::new(tree).query(target)
}

/// Scans every point. Ties go to the earliest point in iteration order.
pub fn brute_force_nearest<'a>(points: impl IntoIterator<Item=&'a Point3i>, target: Point3i) -> Option<(Point3i, Distance)> {
    points.into_iter()
        .fold(None, |best: Option<(Point3i, Distance)>, &candidate| {
            let distance = l1_distance(candidate, target);
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((candidate, distance))
            }
        })
}

// ====================
// PRIVATE STRUCTS
// ====================

struct SearchState {
    best: Option<(Point3i, Distance)>,
    visited: usize
}

impl SearchState {
    fn best_distance(&self) -> Distance {
        self.best.map_or(Distance::MAX, |(_, distance)| distance)
    }

    fn is_exact(&self) -> bool {
        self.best_distance() == 0
    }
}
