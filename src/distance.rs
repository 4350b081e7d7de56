use crate::{NearestNeighborSearch, Palette, PartitionTree, Point3i, PointSet, PruningRule, SearchError, SearchResult};
use crate::search::brute_force_nearest;

// ====================
// PUBLIC STRUCTS
// ====================

/// Palette backed by a [`PartitionTree`], matching colors by Manhattan distance.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ManhattanPalette {
    tree: PartitionTree,
    rule: PruningRule
}

impl ManhattanPalette {
    pub fn new(colors: &PointSet) -> Self {
        ManhattanPalette::with_rule(colors, PruningRule::default())
    }

    pub fn with_rule(colors: &PointSet, rule: PruningRule) -> Self {
        ManhattanPalette::from_tree(PartitionTree::build(colors), rule)
    }

    pub fn from_tree(tree: PartitionTree, rule: PruningRule) -> Self {
        ManhattanPalette { tree, rule }
    }

    pub fn search(&self, color: Point3i) -> Result<SearchResult, SearchError> {
        NearestNeighborSearch::with_rule(&self.tree, self.rule).query(color)
    }

    pub fn tree(&self) -> &PartitionTree {
        &self.tree
    }

    pub fn rule(&self) -> PruningRule {
        self.rule
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl Palette for ManhattanPalette {
    fn nearest(&self, color: Point3i) -> Option<Point3i> {
        self.search(color).ok().map(|result| result.point())
    }
}

/// Palette that compares every color. Slow, but trivially correct.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ExhaustivePalette {
    colors: Vec<Point3i>
}

impl ExhaustivePalette {
    pub fn new(colors: &PointSet) -> Self {
        ExhaustivePalette {
            colors: colors.iter().copied().collect()
        }
    }
}

impl Palette for ExhaustivePalette {
    fn nearest(&self, color: Point3i) -> Option<Point3i> {
        brute_force_nearest(&self.colors, color).map(|(nearest, _)| nearest)
    }
}
