use crate::{Point3i, PointSet};
use crate::point::CHANNELS;

// ====================
// PUBLIC STRUCTS
// ====================

/// Position of a node in the tree's arena.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TreeNode {
    pivot: Point3i,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
    axis: u8
}

impl TreeNode {
    pub fn pivot(&self) -> Point3i {
        self.pivot
    }

    /// Child whose points are at or below the pivot on this node's axis.
    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    /// Child whose points are at or above the pivot on this node's axis.
    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }

    pub fn axis(&self) -> usize {
        self.axis as usize
    }
}

/// Balanced 3D tree over a [`PointSet`], built once and never modified.
///
/// Nodes live in one arena. The node for the working range `[begin, end)` is
/// stored at `begin + (end - begin) / 2`, so the arena is simply the working
/// sequence after it has been partitioned in place.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PartitionTree {
    nodes: Vec<TreeNode>,
    root: Option<NodeIndex>
}

impl PartitionTree {
    pub fn build(points: &PointSet) -> Self {
        let mut working: Vec<Point3i> = points.iter().copied().collect();
        partition(&mut working, 0);
        PartitionTree::link(working)
    }

    /// Same tree shape as [`PartitionTree::build`], but the two halves of every
    /// large range are partitioned on separate threads once their median is in place.
    #[cfg(feature = "parallel")]
    pub fn build_parallel(points: &PointSet) -> Self {
        let mut working: Vec<Point3i> = points.iter().copied().collect();
        partition_parallel(&mut working, 0);
        PartitionTree::link(working)
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path. Zero for an empty tree.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// All nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item=&TreeNode> + '_ {
        self.nodes.iter()
    }

    /// Pivots of the subtree rooted at `index`, including `index` itself.
    pub fn subtree_points(&self, index: NodeIndex) -> Vec<Point3i> {
        let mut points = Vec::new();
        let mut to_visit = vec![index];

        while let Some(current) = to_visit.pop() {
            let node = self.node(current);
            points.push(node.pivot);
            to_visit.extend(node.left);
            to_visit.extend(node.right);
        }

        points
    }

    fn subtree_height(&self, index: Option<NodeIndex>) -> usize {
        match index {
            None => 0,
            Some(index) => {
                let node = self.node(index);
                1 + self.subtree_height(node.left).max(self.subtree_height(node.right))
            }
        }
    }

    fn link(partitioned: Vec<Point3i>) -> Self {
        let len = partitioned.len();
        let mut nodes: Vec<TreeNode> = partitioned.into_iter()
            .map(|pivot| TreeNode {
                pivot,
                left: None,
                right: None,
                axis: 0
            })
            .collect();

        let root = link_range(&mut nodes, 0, len, 0);

        PartitionTree { nodes, root }
    }
}

// ====================
// PUBLIC FUNCTIONS
// ====================

pub fn next_axis(axis: usize) -> usize {
    (axis + 1) % CHANNELS
}

// ====================
// PRIVATE CONSTANTS
// ====================

// Below this many points, spawning tasks costs more than it saves
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 4096;

// ====================
// PRIVATE FUNCTIONS
// ====================

fn partition(points: &mut [Point3i], axis: usize) {
    if points.is_empty() {
        return;
    }

    let mid = points.len() / 2;
    let (left, _, right) = points.select_nth_unstable_by_key(mid, |point| point.channel(axis));

    let axis = next_axis(axis);
    partition(left, axis);
    partition(right, axis);
}

#[cfg(feature = "parallel")]
fn partition_parallel(points: &mut [Point3i], axis: usize) {
    if points.len() <= PARALLEL_THRESHOLD {
        partition(points, axis);
        return;
    }

    /* The selection step rearranges the whole range, so it has to finish before the halves
       are handed out. Afterwards the halves are disjoint slices and cannot race. */
    let mid = points.len() / 2;
    let (left, _, right) = points.select_nth_unstable_by_key(mid, |point| point.channel(axis));

    let axis = next_axis(axis);
    rayon::join(
        || partition_parallel(left, axis),
        || partition_parallel(right, axis)
    );
}

fn link_range(nodes: &mut [TreeNode], begin: usize, end: usize, axis: usize) -> Option<NodeIndex> {
    if end <= begin {
        return None;
    }

    let mid = begin + (end - begin) / 2;
    let next = next_axis(axis);
    let left = link_range(nodes, begin, mid, next);
    let right = link_range(nodes, mid + 1, end, next);

    let node = &mut nodes[mid];
    node.left = left;
    node.right = right;
    node.axis = axis as u8;

    Some(NodeIndex(mid))
}
