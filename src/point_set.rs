use std::collections::btree_set;
use std::collections::BTreeSet;
use crate::Point3i;

// ====================
// PUBLIC STRUCTS
// ====================

/// Distinct points in ascending lexicographic order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PointSet {
    points: BTreeSet<Point3i>
}

impl PointSet {
    pub fn build(points: impl IntoIterator<Item=Point3i>) -> Self {
        PointSet { points: points.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: &Point3i) -> bool {
        self.points.contains(point)
    }

    pub fn iter(&self) -> impl Iterator<Item=&Point3i> + '_ {
        self.points.iter()
    }

    pub fn into_vec(self) -> Vec<Point3i> {
        self.points.into_iter().collect()
    }
}

impl FromIterator<Point3i> for PointSet {
    fn from_iter<T: IntoIterator<Item=Point3i>>(iter: T) -> Self {
        PointSet::build(iter)
    }
}

impl Extend<Point3i> for PointSet {
    fn extend<T: IntoIterator<Item=Point3i>>(&mut self, iter: T) {
        self.points.extend(iter);
    }
}

impl IntoIterator for PointSet {
    type Item = Point3i;
    type IntoIter = btree_set::IntoIter<Point3i>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3i;
    type IntoIter = btree_set::Iter<'a, Point3i>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
