//! Ordered coordinate path decoded from an encoded polyline

use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::value_objects::Coordinate;

/// An ordered path; empty means "no route path to draw"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateSequence(Vec<Coordinate>);

impl CoordinateSequence {
    /// An empty path
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The points in order
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    /// Minimal bounding box, `None` for an empty path
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates(&self.0)
    }
}

impl From<Vec<Coordinate>> for CoordinateSequence {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

impl FromIterator<Coordinate> for CoordinateSequence {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CoordinateSequence {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
