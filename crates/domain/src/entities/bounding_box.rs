//! Bounding box covering a set of coordinates

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Axis-aligned latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge (minimum latitude)
    pub south: f64,
    /// Western edge (minimum longitude)
    pub west: f64,
    /// Northern edge (maximum latitude)
    pub north: f64,
    /// Eastern edge (maximum longitude)
    pub east: f64,
}

impl BoundingBox {
    /// Minimal rectangle covering every coordinate, `None` if there are none
    #[must_use]
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        let first = coords.first()?;
        let init = Self {
            south: first.latitude(),
            west: first.longitude(),
            north: first.latitude(),
            east: first.longitude(),
        };
        Some(coords.iter().skip(1).fold(init, |b, c| Self {
            south: b.south.min(c.latitude()),
            west: b.west.min(c.longitude()),
            north: b.north.max(c.latitude()),
            east: b.east.max(c.longitude()),
        }))
    }

    /// Center of the rectangle
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Latitude extent in degrees
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude extent in degrees
    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// Grow each side by `ratio` of the corresponding span
    ///
    /// The result is clamped to valid latitude/longitude ranges.
    #[must_use]
    pub fn padded(&self, ratio: f64) -> Self {
        let lat_buffer = self.lat_span().abs() * ratio;
        let lon_buffer = self.lon_span().abs() * ratio;
        Self {
            south: (self.south - lat_buffer).max(-90.0),
            west: (self.west - lon_buffer).max(-180.0),
            north: (self.north + lat_buffer).min(90.0),
            east: (self.east + lon_buffer).min(180.0),
        }
    }

    /// Whether the coordinate lies inside or on the edge
    #[must_use]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.south..=self.north).contains(&coord.latitude())
            && (self.west..=self.east).contains(&coord.longitude())
    }
}
