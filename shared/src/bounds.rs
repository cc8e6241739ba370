use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Fixed area of interest in the Amazon basin. Clicks and manual entry are
/// both constrained to this box.
pub const AREA_OF_INTEREST: BoundingBox = BoundingBox {
    min_lat: -4.39,
    max_lat: -3.33,
    min_lon: -55.2,
    max_lon: -54.48,
};

/// Marker position shown before the user has selected anything.
pub const DEFAULT_SELECTION: Coordinate = Coordinate {
    lat: -3.85,
    lon: -54.84,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Inclusive on all four edges.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lon >= self.min_lon
            && coord.lon <= self.max_lon
    }

    /// Clamp a coordinate onto the box, axis by axis. Numeric inputs use this
    /// so an out-of-range typed value snaps to the nearest edge.
    pub fn clamp(&self, coord: Coordinate) -> Coordinate {
        Coordinate {
            lat: coord.lat.clamp(self.min_lat, self.max_lat),
            lon: coord.lon.clamp(self.min_lon, self.max_lon),
        }
    }
}
