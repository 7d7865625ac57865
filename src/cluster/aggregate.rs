use std::collections::BTreeMap;

use super::geometry::{Bounds, Point, Position};
use super::marker::{Marker, MarkerId};
use super::projection::Projection;

/// Group of markers sharing one grid cell
///
/// `position` is the grid anchor: copied from the seed marker and never
/// recentred, so the cell a cluster occupies stays stable across merges.
/// `average_position` is the weighted centroid shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    position: Position,
    average_position: Position,
    population: usize,
    total_weight: f64,
    stats: BTreeMap<String, usize>,
    bounds: Bounds,
    marker: Option<MarkerId>,
}

impl Cluster {
    /// Creates a cluster seeded by one marker
    ///
    /// Bounds cover only the seed position until `compute_bounds` is called.
    pub fn new<T>(id: MarkerId, marker: &Marker<T>) -> Self {
        let mut stats = BTreeMap::new();
        if let Some(category) = &marker.category {
            stats.insert(category.clone(), 1);
        }

        Cluster {
            position: marker.position,
            average_position: marker.position,
            population: 1,
            total_weight: marker.weight,
            stats,
            bounds: Bounds::around(&marker.position),
            marker: Some(id),
        }
    }

    /// Merges one more marker, which becomes the representative
    ///
    /// The centroid is updated incrementally as
    /// `avg = (avg * tw + pos * w) / (tw + w)` on each axis. When the
    /// combined weight is zero it falls back to the unweighted running mean.
    pub fn add_marker<T>(&mut self, id: MarkerId, marker: &Marker<T>) {
        // First marker after a reset: stats from the previous pass are stale
        if self.population == 0 {
            self.stats.clear();
        }

        let pos = marker.position;
        let weight = marker.weight;
        let combined = self.total_weight + weight;

        if combined == 0.0 {
            let n = self.population as f64;
            self.average_position.lat = (self.average_position.lat * n + pos.lat) / (n + 1.0);
            self.average_position.lng = (self.average_position.lng * n + pos.lng) / (n + 1.0);
        } else {
            self.average_position.lat =
                (self.average_position.lat * self.total_weight + pos.lat * weight) / combined;
            self.average_position.lng =
                (self.average_position.lng * self.total_weight + pos.lng * weight) / combined;
        }

        self.total_weight = combined;
        self.population += 1;

        if let Some(category) = &marker.category {
            if let Some(count) = self.stats.get_mut(category) {
                *count += 1;
            } else {
                self.stats.insert(category.clone(), 1);
            }
        }

        self.marker = Some(id);
    }

    /// Empties the cluster ahead of a view pass
    ///
    /// Stats and centroid are left stale: a cluster that receives no marker
    /// during the pass is dropped, and the first merge after a reset starts
    /// the stats over.
    pub fn reset(&mut self) {
        self.marker = None;
        self.population = 0;
        self.total_weight = 0.0;
    }

    /// Snaps the bounds to the grid cell of side `size` holding the anchor
    pub fn compute_bounds<P: Projection + ?Sized>(&mut self, size: f64, projection: &P) {
        let p = projection.project(&self.position);
        let cell_x = (p.x / size).floor();
        let cell_y = (p.y / size).floor();

        let a = projection.unproject(&Point::new(cell_x * size, cell_y * size));
        let b = projection.unproject(&Point::new((cell_x + 1.0) * size, (cell_y + 1.0) * size));

        self.bounds = Bounds::from_corners(a, b);
    }

    /// Grid anchor, fixed at creation
    pub fn position(&self) -> Position {
        self.position
    }

    /// Weighted centroid of the merged markers
    pub fn average_position(&self) -> Position {
        self.average_position
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Marker count per category; uncategorized markers are not listed
    pub fn stats(&self) -> &BTreeMap<String, usize> {
        &self.stats
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The most recently merged marker
    pub fn marker(&self) -> Option<MarkerId> {
        self.marker
    }
}
