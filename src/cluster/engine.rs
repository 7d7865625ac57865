use tracing::{debug, trace};

use super::aggregate::Cluster;
use super::geometry::{Bounds, check_inside};
use super::marker::{Marker, MarkerId};
use super::ordering::{choose_strategy, insertion_sort_by_key, lower_bound_by_key, sort_by_key};
use super::projection::Projection;

/// Default grid cell side, in projected pixels
pub const DEFAULT_SIZE: f64 = 166.0;

/// Default fraction of the viewport extent used as padding
pub const DEFAULT_VIEW_PADDING: f64 = 0.13;

/// Tuning of the clustering grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Grid cell side in projected units
    pub size: f64,
    /// Per-axis padding factor applied (doubled) around the viewport
    pub view_padding: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            size: DEFAULT_SIZE,
            view_padding: DEFAULT_VIEW_PADDING,
        }
    }
}

/// Grid clustering engine over markers carrying a payload of type `T`
///
/// Markers are kept in an append-only store plus an index ordered by
/// longitude. The index is sorted lazily at the start of each view pass.
/// Every mutation takes `&mut self`, so a pass can never overlap a
/// registration or a move.
#[derive(Debug, Clone)]
pub struct GridCluster<T> {
    config: GridConfig,
    markers: Vec<Marker<T>>,
    order: Vec<MarkerId>,
    changes: usize,
    clusters: Vec<Cluster>,
}

impl<T> Default for GridCluster<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GridCluster<T> {
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    pub fn with_config(config: GridConfig) -> Self {
        GridCluster {
            config,
            markers: Vec::new(),
            order: Vec::new(),
            changes: 0,
            clusters: Vec::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_size(&mut self, size: f64) {
        self.config.size = size;
    }

    pub fn set_view_padding(&mut self, view_padding: f64) {
        self.config.view_padding = view_padding;
    }

    /// Registers a marker and returns its handle
    ///
    /// The marker lands at the unsorted tail of the longitude index; sorting
    /// is deferred to the next view pass.
    pub fn register_marker(&mut self, marker: Marker<T>) -> MarkerId {
        let id = MarkerId(self.markers.len());
        self.markers.push(marker);
        self.order.push(id);
        self.changes += 1;
        id
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker<T>> {
        self.markers.get(id.0)
    }

    /// Mutable access to a marker
    ///
    /// Counts as a change, since the caller may move the marker.
    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker<T>> {
        let marker = self.markers.get_mut(id.0)?;
        self.changes += 1;
        Some(marker)
    }

    /// Moves a marker in place, returns false for an unknown handle
    pub fn move_marker(&mut self, id: MarkerId, lat: f64, lng: f64) -> bool {
        match self.marker_mut(id) {
            Some(marker) => {
                marker.move_to(lat, lng);
                true
            }
            None => false,
        }
    }

    /// All markers with their handles, in registration order
    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &Marker<T>)> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, marker)| (MarkerId(i), marker))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Marker handles in index order, sorted by longitude after a pass
    pub fn sorted_ids(&self) -> &[MarkerId] {
        &self.order
    }

    /// Clusters produced by the last view pass
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Drops every cluster; the next pass starts from an empty grid
    pub fn reset_clusters(&mut self) {
        self.clusters.clear();
    }

    /// Brings the longitude index up to date
    ///
    /// Few changes since the last sort means a nearly sorted index, where
    /// insertion sort wins; past the ratio threshold a general sort is used.
    pub fn sort_markers(&mut self) {
        let strategy = choose_strategy(self.changes, self.order.len());
        trace!(
            ?strategy,
            changes = self.changes,
            len = self.order.len(),
            "sort_markers"
        );

        let markers = &self.markers;
        sort_by_key(&mut self.order, strategy, |id| markers[id.0].position.lng);
        self.changes = 0;
    }

    /// First index in the longitude index whose marker has `lng >= lng`
    ///
    /// Only meaningful once the index is sorted.
    pub fn lower_bound_longitude(&self, lng: f64) -> usize {
        let markers = &self.markers;
        lower_bound_by_key(&self.order, lng, |id| markers[id.0].position.lng)
    }

    /// Clusters the markers around the viewport `view`
    ///
    /// Existing clusters are emptied and snapped to the grid of the given
    /// projection, then every marker of the padded viewport goes into the
    /// first cluster whose cell contains it, or seeds a new one. Clusters
    /// left empty are dropped and the rest are ordered by anchor longitude.
    pub fn process_view<P: Projection + ?Sized>(
        &mut self,
        view: &Bounds,
        projection: &P,
    ) -> &[Cluster] {
        let working = view.expanded(self.config.view_padding);
        let size = self.config.size;

        self.sort_markers();

        for cluster in &mut self.clusters {
            cluster.reset();
            cluster.compute_bounds(size, projection);
        }

        let first = self.lower_bound_longitude(working.min_lng);
        let mut merged = 0usize;
        let mut seeded = 0usize;

        for &id in &self.order[first..] {
            let marker = &self.markers[id.0];
            if marker.position.lng > working.max_lng {
                break;
            }
            if marker.filtered {
                continue;
            }

            let lat = marker.position.lat;
            if lat > working.min_lat && lat < working.max_lat {
                match self
                    .clusters
                    .iter_mut()
                    .find(|c| check_inside(&marker.position, c.bounds()))
                {
                    Some(cluster) => {
                        cluster.add_marker(id, marker);
                        merged += 1;
                    }
                    None => {
                        let mut cluster = Cluster::new(id, marker);
                        cluster.compute_bounds(size, projection);
                        self.clusters.push(cluster);
                        seeded += 1;
                    }
                }
            }
        }

        let before = self.clusters.len();
        self.clusters.retain(|c| c.population() > 0);
        insertion_sort_by_key(&mut self.clusters, |c| c.position().lng);

        debug!(
            markers = self.markers.len(),
            merged,
            seeded,
            dropped = before - self.clusters.len(),
            clusters = self.clusters.len(),
            "process_view"
        );

        &self.clusters
    }

    /// Handles of the non-filtered markers inside `area`, edges included
    pub fn find_markers_in_area(&mut self, area: &Bounds) -> Vec<MarkerId> {
        self.sort_markers();

        let first = self.lower_bound_longitude(area.min_lng);
        let mut found = Vec::new();
        for &id in &self.order[first..] {
            let marker = &self.markers[id.0];
            if marker.position.lng > area.max_lng {
                break;
            }
            if !marker.filtered && check_inside(&marker.position, area) {
                found.push(id);
            }
        }
        found
    }

    /// Bounding box of all non-filtered markers, if any
    pub fn compute_global_bounds(&self) -> Option<Bounds> {
        let mut visible = self.markers.iter().filter(|m| !m.filtered);
        let first = visible.next()?;
        let mut bounds = Bounds::around(&first.position);
        for marker in visible {
            bounds.extend(&marker.position);
        }
        Some(bounds)
    }
}
