//! Grid-aligned incremental clustering of geo markers
//!
//! Markers are registered once into a [`GridCluster`]; each call to
//! [`GridCluster::process_view`] groups the markers around a viewport into
//! clusters snapped to a pixel grid of the supplied projection.

pub mod cluster;

pub use cluster::{
    Bounds, Cluster, FnProjection, GridCluster, GridConfig, Marker, MarkerId, Point, Position,
    Projection, WebMercator,
};
