//! Package cluster implements grid-aligned clustering of geo markers
pub mod aggregate;
pub mod engine;
pub mod geometry;
pub mod marker;
pub mod ordering;
pub mod projection;

#[cfg(test)]
mod geometry_test;
#[cfg(test)]
mod ordering_test;
#[cfg(test)]
mod projection_test;

pub use aggregate::Cluster;
pub use engine::{DEFAULT_SIZE, DEFAULT_VIEW_PADDING, GridCluster, GridConfig};
pub use geometry::{Bounds, Point, Position, check_inside};
pub use marker::{Marker, MarkerId};
pub use ordering::{SORT_RATIO_THRESHOLD, SortStrategy};
pub use projection::{DEGREE_RAD, FnProjection, Projection, WebMercator};
