use super::geometry::Position;

/// Stable handle of a registered marker
///
/// Handles index the engine's append-only store, so they survive the
/// longitude re-sorts done on every view pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub(crate) usize);

/// A single clusterable point
///
/// The payload is owned by the marker but never inspected by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<T> {
    pub position: Position,
    pub weight: f64,
    pub category: Option<String>,
    /// Filtered markers are skipped by view passes and area queries
    pub filtered: bool,
    pub payload: T,
}

impl<T> Marker<T> {
    /// Creates an uncategorized marker with weight 1
    pub fn new(lat: f64, lng: f64, payload: T) -> Self {
        Marker {
            position: Position::new(lat, lng),
            weight: 1.0,
            category: None,
            filtered: false,
            payload,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Moves the marker in place
    pub fn move_to(&mut self, lat: f64, lng: f64) {
        self.position.lat = lat;
        self.position.lng = lng;
    }
}
