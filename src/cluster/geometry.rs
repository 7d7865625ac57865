//! Geographic and planar value types

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// Projected planar coordinate, in pixels for a given projection state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Position { lat, lng }
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Bounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Bounds {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Builds normalized bounds from two opposite corners given in any order
    pub fn from_corners(a: Position, b: Position) -> Self {
        Bounds {
            min_lat: a.lat.min(b.lat),
            max_lat: a.lat.max(b.lat),
            min_lng: a.lng.min(b.lng),
            max_lng: a.lng.max(b.lng),
        }
    }

    /// Returns the bounds grown on every side by `2 * padding` times the
    /// extent of that axis
    ///
    /// The doubled padding keeps markers slightly outside the visible area
    /// in play, so clusters do not pop in and out while panning.
    pub fn expanded(&self, padding: f64) -> Self {
        let height_buffer = (self.max_lat - self.min_lat).abs() * padding;
        let width_buffer = (self.max_lng - self.min_lng).abs() * padding;

        Bounds {
            min_lat: self.min_lat - height_buffer - height_buffer,
            max_lat: self.max_lat + height_buffer + height_buffer,
            min_lng: self.min_lng - width_buffer - width_buffer,
            max_lng: self.max_lng + width_buffer + width_buffer,
        }
    }

    /// Grows the bounds so that they include `pos`
    pub fn extend(&mut self, pos: &Position) {
        self.min_lat = self.min_lat.min(pos.lat);
        self.max_lat = self.max_lat.max(pos.lat);
        self.min_lng = self.min_lng.min(pos.lng);
        self.max_lng = self.max_lng.max(pos.lng);
    }

    /// Zero-area bounds around a single position
    pub fn around(pos: &Position) -> Self {
        Bounds::new(pos.lat, pos.lat, pos.lng, pos.lng)
    }
}

/// Checks if `pos` lies inside `bounds`, edges included
pub fn check_inside(pos: &Position, bounds: &Bounds) -> bool {
    pos.lat >= bounds.min_lat
        && pos.lat <= bounds.max_lat
        && pos.lng >= bounds.min_lng
        && pos.lng <= bounds.max_lng
}
