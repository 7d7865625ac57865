use std::f64::consts::PI;

use super::geometry::{Point, Position};

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Side of a Web Mercator tile in pixels at zoom 0
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Mapping between geographic coordinates and the planar grid space
///
/// `unproject` must invert `project` within floating-point tolerance, and both
/// must stay consistent for the duration of a view pass.
pub trait Projection {
    fn project(&self, pos: &Position) -> Point;
    fn unproject(&self, point: &Point) -> Position;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, pos: &Position) -> Point {
        (**self).project(pos)
    }

    fn unproject(&self, point: &Point) -> Position {
        (**self).unproject(point)
    }
}

/// Projection assembled from a pair of closures supplied by the host
pub struct FnProjection<F, G> {
    project: F,
    unproject: G,
}

impl<F, G> FnProjection<F, G>
where
    F: Fn(f64, f64) -> Point,
    G: Fn(f64, f64) -> Position,
{
    /// `project` takes `(lat, lng)`, `unproject` takes `(x, y)`
    pub fn new(project: F, unproject: G) -> Self {
        FnProjection { project, unproject }
    }
}

impl<F, G> Projection for FnProjection<F, G>
where
    F: Fn(f64, f64) -> Point,
    G: Fn(f64, f64) -> Position,
{
    fn project(&self, pos: &Position) -> Point {
        (self.project)(pos.lat, pos.lng)
    }

    fn unproject(&self, point: &Point) -> Position {
        (self.unproject)(point.x, point.y)
    }
}

/// Spherical Web Mercator at a given zoom level, in pixels
///
/// `x` grows eastwards and `y` grows southwards, the world being
/// `TILE_SIZE * 2^zoom` pixels wide. Latitudes beyond `MAX_MERCATOR_LAT`
/// project onto the world edge, which unprojects to the pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    scale: f64,
}

impl WebMercator {
    pub fn new(zoom: f64) -> Self {
        WebMercator {
            scale: TILE_SIZE * zoom.exp2(),
        }
    }

    /// World size in pixels
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Projection for WebMercator {
    fn project(&self, pos: &Position) -> Point {
        let lat = pos.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT) * DEGREE_RAD;
        let x = (pos.lng + 180.0) / 360.0;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
        // Keep the clamped poles inside the outermost row of cells
        let y = y.clamp(0.0, 1.0 - f64::EPSILON);

        Point::new(x * self.scale, y * self.scale)
    }

    fn unproject(&self, point: &Point) -> Position {
        let x = point.x / self.scale;
        let y = point.y / self.scale;
        let lng = x * 360.0 - 180.0;
        // The top and bottom world edges stand for the poles, so the
        // outermost cells also cover the latitudes clamped by `project`
        let lat = if y <= 0.0 {
            90.0
        } else if y >= 1.0 {
            -90.0
        } else {
            (PI * (1.0 - 2.0 * y)).sinh().atan() / DEGREE_RAD
        };

        Position::new(lat, lng)
    }
}
