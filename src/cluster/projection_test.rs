#[cfg(test)]
mod tests {
    use crate::cluster::projection::{MAX_MERCATOR_LAT, TILE_SIZE};
    use crate::cluster::{FnProjection, Point, Position, Projection, WebMercator};

    #[test]
    fn test_web_mercator_origin() {
        let proj = WebMercator::new(0.0);
        let p = proj.project(&Position::new(0.0, 0.0));
        assert!((p.x - TILE_SIZE / 2.0).abs() < 1e-9);
        assert!((p.y - TILE_SIZE / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_web_mercator_scale_doubles_per_zoom() {
        assert_eq!(WebMercator::new(0.0).scale(), 256.0);
        assert_eq!(WebMercator::new(3.0).scale(), 2048.0);
    }

    #[test]
    fn test_web_mercator_corners() {
        let proj = WebMercator::new(2.0);
        let top_left = proj.project(&Position::new(MAX_MERCATOR_LAT, -180.0));
        assert!(top_left.x.abs() < 1e-9);
        assert!(top_left.y.abs() < 1e-6);

        // y grows southwards
        let north = proj.project(&Position::new(40.0, 0.0));
        let south = proj.project(&Position::new(-40.0, 0.0));
        assert!(north.y < south.y);
    }

    #[test]
    fn test_web_mercator_round_trip() {
        let proj = WebMercator::new(11.0);
        let samples = [
            Position::new(59.955982, 30.244759),
            Position::new(40.7128, -74.0060),
            Position::new(-33.8688, 151.2093),
            Position::new(0.0, 0.0),
        ];
        for pos in samples {
            let back = proj.unproject(&proj.project(&pos));
            assert!((back.lat - pos.lat).abs() < 1e-9, "{pos:?} -> {back:?}");
            assert!((back.lng - pos.lng).abs() < 1e-9, "{pos:?} -> {back:?}");
        }
    }

    #[test]
    fn test_web_mercator_world_edges_are_poles() {
        let proj = WebMercator::new(3.0);
        assert_eq!(proj.unproject(&Point::new(100.0, 0.0)).lat, 90.0);
        assert_eq!(proj.unproject(&Point::new(100.0, -5.0)).lat, 90.0);
        assert_eq!(proj.unproject(&Point::new(100.0, proj.scale())).lat, -90.0);

        // Beyond the Mercator limit a position lands on the world edge
        let north = proj.project(&Position::new(89.0, 10.0));
        let south = proj.project(&Position::new(-89.0, 10.0));
        assert!(north.y >= 0.0 && north.y < 1e-6);
        assert!(south.y < proj.scale());
        assert!(south.y > proj.scale() - 1e-6);
    }

    #[test]
    fn test_fn_projection() {
        let proj = FnProjection::new(
            |lat: f64, lng: f64| Point::new(lng * 10.0, -lat * 10.0),
            |x: f64, y: f64| Position::new(-y / 10.0, x / 10.0),
        );
        let p = proj.project(&Position::new(2.0, 3.0));
        assert_eq!(p, Point::new(30.0, -20.0));
        assert_eq!(proj.unproject(&p), Position::new(2.0, 3.0));

        // Projection is implemented for references too
        let by_ref: &dyn Projection = &proj;
        assert_eq!((&by_ref).project(&Position::new(1.0, 1.0)), Point::new(10.0, -10.0));
    }
}
