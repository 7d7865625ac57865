#[cfg(test)]
mod tests {
    use crate::cluster::{Bounds, Position, check_inside};

    #[test]
    fn test_expanded_pads_twice_per_side() {
        let view = Bounds::new(0.0, 10.0, 20.0, 40.0);
        let expanded = view.expanded(0.1);

        assert!((expanded.min_lat - -2.0).abs() < 1e-12);
        assert!((expanded.max_lat - 12.0).abs() < 1e-12);
        assert!((expanded.min_lng - 16.0).abs() < 1e-12);
        assert!((expanded.max_lng - 44.0).abs() < 1e-12);
    }

    #[test]
    fn test_expanded_zero_area() {
        let view = Bounds::new(5.0, 5.0, 7.0, 7.0);
        assert_eq!(view.expanded(0.13), view);
    }

    #[test]
    fn test_from_corners_normalizes() {
        let b = Bounds::from_corners(Position::new(10.0, -5.0), Position::new(-3.0, 8.0));
        assert_eq!(b, Bounds::new(-3.0, 10.0, -5.0, 8.0));
    }

    #[test]
    fn test_check_inside_includes_edges() {
        let b = Bounds::new(0.0, 1.0, 0.0, 1.0);
        assert!(check_inside(&Position::new(0.5, 0.5), &b));
        assert!(check_inside(&Position::new(0.0, 1.0), &b));
        assert!(check_inside(&Position::new(1.0, 0.0), &b));
        assert!(!check_inside(&Position::new(1.0001, 0.5), &b));
        assert!(!check_inside(&Position::new(0.5, -0.0001), &b));
    }

    #[test]
    fn test_extend() {
        let mut b = Bounds::around(&Position::new(1.0, 1.0));
        b.extend(&Position::new(-2.0, 3.0));
        b.extend(&Position::new(0.0, -4.0));
        assert_eq!(b, Bounds::new(-2.0, 1.0, -4.0, 3.0));
    }
}
