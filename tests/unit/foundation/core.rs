use super::*;

use std::f64::consts::{FRAC_PI_2, PI};

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn polar_starts_at_twelve_o_clock_for_minus_half_pi() {
    let c = Point::new(220.0, 220.0);
    assert!(close(polar(c, 140.0, -FRAC_PI_2), Point::new(220.0, 80.0)));
    assert!(close(polar(c, 140.0, 0.0), Point::new(360.0, 220.0)));
    assert!(close(polar(c, 140.0, PI), Point::new(80.0, 220.0)));
}

#[test]
fn canvas_scaling_rounds_up_and_never_hits_zero() {
    let c = Canvas::new(960, 720);
    assert_eq!(c.scaled(2.0), (1920, 1440));
    assert_eq!(Canvas::new(3, 3).scaled(0.5), (2, 2));
    assert_eq!(Canvas::new(1, 1).scaled(0.0), (1, 1));
    assert_eq!(c.rect().width(), 960.0);
}
