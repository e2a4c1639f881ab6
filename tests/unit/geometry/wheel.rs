use super::*;

fn wheel(values: &[u8]) -> WheelGeometry {
    compute_wheel_geometry(&Opportunity::with_values(1, "Job", "#336699", values))
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-6
}

#[test]
fn one_segment_per_consideration_and_angles_cover_the_circle() {
    for n in 1..=20usize {
        let values: Vec<u8> = (0..n).map(|i| (i % 11) as u8).collect();
        let g = wheel(&values);
        assert_eq!(g.segments.len(), n);
        let total: f64 = g.segments.iter().map(WheelSegment::sweep).sum();
        assert!((total - TAU).abs() < 1e-9, "n={n} total={total}");
        assert!((g.slice_angle().unwrap() - TAU / n as f64).abs() < 1e-12);
    }
}

#[test]
fn first_slice_starts_at_twelve_o_clock_and_runs_clockwise() {
    let g = wheel(&[5, 5, 5, 5]);
    let first = &g.segments[0];
    assert!((first.start_angle + FRAC_PI_2).abs() < 1e-12);
    assert!(close(first.divider.p0, Point::new(220.0, 220.0)));
    assert!(close(first.divider.p1, Point::new(220.0, 80.0)));
    // The second slice begins at 3 o'clock.
    assert!(close(g.segments[1].divider.p1, Point::new(360.0, 220.0)));
}

#[test]
fn zero_rating_produces_an_empty_filled_path() {
    let g = wheel(&[0, 10]);
    assert!(g.segments[0].filled_path.is_empty());
    assert!(!g.segments[0].outline_path.is_empty());
    assert!(!g.segments[1].filled_path.is_empty());
}

#[test]
fn filled_radius_scales_with_rating() {
    let g = wheel(&[5, 5, 5, 5]);
    // Quarter slice from 12 to 3 o'clock at radius 70.
    assert_eq!(
        g.segments[0].filled_path,
        "M 220.00 220.00 L 220.00 150.00 A 70.00 70.00 0 0 1 290.00 220.00 Z"
    );
    assert_eq!(
        g.segments[0].outline_path,
        "M 220.00 220.00 L 220.00 80.00 A 140.00 140.00 0 0 1 360.00 220.00 Z"
    );
}

#[test]
fn wide_slices_use_the_large_arc_flag() {
    let center = wheel_center();
    let d = wedge_path(center, 100.0, 0.0, 1.5 * PI);
    assert!(d.contains(" 0 1 1 "), "{d}");
    let d = wedge_path(center, 100.0, 0.0, 0.5 * PI);
    assert!(d.contains(" 0 0 1 "), "{d}");
}

#[test]
fn single_consideration_draws_a_full_disc() {
    let g = wheel(&[10]);
    let d = &g.segments[0].filled_path;
    assert_eq!(d.matches('A').count(), 2, "{d}");
    assert!(d.contains("220.00 360.00"), "{d}");
}

#[test]
fn labels_sit_outside_the_wheel_at_mid_angle() {
    let g = wheel(&[3, 3]);
    // Slice 0 spans the right half: its label is at 3 o'clock.
    assert!(close(g.segments[0].label, Point::new(220.0 + LABEL_DISTANCE, 220.0)));
    assert!(close(g.segments[1].label, Point::new(220.0 - LABEL_DISTANCE, 220.0)));
    let s = &g.segments[0];
    assert!(close(s.value_label, s.label + Vec2::new(0.0, VALUE_LABEL_OFFSET)));
    assert_eq!(s.name, "Factor 1");
    assert_eq!(s.value, 3);
}

#[test]
fn empty_wheel_has_no_segments() {
    let g = wheel(&[]);
    assert!(g.is_empty());
    assert_eq!(g.slice_angle(), None);
    assert_eq!(g.hub_radius, HUB_RADIUS);
    assert!(wedge_path(wheel_center(), 0.0, 0.0, 1.0).is_empty());
}
