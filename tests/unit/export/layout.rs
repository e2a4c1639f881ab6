use super::*;

#[test]
fn canvas_size_follows_wheel_count() {
    assert_eq!(export_layout(1).canvas, Canvas::new(520, 720));
    assert_eq!(export_layout(2).canvas, Canvas::new(1000, 720));
    assert_eq!(export_layout(3).canvas, Canvas::new(1480, 720));
}

#[test]
fn wheels_are_spaced_left_to_right() {
    let l = export_layout(3);
    let xs: Vec<f64> = l.wheel_origins.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![40.0, 520.0, 1000.0]);
    assert!(l.wheel_origins.iter().all(|p| p.y == PADDING));
}

#[test]
fn bars_stack_below_the_title() {
    let l = export_layout(3);
    assert_eq!(l.title_origin.y, 546.0);
    let ys: Vec<f64> = l.bar_tracks.iter().map(|r| r.y0).collect();
    assert_eq!(ys, vec![560.0, 620.0, 680.0]);
    assert_eq!(l.bar_tracks[2].y1, 720.0);
    assert!(l.bar_tracks.iter().all(|r| r.x0 == 40.0 && r.x1 == 1440.0));
}

#[test]
fn bar_fill_is_proportional_to_percentage() {
    let l = export_layout(2);
    assert_eq!(l.inner_width(), 920.0);
    let fill = l.bar_fill(0, 60.0).unwrap();
    assert!((fill.width() - 552.0).abs() < 1e-9);
    assert_eq!(l.bar_fill(1, 0.0).unwrap().width(), 0.0);
    assert_eq!(l.bar_fill(1, 250.0).unwrap().width(), 920.0);
    assert!(l.bar_fill(2, 50.0).is_none());
}

#[test]
fn large_sets_grow_the_comparison_panel() {
    let l = export_layout(5);
    let last = l.bar_tracks.last().unwrap();
    assert!(last.y1 <= f64::from(l.canvas.height));
    assert_eq!(export_layout(0).canvas, Canvas::new(80, 720));
}
