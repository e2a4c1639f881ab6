use super::*;

use serde_json::json;

#[test]
fn constructors_normalize_names_values_and_colors() {
    let c = Consideration::new(3, "  <i>Commute</i> ", 42);
    assert_eq!(c.name, "iCommute/i");
    assert_eq!(c.value, 10);

    let o = Opportunity::new(1, "", "blue", vec![c]);
    assert_eq!(o.name, DEFAULT_OPPORTUNITY_NAME);
    assert_eq!(o.color, crate::validate::input::DEFAULT_COLOR);
}

#[test]
fn fill_ratio_tracks_rating() {
    assert_eq!(Consideration::new(1, "a", 0).fill_ratio(), 0.0);
    assert_eq!(Consideration::new(1, "a", 7).fill_ratio(), 0.7);
    assert_eq!(Consideration::new(1, "a", 10).fill_ratio(), 1.0);
}

#[test]
fn next_consideration_id_follows_the_maximum() {
    let mut o = Opportunity::with_values(1, "Job", "#fff", &[5, 6]);
    assert_eq!(o.next_consideration_id(), 3);
    o.considerations[0].id = 9;
    assert_eq!(o.next_consideration_id(), 10);
    assert!(o.consideration(9).is_some());
}

#[test]
fn raw_import_normalizes_every_field() {
    let raw: RawOpportunity = serde_json::from_value(json!({
        "id": 4,
        "name": "<script>Startup",
        "color": "not-a-color",
        "considerations": [
            { "id": 1, "name": "Equity", "value": "8" },
            { "id": 1, "name": 12, "value": 99 },
            { "name": "Risk", "value": null }
        ]
    }))
    .unwrap();
    let o = raw.normalize(7);

    assert_eq!(o.id, 4);
    assert_eq!(o.name, "scriptStartup");
    assert_eq!(o.color, crate::validate::input::DEFAULT_COLOR);
    let ids: Vec<u32> = o.considerations.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(o.considerations[0].value, 8);
    assert_eq!(o.considerations[1].name, DEFAULT_CONSIDERATION_NAME);
    assert_eq!(o.considerations[1].value, 10);
    assert_eq!(o.considerations[2].value, 5);
}

#[test]
fn raw_import_caps_and_fills_consideration_lists() {
    let many: Vec<_> = (0..30).map(|i| json!({ "id": i, "name": "x", "value": 1 })).collect();
    let raw: RawOpportunity = serde_json::from_value(json!({ "considerations": many })).unwrap();
    let o = raw.normalize(2);
    assert_eq!(o.id, 2);
    assert_eq!(o.considerations.len(), MAX_CONSIDERATIONS);

    let raw: RawOpportunity = serde_json::from_value(json!({ "name": "Empty" })).unwrap();
    let o = raw.normalize(1);
    assert_eq!(o.considerations.len(), 1);
    assert_eq!(o.considerations[0].value, DEFAULT_VALUE);
}

#[test]
fn raw_import_skips_null_and_non_object_considerations() {
    for considerations in [json!(null), json!([null, 3, "x"]), json!("nope"), json!({ "id": 1 })] {
        let raw: RawOpportunity =
            serde_json::from_value(json!({ "id": 2, "considerations": considerations })).unwrap();
        let o = raw.normalize(1);
        assert_eq!(o.considerations.len(), 1);
        assert_eq!(o.considerations[0].name, DEFAULT_CONSIDERATION_NAME);
        assert_eq!(o.considerations[0].value, DEFAULT_VALUE);
    }

    let raw: RawOpportunity = serde_json::from_value(json!({
        "considerations": [null, { "name": "Pay", "value": 8 }, 4]
    }))
    .unwrap();
    let o = raw.normalize(1);
    assert_eq!(o.considerations.len(), 1);
    assert_eq!(o.considerations[0].id, 1);
    assert_eq!(o.considerations[0].name, "Pay");
    assert_eq!(o.considerations[0].value, 8);
}
