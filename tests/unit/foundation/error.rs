use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WheelsError::precondition("x")
            .to_string()
            .contains("precondition failed:")
    );
    assert!(WheelsError::decode("x").to_string().contains("decode error:"));
    assert!(
        WheelsError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        WheelsError::Timeout(Duration::from_millis(250))
            .to_string()
            .contains("250ms")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WheelsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_raster_failures_suggest_vector_fallback() {
    assert!(WheelsError::decode("bad svg").suggests_vector_fallback());
    assert!(WheelsError::Timeout(Duration::from_secs(1)).suggests_vector_fallback());
    assert!(!WheelsError::precondition("no wheels").suggests_vector_fallback());
    assert!(!WheelsError::serde("eof").suggests_vector_fallback());
}
