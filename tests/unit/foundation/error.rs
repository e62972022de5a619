use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MockupError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MockupError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(MockupError::input("x").to_string().contains("input error:"));
    assert!(MockupError::encode("x").to_string().contains("encode error:"));
    assert!(
        MockupError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MockupError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
