use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PatchError::malformed("x")
            .to_string()
            .contains("malformed connection:")
    );
    assert!(PatchError::foreign("x").to_string().contains("foreign node:"));
    assert!(
        PatchError::description("x")
            .to_string()
            .contains("description error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PatchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
