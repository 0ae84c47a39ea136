use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ToastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ToastError::detached("x")
            .to_string()
            .contains("detached node:")
    );
    assert!(ToastError::scene("x").to_string().contains("scene error:"));
    assert!(
        ToastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ToastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: ToastError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ToastError::Serde(_)));
}
