use super::*;

#[test]
fn defaults_match_medium_band() {
    let config = ToastConfig::default();
    assert_eq!(config.placement, Point::new(0.50, 0.15));
    assert_eq!(config.size_fraction.width, 0.50);
    assert!((config.size_fraction.height - 0.7071).abs() < 1e-4);
    assert_eq!(config.duration_or_default(), 0.60);
    assert_eq!(config.style.font.size, 15.0);
    assert_eq!(config.style.font.name, "HelveticaNeue-CondensedBold");
    assert_eq!(config.style.background, Rgba8::gray(0.20, 1.0));
    config.validate().unwrap();
}

#[test]
fn aspect_presets_take_square_root_for_height() {
    let small = ToastConfig::default().with_aspect(ASPECT_SMALL);
    assert_eq!(small.size_fraction, Size::new(0.25, 0.5));
    let large = size_fraction_for_aspect(ASPECT_LARGE);
    assert_eq!(large.width, 0.75);
    assert_eq!(large.height, 0.75f64.sqrt());
}

#[test]
fn partial_json_keeps_defaults() {
    let config = ToastConfig::from_json_str(
        r#"{ "duration_secs": 2.5, "placement": { "x": 0.5, "y": 0.9 } }"#,
    )
    .unwrap();
    assert_eq!(config.duration_secs, Some(2.5));
    assert_eq!(config.placement, Point::new(0.5, 0.9));
    assert_eq!(config.size_fraction, ToastConfig::default().size_fraction);
    assert_eq!(config.style, ToastStyle::default());
}

#[test]
fn validate_rejects_bad_values() {
    assert!(ToastConfig::default().with_duration(-1.0).validate().is_err());
    assert!(
        ToastConfig::default()
            .with_duration(f64::INFINITY)
            .validate()
            .is_err()
    );

    let mut config = ToastConfig::default();
    config.size_fraction = Size::new(-0.1, 0.5);
    assert!(config.validate().is_err());

    let mut config = ToastConfig::default();
    config.placement = Point::new(f64::NAN, 0.0);
    assert!(config.validate().is_err());

    let mut config = ToastConfig::default();
    config.style.font.size = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ToastConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ToastError::Serde(_)));
}
