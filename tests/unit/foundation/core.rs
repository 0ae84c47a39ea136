use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
}

#[test]
fn fps_frame_math() {
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.frames_to_secs(30), 0.5);
    assert_eq!(fps.secs_to_frames_ceil(0.25), 15);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), 0);
}

#[test]
fn gray_maps_unit_range_to_bytes() {
    assert_eq!(Rgba8::gray(0.0, 1.0), Rgba8::BLACK);
    assert_eq!(Rgba8::gray(0.20, 1.0), Rgba8::new(51, 51, 51, 255));
    assert_eq!(Rgba8::gray(2.0, -1.0), Rgba8::new(255, 255, 255, 0));
}
