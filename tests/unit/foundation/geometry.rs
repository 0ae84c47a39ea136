use super::*;

#[test]
fn from_rect_centers_origin() {
    let region = RectRegion::from_rect(Rect::new(10.0, 20.0, 110.0, 70.0));
    assert_eq!(region.origin, Point::new(60.0, 45.0));
    assert_eq!(region.size, Size::new(100.0, 50.0));
}

#[test]
fn corners_follow_bottom_left_convention() {
    let region = RectRegion::new(Point::new(0.0, 0.0), Size::new(4.0, 2.0));
    assert_eq!(region.lower_left_corner(), Point::new(-2.0, -1.0));
    assert_eq!(region.upper_left_corner(), Point::new(-2.0, 1.0));
    assert_eq!(region.min_x(), -2.0);
    assert_eq!(region.max_x(), 2.0);
    assert_eq!(region.min_y(), -1.0);
    assert_eq!(region.max_y(), 1.0);
}

#[test]
fn lower_left_corner_roundtrips_corner_rects() {
    for (x, y, w, h) in [
        (0.0, 0.0, 0.0, 0.0),
        (-12.5, 3.0, 25.0, 8.0),
        (1024.0, -768.0, 640.0, 480.0),
        (0.25, 0.75, 0.5, 1.5),
    ] {
        let rect = Rect::from_origin_size((x, y), (w, h));
        let region = RectRegion::from_rect(rect);
        assert_eq!(region.lower_left_corner(), Point::new(x, y));
        assert_eq!(region.rect(), rect);
    }
}

#[test]
fn negative_extents_are_normalized() {
    let region = RectRegion::from_rect(Rect::new(10.0, 10.0, 0.0, 0.0));
    assert_eq!(region.size, Size::new(10.0, 10.0));
    assert_eq!(region.origin, Point::new(5.0, 5.0));

    let region = RectRegion::new(Point::ZERO, Size::new(-3.0, 2.0));
    assert_eq!(region.size.width, 3.0);
}
