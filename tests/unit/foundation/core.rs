use super::*;

#[test]
fn frame_file_name_pads_to_three_digits() {
    assert_eq!(frame_file_name("foo", FrameIndex(0), "png"), "foo000.png");
    assert_eq!(frame_file_name("foo", FrameIndex(7), "png"), "foo007.png");
    assert_eq!(frame_file_name("spin", FrameIndex(42), "png"), "spin042.png");
    assert_eq!(frame_file_name("spin", FrameIndex(1234), "png"), "spin1234.png");
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::new(4, 3).unwrap().pixel_count(), 12);
}

#[test]
fn canvas_default_matches_classic_screen() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (500, 500));
}
