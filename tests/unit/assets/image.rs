use super::*;

#[test]
fn from_rgba8_premultiplies() {
    let img = PartImage::from_rgba8("hair", 1, 1, vec![100, 50, 200, 128]).unwrap();
    assert_eq!(img.id(), "hair");
    assert_eq!(
        img.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn zero_area_is_invalid_image_format() {
    let err = PartImage::from_rgba8("eyes", 0, 4, vec![]).unwrap_err();
    assert!(matches!(err, CutoutError::InvalidImageFormat { part, .. } if part == "eyes"));
}

#[test]
fn wrong_buffer_length_is_rejected() {
    let err = PartImage::from_premul_rgba8("leg", 2, 2, vec![0; 12]).unwrap_err();
    assert!(matches!(err, CutoutError::InvalidImageFormat { reason, .. } if reason.contains("16")));
}

#[test]
fn pixel_outside_is_transparent() {
    let img = PartImage::solid("torso", 2, 3, [255, 0, 0, 255]).unwrap();
    assert_eq!(img.pixel(1, 2), [255, 0, 0, 255]);
    assert_eq!(img.pixel(-1, 0), [0, 0, 0, 0]);
    assert_eq!(img.pixel(2, 0), [0, 0, 0, 0]);
    assert_eq!(img.pixel(0, 3), [0, 0, 0, 0]);
    assert_eq!(img.size(), Vec2::new(2.0, 3.0));
}
