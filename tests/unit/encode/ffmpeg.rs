use super::*;

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_premul_and_straight_agree_over_black() {
    let mut premul = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut premul, &[128, 0, 0, 128], true, [0, 0, 0, 255])
        .unwrap();
    let mut straight = vec![0u8; 4];
    flatten_over_bg_to_opaque_rgba8(&mut straight, &[255, 0, 0, 128], false, [0, 0, 0, 255])
        .unwrap();
    assert_eq!(premul, vec![128, 0, 0, 255]);
    assert_eq!(straight, premul);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    let err = flatten_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255])
        .unwrap_err();
    assert!(matches!(err, CutoutError::EncoderFailure(_)));
}

#[test]
fn push_before_begin_is_encoder_failure() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    let err = sink.push_frame(FrameIndex(0), &frame).unwrap_err();
    assert!(matches!(err, CutoutError::EncoderFailure(_)));
}

#[test]
fn begin_rejects_zero_canvas() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let err = sink
        .begin(SinkConfig {
            width: 0,
            height: 2,
            fps: Fps::whole(24).unwrap(),
            frame_count: 1,
        })
        .unwrap_err();
    assert!(matches!(err, CutoutError::EncoderFailure(_)));
}
