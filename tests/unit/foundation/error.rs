use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CutoutError::missing_part("torso")
            .to_string()
            .contains("missing required part 'torso'")
    );
    assert!(
        CutoutError::invalid_image("hair", "no alpha channel")
            .to_string()
            .contains("invalid image format for part 'hair': no alpha channel")
    );
    assert!(
        CutoutError::invalid_spec("x")
            .to_string()
            .contains("invalid animation spec:")
    );
    assert!(
        CutoutError::encoder("x")
            .to_string()
            .contains("encoder failure:")
    );
    assert!(CutoutError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CutoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
