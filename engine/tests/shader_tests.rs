//! Shader Tests - WGSL Validation
//!
//! Parses and validates the overlay shader with naga so a broken shader is
//! caught without a GPU.

const OVERLAY_SHADER: &str = include_str!("../../shaders/hijack_overlay.wgsl");

#[test]
fn test_overlay_shader_validates() {
    let module = naga::front::wgsl::parse_str(OVERLAY_SHADER).expect("overlay shader should parse");

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator.validate(&module).expect("overlay shader should validate");
}

#[test]
fn test_overlay_shader_entry_points() {
    let module = naga::front::wgsl::parse_str(OVERLAY_SHADER).expect("overlay shader should parse");

    let names: Vec<&str> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}
