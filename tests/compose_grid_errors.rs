use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use gridfig::{compose_grid, ComposeOptions, CompositorError, GridSpec, ImageRef};

fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "gridfig_errors_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&path).unwrap();
    path
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(60, 40, Rgb([90, 90, 90]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn zero_sided_grid_is_invalid() {
    let err = GridSpec::new(0, 2).unwrap_err();
    assert!(matches!(
        err,
        CompositorError::InvalidGridSpec { rows: 0, cols: 2, .. }
    ));
    assert!(GridSpec::new(2, 0).is_err());
}

#[test]
fn too_many_images_fail_before_any_decode() {
    let dir = unique_dir("overflow");
    // Five refs for four cells; the paths need not even exist, capacity is
    // checked first.
    let images: Vec<ImageRef> = (0..5)
        .map(|i| ImageRef::from_path(dir.join(format!("missing_{i}.png"))))
        .collect();
    let spec = GridSpec::new(2, 2).unwrap();
    let out = dir.join("combined.png");

    let err = compose_grid(&images, spec, &out, &ComposeOptions::default()).unwrap_err();
    assert!(matches!(err, CompositorError::InvalidGridSpec { .. }));
    assert!(!out.exists(), "failed call must not write output");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_aborts_with_no_output() {
    let dir = unique_dir("missing");
    let images = vec![
        ImageRef::from(write_png(&dir, "ok.png")),
        ImageRef::from_path(dir.join("not_there.png")),
    ];
    let spec = GridSpec::new(1, 2).unwrap();
    let out = dir.join("combined.png");

    let err = compose_grid(&images, spec, &out, &ComposeOptions::default()).unwrap_err();
    match err {
        CompositorError::ImageDecode { name, .. } => assert!(name.contains("not_there")),
        other => panic!("expected ImageDecode, got {other}"),
    }
    assert!(!out.exists(), "failed call must not write output");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_input_is_a_decode_error() {
    let dir = unique_dir("corrupt");
    let bad = dir.join("bad.png");
    fs::write(&bad, b"definitely not a png").unwrap();
    let images = vec![ImageRef::from(bad)];
    let spec = GridSpec::new(1, 1).unwrap();
    let out = dir.join("combined.png");

    let err = compose_grid(&images, spec, &out, &ComposeOptions::default()).unwrap_err();
    assert!(matches!(err, CompositorError::ImageDecode { .. }));
    assert!(!out.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unwritable_destination_is_an_output_error() {
    let dir = unique_dir("badout");
    let images = vec![ImageRef::from(write_png(&dir, "a.png"))];
    let spec = GridSpec::new(1, 1).unwrap();
    let out = dir.join("no_such_subdir").join("combined.png");

    let err = compose_grid(&images, spec, &out, &ComposeOptions::default()).unwrap_err();
    assert!(matches!(err, CompositorError::OutputWrite { .. }));
    assert!(!out.exists());

    let _ = fs::remove_dir_all(&dir);
}
