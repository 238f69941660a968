use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use gridfig::{render_grid, ComposeOptions, GridSpec, ImageRef};

fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "gridfig_captions_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&path).unwrap();
    path
}

fn write_png(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(60, 40, Rgb(rgb))
        .save(&path)
        .unwrap();
    path
}

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn non_background_pixels(img: &RgbImage, x0: u32, x1: u32, y0: u32, y1: u32) -> usize {
    let mut count = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            if *img.get_pixel(x, y) != WHITE {
                count += 1;
            }
        }
    }
    count
}

// caption_pt 18 at 100 dpi: 25 px glyphs, a 40 px strip above each cell.
fn titled_options(titles: Vec<String>) -> ComposeOptions {
    ComposeOptions {
        cell_titles: Some(titles),
        caption_pt: 18.0,
        ..ComposeOptions::default()
    }
}

#[test]
fn caption_draws_in_the_reserved_strip() {
    let dir = unique_dir("strip");
    let images = vec![ImageRef::from(write_png(&dir, "stand.png", [200, 30, 30]))];
    let spec = GridSpec::new(1, 1).unwrap();

    let fig = render_grid(&images, spec, &titled_options(vec!["Stand".into()])).unwrap();
    assert_eq!(fig.dimensions(), (500, 400));

    // Glyphs land in the strip, above the image area.
    assert!(
        non_background_pixels(fig.image(), 0, 500, 0, 40) > 0,
        "caption strip should contain drawn text"
    );
    // The image itself sits below the strip, still aspect-preserved.
    assert_eq!(*fig.image().get_pixel(250, 220), Rgb([200, 30, 30]));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_trailing_titles_leave_cells_uncaptioned() {
    let dir = unique_dir("zip");
    let images: Vec<ImageRef> = [
        write_png(&dir, "left.png", [200, 30, 30]),
        write_png(&dir, "right.png", [30, 200, 30]),
    ]
    .into_iter()
    .map(ImageRef::from)
    .collect();
    let spec = GridSpec::new(1, 2).unwrap();

    // One title for two images: zip pairing captions only the first cell.
    let fig = render_grid(&images, spec, &titled_options(vec!["left".into()])).unwrap();
    assert_eq!(fig.dimensions(), (1000, 400));

    assert!(
        non_background_pixels(fig.image(), 2, 499, 2, 40) > 0,
        "first cell's strip should contain text"
    );
    assert_eq!(
        non_background_pixels(fig.image(), 501, 998, 2, 40),
        0,
        "second cell's strip must stay blank"
    );

    // Both images render below the shared strip height.
    assert_eq!(*fig.image().get_pixel(250, 220), Rgb([200, 30, 30]));
    assert_eq!(*fig.image().get_pixel(750, 220), Rgb([30, 200, 30]));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn extra_titles_are_ignored() {
    let dir = unique_dir("extra");
    let images = vec![ImageRef::from(write_png(&dir, "only.png", [30, 30, 200]))];
    let spec = GridSpec::new(1, 1).unwrap();

    let titles = vec!["only".into(), "unused".into(), "also unused".into()];
    let fig = render_grid(&images, spec, &titled_options(titles)).unwrap();
    assert!(non_background_pixels(fig.image(), 0, 500, 0, 40) > 0);

    let _ = fs::remove_dir_all(&dir);
}
