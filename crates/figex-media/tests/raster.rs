use std::fs;
use std::io::Cursor;
use std::num::NonZeroU32;
use std::path::Path;

use figex_media::{
    Detection, MediaType, Quality, RasterOutcome, TargetEncoding, TransformError, TransformOptions,
    sniff, transform_raster,
};
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use sha2::{Digest, Sha256};

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn digest(path: &Path) -> String { hex::encode(Sha256::digest(fs::read(path).unwrap())) }

fn dimensions(path: &Path) -> (u32, u32) { image::open(path).unwrap().dimensions() }

fn bound(v: u32) -> Option<NonZeroU32> { NonZeroU32::new(v) }

#[test]
fn resize_to_max_width_keeps_png() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("abc123");
    fs::write(&asset, encoded(400, 200, ImageFormat::Png)).unwrap();

    let options = TransformOptions::default().max_width(bound(200));
    let outcome = transform_raster(&asset, MediaType::Png, &options).unwrap();

    let RasterOutcome::Transformed(t) = outcome else {
        panic!("expected a transformed asset, got {outcome:?}");
    };
    assert_eq!(t.output, dir.path().join("abc123.png"));
    assert!(t.resized && t.reencoded);
    assert_eq!((t.output_size.width, t.output_size.height), (200, 100));
    assert!(!asset.exists());
    assert_eq!(dimensions(&t.output), (200, 100));
    assert_eq!(sniff(&fs::read(&t.output).unwrap()), Detection::Raster(MediaType::Png));
}

#[test]
fn resize_to_max_height() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("tall");
    fs::write(&asset, encoded(100, 300, ImageFormat::Png)).unwrap();

    let options = TransformOptions::default().max_width(bound(80)).max_height(bound(150));
    let outcome = transform_raster(&asset, MediaType::Png, &options).unwrap();

    assert_eq!(outcome.output(), dir.path().join("tall.png"));
    assert_eq!(dimensions(outcome.output()), (50, 150));
}

#[test]
fn reencode_to_webp_removes_original() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("abc123");
    fs::write(&asset, encoded(64, 32, ImageFormat::Png)).unwrap();

    let options = TransformOptions::default()
        .target(TargetEncoding::Webp)
        .quality(Quality::new(90).unwrap());
    let outcome = transform_raster(&asset, MediaType::Png, &options).unwrap();

    let RasterOutcome::Transformed(t) = outcome else {
        panic!("expected a transformed asset, got {outcome:?}");
    };
    assert_eq!(t.output, dir.path().join("abc123.webp"));
    assert!(!t.resized);
    assert!(t.reencoded);
    assert!(!asset.exists());
    assert!(!dir.path().join("abc123.png").exists());
    assert_eq!(sniff(&fs::read(&t.output).unwrap()), Detection::Raster(MediaType::Webp));
    assert_eq!(dimensions(&t.output), (64, 32));
}

#[test]
fn reencode_to_avif() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("small");
    fs::write(&asset, encoded(16, 16, ImageFormat::Png)).unwrap();

    let options = TransformOptions::default()
        .target(TargetEncoding::Avif)
        .avif_speed(10);
    let outcome = transform_raster(&asset, MediaType::Png, &options).unwrap();

    assert_eq!(outcome.output(), dir.path().join("small.avif"));
    assert!(!asset.exists());
    assert_eq!(
        sniff(&fs::read(outcome.output()).unwrap()),
        Detection::Raster(MediaType::Avif)
    );
}

#[test]
fn jpeg_resize_stays_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("photo");
    fs::write(&asset, encoded(120, 60, ImageFormat::Jpeg)).unwrap();

    let options = TransformOptions::default().max_width(bound(60));
    let outcome = transform_raster(&asset, MediaType::Jpeg, &options).unwrap();

    assert_eq!(outcome.output(), dir.path().join("photo.jpg"));
    assert_eq!(dimensions(outcome.output()), (60, 30));
}

#[test]
fn within_bounds_keeps_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("fits");
    fs::write(&asset, encoded(64, 32, ImageFormat::Png)).unwrap();
    let before = digest(&asset);

    let options = TransformOptions::default().max_width(bound(1000)).max_height(bound(1000));
    let outcome = transform_raster(&asset, MediaType::Png, &options).unwrap();

    let RasterOutcome::Transformed(t) = outcome else {
        panic!("expected a transformed asset, got {outcome:?}");
    };
    assert!(!t.resized && !t.reencoded);
    assert_eq!(t.source_size, t.output_size);
    assert_eq!(digest(&t.output), before);
}

#[test]
fn decode_failure_falls_back_to_original_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("broken");
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(b"truncated garbage after the signature");
    fs::write(&asset, &bytes).unwrap();
    let before = digest(&asset);

    let options = TransformOptions::default().target(TargetEncoding::Webp);
    let outcome = transform_raster(&asset, MediaType::Png, &options).unwrap();

    let RasterOutcome::FellBack { output, error } = outcome else {
        panic!("expected a fallback, got {outcome:?}");
    };
    assert!(matches!(error, TransformError::Decode { media: MediaType::Png, .. }));
    assert_eq!(output, dir.path().join("broken.png"));
    assert!(!asset.exists());
    assert!(!dir.path().join("broken.webp").exists());
    assert_eq!(digest(&output), before);
}

#[test]
fn undecodable_type_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("phone");
    let bytes = b"\x00\x00\x00\x18ftypheic\x00\x00\x00\x00mif1heic".to_vec();
    fs::write(&asset, &bytes).unwrap();

    let options = TransformOptions::default().max_width(bound(10));
    let outcome = transform_raster(&asset, MediaType::Heic, &options).unwrap();

    let RasterOutcome::FellBack { output, error } = outcome else {
        panic!("expected a fallback, got {outcome:?}");
    };
    assert!(matches!(error, TransformError::Unsupported(MediaType::Heic)));
    assert_eq!(output, dir.path().join("phone.heic"));
    assert_eq!(fs::read(&output).unwrap(), bytes);
}

#[test]
fn missing_asset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = TransformOptions::default().target(TargetEncoding::Webp);
    let result = transform_raster(&dir.path().join("gone"), MediaType::Png, &options);
    assert!(matches!(result, Err(figex_fs::Error::Rename { .. })));
}
