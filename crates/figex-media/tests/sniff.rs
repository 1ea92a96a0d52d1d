use figex_media::{Detection, Dimensions, MediaType, compute_scale, scaled_dimensions, sniff};
use proptest::prelude::*;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

proptest! {
    #[test]
    fn sniff_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        prop_assert_eq!(sniff(&data), sniff(&data));
    }

    #[test]
    fn png_signature_always_wins(tail in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend_from_slice(&tail);
        prop_assert_eq!(sniff(&data), Detection::Raster(MediaType::Png));
    }

    #[test]
    fn svg_tag_in_window_is_vector(comment in "[a-z ]{0,500}") {
        let doc = format!("<!-- {comment} --><svg xmlns=\"http://www.w3.org/2000/svg\"/>");
        prop_assert_eq!(sniff(doc.as_bytes()), Detection::Vector(MediaType::Svg));
    }

    #[test]
    fn detection_extension_matches_media(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let detection = sniff(&data);
        prop_assert_eq!(detection.extension(), detection.media().map(|m| m.extension()));
    }

    #[test]
    fn resize_never_upscales_and_respects_bounds(
        width in 1u32..8000,
        height in 1u32..8000,
        max_width in prop::option::of(1u32..4000),
        max_height in prop::option::of(1u32..4000),
    ) {
        let scale = compute_scale(width, height, max_width, max_height);
        prop_assert!(scale > 0.0 && scale <= 1.0);

        let out = scaled_dimensions(Dimensions::new(width, height), scale);
        prop_assert!(out.width >= 1 && out.height >= 1);
        prop_assert!(out.width <= width && out.height <= height);
        if let Some(bound) = max_width {
            prop_assert!(out.width <= bound.max(1));
        }
        if let Some(bound) = max_height {
            prop_assert!(out.height <= bound.max(1));
        }

        // Each axis is the exact scaled size, rounded.
        let exact_w = f64::from(width) * scale;
        let exact_h = f64::from(height) * scale;
        prop_assert!((f64::from(out.width) - exact_w).abs() <= 1.0);
        prop_assert!((f64::from(out.height) - exact_h).abs() <= 1.0);
    }

    #[test]
    fn unbounded_is_identity(width in 1u32..10_000, height in 1u32..10_000) {
        let size = Dimensions::new(width, height);
        prop_assert_eq!(scaled_dimensions(size, compute_scale(width, height, None, None)), size);
    }
}
