use super::*;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10" viewBox="0 0 20 10">
  <rect x="0" y="0" width="20" height="10" fill="#ffffff"/>
  <rect x="10" y="0" width="10" height="10" fill="#ff0000"/>
</svg>"##;

fn opts(format: RasterFormat) -> RasterOpts {
    RasterOpts {
        format,
        system_fonts: false,
        ..RasterOpts::default()
    }
}

#[test]
fn png_output_is_twice_the_document_size() {
    let img = rasterize_document(SQUARE, &opts(RasterFormat::Png)).unwrap();
    assert_eq!((img.width, img.height), (40, 20));

    let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (40, 20));
    assert_eq!(decoded.get_pixel(2, 2).0, [255, 255, 255, 255]);
    assert_eq!(decoded.get_pixel(35, 10).0, [255, 0, 0, 255]);
}

#[test]
fn webp_output_has_a_riff_header() {
    let img = rasterize_document(SQUARE, &opts(RasterFormat::WebP)).unwrap();
    assert_eq!(img.format, RasterFormat::WebP);
    assert_eq!(&img.bytes[0..4], b"RIFF");
    assert_eq!(&img.bytes[8..12], b"WEBP");
}

#[test]
fn malformed_documents_are_decode_errors() {
    let err = rasterize_document("<svg", &opts(RasterFormat::Png)).unwrap_err();
    assert!(matches!(err, WheelsError::Decode(_)), "{err}");
    assert!(err.suggests_vector_fallback());
}

#[test]
fn invalid_scale_falls_back_to_one() {
    let o = RasterOpts {
        scale: f32::NAN,
        ..opts(RasterFormat::Png)
    };
    let img = rasterize_blocking(SQUARE, &o).unwrap();
    assert_eq!((img.width, img.height), (20, 10));
}

#[test]
fn oversized_output_is_rejected() {
    let o = RasterOpts {
        scale: 10_000.0,
        ..opts(RasterFormat::Png)
    };
    assert!(matches!(
        rasterize_blocking(SQUARE, &o),
        Err(WheelsError::Decode(_))
    ));
}

#[test]
fn slow_workers_time_out() {
    let big = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1480" height="720">
  <rect width="1480" height="720" fill="#3b82f6"/>
</svg>"##;
    let o = RasterOpts {
        scale: 4.0,
        timeout: Duration::ZERO,
        ..opts(RasterFormat::Png)
    };
    let err = rasterize_document(big, &o).unwrap_err();
    assert!(matches!(err, WheelsError::Timeout(_)), "{err}");
}

#[test]
fn webp_output_is_lossless() {
    let img = rasterize_document(SQUARE, &opts(RasterFormat::WebP)).unwrap();
    // Lossless bitstreams use the VP8L chunk.
    assert_eq!(&img.bytes[12..16], b"VP8L");
    let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(35, 10).0, [255, 0, 0, 255]);
}
