use std::io::Cursor;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{WheelsError, WheelsResult};

/// Encoded bitmap container for raster exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// Lossless WebP. The `image` encoder has no lossy quality setting, so files are larger
    /// than a quality-tuned lossy encode of the same document.
    WebP,
    Png,
}

impl RasterFormat {
    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::WebP => image::ImageFormat::WebP,
            Self::Png => image::ImageFormat::Png,
        }
    }
}

/// Raster bridge configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    /// Pixel density relative to the document size.
    pub scale: f32,
    pub format: RasterFormat,
    /// Upper bound on the decode/draw/encode step.
    pub timeout: Duration,
    /// Resolve `<text>` against installed system fonts. Without fonts, text is skipped.
    pub system_fonts: bool,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            scale: 2.0,
            format: RasterFormat::WebP,
            timeout: Duration::from_secs(10),
            system_fonts: true,
        }
    }
}

/// An encoded bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub format: RasterFormat,
    pub bytes: Vec<u8>,
}

// Avoid pathological allocations from hostile scale factors.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG document on a worker thread, waiting at most `opts.timeout`.
///
/// Unparseable documents report [`WheelsError::Decode`]; a worker that does not answer in time
/// reports [`WheelsError::Timeout`]. Either way the caller keeps running.
#[tracing::instrument(skip(document, opts), fields(bytes = document.len(), format = ?opts.format))]
pub fn rasterize_document(document: &str, opts: &RasterOpts) -> WheelsResult<RasterImage> {
    let (tx, rx) = mpsc::channel::<WheelsResult<RasterImage>>();
    let doc = document.to_owned();
    let worker_opts = opts.clone();

    std::thread::Builder::new()
        .name("wheels-raster".to_owned())
        .spawn(move || {
            // The receiver may be gone after a timeout; nothing left to report to.
            let _ = tx.send(rasterize_blocking(&doc, &worker_opts));
        })
        .context("spawn raster worker")?;

    match rx.recv_timeout(opts.timeout) {
        Ok(res) => res,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(timeout = ?opts.timeout, "raster worker did not finish in time");
            Err(WheelsError::Timeout(opts.timeout))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(WheelsError::decode(
            "raster worker stopped without reporting a result",
        )),
    }
}

/// Synchronous core of [`rasterize_document`].
pub fn rasterize_blocking(document: &str, opts: &RasterOpts) -> WheelsResult<RasterImage> {
    let tree = parse_document(document, opts.system_fonts)?;

    let size = tree.size();
    let canvas = Canvas::new(size.width().ceil() as u32, size.height().ceil() as u32);
    let scale = if opts.scale.is_finite() && opts.scale > 0.0 {
        opts.scale
    } else {
        1.0
    };
    let (width, height) = canvas.scaled(scale);
    if width > MAX_DIM || height > MAX_DIM {
        return Err(WheelsError::decode(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| WheelsError::decode("failed to allocate raster surface"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| WheelsError::decode("raster buffer size mismatch"))?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), opts.format.image_format())
        .with_context(|| format!("encode {:?} image", opts.format))?;

    tracing::debug!(width, height, bytes = bytes.len(), "rasterized document");
    Ok(RasterImage {
        width,
        height,
        format: opts.format,
        bytes,
    })
}

fn parse_document(document: &str, system_fonts: bool) -> WheelsResult<usvg::Tree> {
    let mut db = usvg::fontdb::Database::new();
    if system_fonts {
        db.load_system_fonts();
    }
    let opts = usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };
    usvg::Tree::from_str(document, &opts)
        .map_err(|e| WheelsError::decode(format!("parse svg document: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
