use crate::export::raster::{RasterFormat, RasterOpts, rasterize_document};
use crate::export::sink::ExportSink;
use crate::export::svg::render_export_document;
use crate::foundation::error::{WheelsError, WheelsResult};
use crate::model::opportunity::Opportunity;
use crate::model::workspace::opportunities_to_json;
use crate::validate::input::validate_file_name;

/// File name stem used when none (or an unusable one) is configured.
pub const DEFAULT_FILE_STEM: &str = "decision-wheels";

/// Output kinds offered by the export menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Svg,
    WebP,
    Png,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Json, Self::Svg, Self::WebP, Self::Png];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::WebP => "webp",
            Self::Png => "png",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Svg => "image/svg+xml",
            Self::WebP => "image/webp",
            Self::Png => "image/png",
        }
    }

    fn raster(self) -> Option<RasterFormat> {
        match self {
            Self::WebP => Some(RasterFormat::WebP),
            Self::Png => Some(RasterFormat::Png),
            Self::Json | Self::Svg => None,
        }
    }
}

/// Export configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// Prefix of generated file names; sanitized before use.
    pub file_stem: String,
    pub raster: RasterOpts,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            file_stem: DEFAULT_FILE_STEM.to_owned(),
            raster: RasterOpts::default(),
        }
    }
}

/// A finished export, ready to be handed to an [`ExportSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}

/// `<stem>-<unix-epoch-ms>.<ext>`, with the stem sanitized as a file name.
pub fn export_file_name(stem: &str, format: ExportFormat, epoch_ms: i64) -> String {
    let stem = validate_file_name(stem);
    let stem = if stem.is_empty() {
        DEFAULT_FILE_STEM
    } else {
        stem.as_str()
    };
    format!("{stem}-{epoch_ms}.{}", format.extension())
}

/// Produce one export, stamped with the current time.
pub fn export(
    opportunities: &[Opportunity],
    format: ExportFormat,
    opts: &ExportOpts,
) -> WheelsResult<Artifact> {
    export_at(
        opportunities,
        format,
        opts,
        chrono::Utc::now().timestamp_millis(),
    )
}

/// Produce one export with an explicit timestamp for the file name.
#[tracing::instrument(skip(opportunities, opts), fields(count = opportunities.len()))]
pub fn export_at(
    opportunities: &[Opportunity],
    format: ExportFormat,
    opts: &ExportOpts,
    epoch_ms: i64,
) -> WheelsResult<Artifact> {
    if opportunities.is_empty() {
        return Err(WheelsError::precondition("no wheels to export"));
    }

    let bytes = match format {
        ExportFormat::Json => opportunities_to_json(opportunities)?.into_bytes(),
        ExportFormat::Svg => render_export_document(opportunities)?.into_bytes(),
        ExportFormat::WebP | ExportFormat::Png => {
            let document = render_export_document(opportunities)?;
            let raster = RasterOpts {
                format: format.raster().unwrap_or(opts.raster.format),
                ..opts.raster.clone()
            };
            rasterize_document(&document, &raster)?.bytes
        }
    };

    let file_name = export_file_name(&opts.file_stem, format, epoch_ms);
    tracing::info!(file_name = %file_name, bytes = bytes.len(), "export ready");
    Ok(Artifact {
        file_name,
        format,
        bytes,
    })
}

/// Produce every requested format independently; a failure in one does not affect the others.
pub fn export_all(
    opportunities: &[Opportunity],
    formats: &[ExportFormat],
    opts: &ExportOpts,
) -> Vec<(ExportFormat, WheelsResult<Artifact>)> {
    let epoch_ms = chrono::Utc::now().timestamp_millis();
    formats
        .iter()
        .map(|&f| {
            let res = export_at(opportunities, f, opts, epoch_ms);
            if let Err(e) = &res {
                tracing::warn!(format = ?f, error = %e, "export failed");
            }
            (f, res)
        })
        .collect()
}

/// Export and hand the result to `sink`. Nothing reaches the sink when the export fails.
pub fn export_to_sink(
    opportunities: &[Opportunity],
    format: ExportFormat,
    opts: &ExportOpts,
    sink: &mut dyn ExportSink,
) -> WheelsResult<Artifact> {
    let artifact = export(opportunities, format, opts)?;
    sink.save(&artifact)?;
    Ok(artifact)
}

#[cfg(test)]
#[path = "../../tests/unit/export/artifact.rs"]
mod tests;
