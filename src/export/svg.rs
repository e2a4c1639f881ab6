//! Standalone SVG documents for a single wheel and for the full comparison export.
//!
//! Everything here is a pure function of the opportunity data: no rendered UI tree is consulted.

use std::fmt::Write as _;

use crate::export::layout::{BAR_LABEL_MIN_WIDTH, ExportLayout, export_layout};
use crate::foundation::core::{Canvas, Vec2};
use crate::foundation::error::{WheelsError, WheelsResult};
use crate::geometry::wheel::{WheelGeometry, compute_wheel_geometry, wheel_canvas};
use crate::model::opportunity::Opportunity;
use crate::stats::summary::percentage;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const WHITE: &str = "#ffffff";
const TRACK_FILL: &str = "#e5e7eb";
const OUTLINE_STROKE: &str = "#d1d5db";
const TEXT_DARK: &str = "#111827";
const TEXT_MUTED: &str = "#6b7280";
const COMPARISON_TITLE: &str = "Overall Comparison";
const BAR_FONT_SIZE: f64 = 14.0;
const BAR_NAME_INSET: f64 = 12.0;
const BAR_PERCENT_INSET: f64 = 10.0;
const BAR_LABEL_SPACING: f64 = 8.0;

/// Rough advance width of bold sans-serif text; no font is available at document-build time.
fn estimated_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.6
}

/// Escape the five XML special characters for text content and attribute values.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn write_preamble(out: &mut String, canvas: Canvas) {
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    );
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{}" height="{}" fill="{WHITE}"/>"#,
        canvas.width, canvas.height,
    );
}

/// Write one wheel as a `<g>` translated to `origin`.
fn write_wheel(
    out: &mut String,
    opportunity: &Opportunity,
    geometry: &WheelGeometry,
    origin: Vec2,
) {
    let color = xml_escape(&opportunity.color);
    let c = geometry.center;
    let _ = writeln!(
        out,
        r#"  <g transform="translate({:.2} {:.2})" font-family="{FONT_FAMILY}">"#,
        origin.x, origin.y
    );
    let _ = writeln!(
        out,
        r#"    <text x="{:.2}" y="24" text-anchor="middle" font-size="18" font-weight="bold" fill="{TEXT_DARK}">{}</text>"#,
        c.x,
        xml_escape(&opportunity.name)
    );

    for s in &geometry.segments {
        let _ = writeln!(
            out,
            r#"    <path d="{}" fill="none" stroke="{OUTLINE_STROKE}" stroke-width="1"/>"#,
            s.outline_path
        );
        if !s.filled_path.is_empty() {
            let _ = writeln!(
                out,
                r#"    <path d="{}" fill="{color}" fill-opacity="0.85" stroke="{WHITE}" stroke-width="1"/>"#,
                s.filled_path
            );
        }
    }
    for s in &geometry.segments {
        let _ = writeln!(
            out,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{OUTLINE_STROKE}" stroke-width="1"/>"#,
            s.divider.p0.x, s.divider.p0.y, s.divider.p1.x, s.divider.p1.y
        );
    }
    let _ = writeln!(
        out,
        r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{OUTLINE_STROKE}" stroke-width="2"/>"#,
        c.x, c.y, geometry.radius
    );
    for s in &geometry.segments {
        let _ = writeln!(
            out,
            r#"    <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="12" fill="{TEXT_DARK}">{}</text>"#,
            s.label.x,
            s.label.y,
            xml_escape(&s.name)
        );
        let _ = writeln!(
            out,
            r#"    <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="12" font-weight="bold" fill="{TEXT_MUTED}">{}</text>"#,
            s.value_label.x, s.value_label.y, s.value
        );
    }
    let _ = writeln!(
        out,
        r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{TEXT_DARK}"/>"#,
        c.x, c.y, geometry.hub_radius
    );
    let _ = writeln!(out, "  </g>");
}

fn write_comparison(out: &mut String, opportunities: &[Opportunity], layout: &ExportLayout) {
    let _ = writeln!(out, r#"  <g font-family="{FONT_FAMILY}">"#);
    let _ = writeln!(
        out,
        r#"    <text x="{:.2}" y="{:.2}" font-size="20" font-weight="bold" fill="{TEXT_DARK}">{COMPARISON_TITLE}</text>"#,
        layout.title_origin.x, layout.title_origin.y
    );

    for (i, (opp, track)) in opportunities.iter().zip(&layout.bar_tracks).enumerate() {
        let pct = percentage(opp);
        let _ = writeln!(
            out,
            r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="8" fill="{TRACK_FILL}"/>"#,
            track.x0,
            track.y0,
            track.width(),
            track.height()
        );
        let Some(fill) = layout.bar_fill(i, pct) else {
            continue;
        };
        if fill.width() > 0.0 {
            let _ = writeln!(
                out,
                r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="8" fill="{}"/>"#,
                fill.x0,
                fill.y0,
                fill.width(),
                fill.height(),
                xml_escape(&opp.color)
            );
        }
        let text_y = track.y0 + track.height() / 2.0 + 5.0;
        let _ = writeln!(
            out,
            r#"    <text x="{:.2}" y="{:.2}" font-size="14" font-weight="bold" fill="{TEXT_DARK}" stroke="{WHITE}" stroke-width="3" paint-order="stroke">{}</text>"#,
            track.x0 + BAR_NAME_INSET,
            text_y,
            xml_escape(&opp.name)
        );
        let label = format!("{pct}%");
        let name_end =
            track.x0 + BAR_NAME_INSET + estimated_text_width(&opp.name, BAR_FONT_SIZE);
        let label_start =
            fill.x1 - BAR_PERCENT_INSET - estimated_text_width(&label, BAR_FONT_SIZE);
        if fill.width() > BAR_LABEL_MIN_WIDTH && name_end + BAR_LABEL_SPACING <= label_start {
            let _ = writeln!(
                out,
                r#"    <text x="{:.2}" y="{:.2}" text-anchor="end" font-size="14" font-weight="bold" fill="{WHITE}">{label}</text>"#,
                fill.x1 - BAR_PERCENT_INSET,
                text_y
            );
        }
    }
    let _ = writeln!(out, "  </g>");
}

/// A single 440×440 wheel as a complete SVG document.
pub fn render_wheel_document(opportunity: &Opportunity) -> String {
    let geometry = compute_wheel_geometry(opportunity);
    let mut out = String::new();
    write_preamble(&mut out, wheel_canvas());
    write_wheel(&mut out, opportunity, &geometry, Vec2::ZERO);
    out.push_str("</svg>\n");
    out
}

/// All wheels side by side with the comparison bars underneath, as one SVG document.
#[tracing::instrument(skip(opportunities), fields(count = opportunities.len()))]
pub fn render_export_document(opportunities: &[Opportunity]) -> WheelsResult<String> {
    if opportunities.is_empty() {
        return Err(WheelsError::precondition("no wheels to export"));
    }
    let layout = export_layout(opportunities.len());

    let mut out = String::new();
    write_preamble(&mut out, layout.canvas);
    for (opp, origin) in opportunities.iter().zip(&layout.wheel_origins) {
        let geometry = compute_wheel_geometry(opp);
        write_wheel(&mut out, opp, &geometry, origin.to_vec2());
    }
    write_comparison(&mut out, opportunities, &layout);
    out.push_str("</svg>\n");

    tracing::debug!(
        width = layout.canvas.width,
        height = layout.canvas.height,
        bytes = out.len(),
        "assembled export document"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
