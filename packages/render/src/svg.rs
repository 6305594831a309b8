//! SVG document generation.

use std::fmt::Write as _;

use choropleth_classify_models::ClassificationResult;
use choropleth_feature_models::Feature;
use geo::{BoundingRect as _, Coord, LineString, Rect};

use crate::{RenderConfig, RenderError};

/// Blank space kept around the map, in pixels.
const MARGIN: f64 = 20.0;
const LEGEND_ROW_HEIGHT: f64 = 20.0;
const LEGEND_SWATCH: f64 = 14.0;
const LEGEND_WIDTH: f64 = 170.0;

/// Renders classified features as an SVG document.
///
/// Features are scaled uniformly to fit the canvas with north up. Each
/// feature is filled with the palette color of its class; the legend lists
/// the class ranges to two decimals.
///
/// # Errors
///
/// Returns an error if the palette is invalid or has fewer colors than
/// there are classes.
pub fn render_svg(
    features: &[Feature],
    result: &ClassificationResult,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let palette = config.palette()?;
    if result.num_classes() > palette.len() {
        return Err(RenderError::PaletteTooSmall {
            required: result.num_classes(),
            available: palette.len(),
        });
    }

    let width = f64::from(config.width);
    let height = f64::from(config.height);
    let projection = Projection::fit(features, width, height);

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height,
    )?;
    writeln!(out, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;

    writeln!(out, r#"<g stroke="{}" stroke-width="0.5">"#, escape(&config.stroke))?;
    for (feature, &bin) in features.iter().zip(&result.bins) {
        let fill = palette.color(bin).unwrap_or("none");
        for polygon in feature.geometry.polygons() {
            let mut data = String::new();
            push_ring(&mut data, polygon.exterior(), &projection)?;
            for hole in polygon.interiors() {
                push_ring(&mut data, hole, &projection)?;
            }
            writeln!(
                out,
                r#"<path d="{}" fill="{fill}" fill-rule="evenodd"/>"#,
                data.trim_end()
            )?;
        }
    }
    writeln!(out, "</g>")?;

    let title = config.legend_title.as_deref().unwrap_or(&result.attribute);
    write_legend(&mut out, title, &result.boundaries.labels(), &palette, width, height)?;

    writeln!(out, "</svg>")?;

    log::debug!(
        "Rendered {} features into a {}x{} canvas",
        features.len(),
        config.width,
        config.height
    );
    Ok(out)
}

fn write_legend(
    out: &mut String,
    title: &str,
    labels: &[String],
    palette: &crate::Palette,
    width: f64,
    height: f64,
) -> Result<(), RenderError> {
    #[allow(clippy::cast_precision_loss)]
    let box_height = LEGEND_ROW_HEIGHT * (labels.len() + 1) as f64 + 10.0;
    let x = width - MARGIN - LEGEND_WIDTH;
    let y = height - MARGIN - box_height;

    writeln!(out, r#"<g font-family="sans-serif" font-size="12">"#)?;
    writeln!(
        out,
        r##"<rect x="{x:.1}" y="{y:.1}" width="{LEGEND_WIDTH}" height="{box_height:.1}" fill="#ffffff" fill-opacity="0.85" stroke="#999999"/>"##
    )?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-weight="bold">{}</text>"#,
        x + 8.0,
        y + LEGEND_ROW_HEIGHT,
        escape(title)
    )?;

    for (i, label) in labels.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let row_y = ((i + 1) as f64).mul_add(LEGEND_ROW_HEIGHT, y) + 6.0;
        let fill = palette.color(i).unwrap_or("none");
        writeln!(
            out,
            r#"<rect x="{:.1}" y="{row_y:.1}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" fill="{fill}"/>"#,
            x + 8.0
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}">{label}</text>"#,
            x + 8.0 + LEGEND_SWATCH + 6.0,
            row_y + LEGEND_SWATCH - 2.0
        )?;
    }

    writeln!(out, "</g>")?;
    Ok(())
}

/// Maps data coordinates onto the canvas.
#[derive(Debug, Clone, Copy)]
struct Projection {
    min: Coord<f64>,
    scale: f64,
    height: f64,
}

impl Projection {
    fn fit(features: &[Feature], width: f64, height: f64) -> Self {
        let bounds = features
            .iter()
            .flat_map(|f| f.geometry.polygons())
            .filter_map(|p| p.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            });

        let Some(bounds) = bounds else {
            return Self {
                min: Coord { x: 0.0, y: 0.0 },
                scale: 1.0,
                height,
            };
        };

        let span_x = bounds.width();
        let span_y = bounds.height();
        let fit_x = if span_x > 0.0 { (width - 2.0 * MARGIN) / span_x } else { f64::INFINITY };
        let fit_y = if span_y > 0.0 { (height - 2.0 * MARGIN) / span_y } else { f64::INFINITY };
        let scale = fit_x.min(fit_y);

        Self {
            min: bounds.min(),
            scale: if scale.is_finite() { scale } else { 1.0 },
            height,
        }
    }

    fn apply(&self, coord: Coord<f64>) -> (f64, f64) {
        let x = (coord.x - self.min.x).mul_add(self.scale, MARGIN);
        let y = self.height - (coord.y - self.min.y).mul_add(self.scale, MARGIN);
        (x, y)
    }
}

fn push_ring(
    data: &mut String,
    ring: &LineString<f64>,
    projection: &Projection,
) -> Result<(), std::fmt::Error> {
    for (i, coord) in ring.coords().enumerate() {
        let (x, y) = projection.apply(*coord);
        let command = if i == 0 { 'M' } else { 'L' };
        write!(data, "{command}{x:.2},{y:.2} ")?;
    }
    if !ring.0.is_empty() {
        data.push_str("Z ");
    }
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
