use crate::config::RenderConfig;
use crate::geometry::Rect;
use crate::placement_dump::PlacementDump;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const MARGIN: f32 = 24.0;

/// Draw the viewport, the anchor and the placed node of a scenario run.
///
/// Everything is in document coordinates, shifted so the union of the
/// drawn boxes sits inside a small margin.
pub fn render_svg(dump: &PlacementDump, theme: &Theme) -> String {
    let anchor = dump.result.as_ref().and_then(|r| r.anchor_rect);
    let node = dump.node_rect();

    let mut bounds = dump.viewport;
    for rect in [anchor, node].into_iter().flatten() {
        bounds = union(&bounds, &rect);
    }
    let dx = MARGIN - bounds.x;
    let dy = MARGIN - bounds.y;
    let width = (bounds.w + 2.0 * MARGIN).max(200.0);
    let height = (bounds.h + 2.0 * MARGIN).max(200.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let view = dump.viewport.translate(dx, dy);
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-width=\"1.2\"/>",
        view.x, view.y, view.w, view.h, theme.viewport_stroke
    ));
    svg.push_str(&label_svg(view.x + 6.0, view.y + theme.font_size + 4.0, "viewport", theme));

    if let Some(anchor) = anchor {
        let rect = anchor.translate(dx, dy);
        svg.push_str(&box_svg(&rect, &theme.anchor_fill, &theme.anchor_stroke));
        let caption = dump
            .result
            .as_ref()
            .map(|r| format!("anchor {}", r.anchor_corner))
            .unwrap_or_else(|| "anchor".to_string());
        svg.push_str(&label_svg(rect.x + 4.0, rect.y + theme.font_size + 2.0, &caption, theme));
    }

    if let Some(node) = node {
        let rect = node.translate(dx, dy);
        svg.push_str(&box_svg(&rect, &theme.popup_fill, &theme.popup_stroke));
        let caption = match &dump.result {
            Some(result) if result.overflow > 0.0 => {
                format!("{} {} (overflow {})", dump.op, result.node_corner, result.overflow)
            }
            Some(result) => format!("{} {}", dump.op, result.node_corner),
            None => dump.op.clone(),
        };
        svg.push_str(&label_svg(rect.x + 4.0, rect.y + theme.font_size + 2.0, &caption, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn union(a: &Rect, b: &Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
}

fn box_svg(rect: &Rect, fill: &str, stroke: &str) -> String {
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" ry=\"4\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1.4\"/>",
        rect.x, rect.y, rect.w, rect.h
    )
}

fn label_svg(x: f32, y: f32, text: &str, theme: &Theme) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    anyhow::bail!("PNG output requires the `png` feature")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
