// File: crates/dataviz-render-skia/src/lib.rs
// Summary: Headless PNG rendering of a dataviz Scene using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use dataviz_core::scene::{Group, Node, TextAnchor};
use dataviz_core::{Rgb, Scene};
use skia_safe as skia;
use tracing::info;

/// Rasterize `scene` and encode it as PNG bytes.
pub fn render_to_png_bytes(scene: &Scene) -> Result<Vec<u8>> {
    let (w, h) = (scene.width.ceil() as i32, scene.height.ceil() as i32);
    let mut surface = skia::surfaces::raster_n32_premul((w.max(1), h.max(1)))
        .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(color(scene.background));

    let font = skia::Font::default();
    for node in &scene.nodes {
        draw_node(canvas, &font, node);
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render `scene` to a PNG file at `path`, creating parent directories.
pub fn render_to_png(scene: &Scene, path: impl AsRef<std::path::Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = render_to_png_bytes(scene)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn color(c: Rgb) -> skia::Color {
    skia::Color::from_argb(255, c.r, c.g, c.b)
}

fn fill_paint(c: Rgb) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c));
    paint
}

fn stroke_paint(c: Rgb, width: f64) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width as f32);
    paint.set_color(color(c));
    paint
}

fn draw_group(canvas: &skia::Canvas, font: &skia::Font, g: &Group) {
    canvas.save();
    canvas.translate((g.translate.0 as f32, g.translate.1 as f32));
    for child in &g.children {
        draw_node(canvas, font, child);
    }
    canvas.restore();
}

fn draw_node(canvas: &skia::Canvas, font: &skia::Font, node: &Node) {
    match node {
        Node::Group(g) => draw_group(canvas, font, g),
        Node::Rect(r) => {
            let rect = skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32);
            canvas.draw_rect(rect, &fill_paint(r.fill));
            if let Some(s) = r.stroke {
                canvas.draw_rect(rect, &stroke_paint(s, 1.0));
            }
        }
        Node::Circle(c) => {
            let center = (c.cx as f32, c.cy as f32);
            canvas.draw_circle(center, c.r as f32, &fill_paint(c.fill));
            if let Some(s) = c.stroke {
                canvas.draw_circle(center, c.r as f32, &stroke_paint(s, 1.0));
            }
        }
        Node::Path(p) => {
            let mut path = skia::Path::new();
            path.set_fill_type(skia::PathFillType::EvenOdd);
            for ring in &p.rings {
                let mut points = ring.iter();
                if let Some(&(x, y)) = points.next() {
                    path.move_to((x as f32, y as f32));
                    for &(x, y) in points {
                        path.line_to((x as f32, y as f32));
                    }
                    path.close();
                }
            }
            if let Some(f) = p.fill {
                canvas.draw_path(&path, &fill_paint(f));
            }
            if let Some(s) = p.stroke {
                canvas.draw_path(&path, &stroke_paint(s, p.stroke_width));
            }
        }
        Node::Line(l) => {
            canvas.draw_line(
                (l.x1 as f32, l.y1 as f32),
                (l.x2 as f32, l.y2 as f32),
                &stroke_paint(l.stroke, l.width),
            );
        }
        Node::Text(t) => {
            let mut font = font.clone();
            font.set_size(t.size as f32);
            let paint = fill_paint(t.fill);
            let (width, _) = font.measure_str(&t.content, Some(&paint));
            let x = match t.anchor {
                TextAnchor::Start => t.x as f32,
                TextAnchor::Middle => t.x as f32 - width / 2.0,
                TextAnchor::End => t.x as f32 - width,
            };
            canvas.draw_str(&t.content, (x, t.y as f32), &font, &paint);
        }
    }
}
