// File: crates/dataviz-core/src/svg.rs
// Summary: SVG render sink; serializes a Scene with ids, classes, data-* attributes and hover titles.

use std::fmt::Write as _;
use std::path::Path as FsPath;

use crate::error::Result;
use crate::scene::{Attrs, Node, Scene, TextAnchor};

/// Escape text for use in XML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Pixel coordinate with at most three decimals and no trailing zeros.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".into();
    }
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".into() } else { s.to_string() }
}

/// SVG path data for closed rings.
pub fn path_data(rings: &[Vec<(f64, f64)>]) -> String {
    let mut d = String::new();
    for ring in rings {
        for (i, (x, y)) in ring.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            let _ = write!(d, "{},{}", num(*x), num(*y));
        }
        if !ring.is_empty() {
            d.push('Z');
        }
    }
    d
}

pub fn render(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(scene.width),
        h = num(scene.height)
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, scene.background);
    for node in &scene.nodes {
        write_node(&mut out, node, 0);
    }
    out.push_str("</svg>\n");
    out
}

pub fn render_to_file(scene: &Scene, path: impl AsRef<FsPath>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render(scene))?;
    Ok(())
}

fn write_attrs(out: &mut String, a: &Attrs) {
    if let Some(id) = &a.id {
        let _ = write!(out, r#" id="{}""#, escape(id));
    }
    if let Some(class) = &a.class {
        let _ = write!(out, r#" class="{}""#, escape(class));
    }
    for (k, v) in &a.data {
        let _ = write!(out, r#" {}="{}""#, k, escape(v));
    }
}

/// Close a shape element, nesting its `<title>` when it has hover text.
fn close(out: &mut String, tag: &str, a: &Attrs) {
    match &a.title {
        Some(t) => {
            let _ = writeln!(out, "><title>{}</title></{}>", escape(t), tag);
        }
        None => out.push_str("/>\n"),
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    indent(out, depth);
    match node {
        Node::Group(g) => {
            out.push_str("<g");
            write_attrs(out, &g.attrs);
            if g.translate != (0.0, 0.0) {
                let _ = write!(out, r#" transform="translate({}, {})""#, num(g.translate.0), num(g.translate.1));
            }
            out.push_str(">\n");
            if let Some(t) = &g.attrs.title {
                indent(out, depth + 1);
                let _ = writeln!(out, "<title>{}</title>", escape(t));
            }
            for child in &g.children {
                write_node(out, child, depth + 1);
            }
            indent(out, depth);
            out.push_str("</g>\n");
        }
        Node::Rect(r) => {
            out.push_str("<rect");
            write_attrs(out, &r.attrs);
            let _ = write!(
                out,
                r#" x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                num(r.x),
                num(r.y),
                num(r.width),
                num(r.height),
                r.fill
            );
            if let Some(s) = r.stroke {
                let _ = write!(out, r#" stroke="{s}""#);
            }
            close(out, "rect", &r.attrs);
        }
        Node::Circle(c) => {
            out.push_str("<circle");
            write_attrs(out, &c.attrs);
            let _ = write!(out, r#" cx="{}" cy="{}" r="{}" fill="{}""#, num(c.cx), num(c.cy), num(c.r), c.fill);
            if let Some(s) = c.stroke {
                let _ = write!(out, r#" stroke="{s}""#);
            }
            close(out, "circle", &c.attrs);
        }
        Node::Path(p) => {
            out.push_str("<path");
            write_attrs(out, &p.attrs);
            let _ = write!(out, r#" d="{}""#, path_data(&p.rings));
            match p.fill {
                Some(f) => {
                    let _ = write!(out, r#" fill="{f}""#);
                }
                None => out.push_str(r#" fill="none""#),
            }
            if let Some(s) = p.stroke {
                let _ = write!(out, r#" stroke="{s}" stroke-width="{}""#, num(p.stroke_width));
            }
            close(out, "path", &p.attrs);
        }
        Node::Line(l) => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                num(l.x1),
                num(l.y1),
                num(l.x2),
                num(l.y2),
                l.stroke,
                num(l.width)
            );
        }
        Node::Text(t) => {
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            out.push_str("<text");
            write_attrs(out, &t.attrs);
            let _ = writeln!(
                out,
                r#" x="{}" y="{}" font-size="{}" font-family="sans-serif" text-anchor="{}" fill="{}">{}</text>"#,
                num(t.x),
                num(t.y),
                num(t.size),
                anchor,
                t.fill,
                escape(&t.content)
            );
        }
    }
}
