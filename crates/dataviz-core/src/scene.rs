// File: crates/dataviz-core/src/scene.rs
// Summary: Renderer-agnostic scene tree consumed by the SVG writer and raster sinks.

use crate::color::Rgb;

/// Identity, styling hook and machine-readable attributes of a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs {
    pub id: Option<String>,
    pub class: Option<String>,
    pub data: Vec<(&'static str, String)>,
    /// Hover text; SVG emits it as a `<title>` child.
    pub title: Option<String>,
}

impl Attrs {
    pub fn id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self { class: Some(class.into()), ..Self::default() }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn data(mut self, name: &'static str, value: impl ToString) -> Self {
        self.data.push((name, value.to_string()));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub attrs: Attrs,
    pub translate: (f64, f64),
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub attrs: Attrs,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub stroke: Option<Rgb>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub attrs: Attrs,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgb,
    pub stroke: Option<Rgb>,
}

/// Closed polygons sharing one fill (multi-polygons and holes included).
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub attrs: Attrs,
    pub rings: Vec<Vec<(f64, f64)>>,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Rgb,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub attrs: Attrs,
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub size: f64,
    pub anchor: TextAnchor,
    pub fill: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group(Group),
    Rect(Rect),
    Circle(Circle),
    Path(Path),
    Line(Line),
    Text(Text),
}

impl Node {
    pub fn group(attrs: Attrs, translate: (f64, f64), children: Vec<Node>) -> Self {
        Node::Group(Group { attrs, translate, children })
    }

    pub fn text(attrs: Attrs, x: f64, y: f64, content: impl Into<String>, size: f64, anchor: TextAnchor, fill: Rgb) -> Self {
        Node::Text(Text { attrs, x, y, content: content.into(), size, anchor, fill })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgb, width: f64) -> Self {
        Node::Line(Line { x1, y1, x2, y2, stroke, width })
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Node::Group(g) => Some(&g.attrs),
            Node::Rect(r) => Some(&r.attrs),
            Node::Circle(c) => Some(&c.attrs),
            Node::Path(p) => Some(&p.attrs),
            Node::Text(t) => Some(&t.attrs),
            Node::Line(_) => None,
        }
    }
}

/// Complete drawing for one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Rgb,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Rgb) -> Self {
        Self { width, height, background, nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Depth-first search for a node by `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        fn walk<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
            for n in nodes {
                if n.attrs().and_then(|a| a.id.as_deref()) == Some(id) {
                    return Some(n);
                }
                if let Node::Group(g) = n {
                    if let Some(found) = walk(&g.children, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.nodes, id)
    }

    /// All nodes carrying `class`, depth-first.
    pub fn find_by_class(&self, class: &str) -> Vec<&Node> {
        fn walk<'a>(nodes: &'a [Node], class: &str, out: &mut Vec<&'a Node>) {
            for n in nodes {
                if n.attrs().and_then(|a| a.class.as_deref()) == Some(class) {
                    out.push(n);
                }
                if let Node::Group(g) = n {
                    walk(&g.children, class, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, class, &mut out);
        out
    }
}
