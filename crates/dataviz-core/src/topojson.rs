// File: crates/dataviz-core/src/topojson.rs
// Summary: TopoJSON decoding (quantized arcs, arc stitching) and uniform fit of shapes into a viewport.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChartError, Result};

pub type Ring = Vec<(f64, f64)>;

#[derive(Clone, Debug, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<QuantizeTransform>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    pub objects: HashMap<String, Geometry>,
}

/// Quantization: `position = quantized * scale + translate`.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct QuantizeTransform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
    Polygon {
        #[serde(default)]
        id: Option<Value>,
        arcs: Vec<Vec<i64>>,
    },
    MultiPolygon {
        #[serde(default)]
        id: Option<Value>,
        arcs: Vec<Vec<Vec<i64>>>,
    },
    /// Points, lines and null geometries carry no area.
    #[serde(other)]
    Other,
}

/// One decoded area feature; polygons of a multi-polygon are flattened into `rings`.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: Option<u64>,
    pub rings: Vec<Ring>,
}

impl Topology {
    /// Absolute positions of every arc, undoing delta encoding when quantized.
    pub fn decode_arcs(&self) -> Result<Vec<Ring>> {
        self.arcs
            .iter()
            .enumerate()
            .map(|(i, arc)| {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .map(|p| {
                        let (&px, &py) = match p.as_slice() {
                            [a, b, ..] => (a, b),
                            _ => return Err(ChartError::parse("topology", format!("arc {i} has a position with fewer than 2 coordinates"))),
                        };
                        Ok(match &self.transform {
                            Some(t) => {
                                x += px;
                                y += py;
                                (x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1])
                            }
                            None => (px, py),
                        })
                    })
                    .collect::<Result<Ring>>()
            })
            .collect()
    }

    pub fn object(&self, name: &str) -> Result<&Geometry> {
        self.objects
            .get(name)
            .ok_or_else(|| ChartError::parse("topology", format!("missing object `{name}`")))
    }

    /// Area features of object `name`, with arcs stitched into closed rings.
    pub fn shapes(&self, name: &str) -> Result<Vec<Shape>> {
        let arcs = self.decode_arcs()?;
        let mut out = Vec::new();
        collect_shapes(self.object(name)?, &arcs, &mut out)?;
        Ok(out)
    }
}

fn collect_shapes(g: &Geometry, arcs: &[Ring], out: &mut Vec<Shape>) -> Result<()> {
    match g {
        Geometry::GeometryCollection { geometries } => {
            for child in geometries {
                collect_shapes(child, arcs, out)?;
            }
        }
        Geometry::Polygon { id, arcs: rings } => {
            let rings = rings.iter().map(|r| stitch(arcs, r)).collect::<Result<_>>()?;
            out.push(Shape { id: id.as_ref().and_then(parse_id), rings });
        }
        Geometry::MultiPolygon { id, arcs: polys } => {
            let rings = polys
                .iter()
                .flatten()
                .map(|r| stitch(arcs, r))
                .collect::<Result<_>>()?;
            out.push(Shape { id: id.as_ref().and_then(parse_id), rings });
        }
        Geometry::Other => {}
    }
    Ok(())
}

/// Ids are numeric FIPS codes, sometimes written as strings.
fn parse_id(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Join arcs end to start. A negative index `!i` means arc `i` reversed.
/// Each arc after the first repeats the previous arc's last point, so it is dropped.
pub fn stitch(arcs: &[Ring], indices: &[i64]) -> Result<Ring> {
    let mut ring: Ring = Vec::new();
    for &idx in indices {
        let (i, reversed) = if idx < 0 { (!idx as usize, true) } else { (idx as usize, false) };
        let arc = arcs
            .get(i)
            .ok_or_else(|| ChartError::parse("topology", format!("arc index {idx} out of range ({} arcs)", arcs.len())))?;
        if !ring.is_empty() {
            ring.pop();
        }
        if reversed {
            ring.extend(arc.iter().rev());
        } else {
            ring.extend(arc.iter());
        }
    }
    Ok(ring)
}

/// Axis-aligned bounds `(x0, y0, x1, y1)` of all ring points.
pub fn bounds<'a>(rings: impl IntoIterator<Item = &'a Ring>) -> Option<(f64, f64, f64, f64)> {
    let mut b = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(x, y) in rings.into_iter().flatten() {
        b = (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y));
    }
    if b.0.is_finite() && b.3.is_finite() { Some(b) } else { None }
}

/// Uniform scale plus translation that centers a bounding box inside `width × height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub k: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Fit {
    pub fn new(b: (f64, f64, f64, f64), width: f64, height: f64) -> Self {
        let (bw, bh) = (b.2 - b.0, b.3 - b.1);
        let k = match (bw > 0.0, bh > 0.0) {
            (true, true) => (width / bw).min(height / bh),
            (true, false) => width / bw,
            (false, true) => height / bh,
            (false, false) => 1.0,
        };
        let tx = (width - k * bw) / 2.0 - k * b.0;
        let ty = (height - k * bh) / 2.0 - k * b.1;
        Self { k, tx, ty }
    }

    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x * self.k + self.tx, y * self.k + self.ty)
    }

    pub fn apply_ring(&self, ring: &Ring) -> Ring {
        ring.iter().map(|p| self.apply(*p)).collect()
    }
}

/// Even-odd point-in-polygon over all rings, so holes and islands both work.
pub fn contains(rings: &[Ring], (x, y): (f64, f64)) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARES: &str = r#"{
        "type": "Topology",
        "transform": { "scale": [2, 2], "translate": [10, 20] },
        "arcs": [
            [[1, 0], [0, 1]],
            [[1, 1], [-1, 0], [0, -1], [1, 0]],
            [[1, 0], [1, 0], [0, 1], [-1, 0]]
        ],
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "id": 1001, "arcs": [[0, 1]] },
                    { "type": "MultiPolygon", "id": "1003", "arcs": [[[2, -1]]] },
                    { "type": "Point", "coordinates": [0, 0] }
                ]
            }
        }
    }"#;

    fn topo() -> Topology {
        serde_json::from_str(SQUARES).unwrap()
    }

    #[test]
    fn quantized_arcs_are_delta_decoded() {
        let arcs = topo().decode_arcs().unwrap();
        assert_eq!(arcs[0], vec![(12.0, 20.0), (12.0, 22.0)]);
        assert_eq!(arcs[1], vec![(12.0, 22.0), (10.0, 22.0), (10.0, 20.0), (12.0, 20.0)]);
    }

    #[test]
    fn stitching_drops_shared_points_and_reverses_negative_arcs() {
        let shapes = topo().shapes("counties").unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].id, Some(1001));
        assert_eq!(shapes[0].rings[0], vec![(12.0, 20.0), (12.0, 22.0), (10.0, 22.0), (10.0, 20.0), (12.0, 20.0)]);
        assert_eq!(shapes[1].id, Some(1003));
        assert_eq!(shapes[1].rings[0], vec![(12.0, 20.0), (14.0, 20.0), (14.0, 22.0), (12.0, 22.0), (12.0, 20.0)]);
    }

    #[test]
    fn bad_arc_index_is_parse_error() {
        let arcs = topo().decode_arcs().unwrap();
        assert!(matches!(stitch(&arcs, &[7]), Err(ChartError::Parse { .. })));
    }

    #[test]
    fn fit_centers_and_preserves_aspect() {
        let f = Fit::new((0.0, 0.0, 10.0, 5.0), 100.0, 100.0);
        assert_eq!(f.k, 10.0);
        assert_eq!(f.apply((0.0, 0.0)), (0.0, 25.0));
        assert_eq!(f.apply((10.0, 5.0)), (100.0, 75.0));
    }

    #[test]
    fn contains_respects_holes() {
        let outer = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];
        let hole = vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)];
        let rings = vec![outer, hole];
        assert!(contains(&rings, (1.0, 1.0)));
        assert!(!contains(&rings, (5.0, 5.0)));
        assert!(!contains(&rings, (11.0, 5.0)));
    }
}
