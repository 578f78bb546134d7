// File: crates/dataviz-core/src/hierarchy.rs
// Summary: Tree dataset, summed/sorted hierarchy and the squarified treemap layout.

use serde::Deserialize;

use crate::error::{ChartError, Result};

/// Golden ratio; the target aspect ratio of squarified tiles.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Raw tree node as published: `{ name, category?, value?, children? }`.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<NumberOrText>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// Leaf values arrive either as JSON numbers or numeric strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn to_f64(&self, name: &str) -> Result<f64> {
        let v = match self {
            NumberOrText::Number(n) => *n,
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ChartError::parse(format!("value of `{name}`"), format!("`{s}` is not a number")))?,
        };
        if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(ChartError::parse(format!("value of `{name}`"), format!("{v} is not a non-negative number")))
        }
    }
}

/// Node of a laid-out hierarchy. `x0..x1`, `y0..y1` are filled in by [`Hierarchy::treemap`].
#[derive(Clone, Debug, PartialEq)]
pub struct HNode {
    pub name: String,
    pub category: Option<String>,
    pub value: f64,
    pub depth: usize,
    pub height: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl HNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed tree; index 0 is the root, nodes are stored in pre-order.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    nodes: Vec<HNode>,
}

impl Hierarchy {
    /// Builds the tree, sums values bottom-up and sorts siblings by height then value, both descending.
    pub fn build(root: &TreeNode) -> Result<Self> {
        let mut h = Self { nodes: Vec::new() };
        h.insert(root, None, 0)?;
        h.sort();
        Ok(h)
    }

    fn insert(&mut self, t: &TreeNode, parent: Option<usize>, depth: usize) -> Result<usize> {
        let own = t.value.as_ref().map(|v| v.to_f64(&t.name)).transpose()?.unwrap_or(0.0);
        let id = self.nodes.len();
        self.nodes.push(HNode {
            name: t.name.clone(),
            category: t.category.clone(),
            value: own,
            depth,
            height: 0,
            parent,
            children: Vec::with_capacity(t.children.len()),
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
        });
        let (mut sum, mut height) = (own, 0);
        for child in &t.children {
            let c = self.insert(child, Some(id), depth + 1)?;
            sum += self.nodes[c].value;
            height = height.max(self.nodes[c].height + 1);
            self.nodes[id].children.push(c);
        }
        let node = &mut self.nodes[id];
        node.value = sum;
        node.height = height;
        Ok(id)
    }

    fn sort(&mut self) {
        for i in 0..self.nodes.len() {
            let mut kids = std::mem::take(&mut self.nodes[i].children);
            kids.sort_by(|&a, &b| {
                let (a, b) = (&self.nodes[a], &self.nodes[b]);
                b.height.cmp(&a.height).then(b.value.total_cmp(&a.value))
            });
            self.nodes[i].children = kids;
        }
    }

    pub fn root(&self) -> &HNode {
        &self.nodes[0]
    }

    pub fn get(&self, i: usize) -> Option<&HNode> {
        self.nodes.get(i)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Leaf indices, left to right in sorted order.
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            let n = &self.nodes[i];
            if n.is_leaf() {
                out.push(i);
            } else {
                stack.extend(n.children.iter().rev());
            }
        }
        out
    }

    /// Squarified layout into `[0, width] × [0, height]`, with `padding_inner` between siblings.
    pub fn treemap(&mut self, width: f64, height: f64, padding_inner: f64) {
        let half = padding_inner / 2.0;
        {
            let root = &mut self.nodes[0];
            (root.x0, root.y0, root.x1, root.y1) = (0.0, 0.0, width, height);
        }
        // Parents are positioned before their children.
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            let p = if self.nodes[i].depth == 0 { 0.0 } else { half };
            let n = &mut self.nodes[i];
            let (mut x0, mut y0, mut x1, mut y1) = (n.x0 + p, n.y0 + p, n.x1 - p, n.y1 - p);
            collapse(&mut x0, &mut x1);
            collapse(&mut y0, &mut y1);
            (n.x0, n.y0, n.x1, n.y1) = (x0, y0, x1, y1);
            if n.is_leaf() {
                continue;
            }
            let (mut x0, mut y0, mut x1, mut y1) = (x0 - half, y0 - half, x1 + half, y1 + half);
            collapse(&mut x0, &mut x1);
            collapse(&mut y0, &mut y1);
            self.squarify(i, x0, y0, x1, y1);
            stack.extend(self.nodes[i].children.iter().rev());
        }
    }

    fn squarify(&mut self, parent: usize, mut x0: f64, mut y0: f64, x1: f64, y1: f64) {
        let kids = self.nodes[parent].children.clone();
        let mut value = self.nodes[parent].value;
        let n = kids.len();
        let (mut i0, mut i1) = (0, 0);
        while i0 < n {
            let (dx, dy) = (x1 - x0, y1 - y0);
            // Skip leading zero-valued nodes into the row.
            let mut sum = 0.0;
            while i1 < n {
                sum = self.nodes[kids[i1]].value;
                i1 += 1;
                if sum != 0.0 {
                    break;
                }
            }
            let (mut min_v, mut max_v) = (sum, sum);
            let alpha = (dy / dx).max(dx / dy) / (value * PHI);
            let mut beta = sum * sum * alpha;
            let mut min_ratio = (max_v / beta).max(beta / min_v);
            while i1 < n {
                let v = self.nodes[kids[i1]].value;
                sum += v;
                min_v = min_v.min(v);
                max_v = max_v.max(v);
                beta = sum * sum * alpha;
                let ratio = (max_v / beta).max(beta / min_v);
                if ratio > min_ratio {
                    sum -= v;
                    break;
                }
                min_ratio = ratio;
                i1 += 1;
            }

            let row = &kids[i0..i1];
            if dx < dy {
                let ry1 = if value > 0.0 { y0 + dy * sum / value } else { y1 };
                self.dice(row, sum, x0, y0, x1, ry1);
                y0 = ry1;
            } else {
                let rx1 = if value > 0.0 { x0 + dx * sum / value } else { x1 };
                self.slice(row, sum, x0, y0, rx1, y1);
                x0 = rx1;
            }
            value -= sum;
            i0 = i1;
        }
    }

    /// Split horizontally in proportion to value.
    fn dice(&mut self, row: &[usize], total: f64, mut x0: f64, y0: f64, x1: f64, y1: f64) {
        let k = if total > 0.0 { (x1 - x0) / total } else { 0.0 };
        for &i in row {
            let n = &mut self.nodes[i];
            n.y0 = y0;
            n.y1 = y1;
            n.x0 = x0;
            x0 += n.value * k;
            n.x1 = x0;
        }
    }

    /// Split vertically in proportion to value.
    fn slice(&mut self, row: &[usize], total: f64, x0: f64, mut y0: f64, x1: f64, y1: f64) {
        let k = if total > 0.0 { (y1 - y0) / total } else { 0.0 };
        for &i in row {
            let n = &mut self.nodes[i];
            n.x0 = x0;
            n.x1 = x1;
            n.y0 = y0;
            y0 += n.value * k;
            n.y1 = y0;
        }
    }
}

fn collapse(lo: &mut f64, hi: &mut f64) {
    if *hi < *lo {
        let mid = (*lo + *hi) / 2.0;
        *lo = mid;
        *hi = mid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> Hierarchy {
        Hierarchy::build(&serde_json::from_str::<TreeNode>(json).unwrap()).unwrap()
    }

    #[test]
    fn sums_and_sorts() {
        let h = tree(
            r#"{"name":"root","children":[
                {"name":"a","value":"1"},
                {"name":"g","children":[{"name":"b","value":2},{"name":"c","value":"5"}]},
                {"name":"d","value":3}
            ]}"#,
        );
        assert_eq!(h.root().value, 11.0);
        assert_eq!(h.root().height, 2);
        let names: Vec<&str> = h.root().children.iter().map(|&i| h.get(i).unwrap().name.as_str()).collect();
        assert_eq!(names, ["g", "d", "a"]);
        let leaves: Vec<&str> = h.leaves().into_iter().map(|i| h.get(i).unwrap().name.as_str()).collect();
        assert_eq!(leaves, ["c", "b", "d", "a"]);
    }

    #[test]
    fn non_numeric_value_is_parse_error() {
        let t: TreeNode = serde_json::from_str(r#"{"name":"r","children":[{"name":"x","value":"lots"}]}"#).unwrap();
        assert!(matches!(Hierarchy::build(&t), Err(ChartError::Parse { .. })));
    }

    #[test]
    fn squarify_covers_the_rectangle() {
        let mut h = tree(r#"{"name":"r","children":[{"name":"a","value":6},{"name":"b","value":6},{"name":"c","value":4},{"name":"d","value":3},{"name":"e","value":2},{"name":"f","value":2},{"name":"g","value":1}]}"#);
        h.treemap(600.0, 400.0, 0.0);
        let area: f64 = h
            .leaves()
            .into_iter()
            .map(|i| {
                let n = h.get(i).unwrap();
                (n.x1 - n.x0) * (n.y1 - n.y0)
            })
            .sum();
        assert!((area - 600.0 * 400.0).abs() < 1e-6);
        let a = h.get(h.root().children[0]).unwrap();
        assert!(((a.x1 - a.x0) * (a.y1 - a.y0) - 240_000.0 * 6.0 / 24.0).abs() < 1e-6);
    }
}
