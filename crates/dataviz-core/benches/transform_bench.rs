use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dataviz_core::charts::heatmap::{self, MonthlyVariance, TemperatureDataset};
use dataviz_core::hierarchy::{NumberOrText, TreeNode};
use dataviz_core::charts::treemap;
use dataviz_core::{svg, Theme, Viewport};

fn gen_temperature(years: i32) -> TemperatureDataset {
    let mut monthly_variance = Vec::with_capacity(years as usize * 12);
    for y in 0..years {
        for month in 1..=12u32 {
            // seasonal wobble with a slow warming drift
            let variance = (month as f64 * 0.5).sin() * 1.5 + y as f64 * 0.004 - 0.6;
            monthly_variance.push(MonthlyVariance { year: 1753 + y, month, variance });
        }
    }
    TemperatureDataset { base_temperature: 8.66, monthly_variance }
}

fn gen_tree(groups: usize, leaves: usize) -> TreeNode {
    let children = (0..groups)
        .map(|g| TreeNode {
            name: format!("platform-{g}"),
            category: None,
            value: None,
            children: (0..leaves)
                .map(|i| TreeNode {
                    name: format!("game-{g}-{i}"),
                    category: Some(format!("platform-{g}")),
                    value: Some(NumberOrText::Number(1.0 + ((g * leaves + i) % 17) as f64)),
                    children: Vec::new(),
                })
                .collect(),
        })
        .collect();
    TreeNode { name: "root".into(), category: None, value: None, children }
}

fn bench_heatmap(c: &mut Criterion) {
    let vp = Viewport::default();
    let mut group = c.benchmark_group("heatmap");
    for &years in &[100i32, 263, 1000] {
        let ds = gen_temperature(years);
        group.bench_with_input(BenchmarkId::new("transform", years), &ds, |b, ds| {
            b.iter(|| black_box(heatmap::transform(ds, &vp).unwrap()));
        });
        let map = heatmap::transform(&ds, &vp).unwrap();
        group.bench_with_input(BenchmarkId::new("svg", years), &map, |b, map| {
            b.iter(|| black_box(svg::render(&map.scene(&vp, &Theme::light()))));
        });
    }
    group.finish();
}

fn bench_treemap(c: &mut Criterion) {
    let vp = Viewport::default();
    let mut group = c.benchmark_group("treemap");
    for &(groups, leaves) in &[(18usize, 6usize), (50, 40)] {
        let tree = gen_tree(groups, leaves);
        group.bench_with_input(BenchmarkId::from_parameter(format!("g{groups}_l{leaves}")), &tree, |b, t| {
            b.iter(|| black_box(treemap::transform(t, &vp).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_heatmap, bench_treemap);
criterion_main!(benches);
