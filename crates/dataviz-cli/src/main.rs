// File: crates/dataviz-cli/src/main.rs
// Summary: `dataviz` CLI; renders a chart kind to SVG (and optionally PNG/CSV) or prints the tooltip under a point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dataviz_core::theme;
use dataviz_core::{Chart, ChartConfig, ChartKind, ConfigOverrides, DefaultSource, PointerEvent, TooltipState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dataviz", version, about = "Render freeCodeCamp-style data visualizations")]
struct Cli {
    /// Debug-level logging (RUST_LOG still wins when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a dataset and write the chart.
    Render(RenderArgs),
    /// Print the tooltip shown for a pointer position on the canvas.
    Hover(HoverArgs),
    /// List chart kinds and their default data URLs.
    Kinds,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Chart kind: bar, scatter, heat-map, choropleth, treemap.
    kind: ChartKind,
    /// JSON config file with dataUrl/topologyUrl/width/height/padding.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset URL or local path.
    #[arg(long)]
    data: Option<String>,
    /// County topology URL or local path (choropleth only).
    #[arg(long)]
    topology: Option<String>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    padding: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// SVG output path; defaults to target/out/chart_<kind>.svg.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also export the computed geometry as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Also rasterize to PNG (requires the `png` feature).
    #[arg(long)]
    png: Option<PathBuf>,
    /// Theme preset: light, dark, solarized-light.
    #[arg(long, default_value = "light")]
    theme: String,
}

#[derive(Args, Debug)]
struct HoverArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Canvas position as `x,y`.
    #[arg(long, value_parser = parse_point)]
    at: (f64, f64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Hover(args) => handle_hover(args),
        Command::Kinds => {
            for kind in ChartKind::ALL {
                let cfg = ChartConfig::for_kind(kind);
                println!("{:<11} {}", kind.name(), cfg.data_url);
                if let Some(t) = cfg.topology_url {
                    println!("{:<11} {t}", "");
                }
            }
            Ok(())
        }
    }
}

fn handle_render(args: RenderArgs) -> Result<()> {
    let chart = load(&args.source)?;
    let theme = theme::find(&args.theme);

    let out = args.out.unwrap_or_else(|| out_name_for(chart.kind(), "svg"));
    chart
        .render_to_svg(&theme, &out)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());

    if let Some(path) = &args.csv {
        ensure_parent(path)?;
        let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        chart.write_csv(file).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = &args.png {
        write_png(&chart, &theme, path)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_hover(args: HoverArgs) -> Result<()> {
    let chart = load(&args.source)?;
    let mut state = TooltipState::new();
    let (x, y) = args.at;
    match chart.hover(&mut state, PointerEvent::at(x, y)) {
        Some(tip) => {
            println!("{}", tip.body.plain_text());
            for (k, v) in &tip.body.attributes {
                println!("{k}={v}");
            }
            println!("anchor: ({}, {})", tip.left, tip.top);
        }
        None => println!("no record under ({x}, {y})"),
    }
    Ok(())
}

/// Defaults for the kind, then the config file, then flags.
fn load(src: &SourceArgs) -> Result<Chart> {
    let mut overrides = match &src.config {
        Some(p) => ConfigOverrides::from_path(p).with_context(|| format!("reading config {}", p.display()))?,
        None => ConfigOverrides::default(),
    };
    overrides = overrides.merged(ConfigOverrides {
        data_url: src.data.clone(),
        topology_url: src.topology.clone(),
        width: src.width,
        height: src.height,
        padding: src.padding,
    });
    let config = ChartConfig::for_kind(src.kind).with_overrides(&overrides);
    info!(kind = %src.kind, url = %config.data_url, "loading chart");

    let source = DefaultSource::new()?;
    let chart = Chart::load(src.kind, config, &source).with_context(|| format!("loading {} chart", src.kind))?;
    Ok(chart)
}

#[cfg(feature = "png")]
fn write_png(chart: &Chart, theme: &dataviz_core::Theme, path: &Path) -> Result<()> {
    dataviz_render_skia::render_to_png(&chart.scene(theme), path)
}

#[cfg(not(feature = "png"))]
fn write_png(_chart: &Chart, _theme: &dataviz_core::Theme, path: &Path) -> Result<()> {
    anyhow::bail!("cannot write {}: rebuild with `--features png` for raster output", path.display())
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok((x, y))
}

/// Produce output file name like target/out/chart_<kind>.<ext>
fn out_name_for(kind: ChartKind, ext: &str) -> PathBuf {
    PathBuf::from("target/out").join(format!("chart_{}.{ext}", kind.name()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
