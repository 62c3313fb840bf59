/// Diagnostic tool to verify dataset → tree → layout pipeline
use std::path::PathBuf;

use anyhow::Context;
use gamesales_treemap::data;
use gamesales_treemap::layout::{compute_layout, LayoutConfig, TileMethod};
use gamesales_treemap::tree;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gamesales_treemap=debug".parse().context("bad log directive")?),
        )
        .init();

    let data_path = std::env::args().nth(1).map(PathBuf::from);

    println!("=== DIAGNOSTIC: Dataset → Tree → Layout Pipeline ===");
    match &data_path {
        Some(path) => println!("Dataset: {}", path.display()),
        None => println!("Dataset: embedded"),
    }

    let dataset = data::load(data_path.as_deref())?;
    println!("\n[1] Dataset loaded: {} leaves", dataset.leaf_count());

    let tree = tree::build_tree(&dataset);
    println!("\n[2] Tree built: {} nodes", tree.len());

    let root_node = tree.get(tree.root);
    println!(
        "    Root: '{}' (value={:.2}, height={})",
        root_node.name, root_node.sum, root_node.height
    );

    println!("\n[3] Top 10 children of root (sorted order):");
    for (i, child_id) in tree.children(tree.root).take(10).enumerate() {
        let child = tree.get(child_id);
        println!(
            "    [{}] '{}' - value {:.2} (height={}, children={})",
            i,
            child.name,
            child.sum,
            child.height,
            tree.children(child_id).count()
        );
    }

    let categories = tree::leaf_categories(&tree);
    println!("\n[4] {} categories: {:?}", categories.len(), categories.iter().collect::<Vec<_>>());

    for tile in [TileMethod::Squarify, TileMethod::Binary] {
        let config = LayoutConfig {
            tile,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&tree, &config);
        let leaves: Vec<_> = layout.leaves(&tree).collect();
        println!("\n[5] {:?}: {} rectangles, {} leaves", tile, layout.rects.len(), leaves.len());

        let mut sorted = leaves.clone();
        sorted.sort_by(|a, b| b.bounds.area().total_cmp(&a.bounds.area()));
        println!("    Top 5 leaves by area:");
        for (i, rect) in sorted.iter().take(5).enumerate() {
            let node = tree.get(rect.node);
            println!(
                "    [{}] '{}' - {:.1}x{:.1} at ({:.1}, {:.1}), aspect {:.2}",
                i,
                node.id,
                rect.width(),
                rect.height(),
                rect.bounds.x0,
                rect.bounds.y0,
                aspect(rect.width(), rect.height())
            );
        }

        let canvas = config.width * config.height;
        let covered: f64 = leaves.iter().map(|r| r.bounds.area()).sum();
        let worst = leaves
            .iter()
            .filter(|r| r.bounds.area() > 0.0)
            .map(|r| aspect(r.width(), r.height()))
            .fold(1.0, f64::max);
        let empty = leaves.iter().filter(|r| r.bounds.area() <= 0.0).count();
        println!("    Leaf coverage: {:.1}% of {:.0}px²", covered / canvas * 100.0, canvas);
        println!("    Worst aspect ratio: {:.2}", worst);
        println!("    Zero-area leaves: {}", empty);
    }

    Ok(())
}

fn aspect(w: f64, h: f64) -> f64 {
    if w <= 0.0 || h <= 0.0 {
        return f64::INFINITY;
    }
    (w / h).max(h / w)
}
