use gamesales_treemap::chart::Chart;
use gamesales_treemap::config::ChartConfig;
use gamesales_treemap::data::{self, DatasetNode};
use gamesales_treemap::render::svg;
use gamesales_treemap::ui::input::{process_pointer, MouseState, PointerEvent};
use gamesales_treemap::ui::tooltip::Tooltip;

const WII_SPORTS: &str = r#"{
  "name": "Platforms",
  "children": [
    {
      "name": "Wii",
      "children": [
        { "name": "Wii Sports", "category": "Sports", "value": "100" }
      ]
    }
  ]
}"#;

#[test]
fn single_game_renders_one_full_tile_with_tooltip() {
    let dataset = data::from_json_str(WII_SPORTS).unwrap();
    let chart = Chart::build(&dataset, &ChartConfig::default());

    assert_eq!(chart.tiles.len(), 1);
    let tile = &chart.tiles[0];
    assert_eq!(tile.id, "Platforms.Wii.Wii Sports");
    assert!((tile.width() - 960.0).abs() < 1e-9);
    assert!((tile.height() - 570.0).abs() < 1e-9);
    assert_eq!(tile.fill.to_css(), "rgb(76, 146, 195)");

    let mut mouse = MouseState::default();
    let mut tooltip = Tooltip::new(chart.config.tooltip);
    process_pointer(
        PointerEvent::Move { x: 480.0, y: 285.0 },
        &chart.tiles,
        &mut mouse,
        &mut tooltip,
    );
    let text = tooltip.text().unwrap();
    assert!(text.contains("Name: Wii Sports"));
    assert!(text.contains("Category: Sports"));
    assert!(text.contains("Value: 100"));
    assert_eq!(tooltip.data_value().as_deref(), Some("100"));

    process_pointer(PointerEvent::Leave, &chart.tiles, &mut mouse, &mut tooltip);
    assert_eq!(tooltip.opacity(), 0.0);
}

#[test]
fn embedded_dataset_page() {
    let dataset = data::embedded().unwrap();
    let chart = Chart::build(&dataset, &ChartConfig::default());
    let html = svg::render_html(&chart);

    assert_eq!(html.matches("class=\"tile\"").count(), dataset.leaf_count());
    assert_eq!(html.matches("class=\"legend-item\"").count(), 18);

    // The biggest platform is tiled first, top-left.
    let first = &chart.tiles[0];
    assert!(first.bounds.x0.abs() < 1e-9);
    assert!(first.bounds.y0.abs() < 1e-9);
    assert_eq!(first.category.as_deref(), Some("Wii"));
}

#[test]
fn label_lines_follow_camel_case() {
    let dataset = DatasetNode::group(
        "Platforms",
        vec![DatasetNode::group(
            "PS2",
            vec![DatasetNode::leaf("GrandTheftAutoV", "PS2", 20.0)],
        )],
    );
    let chart = Chart::build(&dataset, &ChartConfig::default());
    assert_eq!(chart.tiles[0].label, vec!["Grand", "Theft", "Auto", "V"]);

    let svg = svg::render_treemap_svg(&chart);
    assert!(svg.contains("<tspan x=\"4\" y=\"43\">V</tspan>"));
}
