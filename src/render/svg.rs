//! Static SVG and HTML output.

use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::{Chart, Tile};
use crate::ui::tooltip::{format_value, Tooltip, TooltipConfig};

/// Treemap as a standalone `<svg id="tree-map">` document.
pub fn render_treemap_svg(chart: &Chart) -> String {
    let mut svg = String::new();
    let width = fmt_num(chart.width());
    let height = fmt_num(chart.height());

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"tree-map\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    for tile in &chart.tiles {
        svg.push_str(&tile_svg(chart, tile));
    }
    svg.push_str("</svg>");
    svg
}

fn tile_svg(chart: &Chart, tile: &Tile) -> String {
    let labels = &chart.config.labels;
    let mut group = format!(
        "<g class=\"group\" transform=\"translate({},{})\">",
        fmt_num(tile.bounds.x0),
        fmt_num(tile.bounds.y0)
    );
    group.push_str(&format!(
        "<rect id=\"{}\" class=\"tile\" width=\"{}\" height=\"{}\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\" fill=\"{}\"/>",
        escape_xml(&tile.id),
        fmt_num(tile.width()),
        fmt_num(tile.height()),
        escape_xml(&tile.name),
        escape_xml(tile.category.as_deref().unwrap_or("")),
        format_value(tile.value),
        tile.fill.to_hex()
    ));
    group.push_str(&format!(
        "<title>{}</title>",
        escape_xml(&tile.tooltip_content().lines().join("\n"))
    ));

    group.push_str(&format!(
        "<text class=\"tile-text\" font-size=\"{}\">",
        labels.font_size
    ));
    for (i, line) in tile.label.iter().enumerate() {
        group.push_str(&format!(
            "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
            fmt_num(labels.x),
            fmt_num(labels.line_y(i)),
            escape_xml(line)
        ));
    }
    group.push_str("</text></g>");
    group
}

/// Legend as a standalone `<svg id="legend">` document.
pub fn render_legend_svg(chart: &Chart) -> String {
    let legend = &chart.legend;
    let config = &legend.config;
    let (text_x, text_y) = legend.text_offset();
    let rect = fmt_num(config.rect_size);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"legend\" width=\"{}\" height=\"{}\">",
        fmt_num(config.width),
        fmt_num(legend.height())
    );
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">",
        fmt_num(config.offset_x),
        fmt_num(config.offset_y)
    ));
    for item in &legend.items {
        svg.push_str(&format!(
            "<g transform=\"translate({},{})\"><rect class=\"legend-item\" width=\"{rect}\" height=\"{rect}\" fill=\"{}\"/><text x=\"{}\" y=\"{}\">{}</text></g>",
            fmt_num(item.x),
            fmt_num(item.y),
            item.fill.to_hex(),
            fmt_num(text_x),
            fmt_num(text_y),
            escape_xml(&item.category)
        ));
    }
    svg.push_str("</g></svg>");
    svg
}

/// The `#tooltip` element in the given state.
pub fn render_tooltip_html(tooltip: &Tooltip) -> String {
    let (x, y) = tooltip.position();
    let data_value = tooltip
        .data_value()
        .map(|v| format!(" data-value=\"{}\"", escape_xml(&v)))
        .unwrap_or_default();
    let body = tooltip
        .text()
        .map(|text| {
            text.lines()
                .map(escape_xml)
                .collect::<Vec<_>>()
                .join("<br>")
        })
        .unwrap_or_default();
    format!(
        "<div id=\"tooltip\" class=\"tooltip\"{data_value} style=\"opacity: {}; left: {}px; top: {}px;\">{body}</div>",
        tooltip.opacity(),
        fmt_num(x),
        fmt_num(y)
    )
}

/// Complete page: heading, description, treemap, legend and a hidden tooltip.
pub fn render_html(chart: &Chart) -> String {
    let title = escape_xml(&chart.config.title);
    let description = escape_xml(&chart.config.description);
    let tooltip = Tooltip::new(chart.config.tooltip);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1 id=\"title\">{title}</h1>\n"));
    html.push_str(&format!("<div id=\"description\">{description}</div>\n"));
    html.push_str(&render_treemap_svg(chart));
    html.push('\n');
    html.push_str(&render_legend_svg(chart));
    html.push('\n');
    html.push_str(&render_tooltip_html(&tooltip));
    html.push('\n');
    html.push_str(&tooltip_script(&chart.config.tooltip));
    html.push_str("</body>\n</html>\n");
    html
}

/// Pointer handlers for the page: show `#tooltip` beside the pointer while it
/// is over a tile, hide it when the pointer leaves.
fn tooltip_script(config: &TooltipConfig) -> String {
    TOOLTIP_SCRIPT
        .replace("{offset_x}", &fmt_num(config.offset_x))
        .replace("{offset_y}", &fmt_num(config.offset_y))
        .replace("{opacity}", &config.opacity.to_string())
}

const TOOLTIP_SCRIPT: &str = r##"<script>
(function () {
  var tooltip = document.getElementById("tooltip");
  function escape(text) {
    return String(text).replace(/&/g, "&amp;").replace(/</g, "&lt;").replace(/>/g, "&gt;");
  }
  document.querySelectorAll("#tree-map rect.tile").forEach(function (tile) {
    tile.addEventListener("mousemove", function (event) {
      var value = tile.getAttribute("data-value");
      tooltip.innerHTML =
        "Name: " + escape(tile.getAttribute("data-name")) +
        "<br>Category: " + escape(tile.getAttribute("data-category")) +
        "<br>Value: " + escape(value);
      tooltip.setAttribute("data-value", value);
      tooltip.style.left = (event.pageX + {offset_x}) + "px";
      tooltip.style.top = (event.pageY + {offset_y}) + "px";
      tooltip.style.opacity = {opacity};
    });
    tile.addEventListener("mouseout", function () {
      tooltip.style.opacity = 0;
      tooltip.removeAttribute("data-value");
    });
  });
})();
</script>
"##;

const STYLE: &str = "<style>
body { font-family: sans-serif; text-align: center; }
.tile-text { pointer-events: none; }
#legend text { font-size: 12px; }
.tooltip { position: absolute; padding: 6px; background: rgba(255, 255, 204, 0.9); border-radius: 3px; font-size: 12px; pointer-events: none; text-align: left; }
</style>
";

/// Write to `output`, or to stdout when no path is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            print!("{}", text);
        }
    }
    Ok(())
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// At most two decimals, trailing zeros dropped.
fn fmt_num(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
