//! Standalone HTML scatter export for recovered point colors.
//!
//! The interactive rendering itself happens in the browser (Plotly via CDN);
//! this module only embeds the already-computed coordinate and color arrays
//! as a JSON payload inside a self-contained page.

use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct ScatterPayload<'a> {
    x: &'a [f32],
    y: &'a [f32],
    z: &'a [f32],
    colors: &'a [String],
}

/// Format recovered RGB channels (floating point, 0..255) as Plotly color
/// strings, truncating each channel to an integer.
pub fn format_colors(r: &[f32], g: &[f32], b: &[f32]) -> Vec<String> {
    (0..r.len())
        .map(|i| format!("rgb({}, {}, {})", r[i] as u8, g[i] as u8, b[i] as u8))
        .collect()
}

/// Write a self-contained interactive scatter page for the given points.
pub fn write_html(
    path: &Path,
    x: &[f32],
    y: &[f32],
    z: &[f32],
    colors: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = serde_json::to_string(&ScatterPayload { x, y, z, colors })?;

    let mut html = String::with_capacity(PAGE_PREFIX.len() + payload.len() + PAGE_SUFFIX.len());
    html.push_str(PAGE_PREFIX);
    html.push_str(&payload);
    html.push_str(PAGE_SUFFIX);

    fs::write(path, html)?;
    Ok(())
}

const PAGE_PREFIX: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>3DGS Point Cloud Extracted from Spherical Harmonics</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
</head>
<body>
<div id="scatter" style="width:100vw;height:100vh;"></div>
<script>
const points = "#;

const PAGE_SUFFIX: &str = r#";
const trace = {
    type: "scatter3d",
    mode: "markers",
    x: points.x,
    y: points.y,
    z: points.z,
    marker: { size: 2, color: points.colors, opacity: 0.8 }
};
const layout = {
    title: "3DGS Point Cloud Extracted from Spherical Harmonics",
    scene: {
        xaxis: { title: "X" },
        yaxis: { title: "Y" },
        zaxis: { title: "Z" },
        aspectmode: "data"
    },
    margin: { l: 0, r: 0, b: 0, t: 40 }
};
Plotly.newPlot("scatter", [trace], layout);
</script>
</body>
</html>
"#;
