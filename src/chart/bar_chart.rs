//! SVG bar chart generation.
//!
//! One bar per address, in table order, with rotated address labels along
//! the x axis and integer ticks on the y axis.

use crate::aggregator::{top_offenders, FrequencyTable};
use crate::utils::config::{
    BAR_COLOR, CHART_TITLE, CHART_X_LABEL, CHART_Y_LABEL, DEFAULT_CHART_HEIGHT,
    DEFAULT_CHART_WIDTH,
};
use crate::utils::error::ChartError;
use log::info;

// Plot margins in pixels
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 140.0;

/// Share of each bar slot filled by the bar
const BAR_FILL: f64 = 0.8;
const Y_TICKS: u64 = 5;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            x_label: CHART_X_LABEL.to_string(),
            y_label: CHART_Y_LABEL.to_string(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Generate an SVG bar chart from a frequency table
///
/// **Public** - pure generator, writes nothing to disk
///
/// # Errors
/// * `ChartError::EmptyTable` - nothing to plot
pub fn generate_bar_chart(table: &FrequencyTable, config: &ChartConfig) -> Result<String, ChartError> {
    if table.is_empty() {
        return Err(ChartError::EmptyTable);
    }

    info!("Generating bar chart for {} addresses", table.len());

    let width = config.width as f64;
    let height = config.height as f64;
    let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let baseline = MARGIN_TOP + plot_height;

    let (tick_step, y_max) = y_axis_scale(table.max_count());
    let scale = plot_height / y_max as f64;
    let slot = plot_width / table.len() as f64;

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(
        r#"<style>.bar:hover { stroke: black; stroke-width: 1; opacity: 0.9; } text { font-family: sans-serif; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));

    // Title
    svg.push_str(&format!(
        r#"<text x="{:.2}" y="30" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2.0,
        escape_xml(&config.title)
    ));

    // Y axis ticks and grid
    let mut tick = 0;
    while tick <= y_max {
        let y = baseline - tick as f64 * scale;
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="rgb(220, 220, 220)"/>"#,
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_width,
            y
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end" dy="4">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y,
            tick
        ));
        tick += tick_step;
    }

    // Bars and rotated labels
    for (i, (ip, count)) in table.iter().enumerate() {
        let bar_height = count as f64 * scale;
        let x = MARGIN_LEFT + i as f64 * slot + slot * (1.0 - BAR_FILL) / 2.0;
        let label = escape_xml(ip);

        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" class="bar"><title>{} ({} bans)</title></rect>"#,
            x,
            baseline - bar_height,
            slot * BAR_FILL,
            bar_height,
            BAR_COLOR,
            label,
            count
        ));

        let label_x = MARGIN_LEFT + (i as f64 + 0.5) * slot;
        let label_y = baseline + 14.0;
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="11" text-anchor="end" transform="rotate(-45 {x:.2} {y:.2})">{label}</text>"#,
            x = label_x,
            y = label_y,
            label = label
        ));
    }

    // Axes
    svg.push_str(&format!(
        r#"<line x1="{l:.2}" y1="{t:.2}" x2="{l:.2}" y2="{b:.2}" stroke="black"/><line x1="{l:.2}" y1="{b:.2}" x2="{r:.2}" y2="{b:.2}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = baseline,
        r = MARGIN_LEFT + plot_width
    ));

    // Axis labels
    svg.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-size="13" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + plot_width / 2.0,
        height - 12.0,
        escape_xml(&config.x_label)
    ));
    let y_label_y = MARGIN_TOP + plot_height / 2.0;
    svg.push_str(&format!(
        r#"<text x="18" y="{y:.2}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {y:.2})">{}</text>"#,
        escape_xml(&config.y_label),
        y = y_label_y
    ));

    svg.push_str("</svg>");

    info!("Bar chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Integer tick step and axis maximum covering `max_count`
fn y_axis_scale(max_count: u64) -> (u64, u64) {
    let max_count = max_count.max(1);
    let step = max_count.div_ceil(Y_TICKS).max(1);
    (step, max_count.div_ceil(step) * step)
}

/// Escape text for use inside SVG elements
///
/// Extracted addresses are unvalidated tokens, so anything can show up here.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Create a text summary of the top offenders with percentages
pub fn generate_text_summary(table: &FrequencyTable, max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  BANNED ADDRESSES (Most Banned First)".to_string());
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━┓".to_string());
    lines.push(format!("  ┃ {:<42} ┃ {:^8} ┃ {:^7} ┃", "IP Address", "BANS", "%"));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━┫".to_string());

    let offenders = top_offenders(table, max_lines);

    for offender in &offenders {
        lines.push(format!(
            "  ┃ {:<42} ┃ {:>8} ┃ {:>6.1}% ┃",
            truncate_label(&offender.ip_address, 42),
            offender.count,
            offender.percentage
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━┛".to_string());

    // Horizontal bars scaled to the most banned address
    let max_count = table.max_count().max(1);
    lines.push(String::new());
    for offender in offenders.iter().take(5) {
        let bar_width = (offender.count * 50 / max_count) as usize;
        lines.push(format!(
            "  {:<20} {:<50} {:>5}",
            truncate_label(&offender.ip_address, 20),
            "█".repeat(bar_width),
            offender.count
        ));
    }

    if table.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} addresses)",
            max_lines,
            table.len()
        ));
    }

    lines.join("\n")
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
