//! Bar chart rendering of ban frequency per address.
//!
//! This module converts a frequency table into an SVG bar chart and hands
//! back a reference to the stored artifact. It also renders terminal
//! summaries of the top offenders.

pub mod bar_chart;
pub mod renderer;

// Re-export main types
pub use bar_chart::{generate_bar_chart, generate_text_summary, ChartConfig};
pub use renderer::{ChartRenderer, SvgChartRenderer};
