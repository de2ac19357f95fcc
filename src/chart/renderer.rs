//! Chart renderers that persist a chart and return a reference to it.

use super::bar_chart::{generate_bar_chart, ChartConfig};
use crate::aggregator::FrequencyTable;
use crate::output::write_svg;
use crate::utils::config::{DEFAULT_CHART_DIR, DEFAULT_CHART_FILENAME, DEFAULT_GRAPH_URL_PREFIX};
use crate::utils::error::ChartError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Turns a frequency table into a stored chart
pub trait ChartRenderer {
    /// Render `table` and return a reference (path or URL) to the artifact.
    ///
    /// An empty table renders nothing and returns an empty reference.
    fn render(&self, table: &FrequencyTable) -> Result<String, ChartError>;
}

/// Writes an SVG bar chart to a fixed file and returns its public URL
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    output_dir: PathBuf,
    file_name: String,
    url_prefix: String,
    chart: ChartConfig,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_CHART_DIR),
            file_name: DEFAULT_CHART_FILENAME.to_string(),
            url_prefix: DEFAULT_GRAPH_URL_PREFIX.to_string(),
            chart: ChartConfig::default(),
        }
    }
}

impl SvgChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_url_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = url_prefix.into();
        self
    }

    pub fn with_chart_config(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }

    /// Path the chart is written to
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Public reference returned to callers
    pub fn graph_url(&self) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), self.file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, table: &FrequencyTable) -> Result<String, ChartError> {
        if table.is_empty() {
            debug!("No ban events, skipping chart");
            return Ok(String::new());
        }

        let svg = generate_bar_chart(table, &self.chart)?;
        let path = self.output_path();
        write_svg(&svg, &path)?;

        info!("Chart saved to {}", path.display());
        Ok(self.graph_url())
    }
}
