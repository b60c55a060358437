//! Turns a [`SearchResult`] into the two views the user sees: the job list
//! and the top-companies bar chart.
//!
//! Everything here is a pure function of its input. Nothing is filtered,
//! re-sorted or rewritten; order and text come straight from the service.

use std::fmt;

use common::{AnalysisResult, JobRecord, SearchResult};
use serde::Serialize;

pub const JOBS_HEADING: &str = "Jobs Found";
pub const CHART_TITLE: &str = "Top Companies";
pub const CHART_DATASET_LABEL: &str = "Job Count";

/// Width in cells of the longest bar in the text chart.
const BAR_WIDTH: u64 = 40;
const BAR_CELL: char = '#';
const RULE: &str = "----------------------------------------";

/// One job as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobBlock<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
}

impl<'a> From<&'a JobRecord> for JobBlock<'a> {
    fn from(job: &'a JobRecord) -> Self {
        Self {
            title: &job.title,
            company: &job.company,
            location: &job.location,
        }
    }
}

/// The non-empty job list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JobSection<'a> {
    records: &'a [JobRecord],
}

impl<'a> JobSection<'a> {
    /// Display blocks in input order. Can be called any number of times.
    pub fn blocks(&self) -> impl Iterator<Item = JobBlock<'a>> + Clone + use<'a> {
        self.records.iter().map(JobBlock::from)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Category-axis bar chart dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub categories: Vec<String>,
    pub values: Vec<u64>,
}

impl BarChart {
    pub fn bars(&self) -> impl Iterator<Item = (&str, u64)> + Clone {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Both views derived from one result, plus any service notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    pub jobs: Option<JobSection<'a>>,
    pub chart: Option<BarChart>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<&'a str>,
}

impl Page<'_> {
    pub fn is_blank(&self) -> bool {
        self.jobs.is_none() && self.chart.is_none() && self.notices.is_empty()
    }
}

/// `None` when there are no jobs: no section, no placeholder.
pub fn render_jobs(jobs: &[JobRecord]) -> Option<JobSection<'_>> {
    if jobs.is_empty() {
        None
    } else {
        Some(JobSection { records: jobs })
    }
}

/// `None` when the analysis is absent.
pub fn render_chart(analysis: Option<&AnalysisResult>) -> Option<BarChart> {
    let analysis = analysis?;
    let (categories, values): (Vec<String>, Vec<u64>) = analysis
        .top_companies
        .iter()
        .map(|entry| (entry.company().to_string(), entry.count()))
        .unzip();

    Some(BarChart {
        title: CHART_TITLE,
        dataset_label: CHART_DATASET_LABEL,
        categories,
        values,
    })
}

/// Derives the whole page from a single result.
pub fn render(result: &SearchResult) -> Page<'_> {
    let notices = result
        .message
        .iter()
        .chain(result.analysis.iter().flat_map(|a| a.message.iter()))
        .chain(result.warnings.iter())
        .map(String::as_str)
        .collect();

    Page {
        jobs: render_jobs(&result.jobs),
        chart: render_chart(result.analysis.as_ref()),
        notices,
    }
}

impl fmt::Display for JobSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{JOBS_HEADING}")?;
        writeln!(f, "{RULE}")?;
        for block in self.blocks() {
            writeln!(f, "{}", block.title)?;
            writeln!(f, "  Company: {}", block.company)?;
            writeln!(f, "  Location: {}", block.location)?;
            writeln!(f, "{RULE}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.dataset_label)?;

        let label_width = self
            .categories
            .iter()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.values.iter().copied().max().unwrap_or(0);

        for (category, value) in self.bars() {
            let bar: String = std::iter::repeat_n(BAR_CELL, bar_len(value, max)).collect();
            writeln!(f, "{category:<label_width$} | {bar} {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for notice in &self.notices {
            writeln!(f, "{notice}")?;
        }
        if let Some(jobs) = &self.jobs {
            write!(f, "{jobs}")?;
        }
        if let Some(chart) = &self.chart {
            if self.jobs.is_some() {
                writeln!(f)?;
            }
            write!(f, "{chart}")?;
        }
        Ok(())
    }
}

/// Bar length scaled so `max` fills [`BAR_WIDTH`]; any non-zero count gets a cell.
fn bar_len(value: u64, max: u64) -> usize {
    if value == 0 || max == 0 {
        return 0;
    }
    let scaled = u128::from(value) * u128::from(BAR_WIDTH) / u128::from(max);
    scaled.max(1) as usize
}
