//! Report sinks: where a finished estimate goes when the user prints it.

use std::path::{Path, PathBuf};

use super::pdf::render_estimate_pdf;
use super::EstimateReport;
use crate::errors::CalcResult;
use crate::file_io::write_atomic;

/// A print surface for estimate reports.
///
/// The formatter stays pure; anything with side effects (files, printers,
/// viewers) lives behind this trait.
pub trait ReportSink {
    /// Deliver one report
    fn deliver(&mut self, report: &EstimateReport) -> CalcResult<()>;
}

/// Keeps delivered reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<EstimateReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently delivered report
    pub fn last(&self) -> Option<&EstimateReport> {
        self.reports.last()
    }
}

impl ReportSink for MemorySink {
    fn deliver(&mut self, report: &EstimateReport) -> CalcResult<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// Writes the report text to a file.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TextFileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for TextFileSink {
    fn deliver(&mut self, report: &EstimateReport) -> CalcResult<()> {
        write_atomic(&self.path, report.text.as_bytes())
    }
}

/// Renders the report to PDF and writes it to a file.
#[derive(Debug, Clone)]
pub struct PdfFileSink {
    path: PathBuf,
}

impl PdfFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PdfFileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for PdfFileSink {
    fn deliver(&mut self, report: &EstimateReport) -> CalcResult<()> {
        let pdf = render_estimate_pdf(report)?;
        write_atomic(&self.path, &pdf)
    }
}
