//! Report rendering
//!
//! A [`Renderer`] receives one call per case, in run order, between `begin`
//! and `finish`. [`TableRenderer`] is the default layout; other layouts
//! implement the same trait and are passed to
//! [`Runner::run_with`](crate::Runner::run_with).

use crate::case::TestCase;
use crate::runner::{CaseReport, Outcome, SuiteReport};
use colored::*;
use std::io::{self, Write};
use std::sync::Arc;

/// Column widths for one run, measured over every case in it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    /// Longest case name, in characters
    pub name_width: usize,
    /// Longest description, in characters
    pub description_width: usize,
}

impl Layout {
    pub fn measure(cases: &[Arc<TestCase>]) -> Self {
        cases.iter().fold(Self::default(), |layout, case| Self {
            name_width: layout.name_width.max(case.name().chars().count()),
            description_width: layout
                .description_width
                .max(case.description().chars().count()),
        })
    }
}

/// Renders a run, one row per case
pub trait Renderer {
    /// Called once before the first case runs
    fn begin(&mut self, _layout: &Layout, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    /// Called after each case is processed
    fn row(&mut self, layout: &Layout, case: &CaseReport, out: &mut dyn Write) -> io::Result<()>;

    /// Called once after the last case
    fn finish(
        &mut self,
        _layout: &Layout,
        _report: &SuiteReport,
        _out: &mut dyn Write,
    ) -> io::Result<()> {
        Ok(())
    }
}

/// Default layout: right-aligned `[name] description : LABEL reason` rows
/// followed by a `Result:` line.
pub struct TableRenderer {
    color: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TableRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, outcome: &Outcome) -> String {
        let label = outcome.label();
        if !self.color {
            return label.to_string();
        }
        match outcome {
            Outcome::Pass => label.green().to_string(),
            Outcome::Fail { .. } => label.red().to_string(),
            Outcome::Skipped { .. } => label.yellow().to_string(),
        }
    }
}

impl Renderer for TableRenderer {
    fn row(&mut self, layout: &Layout, case: &CaseReport, out: &mut dyn Write) -> io::Result<()> {
        let name = format!("[{}] ", case.name);
        let description = format!("{} : ", case.description);
        write!(
            out,
            "{:>name_width$}{:>description_width$}{}",
            name,
            description,
            self.paint(&case.outcome),
            name_width = layout.name_width + 4,
            description_width = layout.description_width + 3,
        )?;
        match case.outcome.comment() {
            "" => writeln!(out),
            comment => writeln!(out, " {}", comment),
        }
    }

    fn finish(
        &mut self,
        _layout: &Layout,
        report: &SuiteReport,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let verdict = if !self.color {
            verdict_label(report).normal()
        } else if report.verdict() {
            verdict_label(report).green().bold()
        } else {
            verdict_label(report).red().bold()
        };
        writeln!(out, "Result: {}", verdict)
    }
}

/// `PASS` or `FAIL` for the aggregate verdict
pub fn verdict_label(report: &SuiteReport) -> &'static str {
    if report.verdict() {
        "PASS"
    } else {
        "FAIL"
    }
}
