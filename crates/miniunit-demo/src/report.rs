//! Pipe-table report layout

use miniunit::{CaseReport, Layout, Outcome, Renderer};
use std::io::{self, Write};

const NAME_WIDTH: usize = 10;
const DESCRIPTION_WIDTH: usize = 30;
const RESULT_WIDTH: usize = 6;
const COMMENT_WIDTH: usize = 20;

/// Renders a run as a Markdown table
///
/// Columns keep a fixed minimum width and grow with the longest name and
/// description in the run.
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    fn widths(layout: &Layout) -> (usize, usize) {
        (
            layout.name_width.max(NAME_WIDTH),
            layout.description_width.max(DESCRIPTION_WIDTH),
        )
    }

    fn result_text(outcome: &Outcome) -> &'static str {
        match outcome {
            Outcome::Pass => "OK",
            Outcome::Fail { .. } => "Fail!",
            Outcome::Skipped { .. } => "Skip",
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn begin(&mut self, layout: &Layout, out: &mut dyn Write) -> io::Result<()> {
        let (name, description) = Self::widths(layout);
        writeln!(
            out,
            "| {:<name$} | {:<description$} | {:<result$} | {:<comment$} |",
            "Test",
            "Description",
            "Result",
            "Comment",
            name = name,
            description = description,
            result = RESULT_WIDTH,
            comment = COMMENT_WIDTH,
        )?;
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            "-".repeat(name),
            "-".repeat(description),
            "-".repeat(RESULT_WIDTH),
            "-".repeat(COMMENT_WIDTH),
        )
    }

    fn row(&mut self, layout: &Layout, case: &CaseReport, out: &mut dyn Write) -> io::Result<()> {
        let (name, description) = Self::widths(layout);
        writeln!(
            out,
            "| {:<name$} | {:<description$} | {:<result$} | {:<comment$} |",
            case.name,
            case.description,
            Self::result_text(&case.outcome),
            case.outcome.comment(),
            name = name,
            description = description,
            result = RESULT_WIDTH,
            comment = COMMENT_WIDTH,
        )
    }
}
