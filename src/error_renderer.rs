//! Error rendering using miette's graphical report handler.

use std::io::Write;

use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::Error;

/// Render an error with formatting to stderr
pub fn render_error(error: &Error) {
    render_error_to(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer.
pub fn render_error_to(error: &Error, writer: &mut dyn Write, use_color: bool) -> std::io::Result<()> {
    writer.write_all(render(error, use_color).as_bytes())
}

/// Render an error to a String without color codes (useful for tests and logs)
///
/// # Example
/// ```
/// use enigma::{CompileError, Error, render_error_to_string};
///
/// let output = render_error_to_string(&Error::from(CompileError::EmptyTree));
/// assert!(output.contains("enigma::compile::empty_tree"));
/// ```
pub fn render_error_to_string(error: &Error) -> String {
    render(error, false)
}

fn render(error: &Error, use_color: bool) -> String {
    let theme = if use_color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut out, error)
        .is_err()
    {
        // The handler only fails on formatter errors; fall back to the message.
        out = format!("{error}\n");
    }
    out
}
