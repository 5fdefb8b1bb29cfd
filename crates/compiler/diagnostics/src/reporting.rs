//! # Diagnostic Rendering
//!
//! Renders diagnostics as annotated source snippets with `ariadne`.

use crate::Diagnostic;
use ariadne::{Label, Report, Source};

/// Build the ariadne report for a diagnostic
pub fn build_diagnostic_report(
    diagnostic: &Diagnostic,
    with_color: bool,
) -> Report<'static, ((), std::ops::Range<usize>)> {
    let code_u32: u32 = diagnostic.code.into();
    let mut builder = Report::build(
        diagnostic.severity.into(),
        ((), diagnostic.span.into_range()),
    )
    .with_config(
        ariadne::Config::new()
            .with_index_type(ariadne::IndexType::Byte)
            .with_color(with_color),
    )
    .with_code(code_u32)
    .with_message(&diagnostic.message)
    .with_label(Label::new(((), diagnostic.span.into_range())).with_message(&diagnostic.message));

    for (span, note) in &diagnostic.related_spans {
        builder = builder.with_label(Label::new(((), span.into_range())).with_message(note));
    }

    builder.finish()
}

/// Build a formatted message for a diagnostic against its source text
pub fn build_diagnostic_message(source: &str, diagnostic: &Diagnostic, with_color: bool) -> String {
    let mut write_buffer = Vec::new();
    let report = build_diagnostic_report(diagnostic, with_color);
    if report.write(Source::from(source), &mut write_buffer).is_err() {
        // Writing into a Vec only fails on malformed spans; fall back to the plain form.
        return diagnostic.to_string();
    }
    String::from_utf8_lossy(&write_buffer).to_string()
}
