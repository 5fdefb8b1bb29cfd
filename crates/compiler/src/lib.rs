//! Move IDE driver library
//!
//! Glue between the analysis crates and the `move-ide` command line:
//! configuration mapping, per-file checking through the salsa database,
//! and the adapter around the external Move compiler.

pub mod commands;
pub mod compiler_output;
pub mod compiler_process;
pub mod db;

use move_ide_diagnostics::{build_diagnostic_message, DiagnosticCollection};
use move_ide_parser::{parse_file, SourceFile};
use move_ide_project::MoveIdeToml;
use move_ide_semantic::{analyze, AnalyzerConfig};

pub use compiler_output::{parse_compiler_output, ExternalDiagnostic};
pub use compiler_process::{CompilerOutput, CompilerRunError, CompilerRunner};
pub use db::IdeDatabase;

/// Analyzer settings from the `[analyzer]` section of `move-ide.toml`
pub fn analyzer_config(config: &MoveIdeToml) -> AnalyzerConfig {
    AnalyzerConfig {
        width_mismatch_warnings: config.analyzer.width_mismatch_warnings,
        unresolved_function_errors: config.analyzer.unresolved_function_errors,
        known_functions: config.analyzer.known_functions.clone(),
    }
}

/// Syntax diagnostics of `file` followed by its semantic diagnostics under
/// `config`. The parse is memoized by the database.
pub fn check_file(
    db: &IdeDatabase,
    file: SourceFile,
    config: &AnalyzerConfig,
) -> DiagnosticCollection {
    let _span = tracing::debug_span!("check_file", path = %file.file_path(db)).entered();
    let parsed = parse_file(db, file);
    let mut diagnostics = DiagnosticCollection::from(parsed.diagnostics.clone());
    diagnostics.extend(analyze(&parsed.tree, config));
    diagnostics
}

/// Formats diagnostics for display
pub fn format_diagnostics(
    source_text: &str,
    diagnostics: &DiagnosticCollection,
    use_color: bool,
) -> String {
    diagnostics
        .iter()
        .map(|d| build_diagnostic_message(source_text, d, use_color))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 1-based line and column of a byte offset. Columns count characters.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let line = before.matches('\n').count() + 1;
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Byte offset of a 1-based line and column, if the line exists. A column
/// past the end of the line clamps to the line end.
pub fn offset_of(text: &str, line: usize, column: usize) -> Option<usize> {
    let line_start = if line == 1 {
        0
    } else {
        text.match_indices('\n').nth(line.checked_sub(2)?)?.0 + 1
    };
    let line_text = text[line_start..].split('\n').next().unwrap_or_default();
    let within = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line_text.len(), |(index, _)| index);
    Some(line_start + within)
}
