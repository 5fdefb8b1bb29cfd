//! Scrapes diagnostics out of the textual output of the Move compiler.
//!
//! Two shapes are recognized:
//!
//! ```text
//! sources/bank.move:12:5: error: unbound variable 'x'
//! ```
//!
//! and the multi-line form, whose location follows the header within
//! [`LOCATION_SEARCH_WINDOW`] lines:
//!
//! ```text
//! error[E03003]: unbound module
//!   ┌─ ./sources/bank.move:5:9
//! ```
//!
//! Everything else in the output is ignored.

use std::sync::LazyLock;

use move_ide_diagnostics::DiagnosticSeverity;
use regex::{Captures, Regex};

/// How many lines after a header may hold its location
pub const LOCATION_SEARCH_WINDOW: usize = 5;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap());

static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<file>[^\s:][^:]*):(?P<line>\d+):(?P<column>\d+):\s*(?P<severity>error|warning):\s*(?P<message>.*)$",
    )
    .unwrap()
});

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<severity>error|warning)\[(?P<code>[^\]]+)\]:\s*(?P<message>.*)$").unwrap()
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<file>[^\s:│┌─]+):(?P<line>\d+):(?P<column>\d+)").unwrap()
});

/// A diagnostic reported by the external compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDiagnostic {
    pub file: String,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub message: String,
    pub severity: DiagnosticSeverity,
    /// Compiler error code of the multi-line form, e.g. `E03003`
    pub code: Option<String>,
}

impl std::fmt::Display for ExternalDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.severity)?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

fn severity(captures: &Captures<'_>) -> DiagnosticSeverity {
    match &captures["severity"] {
        "warning" => DiagnosticSeverity::Warning,
        _ => DiagnosticSeverity::Error,
    }
}

/// File, line and column of a match; `None` if a number overflows
fn location(captures: &Captures<'_>) -> Option<(String, usize, usize)> {
    Some((
        captures["file"].to_string(),
        captures["line"].parse().ok()?,
        captures["column"].parse().ok()?,
    ))
}

/// All diagnostics found in `output`, in output order
pub fn parse_compiler_output(output: &str) -> Vec<ExternalDiagnostic> {
    let lines: Vec<_> = output
        .lines()
        .map(|line| ANSI_ESCAPE.replace_all(line, ""))
        .collect();
    let mut diagnostics = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if let Some(captures) = INLINE.captures(line) {
            if let Some((file, line, column)) = location(&captures) {
                diagnostics.push(ExternalDiagnostic {
                    file,
                    line,
                    column,
                    message: captures["message"].trim().to_string(),
                    severity: severity(&captures),
                    code: None,
                });
            }
            continue;
        }

        let Some(header) = HEADER.captures(line) else {
            continue;
        };
        // The location belongs to this header only if no other diagnostic
        // starts first.
        let found = lines[index + 1..]
            .iter()
            .take(LOCATION_SEARCH_WINDOW)
            .take_while(|next| !HEADER.is_match(next) && !INLINE.is_match(next))
            .find_map(|next| LOCATION.captures(next).and_then(|caps| location(&caps)));
        match found {
            Some((file, line, column)) => diagnostics.push(ExternalDiagnostic {
                file,
                line,
                column,
                message: header["message"].trim().to_string(),
                severity: severity(&header),
                code: Some(header["code"].to_string()),
            }),
            None => tracing::debug!("No location for compiler message: {}", line),
        }
    }

    diagnostics
}
