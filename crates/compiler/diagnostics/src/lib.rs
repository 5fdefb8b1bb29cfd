//! Diagnostics shared by the Move parser, the semantic analyzer and the
//! command-line driver.

mod diagnostics;
mod reporting;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollection, DiagnosticSeverity};
pub use reporting::{build_diagnostic_message, build_diagnostic_report};
