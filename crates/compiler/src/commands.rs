//! Implementations of the `move-ide` subcommands.
//!
//! Each command writes its report to the given writer and returns whether
//! it succeeded, so that `main` only maps the outcome to an exit code.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use move_ide_diagnostics::{DiagnosticCollection, DiagnosticSeverity};
use move_ide_parser::{highlight, parse, SourceFile};
use move_ide_project::{discover_package, MoveIdeToml, MANIFEST_FILE_NAME};
use move_ide_semantic::{declaration_at, find_usages, AnalyzerConfig};
use walkdir::WalkDir;

use crate::compiler_process::CompilerRunner;
use crate::{check_file, format_diagnostics, line_column, offset_of, IdeDatabase};

/// Output format of `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// A cursor position given on the command line: `LINE:COLUMN` (1-based) or
/// a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    LineColumn(usize, usize),
    Offset(usize),
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("invalid position '{s}', expected LINE:COLUMN or a byte offset");
        match s.split_once(':') {
            Some((line, column)) => {
                let line = line.trim().parse().map_err(|_| invalid())?;
                let column = column.trim().parse().map_err(|_| invalid())?;
                Ok(Self::LineColumn(line, column))
            }
            None => s.trim().parse().map(Self::Offset).map_err(|_| invalid()),
        }
    }
}

impl Position {
    /// Byte offset in `text`, if the position lies inside it
    pub fn offset(self, text: &str) -> Option<usize> {
        match self {
            Self::LineColumn(line, column) => offset_of(text, line, column),
            Self::Offset(offset) => (offset <= text.len()).then_some(offset),
        }
    }
}

/// Totals of a `check` run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSummary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl std::fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Checked {} file(s): {} error(s), {} warning(s)",
            self.files, self.errors, self.warnings
        )
    }
}

/// The explicit `--config` file, else the nearest `move-ide.toml` above
/// `start`, else the defaults
pub fn load_config(explicit: Option<&Path>, start: &Path) -> Result<MoveIdeToml> {
    if let Some(path) = explicit {
        return MoveIdeToml::from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()));
    }
    Ok(MoveIdeToml::discover(start)?
        .map(|(_, config)| config)
        .unwrap_or_default())
}

/// Expands command-line paths into Move source files.
///
/// A file is taken as is. A package directory (one holding `Move.toml`)
/// contributes its package sources; any other directory contributes every
/// `.move` file below it. No paths means the current directory.
pub fn input_files(paths: &[PathBuf], current_dir: &Path) -> Result<Vec<PathBuf>> {
    let default = [current_dir.to_owned()];
    let paths = if paths.is_empty() { &default[..] } else { paths };

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.join(MANIFEST_FILE_NAME).is_file() {
            let package = discover_package(path)?
                .with_context(|| format!("No package at {}", path.display()))?;
            files.extend(package.source_files()?);
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
                let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|ext| ext.to_str()) == Some("move")
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            bail!("No such file or directory: {}", path.display());
        }
    }
    Ok(files)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn diagnostics_json(
    path: &Path,
    text: &str,
    diagnostics: &DiagnosticCollection,
) -> Vec<serde_json::Value> {
    diagnostics
        .iter()
        .map(|diagnostic| {
            let (line, column) = line_column(text, diagnostic.span.start);
            serde_json::json!({
                "file": path.display().to_string(),
                "line": line,
                "column": column,
                "start": diagnostic.span.start,
                "end": diagnostic.span.end,
                "severity": diagnostic.severity.to_string(),
                "code": u32::from(diagnostic.code),
                "message": diagnostic.message,
            })
        })
        .collect()
}

/// Reports the syntax and semantic diagnostics of every file
pub fn check(
    files: &[PathBuf],
    config: &AnalyzerConfig,
    format: OutputFormat,
    use_color: bool,
    out: &mut impl Write,
) -> Result<CheckSummary> {
    let db = IdeDatabase::new();
    let mut summary = CheckSummary::default();
    let mut json = Vec::new();

    for path in files {
        let text = read_source(path)?;
        let file = SourceFile::new(&db, text, path.display().to_string());
        let mut diagnostics = check_file(&db, file, config);
        diagnostics.sort();

        summary.files += 1;
        summary.errors += diagnostics.errors().len();
        summary.warnings += diagnostics.warnings().len();

        let text = file.text(&db);
        match format {
            OutputFormat::Human if !diagnostics.is_empty() => {
                writeln!(out, "--> {}", path.display())?;
                writeln!(out, "{}", format_diagnostics(text, &diagnostics, use_color))?;
            }
            OutputFormat::Human => {}
            OutputFormat::Json => json.extend(diagnostics_json(path, text, &diagnostics)),
        }
    }

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out)?;
    }
    Ok(summary)
}

/// Prints every non-whitespace token with its highlight class
pub fn tokens(path: &Path, out: &mut impl Write) -> Result<()> {
    let text = read_source(path)?;
    for (span, class) in highlight(&text) {
        writeln!(
            out,
            "{}..{} {:?} {:?}",
            span.start,
            span.end,
            class,
            &text[span.into_range()]
        )?;
    }
    Ok(())
}

/// Prints the declaration the identifier at `position` refers to. Returns
/// `false` when there is none.
pub fn resolve(path: &Path, position: Position, out: &mut impl Write) -> Result<bool> {
    let text = read_source(path)?;
    let Some(offset) = position.offset(&text) else {
        bail!("Position {position:?} is outside {}", path.display());
    };
    let tree = parse(&text).tree;
    let Some(declaration) = declaration_at(&tree, offset) else {
        writeln!(out, "No declaration found")?;
        return Ok(false);
    };

    let (line, column) = line_column(&text, tree.span(declaration.name_node).start);
    writeln!(
        out,
        "{:?} '{}' at {}:{}:{}",
        declaration.kind,
        declaration.name,
        path.display(),
        line,
        column
    )?;
    Ok(true)
}

/// Prints the usages of the declaration at `position`, one per line with
/// the text of its source line. Returns `false` when there is no
/// declaration.
pub fn usages(path: &Path, position: Position, out: &mut impl Write) -> Result<bool> {
    let text = read_source(path)?;
    let Some(offset) = position.offset(&text) else {
        bail!("Position {position:?} is outside {}", path.display());
    };
    let tree = parse(&text).tree;
    let Some(declaration) = declaration_at(&tree, offset) else {
        writeln!(out, "No declaration found")?;
        return Ok(false);
    };

    let usages = find_usages(&tree, &declaration);
    for usage in &usages {
        let (line, column) = line_column(&text, tree.span(*usage).start);
        let source_line = text.lines().nth(line - 1).unwrap_or_default().trim();
        writeln!(out, "{}:{}:{}: {}", path.display(), line, column, source_line)?;
    }
    writeln!(out, "{} usage(s) of '{}'", usages.len(), declaration.name)?;
    Ok(true)
}

/// Runs the configured compiler in the package enclosing `start` and
/// prints the diagnostics it reports. Returns whether the build succeeded.
pub fn build(start: &Path, config: &MoveIdeToml, out: &mut impl Write) -> Result<bool> {
    let package = discover_package(start)?
        .with_context(|| format!("No {MANIFEST_FILE_NAME} found at or above {}", start.display()))?;
    let runner = CompilerRunner::from_config(&config.compiler).current_dir(&package.root_directory);

    tracing::info!("Building package '{}'", package.name());
    let output = runner.run()?;

    let diagnostics = output.diagnostics();
    for diagnostic in &diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Error)
        .count();

    if output.success() {
        writeln!(out, "Build of '{}' succeeded", package.name())?;
    } else {
        match output.exit_code {
            Some(code) => writeln!(
                out,
                "'{}' failed with exit code {code} ({errors} error(s) reported)",
                runner.command_line()
            )?,
            None => writeln!(out, "'{}' was terminated", runner.command_line())?,
        }
    }
    Ok(output.success())
}
