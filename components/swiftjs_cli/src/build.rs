//! Batch compilation of a source directory into sibling output files

use crate::error::{CliError, CliResult};
use crate::session::{write_diagnostics, Session};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where to look for sources and how to name outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory to search
    pub dir: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Extension given to generated files
    pub extension: String,
    /// Extension identifying source files
    pub source_extension: String,
}

impl BuildOptions {
    /// Options for a non-recursive `.swift` to `.js` build of `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            recursive: false,
            extension: "js".to_string(),
            source_extension: "swift".to_string(),
        }
    }

    /// Enable or disable descending into subdirectories
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Name of the entry-point file that is never compiled
    fn entry_point(&self) -> String {
        format!("main.{}", self.source_extension)
    }
}

/// Outcome counts of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files whose output was written
    pub built: usize,
    /// Files that could not be read or tokenized
    pub failed: usize,
    /// Syntax diagnostics across all built files
    pub diagnostics: usize,
}

impl BuildReport {
    /// True if nothing failed and no diagnostics were reported
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.diagnostics == 0
    }
}

/// Find the source files a build would compile, sorted by path
///
/// # Errors
/// Returns `CliError::Walk` if the directory cannot be traversed
pub fn discover_sources(options: &BuildOptions) -> CliResult<Vec<PathBuf>> {
    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let entry_point = options.entry_point();

    let mut sources = Vec::new();
    for entry in WalkDir::new(&options.dir).max_depth(max_depth) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches_extension = entry
            .path()
            .extension()
            .map(|ext| ext == options.source_extension.as_str())
            .unwrap_or(false);
        if matches_extension && entry.file_name() != entry_point.as_str() {
            sources.push(entry.into_path());
        }
    }

    sources.sort();
    tracing::debug!(dir = %options.dir.display(), count = sources.len(), "discovered sources");
    Ok(sources)
}

/// Compile every discovered source, writing `stem.<extension>` beside it.
///
/// Progress goes to `out` and diagnostics to `err`. A file that fails to
/// read or tokenize is reported and skipped; the rest of the build
/// continues.
pub fn run_build(
    session: &Session,
    options: &BuildOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<BuildReport> {
    let sources = discover_sources(options)?;
    let mut report = BuildReport::default();

    if sources.is_empty() {
        writeln!(
            out,
            "No .{} files found to build in {}",
            options.source_extension,
            options.dir.display()
        )?;
        return Ok(report);
    }

    for source in &sources {
        let compilation = match session.compile_file(source) {
            Ok(compilation) => compilation,
            Err(error @ (CliError::Lex(_) | CliError::Io(_))) => {
                tracing::warn!(path = %source.display(), %error, "skipping file");
                writeln!(err, "{}: {}", source.display(), error)?;
                report.failed += 1;
                continue;
            }
            Err(error) => return Err(error),
        };

        write_diagnostics(&compilation.diagnostics, Some(source), err)?;
        report.diagnostics += compilation.diagnostics.len();

        let target = output_path(source, &options.extension);
        std::fs::write(&target, compilation.output + "\n")?;
        report.built += 1;
        writeln!(out, "Built {}", display_name(&target))?;
    }

    tracing::info!(
        built = report.built,
        failed = report.failed,
        diagnostics = report.diagnostics,
        "build finished"
    );
    Ok(report)
}

fn output_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(
            output_path(Path::new("dir/point.swift"), "js"),
            PathBuf::from("dir/point.js")
        );
        assert_eq!(
            output_path(Path::new("a.b.swift"), "mjs"),
            PathBuf::from("a.b.mjs")
        );
    }

    #[test]
    fn test_report_success() {
        assert!(BuildReport::default().is_success());
        let report = BuildReport {
            built: 1,
            failed: 0,
            diagnostics: 1,
        };
        assert!(!report.is_success());
    }

    #[test]
    fn test_entry_point_follows_source_extension() {
        let mut options = BuildOptions::new(".");
        assert_eq!(options.entry_point(), "main.swift");
        options.source_extension = "sw".to_string();
        assert_eq!(options.entry_point(), "main.sw");
    }
}
