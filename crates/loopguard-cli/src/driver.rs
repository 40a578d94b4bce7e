//! File discovery, parallel linting and exit status.

use anyhow::{Context, Result, bail};
use loopguard_lint::{LintResult, dump_scopes, lint_source};
use rayon::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};
use walkdir::WalkDir;

use crate::args::{CliArgs, OutputFormat};
use crate::config::{FileFilter, LoopguardConfig, find_config, load_config};
use crate::reporter::{Reporter, render_json};

/// No problems, or only warnings within `--max-warnings`.
pub const EXIT_SUCCESS: u8 = 0;
/// Errors were reported, or too many warnings.
pub const EXIT_LINT_ERRORS: u8 = 1;
/// Bad arguments, unreadable files or an invalid config.
pub const EXIT_FAILURE: u8 = 2;

/// Lint outcome of one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Path as shown in output, relative to the working directory when
    /// possible
    pub display_name: String,
    pub source: String,
    pub result: LintResult,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: String,
    pub error_count: usize,
    pub warning_count: usize,
    pub exit_code: u8,
}

pub fn run(args: &CliArgs, cwd: &Path, color: bool) -> Result<RunSummary> {
    let mut config = resolve_config(args, cwd)?;
    config.apply_global_flags(&args.globals)?;
    let filter = config.file_filter()?;
    let files = discover_files(&args.paths, cwd, &filter)?;
    debug!(files = files.len(), "discovered files");

    if args.print_scopes {
        return print_scopes(&files, &config, cwd);
    }

    let mut reports = lint_files(&files, &config, cwd)?;
    if args.quiet {
        for report in &mut reports {
            report.result.diagnostics.retain(|d| d.is_error());
        }
    }

    let error_count: usize = reports.iter().map(|r| r.result.error_count()).sum();
    let warning_count: usize = reports.iter().map(|r| r.result.warning_count()).sum();
    let output = match args.format {
        OutputFormat::Text => Reporter::new(color).render(&reports),
        OutputFormat::Json => render_json(&reports)?,
    };

    let too_many_warnings = args.max_warnings.is_some_and(|max| warning_count > max);
    let exit_code = if error_count > 0 || too_many_warnings {
        EXIT_LINT_ERRORS
    } else {
        EXIT_SUCCESS
    };
    Ok(RunSummary {
        output,
        error_count,
        warning_count,
        exit_code,
    })
}

/// `--config`, else the nearest `loopguard.json`, else the defaults.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<LoopguardConfig> {
    if let Some(path) = &args.config {
        return load_config(&cwd.join(path));
    }
    match find_config(cwd) {
        Some(path) => {
            debug!(config = %path.display(), "using config");
            load_config(&path)
        }
        None => Ok(LoopguardConfig::default()),
    }
}

/// Files named on the command line are always linted; directories are
/// walked and filtered by the include/exclude patterns. The result is sorted
/// so output order does not depend on the file system.
pub fn discover_files(paths: &[PathBuf], cwd: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        paths.iter().map(|path| cwd.join(path)).collect()
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root);
            continue;
        }
        if !root.is_dir() {
            bail!("no such file or directory: {}", root.display());
        }
        for entry in WalkDir::new(&root).follow_links(true) {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            if filter.is_included(relative) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Lint `files` in parallel. Each task owns its parser, binder and rule
/// state; results come back in input order.
pub fn lint_files(files: &[PathBuf], config: &LoopguardConfig, cwd: &Path) -> Result<Vec<FileReport>> {
    let _span = info_span!("lint_files", files = files.len()).entered();
    files
        .par_iter()
        .map(|path| -> Result<FileReport> {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let display_name = display_name(path, cwd);
            let result = lint_source(&display_name, &source, &config.lint_options(path));
            Ok(FileReport {
                path: path.clone(),
                display_name,
                source,
                result,
            })
        })
        .collect()
}

fn print_scopes(files: &[PathBuf], config: &LoopguardConfig, cwd: &Path) -> Result<RunSummary> {
    let mut dumps = Vec::with_capacity(files.len());
    for path in files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let display_name = display_name(path, cwd);
        let options = config.lint_options(path);
        let scopes = dump_scopes(&display_name, &source, &options.binder);
        dumps.push(json!({ "file": display_name, "scopes": scopes }));
    }
    let output = serde_json::to_string_pretty(&dumps).context("failed to serialize scopes")?;
    Ok(RunSummary {
        output,
        error_count: 0,
        warning_count: 0,
        exit_code: EXIT_SUCCESS,
    })
}

fn display_name(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
