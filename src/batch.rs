//! Batch rewriting of files and directory trees
//!
//! - A single input file is written to `output` when `output` has an
//!   extension, otherwise to `output/<file name>`.
//! - A directory is walked recursively; every file with the configured
//!   extension is rewritten to the same relative path under `output`.
//!
//! Files that are not valid UTF-8 are skipped and reported, the rest of the
//! batch carries on.

use crate::contextifier::Contextifier;
use crate::error::{ContextifyerError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Batch options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Extension (without the dot) of files picked up from directories
    pub extension: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
        }
    }
}

/// One rewritten file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub links: usize,
}

/// One file left alone, and why
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub input: PathBuf,
    pub reason: String,
}

/// Summary of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<ProcessedFile>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    /// Total links made across all files
    pub fn total_links(&self) -> usize {
        self.processed.iter().map(|f| f.links).sum()
    }
}

/// Rewrite a file or a directory tree
pub fn process_path(
    input: &Path,
    output: &Path,
    contextifier: &Contextifier,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    if input.is_file() {
        let target = if output.extension().is_some() {
            output.to_path_buf()
        } else {
            let name = input.file_name().ok_or_else(|| {
                ContextifyerError::ValidationError(format!("Input has no file name: {}", input.display()))
            })?;
            output.join(name)
        };
        process_file(input, &target, contextifier, &mut report)?;
    } else if input.is_dir() {
        let mut files = Vec::new();
        collect_files(input, &options.extension, &mut files)?;
        files.sort();
        debug!("{} .{} files under {}", files.len(), options.extension, input.display());

        for file in files {
            let relative = file.strip_prefix(input).map_err(|e| {
                ContextifyerError::Other(format!("{} is outside {}: {}", file.display(), input.display(), e))
            })?;
            let target = output.join(relative);
            process_file(&file, &target, contextifier, &mut report)?;
        }
    } else {
        return Err(ContextifyerError::ValidationError(format!(
            "Input path does not exist: {}",
            input.display()
        )));
    }

    info!(
        "Batch complete: {} files rewritten, {} skipped, {} links",
        report.processed.len(),
        report.skipped.len(),
        report.total_links()
    );
    Ok(report)
}

/// Read, transform and write a single file
fn process_file(
    input: &Path,
    output: &Path,
    contextifier: &Contextifier,
    report: &mut BatchReport,
) -> Result<()> {
    let bytes = fs::read(input)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("Skipping {}: not valid UTF-8", input.display());
            report.skipped.push(SkippedFile {
                input: input.to_path_buf(),
                reason: format!("not valid UTF-8: {}", e.utf8_error()),
            });
            return Ok(());
        }
    };

    let result = contextifier.transform_detailed(&text);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &result.text)?;
    info!("Processed {} -> {} ({} links)", input.display(), output.display(), result.links.len());

    report.processed.push(ProcessedFile {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        links: result.links.len(),
    });
    Ok(())
}

/// Recursive walk that never descends through symlinked directories
fn collect_files(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_symlink() && path.is_dir() {
            debug!("Not following symlinked directory {}", path.display());
        } else if file_type.is_dir() {
            collect_files(&path, extension, files)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        {
            files.push(path);
        }
    }
    Ok(())
}
