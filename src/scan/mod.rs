//! Content glob dry run.
//!
//! Walks the project tree once and counts how many files each content glob
//! would hand to the style engine. Files are never opened; the engine does
//! the actual class extraction.

mod glob;

pub use glob::{Glob, GlobError};

use jwalk::WalkDir;
use std::path::Path;

/// Matches of a single content glob.
#[derive(Debug, Clone)]
pub struct GlobMatches {
    pub glob: String,
    /// Files matched by this glob alone.
    pub matched: usize,
    /// Set when the glob could not be compiled.
    pub error: Option<GlobError>,
}

#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub globs: Vec<GlobMatches>,
    /// Files matched by at least one glob and excluded by none.
    pub files: usize,
    /// Files visited during the walk.
    pub visited: usize,
}

impl ScanReport {
    /// Globs that compiled but matched nothing.
    pub fn unmatched(&self) -> impl Iterator<Item = (usize, &GlobMatches)> {
        self.globs
            .iter()
            .enumerate()
            .filter(|(_, g)| g.error.is_none() && g.matched == 0)
    }
}

/// Count the files under `root` matched by each of `globs`.
pub fn scan_content(root: &Path, globs: &[String]) -> ScanReport {
    let compiled: Vec<Result<Glob, GlobError>> = globs.iter().map(|g| Glob::new(g)).collect();
    let mut report = ScanReport {
        globs: globs
            .iter()
            .zip(&compiled)
            .map(|(glob, compiled)| GlobMatches {
                glob: glob.clone(),
                matched: 0,
                error: compiled.as_ref().err().cloned(),
            })
            .collect(),
        ..ScanReport::default()
    };

    // Dependency trees are huge; only descend when a glob asks for them
    let walk_node_modules = globs.iter().any(|g| g.contains("node_modules"));

    // The root itself arrives with `depth == None` and may be hidden
    let files = WalkDir::new(root)
        .skip_hidden(false)
        .process_read_dir(move |depth, _, _, children| {
            if depth.is_none() {
                return;
            }
            children.retain(|entry| {
                entry.as_ref().map_or(true, |e| {
                    let name = e.file_name().to_str().unwrap_or_default();
                    !name.starts_with('.') && (walk_node_modules || name != "node_modules")
                })
            });
        })
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path());

    for path in files {
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        report.visited += 1;

        let mut included = false;
        let mut excluded = false;
        for (entry, glob) in report.globs.iter_mut().zip(&compiled) {
            let Ok(glob) = glob else { continue };
            if glob.is_match(&relative) {
                entry.matched += 1;
                if glob.is_negated() {
                    excluded = true;
                } else {
                    included = true;
                }
            }
        }

        if included && !excluded {
            report.files += 1;
        }
    }

    crate::debug!("scan"; "visited {} files, {} matched", report.visited, report.files);
    report
}
