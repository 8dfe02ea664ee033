/*!
 * Directory traversal and candidate discovery
 *
 * The walk happens in-process and prunes excluded directories as it
 * descends, so an excluded subtree is never enumerated at all. Traversal is
 * strictly sequential; each candidate is visited exactly once.
 */

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use indicatif::ProgressBar;
use walkdir::WalkDir;

use crate::config::{Config, FilterConfig};
use crate::error::{CtxError, Result};
use crate::filter::{dir_retained, is_excluded, is_included, should_include_content};
use crate::types::Candidate;
use crate::utils::{resolve_output_path, DEFAULT_EXCLUDE};

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    progress: ProgressBar,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: ProgressBar) -> Self {
        Self { config, progress }
    }

    /// Filtering rules with the built-in default exclusions folded in
    fn effective_filter(&self) -> FilterConfig {
        let mut filter = self.config.filter.clone();
        if self.config.use_default_excludes {
            filter
                .exclude_patterns
                .extend(DEFAULT_EXCLUDE.iter().map(|p| p.to_string()));
        }
        filter
    }

    /// Walk the target directory and return the surviving candidates,
    /// sorted by relative path
    pub fn scan(&self) -> Result<Vec<Candidate>> {
        let root = fs::canonicalize(&self.config.target_dir)
            .map_err(|e| CtxError::Traversal(format!("cannot resolve target directory: {}", e)))?;
        let filter = self.effective_filter();
        let output_path = resolve_output_path(&root, &self.config);

        let mut candidates = if self.config.respect_gitignore {
            self.walk_with_gitignore(&root, &filter, &output_path)?
        } else {
            self.walk_plain(&root, &filter, &output_path)?
        };

        candidates.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(candidates)
    }

    /// Traversal honoring .gitignore files, via the ignore crate
    fn walk_with_gitignore(
        &self,
        root: &Path,
        filter: &FilterConfig,
        output_path: &Path,
    ) -> Result<Vec<Candidate>> {
        let mut builder = WalkBuilder::new(root);
        // Dotfiles are governed by the exclusion rules, not skipped wholesale
        builder.hidden(false);

        if let Some(gitignore_path) = &self.config.gitignore_path {
            builder.add_custom_ignore_filename(gitignore_path);
        }

        // Prune excluded directories during the walk instead of filtering
        // their children afterwards
        let filter_for_entries = filter.clone();
        let root_for_entries: PathBuf = root.to_path_buf();
        builder.filter_entry(move |entry| {
            let Some(rel) = relative_str(entry.path(), &root_for_entries) else {
                return true;
            };
            if rel.is_empty() {
                return true;
            }
            if entry.file_type().map_or(false, |ft| ft.is_dir()) {
                dir_retained(&rel, &filter_for_entries)
            } else {
                !is_excluded(&rel, &filter_for_entries)
            }
        });

        let mut candidates = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    // A failure at the root means the walk cannot run at all
                    if is_root_error(&e) {
                        return Err(e.into());
                    }
                    eprintln!("Warning: skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }
            if let Some(candidate) = self.admit_file(entry.path(), root, filter, output_path) {
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }

    /// Plain traversal via walkdir when gitignore handling is disabled
    fn walk_plain(
        &self,
        root: &Path,
        filter: &FilterConfig,
        output_path: &Path,
    ) -> Result<Vec<Candidate>> {
        let filter_for_entries = filter.clone();
        let root_for_entries: PathBuf = root.to_path_buf();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(move |entry| {
                let Some(rel) = relative_str(entry.path(), &root_for_entries) else {
                    return true;
                };
                if rel.is_empty() {
                    return true;
                }
                if entry.file_type().is_dir() {
                    dir_retained(&rel, &filter_for_entries)
                } else {
                    !is_excluded(&rel, &filter_for_entries)
                }
            });

        let mut candidates = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    // A failure at the root means the walk cannot run at all
                    if e.depth() == 0 {
                        return Err(e.into());
                    }
                    eprintln!("Warning: skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(candidate) = self.admit_file(entry.path(), root, filter, output_path) {
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }

    /// Apply file-level rules to a walked path and build its candidate
    fn admit_file(
        &self,
        path: &Path,
        root: &Path,
        filter: &FilterConfig,
        output_path: &Path,
    ) -> Option<Candidate> {
        let rel_path = relative_str(path, root)?;
        if rel_path.is_empty() {
            return None;
        }

        // Never embed the run's own output
        if path == output_path {
            return None;
        }

        if !is_included(&rel_path, filter) {
            return None;
        }

        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                eprintln!("Warning: cannot stat {}: {}", path.display(), e);
                return None;
            }
        };

        self.progress.inc(1);
        let display_name = if rel_path.len() > 40 && rel_path.is_ascii() {
            format!("...{}", &rel_path[rel_path.len().saturating_sub(37)..])
        } else {
            rel_path.clone()
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));

        Some(Candidate {
            embed_content: should_include_content(&rel_path, filter),
            rel_path,
            size,
        })
    }
}

/// Relative `/`-separated path of `path` under `root`
fn relative_str(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(segments.join("/"))
}

/// Whether a walker error happened at the traversal root. Such an error
/// means the walk cannot enumerate anything and must abort the run instead
/// of degrading to an empty candidate list.
fn is_root_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::WithDepth { depth, .. } => *depth == 0,
        ignore::Error::WithPath { err, .. } => is_root_error(err),
        ignore::Error::WithLineNumber { err, .. } => is_root_error(err),
        ignore::Error::Partial(errs) => errs.iter().any(is_root_error),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn denied() -> ignore::Error {
        ignore::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }

    #[test]
    fn walker_error_at_root_is_recognized() {
        let at_root = ignore::Error::WithDepth {
            depth: 0,
            err: Box::new(denied()),
        };
        assert!(is_root_error(&at_root));
    }

    #[test]
    fn walker_error_below_root_is_not_fatal() {
        let below_root = ignore::Error::WithDepth {
            depth: 2,
            err: Box::new(denied()),
        };
        assert!(!is_root_error(&below_root));
        assert!(!is_root_error(&denied()));
    }

    #[test]
    fn root_error_is_found_through_path_wrapper() {
        let wrapped = ignore::Error::WithPath {
            path: PathBuf::from("some/dir"),
            err: Box::new(ignore::Error::WithDepth {
                depth: 0,
                err: Box::new(denied()),
            }),
        };
        assert!(is_root_error(&wrapped));
    }
}
