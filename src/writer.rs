/*!
 * Markdown document assembly for ctxmd
 *
 * Builds the whole output document in memory (title, timestamp, rendered
 * directory tree, then one content section per embeddable survivor in tree
 * order) and writes it in a single pass. Per-file failures become inline
 * placeholders; only the final write is fatal.
 */

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};

use chrono::Local;

use crate::config::Config;
use crate::error::{CtxError, Result};
use crate::filter::extension_of;
use crate::report::RunStatistics;
use crate::tree::Tree;
use crate::types::{Candidate, ContentOutcome};
use crate::utils::{format_file_size, language_tag};

/// Markdown writer for directory contents
pub struct MarkdownWriter {
    /// Writer configuration
    config: Config,
}

impl MarkdownWriter {
    /// Create a new Markdown writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Assemble the full document from the surviving candidates. Returns
    /// the document text and the accumulated run statistics.
    pub fn assemble(&self, candidates: &[Candidate]) -> (String, RunStatistics) {
        let mut stats = RunStatistics::default();

        let by_path: HashMap<&str, &Candidate> = candidates
            .iter()
            .map(|c| (c.rel_path.as_str(), c))
            .collect();

        // Every candidate is listed in the tree; extension-rejected files
        // simply never get a content section
        let tree = Tree::from_paths(candidates.iter().map(|c| c.rel_path.as_str()));

        let mut document = String::new();
        document.push_str(&format!("# Project Context: {}\n\n", self.project_name()));
        document.push_str(&format!("Generated: {}\n\n", Local::now().to_rfc3339()));
        document.push_str("## Directory Structure\n\n");
        document.push_str("```\n");
        document.push_str(&tree.render());
        document.push_str("```\n\n");
        document.push_str("## File Contents\n");

        // Content sections follow the exact rendered tree order
        for rel_path in tree.flatten() {
            let Some(candidate) = by_path.get(rel_path.as_str()) else {
                continue;
            };
            stats.record_listed(candidate.size);
            if !candidate.embed_content {
                continue;
            }

            let outcome = self.read_content(candidate);
            self.record_outcome(&mut stats, candidate, &outcome);
            self.push_section(&mut document, &rel_path, &outcome);
        }

        (document, stats)
    }

    /// Write the assembled document, overwriting any prior version
    pub fn write(&self, document: &str) -> Result<()> {
        let as_output_error = |source| CtxError::OutputWrite {
            path: self.config.output_file.clone(),
            source,
        };

        let file = File::create(&self.config.output_file).map_err(as_output_error)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(document.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(as_output_error)
    }

    /// Display name of the scanned project directory
    fn project_name(&self) -> String {
        fs::canonicalize(&self.config.target_dir)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| self.config.target_dir.display().to_string())
    }

    /// Read one candidate's content, exactly once. Oversized and unreadable
    /// files degrade to placeholder outcomes instead of errors.
    fn read_content(&self, candidate: &Candidate) -> ContentOutcome {
        let ceiling_bytes = self.config.filter.max_file_size_kb * 1024;
        if candidate.size > ceiling_bytes {
            return ContentOutcome::TooLarge {
                size: candidate.size,
            };
        }

        let abs_path = self.config.target_dir.join(&candidate.rel_path);
        match fs::read_to_string(&abs_path) {
            Ok(content) if content.trim().is_empty() => ContentOutcome::Empty,
            Ok(content) => ContentOutcome::Embedded(content),
            Err(e) => ContentOutcome::ReadError(e.to_string()),
        }
    }

    fn record_outcome(
        &self,
        stats: &mut RunStatistics,
        candidate: &Candidate,
        outcome: &ContentOutcome,
    ) {
        let ext = extension_of(&candidate.rel_path);
        match outcome {
            ContentOutcome::Embedded(content) => {
                stats.record_embedded(&ext, content.chars().count());
            }
            ContentOutcome::Empty => stats.record_empty(),
            ContentOutcome::TooLarge { .. } => stats.record_size_skip(),
            ContentOutcome::ReadError(e) => {
                eprintln!("Warning: failed to read {}: {}", candidate.rel_path, e);
                stats.record_read_error();
            }
        }
    }

    fn push_section(&self, document: &mut String, rel_path: &str, outcome: &ContentOutcome) {
        document.push_str(&format!("\n### `{}`\n\n", rel_path));
        document.push_str(&format!("```{}\n", language_tag(rel_path)));

        match outcome {
            ContentOutcome::Embedded(content) => {
                document.push_str(content);
                if !content.ends_with('\n') {
                    document.push('\n');
                }
            }
            ContentOutcome::Empty => document.push_str("[EMPTY FILE]\n"),
            ContentOutcome::TooLarge { size } => {
                document.push_str(&format!(
                    "[SKIPPED: file exceeds {} KB size limit (actual: {})]\n",
                    self.config.filter.max_file_size_kb,
                    format_file_size(*size)
                ));
            }
            ContentOutcome::ReadError(cause) => {
                document.push_str(&format!("[ERROR: could not read file: {}]\n", cause));
            }
        }

        document.push_str("```\n");
    }
}
