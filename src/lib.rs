/*!
 * ctxmd - Generate a Markdown context document of directory contents
 *
 * This library walks a project directory, applies include/exclude filtering
 * rules on paths and file extensions, and concatenates the surviving files'
 * contents plus a rendered directory tree into a single Markdown document
 * for use as context for Large Language Models.
 */

pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config, FilterConfig};
pub use error::{CtxError, Result};
pub use report::{ReportFormat, Reporter, RunStatistics, ScanReport};
pub use scanner::Scanner;
pub use tree::Tree;
pub use types::{Candidate, ContentOutcome};
pub use utils::{count_files, format_file_size};
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
