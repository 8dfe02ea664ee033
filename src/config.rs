/*!
 * Configuration handling for ctxmd
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::{CtxError, Result};

/// Command-line arguments for ctxmd
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ctxmd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a Markdown context document of directory contents for LLM context",
    long_about = "Walks a project directory, applies include/exclude filtering rules on paths and file extensions, and concatenates the surviving files' contents plus a rendered directory tree into a single Markdown document, designed for providing context to Large Language Models (LLMs)."
)]
pub struct Args {
    /// Target directory to process
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output Markdown file name
    #[clap(default_value = "context.md")]
    pub output_file: String,

    /// Comma-separated list of patterns to exclude (bare names, `dir/` markers,
    /// `*.ext` suffixes, or root-anchored paths)
    #[clap(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Comma-separated list of path prefixes to include (if specified, only
    /// paths nested under one of them are retained)
    #[clap(long, value_delimiter = ',')]
    pub include_path: Vec<String>,

    /// Comma-separated list of extensions whose content is embedded, e.g.
    /// `.rs,.toml` (if empty, all extensions are embedded; a literal `.`
    /// entry allows extensionless files)
    #[clap(long, value_delimiter = ',')]
    pub include_ext: Vec<String>,

    /// Maximum file size to embed, in KB
    #[clap(long, default_value = "256")]
    pub max_file_size: u64,

    /// Respect .gitignore files (default: true)
    #[clap(long, default_value = "true")]
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    #[clap(long)]
    pub gitignore_path: Option<String>,

    /// Do not apply the built-in default exclusion list
    #[clap(long)]
    pub no_default_excludes: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Path- and extension-filtering rules, passed by reference into every
/// component. An empty `include_extensions` set means "embed all extensions";
/// an empty `include_paths` list means "no path restriction".
#[derive(Clone, Debug, Default)]
pub struct FilterConfig {
    /// Patterns to exclude
    pub exclude_patterns: Vec<String>,

    /// Path prefixes to include (if empty, include all)
    pub include_paths: Vec<String>,

    /// Extensions whose content is embedded; `""` allows extensionless files
    pub include_extensions: Vec<String>,

    /// Content size ceiling in KB
    pub max_file_size_kb: u64,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to process
    pub target_dir: PathBuf,

    /// Output Markdown file path
    pub output_file: PathBuf,

    /// Filtering rules
    pub filter: FilterConfig,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    pub gitignore_path: Option<PathBuf>,

    /// Whether to apply the built-in default exclusion list
    pub use_default_excludes: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let include_extensions = args
            .include_ext
            .into_iter()
            .map(|ext| {
                // A literal `.` (or empty entry) declares "files with no
                // extension"; stored as the empty string.
                if ext == "." || ext.is_empty() {
                    String::new()
                } else if ext.starts_with('.') {
                    ext.to_lowercase()
                } else {
                    format!(".{}", ext.to_lowercase())
                }
            })
            .collect();

        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            filter: FilterConfig {
                exclude_patterns: args.exclude,
                include_paths: args.include_path,
                include_extensions,
                max_file_size_kb: args.max_file_size,
            },
            respect_gitignore: args.respect_gitignore,
            gitignore_path: args.gitignore_path.map(PathBuf::from),
            use_default_excludes: !args.no_default_excludes,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Check if target directory exists and is readable
        if !self.target_dir.exists() || !self.target_dir.is_dir() {
            return Err(CtxError::Config(format!(
                "Target directory not found: {}",
                self.target_dir.display()
            )));
        }

        // Check if output file directory exists and is writable
        if let Some(parent) = self.output_file.parent() {
            if !parent.exists() && parent != PathBuf::from("") {
                return Err(CtxError::Config(format!(
                    "Output directory not found: {}",
                    parent.display()
                )));
            }
        }

        // Check if custom gitignore file exists
        if let Some(path) = &self.gitignore_path {
            if !path.exists() {
                return Err(CtxError::Config(format!(
                    "Custom .gitignore file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
