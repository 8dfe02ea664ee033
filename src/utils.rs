/*!
 * Utility functions for ctxmd
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::error::Result;
use crate::scanner::Scanner;

/// Count surviving files for progress tracking
pub fn count_files(config: &Config) -> Result<u64> {
    let scanner = Scanner::new(config.clone(), ProgressBar::hidden());
    let candidates = scanner.scan()?;
    Ok(candidates.len() as u64)
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Map a path to a fence language tag for syntax highlighting. Purely
/// cosmetic; unknown extensions fall back to the bare extension.
pub fn language_tag(rel_path: &str) -> String {
    static BY_EXTENSION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
        HashMap::from([
            (".rs", "rust"),
            (".js", "javascript"),
            (".mjs", "javascript"),
            (".cjs", "javascript"),
            (".ts", "typescript"),
            (".tsx", "tsx"),
            (".jsx", "jsx"),
            (".py", "python"),
            (".rb", "ruby"),
            (".go", "go"),
            (".c", "c"),
            (".h", "c"),
            (".cpp", "cpp"),
            (".hpp", "cpp"),
            (".cs", "csharp"),
            (".java", "java"),
            (".kt", "kotlin"),
            (".swift", "swift"),
            (".sh", "bash"),
            (".bash", "bash"),
            (".zsh", "bash"),
            (".fish", "fish"),
            (".md", "markdown"),
            (".json", "json"),
            (".yaml", "yaml"),
            (".yml", "yaml"),
            (".toml", "toml"),
            (".xml", "xml"),
            (".html", "html"),
            (".css", "css"),
            (".scss", "scss"),
            (".sql", "sql"),
            (".proto", "protobuf"),
            (".tf", "hcl"),
            (".lua", "lua"),
            (".vim", "vim"),
            (".ex", "elixir"),
            (".exs", "elixir"),
            (".erl", "erlang"),
            (".hs", "haskell"),
            (".zig", "zig"),
            (".txt", "text"),
        ])
    });

    static BY_FILE_NAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
        HashMap::from([
            ("Makefile", "makefile"),
            ("makefile", "makefile"),
            ("Dockerfile", "dockerfile"),
            ("Justfile", "just"),
            ("Rakefile", "ruby"),
            ("Gemfile", "ruby"),
            ("CMakeLists.txt", "cmake"),
        ])
    });

    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);
    if let Some(tag) = BY_FILE_NAME.get(file_name) {
        return tag.to_string();
    }

    let ext = crate::filter::extension_of(rel_path);
    if ext.is_empty() {
        return "text".to_string();
    }

    match BY_EXTENSION.get(ext.as_str()) {
        Some(tag) => tag.to_string(),
        None => ext.trim_start_matches('.').to_string(),
    }
}

/// Rough tokens-per-character multipliers used for the console estimate.
/// Prose tokenizes denser than code; the values are cosmetic, not a
/// contract.
static TOKEN_MULTIPLIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        (".md", 0.22),
        (".txt", 0.22),
        (".json", 0.30),
        (".yaml", 0.28),
        (".yml", 0.28),
        (".toml", 0.28),
        (".xml", 0.32),
        (".html", 0.32),
    ])
});

const DEFAULT_TOKENS_PER_CHAR: f64 = 0.25;

/// Estimate the token count of `chars` characters with the given extension
pub fn estimate_tokens(ext: &str, chars: usize) -> usize {
    let multiplier = TOKEN_MULTIPLIERS
        .get(ext)
        .copied()
        .unwrap_or(DEFAULT_TOKENS_PER_CHAR);
    (chars as f64 * multiplier).round() as usize
}

/// Absolute path of the run's own output file, resolved against the
/// canonical traversal root. Only this exact path is excluded from the
/// walk; an unrelated file that happens to share the output name deeper in
/// the tree stays a candidate.
pub fn resolve_output_path(root: &Path, config: &Config) -> PathBuf {
    let output = &config.output_file;
    let absolute = if output.is_absolute() {
        output.clone()
    } else {
        root.join(output)
    };
    // A stale output from a prior run may exist behind a symlinked parent;
    // walked paths are canonical, so resolve before comparing
    std::fs::canonicalize(&absolute).unwrap_or(absolute)
}

/// Default patterns to exclude
pub static DEFAULT_EXCLUDE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Dependencies
        "node_modules/",
        "bower_components/",
        "vendor/",
        "package-lock.json",
        "yarn.lock",
        ".pnpm-store/",
        // Build & Dist
        "dist/",
        "build/",
        "out/",
        "*.min.js",
        "*.min.css",
        // Python
        "__pycache__/",
        ".pytest_cache/",
        ".venv/",
        "venv/",
        "*.pyc",
        "*.egg-info",
        // Rust
        "target/",
        "Cargo.lock",
        // IDEs & Editors
        ".idea/",
        ".vscode/",
        "*.swp",
        "*.swo",
        // Caches & Temp
        ".cache/",
        "tmp/",
        "*.log",
        // Archives & Binaries
        "*.zip",
        "*.tar.gz",
        "*.tgz",
        "*.sqlite",
        "*.db",
        "*.class",
        "*.jar",
        // JavaScript/TypeScript
        "coverage/",
        ".next/",
        ".nuxt/",
        "*.tsbuildinfo",
    ]
});
