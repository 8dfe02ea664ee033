/*!
 * Tests for ctxmd functionality
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::config::{Config, FilterConfig};
use crate::error::CtxError;
use crate::scanner::Scanner;
use crate::writer::MarkdownWriter;

// Helper to build a config over a test directory
fn make_config(dir: &Path, output: &Path) -> Config {
    Config {
        target_dir: dir.to_path_buf(),
        output_file: output.to_path_buf(),
        filter: FilterConfig {
            exclude_patterns: vec![],
            include_paths: vec![],
            include_extensions: vec![],
            max_file_size_kb: 256,
        },
        respect_gitignore: false,
        gitignore_path: None,
        use_default_excludes: true,
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())
}

fn generate(config: &Config) -> (String, crate::report::RunStatistics) {
    let scanner = Scanner::new(config.clone(), ProgressBar::hidden());
    let candidates = scanner.scan().expect("scan failed");
    MarkdownWriter::new(config.clone()).assemble(&candidates)
}

// Helper function to create a small project-like directory structure
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    write_file(&root.join("README.md"), "# Test project\n")?;
    write_file(&root.join("a").join("b.js"), "console.log('b');\n")?;
    write_file(
        &root.join("a").join("node_modules").join("c.js"),
        "module.exports = {};\n",
    )?;
    write_file(&root.join("run"), "#!/bin/sh\necho run\n")?;
    write_file(&root.join("empty.txt"), "")?;

    // Directory ignored by the default exclusion list
    write_file(&root.join(".git").join("config"), "[core]\n")?;

    Ok(temp_dir)
}

#[test]
fn test_basic_generation() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let output_file = temp_dir.path().join("context.md");
    let config = make_config(temp_dir.path(), &output_file);

    let (document, stats) = generate(&config);
    MarkdownWriter::new(config).write(&document)?;

    assert!(output_file.exists());
    let written = fs::read_to_string(&output_file)?;
    assert_eq!(written, document);

    // Fixed document structure, in order
    let title_pos = document.find("# Project Context:").unwrap();
    let tree_pos = document.find("## Directory Structure").unwrap();
    let contents_pos = document.find("## File Contents").unwrap();
    assert!(title_pos < tree_pos && tree_pos < contents_pos);

    assert!(document.contains("Generated: "));
    assert!(document.contains("### `README.md`"));
    assert!(document.contains("# Test project"));
    assert!(document.contains("```markdown"));

    // Defaults prune .git and node_modules entirely
    assert!(!document.contains(".git"));
    assert!(!document.contains("node_modules"));

    assert!(stats.files_embedded > 0);
    Ok(())
}

#[test]
fn test_directory_exclusion_at_any_depth() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("app/nested/node_modules/x.js"), "x\n")?;
    write_file(&root.join("app/keep.js"), "keep\n")?;
    write_file(&root.join("node_modules/y.js"), "y\n")?;

    let mut config = make_config(root, &root.join("context.md"));
    config.use_default_excludes = false;
    config.filter.exclude_patterns = vec!["node_modules".to_string()];

    let (document, _) = generate(&config);

    assert!(document.contains("keep.js"));
    assert!(!document.contains("node_modules"));
    assert!(!document.contains("x.js"));
    assert!(!document.contains("y.js"));
    Ok(())
}

// The survivors scenario: exclude `node_modules`, embed only `.js` content.
// README.md stays in the tree without a content section; the excluded
// directory does not appear at all.
#[test]
fn test_survivor_scenario() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("a/b.js"), "const b = 1;\n")?;
    write_file(&root.join("a/node_modules/c.js"), "const c = 2;\n")?;
    write_file(&root.join("README.md"), "readme\n")?;

    let mut config = make_config(root, &root.join("context.md"));
    config.filter.exclude_patterns = vec!["node_modules".to_string()];
    config.filter.include_extensions = vec![".js".to_string()];

    let (document, stats) = generate(&config);

    // Only a/b.js has a content section
    assert!(document.contains("### `a/b.js`"));
    assert!(document.contains("const b = 1;"));
    assert!(!document.contains("### `README.md`"));
    assert!(!document.contains("const c = 2;"));

    // README.md is still listed in the tree
    let tree_section = &document
        [document.find("## Directory Structure").unwrap()..document.find("## File Contents").unwrap()];
    assert!(tree_section.contains("README.md"));
    assert!(tree_section.contains("b.js"));
    assert!(!tree_section.contains("node_modules"));

    assert_eq!(stats.files_listed, 2);
    assert_eq!(stats.files_embedded, 1);
    Ok(())
}

#[test]
fn test_extensionless_files_need_explicit_listing() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("run"), "#!/bin/sh\n")?;
    write_file(&root.join("a.js"), "a\n")?;

    let mut config = make_config(root, &root.join("context.md"));
    config.filter.include_extensions = vec![".js".to_string()];

    let (document, _) = generate(&config);
    assert!(!document.contains("### `run`"));
    assert!(document.contains("### `a.js`"));

    config.filter.include_extensions = vec![".js".to_string(), String::new()];
    let (document, _) = generate(&config);
    assert!(document.contains("### `run`"));
    Ok(())
}

#[test]
fn test_size_ceiling_boundary() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    // Exactly at the 1 KB ceiling: embedded
    write_file(&root.join("exact.txt"), &"a".repeat(1024))?;
    // One byte over: placeholder, never an error
    write_file(&root.join("over.txt"), &"b".repeat(1025))?;

    let mut config = make_config(root, &root.join("context.md"));
    config.filter.max_file_size_kb = 1;

    let (document, stats) = generate(&config);

    let exact_section = &document[document.find("### `exact.txt`").unwrap()..];
    assert!(exact_section.starts_with("### `exact.txt`"));
    assert!(exact_section.contains("aaaa"));

    assert!(document.contains("### `over.txt`"));
    assert!(document.contains("[SKIPPED: file exceeds 1 KB size limit"));
    assert!(!document.contains("bbbb"));

    assert_eq!(stats.files_skipped_size, 1);
    Ok(())
}

#[test]
fn test_empty_file_placeholder() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("empty.txt"), "")?;

    let config = make_config(root, &root.join("context.md"));
    let (document, stats) = generate(&config);

    assert!(document.contains("### `empty.txt`"));
    assert!(document.contains("[EMPTY FILE]"));
    assert_eq!(stats.files_empty, 1);
    Ok(())
}

#[test]
fn test_unreadable_content_becomes_placeholder() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    // Invalid UTF-8: cannot be decoded as text
    let mut file = File::create(root.join("bad.txt"))?;
    file.write_all(&[0xff, 0xfe, 0xfd])?;
    write_file(&root.join("good.txt"), "fine\n")?;

    let config = make_config(root, &root.join("context.md"));
    let (document, stats) = generate(&config);

    // The run continues past the failing file
    assert!(document.contains("[ERROR: could not read file:"));
    assert!(document.contains("fine"));
    assert_eq!(stats.files_errored, 1);
    assert_eq!(stats.files_embedded, 1);
    Ok(())
}

#[test]
fn test_empty_directory_renders_placeholder() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let config = make_config(temp_dir.path(), &temp_dir.path().join("context.md"));

    let (document, stats) = generate(&config);

    assert!(document.contains(crate::tree::EMPTY_TREE_PLACEHOLDER));
    assert_eq!(stats.files_listed, 0);
    Ok(())
}

#[test]
fn test_idempotent_modulo_timestamp() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = make_config(temp_dir.path(), &temp_dir.path().join("context.md"));

    let (first, _) = generate(&config);
    let (second, _) = generate(&config);

    let strip_timestamp = |doc: &str| {
        doc.lines()
            .filter(|line| !line.starts_with("Generated: "))
            .collect::<Vec<_>>()
            .join("\n")
    };

    assert_eq!(strip_timestamp(&first), strip_timestamp(&second));
    Ok(())
}

#[test]
fn test_include_paths_restrict_survivors() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("src/deep/mod.rs"), "mod deep;\n")?;
    write_file(&root.join("src/lib.rs"), "lib\n")?;
    write_file(&root.join("docs/guide.md"), "guide\n")?;

    let mut config = make_config(root, &root.join("context.md"));
    config.filter.include_paths = vec!["src".to_string()];

    let (document, stats) = generate(&config);

    assert!(document.contains("### `src/lib.rs`"));
    assert!(document.contains("### `src/deep/mod.rs`"));
    assert!(!document.contains("guide.md"));
    assert_eq!(stats.files_listed, 2);
    Ok(())
}

#[test]
fn test_output_file_is_never_a_candidate() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("keep.txt"), "keep\n")?;
    // A stale output from a previous run sits inside the target directory
    write_file(&root.join("context.md"), "# Project Context: stale\n")?;

    let config = make_config(root, &root.join("context.md"));
    let (document, stats) = generate(&config);

    assert!(document.contains("keep.txt"));
    assert!(!document.contains("### `context.md`"));
    assert_eq!(stats.files_listed, 1);
    Ok(())
}

#[test]
fn test_respect_gitignore() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let root = temp_dir.path();
    write_file(&root.join(".gitignore"), "*.js\n")?;

    let mut config = make_config(root, &root.join("context.md"));
    config.respect_gitignore = true;
    // Keep the .gitignore itself out of the document too
    config.filter.exclude_patterns = vec![".gitignore".to_string()];

    let (document, _) = generate(&config);

    assert!(!document.contains("b.js"));
    assert!(document.contains("README.md"));
    Ok(())
}

#[test]
fn test_tree_leaf_count_matches_survivors() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = make_config(temp_dir.path(), &temp_dir.path().join("context.md"));

    let scanner = Scanner::new(config.clone(), ProgressBar::hidden());
    let candidates = scanner.scan().expect("scan failed");
    let tree = crate::tree::Tree::from_paths(candidates.iter().map(|c| c.rel_path.as_str()));

    assert_eq!(tree.flatten().len(), candidates.len());
    Ok(())
}

#[test]
fn test_unwalkable_root_is_fatal() {
    let missing = Path::new("/definitely/not/a/real/directory");
    let mut config = make_config(missing, &missing.join("context.md"));

    // Both walk paths must refuse to degrade to an empty run
    for respect_gitignore in [true, false] {
        config.respect_gitignore = respect_gitignore;
        let scanner = Scanner::new(config.clone(), ProgressBar::hidden());
        let err = scanner.scan().unwrap_err();
        assert!(matches!(err, CtxError::Traversal(_)), "got: {:?}", err);
    }
}

#[test]
fn test_validate_reports_config_errors() {
    let missing = Path::new("/definitely/not/a/real/directory");
    let config = make_config(missing, Path::new("context.md"));

    let err = config.validate().unwrap_err();
    assert!(matches!(err, CtxError::Config(_)), "got: {:?}", err);
}

#[test]
fn test_nested_file_sharing_output_name_is_kept() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    write_file(&root.join("keep.txt"), "keep\n")?;
    write_file(&root.join("docs/context.md"), "nested doc\n")?;
    // A stale output from a previous run sits at the root
    write_file(&root.join("context.md"), "# Project Context: stale\n")?;

    let config = make_config(root, &root.join("context.md"));
    let (document, stats) = generate(&config);

    // Only the run's own output is dropped; the unrelated nested file
    // with the same name survives
    assert!(document.contains("### `docs/context.md`"));
    assert!(document.contains("nested doc"));
    assert!(!document.contains("# Project Context: stale"));
    assert_eq!(stats.files_listed, 2);
    Ok(())
}
