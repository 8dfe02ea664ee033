/*!
 * Path- and extension-level filtering
 *
 * All matching operates on relative paths with `/` separators, as produced
 * by the scanner. Exclusion is evaluated before inclusion and always wins.
 */

use glob_match::glob_match;

use crate::config::FilterConfig;

/// Check whether a relative path matches any exclusion pattern.
///
/// Pattern forms:
/// - `*.ext` (or any other glob without a separator) matches the file name
///   at any depth
/// - `name/` matches a directory named `name` anywhere in the path,
///   excluding its whole subtree
/// - `a/b` (containing a separator) is anchored at the traversal root and
///   matches that exact path or anything nested under it
/// - a bare `name` matches a file or directory with that name at any depth
pub fn is_excluded(rel_path: &str, config: &FilterConfig) -> bool {
    config
        .exclude_patterns
        .iter()
        .any(|pattern| matches_exclude_pattern(rel_path, pattern))
}

pub(crate) fn matches_exclude_pattern(rel_path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);

    // Glob patterns match against the file name only, at any depth
    if !pattern.contains('/') && pattern.contains('*') {
        return glob_match(pattern, file_name);
    }

    // `name/` marks a directory: any matching path segment excludes the
    // whole subtree, regardless of depth
    if let Some(dir_name) = pattern.strip_suffix('/') {
        if !dir_name.contains('/') {
            return rel_path.split('/').any(|segment| segment == dir_name);
        }
        // `a/b/` is root-anchored like any other separator pattern
        return rel_path == dir_name || rel_path.starts_with(&format!("{}/", dir_name));
    }

    // Patterns with a separator are anchored from the traversal root
    if pattern.contains('/') {
        return rel_path == pattern || rel_path.starts_with(&format!("{}/", pattern));
    }

    // Bare name: matches a file or a directory at any depth. This is the
    // most error-prone rule; every segment must be considered, not just the
    // first one.
    rel_path.split('/').any(|segment| segment == pattern)
}

/// Check whether a relative path survives the include-path restriction.
/// With no include entries, everything non-excluded is retained.
pub fn is_included(rel_path: &str, config: &FilterConfig) -> bool {
    if config.include_paths.is_empty() {
        return true;
    }

    config.include_paths.iter().any(|entry| {
        let entry = entry.trim_end_matches('/');
        rel_path == entry || rel_path.starts_with(&format!("{}/", entry))
    })
}

/// Decide whether traversal should descend into a directory. A directory
/// survives when it is not excluded and either lies under an include entry
/// or is an ancestor of one (pruning ancestors would hide the entry itself).
pub fn dir_retained(rel_path: &str, config: &FilterConfig) -> bool {
    if is_excluded(rel_path, config) {
        return false;
    }

    if config.include_paths.is_empty() {
        return true;
    }

    config.include_paths.iter().any(|entry| {
        let entry = entry.trim_end_matches('/');
        rel_path == entry
            || rel_path.starts_with(&format!("{}/", entry))
            || entry.starts_with(&format!("{}/", rel_path))
    })
}

/// Extract the lower-cased, dot-prefixed extension of a path, or the empty
/// string when there is none. Dotfiles like `.gitignore` count as
/// extensionless.
pub fn extension_of(rel_path: &str) -> String {
    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path);

    match file_name.rfind('.') {
        Some(pos) if pos > 0 => file_name[pos..].to_lowercase(),
        _ => String::new(),
    }
}

/// Check whether a path's content should be embedded, based on the
/// extension allow-list. An empty list embeds everything; a `""` member
/// explicitly allows extensionless files (distinct from the wildcard-allow
/// of the empty list).
pub fn should_include_content(rel_path: &str, config: &FilterConfig) -> bool {
    if config.include_extensions.is_empty() {
        return true;
    }

    let ext = extension_of(rel_path);
    config.include_extensions.iter().any(|allowed| *allowed == ext)
}
