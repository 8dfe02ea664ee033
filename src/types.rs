/*!
 * Core types for the ctxmd application
 */

/// A file path that survived path-level filtering during traversal.
/// Immutable once discovered; lives only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path relative to the traversal root, `/`-separated
    pub rel_path: String,
    /// Size in bytes at discovery time
    pub size: u64,
    /// Extension Filter verdict: whether content is embedded. Files that
    /// fail the filter are still listed in the directory tree.
    pub embed_content: bool,
}

/// What ended up in a candidate's content section. Each file is attempted
/// exactly once; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOutcome {
    /// File read successfully
    Embedded(String),
    /// File was blank
    Empty,
    /// File exceeded the configured size ceiling
    TooLarge { size: u64 },
    /// File could not be opened or decoded as text
    ReadError(String),
}
