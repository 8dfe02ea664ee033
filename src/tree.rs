/*!
 * Directory tree rendering
 *
 * Converts the flat list of surviving relative paths into a nested listing
 * in the style of the Unix `tree` command. The tree is fully materialized
 * for a single render pass and discarded afterwards.
 */

use std::collections::BTreeMap;

/// Placeholder rendered when no path survived filtering
pub const EMPTY_TREE_PLACEHOLDER: &str = "(no files matched)";

/// A directory node: named subdirectories plus leaf file names.
/// `BTreeMap` keeps directories in lexicographic order; files are sorted
/// once at render time.
#[derive(Debug, Default)]
pub struct Tree {
    dirs: BTreeMap<String, Tree>,
    files: Vec<String>,
}

impl Tree {
    /// Build a tree from relative paths with `/` separators
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut root = Tree::default();

        for path in paths {
            let mut node = &mut root;
            let segments: Vec<&str> = path.as_ref().split('/').collect();

            for segment in &segments[..segments.len() - 1] {
                node = node.dirs.entry(segment.to_string()).or_default();
            }

            if let Some(leaf) = segments.last() {
                if !leaf.is_empty() {
                    node.files.push(leaf.to_string());
                }
            }
        }

        root.sort_files();
        root
    }

    fn sort_files(&mut self) {
        self.files.sort();
        for child in self.dirs.values_mut() {
            child.sort_files();
        }
    }

    fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    /// Render the tree with `├── `/`└── ` connectors, directories before
    /// files at each level, directories suffixed with `/`
    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!("{}\n", EMPTY_TREE_PLACEHOLDER);
        }

        let mut output = String::new();
        self.render_level(&mut output, "");
        output
    }

    fn render_level(&self, output: &mut String, prefix: &str) {
        let entry_count = self.dirs.len() + self.files.len();
        let mut index = 0;

        for (name, child) in &self.dirs {
            index += 1;
            let is_last = index == entry_count;
            let connector = if is_last { "└── " } else { "├── " };

            output.push_str(prefix);
            output.push_str(connector);
            output.push_str(name);
            output.push_str("/\n");

            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            child.render_level(output, &child_prefix);
        }

        for name in &self.files {
            index += 1;
            let is_last = index == entry_count;
            let connector = if is_last { "└── " } else { "├── " };

            output.push_str(prefix);
            output.push_str(connector);
            output.push_str(name);
            output.push('\n');
        }
    }

    /// File paths in exactly the rendered order (directories-first,
    /// depth-first). The content sections of the document follow this order.
    pub fn flatten(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.flatten_into(&mut paths, "");
        paths
    }

    fn flatten_into(&self, paths: &mut Vec<String>, prefix: &str) {
        for (name, child) in &self.dirs {
            let child_prefix = format!("{}{}/", prefix, name);
            child.flatten_into(paths, &child_prefix);
        }

        for name in &self.files {
            paths.push(format!("{}{}", prefix, name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_renders_placeholder() {
        let tree = Tree::from_paths(Vec::<String>::new());
        assert_eq!(tree.render(), "(no files matched)\n");
    }

    #[test]
    fn single_file() {
        let tree = Tree::from_paths(["README.md"]);
        assert_eq!(tree.render(), "└── README.md\n");
    }

    #[test]
    fn directories_sort_before_files() {
        let tree = Tree::from_paths(["zeta.txt", "alpha/inner.txt"]);
        let rendered = tree.render();

        assert_eq!(
            rendered,
            "\
├── alpha/
│   └── inner.txt
└── zeta.txt
"
        );
    }

    #[test]
    fn last_sibling_gets_blank_continuation() {
        let tree = Tree::from_paths(["a/one.txt", "a/two.txt", "b/three.txt"]);
        let rendered = tree.render();

        assert_eq!(
            rendered,
            "\
├── a/
│   ├── one.txt
│   └── two.txt
└── b/
    └── three.txt
"
        );
    }

    #[test]
    fn deep_nesting_keeps_vertical_bars() {
        let tree = Tree::from_paths(["a/b/c/leaf.txt", "a/sibling.txt", "top.txt"]);
        let rendered = tree.render();

        assert_eq!(
            rendered,
            "\
├── a/
│   ├── b/
│   │   └── c/
│   │       └── leaf.txt
│   └── sibling.txt
└── top.txt
"
        );
    }

    #[test]
    fn flatten_matches_render_order() {
        let tree = Tree::from_paths(["zeta.txt", "a/nested/x.rs", "a/y.rs", "b.txt"]);

        assert_eq!(
            tree.flatten(),
            vec!["a/nested/x.rs", "a/y.rs", "b.txt", "zeta.txt"]
        );
    }

    #[test]
    fn leaf_count_equals_input_count() {
        let paths = ["a/b.js", "a/c.js", "d/e/f.js", "g.js"];
        let tree = Tree::from_paths(paths);
        assert_eq!(tree.flatten().len(), paths.len());
    }

    #[test]
    fn duplicate_directories_collapse() {
        let tree = Tree::from_paths(["src/a.rs", "src/b.rs"]);
        let rendered = tree.render();

        // One `src/` node with both files under it
        assert_eq!(rendered.matches("src/").count(), 1);
        assert!(rendered.contains("├── a.rs"));
        assert!(rendered.contains("└── b.rs"));
    }
}
