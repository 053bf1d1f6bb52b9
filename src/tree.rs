//! Directory tree assembly and rendering.
//!
//! The tree is built from the `/`-separated paths of accepted files and
//! rendered with box-drawing characters.

use std::collections::BTreeMap;

use crate::walker::FileRecord;

/// The type of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// A node in the directory tree.
///
/// Each node is owned by its parent. Children are keyed by name, so they
/// come out sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// File or directory name. Empty for the root.
    pub name: String,
    pub kind: NodeKind,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Create an empty root node.
    pub fn root() -> Self {
        Self::directory("")
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children: BTreeMap::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: BTreeMap::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Insert a `/`-separated path below this node.
    ///
    /// Intermediate segments become directories, the last one a file. Nodes
    /// that already exist are reused and keep the kind they were created with.
    pub fn insert(&mut self, path: &str) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let last = segments.len().saturating_sub(1);

        let mut current = self;
        for (i, segment) in segments.into_iter().enumerate() {
            current = current
                .children
                .entry(segment.to_string())
                .or_insert_with(|| {
                    if i == last {
                        TreeNode::file(segment)
                    } else {
                        TreeNode::directory(segment)
                    }
                });
        }
    }

    /// Child nodes in name order.
    pub fn children(&self) -> impl Iterator<Item = &TreeNode> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Count file nodes in this tree.
    pub fn file_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Directory => self.children().map(|c| c.file_count()).sum(),
        }
    }

    /// Count directory nodes in this tree, including this one.
    pub fn directory_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 0,
            NodeKind::Directory => 1 + self.children().map(|c| c.directory_count()).sum::<usize>(),
        }
    }

    /// Paths of every leaf below this node, in render order.
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaves(self, "", &mut paths);
        paths
    }
}

fn collect_leaves(node: &TreeNode, prefix: &str, out: &mut Vec<String>) {
    for child in node.children() {
        let path = if prefix.is_empty() {
            child.name.clone()
        } else {
            format!("{}/{}", prefix, child.name)
        };
        if child.children.is_empty() {
            out.push(path);
        } else {
            collect_leaves(child, &path, out);
        }
    }
}

/// Build a tree from accepted files.
///
/// # Examples
///
/// ```
/// use projectdump::tree::build_tree;
/// use projectdump::walker::FileRecord;
///
/// let files = vec![
///     FileRecord::new("a/x.go", String::new()),
///     FileRecord::new("a/b/y.go", String::new()),
/// ];
/// let root = build_tree(&files);
/// assert_eq!(root.file_count(), 2);
/// ```
pub fn build_tree(files: &[FileRecord]) -> TreeNode {
    let mut root = TreeNode::root();
    for file in files {
        root.insert(&file.path);
    }
    root
}

/// Box-drawing characters for tree rendering.
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

/// Render a tree with box-drawing characters. The root itself is not printed.
///
/// # Examples
///
/// ```
/// use projectdump::tree::{render_tree, TreeNode};
///
/// let mut root = TreeNode::root();
/// root.insert("src/main.rs");
/// assert_eq!(render_tree(&root), "└── src/\n    └── main.rs\n");
/// ```
pub fn render_tree(root: &TreeNode) -> String {
    let mut output = String::with_capacity(4096);
    render_children(&mut output, root, "");
    output
}

fn render_children(output: &mut String, node: &TreeNode, prefix: &str) {
    let child_count = node.children.len();
    for (i, child) in node.children().enumerate() {
        let is_last = i == child_count - 1;

        output.push_str(prefix);
        output.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        output.push_str(&child.name);
        if child.is_directory() {
            output.push('/');
        }
        output.push('\n');

        let continuation = if is_last { SPACE } else { VERTICAL };
        render_children(output, child, &format!("{}{}", prefix, continuation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<FileRecord> {
        paths.iter().map(|p| FileRecord::new(*p, String::new())).collect()
    }

    #[test]
    fn test_nested_structure() {
        let root = build_tree(&files(&["a/x.go", "a/b/y.go"]));

        assert_eq!(root.children().count(), 1);
        let a = root.child("a").unwrap();
        assert!(a.is_directory());
        assert_eq!(a.children().count(), 2);

        let x = a.child("x.go").unwrap();
        assert!(x.is_file());

        let b = a.child("b").unwrap();
        assert!(b.is_directory());
        assert_eq!(b.children().count(), 1);
        assert!(b.child("y.go").unwrap().is_file());
    }

    #[test]
    fn test_shared_prefixes_reuse_nodes() {
        let root = build_tree(&files(&["src/a.rs", "src/b.rs", "src/util/c.rs"]));
        assert_eq!(root.children().count(), 1);
        assert_eq!(root.file_count(), 3);
        assert_eq!(root.directory_count(), 3);
    }

    #[test]
    fn test_empty_segments_skipped() {
        let mut root = TreeNode::root();
        root.insert("/a//b.txt");
        assert_eq!(root.file_paths(), vec!["a/b.txt"]);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tree(&TreeNode::root()), "");
    }

    #[test]
    fn test_render_sorted_with_connectors() {
        let root = build_tree(&files(&["src/main.rs", "README.md", "src/lib/mod.rs", "Cargo.toml"]));
        let expected = "\
├── Cargo.toml
├── README.md
└── src/
    ├── lib/
    │   └── mod.rs
    └── main.rs
";
        assert_eq!(render_tree(&root), expected);
    }

    #[test]
    fn test_render_continuation_bars() {
        let root = build_tree(&files(&["a/one.txt", "b.txt"]));
        assert_eq!(render_tree(&root), "├── a/\n│   └── one.txt\n└── b.txt\n");
    }

    #[test]
    fn test_every_file_rendered_once_as_leaf() {
        let input = ["z.txt", "a/b/c.txt", "a/b/d.txt", "a/e.txt", "m/n.txt"];
        let root = build_tree(&files(&input));

        let mut expected: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(root.file_paths(), expected);

        let rendered = render_tree(&root);
        for name in ["z.txt", "c.txt", "d.txt", "e.txt", "n.txt"] {
            assert_eq!(rendered.matches(name).count(), 1, "{name}");
        }
    }
}
