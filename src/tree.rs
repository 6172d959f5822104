use crate::error::{Error, Result};

pub type NodeId = usize;

/// One node of the path tree. Children are owned by index into the
/// tree's arena; `parent` is a non-owning back-link used for path
/// reconstruction and ancestor checks.
#[derive(Debug)]
pub struct PathEntry {
    pub name: String,
    /// Root-relative path, `.` for the root itself.
    pub full_path: String,
    pub is_dir: bool,
    /// Only ever true on directories.
    pub collapsed: bool,
    pub depth: usize,
    pub parent: Option<NodeId>,
    /// Sorted by child name at all times.
    pub children: Vec<NodeId>,
}

/// Hierarchical view of a flat path list. Built once per invocation;
/// structurally immutable afterwards except for `collapsed` flags.
pub struct Tree {
    nodes: Vec<PathEntry>,
    skipped: usize,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    /// Build a tree from producer lines. A line ending in `/` names a
    /// directory; interior segments are directories by construction.
    /// Lines that cannot be interpreted as a relative path under the
    /// root are counted and skipped, never fatal. Empty lines are
    /// skipped silently.
    ///
    /// Directories with more than `collapse_threshold` children start
    /// collapsed (the root is always left expanded).
    pub fn build<I, S>(lines: I, collapse_threshold: usize) -> Tree
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = PathEntry {
            name: ".".to_string(),
            full_path: ".".to_string(),
            is_dir: true,
            collapsed: false,
            depth: 0,
            parent: None,
            children: Vec::new(),
        };
        let mut tree = Tree {
            nodes: vec![root],
            skipped: 0,
        };

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(None) => {} // the root itself ("." or "./")
                Ok(Some((segments, is_dir))) => tree.insert(&segments, is_dir),
                Err(_) => tree.skipped += 1,
            }
        }

        tree.collapse_over(collapse_threshold);
        tree
    }

    /// Number of producer lines that could not be interpreted as paths.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no real entry was inserted (the arena holds only the
    /// synthetic root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> &PathEntry {
        &self.nodes[id]
    }

    /// Flip the collapsed flag of a directory node. No-op on files and
    /// out-of-range ids.
    pub fn toggle_collapse(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.is_dir {
                node.collapsed = !node.collapsed;
            }
        }
    }

    /// Pre-order traversal respecting collapse state.
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk(Self::ROOT, &mut out);
        out
    }

    fn walk(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let node = &self.nodes[id];
        if node.is_dir && !node.collapsed {
            for &child in &node.children {
                self.walk(child, out);
            }
        }
    }

    fn insert(&mut self, segments: &[&str], last_is_dir: bool) {
        let mut cur = Self::ROOT;
        for (i, seg) in segments.iter().enumerate() {
            let terminal = i + 1 == segments.len();
            let is_dir = !terminal || last_is_dir;
            cur = self.child(cur, seg, is_dir);
        }
    }

    /// Find or create the child of `parent` named `name`, keeping the
    /// sibling list sorted. An existing node is upgraded to a
    /// directory when a later line proves it is one.
    fn child(&mut self, parent: NodeId, name: &str, is_dir: bool) -> NodeId {
        let search = self.nodes[parent]
            .children
            .binary_search_by(|&c| self.nodes[c].name.as_str().cmp(name));
        match search {
            Ok(i) => {
                let id = self.nodes[parent].children[i];
                if is_dir {
                    self.nodes[id].is_dir = true;
                }
                id
            }
            Err(i) => {
                let id = self.nodes.len();
                let full_path = if parent == Self::ROOT {
                    name.to_string()
                } else {
                    format!("{}/{}", self.nodes[parent].full_path, name)
                };
                let depth = self.nodes[parent].depth + 1;
                self.nodes.push(PathEntry {
                    name: name.to_string(),
                    full_path,
                    is_dir,
                    collapsed: false,
                    depth,
                    parent: Some(parent),
                    children: Vec::new(),
                });
                self.nodes[parent].children.insert(i, id);
                id
            }
        }
    }

    fn collapse_over(&mut self, threshold: usize) {
        for node in self.nodes.iter_mut().skip(1) {
            if node.is_dir && node.children.len() > threshold {
                node.collapsed = true;
            }
        }
    }
}

/// Split a producer line into path segments plus its directory flag.
/// Absolute paths and `..` traversal cannot be placed under the root
/// and are malformed. `Ok(None)` means the line names the root itself.
fn parse_line(line: &str) -> Result<Option<(Vec<&str>, bool)>> {
    if line.starts_with('/') {
        return Err(Error::MalformedInput {
            line: line.to_string(),
        });
    }
    let is_dir = line.ends_with('/');
    let segments: Vec<&str> = line
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.iter().any(|s| *s == "..") {
        return Err(Error::MalformedInput {
            line: line.to_string(),
        });
    }
    if segments.is_empty() {
        return Ok(None);
    }
    Ok(Some((segments, is_dir)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines() -> Vec<&'static str> {
        vec![
            "A",
            "B",
            "src/",
            "src/bayes/",
            "src/bayes/blend.c",
            "src/bayes/rand.c",
            "src/cakes/",
            "src/cakes/a.c",
            "src/cakes/b.c",
            "x.txt",
        ]
    }

    fn names(tree: &Tree, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| tree.node(id).name.clone()).collect()
    }

    #[test]
    fn builds_expected_shape() {
        let tree = Tree::build(sample_lines(), usize::MAX);
        assert_eq!(tree.len(), 11);
        assert_eq!(tree.skipped(), 0);

        let flat = tree.flatten();
        assert_eq!(
            names(&tree, &flat),
            vec![
                ".", "A", "B", "src", "bayes", "blend.c", "rand.c", "cakes", "a.c", "b.c", "x.txt"
            ]
        );

        let root = tree.node(Tree::ROOT);
        assert!(root.is_dir);
        assert_eq!(root.depth, 0);
        assert_eq!(root.children.len(), 4);
    }

    #[test]
    fn ordering_is_independent_of_input_order() {
        let mut shuffled = sample_lines();
        shuffled.reverse();
        let a = Tree::build(sample_lines(), usize::MAX);
        let b = Tree::build(shuffled, usize::MAX);
        let paths = |t: &Tree| {
            t.flatten()
                .iter()
                .map(|&id| t.node(id).full_path.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(paths(&a), paths(&b));
    }

    #[test]
    fn intermediate_directories_are_created_and_upgraded() {
        // No explicit line for `src` or `src/bayes`; both must exist
        // as directories anyway.
        let tree = Tree::build(["src/bayes/blend.c"], usize::MAX);
        let flat = tree.flatten();
        assert_eq!(names(&tree, &flat), vec![".", "src", "bayes", "blend.c"]);
        assert!(tree.node(flat[1]).is_dir);
        assert!(tree.node(flat[2]).is_dir);
        assert!(!tree.node(flat[3]).is_dir);
    }

    #[test]
    fn malformed_lines_are_counted_not_fatal() {
        let tree = Tree::build(["ok.txt", "/etc/passwd", "../escape", "", "  "], usize::MAX);
        assert_eq!(tree.skipped(), 2);
        assert_eq!(tree.len(), 2); // root + ok.txt
    }

    #[test]
    fn duplicate_lines_do_not_duplicate_nodes() {
        let tree = Tree::build(["a/b.txt", "a/b.txt", "a/"], usize::MAX);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn full_paths_reconstruct_the_input() {
        let tree = Tree::build(sample_lines(), usize::MAX);
        let flat = tree.flatten();
        assert_eq!(tree.node(flat[9]).full_path, "src/cakes/b.c");
        assert_eq!(tree.node(flat[10]).full_path, "x.txt");
    }

    #[test]
    fn round_trip_rebuild_is_structurally_identical() {
        let original = Tree::build(sample_lines(), usize::MAX);
        let relisted: Vec<String> = original
            .flatten()
            .iter()
            .skip(1) // the root is synthetic
            .map(|&id| {
                let node = original.node(id);
                if node.is_dir {
                    format!("{}/", node.full_path)
                } else {
                    node.full_path.clone()
                }
            })
            .collect();
        let rebuilt = Tree::build(relisted.iter().map(String::as_str), usize::MAX);

        assert_eq!(original.len(), rebuilt.len());
        for (&a, &b) in original.flatten().iter().zip(rebuilt.flatten().iter()) {
            assert_eq!(original.node(a).name, rebuilt.node(b).name);
            assert_eq!(original.node(a).is_dir, rebuilt.node(b).is_dir);
            assert_eq!(original.node(a).depth, rebuilt.node(b).depth);
        }
    }

    #[test]
    fn flatten_respects_collapse() {
        let mut tree = Tree::build(sample_lines(), usize::MAX);
        let src = tree
            .flatten()
            .into_iter()
            .find(|&id| tree.node(id).name == "src")
            .unwrap();
        tree.toggle_collapse(src);
        let flat = tree.flatten();
        assert_eq!(names(&tree, &flat), vec![".", "A", "B", "src", "x.txt"]);
        tree.toggle_collapse(src);
        assert_eq!(tree.flatten().len(), 11);
    }

    #[test]
    fn toggle_is_a_noop_on_files_and_bad_ids() {
        let mut tree = Tree::build(["x.txt"], usize::MAX);
        let file = tree.flatten()[1];
        tree.toggle_collapse(file);
        assert!(!tree.node(file).collapsed);
        tree.toggle_collapse(999);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn collapse_threshold_applies_at_build_time() {
        let lines: Vec<String> = (0..12).map(|i| format!("big/f{i:02}.txt")).collect();
        let tree = Tree::build(lines.iter().map(String::as_str), 10);
        let big = tree.flatten()[1];
        assert_eq!(tree.node(big).name, "big");
        assert!(tree.node(big).collapsed);

        // Root is exempt even with many children.
        let lines: Vec<String> = (0..12).map(|i| format!("f{i:02}.txt")).collect();
        let tree = Tree::build(lines.iter().map(String::as_str), 10);
        assert!(!tree.node(Tree::ROOT).collapsed);
    }

    #[test]
    fn empty_input_yields_only_the_root() {
        let tree = Tree::build(Vec::<&str>::new(), 10);
        assert!(tree.is_empty());
        assert_eq!(tree.flatten(), vec![Tree::ROOT]);
    }
}
