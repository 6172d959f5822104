//! Turns the tree plus the current match set into render-ready rows.

use crate::matcher::Match;
use crate::tree::{NodeId, Tree};

/// One line of the rendered tree: branch prefix, display name, and
/// the matched char offsets into that name for highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub node: NodeId,
    pub prefix: String,
    /// Segment name; non-root directories carry a trailing `/`.
    pub name: String,
    pub is_dir: bool,
    pub collapsed: bool,
    pub positions: Vec<usize>,
}

impl RenderRow {
    /// Full display text, prefix included.
    pub fn label(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

/// Compute the ordered visible rows: pre-order over the tree, keeping
/// a node when it matches the query directly or is a directory
/// ancestor of at least one match (an empty query matches every
/// node). Descendants of a collapsed directory are excluded outright;
/// the collapsed directory itself stays visible when kept.
pub fn visible_rows(tree: &Tree, matches: &[Option<Match>]) -> Vec<RenderRow> {
    if tree.is_empty() {
        return Vec::new();
    }
    let keep = keep_set(tree, matches);
    if !keep[Tree::ROOT] {
        return Vec::new();
    }
    let mut rows = Vec::new();
    emit(tree, matches, &keep, Tree::ROOT, &mut Vec::new(), &mut rows);
    rows
}

/// Mark every matching node plus all its ancestors. Children always
/// have larger arena ids than their parent, so one reverse sweep
/// propagates visibility bottom-up.
fn keep_set(tree: &Tree, matches: &[Option<Match>]) -> Vec<bool> {
    let mut keep = vec![false; tree.len()];
    for id in (0..tree.len()).rev() {
        if matches[id].is_some() {
            keep[id] = true;
        }
        if keep[id] {
            if let Some(parent) = tree.node(id).parent {
                keep[parent] = true;
            }
        }
    }
    keep
}

fn emit(
    tree: &Tree,
    matches: &[Option<Match>],
    keep: &[bool],
    id: NodeId,
    last_stack: &mut Vec<bool>,
    rows: &mut Vec<RenderRow>,
) {
    let entry = tree.node(id);
    rows.push(make_row(tree, id, last_stack, matches[id].as_ref()));

    if entry.is_dir && !entry.collapsed {
        let kept: Vec<NodeId> = entry
            .children
            .iter()
            .copied()
            .filter(|&c| keep[c])
            .collect();
        for (i, &child) in kept.iter().enumerate() {
            last_stack.push(i + 1 == kept.len());
            emit(tree, matches, keep, child, last_stack, rows);
            last_stack.pop();
        }
    }
}

fn make_row(tree: &Tree, id: NodeId, last_stack: &[bool], hit: Option<&Match>) -> RenderRow {
    let entry = tree.node(id);

    let mut prefix = String::new();
    if let Some((&last, ancestors)) = last_stack.split_last() {
        for &ancestor_last in ancestors {
            prefix.push_str(if ancestor_last { "    " } else { "│   " });
        }
        prefix.push_str(if last { "└── " } else { "├── " });
    }

    let mut name = entry.name.clone();
    if entry.is_dir && id != Tree::ROOT {
        name.push('/');
    }

    // Matched offsets are relative to the full path; report only the
    // ones that land inside the displayed name.
    let name_offset = entry.full_path.chars().count() - entry.name.chars().count();
    let positions = hit
        .map(|m| {
            m.positions
                .iter()
                .filter(|&&p| p >= name_offset)
                .map(|&p| p - name_offset)
                .collect()
        })
        .unwrap_or_default();

    RenderRow {
        node: id,
        prefix,
        name,
        is_dir: entry.is_dir,
        collapsed: entry.collapsed,
        positions,
    }
}
