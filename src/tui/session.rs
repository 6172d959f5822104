use crate::cache::MatchCache;
use crate::matcher::{Match, Matcher};
use crate::tree::Tree;
use crate::tui::events::InputEvent;
use crate::view::{self, RenderRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The query is being typed; selection tracks the best match.
    Editing,
    /// Selection moves independently of typing.
    Navigating,
    /// A directory's collapse state was just flipped.
    Toggling,
}

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(String),
    Cancelled,
}

/// All mutable session state: query, selection, collapse flags and
/// the derived match/row sets. Owned exclusively by one event loop;
/// constructed at session start, discarded at exit.
pub struct Session {
    tree: Tree,
    matcher: Matcher,
    cache: MatchCache,
    query: String,
    /// Char index of the insertion point within `query`.
    cursor: usize,
    selected: usize,
    scroll: usize,
    mode: Mode,
    /// Selection was placed by explicit navigation and should follow
    /// its node across re-filters instead of jumping to the best
    /// match.
    pinned: bool,
    matches: Vec<Option<Match>>,
    rows: Vec<RenderRow>,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(tree: Tree, matcher: Matcher, cache: MatchCache) -> Session {
        let mut session = Session {
            tree,
            matcher,
            cache,
            query: String::new(),
            cursor: 0,
            selected: 0,
            scroll: 0,
            mode: Mode::Editing,
            pinned: false,
            matches: Vec::new(),
            rows: Vec::new(),
            outcome: None,
        };
        session.refilter();
        session
    }

    pub fn rows(&self) -> &[RenderRow] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Shown/total counts for the info line.
    pub fn counts(&self) -> (usize, usize) {
        let total = if self.tree.is_empty() {
            0
        } else {
            self.tree.len()
        };
        (self.rows.len(), total)
    }

    pub fn skipped(&self) -> usize {
        self.tree.skipped()
    }

    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.outcome.take()
    }

    /// Process one input event: mutate state, then recompute matches
    /// and rows as the event demands. Rendering happens outside.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char(c) => {
                let at = self.byte_cursor();
                self.query.insert(at, c);
                self.cursor += 1;
                self.mode = Mode::Editing;
                self.refilter();
            }
            InputEvent::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_cursor();
                    self.query.remove(at);
                    self.mode = Mode::Editing;
                    self.refilter();
                }
            }
            InputEvent::Delete => {
                if self.cursor < self.query.chars().count() {
                    let at = self.byte_cursor();
                    self.query.remove(at);
                    self.mode = Mode::Editing;
                    self.refilter();
                }
            }
            InputEvent::CursorLeft => self.cursor = self.cursor.saturating_sub(1),
            InputEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.query.chars().count());
            }
            InputEvent::CursorHome => self.cursor = 0,
            InputEvent::CursorEnd => self.cursor = self.query.chars().count(),
            InputEvent::Up => {
                self.mode = Mode::Navigating;
                self.pinned = true;
                self.selected = self.selected.saturating_sub(1);
            }
            InputEvent::Down => {
                self.mode = Mode::Navigating;
                self.pinned = true;
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            InputEvent::ToggleCollapse => {
                self.mode = Mode::Toggling;
                if let Some(row) = self.rows.get(self.selected) {
                    if row.is_dir {
                        self.pinned = true;
                        self.tree.toggle_collapse(row.node);
                        // View-only change: matches and cache are
                        // untouched, tree content did not change.
                        self.reshape();
                    }
                }
            }
            InputEvent::Confirm => {
                // No-op with zero visible rows.
                if let Some(row) = self.rows.get(self.selected) {
                    let path = self.tree.node(row.node).full_path.clone();
                    self.outcome = Some(Outcome::Confirmed(path));
                }
            }
            InputEvent::Cancel => self.outcome = Some(Outcome::Cancelled),
            InputEvent::Resize => {} // redraw only, no recompute
        }
    }

    /// Clamp the scroll window so the selected row is drawn.
    pub fn ensure_selected_visible(&mut self, viewport: usize) {
        if viewport == 0 || self.rows.is_empty() {
            self.scroll = 0;
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + viewport {
            self.scroll = self.selected + 1 - viewport;
        }
        let max = self.rows.len().saturating_sub(viewport);
        self.scroll = self.scroll.min(max);
    }

    /// Score the current query against every node, through the cache,
    /// then rebuild the rows.
    fn refilter(&mut self) {
        if let Some(hit) = self.cache.get(&self.query) {
            self.matches = hit.clone();
        } else {
            let computed: Vec<Option<Match>> = (0..self.tree.len())
                .map(|id| self.matcher.score(&self.tree.node(id).full_path, &self.query))
                .collect();
            self.cache.put(self.query.clone(), computed.clone());
            self.matches = computed;
        }
        self.reshape();
    }

    /// Rebuild visible rows and re-seat the selection: a pinned
    /// selection follows its node while it stays visible; otherwise
    /// (or when the node dropped out) the best-scoring row wins,
    /// which is the first row when all scores tie.
    fn reshape(&mut self) {
        let previous = self.rows.get(self.selected).map(|r| r.node);
        self.rows = view::visible_rows(&self.tree, &self.matches);

        let followed = if self.pinned {
            previous.and_then(|node| self.rows.iter().position(|r| r.node == node))
        } else {
            None
        };
        self.selected = followed.unwrap_or_else(|| self.best_row());
        if followed.is_none() {
            self.pinned = false;
        }
    }

    fn best_row(&self) -> usize {
        let mut best = 0;
        let mut best_score: Option<i32> = None;
        for (i, row) in self.rows.iter().enumerate() {
            if let Some(hit) = &self.matches[row.node] {
                if best_score.is_none_or(|b| hit.score > b) {
                    best = i;
                    best_score = Some(hit.score);
                }
            }
        }
        best
    }

    fn byte_cursor(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }
}
