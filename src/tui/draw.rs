use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState},
};

use super::session::Session;

const PROMPT: &str = "> ";

/// Render one frame: prompt line with the query and its cursor, an
/// info line, then the visible tree slice.
pub(super) fn frame(frame: &mut Frame, session: &mut Session, max_height: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // prompt + query
            Constraint::Length(1), // info line
            Constraint::Min(0),    // tree
        ])
        .split(frame.area());

    draw_prompt(frame, session, chunks[0]);
    draw_info(frame, session, chunks[1]);
    draw_tree(frame, session, chunks[2], max_height);
}

fn draw_prompt(frame: &mut Frame, session: &Session, area: Rect) {
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(Color::Blue)),
        Span::raw(session.query().to_string()),
    ]);
    frame.render_widget(line, area);
    let x = area.x + PROMPT.len() as u16 + session.cursor() as u16;
    frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
}

fn draw_info(frame: &mut Frame, session: &Session, area: Rect) {
    let (shown, total) = session.counts();
    let info = Span::styled(
        format!("(shown: {shown}, total: {total})"),
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(Line::from(info), area);
}

fn draw_tree(frame: &mut Frame, session: &mut Session, area: Rect, max_height: usize) {
    let viewport = (area.height as usize).min(max_height);
    session.ensure_selected_visible(viewport);

    let scroll = session.scroll();
    let end = (scroll + viewport).min(session.rows().len());
    let items: Vec<ListItem> = session.rows()[scroll..end]
        .iter()
        .map(|row| ListItem::new(row_line(row)))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray));

    let mut state = ListState::default();
    if session.selected() >= scroll && session.selected() < end {
        state.select(Some(session.selected() - scroll));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_line(row: &crate::view::RenderRow) -> Line<'static> {
    let mut spans = vec![Span::styled(
        row.prefix.clone(),
        Style::default().fg(Color::DarkGray),
    )];
    if row.is_dir && row.collapsed {
        spans.push(Span::styled("▸ ", Style::default().fg(Color::Blue)));
    }
    spans.extend(name_spans(&row.name, &row.positions, row.is_dir));
    Line::from(spans)
}

/// Split the display name into plain and highlighted spans, grouping
/// consecutive matched characters.
fn name_spans(name: &str, positions: &[usize], is_dir: bool) -> Vec<Span<'static>> {
    let base = if is_dir {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };
    let hit = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;
    for (i, c) in name.chars().enumerate() {
        let matched = positions.contains(&i);
        if matched != run_matched && !run.is_empty() {
            spans.push(Span::styled(
                std::mem::take(&mut run),
                if run_matched { hit } else { base },
            ));
        }
        run_matched = matched;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, if run_matched { hit } else { base }));
    }
    spans
}
