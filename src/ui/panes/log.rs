//! Log pane rendering with narration and captured script output

use crate::event::Event;
use crate::timeline::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the log pane
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    last_event: Option<&Event>,
    logs: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items: Vec<ListItem> = Vec::new();

    // Current narration first, styled by its level
    all_items.push(ListItem::new(Line::from(vec![
        Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(
            snapshot.message.clone(),
            Style::default()
                .fg(DEFAULT_THEME.level(snapshot.message_level))
                .add_modifier(Modifier::BOLD),
        ),
    ])));

    if let Some(event) = last_event {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!("  {:>9} ", event.kind_name()),
                Style::default().fg(DEFAULT_THEME.primary),
            ),
            Span::styled(event.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
        ])));
    }

    for line in logs {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("· ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(line.clone(), Style::default().fg(DEFAULT_THEME.fg)),
        ])));
    }

    // Clamp scroll offset only if content exceeds visible area
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
