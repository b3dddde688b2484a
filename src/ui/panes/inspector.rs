//! Inspector pane rendering with pointers, variables, and metrics
//!
//! This module renders the bookkeeping attached to the current snapshot:
//! named pointers with their palette tints, tracked variables, counters,
//! the watched expression, and the terminal outcome once one is set.

use crate::event::OutcomeKind;
use crate::timeline::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn section_header(title: &'static str) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(
            title,
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
}

/// Render the inspector pane
pub fn render_inspector_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
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
        .title(" Inspector ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items: Vec<ListItem> = Vec::new();

    if !snapshot.pointers.is_empty() {
        all_items.push(section_header("Pointers"));
        for pointer in &snapshot.pointers {
            all_items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!("  {} ", pointer.name),
                    Style::default()
                        .fg(DEFAULT_THEME.tint(pointer.tint))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("→ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("[{}]", pointer.index),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ])));
        }
    }

    if !snapshot.variables.is_empty() {
        all_items.push(section_header("Variables"));
        for (name, value) in &snapshot.variables {
            all_items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {} ", name), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled("= ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    value.to_string(),
                    Style::default().fg(DEFAULT_THEME.number),
                ),
            ])));
        }
    }

    if !snapshot.metrics.is_empty() {
        all_items.push(section_header("Metrics"));
        for (name, value) in &snapshot.metrics {
            all_items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {} ", name), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(
                    value.to_string(),
                    Style::default()
                        .fg(DEFAULT_THEME.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ])));
        }
    }

    if let Some(expression) = &snapshot.expression {
        all_items.push(section_header("Watch"));
        all_items.push(ListItem::new(Line::from(Span::styled(
            format!("  {}", expression),
            Style::default().fg(DEFAULT_THEME.string),
        ))));
    }

    if let Some(outcome) = &snapshot.outcome {
        all_items.push(section_header("Outcome"));
        let (word, color) = match outcome.kind {
            OutcomeKind::Found => ("found", DEFAULT_THEME.success),
            OutcomeKind::NotFound => ("not found", DEFAULT_THEME.error),
            OutcomeKind::Completed => ("completed", DEFAULT_THEME.success),
        };
        let mut spans = vec![Span::styled(
            format!("  {}", word),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        if let Some(value) = outcome.value {
            spans.push(Span::styled(
                format!("  value {}", value),
                Style::default().fg(DEFAULT_THEME.number),
            ));
        }
        if let Some(label) = &outcome.label {
            spans.push(Span::styled(
                format!("  {}", label),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }
        all_items.push(ListItem::new(Line::from(spans)));
    }

    if all_items.is_empty() {
        all_items.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
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
