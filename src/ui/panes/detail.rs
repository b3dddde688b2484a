//! Detail pane rendering with script source or auxiliary state
//!
//! This module renders the bottom-right pane, whose content depends on the
//! loaded run:
//!
//! - Script runs show their source with syntax highlighting and the
//!   currently highlighted lines
//! - Algorithm runs show the auxiliary visualization when one is active
//!   (heap levels, counting buckets, or merge halves)
//! - Otherwise a placeholder
//!
//! # Rendering
//!
//! The source view uses a simple character-by-character tokenizer to apply
//! syntax highlighting styles without requiring a full lexer.

use crate::event::{AuxState, Bucket};
use crate::timeline::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the detail pane
pub struct DetailScrollState {
    pub offset: usize,
    /// Target visual row for the highlighted line (None = not initialized
    /// yet). Keeps the highlighted line at a fixed position when stepping.
    pub target_line_row: Option<usize>,
}

/// Simple syntax highlighting for script source
fn highlight_script_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    // Simple tokenizer
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Handle comments
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(
                rest,
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // Handle strings
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(Span::raw(current_word.clone()));
                current_word.clear();
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            if end < chars.len() {
                end += 1;
            }
            let text: String = chars[i..end.min(chars.len())].iter().collect();
            spans.push(Span::styled(
                text,
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Handle non-alphanumeric (delimiters)
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let is_func = c == '(';
                let style = get_keyword_style(&current_word, is_func);
                spans.push(Span::styled(current_word.clone(), style));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };

            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "let" | "if" | "else" | "while" | "for" | "break" | "continue" | "return" => {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        }
        "true" | "false" => Style::default().fg(DEFAULT_THEME.number),
        "arr" => Style::default().fg(DEFAULT_THEME.secondary),
        _ => {
            if word.chars().all(|c| c.is_ascii_digit()) {
                Style::default().fg(DEFAULT_THEME.number)
            } else if is_function {
                Style::default().fg(DEFAULT_THEME.warning)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }
    }
}

/// Render the detail pane
pub fn render_detail_pane(
    frame: &mut Frame,
    area: Rect,
    source: Option<&str>,
    snapshot: &Snapshot,
    is_focused: bool,
    scroll_state: &mut DetailScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    if let Some(source) = source {
        render_source_view(frame, area, source, snapshot, border_style, scroll_state);
        return;
    }

    match &snapshot.aux {
        Some(AuxState::Heap {
            nodes,
            heap_size,
            active,
        }) => render_heap_view(frame, area, nodes, *heap_size, active, border_style),
        Some(AuxState::Buckets { buckets }) => {
            render_buckets_view(frame, area, buckets, border_style, &mut scroll_state.offset)
        }
        Some(AuxState::Merge {
            left,
            right,
            merged,
        }) => render_merge_view(frame, area, left, right, merged, border_style),
        None => {
            let block = Block::default()
                .title(" Detail ")
                .borders(Borders::ALL)
                .border_style(border_style);
            let paragraph = Paragraph::new("(nothing to inspect)")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
        }
    }
}

fn render_source_view(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    snapshot: &Snapshot,
    border_style: Style,
    scroll_state: &mut DetailScrollState,
) {
    let block = Block::default()
        .title(" Script ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Initialize target_line_row to center if not set
    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Track the first highlighted line, keeping it at the target visual row
    if let Some(&line) = snapshot.highlighted.first() {
        if line > 0 && line <= total_lines {
            scroll_state.offset = line.saturating_sub(1).saturating_sub(target_row);
        }
    }
    if total_lines > visible_height {
        let max_scroll = total_lines - visible_height;
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_lit = snapshot.highlighted.binary_search(&line_num).is_ok();
            let line_num_str = format!("{:4} ", line_num);

            let (num_style, content_base_style) = if is_lit {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), Style::default())
            };

            let mut content_line = highlight_script_line(line);
            if is_lit {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(content_base_style);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_heap_view(
    frame: &mut Frame,
    area: Rect,
    nodes: &[i64],
    heap_size: usize,
    active: &[usize],
    border_style: Style,
) {
    let block = Block::default()
        .title(format!(" Heap (size {}) ", heap_size))
        .borders(Borders::ALL)
        .border_style(border_style);

    if nodes.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // One line per level; children of i live at 2i+1 and 2i+2
    let mut lines: Vec<Line> = Vec::new();
    let mut level_start = 0usize;
    let mut level_width = 1usize;
    while level_start < nodes.len() {
        let mut spans: Vec<Span> = Vec::new();
        for (offset, &value) in nodes
            .iter()
            .skip(level_start)
            .take(level_width)
            .enumerate()
        {
            let index = level_start + offset;
            let style = if active.contains(&index) {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if index >= heap_size {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            if offset > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(value.to_string(), style));
        }
        lines.push(Line::from(spans));
        level_start += level_width;
        level_width *= 2;
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_buckets_view(
    frame: &mut Frame,
    area: Rect,
    buckets: &[Bucket],
    border_style: Style,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Buckets ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let all_items: Vec<ListItem> = buckets
        .iter()
        .map(|bucket| {
            let count = bucket.items.len();
            let mut spans = vec![
                Span::styled(
                    format!("{:>4} ", bucket.label),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
            ];
            if count > 0 {
                spans.push(Span::styled(
                    "█".repeat(count),
                    Style::default().fg(DEFAULT_THEME.primary),
                ));
                spans.push(Span::styled(
                    format!(" {}", count),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

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

fn render_merge_view(
    frame: &mut Frame,
    area: Rect,
    left: &[i64],
    right: &[i64],
    merged: &[i64],
    border_style: Style,
) {
    let block = Block::default()
        .title(" Merge ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let row = |label: &'static str, values: &[i64], color| {
        Line::from(vec![
            Span::styled(
                format!(" {:<7}", label),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(format!("{:?}", values), Style::default().fg(color)),
        ])
    };

    let lines = vec![
        row("left", left, DEFAULT_THEME.primary),
        row("right", right, DEFAULT_THEME.secondary),
        row("merged", merged, DEFAULT_THEME.success),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
