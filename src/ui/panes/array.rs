//! Array pane rendering with value bars and mark colors
//!
//! This module renders the visualized array as a column chart. Bar color
//! follows the mark attached to each index, pointer arrows appear under
//! their target columns, and value and index labels sit below the bars.
//!
//! # Layout
//!
//! - Bar rows, tallest value scaled to the available height
//! - A baseline row when the array holds negative values, with negative
//!   bars hanging below it
//! - One row of value labels, one optional row of pointer arrows, and one
//!   row of index labels

use crate::timeline::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the array pane
pub fn render_array_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    snapshot: &Snapshot,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let values = &snapshot.array;
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    if values.is_empty() || inner_width == 0 || inner_height == 0 {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(border_style);
        let paragraph = Paragraph::new("(no array loaded)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let n = values.len();
    // Column width: bar glyphs plus a one-column gutter
    let cell = (inner_width / n).clamp(1, 6);
    let bar_width = cell.saturating_sub(1).max(1);
    let shown = n.min(inner_width / cell);

    let heading = if shown < n {
        format!(" {} ({} of {} shown) ", title, shown, n)
    } else {
        format!(" {} ", title)
    };
    let block = Block::default()
        .title(heading)
        .borders(Borders::ALL)
        .border_style(border_style);

    let has_pointers = !snapshot.pointers.is_empty();
    let reserved = if has_pointers { 3 } else { 2 };
    let chart_height = inner_height.saturating_sub(reserved).max(1);

    let max_pos = values.iter().copied().filter(|v| *v > 0).max().unwrap_or(0) as u64;
    let max_neg = values
        .iter()
        .copied()
        .filter(|v| *v < 0)
        .min()
        .unwrap_or(0)
        .unsigned_abs();

    // Split the chart vertically when negative values hang below a baseline.
    // Proportions are computed in u128: the script path feeds unvalidated
    // values that can sit at the i64 extremes.
    let (pos_rows, neg_rows) = if max_neg == 0 {
        (chart_height, 0)
    } else if max_pos == 0 {
        (0, chart_height.saturating_sub(1))
    } else {
        let below = chart_height.saturating_sub(1);
        let total = max_pos as u128 + max_neg as u128;
        let p = ((below as u128 * max_pos as u128).div_ceil(total) as usize).max(1);
        let p = p.min(below.saturating_sub(1).max(1));
        (p, below - p)
    };
    let has_baseline = max_neg != 0;

    // Rows a bar occupies on its side of the baseline, at least one for
    // any nonzero value
    let bar_rows = |v: i64| -> usize {
        if v > 0 && pos_rows > 0 {
            ((v as u128 * pos_rows as u128).div_ceil(max_pos as u128) as usize).min(pos_rows)
        } else if v < 0 && neg_rows > 0 {
            ((v.unsigned_abs() as u128 * neg_rows as u128).div_ceil(max_neg as u128) as usize)
                .min(neg_rows)
        } else {
            0
        }
    };

    let bar_style = |i: usize| -> Style {
        match snapshot.marks.get(&i) {
            Some(kind) => Style::default().fg(DEFAULT_THEME.mark(*kind)),
            None => Style::default().fg(DEFAULT_THEME.bar),
        }
    };

    let mut lines: Vec<Line> = Vec::with_capacity(chart_height + reserved);

    for row in 0..chart_height {
        let mut spans = Vec::with_capacity(shown);
        for (i, &v) in values.iter().take(shown).enumerate() {
            let filled = if row < pos_rows {
                v > 0 && row >= pos_rows - bar_rows(v)
            } else if has_baseline && row == pos_rows {
                // Baseline row separates the two halves
                spans.push(Span::styled(
                    "─".repeat(cell),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
                continue;
            } else {
                let depth = row - pos_rows - usize::from(has_baseline);
                v < 0 && depth < bar_rows(v)
            };

            if filled {
                let mut glyphs = "█".repeat(bar_width);
                glyphs.push_str(&" ".repeat(cell - bar_width));
                spans.push(Span::styled(glyphs, bar_style(i)));
            } else {
                spans.push(Span::raw(" ".repeat(cell)));
            }
        }
        lines.push(Line::from(spans));
    }

    // Value labels, colored like their bars when marked
    let mut value_spans = Vec::with_capacity(shown);
    for (i, &v) in values.iter().take(shown).enumerate() {
        let label = clip(&format!("{:^w$}", v, w = cell), cell);
        let style = match snapshot.marks.get(&i) {
            Some(kind) => Style::default()
                .fg(DEFAULT_THEME.mark(*kind))
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(DEFAULT_THEME.fg),
        };
        value_spans.push(Span::styled(label, style));
    }
    lines.push(Line::from(value_spans));

    if has_pointers {
        let mut arrows: Vec<Option<Span>> = vec![None; shown];
        for pointer in &snapshot.pointers {
            if pointer.index < shown && arrows[pointer.index].is_none() {
                arrows[pointer.index] = Some(Span::styled(
                    format!("{:^w$}", "▲", w = cell),
                    Style::default()
                        .fg(DEFAULT_THEME.tint(pointer.tint))
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }
        let spans: Vec<Span> = arrows
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Span::raw(" ".repeat(cell))))
            .collect();
        lines.push(Line::from(spans));
    }

    let index_spans: Vec<Span> = (0..shown)
        .map(|i| {
            Span::styled(
                clip(&format!("{:^w$}", i, w = cell), cell),
                Style::default().fg(DEFAULT_THEME.comment),
            )
        })
        .collect();
    lines.push(Line::from(index_spans));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Hard-truncate a label to the column width
fn clip(label: &str, width: usize) -> String {
    label.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(values: &[i64]) -> String {
        let snapshot = Snapshot::initial(values);
        let backend = TestBackend::new(44, 12);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| render_array_pane(frame, frame.area(), "Array", &snapshot, false))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_extreme_magnitudes_render_without_overflow() {
        let screen = rendered(&[i64::MAX, i64::MIN, 5]);
        assert!(screen.contains('█'), "bars should render");
        assert!(screen.contains("922337"), "clipped value labels should render");

        rendered(&[i64::MAX]);
        rendered(&[i64::MIN, i64::MIN + 1]);
        rendered(&[0, 0, 0]);
    }

    #[test]
    fn test_taller_values_fill_more_rows() {
        let bars = |values: &[i64]| rendered(values).matches('█').count();

        assert!(bars(&[4, 4, 4]) > bars(&[1, 1, 4]));
        assert_eq!(bars(&[0, 0, 0]), 0);
    }
}
