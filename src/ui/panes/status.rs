//! Status bar rendering with keybindings and playback state

use crate::player::{PlaybackState, Speed};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    current_step: usize,
    total_steps: usize,
    progress: f64,
    state: PlaybackState,
    speed: Speed,
) {
    // Split status bar into left and right
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(50),
            ratatui::layout::Constraint::Percentage(50),
        ])
        .split(area);

    // Left side: Step info and status
    let step_text = format!(
        " Step {}/{} ({:.0}%) ",
        current_step + 1,
        total_steps,
        progress * 100.0
    );
    let step_bg = match state {
        PlaybackState::Playing => DEFAULT_THEME.secondary,
        PlaybackState::Finished => DEFAULT_THEME.success,
        PlaybackState::Paused => DEFAULT_THEME.primary,
        PlaybackState::Idle => DEFAULT_THEME.comment,
    };

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(step_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" [/] ", key_style),
        Span::styled(" speed ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ / ⌫ ", key_style),
        Span::styled(" end/start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    right_spans.push(Span::styled("│", sep_style));
    right_spans.push(Span::styled(
        format!(" {} ", speed.label()),
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(DEFAULT_THEME.primary),
    ));

    let badge = match state {
        PlaybackState::Playing => Some(("▶", DEFAULT_THEME.secondary)),
        PlaybackState::Finished => Some(("■", DEFAULT_THEME.success)),
        PlaybackState::Paused => Some(("‖", DEFAULT_THEME.primary)),
        PlaybackState::Idle => None,
    };
    if let Some((glyph, bg)) = badge {
        right_spans.push(Span::styled(
            format!(" {} {} ", glyph, state.as_str().to_uppercase()),
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: PlaybackState) -> String {
        let backend = TestBackend::new(220, 1);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                render_status_bar(
                    frame,
                    frame.area(),
                    "ready",
                    0,
                    8,
                    0.0,
                    state,
                    Speed::Normal,
                )
            })
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
    fn test_badge_spells_out_the_playback_state() {
        assert!(rendered(PlaybackState::Playing).contains("PLAYING"));
        assert!(rendered(PlaybackState::Paused).contains("PAUSED"));
        assert!(rendered(PlaybackState::Finished).contains("FINISHED"));
        assert!(!rendered(PlaybackState::Idle).contains("IDLE"));
    }
}
