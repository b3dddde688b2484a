//! Main TUI application state and logic

use crate::player::{PlaybackState, Player};
use crate::ui::panes::DetailScrollState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Array,
    Inspector,
    Detail,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: array -> inspector -> detail -> log)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Array => FocusedPane::Inspector,
            FocusedPane::Inspector => FocusedPane::Detail,
            FocusedPane::Detail => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Array,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Array => FocusedPane::Log,
            FocusedPane::Inspector => FocusedPane::Array,
            FocusedPane::Detail => FocusedPane::Inspector,
            FocusedPane::Log => FocusedPane::Detail,
        }
    }
}

/// The main application state
pub struct App {
    /// Playback controller holding the loaded run
    pub player: Player,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub inspector_scroll: usize,
    pub log_scroll: usize,
    pub detail_scroll: DetailScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around a prepared player
    pub fn new(player: Player) -> Self {
        App {
            player,
            focused_pane: FocusedPane::Array,
            inspector_scroll: 0,
            log_scroll: 0,
            detail_scroll: DetailScrollState {
                offset: 0,
                target_line_row: None, // Will be set to center on first render
            },
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive auto-play from the shared clock
            if self.player.tick(Instant::now()) {
                if self.player.state() == PlaybackState::Finished {
                    self.status_message = "Playback complete".to_string();
                } else {
                    self.status_message = "Playing...".to_string();
                }
                self.log_scroll = usize::MAX;
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Array (top) | Log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Inspector (top) | Detail (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let position = self.player.position();
        let snapshot = self.player.current();
        let run = self.player.run();

        super::panes::render_array_pane(
            frame,
            left_rows[0],
            &run.title,
            snapshot,
            self.focused_pane == FocusedPane::Array,
        );

        super::panes::render_log_pane(
            frame,
            left_rows[1],
            snapshot,
            run.timeline.event_leading_to(position),
            &run.logs,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        super::panes::render_inspector_pane(
            frame,
            right_rows[0],
            snapshot,
            self.focused_pane == FocusedPane::Inspector,
            &mut self.inspector_scroll,
        );

        super::panes::render_detail_pane(
            frame,
            right_rows[1],
            run.source.as_deref(),
            snapshot,
            self.focused_pane == FocusedPane::Detail,
            &mut self.detail_scroll,
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.player.position(),
            self.player.total_steps(),
            self.player.progress(),
            self.player.state(),
            self.player.speed(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.player.step_back();
                self.status_message = "Stepped backward".to_string();
                self.log_scroll = usize::MAX;
            }
            KeyCode::Right => {
                self.player.step();
                if self.player.state() == PlaybackState::Finished {
                    self.status_message = "End of run".to_string();
                } else {
                    self.status_message = "Stepped forward".to_string();
                }
                self.log_scroll = usize::MAX;
            }
            // Number keys step forward that many times
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).unwrap_or(0) as usize;
                let before = self.player.position();
                for _ in 0..n {
                    self.player.step();
                }
                let moved = self.player.position() - before;
                self.status_message = format!("Stepped {} forward", moved);
                self.log_scroll = usize::MAX;
            }
            KeyCode::Char(' ') => {
                // Toggle play/pause (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.player.toggle(Instant::now());
                    if self.player.state() == PlaybackState::Playing {
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of the run
                let last = self.player.total_steps().saturating_sub(1);
                self.player.seek(last);
                self.status_message = "Jumped to end".to_string();
                self.log_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                // Jump to start of the run
                self.player.seek(0);
                self.status_message = "Jumped to start".to_string();
                self.log_scroll = 0;
            }
            KeyCode::Char('r') => {
                self.player.reset();
                self.status_message = "Reset".to_string();
                self.log_scroll = 0;
            }
            KeyCode::Char('[') => {
                let slower = self.player.speed().slower();
                self.player.set_speed(slower, Instant::now());
                self.status_message = format!("Speed: {}", slower.label());
            }
            KeyCode::Char(']') => {
                let faster = self.player.speed().faster();
                self.player.set_speed(faster, Instant::now());
                self.status_message = format!("Speed: {}", faster.label());
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Array => {}
                FocusedPane::Inspector => {
                    self.inspector_scroll = self.inspector_scroll.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
                FocusedPane::Detail => {
                    if self.player.run().source.is_some() {
                        // Scrolling up makes the highlighted line move down visually
                        if let Some(row) = self.detail_scroll.target_line_row {
                            self.detail_scroll.target_line_row = Some(row.saturating_add(1));
                        }
                    } else {
                        self.detail_scroll.offset = self.detail_scroll.offset.saturating_sub(1);
                    }
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Array => {}
                FocusedPane::Inspector => {
                    self.inspector_scroll = self.inspector_scroll.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
                FocusedPane::Detail => {
                    if self.player.run().source.is_some() {
                        // Scrolling down makes the highlighted line move up visually
                        if let Some(row) = self.detail_scroll.target_line_row {
                            self.detail_scroll.target_line_row = Some(row.saturating_sub(1));
                        }
                    } else {
                        self.detail_scroll.offset = self.detail_scroll.offset.saturating_add(1);
                    }
                }
            },
            _ => {}
        }
    }
}
