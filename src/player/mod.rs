//! Playback over a prepared timeline.
//!
//! The player owns the loaded [`Run`] and a cursor into its timeline. It
//! never executes algorithms itself; by the time a run is loaded every
//! event has already been produced and folded into snapshots, so stepping
//! in either direction is a cursor move.
//!
//! Auto-play is driven by the host loop: the player keeps at most one
//! pending deadline and the host calls [`Player::tick`] with the current
//! time as often as it likes. A tick advances at most one step.

use crate::algo::params::ParamValues;
use crate::algo::{Algorithm, InputError};
use crate::script::ExecutionResult;
use crate::timeline::{Snapshot, Timeline};
use std::time::{Duration, Instant};
use tracing::debug;

/// Lifecycle of the playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Loaded, cursor at the initial snapshot, timer disarmed.
    #[default]
    Idle,
    /// Timer armed, the cursor advances as deadlines pass.
    Playing,
    /// Cursor parked mid-run, timer disarmed.
    Paused,
    /// Cursor at the final snapshot, timer disarmed.
    Finished,
}

impl PlaybackState {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Finished => "finished",
        }
    }
}

const PRESETS: [Speed; 4] = [Speed::Slow, Speed::Normal, Speed::Fast, Speed::Turbo];

/// Delay between automatic steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    Turbo,
    /// Explicit interval in milliseconds, floored at 10.
    Custom(u64),
}

impl Speed {
    pub fn interval(self) -> Duration {
        let ms = match self {
            Speed::Slow => 800,
            Speed::Normal => 400,
            Speed::Fast => 150,
            Speed::Turbo => 50,
            Speed::Custom(ms) => ms.max(10),
        };
        Duration::from_millis(ms)
    }

    pub fn parse(s: &str) -> Option<Speed> {
        match s {
            "slow" => Some(Speed::Slow),
            "normal" => Some(Speed::Normal),
            "fast" => Some(Speed::Fast),
            "turbo" => Some(Speed::Turbo),
            other => other.parse::<u64>().ok().map(Speed::Custom),
        }
    }

    pub fn label(self) -> String {
        match self {
            Speed::Slow => "slow".to_string(),
            Speed::Normal => "normal".to_string(),
            Speed::Fast => "fast".to_string(),
            Speed::Turbo => "turbo".to_string(),
            Speed::Custom(ms) => format!("{}ms", ms),
        }
    }

    /// Position on the preset ladder, custom intervals snap to the
    /// closest preset.
    fn ladder_index(self) -> usize {
        match self {
            Speed::Slow => 0,
            Speed::Normal => 1,
            Speed::Fast => 2,
            Speed::Turbo => 3,
            Speed::Custom(ms) => {
                let mut nearest = 0;
                let mut gap = u64::MAX;
                for (i, preset) in PRESETS.iter().enumerate() {
                    let preset_ms = preset.interval().as_millis() as u64;
                    let d = preset_ms.abs_diff(ms);
                    if d < gap {
                        gap = d;
                        nearest = i;
                    }
                }
                nearest
            }
        }
    }

    pub fn faster(self) -> Speed {
        PRESETS[(self.ladder_index() + 1).min(PRESETS.len() - 1)]
    }

    pub fn slower(self) -> Speed {
        PRESETS[self.ladder_index().saturating_sub(1)]
    }
}

/// A fully prepared playback unit: the timeline plus what the UI needs to
/// describe where it came from.
#[derive(Debug, Clone)]
pub struct Run {
    pub title: String,
    /// Script text when the run came from the script engine.
    pub source: Option<String>,
    /// Log lines captured outside the event stream.
    pub logs: Vec<String>,
    pub timeline: Timeline,
}

impl Run {
    /// Placeholder run shown before anything is loaded.
    pub fn idle() -> Run {
        Run {
            title: "No run loaded".to_string(),
            source: None,
            logs: Vec::new(),
            timeline: Timeline::build(&[], Vec::new()),
        }
    }
}

/// Playback controller. All methods are total: out-of-range requests clamp
/// and mismatched-state requests are ignored.
#[derive(Debug)]
pub struct Player {
    run: Run,
    position: usize,
    state: PlaybackState,
    speed: Speed,
    next_tick: Option<Instant>,
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Player {
            run: Run::idle(),
            position: 0,
            state: PlaybackState::Idle,
            speed: Speed::default(),
            next_tick: None,
        }
    }

    /// Install a run. The cursor rewinds, the timer disarms, and the old
    /// run is dropped in the same call, so no stale snapshot can be
    /// observed afterwards.
    pub fn load(&mut self, run: Run) {
        debug!(title = %run.title, steps = run.timeline.len(), "run loaded");
        self.run = run;
        self.position = 0;
        self.state = PlaybackState::Idle;
        self.next_tick = None;
    }

    /// Validate, execute, and install an algorithm run.
    pub fn load_algorithm(
        &mut self,
        algo: &dyn Algorithm,
        input: &[i64],
        params: &ParamValues,
    ) -> Result<(), InputError> {
        algo.validate(input)?;
        let events = algo.run(input, params);
        self.load(Run {
            title: algo.info().name.to_string(),
            source: None,
            logs: Vec::new(),
            timeline: Timeline::build(input, events),
        });
        Ok(())
    }

    /// Install the outcome of a script execution. Failed runs still play
    /// back: the timeline covers every event recorded before the fault,
    /// and the fault itself lands at the end of the log.
    pub fn load_script(
        &mut self,
        title: impl Into<String>,
        source: &str,
        outcome: &ExecutionResult,
        input: &[i64],
    ) {
        let events = outcome.events.iter().map(|te| te.event.clone()).collect();
        let mut logs = outcome.logs.clone();
        if let Some(fault) = &outcome.error {
            // Fault messages already carry their line number
            logs.push(format!("error: {}", fault.message));
        }
        if outcome.truncated {
            logs.push("event limit reached, trailing events dropped".to_string());
        }
        self.load(Run {
            title: title.into(),
            source: Some(source.to_string()),
            logs,
            timeline: Timeline::build(input, events),
        });
    }

    // ===== Transport =====

    /// Start advancing. Playing from the final snapshot rewinds first, so
    /// play always yields motion on a non-trivial timeline. The first
    /// deadline is `now`, making the first advance immediate.
    pub fn play(&mut self, now: Instant) {
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.position >= self.timeline().last_index() {
            self.position = 0;
        }
        self.state = PlaybackState::Playing;
        self.next_tick = Some(now);
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.next_tick = None;
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Advance one step and park. Stepping at the end finishes without
    /// moving.
    pub fn step(&mut self) {
        self.next_tick = None;
        if self.position < self.timeline().last_index() {
            self.position += 1;
            self.state = PlaybackState::Paused;
        } else {
            self.state = PlaybackState::Finished;
        }
    }

    /// Move one step back and park. Total at the start: the cursor stays
    /// and the state still becomes paused.
    pub fn step_back(&mut self) {
        self.next_tick = None;
        self.position = self.position.saturating_sub(1);
        self.state = PlaybackState::Paused;
    }

    /// Jump to an arbitrary step, clamped to the timeline.
    pub fn seek(&mut self, index: usize) {
        self.next_tick = None;
        self.position = index.min(self.timeline().last_index());
        self.state = PlaybackState::Paused;
    }

    /// Rewind to the initial snapshot and return to idle.
    pub fn reset(&mut self) {
        self.next_tick = None;
        self.position = 0;
        self.state = PlaybackState::Idle;
    }

    /// Change speed. A pending deadline is re-armed from `now` so the new
    /// interval takes effect without a stall or a double step.
    pub fn set_speed(&mut self, speed: Speed, now: Instant) {
        self.speed = speed;
        if self.state == PlaybackState::Playing && self.next_tick.is_some() {
            self.next_tick = Some(now + self.speed.interval());
        }
    }

    /// Advance if the pending deadline has passed. Returns whether the
    /// visible snapshot changed. At most one step per call, ticking more
    /// often than the interval is harmless.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let deadline = match self.next_tick {
            Some(deadline) => deadline,
            None => return false,
        };
        if now < deadline {
            return false;
        }
        if self.position < self.timeline().last_index() {
            self.position += 1;
        }
        if self.position >= self.timeline().last_index() {
            self.state = PlaybackState::Finished;
            self.next_tick = None;
        } else {
            self.next_tick = Some(now + self.speed.interval());
        }
        true
    }

    // ========== Getter methods for UI ==========

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.timeline().len()
    }

    /// Fraction of the run completed, 0.0 at the initial snapshot.
    pub fn progress(&self) -> f64 {
        let last = self.timeline().last_index();
        if last == 0 {
            1.0
        } else {
            self.position as f64 / last as f64
        }
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Snapshot {
        self.timeline()
            .get(self.position)
            .unwrap_or_else(|| self.timeline().last())
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn timer_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    fn timeline(&self) -> &Timeline {
        &self.run.timeline
    }
}
