//! Main TUI application.

use std::io;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Frame, Terminal};
use tracing::info;

use crate::plot::{PlotConfig, PlotSet};
use crate::stream::{SampleStream, StreamStats};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// What the display shows while paused.
#[derive(Debug, Clone)]
struct Frozen {
    plots: PlotSet,
    /// Plot time the display stopped at.
    at: f64,
    /// Stream counters at the same moment.
    stats: StreamStats,
}

/// Main TUI application.
pub struct App {
    stream: SampleStream,
    plots: PlotSet,
    state: AppState,
    started: Instant,
    frozen: Option<Frozen>,
    should_quit: bool,
}

impl App {
    /// Creates the app with buffers seeded from `first_value`.
    pub fn new(stream: SampleStream, config: PlotConfig, first_value: i64) -> Self {
        let mut state = AppState::new(stream.describe(), config.grow_view);
        state.stats = stream.stats();
        Self {
            plots: PlotSet::new(config, first_value),
            stream,
            state,
            started: Instant::now(),
            frozen: None,
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal, tick_rate);

        // Restore terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        let stats = self.stream.stats();
        info!(
            "Stopped after {} values ({} lines, {} rejected, {} overflows)",
            stats.values, stats.decode.lines, stats.decode.rejected, stats.decode.overflows
        );
        result
    }

    fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let events = EventHandler::new(tick_rate);

        loop {
            let now = self.elapsed();
            terminal.draw(|frame| self.draw(frame, now))?;

            match events.next() {
                Ok(Event::Tick) => {
                    self.ingest(self.elapsed());
                }
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::TogglePause => self.toggle_pause(now),
                    KeyAction::Reset => self.reset(self.elapsed()),
                    KeyAction::None => {}
                },
                // Layout follows the frame size on the next draw
                Ok(Event::Resize) => {}
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Seconds since the app was created.
    fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Draws the frozen plots if paused, otherwise the live ones at `now`.
    pub(crate) fn draw(&mut self, frame: &mut Frame, now: f64) {
        let (plots, stats, now) = match &self.frozen {
            Some(frozen) => (&frozen.plots, frozen.stats, frozen.at),
            None => (&self.plots, self.state.stats, now),
        };
        render(frame, &mut self.state, plots, &stats, now);
    }

    /// Feeds every available value into the plots, stamped with `now`.
    ///
    /// Runs while paused too, so nothing is lost. Returns the number of
    /// values ingested.
    pub(crate) fn ingest(&mut self, now: f64) -> usize {
        let values = self.stream.poll();
        for &value in &values {
            self.plots.update(value, now);
        }
        self.state.stats = self.stream.stats();
        self.state.last_error = self.stream.last_error().map(ToString::to_string);
        values.len()
    }

    fn toggle_pause(&mut self, now: f64) {
        if self.frozen.take().is_none() {
            self.frozen = Some(self.snapshot(now));
        }
        self.state.paused = self.frozen.is_some();
    }

    fn snapshot(&self, at: f64) -> Frozen {
        Frozen {
            plots: self.plots.clone(),
            at,
            stats: self.state.stats,
        }
    }

    /// Clears history and restarts all buffers from the last value.
    fn reset(&mut self, now: f64) {
        let seed = self.plots.last_value();
        self.plots.reset(seed, now);
        if self.frozen.is_some() {
            self.frozen = Some(self.snapshot(now));
        }
        self.state.status_message = Some(format!("Reset, restarted from {}", seed));
        info!("Plots reset at {:.2}s from value {}", now, seed);
    }
}
