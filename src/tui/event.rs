//! Terminal events and the sampling tick.
//!
//! A background thread forwards key presses and resizes, and emits `Tick`
//! every `tick_rate` even while keys are arriving, so the source is polled
//! at a steady pace.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Time to poll the sample source.
    Tick,
    /// Key press.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
}

/// Receives events produced by the input thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive to prevent channel closure.
    _tx: Sender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = time_to_next_tick(last_tick.elapsed(), tick_rate);
                if event::poll(timeout).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let event = match evt {
                        // Windows reports releases too
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Resize(..) => Some(Event::Resize),
                        _ => None,
                    };
                    if let Some(event) = event
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// How long to wait for input before the next tick is due.
fn time_to_next_tick(since_last: Duration, tick_rate: Duration) -> Duration {
    tick_rate.saturating_sub(since_last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_next_tick() {
        let rate = Duration::from_millis(20);
        assert_eq!(time_to_next_tick(Duration::ZERO, rate), rate);
        assert_eq!(
            time_to_next_tick(Duration::from_millis(15), rate),
            Duration::from_millis(5)
        );
        // Overdue ticks do not wait at all
        assert_eq!(
            time_to_next_tick(Duration::from_millis(50), rate),
            Duration::ZERO
        );
    }
}
