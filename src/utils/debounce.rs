//! Debouncing for bursty window events.
//!
//! Each trigger hands out a token; only the most recent token settles. The
//! caller owns the timer and reports back when it fires.

use std::time::Duration;

/// Token identifying one trigger of a [`Debouncer`].
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DebounceToken(u64);

/// Tracks the latest trigger of a debounced event.
///
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    generation: u64,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Debouncer {
            wait,
            generation: 0,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Register a new trigger, superseding any pending one.
    ///
    pub fn trigger(&mut self) -> DebounceToken {
        self.generation += 1;
        DebounceToken(self.generation)
    }

    /// Whether the timer for `token` should run the debounced action.
    ///
    pub fn settle(&self, token: DebounceToken) -> bool {
        token.0 == self.generation
    }
}
