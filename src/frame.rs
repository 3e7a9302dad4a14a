//! Per-frame callback: advance the simulation once, then paint it.
//!
//! The host owns a [`FrameLoop`] and only runs [`run_frame`] while a frame
//! request is pending. Leaving play cancels the request, so no stale frame
//! can touch a session that has been torn down.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::game::{Game, GameEvent, SessionState};

/// Anything that can show the current state of a game.
pub trait Surface {
    type Error;

    fn paint(&mut self, game: &Game) -> Result<(), Self::Error>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Schedule {
    Next,
    Cancel,
}

/// One frame: tick, paint, then decide whether another frame is wanted.
pub fn run_frame<S, R>(
    game: &mut Game,
    surface: &mut S,
    now: Instant,
    rng: &mut R,
) -> Result<(Schedule, Vec<GameEvent>), S::Error>
where
    S: Surface,
    R: Rng,
{
    if game.state() != SessionState::Playing {
        return Ok((Schedule::Cancel, Vec::new()));
    }
    let events = game.tick(now, rng);
    surface.paint(game)?;
    let schedule = if game.state() == SessionState::Playing {
        Schedule::Next
    } else {
        Schedule::Cancel
    };
    Ok((schedule, events))
}

/// A single outstanding frame request, like an animation-frame handle.
#[derive(Debug)]
pub struct FrameLoop {
    frame_time: Duration,
    due: Option<Instant>,
}

impl FrameLoop {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            due: None,
        }
    }

    /// Asks for a frame one period after `now`, replacing any earlier request.
    pub fn request(&mut self, now: Instant) {
        self.due = Some(now + self.frame_time);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Consumes the request if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    /// How long the host may sleep before the pending frame is due.
    pub fn wait_time(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    pub fn apply(&mut self, schedule: Schedule, now: Instant) {
        match schedule {
            Schedule::Next => self.request(now),
            Schedule::Cancel => self.cancel(),
        }
    }
}
