//! Session state machine: one round of play from start to score submission.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::components::{Direction, Entity, PelletKind, Tile};
use crate::constants::{CONTACT_RADIUS, CRUNCHED_DURATION, GHOST_CAPTURE_SCORE};
use crate::error::SubmissionError;
use crate::ghost::{spawn_ghosts, update_ghost, Ghost, GhostMode};
use crate::leaderboard::{Leaderboard, ScoreSink, SubmissionForm};
use crate::level::Maze;
use crate::pellets::Ledger;
use crate::player::{move_player, spawn_player};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionState {
    Idle,
    Playing,
    CapturedTransition,
    Ended,
}

/// Something a tick did that a host may want to react to.
#[derive(Debug, PartialEq, Clone)]
pub enum GameEvent {
    PelletEaten { tile: Tile, kind: PelletKind },
    PowerActivated,
    FrightenedExpired,
    GhostReleased { id: usize },
    GhostActive { id: usize },
    GhostCaptured { id: usize },
    PlayerCrunched { id: usize },
    BoardCleared,
    RoundEnded { score: u32 },
}

pub struct Game {
    maze: Maze,
    state: SessionState,
    player: Entity,
    ghosts: Vec<Ghost>,
    ledger: Ledger,
    frame: u64,
    started: bool,
    crunched_until: Option<Instant>,
    leaderboard: Leaderboard,
    form: SubmissionForm,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Maze::classic())
    }
}

impl Game {
    pub fn new(maze: Maze) -> Self {
        Self {
            player: spawn_player(&maze),
            ghosts: spawn_ghosts(&maze),
            ledger: Ledger::new(&maze),
            maze,
            state: SessionState::Idle,
            frame: 0,
            started: false,
            crunched_until: None,
            leaderboard: Leaderboard::default(),
            form: SubmissionForm::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn score(&self) -> u32 {
        self.ledger.score()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// False until the first directional input of the round has taken effect.
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SubmissionForm {
        &mut self.form
    }

    /// Begins a fresh round, discarding any previous one.
    pub fn start(&mut self) {
        self.ledger = Ledger::new(&self.maze);
        self.reset_board();
        self.crunched_until = None;
        self.form = SubmissionForm::default();
        self.state = SessionState::Playing;
        info!(pellets = self.ledger.remaining(), "session_started");
    }

    fn reset_board(&mut self) {
        self.player = spawn_player(&self.maze);
        self.ghosts = spawn_ghosts(&self.maze);
        self.frame = 0;
        self.started = false;
    }

    /// Buffers a turn for the player. Ignored outside of play.
    pub fn handle_input(&mut self, dir: Direction) {
        if self.state != SessionState::Playing || dir == Direction::None {
            return;
        }
        self.player.next_direction = Some(dir);
    }

    /// Advances the simulation by one frame. Does nothing unless playing.
    pub fn tick(&mut self, now: Instant, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != SessionState::Playing {
            return events;
        }

        if self.ledger.frightened_expired(now) {
            for ghost in &mut self.ghosts {
                ghost.frightened = false;
            }
            debug!("frightened_expired");
            events.push(GameEvent::FrightenedExpired);
        }

        move_player(&mut self.player, &self.maze);
        if !self.started && self.player.direction != Direction::None {
            self.started = true;
        }

        if self.started {
            self.frame += 1;
            self.update_ghosts(rng, &mut events);
        }

        if self.collect_pellet(now, &mut events) {
            return events;
        }

        self.resolve_contacts(now, &mut events);
        events
    }

    fn update_ghosts(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        let target = (self.player.x, self.player.y);
        for ghost in &mut self.ghosts {
            match update_ghost(ghost, &self.maze, self.frame, target, rng) {
                Some(GhostMode::Exiting) => events.push(GameEvent::GhostReleased { id: ghost.id }),
                Some(GhostMode::Active) => events.push(GameEvent::GhostActive { id: ghost.id }),
                _ => {}
            }
        }
    }

    /// Returns true when the board was cleared and reset.
    fn collect_pellet(&mut self, now: Instant, events: &mut Vec<GameEvent>) -> bool {
        let tile = self.player.tile();
        let Some(kind) = self.ledger.collect(tile, now) else {
            return false;
        };
        events.push(GameEvent::PelletEaten { tile, kind });

        if kind == PelletKind::Power {
            for ghost in &mut self.ghosts {
                ghost.frightened = true;
            }
            info!(score = self.ledger.score(), "power_pellet_collected");
            events.push(GameEvent::PowerActivated);
        }

        if self.ledger.is_cleared() {
            self.ledger.repopulate(&self.maze);
            self.reset_board();
            info!(score = self.ledger.score(), "board_cleared");
            events.push(GameEvent::BoardCleared);
            return true;
        }
        false
    }

    fn resolve_contacts(&mut self, now: Instant, events: &mut Vec<GameEvent>) {
        for ghost in &mut self.ghosts {
            if self.player.distance_to(&ghost.body) >= CONTACT_RADIUS {
                continue;
            }
            if ghost.frightened {
                ghost.send_home(&self.maze);
                self.ledger.award(GHOST_CAPTURE_SCORE);
                info!(ghost = ghost.id, score = self.ledger.score(), "ghost_captured");
                events.push(GameEvent::GhostCaptured { id: ghost.id });
            } else {
                self.state = SessionState::CapturedTransition;
                self.crunched_until = Some(now + CRUNCHED_DURATION);
                info!(ghost = ghost.id, score = self.ledger.score(), "player_crunched");
                events.push(GameEvent::PlayerCrunched { id: ghost.id });
                return;
            }
        }
    }

    /// Moves a crunched session on to `Ended` once the display delay is over.
    pub fn poll_transition(&mut self, now: Instant) -> Option<GameEvent> {
        if self.state != SessionState::CapturedTransition {
            return None;
        }
        match self.crunched_until {
            Some(deadline) if now >= deadline => {
                self.state = SessionState::Ended;
                self.crunched_until = None;
                info!(score = self.ledger.score(), "round_ended");
                Some(GameEvent::RoundEnded {
                    score: self.ledger.score(),
                })
            }
            _ => None,
        }
    }

    /// Records the finished round from the form and hands it to `sink`.
    ///
    /// Only a form validation failure keeps the session in `Ended`; whatever
    /// the sink reports, a valid submission lands back in `Idle`.
    pub fn submit(&mut self, sink: &mut dyn ScoreSink) -> Result<(), SubmissionError> {
        if self.state != SessionState::Ended {
            return Ok(());
        }
        let submission = self.form.build(self.ledger.score())?;
        self.leaderboard.record(&submission.initials, submission.score);
        self.return_to_idle();

        match sink.submit_score(&submission) {
            Ok(()) => info!(initials = %submission.initials, score = submission.score, "score_submitted"),
            Err(error) => warn!(error = %error, score = submission.score, "score_submission_failed"),
        }
        Ok(())
    }

    /// Starts over from a finished round without recording it.
    pub fn retry(&mut self) {
        if self.state == SessionState::Ended {
            self.start();
        }
    }

    /// Abandons whatever is going on and goes back to the menu.
    pub fn return_to_idle(&mut self) {
        self.state = SessionState::Idle;
        self.crunched_until = None;
        self.form = SubmissionForm::default();
        self.ledger = Ledger::new(&self.maze);
        self.reset_board();
    }

    /// Puts the player on `tile` heading `direction`. Scenario setup only.
    #[doc(hidden)]
    pub fn stage_player(&mut self, tile: Tile, direction: Direction) {
        self.player = Entity::at_tile(tile, direction, self.player.speed);
    }

    /// Puts ghost `id` on `tile` in `mode`. Scenario setup only.
    #[doc(hidden)]
    pub fn stage_ghost(&mut self, id: usize, tile: Tile, mode: GhostMode) {
        if let Some(ghost) = self.ghosts.get_mut(id) {
            ghost.body = Entity::at_tile(tile, ghost.body.direction, ghost.body.speed);
            ghost.mode = mode;
        }
    }
}
