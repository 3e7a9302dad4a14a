use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use work_pacman::config::Settings;
use work_pacman::constants::{COLS, ROWS};
use work_pacman::frame::{run_frame, FrameLoop, Surface};
use work_pacman::player::direction_for_key;
use work_pacman::render::{Renderer, TerminalSurface};
use work_pacman::{Game, GameError, ScoreSink, ScoreSubmission, SessionState, SubmissionError};

/// Stand-in for the lead-capture service: records the submission in the log.
struct LogSink;

impl ScoreSink for LogSink {
    fn submit_score(&mut self, submission: &ScoreSubmission) -> Result<(), SubmissionError> {
        info!(
            initials = %submission.initials,
            name = %submission.full_name,
            score = submission.score,
            "lead_captured"
        );
        Ok(())
    }
}

enum KeyOutcome {
    Continue,
    Quit,
}

fn main() -> Result<(), GameError> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_path.as_deref())?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(stdout, &settings);

    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    info!("session_closed");
    result
}

fn init_tracing(log_path: Option<&str>) -> Result<(), GameError> {
    // The terminal belongs to the game, so logs only go to a file.
    let Some(path) = log_path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| GameError::LogFile {
        path: path.to_string(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn run(stdout: Stdout, settings: &Settings) -> Result<(), GameError> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::default();
    let mut surface = TerminalSurface::new(stdout, Renderer::new(COLS, ROWS));
    let mut frames = FrameLoop::new(settings.frame_time());
    let mut sink = LogSink;
    let frame_time = settings.frame_time();
    info!(fps = settings.fps, seed = ?settings.seed, "host_started");

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let KeyOutcome::Quit = handle_key(&mut game, key.code, &mut sink) {
                        frames.cancel();
                        return Ok(());
                    }
                }
                Event::Resize(..) => surface.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        if game.state() == SessionState::Playing && !frames.is_pending() {
            frames.request(frame_start);
        }
        if frames.take_due(now) {
            let (schedule, events) = run_frame(&mut game, &mut surface, now, &mut rng)?;
            for event in &events {
                debug!(?event, frame = game.frame(), "game_event");
            }
            frames.apply(schedule, frame_start);
        }
        if game.state() != SessionState::Playing {
            if let Some(event) = game.poll_transition(now) {
                debug!(?event, "game_event");
            }
            surface.paint(&game)?;
        }

        // While playing, the pending frame alone decides how long to wait.
        let wait = frames
            .wait_time(Instant::now())
            .unwrap_or_else(|| frame_time.saturating_sub(frame_start.elapsed()));
        thread::sleep(wait);
    }
}

fn handle_key(game: &mut Game, code: KeyCode, sink: &mut dyn ScoreSink) -> KeyOutcome {
    if code == KeyCode::Esc {
        return KeyOutcome::Quit;
    }
    match game.state() {
        SessionState::Idle => match code {
            KeyCode::Enter | KeyCode::Char(' ') => game.start(),
            KeyCode::Char('q') => return KeyOutcome::Quit,
            _ => {}
        },
        SessionState::Playing => {
            if let Some(dir) = direction_for_key(code) {
                game.handle_input(dir);
            }
        }
        SessionState::CapturedTransition => {}
        SessionState::Ended => match code {
            KeyCode::Enter => {
                if let Err(error) = game.submit(sink) {
                    debug!(error = %error, "submission_incomplete");
                }
            }
            KeyCode::F(5) => game.retry(),
            KeyCode::Tab => game.form_mut().next_field(),
            KeyCode::Backspace => game.form_mut().backspace(),
            KeyCode::Char(c) => game.form_mut().push_char(c),
            _ => {}
        },
    }
    KeyOutcome::Continue
}
