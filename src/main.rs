use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pacman_chase::audio::{AudioHook, TerminalBell};
use pacman_chase::config::Settings;
use pacman_chase::constants::MAX_FRAME_DT_SECS;
use pacman_chase::highscore::{FileHighScore, HighScoreStore};
use pacman_chase::input::{command_for, Command};
use pacman_chase::level::create_level;
use pacman_chase::render::{render_game_over, Renderer};
use pacman_chase::session::{Session, SessionStatus};
use pacman_chase::terminal::TerminalGuard;

fn main() -> Result<()> {
    let settings = Settings::parse().validate()?;
    init_logging(&settings)?;

    let level = create_level().context("built-in maze is invalid")?;
    let mut store = FileHighScore::new(&settings.high_score_file);
    let prior_high_score = store.load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable high score");
        0
    });
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed, fps = settings.fps, "starting");

    let mut terminal = TerminalGuard::enter(io::stdout())?;
    let mut session = Session::new(level, prior_high_score);
    let mut rng = StdRng::seed_from_u64(seed);
    let result = run(terminal.writer(), &mut session, &mut rng, &mut store, &settings);
    drop(terminal);
    result
}

fn init_logging(settings: &Settings) -> Result<()> {
    let file = File::create(&settings.log_file)
        .with_context(|| format!("cannot open log file {}", settings.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

fn run(
    stdout: &mut Stdout,
    session: &mut Session,
    rng: &mut StdRng,
    store: &mut dyn HighScoreStore,
    settings: &Settings,
) -> Result<()> {
    let grid = session.grid();
    let mut renderer = Renderer::new(grid.cols(), grid.rows());
    let mut audio = TerminalBell::new(io::stdout());
    let frame_time = settings.frame_time();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                match command_for(key) {
                    Some(Command::Quit) => session.quit(),
                    Some(Command::Turn(direction)) => session.handle_input(direction),
                    None => {}
                }
            }
        }

        let dt = frame_start
            .duration_since(last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SECS);
        last_frame = frame_start;

        for event in session.tick(dt, rng) {
            if let Err(err) = audio.play(event) {
                warn!(error = %err, ?event, "sound event dropped");
            }
        }
        renderer.render(stdout, session)?;
        if session.is_over() {
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    if let Some(high_score) = session.finish(store) {
        info!(high_score, "new high score");
    }
    info!(status = ?session.status(), score = session.score(), "session ended");
    if session.status() != SessionStatus::Quit {
        render_game_over(stdout, session)?;
    }
    Ok(())
}
