//! Arcade Tetris runner (default binary).
//!
//! `arcade-tetris [play]` runs the game in the terminal; `arcade-tetris
//! leaderboard` prints the top scores. Logs go to stderr via `env_logger`
//! (`RUST_LOG`, default `warn`) so they do not disturb the game screen.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use arcade_tetris::cli::{self, Command};
use arcade_tetris::core::{GameEngine, GameSession, GameSnapshot, PieceRandomizer};
use arcade_tetris::report::{ConfiguredSink, ReportConfig, ScoreReporter, ScoreSink};
use arcade_tetris::shell::Shell;
use arcade_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Upper bound on how long one loop iteration waits for input.
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::parse_args(&args)? {
        Command::Play => play(),
        Command::Leaderboard(lb) => arcade_tetris::leaderboard::run(&lb),
        Command::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
    }
}

fn play() -> Result<()> {
    let config = ReportConfig::from_env()?;
    let seed = cli::seed_from_env()?;
    log::info!("piece seed {}", seed);

    let sink = ConfiguredSink::from_config(&config)?;
    let reporter = ScoreReporter::new(sink)?;
    let session = GameSession::new(GameEngine::with_seed(seed));
    let mut shell = Shell::new(session, reporter, config.player.clone());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut shell);

    // Always try to restore terminal state.
    let _ = term.exit();
    shell.flush(config.timeout);
    result
}

fn run<R: PieceRandomizer, S: ScoreSink>(term: &mut TerminalRenderer, shell: &mut Shell<R, S>) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        shell.snapshot_into(&mut snap);
        view.render_into(&snap, shell.report_status(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, bounded by the time left until the next gravity tick.
        let until_tick = shell
            .session()
            .timer()
            .remaining_ms()
            .map(|ms| ms as u64)
            .unwrap_or(FRAME_MS);
        let timeout = Duration::from_millis(until_tick.min(FRAME_MS));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => shell.handle_key(key),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
        if shell.should_quit() {
            return Ok(());
        }

        // Tick. Whole milliseconds only; the remainder carries over.
        let elapsed = Duration::from_millis(last.elapsed().as_millis() as u64);
        shell.update(elapsed);
        last += elapsed;
    }
}
