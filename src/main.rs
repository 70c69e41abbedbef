//! Terminal runner (default binary).
//!
//! Polls crossterm events into the key tracker, ticks the session every
//! `TICK_MS` with monotonic milliseconds since launch, then redraws.
//!
//! Environment:
//! - `TUI_BLOCKS_CONFIG`: JSON config file (see `tui_blocks_engine::config`)
//! - `TUI_BLOCKS_LOG`: log file; without it nothing is logged, since stdout
//!   belongs to the game
//! - `RUST_LOG`: log filter, `info` by default

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_blocks::core::GameSnapshot;
use tui_blocks::engine::{GameConfig, Session};
use tui_blocks::input::{handle_key_event, input_action, KeyCommand, KeyTracker};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, TerminalSoundPlayer, Viewport};
use tui_blocks::types::TICK_MS;

const LOG_ENV_VAR: &str = "TUI_BLOCKS_LOG";

fn main() -> Result<()> {
    init_tracing()?;
    let config = GameConfig::from_env()?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Restore the terminal even when the loop failed.
    let _ = term.exit();
    result
}

fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV_VAR).filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.to_string_lossy()))?;
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

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let start = Instant::now();
    let elapsed_ms = || start.elapsed().as_millis() as u64;

    let mut session = Session::new(config, TerminalSoundPlayer::new(config.sound), elapsed_ms());
    let mut keys = KeyTracker::new().with_release_events(term.has_release_events());

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut next_tick = Instant::now();

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Release => {
                    if let Some(action) = input_action(key.code) {
                        keys.release(action);
                    }
                }
                Event::Key(key) => {
                    let first = key.kind == KeyEventKind::Press;
                    match handle_key_event(key) {
                        Some(KeyCommand::Game(action)) => keys.press(action, Instant::now()),
                        Some(KeyCommand::Quit) if first => return Ok(()),
                        Some(KeyCommand::Restart) if first => {
                            session.restart(elapsed_ms());
                            keys.reset();
                        }
                        Some(KeyCommand::ToggleEffects) if first => {
                            let on = session.toggle_effects();
                            info!(effects = on, "sound effects switched");
                        }
                        _ => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        if now < next_tick {
            continue;
        }
        next_tick = now + tick;

        let frame = keys.take_frame(now);
        for ev in session.tick(elapsed_ms(), &frame) {
            debug!(?ev, "controller");
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(sound) = session.controller_mut().sound_mut() {
            sound.flush_bell(&mut io::stdout())?;
        }
    }
}
