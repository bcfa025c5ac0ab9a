//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. Moves
//! resolve synchronously; the loop only redraws when something changed or a
//! status message runs out.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::banner::Banner;
use tui_match3::config::{AppConfig, Args};
use tui_match3::core::{BuiltinLevels, GameSnapshot, PlaySession};
use tui_match3::input::{handle_key_event, should_quit};
use tui_match3::logging;
use tui_match3::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};

const TICK: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_env().with_args(&args);
    logging::init(config.log_path.as_deref(), config.log_level)?;

    let mut session = PlaySession::new(BuiltinLevels, config.level, config.seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("terminated: {:#}", err);
    }
    log::info!("final score {}", session.total_score());
    result
}

fn run(term: &mut TerminalRenderer, session: &mut PlaySession<BuiltinLevels>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut banner = Banner::default();
    let mut needs_draw = true;

    loop {
        let now = Instant::now();
        if banner.expire(now) {
            needs_draw = true;
        }

        if needs_draw {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.snapshot_into(&mut snap);
            let hud = HudView {
                total_score: session.total_score(),
                message: banner.text(now),
                has_next_level: session.has_next_level(),
            };
            view.render_into_with_hud(&snap, Some(&hud), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            needs_draw = false;
        }

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    if let Some(outcome) = session.apply_action(action)? {
                        banner.show(&outcome.cues, Instant::now());
                    }
                    needs_draw = true;
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                needs_draw = true;
            }
            _ => {}
        }
    }
}
