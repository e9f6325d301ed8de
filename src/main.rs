use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use asteroid_defense::compute::{init_state, tick};
use asteroid_defense::config::Settings;
use asteroid_defense::display::{self, Sprites};
use asteroid_defense::input::{HeldKeys, Key};
use asteroid_defense::scene::compose;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is the drawing surface, so logs go to a file.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Key events are applied to `HeldKeys` as they are drained from the
/// channel; the snapshot taken afterwards is the only input `tick` sees.
/// The frame timestamp is milliseconds since the loop started.
fn game_loop<W: Write>(
    out: &mut W,
    settings: &Settings,
    rx: &mpsc::Receiver<Event>,
    sprite_rx: &mpsc::Receiver<Sprites>,
    hold_window: Option<u64>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut keys = HeldKeys::new(hold_window);
    let mut sprites = Sprites::default();
    let mut state = init_state(settings.game);

    let frame_period = Duration::from_millis(settings.host.frame_ms);
    let started = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                return Ok(());
            }
            let Some(key) = to_key(code) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => keys.press(key, frame),
                KeyEventKind::Release => keys.release(key),
            }
        }

        if let Ok(loaded) = sprite_rx.try_recv() {
            sprites = loaded;
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let input = keys.snapshot(frame);
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        let previous = state.status;
        state = tick(&state, &input, now_ms, &mut rng);
        if state.status != previous {
            info!(from = ?previous, to = ?state.status, "status changed");
        }

        // ── Draw; failures never stop the simulation ─────────────────────────
        let scene = compose(&state, now_ms);
        let drawn = terminal::size()
            .and_then(|size| display::render(out, &scene, &sprites, &state.config, size));
        if let Err(e) = drawn {
            warn!(error = %e, "frame render failed");
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            thread::sleep(frame_period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let (settings, source) = Settings::discover().context("loading settings")?;
    init_logging(&settings.host.log_file)?;
    match &source {
        Some(path) => info!(path = %path.display(), "settings loaded"),
        None => info!("using default settings"),
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let hold_window = if keyboard_enhanced {
        None
    } else {
        Some(settings.host.hold_window)
    };
    info!(keyboard_enhanced, "terminal ready");

    // Blocking event reads live on their own thread so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    // Sprites arrive whenever they finish loading; until then they draw blank.
    let (sprite_tx, sprite_rx) = mpsc::channel::<Sprites>();
    let asset_dir = settings.host.asset_dir.clone();
    thread::spawn(move || {
        let _ = sprite_tx.send(Sprites::load(&asset_dir));
    });

    let result = game_loop(&mut out, &settings, &rx, &sprite_rx, hold_window);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if result.is_ok() {
        info!("exited");
    }
    result.context("game loop failed")
}
