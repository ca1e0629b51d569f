mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
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

use daga_bomber::clock::Clock;
use daga_bomber::compute::{init_session, tick};
use daga_bomber::frame::build_frame;
use daga_bomber::input::{InputMapper, Key, KeySignal};
use daga_bomber::Config;

use display::Viewport;

/// Terminals without key-release reporting only send repeated presses while
/// a key is held.  A key not refreshed within this window counts as released.
/// OS key-repeat runs at ≥ 15 Hz once it kicks in, so 150 ms covers the gap
/// between repeats.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::TurnLeft),
        KeyCode::Right => Some(Key::TurnRight),
        KeyCode::Up => Some(Key::Forward),
        KeyCode::Down => Some(Key::Backward),
        KeyCode::Char(' ') => Some(Key::DropBomb),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: crossterm events are translated into key-down / key-up
/// signals for the `InputMapper`.  On keyboard-enhancement capable terminals
/// (kitty protocol) real `Release` events arrive.  Elsewhere `held` records
/// when each key was last pressed or repeated, and keys that fall silent for
/// `HOLD_WINDOW` get a synthetic key-up.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: Config,
    keyboard_enhanced: bool,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();
    let mut clock = Clock::new(config.ticks_per_second);
    let mut mapper = InputMapper::new();
    let mut held: HashMap<Key, Instant> = HashMap::new();

    let (width, height) = terminal::size().context("reading terminal size")?;
    display::check_size(width, height)?;
    let mut view = Viewport::new(width, height, &config);

    let mut session = init_session(config, 0).context("building the game session")?;
    let mut dt = Duration::ZERO;

    loop {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    let Some(key) = map_key(code, modifiers) else { continue };
                    match kind {
                        // Press: record key + signal key-down
                        KeyEventKind::Press => {
                            let _ = held.insert(key, Instant::now());
                            mapper.apply(KeySignal::Down(key));
                        }
                        // Repeat: refresh timestamp so key stays "held"
                        KeyEventKind::Repeat => {
                            let _ = held.insert(key, Instant::now());
                        }
                        // Release: key-up immediately (keyboard-enhancement path)
                        KeyEventKind::Release => {
                            let _ = held.remove(&key);
                            mapper.apply(KeySignal::Up(key));
                        }
                    }
                }
                Event::Resize(w, h) => {
                    if let Err(err) = display::check_size(w, h) {
                        log::warn!("{}", err);
                    }
                    view = Viewport::new(w, h, &session.config);
                }
                _ => {}
            }
        }

        if !keyboard_enhanced {
            let now = Instant::now();
            held.retain(|&key, &mut last| {
                let live = now.duration_since(last) <= HOLD_WINDOW;
                if !live {
                    mapper.apply(KeySignal::Up(key));
                }
                live
            });
        }

        if mapper.quit_requested() {
            return Ok(());
        }

        let input = mapper.take_tick_input();
        let _ = tick(&mut session, &input, dt, &mut rng);

        let frame = build_frame(&session, clock.fps());
        display::render(out, &view, &frame).context("drawing frame")?;

        dt = clock.tick();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::default();
    config.validate().context("invalid game configuration")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    let _reader = thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, config, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
