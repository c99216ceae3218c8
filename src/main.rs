mod display;
mod input;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use boss_rush::audio::{MusicBackend, MusicSession};
use boss_rush::config::Settings;
use boss_rush::constants::FPS;
use boss_rush::state::{Command, Game};

use display::stars::Starfield;
use display::{Scene, Viewport};
use input::{decode, normalize, Action, HeldKeys};

#[derive(Parser, Debug)]
#[command(name = "boss_rush", about = "Single-screen boss-rush shooter for the terminal")]
struct Cli {
    /// JSON settings file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Background music track.
    #[arg(long)]
    music: Option<PathBuf>,

    /// Start with music muted.
    #[arg(long)]
    mute: bool,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(music) = &self.music {
            settings.music_paths = vec![music.clone()];
        }
        if self.mute {
            settings.muted = true;
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = Some(log_file.clone());
        }
        Ok(settings.sanitized())
    }
}

/// The terminal is in raw alternate-screen mode, so logs go to a file.
/// A file that cannot be opened just disables logging.
fn init_logging(settings: &Settings) {
    let Some(path) = &settings.log_file else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[cfg(feature = "music")]
fn music_backend() -> Option<Box<dyn MusicBackend>> {
    match boss_rush::audio::rodio_backend::RodioBackend::new() {
        Ok(backend) => Some(Box::new(backend)),
        Err(e) => {
            warn!(error = %e, "no audio device, running silent");
            None
        }
    }
}

#[cfg(not(feature = "music"))]
fn music_backend() -> Option<Box<dyn MusicBackend>> {
    info!("built without the `music` feature, running silent");
    None
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, held keys
/// are tracked by the frame they were last seen and sampled once per tick, so
/// fire + movement + modifiers can all be held together.  Discrete keys
/// (pause, beam, menu choices) act on their Press event.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    music: &mut MusicSession,
) -> Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = Duration::from_secs(1) / FPS;

    let mut game = Game::new();
    let mut stars = Starfield::new(&mut rng);
    let mut held = HeldKeys::default();
    let mut hover = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    let code = normalize(code);
                    match kind {
                        KeyEventKind::Press => {
                            held.press(&code, modifiers, frame);
                            match decode(&code, modifiers, game.phase()) {
                                Some(Action::Quit) => return Ok(()),
                                Some(Action::ToggleMute) => music.toggle_mute(),
                                Some(Action::ToggleMusicPause) => music.toggle_pause(),
                                Some(Action::Game(command)) => {
                                    game.handle(command);
                                }
                                None => {}
                            }
                        }
                        KeyEventKind::Repeat => held.press(&code, modifiers, frame),
                        KeyEventKind::Release => held.release(&code),
                    }
                }
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    hover = view.to_arena(column, row);
                    if kind == MouseEventKind::Down(MouseButton::Left) {
                        if let Some(point) = hover {
                            game.handle(Command::Click(point));
                        }
                    }
                }
                _ => {}
            }
        }

        game.step(&held.snapshot(frame), &mut rng);
        stars.update(&mut rng);

        let scene = Scene {
            game: &game,
            stars: &stars,
            view,
            hover,
            music_muted: music.is_muted(),
            frame,
        };
        display::render(out, &scene)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().context("loading settings")?;
    init_logging(&settings);
    info!(?settings, "starting boss_rush");

    let mut music = MusicSession::new(music_backend(), &settings);
    if let Err(e) = music.start() {
        warn!(error = %e, "music disabled");
    }
    if settings.muted {
        music.toggle_mute();
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &settings, &mut music);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    music.shutdown();
    info!("exiting");
    result
}
