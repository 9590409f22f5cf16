use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal,
};

use fireshow::session::TerminalSession;
use fireshow::show::Show;

const FIXED_DT: f32 = 1.0 / 60.0;
/// Most steps taken in one go after a stall.
const MAX_CATCH_UP: f32 = 3.0;

/// New Year's countdown and fireworks in the terminal.
#[derive(Parser, Debug)]
#[command(name = "fireshow", version, about, after_help = "Press 'q', ESC, or Ctrl+C to exit")]
struct Args {
    /// Wait for a key press before the countdown starts
    #[arg(long)]
    wait: bool,

    /// Write logs to this file (filter with RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // Nothing may go to stderr while the alternate screen is up.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn run(wait_for_key: bool) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;

    let (cols, rows) = terminal::size()?;
    let mut show = Show::new(cols as usize, rows as usize * 2, wait_for_key);

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        let until_step = Duration::from_secs_f32((FIXED_DT - accumulator).max(0.0));
        if event::poll(until_step)? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) if is_quit(key_event) => break,
                Event::Resize(cols, rows) => {
                    log::debug!("terminal resized to {cols}x{rows}");
                    show.resize(*cols as usize, *rows as usize * 2);
                    session.clear()?;
                }
                _ => show.handle_event(&event),
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if accumulator > FIXED_DT * MAX_CATCH_UP {
            accumulator = FIXED_DT * MAX_CATCH_UP;
        }

        let mut stepped = false;
        while accumulator >= FIXED_DT {
            show.update(FIXED_DT);
            accumulator -= FIXED_DT;
            stepped = true;
        }

        if stepped {
            show.render(session.writer())?;
        }
    }

    show.shutdown();
    session.restore()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    log::info!("fireshow {} starting", env!("CARGO_PKG_VERSION"));
    run(args.wait).context("terminal session failed")?;
    log::info!("fireshow exited");

    Ok(())
}
