use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::Hide;
use crossterm::event::{self, EnableMouseCapture, Event, MouseEvent, MouseEventKind};
use crossterm::terminal::{self, EnterAlternateScreen};
use crossterm::ExecutableCommand;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pacman_lite::config::Settings;
use pacman_lite::input::{key_command, Command};
use pacman_lite::render::{restore_terminal, Renderer};
use pacman_lite::{Maze, Runner, Simulation};

const INPUT_POLL_MS: u64 = 10;

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    init_tracing(settings.log_file.as_deref())?;

    let layout = settings.layout;
    let maze = Arc::new(layout.maze().context("built-in layout is malformed")?);
    let rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let sim = Simulation::new(
        Arc::clone(&maze),
        layout.player_start(),
        layout.wanderer_start(),
        rng,
    )?;
    let mut runner = Runner::new(sim, settings.tick_interval());
    info!(%layout, seed = ?settings.seed, tick_ms = settings.tick_ms, "starting");

    let mut stdout = io::stdout();
    let result = enter_terminal(&mut stdout)
        .map_err(anyhow::Error::from)
        .and_then(|()| run(&mut stdout, &maze, &mut runner));
    if let Err(err) = runner.stop() {
        warn!(error = %err, "tick loop did not shut down cleanly");
    }

    let restored = restore_terminal(&mut stdout);
    info!(tick = runner.snapshot().tick, "exited");
    result?;
    restored.context("failed to restore the terminal")
}

fn enter_terminal(stdout: &mut Stdout) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    stdout.execute(EnableMouseCapture)?;
    Ok(())
}

fn run(stdout: &mut Stdout, maze: &Maze, runner: &mut Runner<ChaCha8Rng>) -> anyhow::Result<()> {
    let intent = runner.intent();
    let mut renderer = Renderer::new(maze.columns(), maze.rows());
    let (frames_tx, frames) = mpsc::channel();
    let mut latest = runner.snapshot();
    let mut paused = false;
    let mut dirty = true;

    runner.start(frames_tx.clone())?;

    loop {
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => match key_command(key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::TogglePause) => {
                        if paused {
                            runner.start(frames_tx.clone())?;
                        } else {
                            runner.stop()?;
                        }
                        paused = !paused;
                        info!(paused, "pause toggled");
                        dirty = true;
                    }
                    Some(Command::Steer(dir)) => intent.set(dir),
                    None => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(_),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(viewport) = renderer.viewport() {
                        intent.set(viewport.pointer_direction(latest.player.pos, column, row));
                    }
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        while let Ok(snapshot) = frames.try_recv() {
            latest = snapshot;
            dirty = true;
        }

        if dirty {
            renderer.render(stdout, terminal::size()?, maze, &latest, paused)?;
            dirty = false;
        }
    }
}

fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    // the terminal belongs to the board, so logs only go to a file
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .compact()
        .init();
    Ok(())
}
