//! wordboard: find the best moves on a half-played board before the clock runs out

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use wordboard::app::App;
use wordboard::config::{init_logging, Cli, Command};
use wordboard::game::{Axis, Dictionary};
use wordboard::rush::generate_puzzle;
use wordboard::tui::{self, Tui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.is_interactive())?;
    log::debug!("options: {:?}", cli);

    let dictionary = match &cli.dictionary {
        Some(path) => Dictionary::load(path)
            .with_context(|| format!("loading dictionary {}", path.display()))?,
        None => {
            log::warn!("no dictionary given, puzzles will have no top moves");
            Dictionary::default()
        }
    };

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let puzzle = generate_puzzle(&dictionary, &mut rng);

    match cli.command() {
        Command::Puzzle => {
            let json = serde_json::to_string_pretty(&puzzle).context("encoding puzzle")?;
            println!("{}", json);
        }
        Command::Rush { duration } => {
            let app = run_rush(App::new(puzzle, Box::new(dictionary), duration))?;
            let summary = app.round_summary();
            println!(
                "Score {} of {} ({} of {} top moves, seed {})",
                summary.total_score,
                summary.max_score,
                summary.found.len(),
                summary.found.len() + summary.missed.len(),
                seed
            );
        }
    }
    Ok(())
}

/// Drive one round until the player quits.
fn run_rush(mut app: App) -> anyhow::Result<App> {
    let mut terminal = Tui::new().context("opening terminal")?;
    terminal.enter()?;

    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => app.quit(),
                        KeyCode::Enter => app.on_submit(),
                        KeyCode::Backspace => app.on_backspace(),
                        KeyCode::Delete => app.recall(),
                        KeyCode::Tab => app.toggle_direction(),
                        KeyCode::Left => app.move_cursor(Axis::Horizontal, -1),
                        KeyCode::Right => app.move_cursor(Axis::Horizontal, 1),
                        KeyCode::Up => app.move_cursor(Axis::Vertical, -1),
                        KeyCode::Down => app.move_cursor(Axis::Vertical, 1),
                        KeyCode::Char(c @ '1'..='3') => app.on_hint(c as u8 - b'0'),
                        KeyCode::Char(c) if c.is_ascii_alphabetic() => app.on_char(c),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    terminal.exit()?;
    Ok(app)
}
