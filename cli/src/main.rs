use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use sapper_core::{Board, Coord, GameConfig, RevealOutcome};

use crate::command::{CheatLatch, Command};
use crate::render::{Charset, render};

mod command;
mod render;

#[derive(Debug, Parser)]
#[command(name = "sapper", about = "Grid-reveal mine puzzle for the terminal")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    width: Coord,
    /// Board height in cells
    #[arg(long, default_value_t = 10)]
    height: Coord,
    /// Number of hidden mines
    #[arg(long, default_value_t = 15)]
    mines: u16,
    /// Mine placement seed; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Draw the board with plain ASCII glyphs
    #[arg(long)]
    ascii: bool,
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let config = GameConfig::new(args.width, args.height, args.mines)
        .context("invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("board seed: {seed}");

    let board = Board::random(config, seed);
    let charset = if args.ascii {
        Charset::Ascii
    } else {
        Charset::Utf
    };
    run(board, charset)
}

fn run(mut board: Board, charset: Charset) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut cheat = CheatLatch::default();
    let mut line = String::new();

    loop {
        write!(stdout, "\x1b[2J\x1b[H{}", render(&board, charset, cheat.active()))?;
        writeln!(stdout, "Mines left: {}", board.mines_left())?;
        write!(stdout, "Enter command (r x y - reveal, f x y - flag, q - quit): ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || cheat.feed(&tokens) {
            continue;
        }
        let Some(command) = Command::parse(&tokens) else {
            continue;
        };

        let (width, height) = board.size();
        match command {
            Command::Quit => return Ok(()),
            Command::Reveal(x, y) | Command::Flag(x, y) if x >= width || y >= height => continue,
            Command::Reveal(x, y) => match board.reveal((x, y))? {
                RevealOutcome::HitMine => {
                    return finish(&mut board, &mut stdout, charset, "You lost!");
                }
                RevealOutcome::Won => {
                    return finish(&mut board, &mut stdout, charset, "You won!");
                }
                RevealOutcome::Revealed | RevealOutcome::NoChange => {}
            },
            Command::Flag(x, y) => {
                board.toggle_flag((x, y))?;
            }
        }
    }
}

/// Final full-disclosure frame after a terminal outcome.
fn finish(
    board: &mut Board,
    stdout: &mut io::Stdout,
    charset: Charset,
    message: &str,
) -> anyhow::Result<()> {
    board.reveal_all()?;
    writeln!(stdout, "{message}")?;
    write!(stdout, "{}", render(board, charset, false))?;
    stdout.flush()?;
    Ok(())
}
