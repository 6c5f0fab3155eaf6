use std::fmt::Write;

use sapper_core::{Board, Cell, CellContent, Coord2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Charset {
    Utf,
    Ascii,
}

impl Charset {
    const fn hidden(self) -> char {
        match self {
            Self::Utf => '■',
            Self::Ascii => '#',
        }
    }

    const fn flag(self) -> char {
        match self {
            Self::Utf => '➤',
            Self::Ascii => 'F',
        }
    }

    const fn zero(self) -> char {
        match self {
            Self::Utf => '○',
            Self::Ascii => '.',
        }
    }

    const fn mine(self) -> char {
        match self {
            Self::Utf => '●',
            Self::Ascii => '*',
        }
    }
}

/// Draws the whole board: a column header row, zero-padded row labels, and
/// one glyph per cell. With `cheat` on, unrevealed safe cells show their
/// adjacency number while mines stay hidden.
pub fn render(board: &Board, charset: Charset, cheat: bool) -> String {
    let (width, height) = board.size();
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..width {
        write!(out, "{x} ").unwrap();
    }
    out.push('\n');

    for y in 0..height {
        write!(out, "{y:02} ").unwrap();
        for x in 0..width {
            push_cell(&mut out, board, (x, y), charset, cheat);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn push_cell(out: &mut String, board: &Board, coords: Coord2, charset: Charset, cheat: bool) {
    match board.cell_at(coords) {
        // Flags survive the end-of-game disclosure, so this also covers the
        // final frame's flag display.
        Cell::Flagged => out.push(charset.flag()),
        Cell::Revealed(_) => match board.display_value(coords) {
            CellContent::Mine => out.push(charset.mine()),
            CellContent::Number(0) => out.push(charset.zero()),
            CellContent::Number(n) => {
                write!(out, "{n}").unwrap();
            }
        },
        Cell::Hidden => match board.display_value(coords) {
            // The cheat display shows raw numbers, zeros included, but never
            // gives away a mine.
            CellContent::Number(n) if cheat => {
                write!(out, "{n}").unwrap();
            }
            _ => out.push(charset.hidden()),
        },
    }
}
