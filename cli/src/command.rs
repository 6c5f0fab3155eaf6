use sapper_core::Coord;

/// The secret sequence, one token per line word, uppercased.
const CHEAT_SEQUENCE: [&str; 10] = ["W", "W", "S", "S", "A", "D", "A", "D", "B", "A"];

/// One-way latch for the cheat display. Once flipped it stays on for the
/// rest of the session.
#[derive(Debug, Default)]
pub struct CheatLatch {
    active: bool,
}

impl CheatLatch {
    pub fn active(&self) -> bool {
        self.active
    }

    /// Consumes any input of the sequence's exact length, latching when the
    /// tokens match. Returns whether the input was consumed.
    pub fn feed(&mut self, tokens: &[&str]) -> bool {
        if tokens.len() != CHEAT_SEQUENCE.len() {
            return false;
        }
        let matched = tokens
            .iter()
            .zip(CHEAT_SEQUENCE)
            .all(|(token, expected)| token.eq_ignore_ascii_case(expected));
        if matched {
            log::info!("cheat sequence accepted");
            self.active = true;
        }
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord, Coord),
    Flag(Coord, Coord),
    Quit,
}

impl Command {
    /// Parses a tokenized input line; anything malformed is `None` and the
    /// caller re-prompts.
    pub fn parse(tokens: &[&str]) -> Option<Self> {
        match tokens {
            [cmd] if cmd.eq_ignore_ascii_case("q") => Some(Self::Quit),
            [cmd, x, y] => {
                let x = x.parse().ok()?;
                let y = y.parse().ok()?;
                if cmd.eq_ignore_ascii_case("r") {
                    Some(Self::Reveal(x, y))
                } else if cmd.eq_ignore_ascii_case("f") {
                    Some(Self::Flag(x, y))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
