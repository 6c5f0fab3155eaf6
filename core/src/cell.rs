use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
///
/// A cell never transitions out of `Revealed`, which makes the revealed set
/// monotonic and leaves nothing for a flag to attach to once a cell is open.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Hidden,
    Revealed(u8),
    Flagged,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}
