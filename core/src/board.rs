use alloc::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// Both end states are terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first reveal to win or loss.
///
/// Owns the mine positions and the per-cell play state. All mutators reject
/// moves once the game has finished; everything else about misuse (revealing
/// twice, flagging an open cell) is a silent no-op outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    minefield: Minefield,
    cells: Array2<Cell>,
    // Safe cells only; mines never enter this tally.
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
}

impl Board {
    pub fn new(minefield: Minefield) -> Self {
        let size = minefield.size();
        Self {
            minefield,
            cells: Array2::default(nd(size)),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::default(),
        }
    }

    pub fn random(config: GameConfig, seed: u64) -> Self {
        Self::new(Minefield::random(config, seed))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// True iff every non-mine cell is revealed; flag state is ignored.
    pub fn is_won(&self) -> bool {
        self.revealed_count == self.minefield.safe_cell_count()
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// How many mines have not been flagged yet; negative with excess flags.
    pub fn mines_left(&self) -> isize {
        self.minefield.mine_count() as isize - self.flagged_count as isize
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[nd(coords)]
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_revealed()
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_flagged()
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.minefield.contains_mine(coords)
    }

    /// What the cell holds, independent of whether it is revealed.
    pub fn display_value(&self, coords: Coord2) -> CellContent {
        if self.minefield.contains_mine(coords) {
            CellContent::Mine
        } else {
            CellContent::Number(self.minefield.adjacent_mines(coords))
        }
    }

    /// Flips the flag on a hidden cell. Flagging never changes the game
    /// state, and a revealed cell cannot take a flag.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use Cell::*;
        use FlagOutcome::*;

        let coords = self.minefield.validate_coords(coords)?;
        self.check_playing()?;

        Ok(match self.cells[nd(coords)] {
            Hidden => {
                self.cells[nd(coords)] = Flagged;
                self.flagged_count += 1;
                Toggled
            }
            Flagged => {
                self.cells[nd(coords)] = Hidden;
                self.flagged_count -= 1;
                Toggled
            }
            Revealed(_) => NoChange,
        })
    }

    /// Opens a hidden cell. Opening a zero cell cascades through its
    /// zero-connected region and the region's nonzero border; opening a mine
    /// loses the game. Revealed and flagged cells are left untouched.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        self.check_playing()?;

        if !matches!(self.cells[nd(coords)], Cell::Hidden) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.minefield[coords] {
            self.cells[nd(coords)] = Cell::Revealed(self.minefield.adjacent_mines(coords));
            self.state = GameState::Lost;
            log::debug!("mine hit at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let adjacent = self.reveal_safe(coords);
        if adjacent == 0 {
            self.flood_from(coords);
        }

        Ok(if self.is_won() {
            self.state = GameState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Work-queue flood fill from a freshly opened zero cell. Deduplicates
    /// through a visited set, stops at nonzero cells, and skips flagged ones,
    /// so the cascade can never reach a mine.
    fn flood_from(&mut self, start: Coord2) {
        let mut visited = BTreeSet::from([start]);
        let mut to_visit: VecDeque<_> = self
            .minefield
            .neighbors(start)
            .filter(|&pos| matches!(self.cells[nd(pos)], Cell::Hidden))
            .collect();
        log::trace!("flood fill from {:?}, seed queue: {:?}", start, to_visit);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if !matches!(self.cells[nd(coords)], Cell::Hidden) {
                continue;
            }

            let adjacent = self.reveal_safe(coords);
            if adjacent == 0 {
                to_visit.extend(
                    self.minefield
                        .neighbors(coords)
                        .filter(|&pos| matches!(self.cells[nd(pos)], Cell::Hidden))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Marks one known-safe cell revealed and returns its adjacency count.
    fn reveal_safe(&mut self, coords: Coord2) -> u8 {
        let adjacent = self.minefield.adjacent_mines(coords);
        self.cells[nd(coords)] = Cell::Revealed(adjacent);
        self.revealed_count += 1;
        log::trace!("revealed {:?}, adjacent mines: {}", coords, adjacent);
        adjacent
    }

    /// End-of-game disclosure: opens every still-hidden cell, mines included.
    /// Flags are left in place so the final display can show them.
    pub fn reveal_all(&mut self) -> Result<()> {
        if !self.state.is_finished() {
            return Err(GameError::GameInProgress);
        }

        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                if matches!(self.cells[nd((x, y))], Cell::Hidden) {
                    self.cells[nd((x, y))] =
                        Cell::Revealed(self.minefield.adjacent_mines((x, y)));
                }
            }
        }
        Ok(())
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(Minefield::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reveal_of_mine_loses_without_touching_other_cells() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((2, 2)), Ok(RevealOutcome::HitMine));
        assert_eq!(board.state(), GameState::Lost);
        assert!(board.is_revealed((2, 2)));
        for x in 0..3 {
            for y in 0..3 {
                if (x, y) != (2, 2) {
                    assert!(!board.is_revealed((x, y)));
                }
            }
        }
    }

    #[test]
    fn zero_cell_cascade_clears_the_board_and_wins() {
        // 3x3 with one corner mine: (0,0) holds a zero, and its cascade must
        // open all 8 safe cells in a single call.
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::Won));
        assert_eq!(board.state(), GameState::Won);
        assert_eq!(board.cell_at((0, 0)), Cell::Revealed(0));
        assert_eq!(board.cell_at((1, 1)), Cell::Revealed(1));
        assert_eq!(board.cell_at((2, 1)), Cell::Revealed(1));
        assert_eq!(board.cell_at((2, 2)), Cell::Hidden);
    }

    #[test]
    fn cascade_stops_at_nonzero_border() {
        // Mine in the middle of a 5x1 strip: revealing the far left zero
        // opens up to the bordering 1 and no further.
        let mut board = board((5, 1), &[(2, 0)]);

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::Revealed));
        assert_eq!(board.cell_at((0, 0)), Cell::Revealed(0));
        assert_eq!(board.cell_at((1, 0)), Cell::Revealed(1));
        assert_eq!(board.cell_at((2, 0)), Cell::Hidden);
        assert_eq!(board.cell_at((3, 0)), Cell::Hidden);
        assert_eq!(board.cell_at((4, 0)), Cell::Hidden);
    }

    #[test]
    fn cascade_never_reveals_a_mine() {
        let config = GameConfig::new(16, 16, 40).unwrap();
        let mut board = Board::random(config, 7);

        for x in 0..16 {
            for y in 0..16 {
                if !board.is_mine((x, y)) && !board.is_finished() {
                    board.reveal((x, y)).unwrap();
                }
            }
        }
        for x in 0..16 {
            for y in 0..16 {
                if board.is_mine((x, y)) {
                    assert!(!board.is_revealed((x, y)));
                }
            }
        }
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::Revealed));
        let snapshot = board.clone();
        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed_until_unflagged() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.toggle_flag((1, 1)).unwrap();
        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::NoChange));
        assert!(!board.is_revealed((1, 1)));

        board.toggle_flag((1, 1)).unwrap();
        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::Revealed));
    }

    #[test]
    fn cascade_skips_flagged_cells() {
        let mut board = board((3, 3), &[(2, 2)]);

        board.toggle_flag((0, 1)).unwrap();
        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::Revealed));
        assert!(board.is_flagged((0, 1)));
        assert!(!board.is_revealed((0, 1)));
    }

    #[test]
    fn flag_toggles_back_to_unflagged() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.toggle_flag((2, 2)), Ok(FlagOutcome::Toggled));
        assert!(board.is_flagged((2, 2)));
        assert_eq!(board.toggle_flag((2, 2)), Ok(FlagOutcome::Toggled));
        assert!(!board.is_flagged((2, 2)));
        assert_eq!(board.mines_left(), 1);
    }

    #[test]
    fn flagging_a_revealed_cell_is_a_no_op() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.reveal((2, 2)).unwrap();
        assert_eq!(board.toggle_flag((2, 2)), Ok(FlagOutcome::NoChange));
        assert!(!board.is_flagged((2, 2)));
    }

    #[test]
    fn win_ignores_flag_state() {
        let mut board = board((2, 1), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();
        assert_eq!(board.reveal((1, 0)), Ok(RevealOutcome::Won));
        assert_eq!(board.state(), GameState::Won);
        assert!(board.is_won());
    }

    #[test]
    fn no_moves_accepted_after_the_game_ends() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::HitMine));
        assert_eq!(board.reveal((1, 1)), Err(GameError::GameOver));
        assert_eq!(board.toggle_flag((1, 1)), Err(GameError::GameOver));
    }

    #[test]
    fn out_of_bounds_moves_are_rejected_at_the_boundary() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 3)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn reveal_all_is_rejected_mid_game() {
        let mut board = board((3, 3), &[(0, 0)]);
        assert_eq!(board.reveal_all(), Err(GameError::GameInProgress));
    }

    #[test]
    fn reveal_all_discloses_everything_but_keeps_flags() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.toggle_flag((1, 0)).unwrap();
        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::HitMine));
        board.reveal_all().unwrap();

        assert!(board.is_revealed((0, 0)));
        assert!(board.is_revealed((0, 1)));
        assert!(board.is_revealed((1, 1)));
        assert!(board.is_flagged((1, 0)));
    }

    #[test]
    fn display_value_resolves_mines_and_numbers() {
        let board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.display_value((0, 0)), CellContent::Mine);
        assert_eq!(board.display_value((1, 1)), CellContent::Number(1));
    }
}
