use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use crate::{placed_word::{Placement, PlacedWord, WordId}, word::{Direction, Position}};

/// Represents one square of the [grid](Grid)
///
/// An occupied cell holds exactly one character, shared by every word in `occupying_word_ids`.
/// An unoccupied cell has no character and no occupants.
#[derive(Clone, Eq, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct Cell
{
    pub char: Option<char>,
    pub is_occupied: bool,
    pub clue_number: Option<u32>,
    pub occupying_word_ids: BTreeSet<WordId>,
}

impl Cell
{
    fn clear(&mut self)
    {
        self.char = None;
        self.is_occupied = false;
    }

    /// Returns true if some word in the given direction covers this cell
    pub fn has_occupant_in(&self, direction: Direction) -> bool
    {
        self.occupying_word_ids.iter().any(|id| id.direction == direction)
    }
}

/// # Represents the square occupancy grid used while searching for a layout
///
/// Words are written with [Grid::place_word] and taken back with [Grid::remove_word], the two must be used in pairs.
///
/// ```
/// # use wordgrid::grid::Grid;
/// # use wordgrid::placed_word::PlacedWord;
/// # use wordgrid::word::{Direction, Position};
/// let mut grid = Grid::new(5);
///
/// grid.place_word(&PlacedWord::new("hello".to_owned(), "greeting".to_owned(), "HELLO".to_owned(), 0, 0, Direction::Across, 1));
///
/// //     ---------
/// //    |H E L L O|
/// //    |    o    |
/// //    |    c    |
/// //    |    a    |
/// //    |    l    |
/// //     ---------
/// let local: Vec<char> = "LOCAL".chars().collect();
/// assert!(grid.can_place_word(&local, Position::new(0, 2), Direction::Down));
/// // would run alongside the H
/// assert!(!grid.can_place_word(&local, Position::new(1, 0), Direction::Across));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Grid
{
    size: usize,
    cells: Vec<Vec<Cell>>,
    placed_count: usize,
}

impl Grid
{
    /// Creates an empty `size`×`size` grid
    pub fn new(size: usize) -> Grid
    {
        Grid { size, cells: vec![vec![Cell::default(); size]; size], placed_count: 0 }
    }

    pub fn size(&self) -> usize
    {
        self.size
    }

    /// Number of words currently placed
    pub fn placed_count(&self) -> usize
    {
        self.placed_count
    }

    /// Returns the cell at the given position, or None if it is outside the grid
    pub fn cell(&self, position: Position) -> Option<&Cell>
    {
        let (row, col) = self.index_of(position)?;
        Some(&self.cells[row][col])
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell>
    {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    fn index_of(&self, position: Position) -> Option<(usize, usize)>
    {
        if position.row < 0 || position.col < 0 { return None; }
        let (row, col) = (position.row as usize, position.col as usize);
        (row < self.size && col < self.size).then_some((row, col))
    }

    fn is_occupied(&self, position: Position) -> bool
    {
        self.cell(position).is_some_and(|cell| cell.is_occupied)
    }

    /// Checks if a word can be written at `start` in `direction`.
    ///
    /// - every cell must be inside the grid
    /// - occupied cells must already hold the same character and be covered by a perpendicular word (intersection)
    /// - the cells right before the start and right after the end must be free
    /// - newly used cells must not have occupied neighbours perpendicular to the word
    /// - once any word is placed, the word needs at least one intersection and at least one new cell
    pub fn can_place_word(&self, answer: &[char], start: Position, direction: Direction) -> bool
    {
        if answer.is_empty() { return false; }

        let placement = Placement::new(start, direction);
        if placement.cells(answer.len()).any(|pos| self.index_of(pos).is_none()) { return false; }

        if self.is_occupied(start.advance(direction, -1)) || self.is_occupied(start.advance(direction, answer.len() as i16))
        {
            return false;
        }

        let mut intersections = 0;
        let mut new_cells = 0;

        for (pos, ch) in placement.cells(answer.len()).zip(answer.iter())
        {
            let Some(cell) = self.cell(pos) else { return false; };

            if cell.is_occupied
            {
                if cell.char != Some(*ch) || cell.has_occupant_in(direction) { return false; }
                intersections += 1;
            }
            else
            {
                if pos.perpendicular_neighbours(direction).iter().any(|n| self.is_occupied(*n)) { return false; }
                new_cells += 1;
            }
        }

        if self.placed_count > 0 && (intersections == 0 || new_cells == 0) { return false; }

        true
    }

    /// Writes the word into its cells and stamps the clue number on its starting cell.
    ///
    /// Does not validate the placement, use [Grid::can_place_word] first.
    pub fn place_word(&mut self, word: &PlacedWord)
    {
        for (row, col, ch) in word.cells()
        {
            let cell = &mut self.cells[row][col];
            cell.char = Some(ch);
            cell.is_occupied = true;
            cell.occupying_word_ids.insert(word.id);
        }

        let start = &mut self.cells[word.start_row][word.start_col];
        if start.clue_number.is_none()
        {
            start.clue_number = Some(word.clue_number);
        }

        self.placed_count += 1;
    }

    /// Takes a word back out of the grid.
    ///
    /// Cells still covered by another word keep their character.
    pub fn remove_word(&mut self, word: &PlacedWord)
    {
        for (row, col, _) in word.cells()
        {
            let cell = &mut self.cells[row][col];
            cell.occupying_word_ids.remove(&word.id);
            if cell.occupying_word_ids.is_empty()
            {
                cell.clear();
            }
        }

        let start = &mut self.cells[word.start_row][word.start_col];
        if start.clue_number == Some(word.clue_number)
        {
            start.clue_number = None;
        }

        self.placed_count = self.placed_count.saturating_sub(1);
    }

    /// Returns true if no cell is occupied
    pub fn is_empty(&self) -> bool
    {
        self.cells.iter().flatten().all(|cell| !cell.is_occupied)
    }
}
