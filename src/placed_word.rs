use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use crate::word::{Direction, Position};

/// Identifies a [placed word](PlacedWord) among the words currently in a grid.
///
/// Derived from the clue number and the direction, so it is unique while clue numbers are.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct WordId
{
    pub clue_number: u32,
    pub direction: Direction,
}

impl WordId
{
    pub fn new(clue_number: u32, direction: Direction) -> WordId
    {
        WordId { clue_number, direction }
    }
}

impl fmt::Display for WordId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}-{}", self.clue_number, self.direction)
    }
}

/// A possible position and direction for a word, not yet checked against the grid.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Debug)]
pub struct Placement
{
    pub position: Position,
    pub direction: Direction,
}

impl Placement
{
    pub fn new(position: Position, direction: Direction) -> Placement
    {
        Placement { position, direction }
    }

    /// Positions of the `len` cells a word would cover with this placement
    pub fn cells(&self, len: usize) -> impl Iterator<Item = Position> + '_
    {
        (0..len as i16).map(move |i| self.position.advance(self.direction, i))
    }
}

/// Represents a word that has been placed into the grid during generation.
///
/// `word` is the entry as it was given, `answer` is its normalized uppercase form, which is what occupies the cells.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord
{
    pub word: String,
    pub hint: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
    pub clue_number: u32,
    pub id: WordId,
    pub answer: String,
}

impl PlacedWord
{
    pub fn new(word: String, hint: String, answer: String, start_row: usize, start_col: usize, direction: Direction, clue_number: u32) -> PlacedWord
    {
        PlacedWord
        {
            word,
            hint,
            start_row,
            start_col,
            direction,
            clue_number,
            id: WordId::new(clue_number, direction),
            answer,
        }
    }

    pub fn len(&self) -> usize
    {
        self.answer.chars().count()
    }

    pub fn is_empty(&self) -> bool
    {
        self.answer.is_empty()
    }

    pub fn placement(&self) -> Placement
    {
        Placement::new(Position::new(self.start_row as i16, self.start_col as i16), self.direction)
    }

    /// Returns (row, col, char) for every cell covered by this word
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_
    {
        self.answer.chars().enumerate().map(move |(i, c)| match self.direction
        {
            Direction::Across => (self.start_row, self.start_col + i, c),
            Direction::Down => (self.start_row + i, self.start_col, c),
        })
    }

    /// Last row covered by this word
    pub fn end_row(&self) -> usize
    {
        match self.direction
        {
            Direction::Across => self.start_row,
            Direction::Down => self.start_row + self.len().saturating_sub(1),
        }
    }

    /// Last column covered by this word
    pub fn end_col(&self) -> usize
    {
        match self.direction
        {
            Direction::Across => self.start_col + self.len().saturating_sub(1),
            Direction::Down => self.start_col,
        }
    }

    /// Returns the cells (row, col) shared with another placed word
    pub fn shared_cells(&self, other: &PlacedWord) -> Vec<(usize, usize)>
    {
        self.cells()
            .filter(|(row, col, _)| other.cells().any(|(r, c, _)| r == *row && c == *col))
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// Returns all placements that cross this word on a matching character.
    ///
    /// The new word always runs in the opposite direction. The placements are not checked against the grid,
    /// some of them can start at negative coordinates.
    ///
    /// ```text
    ///     C
    ///   C A T   ---> CAR can cross CAT on C (down from C) or on A (down, starting one row above)
    ///     R
    /// ```
    pub fn crossing_placements(&self, answer: &[char]) -> Vec<Placement>
    {
        let direction = self.direction.opposite();
        let start = self.placement().position;

        self.answer.chars().enumerate()
            .cartesian_product(answer.iter().enumerate())
            .filter(|((_, own), (_, new))| own == *new)
            .map(|((own_ind, _), (new_ind, _))|
            {
                let crossing = start.advance(self.direction, own_ind as i16);
                Placement::new(crossing.advance(direction, -(new_ind as i16)), direction)
            })
            .unique()
            .collect()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_word_id_display()
    {
        assert_eq!(WordId::new(3, Direction::Across).to_string(), "3-across");
        assert_eq!(WordId::new(12, Direction::Down).to_string(), "12-down");
    }

    #[test]
    fn test_placed_word_bounds()
    {
        let word = PlacedWord::new("otter".to_owned(), "river swimmer".to_owned(), "OTTER".to_owned(), 2, 1, Direction::Down, 1);
        assert_eq!(word.id, WordId::new(1, Direction::Down));
        assert_eq!((word.end_row(), word.end_col()), (6, 1));
        assert_eq!(word.cells().last(), Some((6, 1, 'R')));
    }

    #[test]
    fn test_crossing_placements()
    {
        let cat = PlacedWord::new("cat".to_owned(), "pet".to_owned(), "CAT".to_owned(), 5, 4, Direction::Across, 1);
        let car: Vec<char> = "CAR".chars().collect();

        assert_eq!(cat.crossing_placements(&car), vec![
            Placement::new(Position::new(5, 4), Direction::Down),
            Placement::new(Position::new(4, 5), Direction::Down),
        ]);
    }

    #[test]
    fn test_shared_cells()
    {
        let cat = PlacedWord::new("cat".to_owned(), "pet".to_owned(), "CAT".to_owned(), 5, 4, Direction::Across, 1);
        let car = PlacedWord::new("car".to_owned(), "vehicle".to_owned(), "CAR".to_owned(), 5, 4, Direction::Down, 2);
        assert_eq!(cat.shared_cells(&car), vec![(5, 4)]);
    }
}
