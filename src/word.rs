use std::fmt;
use serde::{Deserialize, Serialize};

/// Represents a cell coordinate while computing where a [word](crate::placed_word::PlacedWord) could go.
///
/// Signed, because a candidate computed from an intersection can start outside of the [grid](crate::grid::Grid).
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Position
{
    pub row: i16,
    pub col: i16,
}

impl Position
{
    pub fn new(row: i16, col: i16) -> Position
    {
        Position { row, col }
    }

    /// Returns the position `steps` cells further in the given [direction](Direction)
    pub fn advance(&self, direction: Direction, steps: i16) -> Position
    {
        match direction
        {
            Direction::Across => Position { row: self.row, col: self.col + steps },
            Direction::Down => Position { row: self.row + steps, col: self.col },
        }
    }

    /// Returns the two neighbours perpendicular to the given [direction](Direction)
    pub fn perpendicular_neighbours(&self, direction: Direction) -> [Position; 2]
    {
        let other = direction.opposite();
        [self.advance(other, -1), self.advance(other, 1)]
    }
}

/// Represents the direction of a [word](crate::placed_word::PlacedWord) placed in a [grid](crate::grid::Grid)
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction
{
    #[default]
    Across,
    Down,
}

impl Direction
{
    pub fn opposite(&self) -> Direction
    {
        match *self
        {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl fmt::Display for Direction
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Represents an input word with its hint, before it has any position in the grid.
///
/// The hint is an opaque display string. The word may contain spaces, which are kept as literal characters.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
pub struct WordEntry
{
    pub word: String,
    pub hint: String,
}

impl WordEntry
{
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> WordEntry
    {
        WordEntry { word: word.into(), hint: hint.into() }
    }

    /// Returns the uppercase answer, trimmed of surrounding whitespace
    pub fn answer(&self) -> String
    {
        self.word.trim().to_uppercase()
    }

    /// Returns the characters of the [answer](WordEntry::answer)
    pub fn answer_chars(&self) -> Vec<char>
    {
        self.answer().chars().collect()
    }

    /// Length of the answer in characters (not bytes)
    pub fn len(&self) -> usize
    {
        self.answer().chars().count()
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_word_entry_answer_is_uppercase()
    {
        let entry = WordEntry::new(" snow leopard ", "big cat of the mountains");
        assert_eq!(entry.answer(), "SNOW LEOPARD");
        assert_eq!(entry.len(), 12);
        assert!(!entry.is_empty());
        assert!(WordEntry::new("   ", "nothing").is_empty());
    }

    #[test]
    fn test_position_neighbours()
    {
        let pos = Position::new(3, 4);
        assert_eq!(pos.advance(Direction::Across, 2), Position::new(3, 6));
        assert_eq!(pos.advance(Direction::Down, -1), Position::new(2, 4));
        assert_eq!(pos.perpendicular_neighbours(Direction::Across), [Position::new(2, 4), Position::new(4, 4)]);
        assert_eq!(pos.perpendicular_neighbours(Direction::Down), [Position::new(3, 3), Position::new(3, 5)]);
    }
}
