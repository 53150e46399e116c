use std::{collections::BTreeMap, fmt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{grid::Grid, placed_word::PlacedWord, word::Direction};

/// Error type for possible errors when generating crosswords on behalf of a caller
///
/// The generator itself never fails with an error, an unsatisfiable layout is reported as `None`.
#[derive(Error, Debug)]
pub enum CrosswordError
{
    #[error("No crossword could be generated in {attempts} attempts.")]
    GenerationFailed { attempts: u32 },
    #[error("The word pool has no usable words.")]
    EmptyWordPool,
    #[error("Invalid generator settings: {0}")]
    InvalidSettings(String),
    #[error("Cannot read generator settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("Crossword worker failed: {0}")]
    Worker(String),
}

/// A clue of the finished crossword, `row` and `col` are relative to the cropped [grid](CrosswordData::grid)
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Clue
{
    pub clue: String,
    pub answer: String,
    pub row: usize,
    pub col: usize,
}

/// A non-blocked square of the finished crossword
///
/// `char` is the solution letter, hiding it until the puzzle is solved is up to the consumer.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct OutputCell
{
    pub char: char,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number: Option<u32>,
}

/// # Represents a finished crossword, ready to be rendered
///
/// The grid is cropped to the bounding box of the placed words, blocked squares are `None`.
/// Clues are keyed by clue number, look them up by number rather than relying on iteration order.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct CrosswordData
{
    pub across: BTreeMap<u32, Clue>,
    pub down: BTreeMap<u32, Clue>,
    pub grid: Vec<Vec<Option<OutputCell>>>,
}

impl CrosswordData
{
    /// A 1×1 blocked grid with no clues, what an empty layout turns into
    pub fn degenerate() -> CrosswordData
    {
        CrosswordData { across: BTreeMap::new(), down: BTreeMap::new(), grid: vec![vec![None]] }
    }

    /// Builds the output shape from the search grid and the words placed on it
    pub fn from_layout(grid: &Grid, placed_words: &[PlacedWord]) -> CrosswordData
    {
        let Some(bounds) = BoundingBox::of(placed_words) else { return CrosswordData::degenerate(); };

        let cropped = (bounds.min_row..=bounds.max_row)
            .map(|row| (bounds.min_col..=bounds.max_col)
                .map(|col| grid.cell_at(row, col)
                    .filter(|cell| cell.is_occupied)
                    .and_then(|cell| cell.char.map(|char| OutputCell { char, number: cell.clue_number })))
                .collect())
            .collect();

        let mut across = BTreeMap::new();
        let mut down = BTreeMap::new();

        for word in placed_words
        {
            let clue = Clue
            {
                clue: word.hint.clone(),
                answer: word.answer.clone(),
                row: word.start_row - bounds.min_row,
                col: word.start_col - bounds.min_col,
            };

            match word.direction
            {
                Direction::Across => across.insert(word.clue_number, clue),
                Direction::Down => down.insert(word.clue_number, clue),
            };
        }

        CrosswordData { across, down, grid: cropped }
    }

    /// Returns the size (rows, columns) of the cropped grid
    pub fn get_size(&self) -> (usize, usize)
    {
        (self.grid.len(), self.grid.first().map_or(0, |row| row.len()))
    }

    /// Returns a matrix of characters, `None` for blocked squares
    pub fn generate_char_table(&self) -> Vec<Vec<Option<char>>>
    {
        self.grid.iter()
            .map(|row| row.iter().map(|cell| cell.as_ref().map(|c| c.char)).collect())
            .collect()
    }

    /// Iterates over all clues, across ones first, each group sorted by clue number
    pub fn clues(&self) -> impl Iterator<Item = (Direction, u32, &Clue)>
    {
        self.across.iter().map(|(n, c)| (Direction::Across, *n, c))
            .chain(self.down.iter().map(|(n, c)| (Direction::Down, *n, c)))
    }

    pub fn to_json(&self) -> Result<String, CrosswordError>
    {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for CrosswordData
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for row in self.generate_char_table()
        {
            let line: Vec<String> = row.into_iter().map(|c| c.unwrap_or('#').to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }

        for (direction, number, clue) in self.clues()
        {
            writeln!(f, "{number} {direction}: {} ({})", clue.clue, clue.answer.chars().count())?;
        }

        Ok(())
    }
}

/// Result of a successful generation
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCrossword
{
    pub crossword_data: CrosswordData,
    pub placed_words: Vec<PlacedWord>,
}

impl GeneratedCrossword
{
    pub fn from_layout(grid: &Grid, placed_words: Vec<PlacedWord>) -> GeneratedCrossword
    {
        GeneratedCrossword { crossword_data: CrosswordData::from_layout(grid, &placed_words), placed_words }
    }

    /// True if nothing was placed, which callers must treat like a failed generation
    pub fn is_empty(&self) -> bool
    {
        self.placed_words.is_empty()
    }
}

/// Inclusive bounds of every cell covered by a set of words
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
struct BoundingBox
{
    min_row: usize,
    min_col: usize,
    max_row: usize,
    max_col: usize,
}

impl BoundingBox
{
    fn of(words: &[PlacedWord]) -> Option<BoundingBox>
    {
        words.iter().map(|w| BoundingBox { min_row: w.start_row, min_col: w.start_col, max_row: w.end_row(), max_col: w.end_col() })
            .reduce(|a, b| BoundingBox
            {
                min_row: a.min_row.min(b.min_row),
                min_col: a.min_col.min(b.min_col),
                max_row: a.max_row.max(b.max_row),
                max_col: a.max_col.max(b.max_col),
            })
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn layout() -> (Grid, Vec<PlacedWord>)
    {
        //     ---------
        //    |    C    |
        //    |H E A R T|
        //    |    T    |
        //     ---------
        let heart = PlacedWord::new("heart".to_owned(), "pumps blood".to_owned(), "HEART".to_owned(), 4, 2, Direction::Across, 1);
        let cat = PlacedWord::new("cat".to_owned(), "pet".to_owned(), "CAT".to_owned(), 3, 4, Direction::Down, 2);
        let mut grid = Grid::new(10);
        grid.place_word(&heart);
        grid.place_word(&cat);
        (grid, vec![heart, cat])
    }

    #[test]
    fn test_crossword_data_is_cropped()
    {
        let (grid, words) = layout();
        let data = CrosswordData::from_layout(&grid, &words);

        assert_eq!(data.get_size(), (3, 5));
        assert_eq!(data.generate_char_table(), vec![
            vec![None, None, Some('C'), None, None],
            vec![Some('H'), Some('E'), Some('A'), Some('R'), Some('T')],
            vec![None, None, Some('T'), None, None],
        ]);
        assert_eq!(data.grid[0][2], Some(OutputCell { char: 'C', number: Some(2) }));
        assert_eq!(data.grid[1][0], Some(OutputCell { char: 'H', number: Some(1) }));
        assert_eq!(data.grid[1][1], Some(OutputCell { char: 'E', number: None }));
    }

    #[test]
    fn test_crossword_data_clues()
    {
        let (grid, words) = layout();
        let data = CrosswordData::from_layout(&grid, &words);

        assert_eq!(data.across.get(&1), Some(&Clue { clue: "pumps blood".to_owned(), answer: "HEART".to_owned(), row: 1, col: 0 }));
        assert_eq!(data.down.get(&2), Some(&Clue { clue: "pet".to_owned(), answer: "CAT".to_owned(), row: 0, col: 2 }));
        assert_eq!(data.clues().map(|(d, n, _)| (d, n)).collect::<Vec<_>>(), vec![(Direction::Across, 1), (Direction::Down, 2)]);
    }

    #[test]
    fn test_crossword_data_degenerate()
    {
        let data = CrosswordData::from_layout(&Grid::new(10), &[]);
        assert_eq!(data, CrosswordData::degenerate());
        assert_eq!(data.grid, vec![vec![None]]);
        assert!(data.across.is_empty() && data.down.is_empty());
        assert!(GeneratedCrossword::from_layout(&Grid::new(10), vec![]).is_empty());
    }

    #[test]
    fn test_crossword_data_json_shape()
    {
        let (grid, words) = layout();
        let json: serde_json::Value = serde_json::from_str(&CrosswordData::from_layout(&grid, &words).to_json().unwrap()).unwrap();

        assert_eq!(json["grid"][0][0], serde_json::Value::Null);
        assert_eq!(json["grid"][0][2], serde_json::json!({ "char": "C", "number": 2 }));
        assert_eq!(json["grid"][1][1], serde_json::json!({ "char": "E" }));
        assert_eq!(json["across"]["1"]["answer"], "HEART");
        assert_eq!(json["down"]["2"]["clue"], "pet");
    }

    #[test]
    fn test_crossword_data_display()
    {
        let (grid, words) = layout();
        let text = CrosswordData::from_layout(&grid, &words).to_string();

        assert_eq!(text, "# # C # #\nH E A R T\n# # T # #\n1 across: pumps blood (5)\n2 down: pet (3)\n");
    }
}
