//! Lays out hinted words into a numbered crossword.
//!
//! [CrosswordGenerator](generator::CrosswordGenerator) does the placement search for one word list,
//! [generate_crossword](generator::generate_crossword) and [crossword_stream](generator::crossword_stream)
//! wrap it with word selection and retries.

pub mod traits;
pub mod word;
pub mod placed_word;
pub mod grid;
pub mod crossword;
pub mod settings;
pub mod generator;

pub use crossword::{CrosswordData, CrosswordError, GeneratedCrossword};
pub use generator::{crossword_stream, generate_crossword, CrosswordGenerator};
pub use settings::{CrosswordGeneratorSettings, Difficulty};
pub use word::WordEntry;
