use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use crate::{crossword::CrosswordError, traits::CrosswordRng, word::WordEntry};

/// Difficulty tiers, each one a grid size and a number of words to attempt
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty
{
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty
{
    pub fn grid_size(&self) -> usize
    {
        match self
        {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        }
    }

    pub fn word_count(&self) -> usize
    {
        match self
        {
            Difficulty::Easy => 6,
            Difficulty::Medium => 10,
            Difficulty::Hard => 15,
        }
    }
}

/// Represents all settings of the caller side of generation: what to generate and how hard to retry.
///
/// Every field has a default, so partial JSON is accepted:
/// ```
/// # use wordgrid::settings::CrosswordGeneratorSettings;
/// let settings = CrosswordGeneratorSettings::from_json(r#"{ "grid_size": 12, "seed": 7 }"#).unwrap();
/// assert_eq!(settings.grid_size, 12);
/// assert_eq!(settings.max_generation_attempts, 10);
/// assert_eq!(settings.seed, Some(7));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosswordGeneratorSettings
{
    pub grid_size: usize,
    pub word_count: usize,
    /// How many fresh generators (each with a new word selection) are tried before giving up
    pub max_generation_attempts: u32,
    /// Seed for reproducible streams, entropy is used when missing
    pub seed: Option<u64>,
}

impl CrosswordGeneratorSettings
{
    pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 10;
    pub const MAX_GRID_SIZE: usize = 100;

    pub fn from_difficulty(difficulty: Difficulty) -> CrosswordGeneratorSettings
    {
        CrosswordGeneratorSettings
        {
            grid_size: difficulty.grid_size(),
            word_count: difficulty.word_count(),
            max_generation_attempts: Self::DEFAULT_MAX_GENERATION_ATTEMPTS,
            seed: None,
        }
    }

    /// Parses and [validates](CrosswordGeneratorSettings::validate) settings from JSON
    pub fn from_json(json: &str) -> Result<CrosswordGeneratorSettings, CrosswordError>
    {
        let settings: CrosswordGeneratorSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CrosswordError>
    {
        if self.grid_size == 0 { return Err(CrosswordError::InvalidSettings("grid size must be at least 1".to_owned())); }
        if self.grid_size > Self::MAX_GRID_SIZE { return Err(CrosswordError::InvalidSettings(format!("grid size must be at most {}", Self::MAX_GRID_SIZE))); }
        if self.word_count == 0 { return Err(CrosswordError::InvalidSettings("word count must be at least 1".to_owned())); }
        if self.max_generation_attempts == 0 { return Err(CrosswordError::InvalidSettings("at least one generation attempt is needed".to_owned())); }
        Ok(())
    }

    /// Picks up to `word_count` random entries from the pool.
    ///
    /// Entries that are empty or longer than the grid can never be placed, so they are left out.
    pub fn select_words(&self, pool: &[WordEntry], rng: &mut impl CrosswordRng) -> Vec<WordEntry>
    {
        let usable: Vec<&WordEntry> = pool.iter().filter(|w| !w.is_empty() && w.len() <= self.grid_size).collect();
        usable.choose_multiple(rng, self.word_count).map(|w| (*w).clone()).collect()
    }
}

impl Default for CrosswordGeneratorSettings
{
    fn default() -> Self
    {
        CrosswordGeneratorSettings::from_difficulty(Difficulty::default())
    }
}

#[cfg(test)]
mod tests
{
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_settings_from_difficulty()
    {
        let easy = CrosswordGeneratorSettings::from_difficulty(Difficulty::Easy);
        assert_eq!((easy.grid_size, easy.word_count), (10, 6));
        let hard = CrosswordGeneratorSettings::from_difficulty(Difficulty::Hard);
        assert_eq!((hard.grid_size, hard.word_count), (20, 15));
        assert_eq!(CrosswordGeneratorSettings::default(), CrosswordGeneratorSettings::from_difficulty(Difficulty::Medium));
    }

    #[test]
    fn test_settings_validation()
    {
        assert!(matches!(CrosswordGeneratorSettings::from_json(r#"{ "grid_size": 0 }"#), Err(CrosswordError::InvalidSettings(_))));
        assert!(matches!(CrosswordGeneratorSettings::from_json(r#"{ "grid_size": 500 }"#), Err(CrosswordError::InvalidSettings(_))));
        assert!(matches!(CrosswordGeneratorSettings::from_json(r#"{ "max_generation_attempts": 0 }"#), Err(CrosswordError::InvalidSettings(_))));
        assert!(matches!(CrosswordGeneratorSettings::from_json("not json"), Err(CrosswordError::Settings(_))));
        assert!(CrosswordGeneratorSettings::from_json("{}").is_ok());
    }

    #[test]
    fn test_select_words()
    {
        let settings = CrosswordGeneratorSettings { grid_size: 5, word_count: 2, ..Default::default() };
        let pool = vec![
            WordEntry::new("owl", "hoots at night"),
            WordEntry::new("hippopotamus", "river horse"),
            WordEntry::new("", "nothing"),
            WordEntry::new("bee", "makes honey"),
            WordEntry::new("fox", "clever canine"),
        ];

        let mut rng = StdRng::seed_from_u64(1);
        let selected = settings.select_words(&pool, &mut rng);

        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|w| w.len() <= 5 && !w.is_empty()));
        assert_ne!(selected[0], selected[1]);

        let all = CrosswordGeneratorSettings { word_count: 10, ..settings }.select_words(&pool, &mut rng);
        assert_eq!(all.len(), 3);
    }
}
