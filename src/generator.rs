use std::{cmp::Reverse, future::Future, pin::Pin, sync::Arc, task::{Context, Poll}};

use itertools::Itertools;
use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc::{self, Receiver, Sender}, task};
use tokio_stream::Stream;

use crate::{crossword::{CrosswordError, GeneratedCrossword}, grid::Grid, placed_word::{Placement, PlacedWord}, settings::CrosswordGeneratorSettings, traits::CrosswordRng, word::{Direction, Position, WordEntry}};

/// Represents a crossword generator for one word list and one grid size.
///
/// Longer words are tried first. The first (longest) word is centered, every following word has to cross
/// an already placed one, and the search backtracks when a word can't be placed anywhere.
///
/// # Example
/// ```
/// use wordgrid::generator::CrosswordGenerator;
/// use wordgrid::word::WordEntry;
///
/// let generator = CrosswordGenerator::new(vec![WordEntry::new("cat", "pet"), WordEntry::new("car", "vehicle")], 10);
/// let crossword = generator.generate().unwrap();
///
/// assert_eq!(crossword.placed_words.len(), 2);
/// assert_eq!(crossword.crossword_data.across.len() + crossword.crossword_data.down.len(), 2);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct CrosswordGenerator
{
    words: Vec<WordEntry>,
    grid_size: usize,
}

impl CrosswordGenerator
{
    /// Creates a generator, entries without any character are ignored
    pub fn new(words: impl IntoIterator<Item = WordEntry>, grid_size: usize) -> CrosswordGenerator
    {
        let mut words: Vec<WordEntry> = words.into_iter().filter(|w| !w.is_empty()).collect();
        words.sort_by_key(|w| Reverse(w.len()));

        CrosswordGenerator { words, grid_size }
    }

    /// The words in the order they are placed
    pub fn words(&self) -> &[WordEntry]
    {
        &self.words
    }

    pub fn grid_size(&self) -> usize
    {
        self.grid_size
    }

    /// Generates a crossword using the thread rng for tie-breaks, see [CrosswordGenerator::generate_with_rng]
    pub fn generate(&self) -> Option<GeneratedCrossword>
    {
        self.generate_with_rng(&mut rand::thread_rng())
    }

    /// Tries to place every word.
    ///
    /// Returns None if no complete layout exists with this search, nothing is ever partially placed.
    /// An empty word list gives a degenerate result with no placed words, which has to be treated as a failure as well.
    ///
    /// The rng only decides the order in which equally good placements are tried, so the same seed always gives the same crossword.
    pub fn generate_with_rng<R: CrosswordRng>(&self, rng: &mut R) -> Option<GeneratedCrossword>
    {
        let Some(seed_word) = self.words.first() else
        {
            return Some(GeneratedCrossword::from_layout(&Grid::new(self.grid_size), vec![]));
        };

        let answers: Vec<Vec<char>> = self.words.iter().map(|w| w.answer_chars()).collect();

        let mut seeds = self.seed_placements(&answers[0]);
        seeds.sort_by_cached_key(|_| rng.gen::<u32>());

        for seed in seeds
        {
            let mut state = SearchState::new(self.grid_size);
            state.place(seed_word, &answers[0], seed);

            if state.try_place_word(&self.words, &answers, 1, rng)
            {
                return Some(state.into_generated());
            }
        }

        None
    }

    /// The centered horizontal and vertical placements of the seed word that fit on the grid
    fn seed_placements(&self, answer: &[char]) -> Vec<Placement>
    {
        let len = answer.len();
        if len > self.grid_size { return vec![]; }

        let middle = (self.grid_size / 2) as i16;
        let start = (self.grid_size / 2).saturating_sub(len / 2).min(self.grid_size - len) as i16;
        let empty = Grid::new(self.grid_size);

        [
            Placement::new(Position::new(middle, start), Direction::Across),
            Placement::new(Position::new(start, middle), Direction::Down),
        ]
        .into_iter()
        .filter(|p| empty.can_place_word(answer, p.position, p.direction))
        .collect()
    }
}

#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug)]
enum CandidateKind
{
    Intersecting,
    Empty,
}

/// The mutable state of one search: grid, placed words and the next clue number, always changed together.
#[derive(Clone, Debug)]
struct SearchState
{
    grid: Grid,
    placed_words: Vec<PlacedWord>,
    next_clue_number: u32,
}

impl SearchState
{
    fn new(grid_size: usize) -> SearchState
    {
        SearchState { grid: Grid::new(grid_size), placed_words: vec![], next_clue_number: 1 }
    }

    fn place(&mut self, entry: &WordEntry, answer: &[char], placement: Placement)
    {
        let word = PlacedWord::new(
            entry.word.clone(),
            entry.hint.clone(),
            answer.iter().collect(),
            placement.position.row as usize,
            placement.position.col as usize,
            placement.direction,
            self.next_clue_number,
        );

        self.grid.place_word(&word);
        self.placed_words.push(word);
        self.next_clue_number += 1;
    }

    fn remove_last(&mut self)
    {
        if let Some(word) = self.placed_words.pop()
        {
            self.grid.remove_word(&word);
            self.next_clue_number -= 1;
        }
    }

    /// Valid placements for a word, crossing ones first, shuffled within each kind
    fn candidates<R: CrosswordRng>(&self, answer: &[char], rng: &mut R) -> Vec<Placement>
    {
        let mut candidates: Vec<(CandidateKind, Placement)> = self.placed_words.iter()
            .flat_map(|w| w.crossing_placements(answer))
            .unique()
            .filter(|p| self.grid.can_place_word(answer, p.position, p.direction))
            .map(|p| (CandidateKind::Intersecting, p))
            .collect();

        if self.placed_words.len() < 2 || candidates.is_empty()
        {
            let size = self.grid.size() as i16;
            let empty = (0..size).cartesian_product(0..size)
                .cartesian_product([Direction::Across, Direction::Down])
                .map(|((row, col), direction)| Placement::new(Position::new(row, col), direction))
                .filter(|p| !candidates.iter().any(|(_, c)| c == p))
                .filter(|p| self.grid.can_place_word(answer, p.position, p.direction))
                .collect_vec();

            candidates.extend(empty.into_iter().map(|p| (CandidateKind::Empty, p)));
        }

        candidates.sort_by_cached_key(|(kind, _)| (*kind, rng.gen::<u32>()));
        candidates.into_iter().map(|(_, p)| p).collect()
    }

    fn try_place_word<R: CrosswordRng>(&mut self, words: &[WordEntry], answers: &[Vec<char>], index: usize, rng: &mut R) -> bool
    {
        if index == words.len() { return true; }

        for placement in self.candidates(&answers[index], rng)
        {
            self.place(&words[index], &answers[index], placement);

            if self.try_place_word(words, answers, index + 1, rng) { return true; }

            self.remove_last();
        }

        false
    }

    fn into_generated(self) -> GeneratedCrossword
    {
        GeneratedCrossword::from_layout(&self.grid, self.placed_words)
    }
}

/// Generates a crossword from a word pool, retrying with a fresh word selection and a fresh generator.
///
/// Gives up after [max_generation_attempts](CrosswordGeneratorSettings::max_generation_attempts) attempts.
/// Results without placed words count as failed attempts.
///
/// # Errors
///
/// [CrosswordError::InvalidSettings] - the settings don't [validate](CrosswordGeneratorSettings::validate)
/// [CrosswordError::EmptyWordPool] - no word of the pool fits on the grid
/// [CrosswordError::GenerationFailed] - every attempt failed
pub fn generate_crossword<R: CrosswordRng>(pool: &[WordEntry], settings: &CrosswordGeneratorSettings, rng: &mut R) -> Result<GeneratedCrossword, CrosswordError>
{
    settings.validate()?;

    for attempt in 1..=settings.max_generation_attempts
    {
        let words = settings.select_words(pool, rng);
        if words.is_empty() { return Err(CrosswordError::EmptyWordPool); }

        match CrosswordGenerator::new(words, settings.grid_size).generate_with_rng(rng)
        {
            Some(crossword) if !crossword.is_empty() =>
            {
                debug!("crossword with {} words generated on attempt {attempt}", crossword.placed_words.len());
                return Ok(crossword);
            }
            _ => debug!("crossword generation attempt {attempt}/{} failed", settings.max_generation_attempts),
        }
    }

    warn!("no crossword could be generated in {} attempts", settings.max_generation_attempts);
    Err(CrosswordError::GenerationFailed { attempts: settings.max_generation_attempts })
}

/// Creates a [stream](CrosswordStream) of crosswords generated from the pool.
///
/// Must be called from within a tokio runtime. Every crossword is generated on the blocking pool, so long searches
/// don't hold up the async workers.
///
/// # Example
/// ```
/// use wordgrid::generator::{crossword_stream, CrosswordGenerationRequest};
/// use wordgrid::settings::CrosswordGeneratorSettings;
/// use wordgrid::word::WordEntry;
///
/// use tokio_stream::StreamExt;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main()
/// {
///     let pool = vec![WordEntry::new("cat", "pet"), WordEntry::new("car", "vehicle"), WordEntry::new("art", "painting")];
///     let settings = CrosswordGeneratorSettings { grid_size: 10, word_count: 2, seed: Some(3), ..Default::default() };
///
///     let str = crossword_stream(pool, settings);
///     str.request_crossword(CrosswordGenerationRequest::Count(2)).await.unwrap();
///     str.request_crossword(CrosswordGenerationRequest::Stop).await.unwrap();
///
///     let crosswords: Vec<_> = str.collect().await;
///     assert_eq!(crosswords.len(), 2);
///     assert!(crosswords.iter().all(|cw| cw.is_ok()));
/// }
/// ```
pub fn crossword_stream(pool: Vec<WordEntry>, settings: CrosswordGeneratorSettings) -> CrosswordStream
{
    let pool = Arc::new(pool);

    let gen_func = move |mut rr: Receiver<CrosswordGenerationRequest>, cs: Sender<Result<GeneratedCrossword, CrosswordError>>| async move
    {
        let mut rng = match settings.seed
        {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        while let Some(CrosswordGenerationRequest::Count(count)) = rr.recv().await
        {
            debug!("crossword stream received a request for {count} crosswords");

            for _ in 0..count
            {
                let pool = Arc::clone(&pool);
                let settings = settings.clone();
                let mut worker_rng = StdRng::seed_from_u64(rng.gen());

                let result = task::spawn_blocking(move || generate_crossword(&pool, &settings, &mut worker_rng))
                    .await
                    .unwrap_or_else(|e| Err(CrosswordError::Worker(e.to_string())));

                if cs.send(result).await.is_err() { return; }
            }
        }

        debug!("crossword stream stopped");
    };

    CrosswordStream::new(gen_func)
}

/// Represents a request to [CrosswordStream] for generating crosswords.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub enum CrosswordGenerationRequest
{
    /// Request to stop the crossword generation.
    #[default]
    Stop,
    /// Request for some count of crosswords to generate.
    Count(u32),
}

pub struct CrosswordStream
{
    request_sender: Sender<CrosswordGenerationRequest>,
    crossword_receiver: Receiver<Result<GeneratedCrossword, CrosswordError>>,
}

impl CrosswordStream
{
    pub fn new<F, Fut>(gen_func: F) -> CrosswordStream
    where
        F: FnOnce(Receiver<CrosswordGenerationRequest>, Sender<Result<GeneratedCrossword, CrosswordError>>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static
    {
        let (rs, rr) = mpsc::channel(100);
        let (cs, cr) = mpsc::channel(100);

        task::spawn(gen_func(rr, cs));

        CrosswordStream { request_sender: rs, crossword_receiver: cr }
    }

    /// Requests crosswords to generate.
    ///
    /// After the requested crosswords are generated the stream waits for more requests, so to end the stream
    /// a [CrosswordGenerationRequest::Stop] has to be requested (or the stream dropped).
    pub async fn request_crossword(&self, req: CrosswordGenerationRequest) -> Result<(), CrosswordError>
    {
        self.request_sender.send(req).await.map_err(|_| CrosswordError::Worker("the crossword stream has stopped".to_owned()))
    }
}

impl Stream for CrosswordStream
{
    type Item = Result<GeneratedCrossword, CrosswordError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>>
    {
        self.crossword_receiver.poll_recv(cx)
    }
}
