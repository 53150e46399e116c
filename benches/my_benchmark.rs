use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use rand::{rngs::StdRng, SeedableRng};
use wordgrid::{generator::CrosswordGenerator, word::WordEntry};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossword");

    let words: Vec<WordEntry> = vec!["elephant", "giraffe", "tiger", "panda", "eagle", "rabbit"]
        .into_iter()
        .map(|w| WordEntry::new(w, ""))
        .collect();

    for grid_size in [15, 20]
    {
        group.bench_function(BenchmarkId::new("Backtracking", grid_size),
            |b| b.iter(||
            {
                let generator = CrosswordGenerator::new(words.clone(), grid_size);
                generator.generate_with_rng(&mut StdRng::seed_from_u64(0))
            }));
    }

    group.finish();

}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
