use trait_set::trait_set;

trait_set!
{
    /// Trait for any random source that can drive the tie-breaks of a [generator](crate::generator::CrosswordGenerator).
    ///
    /// Passing a seeded rng (or a constant one like [rand::rngs::mock::StepRng]) makes generation reproducible.
    pub trait CrosswordRng = rand::Rng;
}
