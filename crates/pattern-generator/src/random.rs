//! Sources of randomness for generator choice points.
//!
//! Every node with a choice point (character classes, alternations and
//! variable-length repetitions) owns its own [`RandomSource`]. The compiler
//! asks a [`SourceFactory`] for a fresh source each time it builds such a
//! node, so the factory decides how the sources relate to each other:
//!
//! - [`EntropySources`] - every source draws from the thread-local RNG
//! - [`SeededSources`] - every source is a `StdRng` seeded from one parent,
//!   so the same seed and template always produce the same text
//! - [`CountingSources`] - every source counts 0, 1, 2, ... (tests)

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;

/// Produces the next integer of a source-defined sequence.
///
/// No range is promised; callers reduce draws with modulo arithmetic.
pub trait RandomSource: fmt::Debug {
    fn next_draw(&mut self) -> u32;
}

/// Hands out one source per choice node during compilation.
pub trait SourceFactory {
    fn source(&mut self) -> Box<dyn RandomSource>;
}

impl<F> SourceFactory for F
where
    F: FnMut() -> Box<dyn RandomSource>,
{
    fn source(&mut self) -> Box<dyn RandomSource> {
        self()
    }
}

// ============================================================================
// Entropy
// ============================================================================

/// Draws from the thread-local, OS-seeded RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl RandomSource for EntropySource {
    fn next_draw(&mut self) -> u32 {
        rand::thread_rng().next_u32()
    }
}

/// Factory for [`EntropySource`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySources;

impl SourceFactory for EntropySources {
    fn source(&mut self) -> Box<dyn RandomSource> {
        Box::new(EntropySource)
    }
}

// ============================================================================
// Seeded
// ============================================================================

/// A deterministic source backed by its own `StdRng`.
#[derive(Debug)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_draw(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

/// Factory whose sources are seeded, in creation order, from one parent RNG.
///
/// Two factories built from the same seed hand out identical sequences of
/// sources, so compiling the same template twice yields generators that
/// produce the same text.
#[derive(Debug)]
pub struct SeededSources {
    parent: StdRng,
}

impl SeededSources {
    pub fn new(seed: u64) -> Self {
        Self {
            parent: StdRng::seed_from_u64(seed),
        }
    }
}

impl SourceFactory for SeededSources {
    fn source(&mut self) -> Box<dyn RandomSource> {
        Box::new(SeededSource::new(self.parent.next_u64()))
    }
}

// ============================================================================
// Counting
// ============================================================================

/// Yields 0, 1, 2, ... wrapping at `u32::MAX`.
#[derive(Debug, Default, Clone)]
pub struct Counter {
    next: u32,
}

impl Counter {
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }
}

impl RandomSource for Counter {
    fn next_draw(&mut self) -> u32 {
        let draw = self.next;
        self.next = self.next.wrapping_add(1);
        draw
    }
}

/// Factory for fresh [`Counter`]s, each starting at zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSources;

impl SourceFactory for CountingSources {
    fn source(&mut self) -> Box<dyn RandomSource> {
        Box::new(Counter::default())
    }
}
