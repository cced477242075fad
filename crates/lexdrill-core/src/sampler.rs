//! Randomized, bounded-size question sampling.
//!
//! The pool is filtered first, then shuffled with a uniform Fisher–Yates
//! shuffle and truncated. Short pools are returned whole; nothing is padded.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{CategoryConfig, EmptyCategoryPolicy, SamplingConfig};
use crate::index::BankIndex;
use crate::model::{RawQuestion, SelectionMode};

/// Draws question sets from an index according to a [`SamplingConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    index: &'a BankIndex,
    config: SamplingConfig,
}

impl<'a> Sampler<'a> {
    pub fn new(index: &'a BankIndex, config: SamplingConfig) -> Self {
        Self { index, config }
    }

    /// Sample for subject practice: questions whose code equals `subject_code`.
    pub fn subject<R: Rng + ?Sized>(
        &self,
        subject_code: &str,
        rng: &mut R,
    ) -> Vec<Arc<RawQuestion>> {
        let code = subject_code.trim();
        let pool = self
            .index
            .questions()
            .iter()
            .filter(|q| q.subject_code == code)
            .cloned()
            .collect();
        take_random(pool, self.config.subject_size, rng)
    }

    /// Sample for a mock exam over a category's subject codes.
    ///
    /// A missing or empty category yields nothing unless the configuration
    /// opts into [`EmptyCategoryPolicy::FullBank`].
    pub fn mock<R: Rng + ?Sized>(
        &self,
        category: Option<&CategoryConfig>,
        rng: &mut R,
    ) -> Vec<Arc<RawQuestion>> {
        let questions = self.index.questions();
        let pool: Vec<Arc<RawQuestion>> = match category.filter(|c| !c.is_empty()) {
            Some(cat) => questions
                .iter()
                .filter(|q| cat.contains(&q.subject_code))
                .cloned()
                .collect(),
            None => match self.config.empty_category {
                EmptyCategoryPolicy::Strict => {
                    tracing::debug!("mock exam requested for empty or unknown category");
                    Vec::new()
                }
                EmptyCategoryPolicy::FullBank => questions.to_vec(),
            },
        };
        take_random(pool, self.config.mock_size, rng)
    }

    /// Dispatch on `mode`; `category` is only consulted for mock exams.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        mode: SelectionMode,
        target: &str,
        category: Option<&CategoryConfig>,
        rng: &mut R,
    ) -> Vec<Arc<RawQuestion>> {
        match mode {
            SelectionMode::Subject => self.subject(target, rng),
            SelectionMode::Mock => self.mock(category, rng),
        }
    }
}

/// Shuffle `pool` uniformly and keep at most `size` items.
pub fn take_random<T, R: Rng + ?Sized>(mut pool: Vec<T>, size: usize, rng: &mut R) -> Vec<T> {
    pool.shuffle(rng);
    pool.truncate(size);
    pool
}
