use rand::Rng;
use std::collections::HashSet;
use vocab_types::ExerciseError;

use crate::sampler::sample_without_replacement;

/// Multiple-choice options with the position of the right answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Unique candidate values other than `correct`, in first-seen order
pub fn distinct_distractors<'a, I>(correct: &str, candidate_pool: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    candidate_pool
        .into_iter()
        .filter(|candidate| *candidate != correct)
        .filter(|candidate| seen.insert(*candidate))
        .map(str::to_string)
        .collect()
}

/// Build `option_count` unique options: `option_count - 1` distractors drawn
/// from `candidate_pool` plus `correct` at a uniformly random position.
pub fn build_options<'a, I, R>(
    correct: &str,
    candidate_pool: I,
    option_count: usize,
    rng: &mut R,
) -> Result<OptionSet, ExerciseError>
where
    I: IntoIterator<Item = &'a str>,
    R: Rng + ?Sized,
{
    let needed = option_count.saturating_sub(1);
    let distractors = distinct_distractors(correct, candidate_pool);

    if distractors.len() < needed {
        return Err(ExerciseError::InsufficientDistractors {
            required: needed,
            available: distractors.len(),
        });
    }

    let mut options = sample_without_replacement(&distractors, needed, rng)?;
    let correct_index = rng.random_range(0..=needed);
    options.insert(correct_index, correct.to_string());

    Ok(OptionSet {
        options,
        correct_index,
    })
}
