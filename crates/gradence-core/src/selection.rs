//! Random selection of questions from an exam.
//!
//! The selection works on a borrowed snapshot of the questions and never reorders it. The
//! optional type filter keeps the original order, only the shuffle step permutes the copy.

use gradence_model::question::Question;
use rand::rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

/// Anything that carries a question type tag.
pub trait Typed {
    fn question_type(&self) -> &str;
}

impl Typed for Question {
    fn question_type(&self) -> &str {
        &self.r#type
    }
}

/// Source of the permutation applied when more questions are available than requested.
pub trait ShuffleSource {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Uniform shuffle backed by the thread local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadShuffle;

impl ShuffleSource for ThreadShuffle {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut rng());
    }
}

/// Reproducible shuffle: the same seed applied to the same sequence always yields the same
/// permutation. Backed by ChaCha20, whose output stream is fixed across crate releases, so a
/// stored seed keeps producing the same exam variant.
#[derive(Debug, Clone)]
pub struct SeededShuffle(ChaCha20Rng);

impl SeededShuffle {
    #[must_use]
    pub fn new(seed: i64) -> Self {
        Self(ChaCha20Rng::seed_from_u64(seed.cast_unsigned()))
    }
}

impl ShuffleSource for SeededShuffle {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}

/// Selects up to `count` questions.
///
/// A present, non-blank `question_type` keeps only questions whose type matches it ignoring
/// case. The filter value is compared as given, surrounding whitespace is significant. If no
/// more than `count` questions remain they are returned in their original order, otherwise the
/// remaining questions are shuffled with `source` and the first `count` are returned. A
/// `count` of zero or less selects nothing.
pub fn select_questions<T, S>(questions: &[T], count: i64, question_type: Option<&str>, source: &mut S) -> Vec<T>
where
    T: Typed + Clone,
    S: ShuffleSource,
{
    let Ok(count) = usize::try_from(count) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let mut selected: Vec<T> = match question_type.filter(|t| !t.trim().is_empty()) {
        Some(question_type) => questions
            .iter()
            .filter(|question| type_matches(question.question_type(), question_type))
            .cloned()
            .collect(),
        None => questions.to_vec(),
    };

    if selected.len() <= count {
        return selected;
    }

    source.shuffle(&mut selected);
    selected.truncate(count);
    selected
}

/// [`select_questions`] with a [`SeededShuffle`] if a seed is given and a [`ThreadShuffle`]
/// otherwise.
pub fn select_random_questions<T>(questions: &[T], count: i64, question_type: Option<&str>, seed: Option<i64>) -> Vec<T>
where
    T: Typed + Clone,
{
    match seed {
        Some(seed) => select_questions(questions, count, question_type, &mut SeededShuffle::new(seed)),
        None => select_questions(questions, count, question_type, &mut ThreadShuffle),
    }
}

fn type_matches(question_type: &str, filter: &str) -> bool {
    question_type == filter || question_type.to_lowercase() == filter.to_lowercase()
}
