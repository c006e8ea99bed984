use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use quiz_core::model::{Difficulty, Question};

//
// ─── RANDOM SOURCE ─────────────────────────────────────────────────────────────
//

/// Injectable source of uniform picks, so sessions can be replayed in tests.
pub trait RandomSource: Send {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// `StdRng`-backed source, seeded from the OS or from a fixed value.
#[derive(Debug, Clone)]
pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Each scripted value is reduced modulo the eligible length, so a script of
/// zeros always takes the first eligible question.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Always picks the first eligible question.
    #[must_use]
    pub fn first() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % len
    }
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// A question taken out of the remaining pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub question: Question,
    /// Difficulty the predictor asked for.
    pub requested: Difficulty,
    /// True when no question of `requested` difficulty remained.
    pub fallback: bool,
}

/// Removes and returns one question of `difficulty` from `pool`.
///
/// Falls back to the entire pool when no question of that difficulty is left.
/// Returns `None` only when the pool is empty.
pub fn select_next(
    pool: &mut Vec<Question>,
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) -> Option<Selection> {
    if pool.is_empty() {
        return None;
    }

    let matching: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, q)| q.difficulty() == difficulty)
        .map(|(idx, _)| idx)
        .collect();

    let fallback = matching.is_empty();
    let pool_index = if fallback {
        debug!(%difficulty, remaining = pool.len(), "no questions at difficulty; using whole pool");
        rng.pick(pool.len())
    } else {
        matching[rng.pick(matching.len())]
    };

    let question = pool.remove(pool_index);
    debug!(id = %question.id(), %difficulty, fallback, "selected question");

    Some(Selection {
        question,
        requested: difficulty,
        fallback,
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Choice, QuestionId};

    fn build_question(id: u64, difficulty: Difficulty) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            ["a".into(), "b".into(), "c".into(), "d".into()],
            Choice::new(1).unwrap(),
            difficulty,
        )
        .unwrap()
    }

    #[test]
    fn picks_only_requested_difficulty() {
        let mut pool = vec![
            build_question(1, Difficulty::Easy),
            build_question(2, Difficulty::Hard),
            build_question(3, Difficulty::Easy),
            build_question(4, Difficulty::Hard),
        ];
        let mut rng = ScriptedRandom::new(vec![1]);

        let selection = select_next(&mut pool, Difficulty::Hard, &mut rng).unwrap();

        assert_eq!(selection.question.id(), QuestionId::new(4));
        assert!(!selection.fallback);
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|q| q.id() != QuestionId::new(4)));
    }

    #[test]
    fn falls_back_to_whole_pool() {
        let mut pool = vec![
            build_question(1, Difficulty::Easy),
            build_question(2, Difficulty::Medium),
        ];
        let mut rng = ScriptedRandom::new(vec![1]);

        let selection = select_next(&mut pool, Difficulty::Hard, &mut rng).unwrap();

        assert!(selection.fallback);
        assert_eq!(selection.requested, Difficulty::Hard);
        assert_eq!(selection.question.id(), QuestionId::new(2));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn empty_pool_yields_none() {
        let mut pool = Vec::new();
        let mut rng = ScriptedRandom::first();
        assert!(select_next(&mut pool, Difficulty::Easy, &mut rng).is_none());
    }

    #[test]
    fn draining_pool_never_repeats() {
        let mut pool: Vec<_> = (1..=10)
            .map(|id| build_question(id, Difficulty::Medium))
            .collect();
        let mut rng = ThreadRandom::seeded(7);
        let mut seen = std::collections::HashSet::new();

        while let Some(selection) = select_next(&mut pool, Difficulty::Medium, &mut rng) {
            assert!(seen.insert(selection.question.id()));
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn scripted_random_cycles_and_wraps() {
        let mut rng = ScriptedRandom::new(vec![5, 1]);
        assert_eq!(rng.pick(3), 2);
        assert_eq!(rng.pick(3), 1);
        assert_eq!(rng.pick(4), 1);
    }
}
