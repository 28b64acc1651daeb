//! Parent selection.
//!
//! Each reproduction step draws two distinct parents from the current
//! population. The strategy trades diversity against selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::types::Candidate;

/// Selection strategy for choosing parent pairs.
///
/// All strategies assume **maximization** (higher score = better).
///
/// # Examples
///
/// ```
/// use u_timetable::ga::Selection;
///
/// // Uniform without replacement (the default)
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Random);
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Two distinct candidates uniformly at random.
    ///
    /// No selection pressure; improvement comes from elitism alone. Keeps
    /// the population diverse.
    #[default]
    Random,

    /// The two highest-scoring candidates.
    ///
    /// Maximum pressure. Every child of a generation descends from the
    /// same pair, so diversity collapses quickly.
    Fittest,

    /// Two tournaments of `k` random draws each; the second excludes the
    /// first winner.
    ///
    /// - k=1: same as `Random`
    /// - k=2-3: light to moderate pressure
    Tournament(usize),
}

impl Selection {
    /// Selects two distinct parent indices.
    ///
    /// # Panics
    /// Panics if `population` has fewer than two candidates.
    pub fn select_pair<R: Rng>(&self, population: &[Candidate], rng: &mut R) -> (usize, usize) {
        assert!(
            population.len() >= 2,
            "selection needs at least two candidates"
        );

        match self {
            Selection::Random => {
                let picked = rand::seq::index::sample(rng, population.len(), 2);
                (picked.index(0), picked.index(1))
            }
            Selection::Fittest => fittest_pair(population),
            Selection::Tournament(k) => {
                let first = tournament(population, *k, None, rng);
                let second = tournament(population, *k, Some(first), rng);
                (first, second)
            }
        }
    }
}

/// Indices of the two best candidates; ties go to the lower index.
fn fittest_pair(population: &[Candidate]) -> (usize, usize) {
    let (mut best, mut second) = if population[1].score > population[0].score {
        (1, 0)
    } else {
        (0, 1)
    };
    for (i, c) in population.iter().enumerate().skip(2) {
        if c.score > population[best].score {
            second = best;
            best = i;
        } else if c.score > population[second].score {
            second = i;
        }
    }
    (best, second)
}

/// Tournament of `k` draws with replacement, optionally excluding one index.
fn tournament<R: Rng>(
    population: &[Candidate],
    k: usize,
    exclude: Option<usize>,
    rng: &mut R,
) -> usize {
    let k = k.max(1);
    let pool = population.len() - usize::from(exclude.is_some());
    let mut draw = || {
        let idx = rng.random_range(0..pool);
        match exclude {
            Some(skip) if idx >= skip => idx + 1,
            _ => idx,
        }
    };

    let mut best = draw();
    for _ in 1..k {
        let idx = draw();
        if population[idx].score > population[best].score {
            best = idx;
        }
    }
    best
}
