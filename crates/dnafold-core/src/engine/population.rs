use super::candidate::Candidate;
use super::config::{DomainError, SelectionStrategy, keep_count};
use super::error::EngineError;
use super::utils::sampling::roulette_sample;
use crate::core::models::nucleotide::{Dinucleotide, Sequence};
use crate::core::models::rotation_table::RotationTable;
use rand::Rng;
use rand::seq::{SliceRandom, index};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Ordered set of candidates plus the best candidate ever selected from it.
#[derive(Debug, Clone, Default)]
pub struct Population {
    candidates: Vec<Candidate>,
    best: Option<Candidate>,
}

impl Population {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            best: None,
        }
    }

    /// First generation: `size` copies of `template`, each perturbed once on every
    /// dinucleotide.
    pub fn seeded(size: usize, template: &RotationTable, rng: &mut impl Rng) -> Self {
        let candidates = (0..size)
            .map(|_| {
                let mut candidate = Candidate::new(template.clone());
                for dinucleotide in Dinucleotide::ALL {
                    candidate.apply_noise(dinucleotide, rng);
                }
                candidate
            })
            .collect();
        Self::new(candidates)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Best candidate seen by any selection so far. It is a private copy and is
    /// unaffected by later crossover or mutation.
    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    pub fn best_score(&self) -> Option<f64> {
        self.best.as_ref().and_then(Candidate::score)
    }

    pub fn into_best(self) -> Option<Candidate> {
        self.best
    }

    /// Recomputes every trajectory against `sequence` and stores the new scores.
    pub fn refresh_scores(&mut self, sequence: &Sequence) {
        #[cfg(not(feature = "parallel"))]
        let iterator = self.candidates.iter_mut();

        #[cfg(feature = "parallel")]
        let iterator = self.candidates.par_iter_mut();

        iterator.for_each(|candidate| {
            candidate.evaluate(sequence);
        });
    }

    fn scores(&self) -> Result<Vec<f64>, EngineError> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, c)| c.score().ok_or(EngineError::UnscoredCandidate { index }))
            .collect()
    }

    /// Replaces the population with `round(rate × len)` survivors chosen by
    /// `strategy`, then promotes the best survivor if it beats the running best.
    /// Returns the new size.
    pub fn select(
        &mut self,
        strategy: SelectionStrategy,
        rate: f64,
        rng: &mut impl Rng,
    ) -> Result<usize, EngineError> {
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(DomainError::OutOfRange {
                name: "selection_rate",
                value: rate,
                expected: "(0, 1]",
            }
            .into());
        }
        let scores = self.scores()?;
        let keep = keep_count(rate, self.len());

        let picked = if keep == 0 {
            Vec::new()
        } else {
            match strategy {
                SelectionStrategy::Elitism => elitism(&scores, keep),
                SelectionStrategy::Roulette => roulette_sample(&scores, keep, rng)?,
                SelectionStrategy::Tournament => tournament(&scores, keep, rng),
            }
        };
        trace!(strategy = %strategy, keep, "Selected survivors: {:?}", picked);

        self.candidates = picked
            .iter()
            .map(|&i| self.candidates[i].clone())
            .collect();
        self.promote_best(&picked, &scores);
        Ok(self.len())
    }

    fn promote_best(&mut self, picked: &[usize], scores: &[f64]) {
        let Some(position) = (0..picked.len())
            .min_by(|&a, &b| scores[picked[a]].total_cmp(&scores[picked[b]]))
        else {
            return;
        };
        let score = scores[picked[position]];
        let improves = match self.best_score() {
            Some(best) => score < best,
            None => true,
        };
        if improves {
            self.best = Some(self.candidates[position].clone());
        }
    }

    /// n-point crossover over shuffled, disjoint parent pairs. Children are
    /// appended after their parents and an odd total drops the last candidate.
    /// Returns the new size.
    pub fn crossover(&mut self, points: usize, rng: &mut impl Rng) -> usize {
        let size = self.len();
        if size < 2 {
            return size;
        }
        let points = points.clamp(1, size).min(Dinucleotide::COUNT);

        let mut order: Vec<usize> = (0..size).collect();
        order.shuffle(rng);

        let mut children = Vec::with_capacity(2 * (size / 2));
        for pair in order.chunks_exact(2) {
            let parent1 = &self.candidates[pair[0]];
            let parent2 = &self.candidates[pair[1]];

            let mut breakpoints = [false; Dinucleotide::COUNT];
            for i in index::sample(rng, Dinucleotide::COUNT, points) {
                breakpoints[i] = true;
            }

            let mut child1 = parent1.offspring();
            let mut child2 = parent2.offspring();
            let mut swapped = false;
            for dinucleotide in Dinucleotide::ALL {
                if breakpoints[dinucleotide.index()] {
                    swapped = !swapped;
                }
                let (first, second) = if swapped {
                    (&mut child2, &mut child1)
                } else {
                    (&mut child1, &mut child2)
                };
                first.inherit(parent1, dinucleotide);
                second.inherit(parent2, dinucleotide);
            }
            children.push(child1);
            children.push(child2);
        }

        self.candidates.extend(children);
        if self.candidates.len() % 2 != 0 {
            self.candidates.pop();
        }
        self.len()
    }

    /// With probability `threshold`, perturbs one random dinucleotide on each of
    /// `round(rate × len)` randomly chosen candidates (repeats allowed). Returns
    /// whether the mutation fired.
    pub fn mutate(&mut self, threshold: f64, rate: f64, rng: &mut impl Rng) -> bool {
        let draw: f64 = rng.r#gen();
        if draw >= threshold || self.is_empty() {
            return false;
        }
        let count = keep_count(rate, self.len());
        for _ in 0..count {
            let index = rng.gen_range(0..self.len());
            let dinucleotide = Dinucleotide::ALL[rng.gen_range(0..Dinucleotide::COUNT)];
            self.candidates[index].apply_noise(dinucleotide, rng);
        }
        true
    }
}

fn elitism(scores: &[f64], keep: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    order.truncate(keep);
    order
}

fn tournament(scores: &[f64], keep: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..keep)
        .map(|_| {
            if scores.len() < 2 {
                return 0;
            }
            let pair = index::sample(rng, scores.len(), 2);
            let (a, b) = (pair.index(0), pair.index(1));
            if scores[b] < scores[a] { b } else { a }
        })
        .collect()
}
