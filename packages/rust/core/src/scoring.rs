//! Diffusion scoring.
//!
//! Accepted terms start at 1.0, everything else at 0.0. One update pass adds
//! to each accepted or candidate term the summed scores of its friends that
//! are themselves accepted or candidates. Scores accumulate across passes,
//! so every extra [`Thesaurus::update_scores`] call pushes influence one more
//! hop through the graph. They are unbounded and not normalized.

use indexmap::IndexMap;
use tracing::debug;

use thesaurus_crawler::FriendSource;
use thesaurus_shared::Term;

use crate::thesaurus::Thesaurus;

impl<S: FriendSource> Thesaurus<S> {
    /// Reset scores: accepted to 1.0, rejected and candidates to 0.0.
    pub fn init_scores(&mut self) {
        for term in &self.accepted {
            self.scores.insert(term.clone(), 1.0);
        }
        for term in self.rejected.iter().chain(&self.candidates) {
            self.scores.insert(term.clone(), 0.0);
        }
    }

    /// Summed current score of `term`'s accepted or candidate friends.
    pub fn compute_score(&self, term: &Term) -> f64 {
        self.diffused(term, &self.scores)
    }

    fn diffused(&self, term: &Term, table: &IndexMap<Term, f64>) -> f64 {
        let Some(friends) = self.friends.get(term) else {
            return 0.0;
        };
        friends
            .iter()
            .filter(|f| self.accepted.contains(*f) || self.candidates.contains(*f))
            .map(|f| table.get(f).copied().unwrap_or(0.0))
            .sum()
    }

    /// One diffusion pass over accepted and candidate terms, computed from a
    /// single snapshot of the table and added onto the running scores.
    pub fn update_scores(&mut self) {
        let table = self.scores.clone();
        let deltas: Vec<(Term, f64)> = self
            .accepted
            .iter()
            .chain(&self.candidates)
            .map(|term| (term.clone(), self.diffused(term, &table)))
            .collect();

        for (term, delta) in deltas {
            *self.scores.entry(term).or_insert(0.0) += delta;
        }
    }

    /// Highest-scoring candidate after a fresh init + one update pass.
    /// Ties go to the earliest-discovered candidate.
    pub fn best_candidate(&mut self) -> Option<Term> {
        self.init_scores();
        self.update_scores();

        let mut best: Option<(&Term, f64)> = None;
        for term in &self.candidates {
            let score = self.score(term);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((term, score));
            }
        }

        let (term, score) = best?;
        debug!(%term, score, "best candidate");
        Some(term.clone())
    }
}
