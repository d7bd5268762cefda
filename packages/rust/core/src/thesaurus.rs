//! Thesaurus state machine.
//!
//! Owns the three disjoint term partitions (accepted, rejected, candidate),
//! the seed queue, the already-seen guard, the pending review slot, the
//! friend graph and the score table. The caller owns the instance and drives
//! it; nothing here is process-wide.

use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::{debug, info, instrument};

use thesaurus_crawler::FriendSource;
use thesaurus_shared::{Result, Snapshot, Term, TermSet};
use thesaurus_storage::Store;

use crate::graph::FriendGraph;

/// Score reported alongside [`NextCandidate::NeedMoreSeeds`].
pub const NEED_MORE_SEEDS_SCORE: f64 = -1.0;

/// Outcome of [`Thesaurus::next_candidate`].
#[derive(Debug, Clone, PartialEq)]
pub enum NextCandidate {
    /// A term awaiting review, with its current score.
    Candidate { term: Term, score: f64 },
    /// Nothing left to propose until new seeds arrive.
    NeedMoreSeeds,
}

impl NextCandidate {
    pub fn term(&self) -> Option<&Term> {
        match self {
            Self::Candidate { term, .. } => Some(term),
            Self::NeedMoreSeeds => None,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Self::Candidate { score, .. } => *score,
            Self::NeedMoreSeeds => NEED_MORE_SEEDS_SCORE,
        }
    }
}

/// Partition sizes, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub accepted: usize,
    pub rejected: usize,
    pub candidates: usize,
    pub seeds: usize,
    pub seen: usize,
    pub crawled: usize,
    pub pending: bool,
}

/// An expanding thesaurus bound to a friend source.
pub struct Thesaurus<S> {
    pub(crate) source: S,
    pub(crate) accepted: TermSet,
    pub(crate) rejected: TermSet,
    pub(crate) candidates: TermSet,
    pub(crate) seeds: VecDeque<Term>,
    pub(crate) seen: TermSet,
    pub(crate) pending: Option<Term>,
    pub(crate) friends: FriendGraph,
    pub(crate) scores: IndexMap<Term, f64>,
}

impl<S: FriendSource> Thesaurus<S> {
    /// An empty thesaurus.
    pub fn new(source: S) -> Self {
        Self::from_snapshot(source, Snapshot::default())
    }

    /// Rebuild from persisted data.
    ///
    /// Overlapping partitions are resolved with rejected winning over
    /// accepted and both winning over candidate; queued seeds count as
    /// accepted, and already-seen is widened to cover all three partitions.
    pub fn from_snapshot(source: S, snapshot: Snapshot) -> Self {
        let Snapshot {
            accepted,
            rejected,
            candidates,
            seeds,
            mut seen,
            mut scores,
            friends,
        } = snapshot;

        let seeds: VecDeque<Term> = seeds
            .into_iter()
            .filter(|t| !rejected.contains(t))
            .collect();
        let accepted: TermSet = accepted
            .into_iter()
            .chain(seeds.iter().cloned())
            .filter(|t| !rejected.contains(t))
            .collect();
        for term in &accepted {
            scores.entry(term.clone()).or_insert(1.0);
        }
        let candidates: TermSet = candidates
            .into_iter()
            .filter(|t| !rejected.contains(t) && !accepted.contains(t))
            .collect();
        seen.extend(accepted.iter().cloned());
        seen.extend(rejected.iter().cloned());
        seen.extend(candidates.iter().cloned());

        Self {
            source,
            accepted,
            rejected,
            candidates,
            seeds,
            seen,
            pending: None,
            friends: FriendGraph::from(friends),
            scores,
        }
    }

    /// Plain-data image for persistence. A pending review is folded back
    /// into the candidates so it survives a restart.
    pub fn snapshot(&self) -> Snapshot {
        let mut candidates = self.candidates.clone();
        if let Some(pending) = &self.pending {
            candidates.insert(pending.clone());
        }

        Snapshot {
            accepted: self.accepted.clone(),
            rejected: self.rejected.clone(),
            candidates,
            seeds: self.seeds.iter().cloned().collect(),
            seen: self.seen.clone(),
            scores: self.scores.clone(),
            friends: self.friends.as_map().clone(),
        }
    }

    /// Load from `store`; absent files leave their part empty.
    pub async fn load(source: S, store: &Store) -> Result<Self> {
        let snapshot = store.load().await?;
        Ok(Self::from_snapshot(source, snapshot))
    }

    /// Write the current state to `store`. The in-memory pending review
    /// stays open.
    pub async fn save(&self, store: &Store) -> Result<()> {
        store.save(&self.snapshot()).await
    }

    // -----------------------------------------------------------------------
    // Partition moves
    // -----------------------------------------------------------------------

    fn accept(&mut self, term: &Term) {
        self.rejected.shift_remove(term);
        self.candidates.shift_remove(term);
        self.accepted.insert(term.clone());
        self.seen.insert(term.clone());
        self.scores.insert(term.clone(), 1.0);
        if self.pending.as_ref() == Some(term) {
            self.pending = None;
        }
    }

    fn reject(&mut self, term: &Term) {
        self.accepted.shift_remove(term);
        self.candidates.shift_remove(term);
        self.rejected.insert(term.clone());
        self.seen.insert(term.clone());
        self.scores.insert(term.clone(), 0.0);
        if self.pending.as_ref() == Some(term) {
            self.pending = None;
        }
    }

    /// Accept `raw` and expand it right away. Returns whether new candidates
    /// were found.
    #[instrument(skip(self))]
    pub async fn add_seed(&mut self, raw: &str) -> bool {
        let Some(term) = Term::new(raw) else {
            debug!("ignoring blank seed");
            return false;
        };
        info!(%term, "seed added");
        self.accept(&term);
        self.expand(&term).await
    }

    /// Accept `raw` but leave its expansion to the seed queue.
    pub fn enqueue_seed(&mut self, raw: &str) {
        let Some(term) = Term::new(raw) else {
            return;
        };
        self.accept(&term);
        self.seeds.push_back(term);
    }

    /// Reject `raw` outside the review flow.
    #[instrument(skip(self))]
    pub fn add_anti_term(&mut self, raw: &str) {
        let Some(term) = Term::new(raw) else {
            return;
        };
        info!(%term, "anti-term added");
        self.reject(&term);
    }

    /// Turn every unseen friend of `term` into a candidate and prefetch the
    /// new candidate's own friends for scoring.
    pub async fn expand(&mut self, term: &Term) -> bool {
        let friends = self.friends.get_friends(&self.source, term).await;
        let mut produced = 0usize;

        for friend in friends {
            if self.seen.contains(&friend) {
                continue;
            }
            self.seen.insert(friend.clone());
            self.candidates.insert(friend.clone());
            self.scores.entry(friend.clone()).or_insert(0.0);
            self.friends.get_friends(&self.source, &friend).await;
            produced += 1;
        }

        debug!(%term, new_candidates = produced, "expanded");
        produced > 0
    }

    /// Expand queued seeds until a candidate appears or the queue runs dry.
    async fn drain_seeds(&mut self) {
        while self.candidates.is_empty() {
            let Some(seed) = self.seeds.pop_front() else {
                break;
            };
            self.expand(&seed).await;
        }
    }

    // -----------------------------------------------------------------------
    // Review flow
    // -----------------------------------------------------------------------

    /// The term currently under review, choosing the best-scoring candidate
    /// if none is.
    pub async fn next_candidate(&mut self) -> NextCandidate {
        if let Some(term) = &self.pending {
            return NextCandidate::Candidate {
                term: term.clone(),
                score: self.score(term),
            };
        }

        self.drain_seeds().await;

        let Some(term) = self.best_candidate() else {
            debug!("candidates exhausted");
            return NextCandidate::NeedMoreSeeds;
        };
        self.candidates.shift_remove(&term);
        self.pending = Some(term.clone());

        let score = self.score(&term);
        debug!(%term, score, "proposing candidate");
        NextCandidate::Candidate { term, score }
    }

    /// Accept the pending candidate and expand it. Returns the confirmed term.
    pub async fn confirm_candidate(&mut self) -> Option<Term> {
        let term = self.pending.take()?;
        info!(%term, "candidate confirmed");
        self.accept(&term);
        self.expand(&term).await;
        Some(term)
    }

    /// Reject the pending candidate. Returns the rejected term.
    pub fn reject_candidate(&mut self) -> Option<Term> {
        let term = self.pending.take()?;
        info!(%term, "candidate rejected");
        self.reject(&term);
        Some(term)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn accepted(&self) -> &TermSet {
        &self.accepted
    }

    pub fn rejected(&self) -> &TermSet {
        &self.rejected
    }

    pub fn candidates(&self) -> &TermSet {
        &self.candidates
    }

    pub fn seeds(&self) -> &VecDeque<Term> {
        &self.seeds
    }

    pub fn seen(&self) -> &TermSet {
        &self.seen
    }

    pub fn pending(&self) -> Option<&Term> {
        self.pending.as_ref()
    }

    pub fn friend_graph(&self) -> &FriendGraph {
        &self.friends
    }

    pub fn scores(&self) -> &IndexMap<Term, f64> {
        &self.scores
    }

    /// Current score of `term`, 0.0 when unscored.
    pub fn score(&self, term: &Term) -> f64 {
        self.scores.get(term).copied().unwrap_or(0.0)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            accepted: self.accepted.len(),
            rejected: self.rejected.len(),
            candidates: self.candidates.len(),
            seeds: self.seeds.len(),
            seen: self.seen.len(),
            crawled: self.friends.len(),
            pending: self.pending.is_some(),
        }
    }
}
