//! Candidate discovery and scoring for an incrementally built thesaurus.
//!
//! [`Thesaurus`] ties the friend source, the [`FriendGraph`] cache, the
//! scoring pass and the persistence store into the review workflow:
//! seed → expand → score → propose → confirm or reject → save.

pub mod graph;
pub mod scoring;
pub mod thesaurus;

#[cfg(test)]
pub(crate) mod testing;

pub use graph::FriendGraph;
pub use thesaurus::{NEED_MORE_SEEDS_SCORE, NextCandidate, Stats, Thesaurus};
