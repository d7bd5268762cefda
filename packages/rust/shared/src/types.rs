//! Core domain types for the thesaurus expander.

use std::borrow::Borrow;
use std::fmt;

use indexmap::{IndexMap, IndexSet};

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// A canonical vocabulary entry: trimmed and lowercased.
///
/// Every set membership test and map key in the workspace goes through
/// `Term`, so two spellings differing only in case or surrounding
/// whitespace always collapse to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(String);

impl Term {
    /// Canonicalize `raw`. Returns `None` when nothing is left after trimming.
    ///
    /// Inner whitespace runs collapse to one space, so a term never carries
    /// the tab used as field separator on disk.
    pub fn new(raw: &str) -> Option<Self> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        Some(Self(words.join(" ").to_lowercase()))
    }

    /// The canonical text of this term.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Source slug: spaces replaced by `separator`.
    pub fn slug(&self, separator: &str) -> String {
        self.0.replace(' ', separator)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Insertion-ordered set of terms. Order is the deterministic tie-break everywhere.
pub type TermSet = IndexSet<Term>;

/// Term → outgoing links, in discovery order.
pub type FriendMap = IndexMap<Term, TermSet>;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Plain-data image of a thesaurus, as exchanged with the persistence store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Confirmed thesaurus entries.
    pub accepted: TermSet,
    /// Explicitly excluded terms.
    pub rejected: TermSet,
    /// Discovered, unreviewed terms.
    pub candidates: TermSet,
    /// Seeds awaiting expansion, front first.
    pub seeds: Vec<Term>,
    /// Every term ever judged or proposed.
    pub seen: TermSet,
    /// Diffusion scores.
    pub scores: IndexMap<Term, f64>,
    /// Cached friend graph.
    pub friends: FriendMap,
}

impl Snapshot {
    /// True when nothing at all has been recorded.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
            && self.rejected.is_empty()
            && self.candidates.is_empty()
            && self.seeds.is_empty()
            && self.seen.is_empty()
            && self.scores.is_empty()
            && self.friends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_is_trimmed_and_lowercased() {
        let term = Term::new("  Chat Domestique \n").unwrap();
        assert_eq!(term.as_str(), "chat domestique");
        assert_eq!(term, Term::new("CHAT DOMESTIQUE").unwrap());
    }

    #[test]
    fn inner_whitespace_collapses_to_one_space() {
        let term = Term::new("Chat\t\tsauvage\n  d'Europe").unwrap();
        assert_eq!(term.as_str(), "chat sauvage d'europe");
        assert!(!term.as_str().contains('\t'));
    }

    #[test]
    fn blank_input_is_not_a_term() {
        assert!(Term::new("").is_none());
        assert!(Term::new(" \t ").is_none());
    }

    #[test]
    fn slug_joins_words() {
        let term = Term::new("Felis silvestris catus").unwrap();
        assert_eq!(term.slug("_"), "felis_silvestris_catus");
    }

    #[test]
    fn term_set_lookup_by_str() {
        let mut set = TermSet::new();
        set.insert(Term::new("Kitten").unwrap());
        assert!(set.contains("kitten"));
        assert!(!set.contains("Kitten"));
    }

    #[test]
    fn default_snapshot_is_empty() {
        assert!(Snapshot::default().is_empty());
    }
}
