//! Memoized friend graph.
//!
//! Each term is crawled at most once per store lifetime. An empty result
//! (including a failed fetch) is cached like any other.

use tracing::debug;

use thesaurus_crawler::FriendSource;
use thesaurus_shared::{FriendMap, Term, TermSet};

/// Term → friends cache. Every entry owns its own set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FriendGraph {
    entries: FriendMap,
}

impl FriendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Friends of `term`, crawling `source` only on a cache miss.
    pub async fn get_friends<S: FriendSource>(&mut self, source: &S, term: &Term) -> TermSet {
        if let Some(friends) = self.entries.get(term) {
            debug!(%term, count = friends.len(), "friend cache hit");
            return friends.clone();
        }

        debug!(%term, "friend cache miss");
        let friends = source.friends(term).await;
        self.entries.insert(term.clone(), friends.clone());
        friends
    }

    /// Cached friends of `term`, without crawling.
    pub fn get(&self, term: &Term) -> Option<&TermSet> {
        self.entries.get(term)
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.entries.contains_key(term)
    }

    /// Number of cached terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &FriendMap {
        &self.entries
    }
}

impl From<FriendMap> for FriendGraph {
    fn from(entries: FriendMap) -> Self {
        Self { entries }
    }
}
