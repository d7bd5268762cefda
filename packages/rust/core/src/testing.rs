//! In-memory friend source for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use thesaurus_crawler::FriendSource;
use thesaurus_shared::{Term, TermSet};

/// Serves friend sets from a fixed table and records every lookup.
#[derive(Default)]
pub(crate) struct MapSource {
    pages: HashMap<String, Vec<String>>,
    calls: RefCell<Vec<String>>,
}

impl MapSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, term: &str, friends: &[&str]) -> Self {
        self.pages.insert(
            term.to_string(),
            friends.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    /// Terms looked up so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl FriendSource for MapSource {
    async fn friends(&self, term: &Term) -> TermSet {
        self.calls.borrow_mut().push(term.to_string());
        self.pages
            .get(term.as_str())
            .map(|friends| friends.iter().filter_map(|f| Term::new(f)).collect())
            .unwrap_or_default()
    }
}
