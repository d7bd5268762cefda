//! Friend discovery: fetch a term's page and extract its outgoing links.

use std::future::Future;

use tracing::{debug, instrument};

use thesaurus_shared::{AppConfig, ExtractPatterns, Result, SourceConfig, Term, TermSet};

use crate::extractor::{LinkExtractor, PatternExtractor};
use crate::fetcher::HttpFetcher;

/// Anything that can list the friends of a term.
///
/// Implementations never fail: an unreachable page is a term with no friends.
pub trait FriendSource {
    fn friends(&self, term: &Term) -> impl Future<Output = TermSet>;
}

/// [`FriendSource`] that crawls a hyperlinked content source.
pub struct Crawler<E = PatternExtractor> {
    fetcher: HttpFetcher,
    extractor: E,
}

impl Crawler<PatternExtractor> {
    /// Build a crawler from the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(SourceConfig::from_app(config)?)?;
        let extractor = PatternExtractor::new(&ExtractPatterns::from(config))?;
        Ok(Self::new(fetcher, extractor))
    }
}

impl<E: LinkExtractor> Crawler<E> {
    /// Combine a fetcher with any extraction dialect.
    pub fn new(fetcher: HttpFetcher, extractor: E) -> Self {
        Self { fetcher, extractor }
    }
}

impl<E: LinkExtractor> FriendSource for Crawler<E> {
    #[instrument(skip_all, fields(term = %term))]
    async fn friends(&self, term: &Term) -> TermSet {
        match self.fetcher.fetch(term).await {
            Some(content) => {
                let friends = self.extractor.extract(&content);
                debug!(count = friends.len(), "friends extracted");
                friends
            }
            None => TermSet::new(),
        }
    }
}
