//! Crawling and link extraction for the thesaurus expander.
//!
//! This crate provides:
//! - [`HttpFetcher`]: rate-limited, single-flight page fetcher
//! - [`LinkExtractor`] / [`PatternExtractor`]: pattern-driven link extraction
//! - [`FriendSource`] / [`Crawler`]: term → linked terms

pub mod extractor;
pub mod fetcher;
pub mod source;

pub use extractor::{LinkExtractor, PatternExtractor};
pub use fetcher::HttpFetcher;
pub use source::{Crawler, FriendSource};
