//! Shared types, error model, and configuration for the thesaurus expander.
//!
//! This crate is the foundation depended on by all other thesaurus crates.
//! It provides:
//! - [`ThesaurusError`]: the unified error type
//! - Domain types ([`Term`], [`Snapshot`])
//! - Configuration ([`AppConfig`], [`SourceConfig`], [`ExtractPatterns`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, ExtractConfig, ExtractPatterns, SourceConfig, SourceSection,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, ThesaurusError};
pub use types::{FriendMap, Snapshot, Term, TermSet};
