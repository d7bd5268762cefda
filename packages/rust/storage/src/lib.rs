//! Directory-backed persistence for thesaurus state.
//!
//! A store is one directory holding seven fixed-name, line-oriented UTF-8
//! files (see [`format`] for the layouts). Every file is optional on load;
//! save rewrites all of them.
//!
//! Files are written one after another with no multi-file commit, so a
//! failure mid-save can leave the directory mixing two snapshots.

mod format;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thesaurus_shared::{Result, Snapshot, ThesaurusError};
use tracing::{debug, info, instrument};

/// Accepted terms.
pub const TERMS_FILE: &str = "terms.txt";
/// Rejected terms.
pub const ANTI_TERMS_FILE: &str = "anti_terms.txt";
/// Unreviewed candidates.
pub const CANDIDATE_TERMS_FILE: &str = "candidate_terms.txt";
/// Seed queue, front first.
pub const SEED_TERMS_FILE: &str = "seed_terms.txt";
/// Already-seen guard.
pub const ALREADY_SEEN_FILE: &str = "already_seen.txt";
/// Diffusion scores.
pub const SCORES_FILE: &str = "scores.tsv";
/// Cached friend graph.
pub const FRIENDS_FILE: &str = "friends.tsv";

/// Handle on a store directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Point at `dir`. Nothing is touched until [`load`](Self::load) or
    /// [`save`](Self::save).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every file that exists. Missing files (or a missing directory)
    /// leave the corresponding part of the snapshot empty.
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    pub async fn load(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();

        if let Some(content) = self.read(TERMS_FILE).await? {
            snapshot.accepted = format::parse_terms(&content).into_iter().collect();
        }
        if let Some(content) = self.read(ANTI_TERMS_FILE).await? {
            snapshot.rejected = format::parse_terms(&content).into_iter().collect();
        }
        if let Some(content) = self.read(CANDIDATE_TERMS_FILE).await? {
            snapshot.candidates = format::parse_terms(&content).into_iter().collect();
        }
        if let Some(content) = self.read(SEED_TERMS_FILE).await? {
            snapshot.seeds = format::parse_terms(&content);
        }
        if let Some(content) = self.read(ALREADY_SEEN_FILE).await? {
            snapshot.seen = format::parse_terms(&content).into_iter().collect();
        }
        if let Some(content) = self.read(SCORES_FILE).await? {
            snapshot.scores = format::parse_scores(&content);
        }
        if let Some(content) = self.read(FRIENDS_FILE).await? {
            snapshot.friends = format::parse_friends(&content);
        }

        info!(
            accepted = snapshot.accepted.len(),
            rejected = snapshot.rejected.len(),
            candidates = snapshot.candidates.len(),
            seeds = snapshot.seeds.len(),
            friends = snapshot.friends.len(),
            "store loaded"
        );
        Ok(snapshot)
    }

    /// Create the directory if needed and overwrite all seven files.
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ThesaurusError::io(&self.dir, e))?;

        self.write(SEED_TERMS_FILE, format::render_terms(&snapshot.seeds))
            .await?;
        self.write(ANTI_TERMS_FILE, format::render_terms(&snapshot.rejected))
            .await?;
        self.write(
            CANDIDATE_TERMS_FILE,
            format::render_terms(&snapshot.candidates),
        )
        .await?;
        self.write(TERMS_FILE, format::render_terms(&snapshot.accepted))
            .await?;
        self.write(ALREADY_SEEN_FILE, format::render_terms(&snapshot.seen))
            .await?;
        self.write(SCORES_FILE, format::render_scores(&snapshot.scores))
            .await?;
        self.write(FRIENDS_FILE, format::render_friends(&snapshot.friends))
            .await?;

        info!(
            accepted = snapshot.accepted.len(),
            candidates = snapshot.candidates.len(),
            "store saved"
        );
        Ok(())
    }

    async fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "store file absent, defaulting to empty");
                Ok(None)
            }
            Err(e) => Err(ThesaurusError::io(path, e)),
        }
    }

    async fn write(&self, name: &str, content: String) -> Result<()> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ThesaurusError::io(path, e))
    }
}
