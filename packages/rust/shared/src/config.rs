//! Application configuration for the thesaurus expander.
//!
//! User config lives at `~/.thesaurus/thesaurus.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ThesaurusError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "thesaurus.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".thesaurus";

/// Placeholder substituted with the term slug in `path_template`.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

// ---------------------------------------------------------------------------
// Config structs (matching thesaurus.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Content source settings.
    #[serde(default)]
    pub source: SourceSection,

    /// Markup extraction patterns.
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Store directory used when `--store` is not given.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Wikipedia language edition used to derive the base URL.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            language: default_language(),
        }
    }
}

fn default_store_dir() -> String {
    "thesaurus-store".into()
}
fn default_language() -> String {
    "fr".into()
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Explicit base URL. When absent, derived from `defaults.language`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request path, with `{slug}` standing for the term slug.
    #[serde(default = "default_path_template")]
    pub path_template: String,

    /// Replaces spaces when turning a term into a slug.
    #[serde(default = "default_slug_separator")]
    pub slug_separator: String,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause after every successful fetch, in ms.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            base_url: None,
            path_template: default_path_template(),
            slug_separator: default_slug_separator(),
            user_agent: default_user_agent(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_path_template() -> String {
    "/wiki/{slug}".into()
}
fn default_slug_separator() -> String {
    "_".into()
}
fn default_user_agent() -> String {
    "chrome".into()
}
fn default_delay_ms() -> u64 {
    100
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[extract]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Isolates body-text blocks; the `chunk` group (or group 1) is kept.
    #[serde(default = "default_block_pattern")]
    pub block_pattern: String,

    /// Regions blanked out before link scanning.
    #[serde(default = "default_noise_patterns")]
    pub noise_patterns: Vec<String>,

    /// Captures link targets; the `link` group (or group 1) is kept.
    #[serde(default = "default_link_pattern")]
    pub link_pattern: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            block_pattern: default_block_pattern(),
            noise_patterns: default_noise_patterns(),
            link_pattern: default_link_pattern(),
        }
    }
}

fn default_block_pattern() -> String {
    "<p>(?<chunk>.*?)</p>".into()
}
fn default_noise_patterns() -> Vec<String> {
    ["span", "small", "div", "sup"]
        .iter()
        .map(|tag| format!("<{tag} (?<kickout>.*?)</{tag}>"))
        .collect()
}
fn default_link_pattern() -> String {
    r#"<a href="/wiki/(?<link>.*?)" "#.into()
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetcher configuration.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Scheme + host the path template is resolved against.
    pub base_url: Url,
    /// Request path with a `{slug}` placeholder.
    pub path_template: String,
    /// Replaces spaces in slugs.
    pub slug_separator: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// Post-fetch delay in ms.
    pub delay_ms: u64,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Build the runtime config, deriving the base URL from the language when
    /// none is configured.
    pub fn from_app(config: &AppConfig) -> Result<Self> {
        let raw = match &config.source.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.wikipedia.org", config.defaults.language),
        };
        let base_url = Url::parse(&raw)
            .map_err(|e| ThesaurusError::config(format!("invalid base_url '{raw}': {e}")))?;

        if !config.source.path_template.contains(SLUG_PLACEHOLDER) {
            return Err(ThesaurusError::config(format!(
                "path_template '{}' has no {SLUG_PLACEHOLDER} placeholder",
                config.source.path_template
            )));
        }

        Ok(Self {
            base_url,
            path_template: config.source.path_template.clone(),
            slug_separator: config.source.slug_separator.clone(),
            user_agent: config.source.user_agent.clone(),
            delay_ms: config.source.delay_ms,
            timeout_secs: config.source.timeout_secs,
        })
    }
}

/// Runtime extraction patterns (uncompiled).
#[derive(Debug, Clone)]
pub struct ExtractPatterns {
    pub block_pattern: String,
    pub noise_patterns: Vec<String>,
    pub link_pattern: String,
}

impl Default for ExtractPatterns {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ExtractPatterns {
    fn from(config: &AppConfig) -> Self {
        Self {
            block_pattern: config.extract.block_pattern.clone(),
            noise_patterns: config.extract.noise_patterns.clone(),
            link_pattern: config.extract.link_pattern.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.thesaurus/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ThesaurusError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.thesaurus/thesaurus.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ThesaurusError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ThesaurusError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ThesaurusError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ThesaurusError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ThesaurusError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("store_dir"));
        assert!(toml_str.contains("/wiki/{slug}"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.language, "fr");
        assert_eq!(parsed.source.delay_ms, 100);
        assert_eq!(parsed.extract.noise_patterns.len(), 4);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let toml_str = r#"
[defaults]
language = "en"

[source]
delay_ms = 0
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.language, "en");
        assert_eq!(config.defaults.store_dir, "thesaurus-store");
        assert_eq!(config.source.delay_ms, 0);
        assert_eq!(config.source.user_agent, "chrome");
    }

    #[test]
    fn base_url_derived_from_language() {
        let mut app = AppConfig::default();
        app.defaults.language = "de".into();
        let source = SourceConfig::from_app(&app).unwrap();
        assert_eq!(source.base_url.as_str(), "https://de.wikipedia.org/");
    }

    #[test]
    fn explicit_base_url_wins() {
        let mut app = AppConfig::default();
        app.source.base_url = Some("http://localhost:8080".into());
        let source = SourceConfig::from_app(&app).unwrap();
        assert_eq!(source.base_url.host_str(), Some("localhost"));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let mut app = AppConfig::default();
        app.source.path_template = "/wiki/".into();
        let err = SourceConfig::from_app(&app).unwrap_err();
        assert!(err.to_string().contains("{slug}"));
    }

    #[test]
    fn extract_patterns_follow_config() {
        let patterns = ExtractPatterns::default();
        assert_eq!(patterns.block_pattern, "<p>(?<chunk>.*?)</p>");
        assert_eq!(patterns.noise_patterns[0], "<span (?<kickout>.*?)</span>");
    }
}
