//! Pattern-driven link extraction.
//!
//! Extraction runs in three passes: isolate body-text blocks, blank out
//! noise regions, then scan what is left for link targets. The patterns are
//! configuration, so a change in the source's markup is a config edit.

use indexmap::IndexSet;
use regex::{Captures, Regex};
use tracing::debug;

use thesaurus_shared::{ExtractPatterns, Result, Term, TermSet, ThesaurusError};

/// Capture group holding a body-text block.
const BLOCK_GROUP: &str = "chunk";

/// Capture group holding a link target.
const LINK_GROUP: &str = "link";

/// Capability interface over a markup dialect.
pub trait LinkExtractor {
    /// Pass 1: concatenate all body-text blocks of `content`.
    fn extract_blocks(&self, content: &str) -> String;

    /// Pass 2: replace noise regions of `text` with a single space.
    fn remove_noise(&self, text: &str) -> String;

    /// Pass 3: collect raw link targets in first-occurrence order.
    fn extract_links(&self, text: &str) -> IndexSet<String>;

    /// Run all three passes and canonicalize the targets.
    fn extract(&self, content: &str) -> TermSet {
        let blocks = self.extract_blocks(content);
        let filtered = self.remove_noise(&blocks);
        self.extract_links(&filtered)
            .iter()
            .filter_map(|link| Term::new(link))
            .collect()
    }
}

/// [`LinkExtractor`] backed by compiled regular expressions.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    block: Regex,
    noise: Vec<Regex>,
    link: Regex,
}

impl PatternExtractor {
    /// Compile the given patterns.
    pub fn new(patterns: &ExtractPatterns) -> Result<Self> {
        let noise = patterns
            .noise_patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            block: compile(&patterns.block_pattern)?,
            noise,
            link: compile(&patterns.link_pattern)?,
        })
    }
}

impl LinkExtractor for PatternExtractor {
    fn extract_blocks(&self, content: &str) -> String {
        let mut out = String::new();
        for caps in self.block.captures_iter(content) {
            out.push_str(captured(&caps, BLOCK_GROUP));
            out.push(' ');
        }
        out
    }

    fn remove_noise(&self, text: &str) -> String {
        self.noise.iter().fold(text.to_string(), |acc, re| {
            re.replace_all(&acc, " ").into_owned()
        })
    }

    fn extract_links(&self, text: &str) -> IndexSet<String> {
        let links: IndexSet<String> = self
            .link
            .captures_iter(text)
            .map(|caps| captured(&caps, LINK_GROUP).to_string())
            .filter(|link| !link.is_empty())
            .collect();
        debug!(count = links.len(), "extracted links");
        links
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ThesaurusError::pattern(pattern, e.to_string()))
}

/// Named group if the pattern has it, else group 1, else the whole match.
fn captured<'h>(caps: &Captures<'h>, name: &str) -> &'h str {
    caps.name(name)
        .or_else(|| caps.get(1))
        .or_else(|| caps.get(0))
        .map_or("", |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = concat!(
        r#"<html><body><div id="nav"><a href="/wiki/Accueil" title="x">Accueil</a></div>"#,
        r#"<p>Le <b>chat</b> est un <a href="/wiki/F%C3%A9lin" title="Félin">félin</a> "#,
        r#"proche du <a href="/wiki/Chaton" title="Chaton">chaton</a>"#,
        r#"<sup class="ref"><a href="/wiki/Note_1" title="n">1</a></sup>.</p>"#,
        "\n",
        r#"<p>Voir <a href="/wiki/Chaton" title="Chaton">chaton</a> et "#,
        r#"<span class="x"><a href="/wiki/Aide" title="a">aide</a></span> "#,
        r#"<a href="/wiki/Felis_silvestris" title="F">Felis</a> ici.</p>"#,
        "</body></html>"
    );

    fn extractor() -> PatternExtractor {
        PatternExtractor::new(&ExtractPatterns::default()).unwrap()
    }

    #[test]
    fn blocks_keep_only_paragraph_text() {
        let blocks = extractor().extract_blocks(ARTICLE);
        assert!(blocks.contains("Le <b>chat</b>"));
        assert!(!blocks.contains("Accueil"));
        assert!(!blocks.contains("<p>"));
    }

    #[test]
    fn noise_regions_are_blanked() {
        let ex = extractor();
        let filtered = ex.remove_noise(&ex.extract_blocks(ARTICLE));
        assert!(!filtered.contains("Note_1"));
        assert!(!filtered.contains("Aide"));
        assert!(filtered.contains("Chaton"));
    }

    #[test]
    fn extract_yields_canonical_terms_in_order() {
        let terms = extractor().extract(ARTICLE);
        let names: Vec<&str> = terms.iter().map(Term::as_str).collect();
        assert_eq!(names, vec!["f%c3%a9lin", "chaton", "felis_silvestris"]);
    }

    #[test]
    fn content_without_blocks_has_no_links() {
        let terms = extractor().extract(r#"<a href="/wiki/Orphan" title="o">o</a>"#);
        assert!(terms.is_empty());
    }

    #[test]
    fn unnamed_groups_fall_back_to_first_group() {
        let patterns = ExtractPatterns {
            block_pattern: r"\[\[(.*?)\]\]".into(),
            noise_patterns: vec![],
            link_pattern: r"link:(\w+)".into(),
        };
        let ex = PatternExtractor::new(&patterns).unwrap();
        let terms = ex.extract("[[see link:Dog and link:Wolf]] link:Outside");
        let names: Vec<&str> = terms.iter().map(Term::as_str).collect();
        assert_eq!(names, vec!["dog", "wolf"]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let patterns = ExtractPatterns {
            link_pattern: "(unclosed".into(),
            ..ExtractPatterns::default()
        };
        let err = PatternExtractor::new(&patterns).unwrap_err();
        assert!(matches!(err, ThesaurusError::Pattern { .. }));
    }
}
