//! Line-oriented file formats.
//!
//! - Term sets: one term per line; on read every whitespace-separated token
//!   is a term of its own.
//! - Scores: `<term>\t<score>`.
//! - Friend graph: `<term>\t<friend>\t<friend>...`, a bare `<term>` for no friends.
//!
//! Malformed lines are skipped, never fatal.

use indexmap::IndexMap;
use tracing::debug;

use thesaurus_shared::{FriendMap, Term, TermSet};

const FIELD_SEP: char = '\t';

/// Tokenize every line of a term-set file.
pub(crate) fn parse_terms(content: &str) -> Vec<Term> {
    content.split_whitespace().filter_map(Term::new).collect()
}

pub(crate) fn render_terms<'a>(terms: impl IntoIterator<Item = &'a Term>) -> String {
    let mut out = String::new();
    for term in terms {
        out.push_str(term.as_str());
        out.push('\n');
    }
    out
}

pub(crate) fn parse_scores(content: &str) -> IndexMap<Term, f64> {
    let mut scores = IndexMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split(FIELD_SEP).collect();
        let parsed = match fields.as_slice() {
            [term, score] => Term::new(term).zip(score.trim().parse::<f64>().ok()),
            _ => None,
        };
        match parsed {
            Some((term, score)) if score.is_finite() => {
                scores.insert(term, score);
            }
            _ => debug!(line = lineno + 1, "skipping malformed score line"),
        }
    }
    scores
}

pub(crate) fn render_scores(scores: &IndexMap<Term, f64>) -> String {
    let mut out = String::new();
    for (term, score) in scores {
        out.push_str(&format!("{term}{FIELD_SEP}{score}\n"));
    }
    out
}

pub(crate) fn parse_friends(content: &str) -> FriendMap {
    let mut graph = FriendMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let mut fields = line.split(FIELD_SEP);
        let Some(term) = fields.next().and_then(Term::new) else {
            debug!(line = lineno + 1, "skipping malformed friend line");
            continue;
        };
        let friends: TermSet = fields.filter_map(Term::new).collect();
        graph.insert(term, friends);
    }
    graph
}

pub(crate) fn render_friends(graph: &FriendMap) -> String {
    let mut out = String::new();
    for (term, friends) in graph {
        out.push_str(term.as_str());
        for friend in friends {
            out.push(FIELD_SEP);
            out.push_str(friend.as_str());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> Term {
        Term::new(raw).unwrap()
    }

    #[test]
    fn term_lines_are_tokenized() {
        let terms = parse_terms("chat\nchat domestique\n\n  Félin \n");
        let names: Vec<&str> = terms.iter().map(Term::as_str).collect();
        assert_eq!(names, vec!["chat", "chat", "domestique", "félin"]);
    }

    #[test]
    fn score_lines_with_wrong_field_count_are_skipped() {
        let scores = parse_scores("chat\t1\nchaton\nfélin\t0.5\textra\ntigre\tabc\nlion\t2.25\n");
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["chat"], 1.0);
        assert_eq!(scores["lion"], 2.25);
    }

    #[test]
    fn rendered_scores_parse_back() {
        let mut scores = IndexMap::new();
        scores.insert(t("chat"), 1.0);
        scores.insert(t("chaton"), 0.1 + 0.2);
        assert_eq!(parse_scores(&render_scores(&scores)), scores);
    }

    #[test]
    fn friendless_terms_keep_their_line() {
        let mut graph = FriendMap::new();
        graph.insert(t("chat"), [t("chaton"), t("félin")].into_iter().collect());
        graph.insert(t("orphelin"), TermSet::new());

        let rendered = render_friends(&graph);
        assert_eq!(rendered, "chat\tchaton\tfélin\norphelin\n");
        assert_eq!(parse_friends(&rendered), graph);
    }

    #[test]
    fn friend_line_without_key_is_skipped() {
        let graph = parse_friends("\tchaton\nchat\tChaton\n");
        assert_eq!(graph.len(), 1);
        assert!(graph["chat"].contains("chaton"));
    }
}
