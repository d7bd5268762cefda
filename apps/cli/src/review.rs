//! Interactive review loop.
//!
//! Keystrokes map onto thesaurus calls: an empty line confirms the proposed
//! term, `n` rejects it, `s` saves, `us` runs one more scoring pass, `q`
//! saves and quits, and anything else is read as seed terms.

use std::io::Write;

use color_eyre::eyre::Result;
use thesaurus_core::{NextCandidate, Thesaurus};
use thesaurus_crawler::FriendSource;
use thesaurus_storage::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

const NEED_SEEDS_MESSAGE: &str = "need more seeds: type one or more terms";

/// One line of user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Input {
    Confirm,
    Reject,
    Save,
    Rescale,
    Quit,
    Seeds(Vec<String>),
}

pub(crate) fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Confirm,
        "n" => Input::Reject,
        "s" => Input::Save,
        "us" => Input::Rescale,
        "q" => Input::Quit,
        other => Input::Seeds(other.split_whitespace().map(String::from).collect()),
    }
}

/// Human-readable form of a proposal; link targets arrive URL-encoded.
pub(crate) fn render(next: &NextCandidate) -> String {
    match next {
        NextCandidate::Candidate { term, score } => {
            let shown = urlencoding::decode(term.as_str())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| term.to_string());
            format!("{shown}  [{score:.2}]")
        }
        NextCandidate::NeedMoreSeeds => NEED_SEEDS_MESSAGE.to_string(),
    }
}

/// Drive the review loop on stdin until `q` or end of input.
pub(crate) async fn run<S: FriendSource>(thesaurus: &mut Thesaurus<S>, store: &Store) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current = thesaurus.next_candidate().await;
    prompt(&render(&current))?;

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Confirm => {
                thesaurus.confirm_candidate().await;
                current = thesaurus.next_candidate().await;
            }
            Input::Reject => {
                thesaurus.reject_candidate();
                current = thesaurus.next_candidate().await;
            }
            Input::Save => {
                if let Err(e) = save(thesaurus, store).await {
                    error!(error = %e, "save failed");
                }
            }
            Input::Rescale => rescale(thesaurus, &mut current),
            Input::Quit => break,
            Input::Seeds(terms) => {
                for term in &terms {
                    thesaurus.add_seed(term).await;
                }
                if current == NextCandidate::NeedMoreSeeds {
                    current = thesaurus.next_candidate().await;
                }
            }
        }
        prompt(&render(&current))?;
    }

    save(thesaurus, store).await
}

/// One more scoring pass. The term under review sits outside the candidate
/// set, so its shown score takes the same diffusion step here.
pub(crate) fn rescale<S: FriendSource>(thesaurus: &mut Thesaurus<S>, current: &mut NextCandidate) {
    let delta = current.term().map(|term| thesaurus.compute_score(term));
    thesaurus.update_scores();
    if let (NextCandidate::Candidate { score, .. }, Some(delta)) = (current, delta) {
        *score += delta;
    }
}

async fn save<S: FriendSource>(thesaurus: &Thesaurus<S>, store: &Store) -> Result<()> {
    thesaurus.save(store).await?;
    println!("saved to {}", store.dir().display());
    Ok(())
}

fn prompt(message: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{message}")?;
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use thesaurus_shared::{Term, TermSet};

    struct Links(HashMap<&'static str, Vec<&'static str>>);

    impl FriendSource for Links {
        async fn friends(&self, term: &Term) -> TermSet {
            self.0
                .get(term.as_str())
                .map(|fs| fs.iter().filter_map(|f| Term::new(f)).collect())
                .unwrap_or_default()
        }
    }

    fn cats() -> Links {
        Links(HashMap::from([
            ("cat", vec!["kitten", "feline"]),
            ("kitten", vec!["cat", "feline"]),
            ("feline", vec!["cat"]),
        ]))
    }

    #[test]
    fn keystrokes_map_to_commands() {
        assert_eq!(parse_input(""), Input::Confirm);
        assert_eq!(parse_input("  \n"), Input::Confirm);
        assert_eq!(parse_input("n"), Input::Reject);
        assert_eq!(parse_input("s"), Input::Save);
        assert_eq!(parse_input("us"), Input::Rescale);
        assert_eq!(parse_input("q"), Input::Quit);
    }

    #[test]
    fn other_input_is_seeds() {
        assert_eq!(
            parse_input("chat  tigre"),
            Input::Seeds(vec!["chat".into(), "tigre".into()])
        );
        assert_eq!(parse_input("no"), Input::Seeds(vec!["no".into()]));
    }

    #[test]
    fn candidates_are_shown_decoded() {
        let next = NextCandidate::Candidate {
            term: Term::new("f%C3%A9lin").unwrap(),
            score: 1.5,
        };
        assert_eq!(render(&next), "félin  [1.50]");
    }

    #[tokio::test]
    async fn rescale_moves_the_shown_score() {
        let mut thesaurus = Thesaurus::new(cats());
        thesaurus.add_seed("cat").await;
        let mut current = thesaurus.next_candidate().await;
        assert_eq!(current.score(), 1.0);

        rescale(&mut thesaurus, &mut current);
        // kitten links to cat (1) and feline (1)
        assert_eq!(current.score(), 3.0);
        assert_eq!(current.term().map(Term::as_str), Some("kitten"));

        rescale(&mut thesaurus, &mut current);
        assert!(current.score() > 3.0);
    }

    #[tokio::test]
    async fn rescale_leaves_exhaustion_alone() {
        let mut thesaurus = Thesaurus::new(cats());
        let mut current = NextCandidate::NeedMoreSeeds;
        rescale(&mut thesaurus, &mut current);
        assert_eq!(current, NextCandidate::NeedMoreSeeds);
    }

    #[tokio::test]
    async fn failed_save_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let thesaurus = Thesaurus::new(cats());
        let result = save(&thesaurus, &Store::new(blocker.join("store"))).await;
        assert!(result.is_err());
    }

    #[test]
    fn exhaustion_asks_for_seeds() {
        assert_eq!(render(&NextCandidate::NeedMoreSeeds), NEED_SEEDS_MESSAGE);
    }
}
