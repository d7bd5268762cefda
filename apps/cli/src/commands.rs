//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use thesaurus_core::Thesaurus;
use thesaurus_crawler::{Crawler, FriendSource};
use thesaurus_shared::{AppConfig, init_config, load_config, load_config_from};
use thesaurus_storage::Store;
use tracing::info;

use crate::review;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Thesaurus: grow a curated vocabulary from seed terms.
#[derive(Parser)]
#[command(
    name = "thesaurus",
    version,
    about = "Grow a curated vocabulary from seed terms by crawling linked pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.thesaurus/thesaurus.toml).
    #[arg(long, global = true, env = "THESAURUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Store directory (overrides `defaults.store_dir`).
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Wikipedia language edition (overrides `defaults.language`).
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Review candidates interactively.
    Review,

    /// Add seed terms and expand them, then save.
    Seed {
        /// Terms to accept and crawl.
        #[arg(required = true)]
        terms: Vec<String>,

        /// Queue the seeds instead of crawling now; they are expanded when
        /// review runs out of candidates.
        #[arg(long)]
        defer: bool,
    },

    /// Exclude terms from the thesaurus, then save.
    Reject {
        /// Terms to reject.
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Show partition sizes of the store.
    Stats,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "thesaurus=warn",
        1 => "thesaurus=info",
        _ => "thesaurus=debug",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so they never interleave with the review prompt.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let store = Store::new(
        cli.store
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.defaults.store_dir)),
    );

    match cli.command {
        Command::Review => cmd_review(&config, &store).await,
        Command::Seed { terms, defer } => cmd_seed(&config, &store, &terms, defer).await,
        Command::Reject { terms } => cmd_reject(&config, &store, &terms).await,
        Command::Stats => cmd_stats(&config, &store).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

/// Config file values with CLI overrides applied.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(lang) = &cli.lang {
        config.defaults.language = lang.clone();
    }
    if let Some(store) = &cli.store {
        config.defaults.store_dir = store.to_string_lossy().to_string();
    }
    Ok(config)
}

async fn open(config: &AppConfig, store: &Store) -> Result<Thesaurus<Crawler>> {
    let crawler = Crawler::from_config(config)?;
    Ok(Thesaurus::load(crawler, store).await?)
}

async fn cmd_review(config: &AppConfig, store: &Store) -> Result<()> {
    let mut thesaurus = open(config, store).await?;
    info!(store = %store.dir().display(), "starting review");
    review::run(&mut thesaurus, store).await
}

async fn cmd_seed(config: &AppConfig, store: &Store, terms: &[String], defer: bool) -> Result<()> {
    let mut thesaurus = open(config, store).await?;
    for (term, outcome) in terms.iter().zip(seed(&mut thesaurus, terms, defer).await) {
        println!("  {term}: {outcome}");
    }
    thesaurus.save(store).await?;
    print_stats(&thesaurus);
    Ok(())
}

/// Seeds each term, crawling it now or queueing it when `defer` is set.
/// Returns one outcome label per term.
async fn seed<S: FriendSource>(
    thesaurus: &mut Thesaurus<S>,
    terms: &[String],
    defer: bool,
) -> Vec<&'static str> {
    let mut outcomes = Vec::with_capacity(terms.len());
    for term in terms {
        let outcome = if defer {
            thesaurus.enqueue_seed(term);
            "queued"
        } else if thesaurus.add_seed(term).await {
            "new candidates"
        } else {
            "nothing new"
        };
        outcomes.push(outcome);
    }
    outcomes
}

async fn cmd_reject(config: &AppConfig, store: &Store, terms: &[String]) -> Result<()> {
    let mut thesaurus = open(config, store).await?;
    for term in terms {
        thesaurus.add_anti_term(term);
    }
    thesaurus.save(store).await?;
    print_stats(&thesaurus);
    Ok(())
}

async fn cmd_stats(config: &AppConfig, store: &Store) -> Result<()> {
    let thesaurus = open(config, store).await?;
    print_stats(&thesaurus);
    Ok(())
}

fn print_stats(thesaurus: &Thesaurus<Crawler>) {
    let stats = thesaurus.stats();
    println!();
    println!("  Accepted:   {}", stats.accepted);
    println!("  Rejected:   {}", stats.rejected);
    println!("  Candidates: {}", stats.candidates);
    println!("  Seeds:      {}", stats.seeds);
    println!("  Seen:       {}", stats.seen);
    println!("  Crawled:    {}", stats.crawled);
    println!();
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
