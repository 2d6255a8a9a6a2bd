use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use sportrend::{Res, cli, config, error, language::Language};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show trending tracks for a language
    Trending(LanguageOptions),

    /// Show artists derived from trending tracks and the popular roster
    Artists(LanguageOptions),

    /// Search artists and tracks
    Search(SearchOptions),

    /// Keep the trending view fresh and search interactively
    Watch(WatchOptions),

    /// List supported languages and their trending keywords
    Languages,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LanguageOptions {
    /// Language to show (defaults to SPORTREND_LANGUAGE or english)
    #[clap(long, value_enum)]
    pub language: Option<Language>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free-text query
    #[clap(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct WatchOptions {
    #[clap(long, value_enum)]
    pub language: Option<Language>,

    /// Refresh interval in seconds
    #[clap(long, value_parser = parse_interval)]
    pub interval: Option<std::time::Duration>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_interval(value: &str) -> Result<std::time::Duration, String> {
    config::parse_interval(value).ok_or_else(|| format!("'{}' is not a positive number of seconds", value))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SPORTREND_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{}", e);
    }
}

async fn run(cli: Cli) -> Res<()> {
    config::load_env()
        .await
        .map_err(|e| format!("Cannot load environment. Err: {}", e))?;

    match cli.command {
        Command::Trending(opt) => cli::trending(opt.language).await,
        Command::Artists(opt) => cli::artists(opt.language).await,
        Command::Search(opt) => cli::search(opt.query.join(" ")).await,
        Command::Watch(opt) => cli::watch(opt.language, opt.interval).await,
        Command::Languages => cli::languages(),
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
    Ok(())
}
