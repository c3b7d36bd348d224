//! Tiny-Search main entry point
//!
//! Command-line driver that builds an inverted index from crawled pages and
//! checks it survives a reload.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tiny_search::config::{load_config_with_hash, Config};
use tiny_search::crawler::discover_links;
use tiny_search::index::InvertedIndex;
use tiny_search::indexer::{build_index, reload_and_rewrite, verify_round_trip};
use tiny_search::output::{print_statistics, IndexStatistics};
use tiny_search::storage::read_page;
use tracing_subscriber::EnvFilter;

/// Tiny-Search: inverted index builder for a tiny search engine
///
/// Reads the pages saved by the crawler, builds an inverted index of their
/// words, and writes it to a sorted text file that can be reloaded and
/// checked.
#[derive(Parser, Debug)]
#[command(name = "tiny-search")]
#[command(version = "1.0.0")]
#[command(about = "Inverted index builder for a tiny search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Build the index, then reload it and check the files match
    #[arg(long, conflicts_with_all = ["reload", "stats", "dry_run", "links"])]
    verify: bool,

    /// Reload an existing index file and write it back out for comparison
    #[arg(long, conflicts_with_all = ["verify", "stats", "dry_run", "links"])]
    reload: bool,

    /// Show statistics of an existing index file and exit
    #[arg(long, conflicts_with_all = ["verify", "reload", "dry_run", "links"])]
    stats: bool,

    /// Validate config and show what would be indexed without indexing
    #[arg(long, conflicts_with_all = ["verify", "reload", "stats", "links"])]
    dry_run: bool,

    /// Print the crawlable links of one saved page file and exit
    #[arg(long, value_name = "PAGE_FILE", conflicts_with_all = ["verify", "reload", "stats", "dry_run"])]
    links: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration and dispatches to the selected mode
fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else if cli.reload {
        handle_reload(&config)
    } else if let Some(page_file) = &cli.links {
        handle_links(page_file)
    } else {
        handle_build(&config, cli.verify)
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tiny_search=info,warn"),
            1 => EnvFilter::new("tiny_search=debug,info"),
            2 => EnvFilter::new("tiny_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Tiny-Search Dry Run ===\n");

    println!("Index:");
    println!("  Table size: {}", config.index.table_size);
    println!("  Max word length: {}", config.index.max_word_length);
    println!("  Merge policy: {:?}", config.index.merge_policy);

    println!("\nPages:");
    println!("  Directory: {}", config.pages.directory);

    println!("\nOutput:");
    println!("  Index: {}", config.output.index_path);
    println!("  Reload: {}", config.output.reload_path);

    let pages = tiny_search::storage::list_pages(Path::new(&config.pages.directory))
        .context("failed to list pages")?;

    println!("\n✓ Configuration is valid");
    println!("✓ Would index {} page files", pages.len());

    Ok(())
}

/// Handles the default and --verify modes: builds and saves the index
fn handle_build(config: &Config, verify: bool) -> anyhow::Result<()> {
    let options = config.index_options();
    let index_path = Path::new(&config.output.index_path);

    let (index, report) = build_index(Path::new(&config.pages.directory), options)?;
    tracing::info!(
        "Indexed {} pages ({} skipped), {} word occurrences",
        report.pages_indexed,
        report.pages_skipped,
        report.words_seen
    );

    if verify {
        let reload_path = Path::new(&config.output.reload_path);
        let verified = verify_round_trip(&index, index_path, reload_path, options)?;
        tracing::info!(
            "Round trip verified: {} words, sha256 {}",
            verified.words,
            verified.original_digest
        );
    } else {
        index.serialize(index_path)?;
    }

    Ok(())
}

/// Handles the --reload mode: reloads the index file and writes it back out
fn handle_reload(config: &Config) -> anyhow::Result<()> {
    let (_, report) = reload_and_rewrite(
        Path::new(&config.output.index_path),
        Path::new(&config.output.reload_path),
        config.index_options(),
    )?;

    if !report.files_match() {
        anyhow::bail!(
            "{} and {} differ ({} lines skipped on reload)",
            config.output.index_path,
            config.output.reload_path,
            report.reload.lines_skipped
        );
    }

    Ok(())
}

/// Handles the --stats mode: shows statistics of the index file
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Index file: {}\n", config.output.index_path);

    let index = InvertedIndex::deserialize(
        Path::new(&config.output.index_path),
        config.index_options(),
    )?;

    print_statistics(&IndexStatistics::collect(&index));

    Ok(())
}

/// Handles the --links mode: prints the links the crawler would follow
fn handle_links(page_file: &Path) -> anyhow::Result<()> {
    let page = read_page(page_file)?;

    for link in discover_links(&page.html, &page.url) {
        println!("{}", link);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path) -> PathBuf {
        let pages = dir.join("pages");
        fs::create_dir(&pages).unwrap();
        fs::write(pages.join("1"), "http://x.com/\n0\n<p>red fish blue fish</p>").unwrap();

        let config = dir.join("tiny-search.toml");
        fs::write(
            &config,
            format!(
                "[pages]\ndirectory = {:?}\n\n[output]\nindex-path = {:?}\nreload-path = {:?}\n",
                pages.display().to_string(),
                dir.join("index.dat").display().to_string(),
                dir.join("reload.dat").display().to_string(),
            ),
        )
        .unwrap();
        config
    }

    #[test]
    fn test_modes_conflict() {
        assert!(Cli::try_parse_from(["tiny-search", "c.toml", "--verify", "--stats"]).is_err());
        assert!(Cli::try_parse_from(["tiny-search", "c.toml", "-q", "-v"]).is_err());

        let cli = Cli::try_parse_from(["tiny-search", "c.toml", "-vv", "--links", "7"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.links, Some(PathBuf::from("7")));
    }

    #[test]
    fn test_run_reports_missing_config() {
        let cli = Cli::try_parse_from(["tiny-search", "/nonexistent/tiny-search.toml"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(format!("{:#}", err).starts_with("failed to load /nonexistent/tiny-search.toml"));
    }

    #[test]
    fn test_run_verify_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let config = config.to_str().unwrap();

        run(&Cli::try_parse_from(["tiny-search", config, "--verify"]).unwrap()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("index.dat")).unwrap(),
            "blue 1 1 1\nfish 1 1 2\nred 1 1 1\n"
        );

        run(&Cli::try_parse_from(["tiny-search", config, "--reload"]).unwrap()).unwrap();
    }

    #[test]
    fn test_run_reload_without_index_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());

        let cli = Cli::try_parse_from(["tiny-search", config.to_str().unwrap(), "--reload"]).unwrap();
        assert!(run(&cli).is_err());
    }
}
