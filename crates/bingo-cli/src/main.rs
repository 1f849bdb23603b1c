//! Golf Bingo command-line front end.
//!
//! Each player drafts golfers onto a 5×5 board split into budgeted colour
//! zones, then competes on the lowest-scoring complete line once the
//! tournament is under way.
//!
//! # Usage
//!
//! ```text
//! golf-bingo [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show          Print the board with zone budgets
//!   place         Put a golfer in a cell
//!   clear         Empty a cell
//!   reset         Empty the whole board
//!   best-line     Score the board against the feed (--watch to keep polling)
//!   leaderboard   Rank every saved board
//!   golfers       List the golfer catalog
//!   init-config   Write a default config file
//!
//! Options:
//!   --config   <PATH>  Config file [env: GOLF_BINGO_CONFIG]
//!   --user     <NAME>  Player whose board to use [env: GOLF_BINGO_USER]
//!   --data-dir <DIR>   Directory holding boards.json [env: GOLF_BINGO_DATA_DIR]
//!   --feed     <PATH>  Score feed JSON file [env: GOLF_BINGO_FEED]
//! ```
//!
//! Command-line flags override the environment, which overrides the config
//! file.  Log verbosity comes from `RUST_LOG`, falling back to
//! `[general] log_level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use bingo_core::{BoardGeometry, CellIndex, GolferCatalog, ScoreTable};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bingo_cli::application::board_session::BoardSession;
use bingo_cli::application::leaderboard::build_leaderboard;
use bingo_cli::application::ports::{BoardStore, FeedError};
use bingo_cli::infrastructure::score_feed::{CachedScoreFeed, FileScoreSource};
use bingo_cli::infrastructure::storage::board_store::JsonFileBoardStore;
use bingo_cli::infrastructure::storage::config::{
    config_file_path, load_config, save_config, AppConfig,
};
use bingo_cli::infrastructure::terminal;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Golf Bingo: draft golfers onto a 5×5 board and chase the best line.
#[derive(Debug, Parser)]
#[command(name = "golf-bingo", version, about)]
struct Cli {
    /// Path of the TOML config file.  Defaults to the platform config directory.
    #[arg(long, global = true, env = "GOLF_BINGO_CONFIG")]
    config: Option<PathBuf>,

    /// Player whose board the command works on.
    #[arg(long, global = true, env = "GOLF_BINGO_USER")]
    user: Option<String>,

    /// Directory holding `boards.json`; overrides `[storage] data_dir`.
    #[arg(long, global = true, env = "GOLF_BINGO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Score feed file; overrides `[feed] path`.
    #[arg(long, global = true, env = "GOLF_BINGO_FEED")]
    feed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the board, the zone budgets and the fill count.
    Show,
    /// Put a golfer from the catalog in a cell (0-24, row-major).
    Place {
        /// Golfer name, matched case-insensitively.
        golfer: String,
        cell: CellIndex,
    },
    /// Empty one cell.
    Clear { cell: CellIndex },
    /// Empty every cell.
    Reset,
    /// Score the board against the feed and highlight the best line.
    BestLine {
        /// Keep re-scoring every `[feed] refresh_secs` until Ctrl+C.
        #[arg(long)]
        watch: bool,
    },
    /// Rank every saved board by best-line total.
    Leaderboard,
    /// List the golfer catalog; with --user, mark golfers already drafted.
    Golfers,
    /// Write the default configuration to the config path.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if let Some(feed) = &self.feed {
            config.feed.path = Some(feed.clone());
        }
    }

    fn require_user(&self) -> anyhow::Result<&str> {
        match self.user.as_deref().map(str::trim) {
            Some(user) if !user.is_empty() => Ok(user),
            _ => bail!("this command needs a player: pass --user <NAME> or set GOLF_BINGO_USER"),
        }
    }
}

/// Shared objects built once from the configuration.
struct AppContext {
    config: AppConfig,
    geometry: Arc<BoardGeometry>,
    catalog: Arc<GolferCatalog>,
    store: Arc<dyn BoardStore>,
}

impl AppContext {
    fn build(config: AppConfig) -> anyhow::Result<Self> {
        let geometry = config.geometry().context("invalid [[zones]] in config")?;
        let catalog = config.catalog().context("invalid [[golfers]] in config")?;
        let boards_path = config
            .boards_path()
            .context("cannot locate boards.json; set [storage] data_dir or --data-dir")?;
        info!(path = %boards_path.display(), "using board store");

        Ok(Self {
            geometry: Arc::new(geometry),
            catalog: Arc::new(catalog),
            store: Arc::new(JsonFileBoardStore::new(boards_path)),
            config,
        })
    }

    async fn session(&self, user: &str) -> anyhow::Result<BoardSession> {
        BoardSession::open(
            user,
            Arc::clone(&self.geometry),
            Arc::clone(&self.catalog),
            Arc::clone(&self.store),
        )
        .await
        .with_context(|| format!("failed to open the board for '{user}'"))
    }

    fn score_feed(&self) -> Result<CachedScoreFeed, FeedError> {
        let path = self.config.feed.path.clone().ok_or(FeedError::NotConfigured)?;
        Ok(CachedScoreFeed::new(
            Arc::new(FileScoreSource::new(path)),
            self.config.feed.cache_ttl(),
        ))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = config_file_path(cli.config.as_deref())
        .context("cannot locate the config file; pass --config <PATH>")?;
    let loaded = load_config(&config_path);

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise use the configured level (or `info` when the
    // config itself failed to load).
    let fallback_level = loaded
        .as_ref()
        .map(|cfg| cfg.general.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // init-config must work even when the existing file no longer parses.
    if let Command::InitConfig { force } = cli.command {
        return init_config(&config_path, force);
    }

    let mut config =
        loaded.with_context(|| format!("failed to load config from {}", config_path.display()))?;
    cli.apply_overrides(&mut config);
    let ctx = AppContext::build(config)?;
    run(&cli, &ctx).await
}

async fn run(cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &cli.command {
        Command::Show => {
            let session = ctx.session(cli.require_user()?).await?;
            print_board(&session, &Default::default());
            match session.last_saved() {
                Some(at) => println!("Last saved: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                None => println!("Not saved yet"),
            }
        }
        Command::Place { golfer, cell } => {
            let mut session = ctx.session(cli.require_user()?).await?;
            let placed = session.place(golfer, *cell)?;
            session.save(Utc::now()).await?;
            println!("Placed {} ({}) in cell {}", placed.name, placed.salary, cell);
            print_board(&session, &Default::default());
        }
        Command::Clear { cell } => {
            let mut session = ctx.session(cli.require_user()?).await?;
            match session.clear(*cell)? {
                Some(golfer) => println!("Removed {} from cell {}", golfer.name, cell),
                None => println!("Cell {cell} was already empty"),
            }
            session.save(Utc::now()).await?;
            print_board(&session, &Default::default());
        }
        Command::Reset => {
            let mut session = ctx.session(cli.require_user()?).await?;
            session.reset();
            session.save(Utc::now()).await?;
            println!("Board cleared");
        }
        Command::BestLine { watch } => {
            let session = ctx.session(cli.require_user()?).await?;
            let feed = ctx.score_feed()?;
            if *watch {
                watch_best_line(&session, &feed, ctx.config.feed.refresh_interval()).await?;
            } else {
                let scores = feed.scores().await?;
                print_best_line(&session, &scores, &feed).await;
            }
        }
        Command::Leaderboard => {
            let feed = ctx.score_feed()?;
            let scores = feed.scores().await?;
            let entries = build_leaderboard(ctx.store.as_ref(), &scores).await?;
            print!("{}", terminal::render_leaderboard(&entries));
        }
        Command::Golfers => {
            let session = match cli.user.as_deref() {
                Some(_) => Some(ctx.session(cli.require_user()?).await?),
                None => None,
            };
            print!(
                "{}",
                terminal::render_golfers(&ctx.catalog, session.as_ref().map(|s| s.board()))
            );
        }
        // Written by `main` before the context exists.
        Command::InitConfig { .. } => {}
    }
    Ok(())
}

fn init_config(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite it", path.display());
    }
    save_config(path, &AppConfig::default())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn print_board(session: &BoardSession, highlight: &std::collections::BTreeSet<CellIndex>) {
    print!(
        "{}",
        terminal::render_board(session.board(), session.geometry(), highlight)
    );
    print!("{}", terminal::render_zone_status(&session.zone_status()));
}

async fn print_best_line(session: &BoardSession, scores: &ScoreTable, feed: &CachedScoreFeed) {
    let best = session.best_line(scores);
    let highlight = best.as_ref().map(|b| b.cells.clone()).unwrap_or_default();
    print!(
        "{}",
        terminal::render_board(session.board(), session.geometry(), &highlight)
    );
    print!("{}", terminal::render_best_line(best.as_ref()));
    print!("{}", terminal::render_feed_status(&feed.status().await));
}

/// Re-scores the board every `interval` until Ctrl+C.
async fn watch_best_line(
    session: &BoardSession,
    feed: &CachedScoreFeed,
    interval: std::time::Duration,
) -> anyhow::Result<()> {
    info!(interval_secs = interval.as_secs(), "watching best line; press Ctrl+C to stop");
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let scores = feed.scores().await?;
                println!("── {} ──", Utc::now().format("%H:%M:%S"));
                print_best_line(session, &scores, feed).await;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl+C")?;
                info!("received Ctrl+C; stopping watch");
                return Ok(());
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_place_command() {
        // Arrange / Act
        let cli = Cli::parse_from(["golf-bingo", "--user", "alice", "place", "Jon Rahm", "12"]);

        // Assert
        assert_eq!(cli.user.as_deref(), Some("alice"));
        match cli.command {
            Command::Place { golfer, cell } => {
                assert_eq!(golfer, "Jon Rahm");
                assert_eq!(cell, 12);
            }
            other => panic!("expected place, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["golf-bingo", "best-line", "--watch", "--user", "bob"]);
        assert!(matches!(cli.command, Command::BestLine { watch: true }));
        assert_eq!(cli.user.as_deref(), Some("bob"));
    }

    #[test]
    fn test_cli_rejects_non_numeric_cell() {
        let result = Cli::try_parse_from(["golf-bingo", "clear", "centre"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_overrides_replaces_paths() {
        let cli = Cli::parse_from([
            "golf-bingo",
            "--data-dir",
            "/srv/bingo",
            "--feed",
            "/srv/bingo/scores.json",
            "show",
        ]);
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/bingo")));
        assert_eq!(config.feed.path, Some(PathBuf::from("/srv/bingo/scores.json")));
    }

    #[test]
    fn test_require_user_rejects_blank_name() {
        let cli = Cli::parse_from(["golf-bingo", "--user", "  ", "show"]);
        assert!(cli.require_user().is_err());
    }
}
