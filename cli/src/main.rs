use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use minehint_core::{AnalysisConfig, Board, ConflictPolicy, SubsetPass, build_hint_map};

mod config;
mod plan;
mod render;

#[derive(Parser)]
#[command(name = "minehint", version, about = "Minesweeper deduction helper")]
struct Cli {
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate a board snapshot with provably safe and dangerous tiles
    Hint(HintArgs),
    /// Turn a board snapshot into a mouse click plan
    Plan(PlanArgs),
}

#[derive(Args)]
struct HintArgs {
    /// Board snapshot file, one row of tile symbols per line
    /// (`?` covered, `F` flag, `#` unreadable, `0`-`8` revealed)
    board: PathBuf,
    /// Reproduce the legacy last-writer-wins overwrite behavior instead of
    /// reporting conflicting deductions
    #[arg(long)]
    legacy_overwrite: bool,
    /// Skip the pairwise subset pass
    #[arg(long)]
    skip_pairs: bool,
    /// Emit the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PlanArgs {
    /// Board snapshot file, one row of tile symbols per line
    board: PathBuf,
    /// Left pixel edge of the playing field
    #[arg(long, default_value_t = 0)]
    origin_x: u32,
    /// Top pixel edge of the playing field
    #[arg(long, default_value_t = 0)]
    origin_y: u32,
    /// Tile size in pixels
    #[arg(long, default_value_t = 32)]
    tile_size: u32,
    /// Calibration config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Left-click one covered tile when nothing is deducible
    #[arg(long)]
    speculate: bool,
    /// Emit the plan as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    match cli.command {
        Command::Hint(args) => run_hint(args),
        Command::Plan(args) => run_plan(args),
    }
}

fn run_hint(args: HintArgs) -> anyhow::Result<()> {
    let board = load_board(&args.board)?;
    let analysis = AnalysisConfig {
        conflict_policy: if args.legacy_overwrite {
            ConflictPolicy::LastWriterWins
        } else {
            ConflictPolicy::Monotone
        },
        subset_pass: if args.skip_pairs {
            SubsetPass::Skip
        } else {
            SubsetPass::Apply
        },
    };

    let out = build_hint_map(&board, analysis);

    for contradiction in &out.contradictions {
        log::warn!("conflicting deduction: {contradiction:?}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::render_overlay(&board, &out.hints));
        println!(
            "safe {} | dangerous {} | suspect flags {} | wrong flags {} | {} sweeps",
            out.stats.safe_count,
            out.stats.dangerous_count,
            out.stats.suspect_flag_count,
            out.stats.wrong_flag_count,
            out.stats.sweep_count,
        );
    }

    Ok(())
}

fn run_plan(args: PlanArgs) -> anyhow::Result<()> {
    let board = load_board(&args.board)?;
    let bot_config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::BotConfig::default(),
    };

    let out = build_hint_map(&board, AnalysisConfig::default());
    for contradiction in &out.contradictions {
        log::warn!("conflicting deduction: {contradiction:?}");
    }

    let geometry = plan::GridGeometry::from_origin(
        (args.origin_x, args.origin_y),
        args.tile_size,
        board.size(),
    );
    let actions = plan::build_click_plan(
        &board,
        &out.hints,
        &geometry,
        bot_config.screen_scaling,
        args.speculate,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&actions)?);
    } else {
        for action in &actions {
            println!(
                "{:<5} ({}, {})  r{}c{}  {:?}",
                action.button.label(),
                action.pixel.0,
                action.pixel.1,
                action.coords.0,
                action.coords.1,
                action.reason,
            );
        }
        println!(
            "# {} actions, {} ms between clicks",
            actions.len(),
            bot_config.click_delay_ms
        );
    }

    Ok(())
}

fn load_board(path: &Path) -> anyhow::Result<Board> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading board {}", path.display()))?;
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let board =
        Board::from_rows(&rows).with_context(|| format!("parsing board {}", path.display()))?;
    Ok(board)
}
