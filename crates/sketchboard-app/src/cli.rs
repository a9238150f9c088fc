//! Command line surface.

use crate::error::AppError;
use crate::script::{RunReport, Script, run_script};
use clap::{Args, Parser, Subcommand};
use sketchboard_core::{BoardConfig, Whiteboard};
use sketchboard_render::{DEFAULT_EXPORT_NAME, RenderContext, save_png};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sketchboard", about = "Headless whiteboard: replay a script, export a PNG")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay an interaction script and export the board.
    Run(RunArgs),
    /// Print the default board configuration as JSON.
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// JSON script of steps to replay.
    #[arg(long)]
    pub script: PathBuf,

    #[arg(long, default_value = DEFAULT_EXPORT_NAME)]
    pub out: PathBuf,

    /// Board configuration JSON; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
}

pub fn execute(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Run(args) => {
            let report = run(&args)?;
            println!(
                "{} steps, {} commits, wrote {}",
                report.steps,
                report.commits,
                args.out.display()
            );
            Ok(())
        }
        Command::Config => {
            println!("{}", BoardConfig::default().to_json()?);
            Ok(())
        }
    }
}

/// Load config and script, replay, and save the PNG.
pub fn run(args: &RunArgs) -> Result<RunReport, AppError> {
    let config = match &args.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    let script = Script::load(&args.script)?;
    let base_dir = args.script.parent().unwrap_or(Path::new("."));

    let mut board = Whiteboard::with_config(config)?;
    let report = run_script(&script, &mut board, base_dir)?;
    // Export what the user sees, even mid-gesture.
    save_png(&RenderContext::from_board(&board), args.width, args.height, &args.out)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["sketchboard", "run", "--script", "s.json"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.out, PathBuf::from(DEFAULT_EXPORT_NAME));
        assert_eq!((args.width, args.height), (800, 600));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(
            Cli::try_parse_from(["sketchboard", "run", "--script", "s.json", "--width", "0"])
                .is_err()
        );
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["sketchboard", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
    }
}
