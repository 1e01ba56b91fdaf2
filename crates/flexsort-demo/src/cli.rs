use std::io::Write;

use clap::{ArgAction, Parser, Subcommand};

use crate::error::Result;
use crate::layout::{LayoutArgs, run_layout};
use crate::logging;
use crate::replay::{ReplayArgs, run_replay};
use crate::sample::{SampleArgs, run_sample};

#[derive(Debug, Parser)]
#[command(
    name = "flexsort",
    about = "Drive the flexsort grid reorder strategy from the command line",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the built-in sample grid.
    Sample(SampleArgs),

    /// Print rest origins and item widths for a container width.
    Layout(LayoutArgs),

    /// Replay a JSON drag trace against the sample grid.
    Replay(ReplayArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Sample(args) => run_sample(args, out),
        Commands::Layout(args) => run_layout(args, out),
        Commands::Replay(args) => run_replay(args, out),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::error::DemoError;
    use crate::replay::ReplayArgs;

    use super::{Cli, Commands, run};

    #[test]
    fn parses_global_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from(["flexsort", "layout", "--width", "320", "-vv"])
            .expect("valid arguments");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Layout(args) => {
                assert_eq!(args.width, 320.0);
                assert!(args.metrics.is_none());
            }
            other => panic!("expected layout, got {other:?}"),
        }
    }

    #[test]
    fn replay_requires_a_trace_path() {
        assert!(Cli::try_parse_from(["flexsort", "replay"]).is_err());
    }

    #[test]
    fn replay_command_dispatches_read_error() {
        let result = run(
            Cli {
                verbose: 0,
                command: Commands::Replay(ReplayArgs {
                    trace: PathBuf::from("/tmp/flexsort/does-not-exist.json"),
                    metrics: None,
                    json: false,
                }),
            },
            &mut Vec::new(),
        );

        match result.expect_err("missing trace should fail") {
            DemoError::ReadFile { path, .. } => {
                assert_eq!(path, PathBuf::from("/tmp/flexsort/does-not-exist.json"));
            }
            other => panic!("expected ReadFile, got {other}"),
        }
    }
}
