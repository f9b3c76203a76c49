use crate::demo::{run_demo, run_match, run_stats, DemoArgs, MatchArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Match",
    about = "Rank candidates against job postings from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the active candidates of a dataset against one job
    Match(MatchArgs),
    /// Summarise the score distribution of a dataset for one job
    Stats(StatsArgs),
    /// Score the built-in sample pool and print the rankings
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Stats(args) => run_stats(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_a_subcommand() {
        let cli = Cli::try_parse_from(["talent-match-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn match_command_parses_weights_and_date() {
        let cli = Cli::try_parse_from([
            "talent-match-api",
            "match",
            "--dataset",
            "pool.json",
            "--job",
            "job-1",
            "--min-score",
            "50",
            "--weights",
            "50,10,10,10,10,10",
            "--as-of",
            "2025-06-01",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Match(args)) => {
                assert_eq!(args.job, "job-1");
                assert_eq!(args.min_score, 50);
                assert!(args.weights.is_some());
                assert!(args.as_of.is_some());
            }
            other => panic!("expected match command, got {other:?}"),
        }
    }

    #[test]
    fn match_command_rejects_out_of_range_threshold() {
        let parsed = Cli::try_parse_from([
            "talent-match-api",
            "match",
            "--dataset",
            "pool.json",
            "--job",
            "job-1",
            "--min-score",
            "101",
        ]);
        assert!(parsed.is_err());
    }
}
