//! CLI argument parsing.
//!
//! Uses clap derive macros for declarative argument definitions. This
//! module defines the command structure; implementations live in the
//! `commands` module.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Review i18n locale changes in a pull request with an AI model and post
/// the results back as line-anchored review comments.
#[derive(Parser, Debug)]
#[command(name = "i18n-review")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a pull request's locale changes and write a review report.
    ///
    /// Fetches the PR's changed files, parses the locale-file patches,
    /// sends the added lines to the review model, and stores the filtered
    /// result as a JSON report keyed by PR number.
    Analyze(AnalyzeArgs),

    /// Post a previously generated report back to the pull request.
    Post(PostArgs),

    /// Analyze and post in one step.
    Run(RunArgs),
}

/// Which pull request to work on.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Repository owner (user or organization).
    #[arg(long)]
    pub owner: String,

    /// Repository name.
    #[arg(long)]
    pub repo: String,

    /// Pull request number.
    #[arg(long)]
    pub pr: u64,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Write the report here instead of the default report store path.
    #[arg(long)]
    pub report_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Read the report from here instead of the default report store path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Which comment-anchor addressing the host should receive.
    #[arg(long, value_enum, default_value_t = AnchorMode::Line)]
    pub anchor_mode: AnchorMode,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Which comment-anchor addressing the host should receive.
    #[arg(long, value_enum, default_value_t = AnchorMode::Line)]
    pub anchor_mode: AnchorMode,
}

/// Comment-anchor addressing mode of the comment sink.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// Legacy `{path, position, body}` form, one batched review.
    Position,
    /// Current `{path, line, side}` form, individual comments.
    Line,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "i18n-review",
            "analyze",
            "--owner",
            "acme",
            "--repo",
            "webapp",
            "--pr",
            "42",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.target.owner, "acme");
                assert_eq!(args.target.repo, "webapp");
                assert_eq!(args.target.pr, 42);
                assert!(args.report_out.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_post_defaults_to_line_mode() {
        let cli = Cli::try_parse_from([
            "i18n-review",
            "post",
            "--owner",
            "acme",
            "--repo",
            "webapp",
            "--pr",
            "42",
        ])
        .unwrap();

        match cli.command {
            Command::Post(args) => assert_eq!(args.anchor_mode, AnchorMode::Line),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_missing_pr() {
        let result =
            Cli::try_parse_from(["i18n-review", "analyze", "--owner", "acme", "--repo", "webapp"]);
        assert!(result.is_err());
    }
}
