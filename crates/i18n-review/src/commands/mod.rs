//! Command implementations behind the CLI.

pub mod analyze;
pub mod post;

use crate::cli::{AnalyzeArgs, Cli, Command, PostArgs, RunArgs};
use crate::model::AnthropicModel;
use crate::report::ReviewReport;
use anyhow::{Context, Result};
use i18n_config::AppConfig;
use i18n_gh_client::{OctocrabHost, TokenResolver};
use log::info;
use std::path::PathBuf;

/// Dispatch the parsed CLI to its command implementation.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = AppConfig::load();

    match cli.command {
        Command::Analyze(args) => {
            let host = connect().await?;
            let model = AnthropicModel::from_env(config.model.clone(), config.max_output_tokens)?;
            run_analyze(&host, &model, &config, &args).await?;
            Ok(())
        }
        Command::Post(args) => {
            let host = connect().await?;
            let report = ReviewReport::load(&report_path(&args)?)?;
            post::post(
                &host,
                &config,
                &args.target.owner,
                &args.target.repo,
                &report,
                args.anchor_mode,
            )
            .await
        }
        Command::Run(args) => {
            let host = connect().await?;
            let model = AnthropicModel::from_env(config.model.clone(), config.max_output_tokens)?;
            let analyze_args = AnalyzeArgs {
                target: args.target.clone(),
                report_out: None,
            };
            let report = run_analyze(&host, &model, &config, &analyze_args).await?;
            post::post(
                &host,
                &config,
                &args.target.owner,
                &args.target.repo,
                &report,
                args.anchor_mode,
            )
            .await
        }
    }
}

/// Build the host client from a resolved token.
async fn connect() -> Result<OctocrabHost> {
    let token = TokenResolver::new().get_token().await?;
    OctocrabHost::with_token(token)
}

/// Analyze and persist the report, returning it for chained posting.
async fn run_analyze(
    host: &OctocrabHost,
    model: &AnthropicModel,
    config: &AppConfig,
    args: &AnalyzeArgs,
) -> Result<ReviewReport> {
    let report = analyze::analyze(
        host,
        model,
        config,
        &args.target.owner,
        &args.target.repo,
        args.target.pr,
    )
    .await?;

    let path = match &args.report_out {
        Some(path) => path.clone(),
        None => i18n_config::paths::report_path(args.target.pr)?,
    };
    report.save(&path)?;
    info!("Report written to {}", path.display());
    Ok(report)
}

/// Resolve where the post command reads its report from.
fn report_path(args: &PostArgs) -> Result<PathBuf> {
    match &args.report {
        Some(path) => Ok(path.clone()),
        None => i18n_config::paths::report_path(args.target.pr)
            .context("Could not resolve the default report path"),
    }
}
