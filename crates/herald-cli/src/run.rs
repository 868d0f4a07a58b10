//! The default command: validate configuration, then run the pipeline.

use anyhow::Context;
use tracing::{info, warn};

use herald_core::pipeline::{Pipeline, PipelineSettings};
use herald_infra::config::{load_file_config, resolve_run_config};
use herald_infra::github::GitHubReleaseHost;
use herald_infra::llm::OpenAiCompatibleProvider;
use herald_infra::slack::SlackWebhookNotifier;
use herald_types::config::FileConfig;
use herald_types::report::{RunReport, StepStatus};

use crate::cli::Cli;

/// Run the release pipeline once and print the report.
///
/// Configuration is fully validated before any adapter is built.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let file = match &cli.config {
        Some(path) => load_file_config(path).await?,
        None => FileConfig::default(),
    };
    let config = resolve_run_config(cli.sources(), file)?;
    info!(
        repository = %config.repository,
        tag = %config.tag,
        model = %config.model,
        "Starting release announcement"
    );

    let host = GitHubReleaseHost::new(config.github_token, config.repository)
        .context("failed to set up GitHub client")?
        .with_api_url(&config.github_api_url);
    let provider = OpenAiCompatibleProvider::with_base_url(
        config.openai_api_key,
        &config.model,
        &config.openai_base_url,
    );
    let notifier = SlackWebhookNotifier::new(config.slack_webhook_url)
        .context("failed to set up Slack client")?;

    let pipeline = Pipeline::new(
        host,
        provider,
        notifier,
        PipelineSettings {
            tag: config.tag,
            model: config.model,
            product_name: config.product_name,
        },
    );

    let report = pipeline.run().await?;
    let message = outcome_message(&report);
    if report.updated.is_success() && report.notified.is_success() {
        info!("{message}");
    } else {
        warn!(
            updated = report.updated.is_success(),
            notified = report.notified.is_success(),
            "{message}"
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// One-line outcome for the log, naming the follow-up steps that failed.
fn outcome_message(report: &RunReport) -> &'static str {
    match (report.updated.is_success(), report.notified.is_success()) {
        (true, true) => "Release notes summarized and announcement sent",
        (false, true) => "Announcement sent, but the release notes were not updated",
        (true, false) => "Release notes updated, but the announcement was not sent",
        (false, false) => "Release created, but neither the notes update nor the announcement succeeded",
    }
}

fn print_report(report: &RunReport) {
    let step = |label: &str, status: &StepStatus| match status {
        StepStatus::Succeeded => format!("  {} {label}", console::style("✓").green()),
        StepStatus::Failed { error } => format!(
            "  {} {label}: {}",
            console::style("✗").red(),
            console::style(error).dim()
        ),
    };

    println!();
    println!(
        "  {} Release {} published",
        console::style("🚀").bold(),
        console::style(&report.tag).cyan()
    );
    println!("  {}", console::style(&report.html_url).underlined());
    if let Some(published_at) = report.published_at {
        let when = published_at.format("%Y-%m-%d %H:%M UTC");
        println!("  {}", console::style(format!("published {when}")).dim());
    }
    println!();
    println!(
        "{}",
        step(
            &format!("Release notes updated ({} chars)", report.summary_chars),
            &report.updated
        )
    );
    println!("{}", step("Announcement sent to chat", &report.notified));
    println!();
}
