//! ytstat - Fetch and summarize YouTube channel upload statistics

use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytstat::{
    aggregation::{ChannelOutcome, RunTotals},
    cli::{Cli, Command, ExportArgs, ReportArgs},
    error::{Result, YtstatError},
    export,
    output::get_formatter,
    report::ReportRunner,
    youtube::YouTubeApi,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose widens the default filter, RUST_LOG
    // overrides both.
    let default_filter = if cli.verbose {
        "ytstat=debug"
    } else {
        "ytstat=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_key = cli.api_key.clone().ok_or_else(|| {
        YtstatError::Config(
            "no API key given; pass --api-key or set YOUTUBE_API_KEY".to_string(),
        )
    })?;

    match cli.command {
        Command::Report(args) => run_report(api_key, args).await,
        Command::Export(args) => run_export(api_key, args).await,
    }
}

async fn run_report(api_key: String, args: ReportArgs) -> Result<()> {
    let range = args.fetch.date_range()?;
    let channel_ids = args.fetch.channel_ids()?;
    info!(channels = channel_ids.len(), range = %range, "running report");

    let show_progress = !args.json && is_terminal::is_terminal(std::io::stdout());
    let runner = ReportRunner::new(YouTubeApi::new(api_key)).with_progress(show_progress);

    let outcomes = runner.run_channels(&channel_ids, &range).await;
    let totals = RunTotals::from_outcomes(&outcomes);

    let formatter = get_formatter(args.json);
    println!("{}", formatter.format_outcomes(&outcomes, &totals));

    Ok(())
}

async fn run_export(api_key: String, args: ExportArgs) -> Result<()> {
    let range = args.fetch.date_range()?;
    let channel_ids = args.fetch.channel_ids()?;
    info!(channels = channel_ids.len(), range = %range, "running export");

    let show_progress = is_terminal::is_terminal(std::io::stdout());
    let runner = ReportRunner::new(YouTubeApi::new(api_key)).with_progress(show_progress);

    let outcomes = runner.run_channels(&channel_ids, &range).await;
    let totals = RunTotals::from_outcomes(&outcomes);

    std::fs::create_dir_all(&args.out_dir)?;

    let reports = outcomes
        .iter()
        .filter_map(ChannelOutcome::report)
        .collect::<Vec<_>>();

    if !args.combined_only {
        let mut used_names = std::collections::HashSet::new();
        for report in &reports {
            let path = args
                .out_dir
                .join(export::unique_export_file_name(&report.channel_title, &mut used_names));
            let bytes = export::channel_workbook(report)?;
            std::fs::write(&path, bytes)?;
            println!("Wrote {}", path.display());
        }
    }

    if reports.is_empty() {
        println!("{}", "No reports to export".yellow());
    } else {
        let path = args.out_dir.join("combined_report.xlsx");
        let bytes = export::combined_workbook(reports.iter().copied())?;
        std::fs::write(&path, bytes)?;
        println!("Wrote {}", path.display());
    }

    // Surface the channels that produced nothing
    for outcome in &outcomes {
        match outcome {
            ChannelOutcome::Empty { channel_title, .. } => {
                println!(
                    "{} {} had no videos in the selected range",
                    "Note:".yellow(),
                    channel_title
                );
            }
            ChannelOutcome::Failed { channel_id, reason } => {
                println!("{} {}: {}", "Failed:".red().bold(), channel_id, reason);
            }
            ChannelOutcome::Report(_) => {}
        }
    }

    println!(
        "Exported {} of {} channels ({} empty, {} failed)",
        totals.reported,
        outcomes.len(),
        totals.empty,
        totals.failed
    );

    Ok(())
}
