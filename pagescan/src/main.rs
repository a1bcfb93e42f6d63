use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use pagescan::handlers::{
    AnalyzeOptions, ReportFormat, execute_analysis, generate_report, init_logging, print_banner,
};
use pagescan_analyzer::CancellationToken;
use std::time::Duration;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_count("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("analyze", primary_command)) => handle_analyze(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

async fn handle_analyze(args: &ArgMatches, quiet: bool) {
    let url = args.get_one::<String>("url").unwrap().clone();
    let format = args
        .get_one::<String>("format")
        .and_then(|f| f.parse::<ReportFormat>().ok())
        .unwrap_or(ReportFormat::Text);

    let mut options = AnalyzeOptions::new(url);
    options.format = format;
    options.fetch_timeout = Duration::from_secs(*args.get_one::<u64>("timeout").unwrap());
    options.probe_timeout = Duration::from_secs(*args.get_one::<u64>("probe-timeout").unwrap());
    options.max_probe_workers = args.get_one::<usize>("max-probe-workers").copied();
    options.show_progress = !quiet && format == ReportFormat::Text;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling analysis");
            on_interrupt.cancel();
        }
    });

    let result = match execute_analysis(&options, &cancel).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{} {}", "✗ Analysis failed:".red().bold(), e);
            std::process::exit(1);
        }
    };

    match generate_report(&result, &options.url, options.format) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("{} {}", "✗ Failed to render report:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
