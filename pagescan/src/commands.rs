use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("pagescan")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("pagescan")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .required(false)
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            command!("analyze")
                .about(
                    "Fetch a single page and report its HTML version, title, headings, links \
                and login form.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("Absolute http(s) URL of the page to analyze"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for fetching the page")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                )
                .arg(
                    arg!(--"probe-timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for each link reachability check")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("3"),
                )
                .arg(
                    arg!(--"max-probe-workers" <NUM_WORKERS>)
                        .required(false)
                        .help("Upper bound on concurrent link checks (default: ceil(sqrt(links) * 3))")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}
