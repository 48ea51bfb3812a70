use crate::app::{Mode, Operation};
use crate::options::SelectiveOptions;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub const USAGE: &str = "\
Available commands:
  add-labels            - Add labels from a template to a GitHub repository
  get-labels            - Get all labels from a GitHub repository in JSON format
  remove-labels         - Remove labels from a GitHub repository
  suggest-labels        - Suggest labels and a description for a pull request using AI
  suggest-issue-labels  - Suggest labels and a description for an issue using AI
  help                  - Display all available commands

Options for suggest-labels and suggest-issue-labels:
  --labels-only         Apply only the suggested labels
  --description-only    Apply only the suggested description
  --no-labels           Do not apply labels
  --no-description      Do not apply the description

Global options:
  -t, --token <TOKEN>   GitHub Personal Access Token (default: $GITHUB_TOKEN)

Run without a command for an interactive menu.
For more details, use: gh-labels [command] --help
";

/// Parsed command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub token: Option<String>,
    pub log_level: Option<String>,
    pub version: bool,
    pub mode: Mode,
}

fn selective_flags(cmd: Command) -> Command {
    let flag = |name: &'static str, help: &'static str| {
        Arg::new(name).long(name).help(help).action(ArgAction::SetTrue)
    };
    cmd.arg(flag("labels-only", "Apply only the suggested labels"))
        .arg(flag("description-only", "Apply only the suggested description"))
        .arg(flag("no-labels", "Do not apply labels"))
        .arg(flag("no-description", "Do not apply the description"))
}

pub fn build_cli() -> Command {
    Command::new("gh-labels")
        .about("Manage GitHub labels, with AI suggestions for pull requests and issues")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("token")
                .short('t')
                .long("token")
                .num_args(1)
                .global(true)
                .help("GitHub Personal Access Token (overrides GITHUB_TOKEN)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .global(true)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("add-labels").about("Add labels from a template to a repository"))
        .subcommand(
            Command::new("get-labels")
                .about("Fetch repository labels as JSON")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .num_args(1)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Write labels to this file instead of the label catalog"),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("output")
                        .help("Print labels to stdout"),
                ),
        )
        .subcommand(Command::new("remove-labels").about("Remove labels from a repository"))
        .subcommand(selective_flags(
            Command::new("suggest-labels").about("Suggest labels and a description for a pull request"),
        ))
        .subcommand(selective_flags(
            Command::new("suggest-issue-labels").about("Suggest labels and a description for an issue"),
        ))
        .subcommand(Command::new("help").about("Display available commands"))
}

fn selective_options(m: &ArgMatches) -> SelectiveOptions {
    SelectiveOptions {
        labels_only: m.get_flag("labels-only"),
        description_only: m.get_flag("description-only"),
        no_labels: m.get_flag("no-labels"),
        no_description: m.get_flag("no-description"),
    }
}

impl Invocation {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mode = match matches.subcommand() {
            Some(("add-labels", _)) => Mode::Run(Operation::AddLabels),
            Some(("get-labels", m)) => Mode::Run(Operation::GetLabels {
                output: m.get_one::<PathBuf>("output").cloned(),
                stdout: m.get_flag("stdout"),
            }),
            Some(("remove-labels", _)) => Mode::Run(Operation::RemoveLabels),
            Some(("suggest-labels", m)) => Mode::Run(Operation::SuggestLabels(selective_options(m))),
            Some(("suggest-issue-labels", m)) => {
                Mode::Run(Operation::SuggestIssueLabels(selective_options(m)))
            }
            Some(("help", _)) => Mode::Help,
            _ => Mode::Interactive,
        };
        Self {
            token: matches.get_one::<String>("token").cloned(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            version: matches.get_flag("version"),
            mode,
        }
    }
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level wins, else RUST_LOG, else info.
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.format_timestamp(None).format_target(false).init();
}
