use colored::Colorize;
use gh_labels::config::Config;
use gh_labels::{app, cli};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")] // one interactive session, strictly sequential
async fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    let invocation = cli::Invocation::from_matches(&matches);

    cli::init_logging(invocation.log_level.as_deref());

    if invocation.version {
        println!("gh-labels {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = Config::from_env().with_token(invocation.token);
    match app::run(invocation.mode, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
