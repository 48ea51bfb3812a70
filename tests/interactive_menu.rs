mod common;

use common::{Answer, ScriptedPrompter};
use gh_labels::app::{self, Mode, Operation};
use gh_labels::config::Config;
use gh_labels::options::{SelectiveOptions, NOTHING_ENABLED_MESSAGE};
use gh_labels::workflows::interactive::{choose_mode, ensure_token};

fn bare_config() -> Config {
    Config::from_lookup(|_| None)
}

#[test]
fn menu_maps_suggest_choice_through_scope_prompt() {
    let prompter = ScriptedPrompter::new(vec![Answer::Select(3), Answer::Select(2)]);
    let mode = choose_mode(&prompter).unwrap();
    assert_eq!(
        mode,
        Some(Mode::Run(Operation::SuggestLabels(SelectiveOptions {
            description_only: true,
            ..Default::default()
        })))
    );
    assert_eq!(
        prompter.asked.borrow()[1],
        "What would you like to apply with AI suggestions?"
    );
}

#[test]
fn menu_issue_labels_only() {
    let prompter = ScriptedPrompter::new(vec![Answer::Select(4), Answer::Select(1)]);
    let mode = choose_mode(&prompter).unwrap();
    assert_eq!(
        mode,
        Some(Mode::Run(Operation::SuggestIssueLabels(SelectiveOptions {
            labels_only: true,
            ..Default::default()
        })))
    );
}

#[test]
fn menu_exit_and_help() {
    let exit = ScriptedPrompter::new(vec![Answer::Select(6)]);
    assert_eq!(choose_mode(&exit).unwrap(), None);

    let help = ScriptedPrompter::new(vec![Answer::Select(5)]);
    assert_eq!(choose_mode(&help).unwrap(), Some(Mode::Help));
}

#[test]
fn token_prompt_only_when_missing() {
    let configured = bare_config().with_token(Some("ghp_existing".into()));
    let prompter = ScriptedPrompter::new(vec![]);
    let cfg = ensure_token(configured, &prompter).unwrap();
    assert_eq!(cfg.github.token.as_deref(), Some("ghp_existing"));

    let prompter = ScriptedPrompter::new(vec![Answer::Password("ghp_typed".into())]);
    let cfg = ensure_token(bare_config(), &prompter).unwrap();
    assert_eq!(cfg.github.token.as_deref(), Some("ghp_typed"));
}

#[test]
fn blank_token_is_rejected() {
    let prompter = ScriptedPrompter::new(vec![Answer::Password("   ".into())]);
    let err = ensure_token(bare_config(), &prompter).unwrap_err();
    assert_eq!(err.message(), "Token is required");
}

#[tokio::test]
async fn options_are_checked_before_the_token() {
    let prompter = ScriptedPrompter::new(vec![]);
    let op = Operation::SuggestIssueLabels(SelectiveOptions {
        no_labels: true,
        no_description: true,
        ..Default::default()
    });
    let err = app::execute(op, &bare_config(), &prompter).await.unwrap_err();
    assert_eq!(err.message(), NOTHING_ENABLED_MESSAGE);
}

#[tokio::test]
async fn missing_token_is_a_public_error() {
    let prompter = ScriptedPrompter::new(vec![]);
    let err = app::execute(Operation::RemoveLabels, &bare_config(), &prompter)
        .await
        .unwrap_err();
    assert!(err.message().contains("GITHUB_TOKEN"));
}
