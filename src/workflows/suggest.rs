//! Steps shared by the pull request and issue suggestion workflows.

use crate::error::Failure;
use crate::options::Scope;
use crate::select::{self, Prompter};
use crate::types::{ContentSuggestion, Language, UpdatePayload};
use colored::Colorize;
use log::info;

pub const INCOMPLETE_SUGGESTION_MESSAGE: &str =
    "The AI service returned an incomplete suggestion: both English and Polish descriptions are required.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    Applied(UpdatePayload),
    /// The user declined; nothing was written.
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    PullRequest,
    Issue,
}

impl Target {
    pub(crate) fn noun(self) -> &'static str {
        match self {
            Target::PullRequest => "pull request",
            Target::Issue => "issue",
        }
    }
}

pub fn clamp_confidence(value: i64) -> i64 {
    value.clamp(1, 100)
}

/// Reject suggestions missing a language variant and clamp every confidence into 1..=100.
pub fn validate_suggestion(mut suggestion: ContentSuggestion) -> Result<ContentSuggestion, Failure> {
    if suggestion.description.en.is_none() || suggestion.description.pl.is_none() {
        return Err(Failure::public(INCOMPLETE_SUGGESTION_MESSAGE));
    }
    for label in &mut suggestion.labels {
        label.confidence = clamp_confidence(label.confidence);
    }
    for variant in [&mut suggestion.description.en, &mut suggestion.description.pl]
        .into_iter()
        .flatten()
    {
        variant.confidence = clamp_confidence(variant.confidence);
    }
    Ok(suggestion)
}

/// Only in-scope fields are populated; the chosen language's content is used verbatim,
/// including an empty string.
pub fn build_payload(scope: &Scope, suggestion: &ContentSuggestion, language: Language) -> UpdatePayload {
    UpdatePayload {
        body: if scope.apply_description {
            suggestion.description.get(language).map(|d| d.content.clone())
        } else {
            None
        },
        labels: if scope.apply_labels {
            Some(suggestion.labels.iter().map(|l| l.name.clone()).collect())
        } else {
            None
        },
    }
}

pub(crate) fn present(target: Target, suggestion: &ContentSuggestion, scope: &Scope) {
    println!();
    println!("{}", format!("Here are the suggestions for this {}:", target.noun()).bold());

    if scope.apply_labels {
        println!();
        println!("{}", "Suggested Labels:".bold());
        if suggestion.labels.is_empty() {
            println!("  (none)");
        }
        for label in &suggestion.labels {
            let status = if label.is_new {
                "[NEW]".green()
            } else {
                "[EXISTING]".blue()
            };
            println!("{} {} (Confidence: {}%)", status, label.name.bold(), label.confidence);
            println!("   Reason: {}", label.description);
        }
    }

    if scope.apply_description {
        println!();
        println!("{}", "Suggested Description:".bold());
        for language in Language::ALL {
            if let Some(variant) = suggestion.description.get(language) {
                println!();
                println!("{}", format!("{} version:", language.display_name()).cyan());
                println!("Confidence: {}%", variant.confidence);
                println!("{}", variant.content);
            }
        }
    }
    println!();
}

/// Single confirm gate, then the language choice when the description is in scope.
/// `None` means the user declined.
pub(crate) fn confirm_apply(prompter: &dyn Prompter, target: Target, scope: &Scope) -> Result<Option<Language>, Failure> {
    let message = format!("Would you like to apply these changes to the {}?", target.noun());
    if !select::confirm(prompter, &message)? {
        info!("No changes were applied.");
        return Ok(None);
    }
    if scope.apply_description {
        Ok(Some(select::choose_language(prompter)?))
    } else {
        Ok(Some(Language::En))
    }
}

pub(crate) fn applied_message(target: Target, scope: &Scope) -> String {
    format!(
        "Successfully applied {} to the {}!",
        scope.features().join(" and "),
        target.noun()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DescriptionVariant, Descriptions, LabelSuggestion};

    fn suggestion(label_conf: &[i64]) -> ContentSuggestion {
        ContentSuggestion {
            labels: label_conf
                .iter()
                .enumerate()
                .map(|(i, c)| LabelSuggestion {
                    name: format!("l{}", i),
                    description: String::new(),
                    confidence: *c,
                    is_new: false,
                })
                .collect(),
            description: Descriptions {
                en: Some(DescriptionVariant {
                    content: "english".into(),
                    confidence: 0,
                }),
                pl: Some(DescriptionVariant {
                    content: String::new(),
                    confidence: 250,
                }),
            },
        }
    }

    #[test]
    fn confidences_are_clamped() {
        let s = validate_suggestion(suggestion(&[0, -5, 150, 42])).unwrap();
        let got: Vec<i64> = s.labels.iter().map(|l| l.confidence).collect();
        assert_eq!(got, vec![1, 1, 100, 42]);
        assert_eq!(s.description.en.unwrap().confidence, 1);
        assert_eq!(s.description.pl.unwrap().confidence, 100);
    }

    #[test]
    fn missing_language_is_rejected() {
        let mut s = suggestion(&[50]);
        s.description.pl = None;
        let err = validate_suggestion(s).unwrap_err();
        assert_eq!(err.to_string(), INCOMPLETE_SUGGESTION_MESSAGE);
    }

    #[test]
    fn payload_respects_scope() {
        let s = suggestion(&[90]);
        let both = Scope {
            apply_labels: true,
            apply_description: true,
        };
        let p = build_payload(&both, &s, Language::En);
        assert_eq!(p.body.as_deref(), Some("english"));
        assert_eq!(p.labels, Some(vec!["l0".to_string()]));

        let desc_only = Scope {
            apply_labels: false,
            apply_description: true,
        };
        let p = build_payload(&desc_only, &s, Language::Pl);
        assert_eq!(p.body.as_deref(), Some(""));
        assert!(p.labels.is_none());

        let labels_only = Scope {
            apply_labels: true,
            apply_description: false,
        };
        assert!(build_payload(&labels_only, &s, Language::En).body.is_none());
    }

    #[test]
    fn applied_message_names_features() {
        let s = Scope {
            apply_labels: true,
            apply_description: true,
        };
        assert_eq!(
            applied_message(Target::Issue, &s),
            "Successfully applied labels and description to the issue!"
        );
    }
}
